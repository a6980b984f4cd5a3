pub mod backup;
pub mod health;
pub mod schedule;
pub mod slot;
pub mod views;
