mod backup_test;
mod health_test;
mod middleware_test;
mod schedule_test;
mod slot_test;
mod views_test;
