
mod availability_test;
mod meetings_test;
mod schedule_test;
mod sync_test;
