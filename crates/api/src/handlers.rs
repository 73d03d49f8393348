pub mod availability;
pub mod conferencing;
pub mod events;
pub mod meetings;
pub mod schedule;
pub mod sync;
pub mod tasks;
