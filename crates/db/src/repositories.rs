pub mod event;
pub mod meeting;
pub mod schedule;
pub mod task;
