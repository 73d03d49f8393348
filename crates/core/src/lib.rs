//! # Calhub Core
//!
//! Domain types shared by the persistence and HTTP layers, together with the
//! pieces of logic that need no I/O:
//!
//! - [`availability`]: bookable slot generation for a weekly schedule
//! - [`sync`]: mapping of normalized provider payloads into local records
//! - [`providers`]: the opaque calendar-provider and conferencing capabilities

pub mod availability;
pub mod errors;
pub mod models;
pub mod parse;
pub mod providers;
pub mod sync;
