/// Meeting links for locally created meetings
pub mod meeting_links;
/// Provider calendar sync
pub mod sync;
