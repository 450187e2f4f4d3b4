// Resume collaborators: upload and the full listing.
// Parsing, storage and indexing stay in the backend.

pub mod handlers;
pub mod listing;
pub mod upload;
