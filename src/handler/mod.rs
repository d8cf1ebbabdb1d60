//! Request handler module
//!
//! Responsible for request routing dispatch and the responders behind it:
//! static files, the version endpoint and the SPA fallback.

mod listing;
pub mod router;
pub mod spa;
pub mod static_files;
pub mod version;

// Re-export main entry point
pub use router::{handle_request, RequestContext};
