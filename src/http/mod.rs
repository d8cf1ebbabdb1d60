//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! routing policy: validators, byte ranges and response builders.

pub mod cache;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use cache::Validators;
pub use range::{parse_range_header, ByteRange, RangeParseResult};
pub use response::{
    build_304_response, build_404_response, build_405_response, build_416_response,
    build_file_response, build_html_response, build_moved_permanently_response,
    build_options_response, build_partial_response,
};
