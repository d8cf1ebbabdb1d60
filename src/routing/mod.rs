//! Routing module
//!
//! Provides the request routing policy:
//! - Route prefix and SPA mount normalization
//! - Response header directive parsing
//! - Path-based responder selection

mod header;
mod matcher;
mod prefix;

pub use header::{parse_header_flag, HeaderDirective};
pub use matcher::{match_route, Route, RouteTable};
pub use prefix::{clean_path, RoutePrefix};
