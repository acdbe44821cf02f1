//! # Server Module
//!
//! The request and response types the router consumes and populates.
//!
//! Socket handling and HTTP parsing belong to the owning transport. By the time a
//! request reaches the router it has been reduced to a [`Request`]: a method, a path
//! already split into non-empty segments, and a string map of extra context
//! (query string pairs plus anything the transport adds). Handlers write their
//! answer into a [`Response`] sink.

pub mod request;
pub mod response;

pub use request::{parse_query_params, split_path, Context, Request, SegmentVec};
pub use response::Response;
