//! # Dispatcher Module
//!
//! Turns a [`Request`](crate::server::Request) into a written
//! [`Response`](crate::server::Response).
//!
//! ## Request Flow
//!
//! 1. If the route table failed to build, answer `500` and stop.
//! 2. Look up the routes for the request's method; none at all answers `404`.
//! 3. [`RouteTable::resolve`](crate::router::RouteTable::resolve) picks a perfect
//!    match or the best fit; nothing selected answers `501`.
//! 4. The selected template coerces the placeholder segments. A coercion failure
//!    means the route did not really match and also answers `501`.
//! 5. The handler is invoked with the response sink, the request and the
//!    coerced arguments, and writes its own answer.
//!
//! Every path ends with exactly one [`Outcome`]. Nothing the router does itself
//! panics or returns an error to the transport; handler panics are not caught.
//!
//! ## Sharing
//!
//! [`Dispatcher`] is cheap to clone (the table sits behind an `Arc`) and holds no
//! mutable state, so one instance can serve every worker thread.

mod core;

pub use core::{
    Dispatcher, Outcome, NO_MATCH_STATUS, NO_METHOD_STATUS, SETUP_ERROR_MESSAGE,
    SETUP_FAILED_STATUS,
};
