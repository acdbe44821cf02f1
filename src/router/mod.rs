//! # Router Module
//!
//! Route registration and route selection.
//!
//! ## Overview
//!
//! Routes are registered once, at startup, through a [`RouteTableBuilder`]:
//!
//! ```rust
//! use fitroute::router::RouteTableBuilder;
//! use fitroute::server::Response;
//!
//! # fn main() -> Result<(), fitroute::router::RouteDeclarationError> {
//! let mut builder = RouteTableBuilder::new();
//! builder.get("/hello/{String}", |res: &mut Response, (name,): (String,)| {
//!     res.message(200, format!("Hello, {name}!"))
//! })?;
//! let table = builder.build();
//! # Ok(())
//! # }
//! ```
//!
//! Registration validates everything it can up front: the method, every
//! placeholder type, and that the handler's declared parameter types line up
//! with the template's placeholders. A bad declaration is a
//! [`RouteDeclarationError`], never a runtime surprise.
//!
//! [`RouteTableBuilder::build`] freezes the routes into a [`RouteTable`]. The table
//! is immutable, so it can be shared across any number of request workers behind
//! an `Arc` without locking.
//!
//! ## Selection
//!
//! [`RouteTable::resolve`] walks the routes registered for the request's method in
//! registration order:
//!
//! 1. The first route that matches perfectly is selected immediately.
//! 2. Otherwise the route with the strictly highest best-fit score is selected;
//!    ties keep the earliest registration.
//! 3. If nothing scores above zero the result is [`Resolution::NoMatch`].
//!
//! Duplicate templates for the same method are allowed; the earlier one wins.

mod core;
mod error;
mod handler;

pub use core::{Resolution, RouteEntry, RouteSummary, RouteTable, RouteTableBuilder};
pub use error::RouteDeclarationError;
pub use handler::{Call, RouteHandler};
