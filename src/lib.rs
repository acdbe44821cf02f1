//! # fitroute
//!
//! **fitroute** is a small HTTP request router that selects a handler by method and
//! path, extracts typed parameters from the path, coerces them to the handler's
//! declared types, and invokes it.
//!
//! ## Overview
//!
//! Routes are declared with typed placeholders:
//!
//! ```rust
//! use fitroute::{Dispatcher, Request, Response, RouteTableBuilder};
//!
//! # fn main() -> Result<(), fitroute::RouteDeclarationError> {
//! let mut builder = RouteTableBuilder::new();
//! builder
//!     .get("/add/{Integer}/{Integer}", |res: &mut Response, (a, b): (i32, i32)| {
//!         res.message(200, format!("{a} + {b} = {}", a + b))
//!     })?
//!     .get("*", |res: &mut Response, (): ()| res.message(418, "Not an operation"))?;
//!
//! let dispatcher = Dispatcher::new(Ok(builder.build()));
//! let response = dispatcher.dispatch(&Request::parse("GET", "/add/3/4").unwrap());
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body(), "3 + 4 = 7");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **[`coerce`]** - Typed values, the open coercer registry, typed extraction
//! - **[`template`]** - Route template parsing, perfect matching and best-fit scoring
//! - **[`router`]** - Route registration and route selection
//! - **[`dispatcher`]** - Request dispatch and routing-failure responses
//! - **[`server`]** - The request and response types the router works with
//! - **[`math`]** - Demo arithmetic handlers
//! - **[`logging`]** / **[`runtime_config`]** - Ambient setup from the environment
//! - **[`cli`]** - The `fitroute` binary
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Dispatcher
//!     participant Table as RouteTable
//!     participant Template as PathTemplate
//!     participant Handler
//!
//!     Transport->>Dispatcher: handle(request, response)
//!     alt Route setup failed
//!         Dispatcher-->>Transport: 500
//!     end
//!     Dispatcher->>Table: resolve(method, segments)
//!     alt No routes for method
//!         Dispatcher-->>Transport: 404
//!     end
//!     loop routes in registration order
//!         Table->>Template: matches_perfectly / how_correct
//!     end
//!     alt Nothing selected
//!         Dispatcher-->>Transport: 501
//!     end
//!     Dispatcher->>Template: coerce_params(segments)
//!     alt Coercion failed
//!         Dispatcher-->>Transport: 501
//!     end
//!     Dispatcher->>Handler: invoke(response, request, args)
//!     Handler-->>Transport: status + body
//! ```
//!
//! ### Key Properties
//!
//! 1. **Validated up front**: unknown placeholder types and parameter mismatches fail
//!    at registration, and a table that failed to build serves nothing but `500`.
//! 2. **Immutable table**: the [`RouteTable`] is frozen by the builder and shared
//!    read-only, so concurrent dispatch needs no locking.
//! 3. **Deterministic selection**: first perfect match wins; otherwise the earliest
//!    route with the strictly highest score.
//! 4. **No panics in routing**: every mismatch becomes a coded response.

pub mod cli;
pub mod coerce;
pub mod dispatcher;
pub mod logging;
pub mod math;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod template;

pub use coerce::{CoercerRegistry, CoercionError, FromParam, FromParams, Value};
pub use dispatcher::{Dispatcher, Outcome};
pub use router::{Call, Resolution, RouteDeclarationError, RouteTable, RouteTableBuilder};
pub use server::{Request, Response};
pub use template::PathTemplate;
