//! # CLI Module
//!
//! Command-line access to the demo arithmetic route table.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! List the registered routes in registration order:
//!
//! ```bash
//! fitroute routes
//! fitroute routes --json
//! ```
//!
//! ### `route`
//!
//! Dispatch a single request and print the status and body:
//!
//! ```bash
//! fitroute route GET /add/3/4
//! # 200 OK
//! # 3 + 4 = 7
//!
//! fitroute route GET '/add/3.5/4' --json
//! ```
//!
//! `--context key=value` adds entries to the request's context map.

mod commands;


pub use commands::{execute, run_cli, Cli, Commands};
