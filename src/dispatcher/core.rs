use crate::router::{Call, Resolution, RouteDeclarationError, RouteTable};
use crate::runtime_config::RuntimeConfig;
use crate::server::{Request, Response};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Status when no route is registered for the request's method.
pub const NO_METHOD_STATUS: u16 = 404;

/// Status when routes exist for the method but none fits the path.
pub const NO_MATCH_STATUS: u16 = 501;

/// Status for every request when the route table failed to build.
pub const SETUP_FAILED_STATUS: u16 = 500;

/// Body sent for every request when the route table failed to build.
pub const SETUP_ERROR_MESSAGE: &str = "The server failed to set up its routes.";

/// How a request ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A handler ran and wrote the response.
    Invoked {
        template: String,
        position: usize,
        best_fit: bool,
    },
    /// Nothing is registered for the method.
    NoRoutesForMethod,
    /// No route fits the path, or the selected route's parameters did not coerce.
    NoMatchingRoute,
    /// The route table never built.
    SetupFailed,
}

impl Outcome {
    #[must_use]
    pub fn is_invoked(&self) -> bool {
        matches!(self, Outcome::Invoked { .. })
    }
}

#[derive(Clone, Debug)]
enum State {
    Ready(Arc<RouteTable>),
    SetupFailed(Arc<RouteDeclarationError>),
}

/// Routes requests against an immutable [`RouteTable`].
#[derive(Clone, Debug)]
pub struct Dispatcher {
    state: State,
    config: RuntimeConfig,
}

impl Dispatcher {
    /// Wrap the result of building a route table.
    ///
    /// A failed build does not abort: the dispatcher answers every request
    /// with [`SETUP_FAILED_STATUS`] instead of serving a partial table.
    #[must_use]
    pub fn new(table: Result<RouteTable, RouteDeclarationError>) -> Self {
        match table {
            Ok(table) => Self::from_table(table),
            Err(err) => Self::failed(err),
        }
    }

    #[must_use]
    pub fn from_table(table: RouteTable) -> Self {
        Self {
            state: State::Ready(Arc::new(table)),
            config: RuntimeConfig::from_env(),
        }
    }

    /// A dispatcher that refuses all traffic because setup failed.
    #[must_use]
    pub fn failed(err: RouteDeclarationError) -> Self {
        error!(error = %err, "Route setup failed - all requests will be refused");
        Self {
            state: State::SetupFailed(Arc::new(err)),
            config: RuntimeConfig::from_env(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn table(&self) -> Option<&Arc<RouteTable>> {
        match &self.state {
            State::Ready(table) => Some(table),
            State::SetupFailed(_) => None,
        }
    }

    #[must_use]
    pub fn setup_error(&self) -> Option<&RouteDeclarationError> {
        match &self.state {
            State::Ready(_) => None,
            State::SetupFailed(err) => Some(err.as_ref()),
        }
    }

    /// Route `request` and write the answer into `response`.
    pub fn handle(&self, request: &Request, response: &mut Response) -> Outcome {
        let table = match &self.state {
            State::Ready(table) => table,
            State::SetupFailed(err) => {
                error!(
                    method = %request.method(),
                    path = %request.path(),
                    error = %err,
                    "Request refused - route setup failed"
                );
                response.message(SETUP_FAILED_STATUS, SETUP_ERROR_MESSAGE);
                return Outcome::SetupFailed;
            }
        };

        let method = request.method();
        let segments = request.split_path();

        debug!(
            method = %method,
            path = %request.path(),
            candidates = table.routes_for(method).len(),
            "Route match attempt"
        );

        let match_start = Instant::now();
        let resolution = table.resolve(method, segments);
        let match_duration = match_start.elapsed();

        let (entry, best_fit) = match resolution {
            Resolution::NoRoutesForMethod => {
                warn!(
                    method = %method,
                    path = %request.path(),
                    "No routes registered for method"
                );
                response.message(NO_METHOD_STATUS, format!("No {method} routes exist."));
                return Outcome::NoRoutesForMethod;
            }
            Resolution::NoMatch => {
                warn!(
                    method = %method,
                    path = %request.path(),
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
                no_match(request, response);
                return Outcome::NoMatchingRoute;
            }
            Resolution::Perfect(entry) => (entry, false),
            Resolution::BestFit { entry, score } => {
                debug!(
                    method = %method,
                    route_pattern = %entry.template(),
                    score = score,
                    "No perfect match - using best fit"
                );
                (entry, true)
            }
        };

        if match_duration > self.config.slow_match_threshold {
            warn!(
                method = %method,
                path = %request.path(),
                route_pattern = %entry.template(),
                best_fit = best_fit,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            info!(
                method = %method,
                path = %request.path(),
                route_pattern = %entry.template(),
                best_fit = best_fit,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        let args = match entry.template().coerce_params(segments) {
            Ok(args) => args,
            Err(err) => {
                warn!(
                    method = %method,
                    path = %request.path(),
                    route_pattern = %entry.template(),
                    error = %err,
                    "Parameter coercion failed - treating route as unmatched"
                );
                no_match(request, response);
                return Outcome::NoMatchingRoute;
            }
        };

        let call = Call {
            response: &mut *response,
            request,
            args,
        };
        if let Err(err) = entry.invoke(call) {
            warn!(
                method = %method,
                path = %request.path(),
                route_pattern = %entry.template(),
                error = %err,
                "Handler rejected its arguments - treating route as unmatched"
            );
            no_match(request, response);
            return Outcome::NoMatchingRoute;
        }

        Outcome::Invoked {
            template: entry.template().to_string(),
            position: entry.position(),
            best_fit,
        }
    }

    /// Route `request` into a fresh [`Response`].
    #[must_use]
    pub fn dispatch(&self, request: &Request) -> Response {
        self.dispatch_with_outcome(request).0
    }

    /// Like [`Dispatcher::dispatch`], also reporting how the request ended.
    #[must_use]
    pub fn dispatch_with_outcome(&self, request: &Request) -> (Response, Outcome) {
        let mut response = Response::new();
        let outcome = self.handle(request, &mut response);
        (response, outcome)
    }
}

fn no_match(request: &Request, response: &mut Response) {
    response.message(
        NO_MATCH_STATUS,
        format!("No route matches {} {}.", request.method(), request.path()),
    );
}
