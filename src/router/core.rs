use super::error::RouteDeclarationError;
use super::handler::{Call, RouteHandler};
use crate::coerce::{CoercerRegistry, CoercionError, FromParams};
use crate::server::{Context, Request, Response};
use crate::template::PathTemplate;
use http::Method;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// One registered route: method, template, declared parameter types and handler.
///
/// Immutable once built. The handler is resolved at registration and called
/// as-is for every request.
#[derive(Clone)]
pub struct RouteEntry {
    method: Method,
    template: PathTemplate,
    param_types: Vec<Arc<str>>,
    handler: RouteHandler,
    position: usize,
}

impl RouteEntry {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Declared parameter types, matching the template's placeholders in order.
    pub fn param_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.param_types.iter().map(|t| t.as_ref())
    }

    /// Registration order across the whole table, starting at 0.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Call the handler.
    pub fn invoke(&self, call: Call<'_>) -> Result<(), CoercionError> {
        (self.handler)(call)
    }

    #[must_use]
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            method: self.method.to_string(),
            template: self.template.to_string(),
            params: self.param_types.iter().map(|t| t.to_string()).collect(),
            position: self.position,
        }
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("template", &self.template.as_str())
            .field("param_types", &self.param_types)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// Serializable description of a route, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub method: String,
    pub template: String,
    pub params: Vec<String>,
    pub position: usize,
}

/// The routing decision for one request.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// Nothing at all is registered for the request's method.
    NoRoutesForMethod,
    /// Routes exist for the method but none scored above zero.
    NoMatch,
    /// The first route that matched perfectly.
    Perfect(&'a RouteEntry),
    /// The earliest route with the highest best-fit score.
    BestFit { entry: &'a RouteEntry, score: u32 },
}

impl<'a> Resolution<'a> {
    /// The selected route, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&'a RouteEntry> {
        match *self {
            Resolution::Perfect(entry) | Resolution::BestFit { entry, .. } => Some(entry),
            Resolution::NoRoutesForMethod | Resolution::NoMatch => None,
        }
    }
}

/// Immutable mapping from HTTP method to its routes in registration order.
///
/// Built once with [`RouteTableBuilder`] and shared read-only afterwards.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: HashMap<Method, Vec<RouteEntry>>,
    len: usize,
}

impl RouteTable {
    #[must_use]
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Routes registered for `method`, in registration order.
    #[must_use]
    pub fn routes_for(&self, method: &Method) -> &[RouteEntry] {
        self.routes.get(method).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn has_method(&self, method: &Method) -> bool {
        self.routes.contains_key(method)
    }

    /// Methods with at least one route, sorted by name.
    #[must_use]
    pub fn methods(&self) -> Vec<&Method> {
        let mut methods: Vec<&Method> = self.routes.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every route, in registration order.
    #[must_use]
    pub fn summaries(&self) -> Vec<RouteSummary> {
        let mut summaries: Vec<RouteSummary> = self
            .routes
            .values()
            .flatten()
            .map(RouteEntry::summary)
            .collect();
        summaries.sort_by_key(|s| s.position);
        summaries
    }

    /// Pick the route for `method` and `segments`.
    ///
    /// Walks the method's routes in registration order. The first perfect match
    /// wins immediately; otherwise the first route with the strictly highest
    /// best-fit score is selected. Pure: the same input always yields the same
    /// decision.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, method: &Method, segments: &[S]) -> Resolution<'_> {
        let Some(entries) = self.routes.get(method) else {
            return Resolution::NoRoutesForMethod;
        };

        let mut best: Option<(&RouteEntry, u32)> = None;
        for entry in entries {
            if entry.template.matches_perfectly(segments) {
                return Resolution::Perfect(entry);
            }
            let score = entry.template.how_correct(segments);
            if score > best.map_or(0, |(_, top)| top) {
                best = Some((entry, score));
            }
        }

        match best {
            Some((entry, score)) => Resolution::BestFit { entry, score },
            None => Resolution::NoMatch,
        }
    }
}

/// Append-only registration of routes, finished with [`RouteTableBuilder::build`].
///
/// ```rust
/// use fitroute::router::RouteTableBuilder;
/// use fitroute::server::Response;
///
/// # fn main() -> Result<(), fitroute::router::RouteDeclarationError> {
/// let mut builder = RouteTableBuilder::new();
/// builder
///     .get("*", |res: &mut Response, (): ()| res.message(418, "Not an operation"))?
///     .get("/add/{Integer}/{Integer}", |res: &mut Response, (a, b): (i32, i32)| {
///         res.message(200, format!("{a} + {b} = {}", a + b))
///     })?;
/// let table = builder.build();
/// assert_eq!(table.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RouteTableBuilder {
    registry: CoercerRegistry,
    routes: HashMap<Method, Vec<RouteEntry>>,
    len: usize,
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTableBuilder {
    /// A builder using the built-in coercers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(CoercerRegistry::default())
    }

    /// A builder resolving placeholder types against `registry`.
    #[must_use]
    pub fn with_registry(registry: CoercerRegistry) -> Self {
        Self {
            registry,
            routes: HashMap::new(),
            len: 0,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &CoercerRegistry {
        &self.registry
    }

    /// Extend the registry. Only routes added afterwards see new types.
    pub fn registry_mut(&mut self) -> &mut CoercerRegistry {
        &mut self.registry
    }

    /// Register a handler with an explicit list of parameter types.
    ///
    /// # Errors
    ///
    /// Fails when the method is not a valid token, a placeholder names an
    /// unknown type, or `param_types` disagrees with the template's
    /// placeholders in count or in type.
    pub fn add_route(
        &mut self,
        method: &str,
        template: &str,
        param_types: &[&str],
        handler: RouteHandler,
    ) -> Result<&mut Self, RouteDeclarationError> {
        let method = normalize_method(method)?;
        let template = PathTemplate::parse(template, &self.registry)?;

        if template.placeholder_count() != param_types.len() {
            return Err(RouteDeclarationError::ArityMismatch {
                template: template.to_string(),
                placeholders: template.placeholder_count(),
                declared: param_types.len(),
            });
        }
        let placeholders: Vec<Arc<str>> = template
            .placeholder_types()
            .map(Arc::<str>::from)
            .collect();
        for (position, (placeholder, declared)) in placeholders.iter().zip(param_types).enumerate() {
            if !self.registry.contains(declared) {
                return Err(RouteDeclarationError::UnknownType {
                    template: template.to_string(),
                    type_name: declared.to_string(),
                });
            }
            if placeholder.as_ref() != *declared {
                return Err(RouteDeclarationError::TypeMismatch {
                    template: template.to_string(),
                    position,
                    placeholder: placeholder.to_string(),
                    declared: declared.to_string(),
                });
            }
        }

        let entries = self.routes.entry(method.clone()).or_default();
        if entries
            .iter()
            .any(|existing| existing.template.as_str() == template.as_str())
        {
            debug!(
                method = %method,
                template = %template,
                "Duplicate route registered - earlier registration wins ties"
            );
        }

        let position = self.len;
        info!(
            method = %method,
            template = %template,
            params = ?placeholders,
            position = position,
            "Route registered"
        );

        entries.push(RouteEntry {
            method,
            template,
            param_types: placeholders,
            handler,
            position,
        });
        self.len += 1;
        Ok(self)
    }

    /// Register a typed handler: `Fn(&mut Response, P)`.
    pub fn route<P, F>(
        &mut self,
        method: &str,
        template: &str,
        handler: F,
    ) -> Result<&mut Self, RouteDeclarationError>
    where
        P: FromParams + 'static,
        F: Fn(&mut Response, P) + Send + Sync + 'static,
    {
        let types = P::type_names();
        let handler: RouteHandler = Arc::new(move |call: Call<'_>| {
            let Call { response, args, .. } = call;
            handler(response, P::from_args(args)?);
            Ok(())
        });
        self.add_route(method, template, &types, handler)
    }

    /// Register a typed handler that also reads the request.
    pub fn route_with_request<P, F>(
        &mut self,
        method: &str,
        template: &str,
        handler: F,
    ) -> Result<&mut Self, RouteDeclarationError>
    where
        P: FromParams + 'static,
        F: Fn(&mut Response, &Request, P) + Send + Sync + 'static,
    {
        let types = P::type_names();
        let handler: RouteHandler = Arc::new(move |call: Call<'_>| {
            let Call {
                response,
                request,
                args,
            } = call;
            handler(response, request, P::from_args(args)?);
            Ok(())
        });
        self.add_route(method, template, &types, handler)
    }

    /// Register a typed handler that reads the request and its context map.
    pub fn route_with_context<P, F>(
        &mut self,
        method: &str,
        template: &str,
        handler: F,
    ) -> Result<&mut Self, RouteDeclarationError>
    where
        P: FromParams + 'static,
        F: Fn(&mut Response, &Request, &Context, P) + Send + Sync + 'static,
    {
        let types = P::type_names();
        let handler: RouteHandler = Arc::new(move |call: Call<'_>| {
            let Call {
                response,
                request,
                args,
            } = call;
            handler(response, request, request.context(), P::from_args(args)?);
            Ok(())
        });
        self.add_route(method, template, &types, handler)
    }

    pub fn get<P, F>(&mut self, template: &str, handler: F) -> Result<&mut Self, RouteDeclarationError>
    where
        P: FromParams + 'static,
        F: Fn(&mut Response, P) + Send + Sync + 'static,
    {
        self.route(Method::GET.as_str(), template, handler)
    }

    pub fn post<P, F>(&mut self, template: &str, handler: F) -> Result<&mut Self, RouteDeclarationError>
    where
        P: FromParams + 'static,
        F: Fn(&mut Response, P) + Send + Sync + 'static,
    {
        self.route(Method::POST.as_str(), template, handler)
    }

    pub fn put<P, F>(&mut self, template: &str, handler: F) -> Result<&mut Self, RouteDeclarationError>
    where
        P: FromParams + 'static,
        F: Fn(&mut Response, P) + Send + Sync + 'static,
    {
        self.route(Method::PUT.as_str(), template, handler)
    }

    pub fn delete<P, F>(
        &mut self,
        template: &str,
        handler: F,
    ) -> Result<&mut Self, RouteDeclarationError>
    where
        P: FromParams + 'static,
        F: Fn(&mut Response, P) + Send + Sync + 'static,
    {
        self.route(Method::DELETE.as_str(), template, handler)
    }

    /// Freeze the routes into an immutable table.
    #[must_use]
    pub fn build(self) -> RouteTable {
        let mut methods: Vec<&str> = self.routes.keys().map(Method::as_str).collect();
        methods.sort_unstable();
        info!(
            routes_count = self.len,
            methods = ?methods,
            "Routing table loaded"
        );
        RouteTable {
            routes: self.routes,
            len: self.len,
        }
    }
}

fn normalize_method(method: &str) -> Result<Method, RouteDeclarationError> {
    let upper = method.trim().to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes()).map_err(|_| RouteDeclarationError::InvalidMethod {
        method: method.to_string(),
    })
}
