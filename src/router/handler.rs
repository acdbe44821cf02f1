use crate::coerce::{Args, CoercionError, FromParam};
use crate::server::{Context, Request, Response};
use std::sync::Arc;

/// Everything a handler is invoked with.
///
/// The response sink comes first, the request second; the context map is
/// reachable through the request.
pub struct Call<'a> {
    pub response: &'a mut Response,
    pub request: &'a Request,
    /// Coerced placeholder values, in template order.
    pub args: Args,
}

impl Call<'_> {
    /// Extra context carried by the request.
    #[must_use]
    pub fn context(&self) -> &Context {
        self.request.context()
    }

    /// Extract argument `index` as `T`.
    pub fn arg<T: FromParam>(&self, index: usize) -> Result<T, CoercionError> {
        let value = self.args.get(index).cloned().ok_or(CoercionError::Arity {
            expected: index + 1,
            found: self.args.len(),
        })?;
        T::from_value(value)
    }
}

/// A resolved route handler.
///
/// An `Err` means the arguments did not fit what the handler expects; the
/// dispatcher treats it as the route not matching.
pub type RouteHandler = Arc<dyn Fn(Call<'_>) -> Result<(), CoercionError> + Send + Sync>;
