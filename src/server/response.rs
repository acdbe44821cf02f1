use http::StatusCode;
use serde::Serialize;

/// The sink a handler writes its answer into.
///
/// Defaults to `200` with an empty body. Writes are not guarded: the last
/// status and the last body written win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    status: u16,
    body: String,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: 200,
            body: String::new(),
        }
    }
}

impl Response {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Set status and body in one call.
    pub fn message(&mut self, status: u16, body: impl Into<String>) {
        self.set_status(status);
        self.set_body(body);
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// `200 OK`, `418 I'm a teapot`, or just the number for unknown codes.
    #[must_use]
    pub fn status_line(&self) -> String {
        match StatusCode::from_u16(self.status)
            .ok()
            .and_then(|code| code.canonical_reason())
        {
            Some(reason) => format!("{} {reason}", self.status),
            None => self.status.to_string(),
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (u16, String) {
        (self.status, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_ok_and_empty() {
        let res = Response::new();
        assert_eq!(res.status(), 200);
        assert_eq!(res.body(), "");
    }

    #[test]
    fn test_last_write_wins() {
        let mut res = Response::new();
        res.message(404, "first");
        res.message(418, "second");
        assert_eq!(res.into_parts(), (418, "second".to_string()));
    }

    #[test]
    fn test_status_line() {
        let mut res = Response::new();
        res.set_status(501);
        assert_eq!(res.status_line(), "501 Not Implemented");
        res.set_status(799);
        assert_eq!(res.status_line(), "799");
    }
}
