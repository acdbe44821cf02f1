use http::method::InvalidMethod;
use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Extra string-to-string data attached to a request (query pairs and the like).
pub type Context = HashMap<String, String>;

/// Path segments, stack-allocated for the common case.
pub type SegmentVec = SmallVec<[String; 8]>;

/// An incoming request as seen by the router.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    segments: SegmentVec,
    context: Context,
}

impl Request {
    /// Build a request from a method and a request target (`/path?query`).
    ///
    /// The path is split on `/`, empty segments are dropped and every segment
    /// is percent-decoded. Query pairs land in the context map. Extension
    /// methods spelled in lowercase (`get`) are folded to uppercase.
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        let target = target.split('#').next().unwrap_or_default();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        Self {
            method: uppercase_method(method),
            segments: split_path(path),
            context: query.map(parse_query_params).unwrap_or_default(),
        }
    }

    /// Like [`Request::new`] but takes the method as text, normalised to uppercase.
    pub fn parse(method: &str, target: &str) -> Result<Self, InvalidMethod> {
        let method = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())?;
        Ok(Self::new(method, target))
    }

    /// Build a request from segments that were split elsewhere.
    pub fn from_segments<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: uppercase_method(method),
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty())
                .collect(),
            context: Context::new(),
        }
    }

    /// Attach an extra context entry. Later entries overwrite earlier ones.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path split into non-empty segments.
    #[must_use]
    pub fn split_path(&self) -> &[String] {
        &self.segments
    }

    /// The path re-joined as `/a/b/c` (`/` for the root).
    #[must_use]
    pub fn path(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .fold(String::new(), |mut path, segment| {
                path.push('/');
                path.push_str(segment);
                path
            })
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Look up one context entry.
    #[must_use]
    pub fn get_context(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

fn uppercase_method(method: Method) -> Method {
    if !method.as_str().bytes().any(|b| b.is_ascii_lowercase()) {
        return method;
    }
    let upper = method.as_str().to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes()).unwrap_or(method)
}

/// Split a path into percent-decoded, non-empty segments.
///
/// Segments that do not decode to valid UTF-8 are kept verbatim.
#[must_use]
pub fn split_path(path: &str) -> SegmentVec {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match urlencoding::decode(segment) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => segment.to_string(),
        })
        .collect()
}

/// Parse an `application/x-www-form-urlencoded` query string.
///
/// Uses "last write wins" semantics for repeated keys.
#[must_use]
pub fn parse_query_params(query: &str) -> Context {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_drops_empty_segments() {
        let req = Request::new(Method::GET, "//add/3//4/");
        assert_eq!(req.split_path(), ["add", "3", "4"]);
        assert_eq!(req.path(), "/add/3/4");
    }

    #[test]
    fn test_root_has_no_segments() {
        let req = Request::new(Method::GET, "/");
        assert!(req.split_path().is_empty());
        assert_eq!(req.path(), "/");
    }

    #[test]
    fn test_query_lands_in_context() {
        let req = Request::new(Method::GET, "/greet/bob?lang=fr&x=1&x=2#top");
        assert_eq!(req.split_path(), ["greet", "bob"]);
        assert_eq!(req.get_context("lang"), Some("fr"));
        assert_eq!(req.get_context("x"), Some("2"));
    }

    #[test]
    fn test_segments_are_percent_decoded() {
        let req = Request::new(Method::GET, "/hello/John%20Doe");
        assert_eq!(req.split_path(), ["hello", "John Doe"]);
    }

    #[test]
    fn test_parse_normalises_method() {
        let req = Request::parse("get", "/").unwrap();
        assert_eq!(req.method(), &Method::GET);
        assert!(Request::parse("BAD METHOD", "/").is_err());
    }

    #[test]
    fn test_lowercase_extension_method_is_uppercased() {
        let lower = Method::from_bytes(b"get").unwrap();
        assert_eq!(Request::new(lower.clone(), "/a").method(), &Method::GET);
        assert_eq!(
            Request::from_segments(lower, ["a"]).method(),
            &Method::GET
        );
        let custom = Method::from_bytes(b"purge").unwrap();
        assert_eq!(Request::new(custom, "/").method().as_str(), "PURGE");
    }

    #[test]
    fn test_from_segments_and_context() {
        let req = Request::from_segments(Method::POST, ["a", "", "b"]).with_context("user", "ann");
        assert_eq!(req.split_path(), ["a", "b"]);
        assert_eq!(req.get_context("user"), Some("ann"));
    }
}
