use crate::coerce::{Args, CoercerRegistry, CoercionError, Coercer};
use crate::router::RouteDeclarationError;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// The template that matches any path under its method, at the lowest priority.
pub const CATCH_ALL: &str = "*";

/// Score of the catch-all template.
pub const CATCH_ALL_SCORE: u32 = 1;

/// Score contributed by a literal segment that matches.
pub const LITERAL_WEIGHT: u32 = 3;

/// Score contributed by a placeholder whose value coerces.
pub const PLACEHOLDER_WEIGHT: u32 = 2;

// Base for structurally compatible templates, so they never tie with the catch-all.
const STRUCTURAL_BASE: u32 = 1;

/// One segment of a route template.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Matched verbatim.
    Literal(Arc<str>),
    /// Matched by coercing the request segment with the resolved coercer.
    Typed(Coercer),
}

impl Segment {
    fn accepts(&self, raw: &str) -> bool {
        match self {
            Segment::Literal(lit) => lit.as_ref() == raw,
            Segment::Typed(coercer) => coercer.accepts(raw),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(lit) => f.write_str(lit),
            Segment::Typed(coercer) => write!(f, "{{{}}}", coercer.name()),
        }
    }
}

/// A parsed route declaration.
///
/// Placeholder type names are resolved to coercers when the template is parsed,
/// so matching never consults the registry.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: Arc<str>,
    segments: SmallVec<[Segment; 8]>,
    catch_all: bool,
}

impl PathTemplate {
    /// Parse `/lit/{Type}/...` (or `*`, also written `/*`) against `registry`.
    ///
    /// # Errors
    ///
    /// [`RouteDeclarationError::EmptyPlaceholder`] for `{}` and
    /// [`RouteDeclarationError::UnknownType`] when a placeholder names a type the
    /// registry does not know.
    pub fn parse(raw: &str, registry: &CoercerRegistry) -> Result<Self, RouteDeclarationError> {
        let trimmed = raw.trim();
        if trimmed.trim_matches('/') == CATCH_ALL {
            return Ok(Self {
                raw: Arc::from(trimmed),
                segments: SmallVec::new(),
                catch_all: true,
            });
        }

        let mut segments = SmallVec::new();
        for part in trimmed.split('/').filter(|part| !part.is_empty()) {
            let segment = match part
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
            {
                Some(type_name) => {
                    let type_name = type_name.trim();
                    if type_name.is_empty() {
                        return Err(RouteDeclarationError::EmptyPlaceholder {
                            template: raw.to_string(),
                        });
                    }
                    let coercer = registry.get(type_name).ok_or_else(|| {
                        RouteDeclarationError::UnknownType {
                            template: raw.to_string(),
                            type_name: type_name.to_string(),
                        }
                    })?;
                    Segment::Typed(coercer.clone())
                }
                None => Segment::Literal(Arc::from(part)),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: Arc::from(trimmed),
            segments,
            catch_all: false,
        })
    }

    /// The declaration this template was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.catch_all
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Declared placeholder type names, in order.
    pub fn placeholder_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Typed(coercer) => Some(coercer.name()),
            Segment::Literal(_) => None,
        })
    }

    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.placeholder_types().count()
    }

    /// Same segment count, every literal equal, every placeholder coercible.
    ///
    /// The catch-all never matches perfectly; it is only reachable through
    /// [`PathTemplate::how_correct`].
    #[must_use]
    pub fn matches_perfectly<S: AsRef<str>>(&self, request: &[S]) -> bool {
        !self.catch_all
            && self.segments.len() == request.len()
            && self
                .segments
                .iter()
                .zip(request)
                .all(|(segment, raw)| segment.accepts(raw.as_ref()))
    }

    /// Best-fit score; `0` means incompatible.
    #[must_use]
    pub fn how_correct<S: AsRef<str>>(&self, request: &[S]) -> u32 {
        if self.catch_all {
            return CATCH_ALL_SCORE;
        }
        if self.segments.len() != request.len() {
            return 0;
        }

        let mut score = STRUCTURAL_BASE;
        for (segment, raw) in self.segments.iter().zip(request) {
            let raw = raw.as_ref();
            match segment {
                Segment::Literal(lit) if lit.as_ref() == raw => score += LITERAL_WEIGHT,
                Segment::Literal(_) => return 0,
                Segment::Typed(coercer) if coercer.accepts(raw) => score += PLACEHOLDER_WEIGHT,
                Segment::Typed(_) => {}
            }
        }
        score
    }

    /// Coerce the request segments aligned with placeholders.
    ///
    /// The catch-all yields no arguments.
    pub fn coerce_params<S: AsRef<str>>(&self, request: &[S]) -> Result<Args, CoercionError> {
        let mut args = Args::new();
        if self.catch_all {
            return Ok(args);
        }
        if self.segments.len() != request.len() {
            return Err(CoercionError::Arity {
                expected: self.segments.len(),
                found: request.len(),
            });
        }
        for (segment, raw) in self.segments.iter().zip(request) {
            let raw = raw.as_ref();
            match segment {
                Segment::Literal(lit) if lit.as_ref() == raw => {}
                Segment::Literal(lit) => {
                    return Err(CoercionError::LiteralMismatch {
                        expected: lit.to_string(),
                        found: raw.to_string(),
                    })
                }
                Segment::Typed(coercer) => args.push(coercer.coerce(raw)?),
            }
        }
        Ok(args)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
