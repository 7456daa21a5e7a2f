use crate::error::{BuildError, CompileError};
use crate::params::{ParamSource, Params};

use regex::Regex;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A piece of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    /// Text that must appear verbatim.
    Static(String),
    /// A placeholder, as an index into `Route::params`.
    Param(usize),
}

/// A compiled path template.
///
/// Templates are made of literal text and `{name}` placeholders. Each
/// placeholder matches one or more characters up to the next `/`.
///
/// ```rust
/// use route_template::Route;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let route = Route::new("/users/{id}/posts/{post}")?;
///
/// assert!(route.is_match("/users/1/posts/hello"));
/// assert!(!route.is_match("/users/1/posts"));
///
/// let params = route.parse("/users/1/posts/hello").unwrap();
/// assert_eq!(params.get("id"), Some("1"));
///
/// let path = route.compile_with(&[("id", "2"), ("post", "bye")])?;
/// assert_eq!(path, "/users/2/posts/bye");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Route {
    format: String,
    params: Vec<String>,
    segments: Vec<Segment>,
    matcher: Regex,
}

impl Route {
    /// Compiles a template.
    ///
    /// Anything that is not a well-formed `{name}` placeholder, such as an
    /// unclosed `{` or an empty `{}`, is treated as literal text.
    pub fn new(format: impl Into<String>) -> Result<Self, BuildError> {
        let format = format.into();
        let (params, segments) = tokenize(&format);

        let mut pattern = String::with_capacity(format.len() + 2);
        pattern.push('^');
        for segment in &segments {
            match segment {
                Segment::Static(text) => pattern.push_str(&regex::escape(text)),
                Segment::Param(_) => pattern.push_str("([^/]+)"),
            }
        }
        pattern.push('$');

        let matcher = match Regex::new(&pattern) {
            Ok(matcher) => matcher,
            Err(source) => {
                debug!("failed to build matcher for route '{}': {}", format, source);
                return Err(BuildError {
                    route: format,
                    source,
                });
            }
        };

        debug_assert_eq!(matcher.captures_len(), params.len() + 1);
        trace!("compiled route '{}' into pattern '{}'", format, pattern);

        Ok(Route {
            format,
            params,
            segments,
            matcher,
        })
    }

    /// Returns the template this route was built from.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the placeholder names, in the order they appear in the template.
    ///
    /// Repeated names are yielded once per occurrence.
    pub fn param_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.params.iter().map(String::as_str)
    }

    /// Returns `true` if the template contains no placeholders.
    pub fn is_static(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns `true` if the whole of `path` conforms to the template.
    pub fn is_match(&self, path: &str) -> bool {
        if self.is_static() {
            return path == self.format;
        }

        self.matcher.is_match(path)
    }

    /// Extracts the placeholder values from `path`.
    ///
    /// Returns `None` if the path does not match. A matching path for a
    /// static route yields empty parameters. If a name appears more than
    /// once in the template, the value captured by its last occurrence wins.
    pub fn parse<'p>(&self, path: &'p str) -> Option<Params<'_, 'p>> {
        let mut params = Params::new();

        if self.is_static() {
            return (path == self.format).then_some(params);
        }

        let captures = self.matcher.captures(path)?;
        for (i, name) in self.params.iter().enumerate() {
            // every group is non-optional, so a successful match fills all of them
            if let Some(value) = captures.get(i + 1) {
                params.insert(name, value.as_str());
            }
        }

        Some(params)
    }

    /// Builds a path from a route without placeholders.
    ///
    /// Fails with [`CompileError::MissingParams`] if the template has placeholders.
    pub fn compile(&self) -> Result<String, CompileError> {
        if !self.is_static() {
            debug!("route '{}' compiled without parameters", self.format);
            return Err(CompileError::MissingParams {
                route: self.format.clone(),
            });
        }

        Ok(self.format.clone())
    }

    /// Builds a path by substituting values into the template's placeholders.
    ///
    /// An empty source is treated as if no parameters were given at all, and
    /// an empty value is treated as missing.
    ///
    /// ```rust
    /// use route_template::{CompileError, Route};
    /// use std::collections::HashMap;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let route = Route::new("/foo/{bar}/{baz}")?;
    ///
    /// let mut params = HashMap::new();
    /// params.insert("bar", "abc");
    /// assert_eq!(
    ///     route.compile_with(&params),
    ///     Err(CompileError::MissingParam {
    ///         name: "baz".into(),
    ///         route: "/foo/{bar}/{baz}".into()
    ///     })
    /// );
    ///
    /// params.insert("baz", "def");
    /// assert_eq!(route.compile_with(&params)?, "/foo/abc/def");
    /// # Ok(())
    /// # }
    /// ```
    pub fn compile_with<P>(&self, params: &P) -> Result<String, CompileError>
    where
        P: ParamSource + ?Sized,
    {
        if params.is_empty() {
            return self.compile();
        }

        if self.is_static() {
            debug!("static route '{}' compiled with parameters", self.format);
            return Err(CompileError::UnexpectedParams {
                route: self.format.clone(),
            });
        }

        let mut path = String::with_capacity(self.format.len());
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(i) => {
                    let name = &self.params[*i];
                    match params.get_param(name) {
                        Some(value) if !value.is_empty() => path.push_str(value),
                        _ => {
                            debug!("route '{}' is missing parameter '{}'", self.format, name);
                            return Err(CompileError::MissingParam {
                                name: name.clone(),
                                route: self.format.clone(),
                            });
                        }
                    }
                }
            }
        }

        Ok(path)
    }

    /// Returns the regular expression the route matches paths with.
    #[cfg(feature = "__test_helpers")]
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }
}

// Splits a template into literal text and placeholders.
//
// A placeholder is a `{`, one or more characters other than `{` and `}`,
// then a `}`. When a `{` is followed by another `{` before any `}`, the
// first one is literal and scanning resumes at the second.
fn tokenize(format: &str) -> (Vec<String>, Vec<Segment>) {
    let mut params = Vec::new();
    let mut segments = Vec::new();

    let bytes = format.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }

        let close = bytes[i + 1..]
            .iter()
            .position(|&c| c == b'{' || c == b'}')
            .map(|offset| i + 1 + offset);

        match close {
            Some(end) if bytes[end] == b'}' && end > i + 1 => {
                if literal_start < i {
                    segments.push(Segment::Static(format[literal_start..i].to_owned()));
                }

                segments.push(Segment::Param(params.len()));
                params.push(format[i + 1..end].to_owned());

                i = end + 1;
                literal_start = i;
            }
            // `{{`, `{}` or an unclosed `{`
            Some(end) if bytes[end] == b'{' => i = end,
            _ => i += 1,
        }
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Static(format[literal_start..].to_owned()));
    }

    (params, segments)
}

impl FromStr for Route {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::new(s)
    }
}

impl TryFrom<&str> for Route {
    type Error = BuildError;

    fn try_from(format: &str) -> Result<Self, Self::Error> {
        Route::new(format)
    }
}

impl TryFrom<String> for Route {
    type Error = BuildError;

    fn try_from(format: String) -> Result<Self, Self::Error> {
        Route::new(format)
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.format.hash(state);
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("format", &self.format)
            .field("params", &self.params)
            .finish()
    }
}
