use std::fmt;

/// Represents errors that can occur when compiling a route into a path.
///
/// ```
/// use route_template::{CompileError, Route};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let route = Route::new("/users/{id}")?;
///
/// assert_eq!(
///     route.compile(),
///     Err(CompileError::MissingParams { route: "/users/{id}".into() })
/// );
/// # Ok(())
/// # }
/// ```
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CompileError {
    /// Parameters were supplied to a route without placeholders.
    UnexpectedParams {
        /// The format of the route being compiled.
        route: String,
    },
    /// No parameters were supplied to a route with placeholders.
    MissingParams {
        /// The format of the route being compiled.
        route: String,
    },
    /// A placeholder had no value, or an empty one.
    MissingParam {
        /// The name of the placeholder.
        name: String,
        /// The format of the route being compiled.
        route: String,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedParams { route } => {
                write!(f, "route '{}' does not accept parameters", route)
            }
            Self::MissingParams { route } => {
                write!(f, "route '{}' requires parameters", route)
            }
            Self::MissingParam { name, route } => write!(
                f,
                "missing value for parameter '{}' of route '{}'",
                name, route
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// A template that could not be turned into a matcher.
///
/// This only happens for templates large enough to exceed the
/// size limits of the underlying regex engine.
#[derive(Clone, Debug)]
pub struct BuildError {
    pub(crate) route: String,
    pub(crate) source: regex::Error,
}

impl BuildError {
    /// The template that failed to build.
    pub fn route(&self) -> &str {
        &self.route
    }
}

impl PartialEq for BuildError {
    fn eq(&self, other: &Self) -> bool {
        self.route == other.route
    }
}

impl Eq for BuildError {}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to build matcher for route '{}'", self.route)
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
