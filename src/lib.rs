//! A compiler for path templates.
//!
//! A [`Route`] is built once from a template such as `/users/{id}` and can
//! then test paths against it, extract the placeholder values from a
//! matching path, and build paths by substituting values back in.
//!
//! ```rust
//! use route_template::Route;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let route = Route::new("/foo/{bar}/{baz}")?;
//!
//! assert!(route.is_match("/foo/abc/def"));
//! assert!(!route.is_match("/foo/abc"));
//!
//! let params = route.parse("/foo/abc/def").unwrap();
//! assert_eq!(params.get("bar"), Some("abc"));
//! assert_eq!(params.get("baz"), Some("def"));
//!
//! assert_eq!(route.compile_with(&params)?, "/foo/abc/def");
//! # Ok(())
//! # }
//! ```
//!
//! # Templates
//!
//! A placeholder is written as `{name}` and matches one or more characters
//! other than `/`. Everything else is literal text and must appear verbatim,
//! including characters such as `.` or `+`. Braces that do not form a
//! placeholder (`{}`, an unclosed `{`, a stray `}`) are literal as well.
//!
//! ```rust
//! use route_template::Route;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let route = Route::new("/files/{name}.json")?;
//! assert!(route.is_match("/files/report.json"));
//! assert!(!route.is_match("/files/report-json"));
//! # Ok(())
//! # }
//! ```
//!
//! # Building paths
//!
//! Routes without placeholders are compiled with [`Route::compile`], routes
//! with placeholders with [`Route::compile_with`], which accepts any
//! [`ParamSource`]: the standard maps, slices of pairs, or parsed [`Params`].
//! An empty source counts as no parameters, and an empty value counts as a
//! missing one.
#![deny(rust_2018_idioms, clippy::all)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod error;
mod params;
mod route;

pub use error::{BuildError, CompileError};
pub use params::{ParamSource, Params, ParamsIter};
pub use route::Route;
