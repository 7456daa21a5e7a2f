use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::{fmt, iter, mem, slice};

/// A single parameter, borrowing its key from the route and its value from the path.
#[derive(PartialEq, Eq, Ord, PartialOrd, Default, Copy, Clone)]
struct Param<'k, 'v> {
    key: &'k str,
    value: &'v str,
}

impl Param<'_, '_> {
    const EMPTY: Param<'static, 'static> = Param { key: "", value: "" };
}

/// The parameters extracted from a matching path.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let route = route_template::Route::new("/users/{id}/posts/{post}")?;
/// let params = route.parse("/users/1/posts/hello").unwrap();
///
/// // Iterate through the keys and values.
/// for (key, value) in params.iter() {
///     println!("key: {}, value: {}", key, value);
/// }
///
/// // Get a specific value by name.
/// assert_eq!(params.get("id"), Some("1"));
/// assert_eq!(params.get("post"), Some("hello"));
/// # Ok(())
/// # }
/// ```
#[derive(PartialEq, Eq, Ord, PartialOrd, Clone)]
pub struct Params<'k, 'v> {
    kind: ParamsKind<'k, 'v>,
}

// Most templates have a handful of placeholders, so we can avoid
// heap allocations in the common case.
const SMALL: usize = 3;

#[derive(PartialEq, Eq, Ord, PartialOrd, Clone)]
enum ParamsKind<'k, 'v> {
    Small([Param<'k, 'v>; SMALL], usize),
    Large(Vec<Param<'k, 'v>>),
}

impl<'k, 'v> Params<'k, 'v> {
    pub(crate) fn new() -> Self {
        Self {
            kind: ParamsKind::Small([Param::EMPTY; SMALL], 0),
        }
    }

    fn as_slice(&self) -> &[Param<'k, 'v>] {
        match &self.kind {
            ParamsKind::Small(arr, len) => &arr[..*len],
            ParamsKind::Large(vec) => vec,
        }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value of the parameter with the given name.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&'v str> {
        let key = key.as_ref();
        self.as_slice()
            .iter()
            .find(|param| param.key == key)
            .map(|param| param.value)
    }

    /// Returns an iterator over the parameters, in the order their names
    /// first appear in the template.
    pub fn iter(&self) -> ParamsIter<'_, 'k, 'v> {
        ParamsIter {
            inner: self.as_slice().iter(),
        }
    }

    /// Copies the parameters into an owned map.
    pub fn to_owned_map(&self) -> HashMap<String, String> {
        self.iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect()
    }

    // Sets the value of a parameter, overwriting any earlier value under the same key.
    pub(crate) fn insert(&mut self, key: &'k str, value: &'v str) {
        #[cold]
        fn drain_to_vec<T: Default>(elem: T, arr: &mut [T; SMALL]) -> Vec<T> {
            let mut vec = Vec::with_capacity(SMALL + 1);
            vec.extend(arr.iter_mut().map(mem::take));
            vec.push(elem);
            vec
        }

        let param = Param { key, value };
        match &mut self.kind {
            ParamsKind::Small(arr, len) => {
                if let Some(existing) = arr[..*len].iter_mut().find(|p| p.key == key) {
                    existing.value = value;
                    return;
                }

                if *len == SMALL {
                    self.kind = ParamsKind::Large(drain_to_vec(param, arr));
                    return;
                }

                arr[*len] = param;
                *len += 1;
            }
            ParamsKind::Large(vec) => match vec.iter_mut().find(|p| p.key == key) {
                Some(existing) => existing.value = value,
                None => vec.push(param),
            },
        }
    }
}

impl fmt::Debug for Params<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'ps, 'k, 'v> IntoIterator for &'ps Params<'k, 'v> {
    type Item = (&'k str, &'v str);
    type IntoIter = ParamsIter<'ps, 'k, 'v>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the keys and values of a route's [parameters](crate::Params).
pub struct ParamsIter<'ps, 'k, 'v> {
    inner: slice::Iter<'ps, Param<'k, 'v>>,
}

impl<'k, 'v> Iterator for ParamsIter<'_, 'k, 'v> {
    type Item = (&'k str, &'v str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| (p.key, p.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ParamsIter<'_, '_, '_> {}

impl iter::FusedIterator for ParamsIter<'_, '_, '_> {}

/// A source of values for [`Route::compile_with`](crate::Route::compile_with).
///
/// Implemented for the standard maps, for slices of key-value pairs,
/// and for [`Params`] so that parsed parameters can be fed straight back in.
pub trait ParamSource {
    /// Returns the value registered under `name`, if any.
    fn get_param(&self, name: &str) -> Option<&str>;

    /// Returns `true` if the source holds no values at all.
    fn is_empty(&self) -> bool;
}

impl<T: ParamSource + ?Sized> ParamSource for &T {
    fn get_param(&self, name: &str) -> Option<&str> {
        (**self).get_param(name)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

impl<K, V, S> ParamSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }

    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }
}

impl<K, V> ParamSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}

// Pairs are scanned back to front so that a repeated key resolves to its last value.
impl<K, V> ParamSource for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn get_param(&self, name: &str) -> Option<&str> {
        self.iter()
            .rev()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| value.as_ref())
    }

    fn is_empty(&self) -> bool {
        <[(K, V)]>::is_empty(self)
    }
}

impl<K, V, const N: usize> ParamSource for [(K, V); N]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn get_param(&self, name: &str) -> Option<&str> {
        self.as_slice().get_param(name)
    }

    fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<K, V> ParamSource for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn get_param(&self, name: &str) -> Option<&str> {
        self.as_slice().get_param(name)
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl ParamSource for Params<'_, '_> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name)
    }

    fn is_empty(&self) -> bool {
        Params::is_empty(self)
    }
}
