//! Ordered key value bag shared by querystrings, extracted parameters and page state.

use core::fmt;

use alloc::{string::String, vec};

use super::{SmallStr, Vec};

/// A single key value pair.
#[derive(PartialEq, Eq, Clone, Hash)]
struct Param {
    key: SmallStr,
    value: String,
}

impl Param {
    fn key_str(&self) -> &str {
        self.key.as_ref()
    }

    fn value_str(&self) -> &str {
        self.value.as_str()
    }
}

/// Key value pairs kept in insertion order.
///
/// Keys are unique. Re-inserting an existing key replaces its value in place so the
/// original position is preserved.
#[derive(Default, PartialEq, Eq, Clone)]
pub struct Params {
    inner: Vec<Param>,
}

impl Params {
    pub const fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no parameters in the list.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the value registered under the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.inner.iter().find(|p| p.key_str() == key).map(Param::value_str)
    }

    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a key value pair, returning the previous value of the key if any.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        let key = key.as_ref();
        let value = value.into();
        match self.inner.iter_mut().find(|p| p.key_str() == key) {
            Some(param) => Some(core::mem::replace(&mut param.value, value)),
            None => {
                self.inner.push(Param {
                    key: SmallStr::from(key),
                    value,
                });
                None
            }
        }
    }

    /// Inserts a key value pair only when the key is not present yet.
    ///
    /// Returns `true` when the pair was inserted.
    pub fn insert_absent(&mut self, key: impl AsRef<str>, value: impl Into<String>) -> bool {
        let key = key.as_ref();
        if self.contains_key(key) {
            return false;
        }
        self.inner.push(Param {
            key: SmallStr::from(key),
            value: value.into(),
        });
        true
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<String> {
        let key = key.as_ref();
        let idx = self.inner.iter().position(|p| p.key_str() == key)?;
        Some(self.inner.remove(idx).value)
    }

    /// Returns an iterator over the parameters in insertion order.
    pub fn iter(&self) -> ParamsIter<'_> {
        ParamsIter {
            inner: self.inner.iter(),
        }
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for Params
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

pub struct ParamsIter<'p> {
    inner: core::slice::Iter<'p, Param>,
}

impl<'p> Iterator for ParamsIter<'p> {
    type Item = (&'p str, &'p str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| (p.key_str(), p.value_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'p> IntoIterator for &'p Params {
    type Item = (&'p str, &'p str);
    type IntoIter = ParamsIter<'p>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = ParamsIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        ParamsIntoIter {
            inner: self.inner.into_iter(),
        }
    }
}

pub struct ParamsIntoIter {
    inner: vec::IntoIter<Param>,
}

impl Iterator for ParamsIntoIter {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| (String::from(p.key_str()), p.value))
    }
}
