//! Header override set and its merge over [`http::HeaderMap`].

use http::{HeaderMap, HeaderName, HeaderValue};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A set of header overrides applied on top of an underlying response.
///
/// Each name appears at most once and maps either to a single replacement
/// value or to an unset marker. A replacement discards every underlying
/// value for that name; an unset marker removes the name entirely; names
/// not mentioned pass through untouched. `HeaderName` keys make lookups
/// case-insensitive.
///
/// The set is a value type: `set`/`unset` consume and return `self`, so a
/// configuration is built as a chain and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct HeaderOverrides {
    entries: Vec<(HeaderName, Option<HeaderValue>)>,
}

impl HeaderOverrides {
    /// Empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `name` with the single `value` in the merged output.
    pub fn set(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.put(name, Some(value));
        self
    }

    /// Remove `name` from the merged output entirely.
    pub fn unset(mut self, name: HeaderName) -> Self {
        self.put(name, None);
        self
    }

    fn put(&mut self, name: HeaderName, value: Option<HeaderValue>) {
        // Last write wins per name.
        self.entries.retain(|(existing, _)| *existing != name);
        self.entries.push((name, value));
    }

    /// `true` when no override is configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, Option<&HeaderValue>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name, value.as_ref()))
    }

    /// Merge this set into `headers`.
    ///
    /// Unset names lose every underlying value; replaced names end up with
    /// exactly one. Unsetting a name that is absent is a no-op.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.entries {
            match value {
                Some(value) => {
                    headers.insert(name.clone(), value.clone());
                }
                None => {
                    headers.remove(name);
                }
            }
        }
    }
}

impl Serialize for HeaderOverrides {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            let value = value
                .as_ref()
                .map(|value| String::from_utf8_lossy(value.as_bytes()));
            map.serialize_entry(name.as_str(), &value)?;
        }
        map.end()
    }
}
