//! Attribute normalization
//!
//! SVG attributes such as `stroke-width` cannot be spelled as Rust
//! identifiers, so callers write `stroke_width` and every underscore is
//! replaced with a hyphen. Values are stringified with their default
//! `ToString` form (`3` becomes `"3"`, `3.5` becomes `"3.5"`). No attribute
//! name or value is validated against the SVG spec; this is a pass-through
//! layer by design.

/// An ordered set of XML attributes with normalized (hyphenated) keys.
///
/// Insertion order is preserved; setting an existing key replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    entries: Vec<(String, String)>,
}

impl Attrs {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable form of [`Attrs::insert`].
    ///
    /// ```
    /// use svg_scribe::Attrs;
    ///
    /// let attrs = Attrs::new().set("stroke_width", 2).set("fill", "none");
    /// assert_eq!(attrs.get("stroke-width"), Some("2"));
    /// ```
    pub fn set(mut self, key: &str, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an attribute, replacing any previous value for the same
    /// normalized key.
    pub fn insert(&mut self, key: &str, value: impl ToString) {
        self.insert_pair(normalize_key(key), value.to_string());
    }

    fn insert_pair(&mut self, key: String, value: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a value by its normalized (hyphenated) key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (key, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append `defaults`, keeping any value already present for the same key.
    ///
    /// The builder applies caller extras this way on top of geometry
    /// attributes, so explicit geometry parameters always win a collision.
    pub fn with_defaults(mut self, defaults: Attrs) -> Self {
        for (key, value) in defaults.entries {
            if self.get(&key).is_none() {
                self.entries.push((key, value));
            }
        }
        self
    }

    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        self.entries
    }
}

impl<K: AsRef<str>, V: ToString> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attrs::new();
        for (key, value) in iter {
            attrs.insert(key.as_ref(), value);
        }
        attrs
    }
}

/// Replace every underscore in an identifier-like key with a hyphen.
fn normalize_key(key: &str) -> String {
    key.replace('_', "-")
}
