//! Inline style declarations.
//!
//! Declarations keep their insertion order so that serializing back to
//! `cssText` is deterministic. Setting an existing property replaces its value
//! in place.

/// Ordered `property: value` declarations of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    declarations: Vec<(String, String)>,
}

impl StyleMap {
    /// Create an empty style map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Parse `prop:value;prop:value` text. Property names are lowercased,
    /// whitespace around names and values is trimmed, and malformed
    /// declarations (no colon, empty name) are skipped.
    #[must_use]
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for declaration in css_text.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            style.set(&name.to_ascii_lowercase(), value.trim());
        }
        style
    }

    /// Set `property` to `value`, replacing any previous value.
    pub fn set(&mut self, property: &str, value: &str) {
        if let Some(slot) = self.declarations.iter_mut().find(|(p, _)| p == property) {
            slot.1 = value.to_string();
        } else {
            self.declarations
                .push((property.to_string(), value.to_string()));
        }
    }

    /// Value of `property`, if declared.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Remove `property`, returning its previous value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self.declarations.iter().position(|(p, _)| p == property)?;
        Some(self.declarations.remove(index).1)
    }

    /// Number of declarations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether there are no declarations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Serialize as `prop:value;prop:value;`.
    #[must_use]
    pub fn to_css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(p, v)| format!("{p}:{v};"))
            .collect()
    }
}
