//! The selection set and its serialized form.
//!
//! A `Selection` is the set of categories currently chosen as filters;
//! empty means "no filter, show all". Insertion order is preserved because
//! it is also the serialization order, so a stored selection restores in
//! the order the user built it.

use serde::{Deserialize, Serialize};

/// Insertion-ordered set of category names.
///
/// The set stays tiny (one entry per chosen category), so membership is a
/// linear scan over a `Vec` rather than a hash set that would lose order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    chosen: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.chosen.iter().any(|c| c == category)
    }

    /// Toggle membership of `category`. Returns `true` if the category is
    /// selected after the call, `false` if it was removed.
    pub fn toggle(&mut self, category: &str) -> bool {
        match self.chosen.iter().position(|c| c == category) {
            Some(pos) => {
                self.chosen.remove(pos);
                false
            }
            None => {
                self.chosen.push(category.to_string());
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    /// Selected categories in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.chosen.iter().map(String::as_str)
    }

    /// Serialize as a JSON array in insertion order.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.chosen)
    }

    /// Deserialize from the stored JSON array.
    ///
    /// Duplicate entries in the stored value (hand-edited or stale data)
    /// collapse to their first occurrence so the set invariant holds.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        let names: Vec<String> = serde_json::from_str(raw)?;
        let mut selection = Self::new();
        for name in names {
            if !selection.contains(&name) {
                selection.chosen.push(name);
            }
        }
        Ok(selection)
    }
}

impl FromIterator<String> for Selection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut selection = Self::new();
        for name in iter {
            if !selection.contains(&name) {
                selection.chosen.push(name);
            }
        }
        selection
    }
}
