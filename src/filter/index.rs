//! Category index builder.
//!
//! Derives the distinct categories and their card counts from the loaded
//! listing. Built exactly once per page load; the page is static for the
//! process lifetime, so the index is never invalidated.

/// One distinct category and the number of cards carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// The ordered category index: descending count, ties broken by the order
/// in which categories were first seen in the listing.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    entries: Vec<CategoryCount>,
}

impl CategoryIndex {
    /// Build the index from per-card category labels.
    ///
    /// `None` entries (cards without a category) do not register a
    /// category; such cards exist in the listing but are invisible to the
    /// filter. The listing is small (one page of cards), so the linear
    /// scan per label is fine and keeps discovery order without an extra
    /// map.
    pub fn build<'a, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut entries: Vec<CategoryCount> = Vec::new();
        for name in categories.into_iter().flatten() {
            match entries.iter_mut().find(|e| e.name == name) {
                Some(entry) => entry.count += 1,
                None => entries.push(CategoryCount {
                    name: name.to_string(),
                    count: 1,
                }),
            }
        }
        // Stable sort: equal counts keep first-seen order.
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    /// Distinct categories with counts, in display order.
    pub fn entries(&self) -> &[CategoryCount] {
        &self.entries
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|e| e.name == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(index: &CategoryIndex) -> Vec<(&str, usize)> {
        index
            .entries()
            .iter()
            .map(|e| (e.name.as_str(), e.count))
            .collect()
    }

    #[test]
    fn test_counts_and_descending_order() {
        let index = CategoryIndex::build(
            [Some("A"), Some("A"), Some("B"), Some("C"), Some("A")]
                .into_iter(),
        );
        assert_eq!(names(&index), vec![("A", 3), ("B", 1), ("C", 1)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let index = CategoryIndex::build(
            [Some("B"), Some("C"), Some("A"), Some("C")].into_iter(),
        );
        // C wins on count; B precedes A because it was seen first.
        assert_eq!(names(&index), vec![("C", 2), ("B", 1), ("A", 1)]);
    }

    #[test]
    fn test_uncategorized_cards_are_ignored() {
        let index =
            CategoryIndex::build([None, Some("A"), None, Some("A")].into_iter());
        assert_eq!(names(&index), vec![("A", 2)]);
    }

    #[test]
    fn test_empty_listing() {
        let index = CategoryIndex::build(std::iter::empty());
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(!index.contains("A"));
    }

    #[test]
    fn test_contains() {
        let index = CategoryIndex::build([Some("A"), Some("B")].into_iter());
        assert!(index.contains("A"));
        assert!(!index.contains("Z"));
    }
}
