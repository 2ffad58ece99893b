//! The filter controller: one owned state object driving control rendering,
//! card visibility, and the selection set through the `ListingView` seam.
//!
//! State transitions all funnel through `apply`, which re-establishes the
//! two invariants after every change: a categorized card is visible iff the
//! selection is empty or contains its category, and a control is active iff
//! its category is selected.

use super::{CategoryIndex, ListingView, Selection};
use crate::page::Page;

// ============================================================================
// Feature Gate
// ============================================================================

/// Whether the filter feature applies to the loaded page.
///
/// The viewer is shared across page types; only pages carrying the filter
/// section marker (and at least one categorized card) get a live filter.
pub enum FilterFeature {
    Active(FilterController),
    NotApplicable,
}

impl FilterFeature {
    /// Decide applicability for `page` and build the controller if it applies.
    pub fn attach(page: &Page) -> Self {
        if page.filter.is_none() {
            tracing::debug!("Page has no filter section, filter inactive");
            return Self::NotApplicable;
        }
        let controller = FilterController::from_categories(
            page.cards.iter().map(|c| c.category.clone()).collect(),
        );
        if controller.index().is_empty() {
            tracing::debug!("Page has no categorized cards, filter inactive");
            return Self::NotApplicable;
        }
        Self::Active(controller)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn as_active(&self) -> Option<&FilterController> {
        match self {
            Self::Active(controller) => Some(controller),
            Self::NotApplicable => None,
        }
    }

    pub fn as_active_mut(&mut self) -> Option<&mut FilterController> {
        match self {
            Self::Active(controller) => Some(controller),
            Self::NotApplicable => None,
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct FilterController {
    index: CategoryIndex,
    /// Category per card position; `None` cards are never touched.
    cards: Vec<Option<String>>,
    selection: Selection,
}

impl FilterController {
    /// Build the controller from per-card category labels.
    ///
    /// The index is computed here, exactly once; the card list is static
    /// for the page's lifetime.
    pub fn from_categories(cards: Vec<Option<String>>) -> Self {
        let index = CategoryIndex::build(cards.iter().map(Option::as_deref));
        Self {
            index,
            cards,
            selection: Selection::new(),
        }
    }

    /// Render the filter controls and establish the initial (unfiltered)
    /// state. Must run before `restore`; controls are appended exactly once
    /// and only their active flags change afterwards.
    pub fn initialize(&mut self, view: &mut dyn ListingView) {
        for entry in self.index.entries() {
            view.append_control(&entry.name, entry.count);
        }
        self.apply(view);
    }

    /// Toggle `category` in the selection and re-apply the invariants.
    ///
    /// The category is not validated against the index: text arriving from
    /// a card tag or the tag prompt enters the selection verbatim. A name
    /// matching no indexed category hides every categorized card and
    /// activates no control; `show_all` is the recovery path.
    ///
    /// Returns the post-transition selection for the caller to persist.
    pub fn toggle(&mut self, category: &str, view: &mut dyn ListingView) -> &Selection {
        let selected = self.selection.toggle(category);
        tracing::debug!(category, selected, "Toggled category filter");
        self.apply(view);
        &self.selection
    }

    /// Clear the selection and re-apply the invariants.
    pub fn show_all(&mut self, view: &mut dyn ListingView) -> &Selection {
        self.selection.clear();
        tracing::debug!("Cleared category filters");
        self.apply(view);
        &self.selection
    }

    /// Replace the selection with a previously persisted one and re-apply
    /// the invariants. Runs once, at startup, after `initialize`.
    pub fn restore(&mut self, selection: Selection, view: &mut dyn ListingView) -> &Selection {
        tracing::debug!(filters = selection.len(), "Restored category filters");
        self.selection = selection;
        self.apply(view);
        &self.selection
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    /// Re-establish card visibility, control active flags, and the
    /// show-all affordance from the current selection.
    fn apply(&self, view: &mut dyn ListingView) {
        for (i, category) in self.cards.iter().enumerate() {
            if let Some(category) = category {
                let visible =
                    self.selection.is_empty() || self.selection.contains(category);
                view.set_card_visible(i, visible);
            }
        }
        for entry in self.index.entries() {
            view.set_control_active(&entry.name, self.selection.contains(&entry.name));
        }
        view.set_show_all_visible(!self.selection.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    // ------------------------------------------------------------------------
    // In-memory fake listing
    // ------------------------------------------------------------------------

    #[derive(Debug, Default)]
    struct FakeListing {
        /// (category, count, active) per rendered control, in append order.
        controls: Vec<(String, usize, bool)>,
        visible: Vec<bool>,
        show_all_visible: bool,
    }

    impl FakeListing {
        fn with_cards(count: usize) -> Self {
            Self {
                visible: vec![true; count],
                ..Self::default()
            }
        }

        fn control_names(&self) -> Vec<&str> {
            self.controls.iter().map(|(name, _, _)| name.as_str()).collect()
        }

        fn active_names(&self) -> Vec<&str> {
            self.controls
                .iter()
                .filter(|(_, _, active)| *active)
                .map(|(name, _, _)| name.as_str())
                .collect()
        }
    }

    impl ListingView for FakeListing {
        fn append_control(&mut self, category: &str, count: usize) {
            self.controls.push((category.to_string(), count, false));
        }

        fn set_card_visible(&mut self, index: usize, visible: bool) {
            self.visible[index] = visible;
        }

        fn set_control_active(&mut self, category: &str, active: bool) {
            if let Some(control) =
                self.controls.iter_mut().find(|(name, _, _)| name == category)
            {
                control.2 = active;
            }
        }

        fn set_show_all_visible(&mut self, visible: bool) {
            self.show_all_visible = visible;
        }
    }

    fn cats(labels: &[Option<&str>]) -> Vec<Option<String>> {
        labels.iter().map(|l| l.map(str::to_string)).collect()
    }

    /// Controller + fake over a five-card listing: [A, A, B, C, A].
    fn scenario() -> (FilterController, FakeListing) {
        let cards = cats(&[Some("A"), Some("A"), Some("B"), Some("C"), Some("A")]);
        let mut view = FakeListing::with_cards(cards.len());
        let mut controller = FilterController::from_categories(cards);
        controller.initialize(&mut view);
        (controller, view)
    }

    // ------------------------------------------------------------------------
    // Rendering and ordering
    // ------------------------------------------------------------------------

    #[test]
    fn test_controls_match_index_order_and_counts() {
        let (_, view) = scenario();
        assert_eq!(
            view.controls,
            vec![
                ("A".to_string(), 3, false),
                ("B".to_string(), 1, false),
                ("C".to_string(), 1, false),
            ]
        );
    }

    #[test]
    fn test_initial_state_is_unfiltered() {
        let (_, view) = scenario();
        assert_eq!(view.visible, vec![true; 5]);
        assert!(view.active_names().is_empty());
        assert!(!view.show_all_visible);
    }

    // ------------------------------------------------------------------------
    // Toggle protocol
    // ------------------------------------------------------------------------

    #[test]
    fn test_toggle_single_category() {
        let (mut controller, mut view) = scenario();
        controller.toggle("B", &mut view);

        assert_eq!(view.visible, vec![false, false, true, false, false]);
        assert_eq!(view.active_names(), vec!["B"]);
        assert!(view.show_all_visible);
    }

    #[test]
    fn test_toggle_accumulates_multi_select() {
        let (mut controller, mut view) = scenario();
        controller.toggle("A", &mut view);
        controller.toggle("B", &mut view);

        // Cards with A or B visible, C hidden.
        assert_eq!(view.visible, vec![true, true, true, false, true]);
        assert_eq!(view.active_names(), vec!["A", "B"]);
        assert!(view.show_all_visible);
    }

    #[test]
    fn test_toggle_twice_returns_to_show_all() {
        let (mut controller, mut view) = scenario();
        controller.toggle("A", &mut view);
        let selection = controller.toggle("A", &mut view);

        assert!(selection.is_empty());
        assert_eq!(view.visible, vec![true; 5]);
        assert!(view.active_names().is_empty());
        assert!(!view.show_all_visible);
    }

    #[test]
    fn test_show_all_clears_everything() {
        let (mut controller, mut view) = scenario();
        controller.toggle("A", &mut view);
        controller.toggle("C", &mut view);
        let selection = controller.show_all(&mut view);

        assert!(selection.is_empty());
        assert_eq!(view.visible, vec![true; 5]);
        assert!(view.active_names().is_empty());
        assert!(!view.show_all_visible);
    }

    #[test]
    fn test_unknown_category_hides_all_with_no_active_control() {
        let (mut controller, mut view) = scenario();
        let selection = controller.toggle("Z", &mut view);

        assert!(selection.contains("Z"));
        assert_eq!(view.visible, vec![false; 5]);
        assert!(view.active_names().is_empty());
        // Show-all stays reachable as the recovery path.
        assert!(view.show_all_visible);

        controller.show_all(&mut view);
        assert_eq!(view.visible, vec![true; 5]);
    }

    #[test]
    fn test_uncategorized_card_is_never_touched() {
        let cards = cats(&[Some("A"), None, Some("B")]);
        let mut view = FakeListing::with_cards(cards.len());
        let mut controller = FilterController::from_categories(cards);
        controller.initialize(&mut view);

        controller.toggle("A", &mut view);
        // The untagged card stays visible even while B is filtered out.
        assert_eq!(view.visible, vec![true, true, false]);

        controller.show_all(&mut view);
        assert_eq!(view.visible, vec![true, true, true]);
    }

    // ------------------------------------------------------------------------
    // Restore
    // ------------------------------------------------------------------------

    #[test]
    fn test_restore_applies_invariants() {
        let (mut controller, mut view) = scenario();
        let stored: Selection =
            ["C".to_string(), "B".to_string()].into_iter().collect();
        controller.restore(stored, &mut view);

        assert_eq!(view.visible, vec![false, false, true, true, false]);
        assert_eq!(view.active_names(), vec!["B", "C"]);
        assert!(view.show_all_visible);
    }

    #[test]
    fn test_restore_empty_selection_is_unfiltered() {
        let (mut controller, mut view) = scenario();
        controller.toggle("A", &mut view);
        controller.restore(Selection::new(), &mut view);

        assert_eq!(view.visible, vec![true; 5]);
        assert!(!view.show_all_visible);
    }

    // ------------------------------------------------------------------------
    // Feature gate
    // ------------------------------------------------------------------------

    #[test]
    fn test_attach_without_filter_section() {
        let page = crate::page::Page::from_json(
            r#"{"cards": [{"title": "x", "category": "A"}]}"#,
        )
        .unwrap();
        assert!(!FilterFeature::attach(&page).is_active());
    }

    #[test]
    fn test_attach_without_categorized_cards() {
        let page = crate::page::Page::from_json(
            r#"{"filter": {}, "cards": [{"title": "x"}]}"#,
        )
        .unwrap();
        assert!(!FilterFeature::attach(&page).is_active());
    }

    #[test]
    fn test_attach_active() {
        let page = crate::page::Page::from_json(
            r#"{"filter": {}, "cards": [{"title": "x", "category": "A"}]}"#,
        )
        .unwrap();
        let feature = FilterFeature::attach(&page);
        assert!(feature.is_active());
        assert_eq!(feature.as_active().unwrap().index().len(), 1);
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    /// Check both invariants against the fake after a transition.
    fn assert_invariants(
        controller: &FilterController,
        view: &FakeListing,
        cards: &[Option<&str>],
    ) {
        let selection = controller.selection();
        for (i, category) in cards.iter().enumerate() {
            if let Some(category) = category {
                let expect = selection.is_empty() || selection.contains(category);
                assert_eq!(view.visible[i], expect, "card {i} visibility");
            } else {
                assert!(view.visible[i], "uncategorized card {i} must stay visible");
            }
        }
        for (name, _, active) in &view.controls {
            assert_eq!(*active, selection.contains(name), "control {name}");
        }
        assert_eq!(view.show_all_visible, !selection.is_empty());
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_under_any_toggle_sequence(
            ops in proptest::collection::vec(0usize..5, 0..32)
        ) {
            // "Z" never appears on a card: index 4 exercises the
            // unknown-category path alongside normal toggles.
            let labels = ["A", "B", "C", "D", "Z"];
            let cards = [Some("A"), Some("A"), Some("B"), None, Some("C"), Some("D")];
            let mut view = FakeListing::with_cards(cards.len());
            let mut controller = FilterController::from_categories(cats(&cards));
            controller.initialize(&mut view);

            for &op in &ops {
                controller.toggle(labels[op], &mut view);
                assert_invariants(&controller, &view, &cards);
            }

            controller.show_all(&mut view);
            assert_invariants(&controller, &view, &cards);
        }

        #[test]
        fn prop_toggle_twice_restores_prior_selection(
            prefix in proptest::collection::vec(0usize..4, 0..16),
            target in 0usize..4,
        ) {
            let labels = ["A", "B", "C", "D"];
            let cards = [Some("A"), Some("B"), Some("C"), Some("D")];
            let mut view = FakeListing::with_cards(cards.len());
            let mut controller = FilterController::from_categories(cats(&cards));
            controller.initialize(&mut view);

            for &op in &prefix {
                controller.toggle(labels[op], &mut view);
            }
            let before = controller.selection().clone();
            controller.toggle(labels[target], &mut view);
            controller.toggle(labels[target], &mut view);
            prop_assert_eq!(controller.selection(), &before);
        }
    }
}
