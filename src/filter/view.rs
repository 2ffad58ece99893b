//! The seam between the filter state machine and the rendered listing.
//!
//! The controller never touches ratatui or the page document directly; it
//! drives whatever implements `ListingView`. The app's `Listing` is the
//! real implementation, and tests use an in-memory fake.

/// Mutation surface of the rendered listing.
///
/// Card indices refer to positions in the page's card list. Implementations
/// must treat `append_control` as append-only: controls are created once,
/// in index order, and only their active flags change afterwards.
pub trait ListingView {
    /// Append one filter control for `category`, labeled with `count`.
    fn append_control(&mut self, category: &str, count: usize);

    /// Show or hide the card at `index`.
    fn set_card_visible(&mut self, index: usize, visible: bool);

    /// Set the active flag on the control bound to `category`.
    fn set_control_active(&mut self, category: &str, active: bool);

    /// Show or hide the "show all" affordance.
    fn set_show_all_visible(&mut self, visible: bool);
}
