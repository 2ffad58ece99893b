//! The category filter: index building, selection state, and the
//! controller that keeps controls and card visibility consistent.

mod controller;
mod index;
mod selection;
mod view;

pub use controller::{FilterController, FilterFeature};
pub use index::{CategoryCount, CategoryIndex};
pub use selection::Selection;
pub use view::ListingView;
