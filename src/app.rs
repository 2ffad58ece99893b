//! Application state.
//!
//! `App` is the single owned state object: the loaded page, the concrete
//! listing (the real `ListingView`), the filter feature, and all UI state.
//! Render, input, and persistence all receive it explicitly; there is no
//! module-level state.

use crate::config::Config;
use crate::filter::{FilterFeature, ListingView};
use crate::keybindings::KeybindingRegistry;
use crate::page::{Card, CtaBar, NavLink, Page};
use crate::storage::Database;
use crate::theme::{StyleMap, ThemeVariant};
use anyhow::Result;
use std::borrow::Cow;
use tokio::time::Instant;

/// Scroll offset (rows into the listing) past which the sticky CTA bar
/// becomes visible.
pub const CTA_SCROLL_THRESHOLD: usize = 300;

/// Rows one card occupies in the rendered listing (meta, title, website,
/// spacer). The scroll offset is derived from it.
pub const CARD_HEIGHT: usize = 4;

/// Cards jumped by a page-up/page-down.
pub const PAGE_JUMP: usize = 5;

// ============================================================================
// Focus
// ============================================================================

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Cards,
    Chips,
}

// ============================================================================
// Listing — the concrete ListingView
// ============================================================================

/// One rendered filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub category: String,
    pub count: usize,
    pub active: bool,
}

/// A card plus its visibility flag. The card itself is never mutated.
#[derive(Debug, Clone)]
pub struct CardSlot {
    pub card: Card,
    pub visible: bool,
}

/// The rendered listing state the filter controller drives.
#[derive(Debug, Default)]
pub struct Listing {
    /// Filter section heading, present only on filterable pages.
    pub heading: Option<String>,
    pub cards: Vec<CardSlot>,
    pub chips: Vec<FilterChip>,
    pub show_all_visible: bool,
}

impl Listing {
    pub fn from_page(page: &Page) -> Self {
        Self {
            heading: page.filter.as_ref().map(|f| f.heading.clone()),
            cards: page
                .cards
                .iter()
                .map(|card| CardSlot {
                    card: card.clone(),
                    visible: true,
                })
                .collect(),
            chips: Vec::new(),
            show_all_visible: false,
        }
    }

    /// Visible cards with their original positions, in listing order.
    pub fn visible_cards(&self) -> impl Iterator<Item = (usize, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.visible)
            .map(|(i, slot)| (i, &slot.card))
    }

    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|slot| slot.visible).count()
    }
}

impl ListingView for Listing {
    fn append_control(&mut self, category: &str, count: usize) {
        self.chips.push(FilterChip {
            category: category.to_string(),
            count,
            active: false,
        });
    }

    fn set_card_visible(&mut self, index: usize, visible: bool) {
        if let Some(slot) = self.cards.get_mut(index) {
            slot.visible = visible;
        }
    }

    fn set_control_active(&mut self, category: &str, active: bool) {
        if let Some(chip) = self.chips.iter_mut().find(|c| c.category == category) {
            chip.active = active;
        }
    }

    fn set_show_all_visible(&mut self, visible: bool) {
        self.show_all_visible = visible;
    }
}

// ============================================================================
// Sticky CTA visibility
// ============================================================================

/// Whether the sticky CTA bar is visible at `scroll_offset`. Pure function
/// of the current offset; no hysteresis, no debounce.
pub fn cta_visible_at(scroll_offset: usize) -> bool {
    scroll_offset > CTA_SCROLL_THRESHOLD
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub db: Database,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    // Keybindings
    pub keybindings: KeybindingRegistry,

    // Page data
    pub page_title: String,
    pub nav: Vec<NavLink>,
    pub cta: Option<CtaBar>,
    pub listing: Listing,
    pub filter: FilterFeature,

    // UI state
    pub focus: Focus,
    /// Position within the visible card sequence.
    pub selected_card: usize,
    pub selected_chip: usize,
    /// Rows into the listing; drives the sticky CTA bar.
    pub scroll_offset: usize,
    pub nav_open: bool,
    /// Tag prompt input while the prompt is open.
    pub tag_prompt: Option<String>,

    // Status message with expiry — Cow avoids allocation for static literals
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,
}

impl App {
    /// Build the app from a loaded page.
    ///
    /// Initialization order matters: the category index is built from the
    /// page, controls are appended to the listing, and only then may
    /// `restore_filters` run.
    pub fn new(db: Database, page: Page, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme in config, using dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!("{warning}");
        }

        let mut listing = Listing::from_page(&page);
        let mut filter = FilterFeature::attach(&page);
        if let Some(controller) = filter.as_active_mut() {
            controller.initialize(&mut listing);
        }

        Self {
            db,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            page_title: page.title,
            nav: page.nav,
            cta: page.cta,
            listing,
            filter,
            focus: Focus::Cards,
            selected_card: 0,
            selected_chip: 0,
            scroll_offset: 0,
            nav_open: false,
            tag_prompt: None,
            status_message: None,
            needs_redraw: true,
        }
    }

    pub fn style(&self, role: &str) -> ratatui::style::Style {
        self.theme.resolve(role)
    }

    // ------------------------------------------------------------------------
    // Filter transitions
    // ------------------------------------------------------------------------

    /// Restore the persisted selection. Runs once, at startup, after the
    /// controls exist. The write-back is redundant on a clean load but
    /// re-persists a selection that survived a malformed stored value.
    pub async fn restore_filters(&mut self) -> Result<()> {
        if let Some(controller) = self.filter.as_active_mut() {
            let stored = self.db.load_category_filters().await?;
            let selection = controller.restore(stored, &mut self.listing);
            self.db.save_category_filters(selection).await?;
        }
        self.clamp_selections();
        Ok(())
    }

    /// Toggle `category` through the filter protocol and persist the result.
    ///
    /// Every entry point funnels here: chip activation, card tags, and the
    /// tag prompt. On a page without the filter feature this is a no-op.
    pub async fn toggle_category(&mut self, category: &str) -> Result<()> {
        if let Some(controller) = self.filter.as_active_mut() {
            let selection = controller.toggle(category, &mut self.listing);
            self.db.save_category_filters(selection).await?;
            self.clamp_selections();
            self.needs_redraw = true;
        }
        Ok(())
    }

    /// Clear the selection and persist the cleared state.
    pub async fn show_all(&mut self) -> Result<()> {
        if let Some(controller) = self.filter.as_active_mut() {
            let selection = controller.show_all(&mut self.listing);
            self.db.save_category_filters(selection).await?;
            self.clamp_selections();
            self.needs_redraw = true;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Navigation and scrolling
    // ------------------------------------------------------------------------

    /// The card currently selected, if any card is visible.
    pub fn selected_visible_card(&self) -> Option<&Card> {
        self.listing
            .visible_cards()
            .nth(self.selected_card)
            .map(|(_, card)| card)
    }

    pub fn select_next_card(&mut self) {
        let count = self.listing.visible_count();
        if count > 0 && self.selected_card + 1 < count {
            self.selected_card += 1;
        }
        self.sync_scroll();
    }

    pub fn select_prev_card(&mut self) {
        self.selected_card = self.selected_card.saturating_sub(1);
        self.sync_scroll();
    }

    pub fn page_down(&mut self) {
        let count = self.listing.visible_count();
        if count > 0 {
            self.selected_card = (self.selected_card + PAGE_JUMP).min(count - 1);
        }
        self.sync_scroll();
    }

    pub fn page_up(&mut self) {
        self.selected_card = self.selected_card.saturating_sub(PAGE_JUMP);
        self.sync_scroll();
    }

    /// Scroll the listing back to the top. Cosmetic companion to tag
    /// toggles, mirroring the page's scroll-into-view on tag clicks.
    pub fn reveal_listing(&mut self) {
        self.selected_card = 0;
        self.sync_scroll();
    }

    /// Keep selections inside the current visible/chip ranges after a
    /// filter transition changes what exists.
    pub fn clamp_selections(&mut self) {
        let visible = self.listing.visible_count();
        if visible == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= visible {
            self.selected_card = visible - 1;
        }
        if !self.listing.chips.is_empty() && self.selected_chip >= self.listing.chips.len() {
            self.selected_chip = self.listing.chips.len() - 1;
        }
        self.sync_scroll();
    }

    /// The listing scrolls with the selection: the selected card sits at
    /// the top of the viewport.
    fn sync_scroll(&mut self) {
        self.scroll_offset = self.selected_card * CARD_HEIGHT;
    }

    /// Sticky CTA bar visibility for the current scroll position.
    pub fn cta_visible(&self) -> bool {
        self.cta.is_some() && cta_visible_at(self.scroll_offset)
    }

    /// Flip the navigation menu open/closed.
    pub fn toggle_nav(&mut self) {
        self.nav_open = !self.nav_open;
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------------
    // Theme and status
    // ------------------------------------------------------------------------

    pub fn cycle_theme(&mut self) {
        self.theme_variant = self.theme_variant.next();
        self.theme = StyleMap::from_palette(&self.theme_variant.palette());
        self.set_status(Cow::Owned(format!("Theme: {}", self.theme_variant.name())));
        self.needs_redraw = true;
    }

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}
