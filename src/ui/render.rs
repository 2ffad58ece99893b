//! Render functions for the TUI.
//!
//! Lays out one frame: header/nav, the filter chip row (on filterable
//! pages), the card listing, the sticky CTA bar (past the scroll
//! threshold), and the status bar.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{cards, filters, nav, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
///
/// Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Minimum terminal size check for usable UI
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    render_page(f, app, area);
}

/// Render the news page: header, chips, listing, CTA, status.
fn render_page(f: &mut Frame, app: &mut App, area: Rect) {
    let header_height = nav::height(app);
    let chips_height = if app.listing.chips.is_empty() { 0 } else { 3 };
    let cta_height = if app.cta_visible() { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(chips_height),
            Constraint::Min(0),
            Constraint::Length(cta_height),
            Constraint::Length(1),
        ])
        .split(area);

    nav::render(f, app, chunks[0]);
    if chips_height > 0 {
        filters::render(f, app, chunks[1]);
    }
    cards::render(f, app, chunks[2]);
    if cta_height > 0 {
        render_cta(f, app, chunks[3]);
    }
    status::render(f, app, chunks[4]);
}

/// Render the sticky CTA bar. Visibility is decided by the caller from
/// the scroll offset; this just paints the bar.
fn render_cta(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }
    let Some(cta) = &app.cta else {
        return;
    };

    let hint = app
        .keybindings
        .key_hint(crate::keybindings::Action::OpenCta)
        .map(|key| format!("  [{key}]"))
        .unwrap_or_default();
    let bar = Paragraph::new(format!(" {}{}", cta.text, hint))
        .style(app.style("cta_bar"))
        .alignment(Alignment::Center);
    f.render_widget(bar, area);
}
