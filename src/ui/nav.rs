//! Header and navigation menu widget.
//!
//! One line of brand text with a menu marker; toggling the nav expands a
//! second line listing the page's navigation links.

use crate::app::App;
use crate::util::sanitize_text;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Header height in rows for the current nav state.
pub(super) fn height(app: &App) -> u16 {
    if app.nav_open && !app.nav.is_empty() {
        2
    } else {
        1
    }
}

/// Render the header: brand line, plus the link list while the menu is open.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let marker = if app.nav_open { "▾ Menu" } else { "▸ Menu" };
    let brand = Line::from(vec![
        Span::styled(
            format!(" {} ", sanitize_text(&app.page_title)),
            app.style("nav_brand"),
        ),
        Span::styled(marker, app.style("nav_link")),
    ]);

    let mut lines = vec![brand];
    if app.nav_open && !app.nav.is_empty() {
        let labels: Vec<String> = app
            .nav
            .iter()
            .map(|link| sanitize_text(&link.label).into_owned())
            .collect();
        lines.push(Line::from(Span::styled(
            format!("   {}", labels.join("  |  ")),
            app.style("nav_link"),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
