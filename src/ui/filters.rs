//! Filter chip row widget.
//!
//! One chip per indexed category, in index order, labeled with the live
//! count. Active chips are highlighted; the "show all" affordance appears
//! only while a filter is applied.

use crate::app::{App, Focus};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the chip row panel.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Chips;

    let mut spans: Vec<Span> = Vec::with_capacity(app.listing.chips.len() * 2 + 2);
    spans.push(Span::raw(" "));
    for (i, chip) in app.listing.chips.iter().enumerate() {
        let style = if is_focused && i == app.selected_chip {
            app.style("chip_focused")
        } else if chip.active {
            app.style("chip_active")
        } else {
            app.style("chip_normal")
        };
        spans.push(Span::styled(
            format!(" {} ({}) ", chip.category, chip.count),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    if app.listing.show_all_visible {
        let hint = app
            .keybindings
            .key_hint(crate::keybindings::Action::ShowAll)
            .unwrap_or_default();
        spans.push(Span::styled(
            format!(" ✕ Show all [{hint}] "),
            app.style("show_all"),
        ));
    }

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let heading = app.listing.heading.as_deref().unwrap_or("Filter");
    let row = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(heading, app.style("filter_heading"))),
    );
    f.render_widget(row, area);
}
