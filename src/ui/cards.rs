//! Card listing widget.
//!
//! Renders the visible cards only — hidden cards stay in the listing state
//! but never reach the frame. Each card shows its meta line (source and
//! date), title, and website with the category tag.

use crate::app::{App, Focus};
use crate::util::{sanitize_text, truncate_to_width};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the card listing panel.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Cards;
    let inner_width = area.width.saturating_sub(2) as usize;

    let visible: Vec<_> = app.listing.visible_cards().collect();
    let items: Vec<ListItem> = if visible.is_empty() {
        vec![ListItem::new(empty_listing_label(app))]
    } else {
        visible
            .iter()
            .enumerate()
            .map(|(pos, (_, card))| {
                let selected = is_focused && pos == app.selected_card;
                let title_style = if selected {
                    app.style("card_selected")
                } else {
                    app.style("card_title")
                };

                let mut meta = sanitize_text(&card.source).into_owned();
                if let Some(date) = card.published_label() {
                    if !meta.is_empty() {
                        meta.push_str("  •  ");
                    }
                    meta.push_str(&date);
                }

                let mut tail_spans = vec![Span::styled(
                    sanitize_text(&card.website).into_owned(),
                    app.style("card_website"),
                )];
                if let Some(category) = &card.category {
                    tail_spans.push(Span::styled(
                        format!("  #{}", sanitize_text(category)),
                        app.style("card_tag"),
                    ));
                }

                let lines = vec![
                    Line::from(Span::styled(
                        truncate_to_width(&meta, inner_width).into_owned(),
                        app.style("card_meta"),
                    )),
                    Line::from(Span::styled(
                        truncate_to_width(&sanitize_text(&card.title), inner_width)
                            .into_owned(),
                        title_style,
                    )),
                    Line::from(tail_spans),
                    Line::from(""),
                ];
                ListItem::new(lines)
            })
            .collect()
    };

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let title = format!(
        "{} — {} of {} items",
        app.page_title,
        app.listing.visible_count(),
        app.listing.cards.len()
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    let mut state = ListState::default().with_selected(Some(app.selected_card));
    f.render_stateful_widget(list, area, &mut state);
}

/// Placeholder text when nothing is visible: distinguishes an empty page
/// from a filter that matches no cards.
fn empty_listing_label(app: &App) -> &'static str {
    if app.listing.cards.is_empty() {
        "No news items"
    } else {
        "No items match the current filter — press 'a' to show all"
    }
}
