use crate::app::{App, Focus};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    // Status bar needs at least 1 char width to be meaningful
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Use Cow to avoid allocations for static strings and borrowed status messages
    let text: Cow<'_, str> = if let Some(input) = &app.tag_prompt {
        Cow::Owned(format!(
            "Filter by category: {}_  |  ENTER toggle  ESC cancel",
            input
        ))
    } else if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        match app.focus {
            Focus::Cards => Cow::Borrowed(
                "[j/k]move [Enter]open [t]tag [/]filter [a]show all [m]menu [Tab]chips [q]uit",
            ),
            Focus::Chips => Cow::Borrowed(
                "[h/l]move [Enter]toggle [a]show all [/]filter [Tab]cards [q]uit",
            ),
        }
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
