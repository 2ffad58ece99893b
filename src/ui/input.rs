//! Input handling for the TUI.
//!
//! Keys dispatch through the keybinding registry in the focused panel's
//! context. The tag prompt is a raw input mode handled before registry
//! dispatch, the same way a search box would be: every printable key is
//! text until ENTER commits or ESC cancels.

use crate::app::{App, Focus};
use crate::keybindings::{Action as Binding, Context};
use crate::util::MAX_TAG_INPUT_LENGTH;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};

use super::loop_runner::Action;

/// Handle a key press event.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Result<Action> {
    // Tag prompt swallows all input while open
    if app.tag_prompt.is_some() {
        return handle_tag_prompt(app, code).await;
    }

    let context = match app.focus {
        Focus::Cards => Context::Cards,
        Focus::Chips => Context::Chips,
    };

    let Some(binding) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Ok(Action::Continue);
    };

    match binding {
        Binding::Quit => return Ok(Action::Quit),

        Binding::NavDown => app.select_next_card(),
        Binding::NavUp => app.select_prev_card(),
        Binding::PageDown => app.page_down(),
        Binding::PageUp => app.page_up(),

        Binding::CycleFocus => cycle_focus(app),

        Binding::OpenLink => {
            let link = app
                .selected_visible_card()
                .and_then(|card| card.link.clone());
            open_link(app, link, "card");
        }

        Binding::ToggleCardTag => {
            // Second entry point into the toggle protocol: the card's
            // displayed tag text goes through toggle verbatim.
            match app.selected_visible_card().and_then(|c| c.category.clone()) {
                Some(category) => {
                    app.toggle_category(&category).await?;
                    app.reveal_listing();
                }
                None => app.set_status("Card has no category tag"),
            }
        }

        Binding::ChipPrev => {
            app.selected_chip = app.selected_chip.saturating_sub(1);
        }
        Binding::ChipNext => {
            if !app.listing.chips.is_empty()
                && app.selected_chip + 1 < app.listing.chips.len()
            {
                app.selected_chip += 1;
            }
        }

        Binding::ToggleChip => {
            if let Some(chip) = app.listing.chips.get(app.selected_chip) {
                let category = chip.category.clone();
                app.toggle_category(&category).await?;
            }
        }

        Binding::ShowAll => {
            app.show_all().await?;
            app.set_status("Showing all categories");
        }

        Binding::EnterTagPrompt => {
            if app.filter.is_active() {
                app.tag_prompt = Some(String::new());
            } else {
                app.set_status("Filtering is not available on this page");
            }
        }

        Binding::ToggleNav => app.toggle_nav(),
        Binding::CycleTheme => app.cycle_theme(),

        Binding::OpenCta => {
            let link = app.cta.as_ref().and_then(|cta| cta.link.clone());
            open_link(app, link, "call-to-action");
        }
    }

    Ok(Action::Continue)
}

/// Move focus between the card listing and the chip row. The chip row only
/// takes focus when it exists.
fn cycle_focus(app: &mut App) {
    app.focus = match app.focus {
        Focus::Cards if !app.listing.chips.is_empty() => Focus::Chips,
        _ => Focus::Cards,
    };
}

/// Handle keys while the tag prompt is open.
///
/// The committed text enters the toggle protocol verbatim, exactly like a
/// tag click: there is no validation against the index here.
async fn handle_tag_prompt(app: &mut App, code: KeyCode) -> Result<Action> {
    match code {
        KeyCode::Esc => {
            app.tag_prompt = None;
        }
        KeyCode::Enter => {
            let input = app.tag_prompt.take().unwrap_or_default();
            let category = input.trim().to_string();
            if !category.is_empty() {
                app.toggle_category(&category).await?;
                app.reveal_listing();
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.tag_prompt.as_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.tag_prompt.as_mut() {
                if input.len() >= MAX_TAG_INPUT_LENGTH {
                    app.set_status("Category name at max length");
                } else {
                    input.push(c);
                }
            }
        }
        _ => {}
    }
    Ok(Action::Continue)
}

/// Open a link in the system browser, reporting the outcome in the status
/// bar rather than failing the event loop.
fn open_link(app: &mut App, link: Option<String>, what: &str) {
    match link {
        Some(url) => match open::that(&url) {
            Ok(()) => app.set_status(format!("Opened {what} link")),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to open link");
                app.set_status(format!("Failed to open {what} link: {e}"));
            }
        },
        None => app.set_status(format!("No link on this {what}")),
    }
}
