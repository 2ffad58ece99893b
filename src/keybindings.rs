//! Keybinding registry — maps actions to key events with config overrides.
//!
//! Replaces hardcoded key match arms with a data-driven registry that
//! supports user customization via config.toml.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    PageDown,
    PageUp,
    CycleFocus,
    OpenLink,
    ToggleCardTag,
    ChipPrev,
    ChipNext,
    ToggleChip,
    ShowAll,
    EnterTagPrompt,
    ToggleNav,
    CycleTheme,
    OpenCta,
}

impl Action {
    /// Human-readable description for the status hints.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::CycleFocus => "Cycle panel focus",
            Self::OpenLink => "Open card link in browser",
            Self::ToggleCardTag => "Toggle the card's category tag",
            Self::ChipPrev => "Previous filter chip",
            Self::ChipNext => "Next filter chip",
            Self::ToggleChip => "Toggle focused filter chip",
            Self::ShowAll => "Clear all filters",
            Self::EnterTagPrompt => "Filter by typed category",
            Self::ToggleNav => "Toggle navigation menu",
            Self::CycleTheme => "Cycle theme",
            Self::OpenCta => "Open call-to-action link",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context — determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Cards,
    Chips,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Space", "Backspace"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    // Handle Ctrl+ prefix
    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let rest = rest.trim();
        if rest.len() == 1 {
            let c = rest.chars().next()?;
            return Some(KeySpec::ctrl(c));
        }
        return None;
    }

    // Named keys (case-insensitive)
    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        _ => {}
    }

    // Single character
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::plain(KeyCode::Char(c))),
        _ => None,
    }
}

/// Format a KeySpec for display in status hints.
fn format_key(key: &KeySpec) -> String {
    let base = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        other => format!("{:?}", other),
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{}", base)
    } else {
        base
    }
}

// ============================================================================
// Registry
// ============================================================================

pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for hint enumeration
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Action::*;
        use Context::*;

        // Global
        self.bind(Global, KeySpec::plain(KeyCode::Char('q')), Quit);
        self.bind(Global, KeySpec::plain(KeyCode::Tab), CycleFocus);
        self.bind(Global, KeySpec::plain(KeyCode::Char('a')), ShowAll);
        self.bind(Global, KeySpec::plain(KeyCode::Char('/')), EnterTagPrompt);
        self.bind(Global, KeySpec::plain(KeyCode::Char('m')), ToggleNav);
        self.bind(Global, KeySpec::plain(KeyCode::Char('T')), CycleTheme);
        self.bind(Global, KeySpec::plain(KeyCode::Char('g')), OpenCta);

        // Card list
        self.bind(Cards, KeySpec::plain(KeyCode::Char('j')), NavDown);
        self.bind(Cards, KeySpec::plain(KeyCode::Down), NavDown);
        self.bind(Cards, KeySpec::plain(KeyCode::Char('k')), NavUp);
        self.bind(Cards, KeySpec::plain(KeyCode::Up), NavUp);
        self.bind(Cards, KeySpec::ctrl('d'), PageDown);
        self.bind(Cards, KeySpec::ctrl('u'), PageUp);
        self.bind(Cards, KeySpec::plain(KeyCode::Enter), OpenLink);
        self.bind(Cards, KeySpec::plain(KeyCode::Char('o')), OpenLink);
        self.bind(Cards, KeySpec::plain(KeyCode::Char('t')), ToggleCardTag);

        // Chip row
        self.bind(Chips, KeySpec::plain(KeyCode::Char('h')), ChipPrev);
        self.bind(Chips, KeySpec::plain(KeyCode::Left), ChipPrev);
        self.bind(Chips, KeySpec::plain(KeyCode::Char('l')), ChipNext);
        self.bind(Chips, KeySpec::plain(KeyCode::Right), ChipNext);
        self.bind(Chips, KeySpec::plain(KeyCode::Enter), ToggleChip);
        self.bind(Chips, KeySpec::plain(KeyCode::Char(' ')), ToggleChip);
    }

    /// Apply config overrides: each (action name, key string) pair rebinds
    /// the action in every context where it is currently bound.
    ///
    /// Returns human-readable warnings for entries that could not be applied.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let action = match parse_action_name(action_name) {
                Some(a) => a,
                None => {
                    warnings.push(format!("Unknown action '{}', ignoring", action_name));
                    continue;
                }
            };

            let key = match parse_key_string(key_str) {
                Some(k) => k,
                None => {
                    warnings.push(format!(
                        "Cannot parse key '{}' for action '{}', ignoring",
                        key_str, action_name
                    ));
                    continue;
                }
            };

            let contexts_for_action: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts_for_action {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global.
    /// Shifted characters arrive with the SHIFT modifier set, which would
    /// never match a plain binding, so SHIFT is stripped from char keys.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let modifiers = if matches!(code, KeyCode::Char(_)) {
            modifiers.difference(KeyModifiers::SHIFT)
        } else {
            modifiers
        };
        let key = KeySpec::new(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        if context != Context::Global {
            if let Some(&action) = self.lookup.get(&(Context::Global, key)) {
                return Some(action);
            }
        }

        None
    }

    /// Get the display key for an action, preferring the Global binding.
    pub fn key_hint(&self, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, _, a)| *a == action)
            .map(|(_, key, _)| format_key(key))
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" => Some(Action::NavDown),
        "nav_up" => Some(Action::NavUp),
        "page_down" => Some(Action::PageDown),
        "page_up" => Some(Action::PageUp),
        "cycle_focus" => Some(Action::CycleFocus),
        "open_link" => Some(Action::OpenLink),
        "toggle_card_tag" => Some(Action::ToggleCardTag),
        "chip_prev" => Some(Action::ChipPrev),
        "chip_next" => Some(Action::ChipNext),
        "toggle_chip" => Some(Action::ToggleChip),
        "show_all" => Some(Action::ShowAll),
        "tag_prompt" => Some(Action::EnterTagPrompt),
        "toggle_nav" => Some(Action::ToggleNav),
        "cycle_theme" => Some(Action::CycleTheme),
        "open_cta" => Some(Action::OpenCta),
        _ => None,
    }
}
