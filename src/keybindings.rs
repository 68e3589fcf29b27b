//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Dispatch is data-driven so every binding can be changed from the
//! `[keybindings]` table in config.toml.
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
    NavTop,
    NavBottom,
    OpenEssay,
    CloseDetail,
    EnterSearch,
    ExitSearch,
    CommitSearch,
    NextCategory,
    PrevCategory,
    AllCategories,
    RandomEssay,
    ToggleTheme,
    OpenSource,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Next essay",
            Self::NavUp => "Previous essay",
            Self::NavTop => "First essay",
            Self::NavBottom => "Last essay",
            Self::OpenEssay => "Open essay",
            Self::CloseDetail => "Close essay",
            Self::EnterSearch => "Focus search box",
            Self::ExitSearch => "Leave search box",
            Self::CommitSearch => "Search now",
            Self::NextCategory => "Next category",
            Self::PrevCategory => "Previous category",
            Self::AllCategories => "Show all categories",
            Self::RandomEssay => "Random essay",
            Self::ToggleTheme => "Toggle dark/light mode",
            Self::OpenSource => "Open original in browser",
            Self::ScrollDown => "Scroll down one line",
            Self::ScrollUp => "Scroll up one line",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    List,
    Detail,
    Search,
}

impl Context {
    pub fn name(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::List => "Essay list",
            Self::Detail => "Essay view",
            Self::Search => "Search box",
        }
    }
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

    /// Terminals report `R` as `Char('R')` + SHIFT and Shift+Tab as
    /// `BackTab` + SHIFT; the character already carries the shift.
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) | KeyCode::BackTab => {
                Self::new(self.code, self.modifiers.difference(KeyModifiers::SHIFT))
            }
            _ => self,
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "BackTab", "Up", "Down", "Home", "End"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    // Named keys (case-insensitive)
    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" | "shift+tab" => Some(KeyCode::BackTab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    // Function keys
    if let Some(num) = s.strip_prefix(['F', 'f']) {
        if let Ok(n) = num.parse::<u8>() {
            return (1..=12).contains(&n).then(|| KeySpec::plain(KeyCode::F(n)));
        }
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::plain(KeyCode::Char(c))),
        _ => None,
    }
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// that miss the specific context fall back to Global.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen.
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
        let plain = |c: char| KeySpec::plain(KeyCode::Char(c));

        // === Global ===
        self.bind(Global, plain('q'), Quit);
        self.bind(Global, KeySpec::ctrl('c'), Quit);
        self.bind(Global, plain('/'), EnterSearch);
        self.bind(Global, plain('r'), RandomEssay);
        self.bind(Global, plain('t'), ToggleTheme);
        self.bind(Global, plain('?'), ShowHelp);
        self.bind(Global, KeySpec::plain(KeyCode::Tab), NextCategory);
        self.bind(Global, plain('l'), NextCategory);
        self.bind(Global, KeySpec::plain(KeyCode::BackTab), PrevCategory);
        self.bind(Global, plain('h'), PrevCategory);
        self.bind(Global, plain('a'), AllCategories);

        // === Essay list ===
        self.bind(List, plain('j'), NavDown);
        self.bind(List, KeySpec::plain(KeyCode::Down), NavDown);
        self.bind(List, plain('k'), NavUp);
        self.bind(List, KeySpec::plain(KeyCode::Up), NavUp);
        self.bind(List, plain('g'), NavTop);
        self.bind(List, KeySpec::plain(KeyCode::Home), NavTop);
        self.bind(List, plain('G'), NavBottom);
        self.bind(List, KeySpec::plain(KeyCode::End), NavBottom);
        self.bind(List, KeySpec::plain(KeyCode::Enter), OpenEssay);
        self.bind(List, plain('o'), OpenSource);

        // === Essay view ===
        self.bind(Detail, KeySpec::plain(KeyCode::Esc), CloseDetail);
        self.bind(Detail, plain('b'), CloseDetail);
        self.bind(Detail, plain('j'), ScrollDown);
        self.bind(Detail, KeySpec::plain(KeyCode::Down), ScrollDown);
        self.bind(Detail, plain('k'), ScrollUp);
        self.bind(Detail, KeySpec::plain(KeyCode::Up), ScrollUp);
        self.bind(Detail, KeySpec::ctrl('d'), PageDown);
        self.bind(Detail, KeySpec::plain(KeyCode::PageDown), PageDown);
        self.bind(Detail, plain(' '), PageDown);
        self.bind(Detail, KeySpec::ctrl('u'), PageUp);
        self.bind(Detail, KeySpec::plain(KeyCode::PageUp), PageUp);
        self.bind(Detail, plain('o'), OpenSource);

        // === Search box ===
        self.bind(Search, KeySpec::plain(KeyCode::Esc), ExitSearch);
        self.bind(Search, KeySpec::plain(KeyCode::Enter), CommitSearch);
        self.bind(Search, KeySpec::ctrl('c'), Quit);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "nav_down").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        // Sorted so repeated runs apply overrides in the same order.
        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort();

        for (action_name, key_str) in entries {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
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

    /// Look up the action for a key in a context, falling back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();

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

    /// Look up the action bound in exactly `context`, with no Global fallback.
    ///
    /// The search box uses this so printable keys reach the query.
    pub fn action_in_context(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();
        self.lookup.get(&(context, key)).copied()
    }

    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }

    /// Display string of the first key bound to `action`, for hints.
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
        "nav_down" | "navdown" | "down" => Some(Action::NavDown),
        "nav_up" | "navup" | "up" => Some(Action::NavUp),
        "nav_top" | "navtop" | "top" => Some(Action::NavTop),
        "nav_bottom" | "navbottom" | "bottom" => Some(Action::NavBottom),
        "open_essay" | "openessay" | "open" => Some(Action::OpenEssay),
        "close_detail" | "closedetail" | "close" => Some(Action::CloseDetail),
        "enter_search" | "entersearch" | "search" => Some(Action::EnterSearch),
        "exit_search" | "exitsearch" => Some(Action::ExitSearch),
        "commit_search" | "commitsearch" => Some(Action::CommitSearch),
        "next_category" | "nextcategory" => Some(Action::NextCategory),
        "prev_category" | "prevcategory" => Some(Action::PrevCategory),
        "all_categories" | "allcategories" | "all" => Some(Action::AllCategories),
        "random_essay" | "randomessay" | "random" => Some(Action::RandomEssay),
        "toggle_theme" | "toggletheme" | "theme" => Some(Action::ToggleTheme),
        "open_source" | "opensource" | "browser" => Some(Action::OpenSource),
        "scroll_down" | "scrolldown" => Some(Action::ScrollDown),
        "scroll_up" | "scrollup" => Some(Action::ScrollUp),
        "page_down" | "pagedown" => Some(Action::PageDown),
        "page_up" | "pageup" => Some(Action::PageUp),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
