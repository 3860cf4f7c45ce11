//! Visual themes and per-instance presentation state.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Inline-style snippets for one visual theme. The markdown engine folds
/// these into the HTML it emits, so exported documents carry their styling
/// with them.
#[derive(Debug, Clone)]
pub struct Theme {
    pub key: &'static str,
    /// Accent color used when no instance-level primary color is set.
    pub primary: &'static str,
    pub heading: &'static str,
    pub paragraph: &'static str,
    pub blockquote: &'static str,
    pub code_block: &'static str,
}

/// Key of the theme applied when the host expresses no preference.
pub const DEFAULT_THEME: &str = "grace-light";

static THEME_MAP: Lazy<HashMap<&'static str, Theme>> = Lazy::new(|| {
    let themes = [
        Theme {
            key: "grace-light",
            primary: "#0f4c81",
            heading: "font-weight:700;margin:1.2em 0 0.6em;color:#1a1a1a;",
            paragraph: "margin:0 0 1em;line-height:1.75;color:#3f3f3f;",
            blockquote: "border-left:3px solid #0f4c81;padding:0.1em 1em;color:#6a6a6a;background:#f7f9fb;",
            code_block: "background:#282c34;color:#abb2bf;border-radius:6px;padding:1em;overflow-x:auto;",
        },
        Theme {
            key: "classic",
            primary: "#a04f32",
            heading: "font-weight:600;margin:1.4em 0 0.7em;border-bottom:1px solid #e5d9cf;color:#2b2b2b;",
            paragraph: "margin:0 0 1.1em;line-height:1.8;color:#444;",
            blockquote: "border-left:4px solid #a04f32;padding:0.2em 1em;color:#7a6a5f;background:#faf6f2;",
            code_block: "background:#f6f2ee;color:#3b3b3b;border:1px solid #e5d9cf;border-radius:4px;padding:1em;overflow-x:auto;",
        },
        Theme {
            key: "plain",
            primary: "#333333",
            heading: "font-weight:700;margin:1em 0 0.5em;",
            paragraph: "margin:0 0 1em;line-height:1.6;",
            blockquote: "border-left:3px solid #ccc;padding:0.1em 1em;color:#666;",
            code_block: "background:#f5f5f5;border-radius:4px;padding:1em;overflow-x:auto;",
        },
    ];
    themes.into_iter().map(|t| (t.key, t)).collect()
});

/// Look up a theme by key. Unknown keys resolve to `None` and are never
/// applied anywhere.
pub fn theme(key: &str) -> Option<&'static Theme> {
    THEME_MAP.get(key)
}

/// The default theme, falling back to any available theme should the default
/// key ever be absent from the table.
pub fn default_theme() -> &'static Theme {
    THEME_MAP
        .get(DEFAULT_THEME)
        .unwrap_or_else(|| THEME_MAP.values().next().expect("theme table is never empty"))
}

/// Default typography used by freshly created instances and the process-wide
/// render cache.
pub const DEFAULT_FONT_FAMILY: &str = "-apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif";
pub const DEFAULT_FONT_SIZE: &str = "16px";

/// Per-instance presentation state, adjusted by the configuration
/// broadcaster and re-read on every render.
#[derive(Debug, Clone)]
pub struct ThemeSettings {
    pub theme: &'static str,
    pub font_family: String,
    pub font_size: String,
    pub primary_color: String,
    pub is_mac_code_block: bool,
    pub is_show_line_number: bool,
    pub is_count_status: bool,
    pub is_cite_status: bool,
    pub legend: bool,
    pub is_use_indent: bool,
    pub is_use_justify: bool,
    /// Derived highlight theme for code blocks; kept in sync by
    /// [`update_code_theme`](Self::update_code_theme).
    pub code_theme: &'static str,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        let mut settings = Self {
            theme: DEFAULT_THEME,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            primary_color: default_theme().primary.to_string(),
            is_mac_code_block: true,
            is_show_line_number: false,
            is_count_status: false,
            is_cite_status: false,
            legend: false,
            is_use_indent: false,
            is_use_justify: false,
            code_theme: "github",
        };
        settings.update_code_theme();
        settings
    }
}

impl ThemeSettings {
    /// The resolved theme for these settings.
    pub fn resolved_theme(&self) -> &'static Theme {
        theme(self.theme).unwrap_or_else(default_theme)
    }

    /// Recompute the derived code-block highlight theme. Mac-style code
    /// blocks render on a dark chrome, everything else stays light.
    pub fn update_code_theme(&mut self) {
        self.code_theme = if self.is_mac_code_block {
            "atom-one-dark"
        } else {
            "github"
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve_and_unknown_keys_do_not() {
        assert!(theme("grace-light").is_some());
        assert!(theme("classic").is_some());
        assert!(theme("plain").is_some());
        assert!(theme("midnight").is_none());
    }

    #[test]
    fn default_theme_matches_the_default_key() {
        assert_eq!(default_theme().key, DEFAULT_THEME);
    }

    #[test]
    fn code_theme_follows_the_mac_flag() {
        let mut settings = ThemeSettings::default();
        assert_eq!(settings.code_theme, "atom-one-dark");

        settings.is_mac_code_block = false;
        settings.update_code_theme();
        assert_eq!(settings.code_theme, "github");
    }
}
