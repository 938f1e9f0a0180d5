//! Theme Manager for MDX Converter
//!
//! Holds the current theme preference and applies it to the egui context,
//! following the system preference when the theme is `System`.

use eframe::egui::{Context, Visuals};
use log::{debug, info};

use super::ThemeColors;
use crate::config::Theme;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Manager
// ─────────────────────────────────────────────────────────────────────────────

/// Manages theme state and applies themes to the egui context.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    /// Current theme setting (Light, Dark, or System)
    current_theme: Theme,
    /// Cached visuals for the current theme
    cached_visuals: Option<Visuals>,
    /// Whether the theme needs to be reapplied
    needs_apply: bool,
    /// Last detected system dark mode state (for System theme)
    last_system_dark_mode: Option<bool>,
}

impl ThemeManager {
    /// Create a new ThemeManager with the given initial theme.
    pub fn new(theme: Theme) -> Self {
        info!("ThemeManager initialized with theme: {:?}", theme);
        Self {
            current_theme: theme,
            cached_visuals: None,
            needs_apply: true,
            last_system_dark_mode: None,
        }
    }

    /// Set the theme and mark it for reapplication.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            info!("Theme changed from {:?} to {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.cached_visuals = None;
            self.needs_apply = true;
        }
    }

    /// Switch between Light and Dark. System switches to whichever mode is
    /// not currently showing.
    ///
    /// Returns the new theme.
    pub fn toggle(&mut self, ctx: &Context) -> Theme {
        let new_theme = if self.is_dark(ctx) {
            Theme::Light
        } else {
            Theme::Dark
        };
        self.set_theme(new_theme);
        new_theme
    }

    /// Apply the current theme to the egui context.
    pub fn apply(&mut self, ctx: &Context) {
        let visuals = self.get_or_create_visuals(ctx);
        ctx.set_visuals(visuals);
        self.needs_apply = false;
        debug!("Applied theme: {:?}", self.current_theme);
    }

    /// Apply the theme only if it changed, or if the system preference
    /// changed while following it. Returns `true` if the theme was applied.
    pub fn apply_if_needed(&mut self, ctx: &Context) -> bool {
        if self.current_theme == Theme::System {
            let current_system_dark = ctx.style().visuals.dark_mode;
            if self.last_system_dark_mode != Some(current_system_dark) {
                self.last_system_dark_mode = Some(current_system_dark);
                self.cached_visuals = None;
                self.needs_apply = true;
                debug!("System dark mode changed to: {}", current_system_dark);
            }
        }

        if self.needs_apply {
            self.apply(ctx);
            true
        } else {
            false
        }
    }

    fn get_or_create_visuals(&mut self, ctx: &Context) -> Visuals {
        if let Some(ref visuals) = self.cached_visuals {
            return visuals.clone();
        }

        if self.current_theme == Theme::System {
            self.last_system_dark_mode = Some(ctx.style().visuals.dark_mode);
        }
        let visuals = self.colors(ctx).to_visuals();

        self.cached_visuals = Some(visuals.clone());
        visuals
    }

    /// Palette for the effective theme.
    pub fn colors(&self, ctx: &Context) -> ThemeColors {
        ThemeColors::from_theme(self.current_theme, &ctx.style().visuals)
    }

    /// Whether the effective theme is dark.
    pub fn is_dark(&self, ctx: &Context) -> bool {
        match self.current_theme {
            Theme::Dark => true,
            Theme::Light => false,
            Theme::System => ctx.style().visuals.dark_mode,
        }
    }

    /// Icon for the theme toggle button: the mode a click switches to.
    pub fn toggle_icon(&self, ctx: &Context) -> &'static str {
        if self.is_dark(ctx) {
            "☀"
        } else {
            "🌙"
        }
    }

    /// Tooltip for the theme toggle button.
    pub fn toggle_tooltip(&self, ctx: &Context) -> &'static str {
        if self.is_dark(ctx) {
            "Switch to light theme (Ctrl+Shift+T)"
        } else {
            "Switch to dark theme (Ctrl+Shift+T)"
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_manager_new() {
        let manager = ThemeManager::new(Theme::Dark);
        assert_eq!(manager.current_theme, Theme::Dark);
        assert!(manager.needs_apply);
    }

    #[test]
    fn test_theme_manager_default_is_light() {
        assert_eq!(ThemeManager::default().current_theme, Theme::Light);
    }

    #[test]
    fn test_set_same_theme_is_noop() {
        let mut manager = ThemeManager::new(Theme::Light);
        manager.needs_apply = false;
        manager.set_theme(Theme::Light);
        assert!(!manager.needs_apply);
    }

    #[test]
    fn test_toggle_between_light_and_dark() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Light);

        assert_eq!(manager.toggle(&ctx), Theme::Dark);
        assert_eq!(manager.current_theme, Theme::Dark);
        assert_eq!(manager.toggle(&ctx), Theme::Light);
    }

    #[test]
    fn test_toggle_from_system_flips_effective_mode() {
        let ctx = Context::default();
        ctx.set_visuals(Visuals::dark());
        let mut manager = ThemeManager::new(Theme::System);
        assert_eq!(manager.toggle(&ctx), Theme::Light);

        ctx.set_visuals(Visuals::light());
        let mut manager = ThemeManager::new(Theme::System);
        assert_eq!(manager.toggle(&ctx), Theme::Dark);
    }

    #[test]
    fn test_apply_sets_visuals() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Dark);

        assert!(manager.apply_if_needed(&ctx));
        assert!(ctx.style().visuals.dark_mode);
        assert!(!manager.apply_if_needed(&ctx));

        manager.set_theme(Theme::Light);
        assert!(manager.apply_if_needed(&ctx));
        assert!(!ctx.style().visuals.dark_mode);
    }

    #[test]
    fn test_toggle_icon_shows_target_mode() {
        let ctx = Context::default();
        assert_eq!(ThemeManager::new(Theme::Light).toggle_icon(&ctx), "🌙");
        assert_eq!(ThemeManager::new(Theme::Dark).toggle_icon(&ctx), "☀");
    }
}
