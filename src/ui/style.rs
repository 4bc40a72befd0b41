use gtk4::CssProvider;

pub const ROOT_CSS_CLASS: &str = "modeswitch-root";

/// Palette for one appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTokens {
    pub window_background: &'static str,
    pub panel_background: &'static str,
    pub border_color: &'static str,
    pub text_color: &'static str,
    pub muted_text_color: &'static str,
}

pub const LIGHT_COLORS: ColorTokens = ColorTokens {
    window_background: "#FAFAFA",
    panel_background: "#FFFFFF",
    border_color: "rgba(24, 24, 27, 0.12)",
    text_color: "#18181B",
    muted_text_color: "#52525B",
};

pub const DARK_COLORS: ColorTokens = ColorTokens {
    window_background: "#09090B",
    panel_background: "#18181B",
    border_color: "rgba(250, 250, 250, 0.12)",
    text_color: "#FAFAFA",
    muted_text_color: "#A1A1AA",
};

/// Light rules on the root class, dark rules on the root class plus `marker`.
pub fn theme_css(marker: &str, light: &ColorTokens, dark: &ColorTokens) -> String {
    let mut css = String::new();
    push_rules(&mut css, &format!("window.{ROOT_CSS_CLASS}"), light);
    push_rules(&mut css, &format!("window.{ROOT_CSS_CLASS}.{marker}"), dark);
    css
}

fn push_rules(css: &mut String, selector: &str, colors: &ColorTokens) {
    css.push_str(&format!(
        "
{selector} {{
  background: {window_background};
  color: {text_color};
}}
{selector} .theme-panel {{
  background: {panel_background};
  border: 1px solid {border_color};
  border-radius: 12px;
  padding: 16px;
}}
{selector} .theme-caption {{
  color: {muted_text_color};
}}
",
        window_background = colors.window_background,
        panel_background = colors.panel_background,
        border_color = colors.border_color,
        text_color = colors.text_color,
        muted_text_color = colors.muted_text_color,
    ));
}

pub fn install_theme_css(marker: &str) {
    let provider = CssProvider::new();
    provider.load_from_data(&theme_css(marker, &LIGHT_COLORS, &DARK_COLORS));
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        tracing::warn!("no display available; theme stylesheet not installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_css_keys_dark_rules_on_marker() {
        let css = theme_css("dark", &LIGHT_COLORS, &DARK_COLORS);
        assert!(css.contains("window.modeswitch-root {"));
        assert!(css.contains("window.modeswitch-root.dark {"));
        assert!(css.contains("window.modeswitch-root.dark .theme-panel {"));
        assert!(css.contains(DARK_COLORS.window_background));
        assert!(css.contains(LIGHT_COLORS.window_background));
    }

    #[test]
    fn theme_css_uses_configured_marker() {
        let css = theme_css("night", &LIGHT_COLORS, &DARK_COLORS);
        assert!(css.contains("window.modeswitch-root.night {"));
        assert!(!css.contains(".dark"));
    }

    #[test]
    fn palettes_differ_between_modes() {
        assert_ne!(LIGHT_COLORS, DARK_COLORS);
    }
}
