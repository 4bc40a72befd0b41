use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker added to the root rendering context while dark appearance is active.
pub const DARK_MARKER: &str = "dark";

/// User-facing theme selection. `System` is the absence of an explicit choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

/// A theme choice the user actively made. Only these are ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplicitMode {
    Light,
    Dark,
}

/// Stored preference; `None` means "defer to ambient".
pub type ThemePreference = Option<ExplicitMode>;

/// Final appearance the interface renders against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedMode {
    pub is_dark: bool,
}

impl ExplicitMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ExplicitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme mode: {0:?}")]
pub struct UnknownModeError(pub String);

impl FromStr for ExplicitMode {
    type Err = UnknownModeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownModeError(raw.to_string())),
        }
    }
}

impl ThemeMode {
    pub const fn explicit(self) -> ThemePreference {
        match self {
            Self::System => None,
            Self::Light => Some(ExplicitMode::Light),
            Self::Dark => Some(ExplicitMode::Dark),
        }
    }
}

impl From<ThemePreference> for ThemeMode {
    fn from(preference: ThemePreference) -> Self {
        match preference {
            None => Self::System,
            Some(ExplicitMode::Light) => Self::Light,
            Some(ExplicitMode::Dark) => Self::Dark,
        }
    }
}

impl From<ExplicitMode> for ThemeMode {
    fn from(mode: ExplicitMode) -> Self {
        Self::from(Some(mode))
    }
}

impl ResolvedMode {
    pub const LIGHT: Self = Self { is_dark: false };
    pub const DARK: Self = Self { is_dark: true };
}

/// Explicit preference wins; otherwise the ambient signal decides.
pub fn resolve(preference: ThemePreference, ambient_dark: bool) -> ResolvedMode {
    let is_dark = match preference {
        Some(mode) => mode.is_dark(),
        None => ambient_dark,
    };
    ResolvedMode { is_dark }
}

/// Guess the appearance from a desktop theme name such as `Adwaita-dark`.
pub fn dark_from_theme_name(theme_name: &str) -> Option<bool> {
    let normalized = theme_name.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    if normalized.contains("dark") {
        return Some(true);
    }
    if normalized.contains("light") {
        return Some(false);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_explicit_over_ambient() {
        assert_eq!(resolve(Some(ExplicitMode::Dark), false), ResolvedMode::DARK);
        assert_eq!(resolve(Some(ExplicitMode::Light), true), ResolvedMode::LIGHT);
    }

    #[test]
    fn resolve_follows_ambient_without_preference() {
        assert_eq!(resolve(None, true), ResolvedMode::DARK);
        assert_eq!(resolve(None, false), ResolvedMode::LIGHT);
    }

    #[test]
    fn explicit_mode_parses_stored_values() {
        assert_eq!("dark".parse::<ExplicitMode>(), Ok(ExplicitMode::Dark));
        assert_eq!(" Light ".parse::<ExplicitMode>(), Ok(ExplicitMode::Light));
        assert!("system".parse::<ExplicitMode>().is_err());
        assert!("".parse::<ExplicitMode>().is_err());
    }

    #[test]
    fn theme_mode_round_trips_through_preference() {
        for mode in [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from(mode.explicit()), mode);
        }
    }

    #[test]
    fn theme_mode_serializes_lowercase() {
        let json = serde_json::to_string(&ThemeMode::System).unwrap();
        assert_eq!(json, "\"system\"");
        let mode: ThemeMode = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(mode, ThemeMode::Dark);
    }

    #[test]
    fn dark_from_theme_name_detects_suffixes() {
        assert_eq!(dark_from_theme_name("Adwaita-dark"), Some(true));
        assert_eq!(dark_from_theme_name("Breeze-Light"), Some(false));
        assert_eq!(dark_from_theme_name("Adwaita"), None);
        assert_eq!(dark_from_theme_name("   "), None);
    }
}
