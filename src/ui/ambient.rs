use gtk4::glib::SignalHandlerId;
use gtk4::prelude::*;

use crate::ambient::{AmbientHandler, AmbientSource, Subscription};
use crate::theme::dark_from_theme_name;

const COLOR_SCHEME_PROPERTY: &str = "gtk-interface-color-scheme";
const THEME_NAME_PROPERTY: &str = "gtk-theme-name";
const PREFER_DARK_PROPERTY: &str = "gtk-application-prefer-dark-theme";

const WATCHED_PROPERTIES: [&str; 3] = [
    COLOR_SCHEME_PROPERTY,
    THEME_NAME_PROPERTY,
    PREFER_DARK_PROPERTY,
];

/// Desktop color preference as reported by `GtkSettings`.
#[derive(Debug, Clone)]
pub struct GtkAmbient {
    settings: Option<gtk4::Settings>,
    fallback_dark: bool,
}

impl GtkAmbient {
    /// Uses the default display's settings. Requires GTK to be initialized.
    pub fn for_default_display(fallback_dark: bool) -> Self {
        Self::with_settings(gtk4::Settings::default(), fallback_dark)
    }

    pub fn with_settings(settings: Option<gtk4::Settings>, fallback_dark: bool) -> Self {
        Self {
            settings,
            fallback_dark,
        }
    }
}

impl AmbientSource for GtkAmbient {
    fn prefers_dark(&self) -> bool {
        self.settings
            .as_ref()
            .and_then(prefers_dark_from_settings)
            .unwrap_or(self.fallback_dark)
    }

    fn subscribe(&self, handler: AmbientHandler) -> Subscription {
        let Some(settings) = self.settings.clone() else {
            tracing::warn!("no GTK settings available; desktop theme changes will not be tracked");
            return Subscription::detached();
        };
        let fallback_dark = self.fallback_dark;

        let handler_ids: Vec<SignalHandlerId> = WATCHED_PROPERTIES
            .iter()
            .copied()
            .filter(|name| has_property(&settings, name))
            .map(|name| {
                let handler = handler.clone();
                settings.connect_notify_local(Some(name), move |settings, _| {
                    let prefers_dark =
                        prefers_dark_from_settings(settings).unwrap_or(fallback_dark);
                    tracing::debug!(prefers_dark, "GTK settings reported a theme change");
                    handler(prefers_dark);
                })
            })
            .collect();
        tracing::debug!(watched = handler_ids.len(), "subscribed to GTK theme settings");

        Subscription::new(move || {
            for handler_id in handler_ids {
                settings.disconnect(handler_id);
            }
        })
    }
}

fn has_property(settings: &gtk4::Settings, name: &str) -> bool {
    settings
        .list_properties()
        .iter()
        .any(|prop| prop.name() == name)
}

pub fn prefers_dark_from_settings(settings: &gtk4::Settings) -> Option<bool> {
    if has_property(settings, COLOR_SCHEME_PROPERTY) {
        let color_scheme = settings.property_value(COLOR_SCHEME_PROPERTY);
        if let Ok(raw_scheme) = color_scheme.get::<i32>() {
            match raw_scheme {
                2 => return Some(true),
                3 => return Some(false),
                // default or unsupported; keep looking
                _ => {}
            }
        }
    }

    if let Some(theme_name) = settings.gtk_theme_name() {
        if let Some(dark) = dark_from_theme_name(theme_name.as_str()) {
            return Some(dark);
        }
    }

    #[allow(deprecated)]
    {
        Some(settings.is_gtk_application_prefer_dark_theme())
    }
}
