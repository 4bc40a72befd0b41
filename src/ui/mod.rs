pub mod ambient;
pub mod style;
pub mod widgets;

pub use ambient::{prefers_dark_from_settings, GtkAmbient};
pub use style::{install_theme_css, theme_css, ColorTokens, ROOT_CSS_CLASS};
pub use widgets::{theme_dropdown, WidgetMarker};
