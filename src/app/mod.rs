use std::cell::RefCell;

use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, Label, Orientation};

use crate::config::{load_app_config, AppConfig};
use crate::error::{AppError, AppResult};
use crate::state::{ThemeBinding, ThemeResolver};
use crate::storage::{JsonFileStore, MemoryStore, PreferenceStore};
use crate::ui::{install_theme_css, theme_dropdown, GtkAmbient, WidgetMarker, ROOT_CSS_CLASS};

const APPLICATION_ID: &str = "io.github.modeswitch";

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(load_app_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn start(&self) -> AppResult<()> {
        gtk4::init()?;
        tracing::info!(
            storage_key = self.config.storage_key(),
            marker = self.config.marker(),
            fallback_dark = self.config.fallback_dark(),
            "loaded app config"
        );

        let application = Application::builder()
            .application_id(APPLICATION_ID)
            .build();
        let config = self.config.clone();
        application.connect_activate(move |app| build_window(app, &config));

        let exit_code = application.run_with_args::<&str>(&[]);
        if exit_code != gtk4::glib::ExitCode::SUCCESS {
            return Err(AppError::Exit);
        }
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Falls back to an in-memory store so theme selection still works for the session.
fn open_preference_store() -> Box<dyn PreferenceStore> {
    match JsonFileStore::with_default_path() {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "using theme preference file");
            Box::new(store)
        }
        Err(err) => {
            tracing::warn!(?err, "theme preference will not persist across sessions");
            Box::new(MemoryStore::new())
        }
    }
}

fn build_window(app: &Application, config: &AppConfig) {
    install_theme_css(config.marker());

    let window = ApplicationWindow::new(app);
    window.add_css_class(ROOT_CSS_CLASS);
    window.set_title(Some("Appearance"));
    window.set_default_size(420, 240);

    let resolver = ThemeResolver::new(
        open_preference_store(),
        GtkAmbient::for_default_display(config.fallback_dark()),
        WidgetMarker::new(&window),
    )
    .with_key(config.storage_key())
    .with_marker_name(config.marker());
    let binding = ThemeBinding::mount(resolver);

    let panel = gtk4::Box::new(Orientation::Vertical, 12);
    panel.add_css_class("theme-panel");
    panel.set_margin_top(24);
    panel.set_margin_bottom(24);
    panel.set_margin_start(24);
    panel.set_margin_end(24);

    let title = Label::new(Some("Theme"));
    title.set_xalign(0.0);
    let caption = Label::new(Some("System follows your desktop appearance."));
    caption.add_css_class("theme-caption");
    caption.set_xalign(0.0);

    panel.append(&title);
    panel.append(&caption);
    panel.append(&theme_dropdown(&binding));
    window.set_child(Some(&panel));

    // Dropping the binding on destroy breaks the window -> binding -> marker cycle.
    let binding = RefCell::new(Some(binding));
    window.connect_destroy(move |_| {
        if let Some(mut binding) = binding.borrow_mut().take() {
            binding.unmount();
        }
    });

    window.present();
}
