use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::DropDown;

use crate::ambient::AmbientSource;
use crate::marker::RootMarker;
use crate::menu::{labels, ThemeMenuEntry};
use crate::state::ThemeBinding;
use crate::storage::PreferenceStore;

/// Root marker backed by a widget's CSS classes.
#[derive(Debug, Clone)]
pub struct WidgetMarker {
    widget: gtk4::Widget,
}

impl WidgetMarker {
    pub fn new(widget: &impl IsA<gtk4::Widget>) -> Self {
        Self {
            widget: widget.clone().upcast(),
        }
    }
}

impl RootMarker for WidgetMarker {
    fn add_marker(&mut self, name: &str) {
        self.widget.add_css_class(name);
    }

    fn remove_marker(&mut self, name: &str) {
        self.widget.remove_css_class(name);
    }
}

/// Light / Dark / System selector wired to a mounted resolver.
pub fn theme_dropdown<S, A, M>(binding: &ThemeBinding<S, A, M>) -> DropDown
where
    S: PreferenceStore + 'static,
    A: AmbientSource + 'static,
    M: RootMarker + 'static,
{
    let dropdown = DropDown::from_strings(&labels());
    dropdown.set_focus_on_click(false);
    dropdown.set_tooltip_text(Some("Theme"));
    dropdown.add_css_class("theme-toggle");
    dropdown.set_selected(ThemeMenuEntry::for_mode(binding.mode()).position());

    let resolver = Rc::downgrade(binding.resolver());
    dropdown.connect_selected_notify(move |dropdown| {
        let Some(entry) = ThemeMenuEntry::from_position(dropdown.selected()) else {
            return;
        };
        let Some(resolver) = resolver.upgrade() else {
            tracing::debug!("theme binding gone; ignoring menu selection");
            return;
        };
        let mut resolver = resolver.borrow_mut();
        entry.activate(&mut *resolver);
    });
    dropdown
}
