use std::cell::RefCell;
use std::rc::Rc;

use crate::ambient::{AmbientHandler, AmbientSource, Subscription};
use crate::marker::RootMarker;
use crate::storage::PreferenceStore;
use crate::theme::{ResolvedMode, ThemeMode};

use super::resolver::ThemeResolver;

pub type SharedResolver<S, A, M> = Rc<RefCell<ThemeResolver<S, A, M>>>;

/// A mounted resolver: initialized once, then tracking ambient changes until
/// unmounted or dropped.
pub struct ThemeBinding<S, A, M> {
    resolver: SharedResolver<S, A, M>,
    subscription: Option<Subscription>,
}

impl<S, A, M> ThemeBinding<S, A, M>
where
    S: PreferenceStore + 'static,
    A: AmbientSource + 'static,
    M: RootMarker + 'static,
{
    pub fn mount(resolver: ThemeResolver<S, A, M>) -> Self {
        let resolver = Rc::new(RefCell::new(resolver));
        resolver.borrow_mut().initialize();

        let weak = Rc::downgrade(&resolver);
        let handler: AmbientHandler = Rc::new(move |is_dark| {
            let Some(resolver) = weak.upgrade() else {
                tracing::debug!("theme resolver dropped; ignoring ambient change");
                return;
            };
            // A busy resolver re-queries ambient itself where it matters.
            match resolver.try_borrow_mut() {
                Ok(mut resolver) => {
                    resolver.on_ambient_change(is_dark);
                }
                Err(_) => {
                    tracing::debug!(is_dark, "theme resolver busy; skipping ambient change");
                }
            };
        });
        let subscription = resolver.borrow().ambient().subscribe(handler);
        tracing::debug!("theme binding mounted");

        Self {
            resolver,
            subscription: Some(subscription),
        }
    }

    pub fn resolver(&self) -> &SharedResolver<S, A, M> {
        &self.resolver
    }

    pub fn select(&self, mode: ThemeMode) -> ResolvedMode {
        self.resolver.borrow_mut().select(mode)
    }

    pub fn mode(&self) -> ThemeMode {
        self.resolver.borrow().mode()
    }

    pub fn resolved(&self) -> ResolvedMode {
        self.resolver.borrow().resolved()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            tracing::debug!("theme binding unmounted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambient::ManualAmbient;
    use crate::marker::MarkerSet;
    use crate::storage::{MemoryStore, DEFAULT_PREFERENCE_KEY};

    type TestBinding = ThemeBinding<MemoryStore, ManualAmbient, MarkerSet>;

    fn mount(stored: Option<&str>, ambient: &ManualAmbient) -> TestBinding {
        let store = match stored {
            Some(value) => MemoryStore::with_entry(DEFAULT_PREFERENCE_KEY, value),
            None => MemoryStore::new(),
        };
        ThemeBinding::mount(ThemeResolver::new(store, ambient.clone(), MarkerSet::new()))
    }

    #[test]
    fn mount_initializes_before_subscribing() {
        let ambient = ManualAmbient::new(true);
        let binding = mount(None, &ambient);

        assert!(binding.resolved().is_dark);
        assert!(binding.is_mounted());
        assert_eq!(ambient.subscriber_count(), 1);
    }

    #[test]
    fn ambient_changes_flow_through_in_system_mode() {
        let ambient = ManualAmbient::new(false);
        let binding = mount(None, &ambient);

        ambient.set_prefers_dark(true);
        assert!(binding.resolved().is_dark);
        assert!(binding.resolver().borrow().marker().contains("dark"));

        ambient.set_prefers_dark(false);
        assert!(!binding.resolved().is_dark);
        assert!(!binding.resolver().borrow().marker().contains("dark"));
    }

    #[test]
    fn explicit_selection_blocks_ambient_until_system() {
        let ambient = ManualAmbient::new(false);
        let binding = mount(None, &ambient);

        binding.select(ThemeMode::Dark);
        ambient.set_prefers_dark(true);
        ambient.set_prefers_dark(false);
        assert!(binding.resolved().is_dark);

        binding.select(ThemeMode::System);
        assert!(!binding.resolved().is_dark);
        ambient.set_prefers_dark(true);
        assert!(binding.resolved().is_dark);
    }

    #[test]
    fn ambient_change_while_resolver_busy_is_skipped() {
        let ambient = ManualAmbient::new(false);
        let binding = mount(Some("light"), &ambient);

        {
            let _busy = binding.resolver().borrow_mut();
            ambient.set_prefers_dark(true);
        }
        assert!(!binding.resolved().is_dark);

        assert!(binding.select(ThemeMode::System).is_dark);
        assert!(binding.resolver().borrow().marker().contains("dark"));
    }

    #[test]
    fn unmount_releases_subscription() {
        let ambient = ManualAmbient::new(false);
        let mut binding = mount(None, &ambient);

        binding.unmount();
        binding.unmount();
        assert!(!binding.is_mounted());
        assert_eq!(ambient.subscriber_count(), 0);

        ambient.set_prefers_dark(true);
        assert!(!binding.resolved().is_dark);
    }

    #[test]
    fn dropping_binding_releases_subscription() {
        let ambient = ManualAmbient::new(false);
        let binding = mount(Some("light"), &ambient);
        assert_eq!(binding.mode(), ThemeMode::Light);

        drop(binding);
        assert_eq!(ambient.subscriber_count(), 0);
        ambient.set_prefers_dark(true);
    }
}
