use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Receives the new ambient value whenever the environment reports a change.
pub type AmbientHandler = Rc<dyn Fn(bool)>;

/// The environment's own light/dark signal.
pub trait AmbientSource {
    fn prefers_dark(&self) -> bool;
    fn subscribe(&self, handler: AmbientHandler) -> Subscription;
}

/// Releases an ambient subscription when dropped.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Ambient source driven by the host; clones share state.
#[derive(Clone, Default)]
pub struct ManualAmbient {
    inner: Rc<RefCell<ManualAmbientInner>>,
}

#[derive(Default)]
struct ManualAmbientInner {
    prefers_dark: bool,
    next_id: u64,
    handlers: Vec<(u64, AmbientHandler)>,
}

impl ManualAmbient {
    pub fn new(prefers_dark: bool) -> Self {
        let ambient = Self::default();
        ambient.inner.borrow_mut().prefers_dark = prefers_dark;
        ambient
    }

    /// Updates the value and notifies subscribers if it changed.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let handlers: Vec<AmbientHandler> = {
            let mut inner = self.inner.borrow_mut();
            if inner.prefers_dark == prefers_dark {
                return;
            }
            inner.prefers_dark = prefers_dark;
            inner
                .handlers
                .iter()
                .map(|(_, handler)| handler.clone())
                .collect()
        };
        tracing::debug!(prefers_dark, subscribers = handlers.len(), "ambient preference changed");
        for handler in handlers {
            handler(prefers_dark);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

impl AmbientSource for ManualAmbient {
    fn prefers_dark(&self) -> bool {
        self.inner.borrow().prefers_dark
    }

    fn subscribe(&self, handler: AmbientHandler) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.handlers.push((id, handler));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().handlers.retain(|(other, _)| *other != id);
            }
        })
    }
}

impl fmt::Debug for ManualAmbient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualAmbient")
            .field("prefers_dark", &self.prefers_dark())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
