use crate::ambient::AmbientSource;
use crate::marker::RootMarker;
use crate::storage::{PreferenceStore, DEFAULT_PREFERENCE_KEY};
use crate::theme::{resolve, ExplicitMode, ResolvedMode, ThemeMode, ThemePreference, DARK_MARKER};

/// Decides light or dark appearance and keeps the root marker in sync.
///
/// Store failures never surface: a preference that cannot be read is treated
/// as absent, and a preference that cannot be written still takes effect for
/// the running session.
#[derive(Debug)]
pub struct ThemeResolver<S, A, M> {
    store: S,
    ambient: A,
    marker: M,
    key: String,
    marker_name: String,
    current: ThemePreference,
    resolved: ResolvedMode,
}

impl<S, A, M> ThemeResolver<S, A, M>
where
    S: PreferenceStore,
    A: AmbientSource,
    M: RootMarker,
{
    pub fn new(store: S, ambient: A, marker: M) -> Self {
        Self {
            store,
            ambient,
            marker,
            key: DEFAULT_PREFERENCE_KEY.to_string(),
            marker_name: DARK_MARKER.to_string(),
            current: None,
            resolved: ResolvedMode::default(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_marker_name(mut self, name: impl Into<String>) -> Self {
        self.marker_name = name.into();
        self
    }

    pub fn initialize(&mut self) -> ResolvedMode {
        self.current = self.read_preference();
        let ambient_dark = self.ambient.prefers_dark();
        tracing::info!(
            mode = ?ThemeMode::from(self.current),
            ambient_dark,
            "initializing theme"
        );
        self.commit(ambient_dark)
    }

    pub fn set_explicit(&mut self, mode: ExplicitMode) -> ResolvedMode {
        if let Err(err) = self.store.set(&self.key, mode.as_str()) {
            tracing::warn!(?err, key = %self.key, %mode, "failed to persist theme preference");
        }
        self.current = Some(mode);
        self.commit(mode.is_dark())
    }

    pub fn set_system(&mut self) -> ResolvedMode {
        if let Err(err) = self.store.remove(&self.key) {
            tracing::warn!(?err, key = %self.key, "failed to clear theme preference");
        }
        self.current = None;
        let ambient_dark = self.ambient.prefers_dark();
        self.commit(ambient_dark)
    }

    pub fn select(&mut self, mode: ThemeMode) -> ResolvedMode {
        match mode.explicit() {
            Some(explicit) => self.set_explicit(explicit),
            None => self.set_system(),
        }
    }

    /// Ambient notifications only count while no explicit preference is active.
    pub fn on_ambient_change(&mut self, is_dark: bool) -> ResolvedMode {
        if let Some(explicit) = self.current {
            tracing::debug!(%explicit, ambient_dark = is_dark, "explicit theme active; ignoring ambient change");
            return self.resolved;
        }
        self.commit(is_dark)
    }

    pub fn preference(&self) -> ThemePreference {
        self.current
    }

    pub fn mode(&self) -> ThemeMode {
        ThemeMode::from(self.current)
    }

    pub fn resolved(&self) -> ResolvedMode {
        self.resolved
    }

    pub fn is_dark(&self) -> bool {
        self.resolved.is_dark
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ambient(&self) -> &A {
        &self.ambient
    }

    pub fn marker(&self) -> &M {
        &self.marker
    }

    fn read_preference(&self) -> ThemePreference {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(?err, key = %self.key, "failed to read theme preference; following ambient");
                return None;
            }
        };
        if raw.trim().eq_ignore_ascii_case("system") {
            return None;
        }
        raw.parse::<ExplicitMode>()
            .map_err(|err| {
                tracing::warn!(%err, key = %self.key, "ignoring stored theme preference");
            })
            .ok()
    }

    fn commit(&mut self, ambient_dark: bool) -> ResolvedMode {
        let resolved = resolve(self.current, ambient_dark);
        if resolved != self.resolved {
            tracing::info!(
                mode = ?ThemeMode::from(self.current),
                is_dark = resolved.is_dark,
                "resolved theme changed"
            );
        }
        self.resolved = resolved;
        self.apply_marker();
        resolved
    }

    fn apply_marker(&mut self) {
        if self.resolved.is_dark {
            self.marker.add_marker(&self.marker_name);
        } else {
            self.marker.remove_marker(&self.marker_name);
        }
    }
}
