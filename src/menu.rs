use crate::ambient::AmbientSource;
use crate::marker::RootMarker;
use crate::state::ThemeResolver;
use crate::storage::PreferenceStore;
use crate::theme::{ExplicitMode, ResolvedMode, ThemeMode};

/// The three entries of the theme menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeMenuEntry {
    Light,
    Dark,
    System,
}

impl ThemeMenuEntry {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }

    pub const fn mode(self) -> ThemeMode {
        match self {
            Self::Light => ThemeMode::Light,
            Self::Dark => ThemeMode::Dark,
            Self::System => ThemeMode::System,
        }
    }

    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::Light,
            ThemeMode::Dark => Self::Dark,
            ThemeMode::System => Self::System,
        }
    }

    pub fn position(self) -> u32 {
        match self {
            Self::Light => 0,
            Self::Dark => 1,
            Self::System => 2,
        }
    }

    pub fn from_position(position: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(position).ok()?).copied()
    }

    pub fn activate<S, A, M>(self, resolver: &mut ThemeResolver<S, A, M>) -> ResolvedMode
    where
        S: PreferenceStore,
        A: AmbientSource,
        M: RootMarker,
    {
        tracing::debug!(entry = self.label(), "theme menu entry activated");
        match self {
            Self::Light => resolver.set_explicit(ExplicitMode::Light),
            Self::Dark => resolver.set_explicit(ExplicitMode::Dark),
            Self::System => resolver.set_system(),
        }
    }
}

pub fn labels() -> [&'static str; 3] {
    ThemeMenuEntry::ALL.map(ThemeMenuEntry::label)
}
