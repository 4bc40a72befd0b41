use std::collections::BTreeSet;

/// Top-level rendering context that style rules key on.
pub trait RootMarker {
    fn add_marker(&mut self, name: &str);
    fn remove_marker(&mut self, name: &str);
}

/// Marker set kept in memory, for headless hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    markers: BTreeSet<String>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.markers.contains(name)
    }
}

impl RootMarker for MarkerSet {
    fn add_marker(&mut self, name: &str) {
        self.markers.insert(name.to_string());
    }

    fn remove_marker(&mut self, name: &str) {
        self.markers.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_set_add_and_remove_are_idempotent() {
        let mut markers = MarkerSet::new();
        markers.add_marker("dark");
        markers.add_marker("dark");
        assert!(markers.contains("dark"));
        markers.add_marker("night");
        markers.remove_marker("night");
        assert!(!markers.contains("night"));

        markers.remove_marker("dark");
        markers.remove_marker("dark");
        assert!(!markers.contains("dark"));
    }
}
