//! Target registry for O(1) ID-based lookups

use std::sync::RwLock;

use rustc_hash::FxHashMap;

use crate::target::TargetRef;

/// Registry mapping string IDs to targets
///
/// Each section owns its own registry; there is no process-wide registry of
/// targets. The registry is cleared when its section unmounts.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    /// String ID → target mapping
    ids: RwLock<FxHashMap<String, TargetRef>>,
}

impl ElementRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target under an ID
    ///
    /// If the ID already exists, the old mapping is replaced (last-wins).
    /// In debug builds, a warning is logged for duplicate IDs.
    pub fn register(&self, id: impl Into<String>, target: TargetRef) {
        let id = id.into();

        #[cfg(debug_assertions)]
        {
            if let Ok(ids) = self.ids.read() {
                if ids.contains_key(&id) {
                    tracing::warn!("Duplicate element ID registered: {}", id);
                }
            }
        }

        if let Ok(mut ids) = self.ids.write() {
            ids.insert(id, target);
        }
    }

    /// Look up a target by string ID
    pub fn get(&self, id: &str) -> Option<TargetRef> {
        self.ids.read().ok()?.get(id).cloned()
    }

    /// Check if an ID is registered
    pub fn contains(&self, id: &str) -> bool {
        self.ids.read().ok().is_some_and(|ids| ids.contains_key(id))
    }

    /// Get the number of registered IDs
    pub fn len(&self) -> usize {
        self.ids.read().ok().map(|ids| ids.len()).unwrap_or(0)
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a specific registration
    pub fn unregister(&self, id: &str) {
        if let Ok(mut ids) = self.ids.write() {
            ids.remove(id);
        }
    }

    /// Clear all registrations
    pub fn clear(&self) {
        if let Ok(mut ids) = self.ids.write() {
            ids.clear();
        }
    }

    /// Get all registered IDs (for debugging)
    pub fn all_ids(&self) -> Vec<String> {
        self.ids
            .read()
            .ok()
            .map(|ids| ids.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let registry = ElementRegistry::new();
        let target = TargetRef::new().with_id("hero");

        registry.register("hero", target);

        assert!(registry.get("hero").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let registry = ElementRegistry::new();
        let first = TargetRef::new().with_id("first");
        let second = TargetRef::new().with_id("second");

        registry.register("same-id", first);
        registry.register("same-id", second);

        assert_eq!(registry.len(), 1);
        let resolved = registry.get("same-id").unwrap();
        assert_eq!(resolved.id(), Some("second".to_string()));
    }

    #[test]
    fn test_clear() {
        let registry = ElementRegistry::new();
        registry.register("a", TargetRef::new());
        registry.register("b", TargetRef::new());
        assert_eq!(registry.len(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister() {
        let registry = ElementRegistry::new();
        registry.register("a", TargetRef::new());
        registry.unregister("a");
        assert!(!registry.contains("a"));
    }
}
