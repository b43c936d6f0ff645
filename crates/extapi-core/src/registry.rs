//! Holder of the current model snapshot
//!
//! Readers load the current `Arc<ModelSnapshot>` without locking and keep a
//! fully consistent view for as long as they hold it. Installing a snapshot
//! swaps the pointer atomically; the previous snapshot is freed once its
//! last reader drops it. A failed install leaves the current snapshot alone.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::errors::{ExtApiError, Result};
use crate::snapshot::ModelSnapshot;

#[derive(Default)]
pub struct ModelRegistry {
    current: ArcSwapOption<ModelSnapshot>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot
    ///
    /// # Errors
    ///
    /// `NoModelInstalled` before the first successful install.
    pub fn current(&self) -> Result<Arc<ModelSnapshot>> {
        self.current.load_full().ok_or(ExtApiError::NoModelInstalled)
    }

    pub fn is_installed(&self) -> bool {
        self.current.load().is_some()
    }

    /// Replace the current snapshot, returning the previous one
    pub fn install(&self, snapshot: Arc<ModelSnapshot>) -> Option<Arc<ModelSnapshot>> {
        self.current.swap(Some(snapshot))
    }

    /// Build a snapshot from document bytes and install it
    ///
    /// # Errors
    ///
    /// `MalformedDocument` or `IndexConflict`; the current snapshot stays
    /// active in both cases.
    pub fn install_document(&self, bytes: &[u8]) -> Result<Arc<ModelSnapshot>> {
        let snapshot = ModelSnapshot::from_bytes(bytes)?.into_shared();
        self.install(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digest = self.current.load_full().map(|s| s.digest().to_string());
        f.debug_struct("ModelRegistry")
            .field("current_digest", &digest)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = r#"{"classes": [{"name": "Object"}]}"#;
    const SECOND: &str = r#"{"classes": [{"name": "Object"}, {"name": "Node", "inherits": "Object"}]}"#;

    #[test]
    fn test_empty_registry() {
        let registry = ModelRegistry::new();
        assert!(!registry.is_installed());
        assert!(matches!(
            registry.current(),
            Err(ExtApiError::NoModelInstalled)
        ));
    }

    #[test]
    fn test_install_replaces_snapshot() {
        let registry = ModelRegistry::new();
        registry.install_document(FIRST.as_bytes()).expect("valid");
        let held = registry.current().expect("installed");
        registry.install_document(SECOND.as_bytes()).expect("valid");

        assert_eq!(registry.current().expect("installed").model().classes.len(), 2);
        // a reader holding the old snapshot keeps a consistent view
        assert_eq!(held.model().classes.len(), 1);
    }

    #[test]
    fn test_failed_install_keeps_current() {
        let registry = ModelRegistry::new();
        registry.install_document(FIRST.as_bytes()).expect("valid");
        let before = registry.current().expect("installed");

        assert!(registry.install_document(b"{ broken").is_err());
        let after = registry.current().expect("still installed");
        assert!(Arc::ptr_eq(&before, &after));
    }
}
