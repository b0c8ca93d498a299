//! Validation of stored objects.

use serde::Serialize;
use vigil_assert::Asserter;
use vigil_config::ValidationSettings;
use vigil_core::{AssetKind, AssetStore, ContextRef, DiscoveredObject, Object, Violation};

use crate::error::PipelineError;
use crate::registry::ValidatorRegistry;

const DISCOVERED_KINDS: [AssetKind; 2] = [AssetKind::Composite, AssetKind::Leaf];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub objects_discovered: usize,
    pub objects_validated: usize,
    pub objects_skipped: usize,
    pub parts_validated: usize,
}

pub struct AssetValidationPipeline<'a> {
    store: &'a dyn AssetStore,
    registry: &'a ValidatorRegistry,
}

impl<'a> AssetValidationPipeline<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn AssetStore, registry: &'a ValidatorRegistry) -> Self {
        Self { store, registry }
    }

    /// Validate every stored object selected by `settings`.
    ///
    /// Fail-fast: the first failing object ends the pass.
    ///
    /// # Errors
    ///
    /// - `PipelineError::Violation` for the first failing object, attributed
    ///   to its storage path.
    /// - `PipelineError::Store` when the store query fails.
    pub fn run_on_store(
        &self,
        settings: &ValidationSettings,
        asserter: &Asserter<'_>,
    ) -> Result<PipelineReport, PipelineError> {
        let mut report = PipelineReport::default();
        if !settings.validates_anything() {
            tracing::debug!("asset validation disabled for composites and leaves; skipping store query");
            return Ok(report);
        }

        let discovered = self
            .store
            .find_by_kind_and_path(&DISCOVERED_KINDS, &settings.search_paths)?;
        report.objects_discovered = discovered.len();
        tracing::debug!(
            count = discovered.len(),
            search_paths = ?settings.search_paths,
            "discovered stored objects"
        );

        for found in &discovered {
            match self.validate_discovered(found, settings, asserter)? {
                Some(parts) => {
                    report.objects_validated += 1;
                    report.parts_validated += parts;
                }
                None => report.objects_skipped += 1,
            }
        }

        Ok(report)
    }

    /// Validate one discovered object. `Ok(None)` when it was skipped.
    fn validate_discovered(
        &self,
        found: &DiscoveredObject,
        settings: &ValidationSettings,
        asserter: &Asserter<'_>,
    ) -> Result<Option<usize>, Violation> {
        let kind = self.store.kind_of(&found.id);
        let wanted = match kind {
            AssetKind::Composite => settings.validate_composites,
            AssetKind::Leaf => settings.validate_leaves,
            AssetKind::Unknown => false,
        };
        if !wanted {
            tracing::debug!(path = %found.path, ?kind, "skipping object by kind");
            return Ok(None);
        }

        let Some(object) = self.store.load(&found.id) else {
            tracing::debug!(path = %found.path, "object did not load; skipping");
            return Ok(None);
        };

        // Leaves are already attributed to their path; only tree failures
        // need re-attributing to the stored root.
        let validated = match kind {
            AssetKind::Composite => self
                .validate_tree(object, asserter)
                .map_err(|violation| violation.at_asset(found.path.clone())),
            _ => self.validate_leaf(object, &found.path, asserter),
        };
        validated.map(Some)
    }

    /// Every node of the tree, root included.
    fn validate_tree(&self, root: &Object, asserter: &Asserter<'_>) -> Result<usize, Violation> {
        let mut parts = 0;
        for node in root.descendants() {
            let context = ContextRef::entity(node.id().clone(), node.name());
            parts += self.registry.validate_object(node, asserter, &context)?;
        }
        Ok(parts)
    }

    fn validate_leaf(
        &self,
        object: &Object,
        path: &str,
        asserter: &Asserter<'_>,
    ) -> Result<usize, Violation> {
        self.registry
            .validate_object(object, asserter, &ContextRef::asset(path))
    }
}
