//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::config::Settings;
use crate::infrastructure::traits::{
    CommandEditor, Editor, FileSystem, RealFileSystem, Selector, SkimSelector,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Interactive selector
    pub selector: Arc<dyn Selector>,

    /// Editor for the store file
    pub editor: Arc<dyn Editor>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let editor = Arc::new(CommandEditor::new(settings.editor.clone()));
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(SkimSelector),
            editor,
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        selector: Arc<dyn Selector>,
        editor: Arc<dyn Editor>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            selector,
            editor,
        }
    }

    /// Link service over the configured store file.
    pub fn link_service(&self) -> LinkService {
        LinkService::new(Arc::clone(&self.fs), self.settings.store_path.clone())
    }
}
