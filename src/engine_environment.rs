use crate::config::EngineConfig;
use buffer::buffer::BufferPool;
use file::disk_file_manager::DiskFileManager;
use file::file_catalog::FileCatalog;
use std::sync::Arc;

/// Owner of the singleton-like instances that are needed for the entire lifetime of the engine
#[derive(Debug)]
pub struct EngineEnvironment {
    pub file_catalog: Arc<FileCatalog>,
    pub file_manager: Arc<DiskFileManager>,
    pub buffer: Arc<BufferPool<DiskFileManager>>,
    pub engine_config: EngineConfig,
}

impl EngineEnvironment {
    pub fn new(config: EngineConfig) -> Self {
        let file_catalog = Arc::new(FileCatalog::new());
        for entry in &config.storage.files {
            let path = config.storage.data_dir.join(&entry.name);
            tracing::info!(file_id = entry.id, path = %path.display(), "registering file");
            file_catalog.add_file(entry.id, path);
        }

        let file_manager = Arc::new(DiskFileManager::new(file_catalog.clone()));
        let buffer = Arc::new(BufferPool::new(
            file_manager.clone(),
            config.storage.buffer_pages.get(),
        ));
        Self {
            file_catalog,
            file_manager,
            buffer,
            engine_config: config,
        }
    }
}
