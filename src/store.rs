//! Image store facade
//!
//! Bundles the resolver, writer, deleter and rename cascade behind one
//! constructor for the persistence layer.

use std::sync::Arc;

use crate::config::ImageStoreConfig;
use crate::deleter::AssetDeleter;
use crate::rename::RenameCascade;
use crate::resolver::PathResolver;
use crate::writer::AssetWriter;

/// All asset components wired over one shared resolver.
#[derive(Debug, Clone)]
pub struct ImageStore {
    resolver: Arc<PathResolver>,
    pub writer: AssetWriter,
    pub deleter: AssetDeleter,
    pub rename: RenameCascade,
}

impl ImageStore {
    pub fn new(config: &ImageStoreConfig) -> Self {
        let resolver = Arc::new(PathResolver::new(
            config.asset_root_path(),
            &config.public_prefix,
        ));
        let writer = AssetWriter::new(Arc::clone(&resolver));
        let deleter = AssetDeleter::new(Arc::clone(&resolver));
        let rename = RenameCascade::new(Arc::clone(&resolver), deleter.clone());

        Self {
            resolver,
            writer,
            deleter,
            rename,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }
}
