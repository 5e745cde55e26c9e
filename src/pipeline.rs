use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::{
    dedup::{dedup_root_folder, CollisionPolicy},
    error::{IngestError, Result},
    filter::{filter_by_extensions, filter_hidden_and_ignored},
    store::PathStore,
    traverse::{collect_drop_payload, DropPayload},
    types::FileEntry,
    upload::FileUploader,
};

/// Default cap on files accepted from one folder selection
///
/// More than this in a single drop almost always means a cache or
/// dependency directory leaked through.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Extensions accepted by default
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "txt", "md", "mdx", "csv", "json", "yaml", "yml", "xml", "html", "htm", "pdf", "docx", "py",
    "js", "ts", "tsx", "jsx", "sh", "sql",
];

/// Intake configuration
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub allowed_extensions: HashSet<String>,
    pub max_batch_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

/// What one intake run produced
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Server-assigned identifiers, one per accepted file, in order
    pub file_ids: Vec<String>,
    /// The accepted files as they were uploaded (after any root rewrite)
    pub files: Vec<FileEntry>,
    /// Files dropped by the hidden/ignored filter
    pub skipped_hidden: usize,
    /// Files dropped by the extension filter
    pub filtered_by_type: usize,
    /// Root name that collided with a known root, if any
    pub original_root: Option<String>,
    /// Replacement root name, when the batch was renamed
    pub renamed_root: Option<String>,
    /// Whether the payload contained any directory
    pub has_directories: bool,
}

/// Runs a drop payload through traversal, filtering, dedup and upload
///
/// Filtering and dedup are pure and complete before the upload collaborator
/// is called; there is no interleaving with network I/O and no retry. An
/// optional [`PathStore`] records server id to relative path associations
/// best-effort after a successful upload.
pub struct IngestPipeline {
    uploader: Arc<dyn FileUploader>,
    store: Option<Arc<dyn PathStore>>,
    config: IngestConfig,
}

impl IngestPipeline {
    /// Create a pipeline with the default configuration and no path store
    pub fn new(uploader: Arc<dyn FileUploader>) -> Self {
        Self {
            uploader,
            store: None,
            config: IngestConfig::default(),
        }
    }

    /// Create a pipeline that records uploaded paths in the given store
    pub fn with_store(uploader: Arc<dyn FileUploader>, store: Arc<dyn PathStore>) -> Self {
        Self {
            uploader,
            store: Some(store),
            config: IngestConfig::default(),
        }
    }

    /// Override the configuration, builder-style
    pub fn with_config(mut self, config: IngestConfig) -> Self {
        self.config = config;
        self
    }

    /// Ingest one drop or picker selection
    ///
    /// `known_roots` is the set of root folder names already in use
    /// (server-side plus the current session); `policy` decides what happens
    /// when the batch's root collides with one of them. Oversized selections
    /// fail with a count-bearing [`IngestError::TooManyFiles`] before any
    /// filtering or upload.
    pub async fn ingest(
        &self,
        payload: DropPayload,
        known_roots: &HashSet<String>,
        policy: CollisionPolicy,
    ) -> Result<IngestReport> {
        let traversal = collect_drop_payload(payload).await?;
        let has_directories = traversal.has_directories;
        debug!(
            files = traversal.files.len(),
            has_directories, "drop payload traversed"
        );

        if traversal.files.len() > self.config.max_batch_size {
            return Err(IngestError::TooManyFiles {
                count: traversal.files.len(),
                limit: self.config.max_batch_size,
            });
        }

        let outcome = filter_hidden_and_ignored(traversal.files);
        let skipped_hidden = outcome.skipped;

        let before_types = outcome.kept.len();
        let files = filter_by_extensions(outcome.kept, &self.config.allowed_extensions);
        let filtered_by_type = before_types - files.len();
        debug!(
            accepted = files.len(),
            skipped_hidden, filtered_by_type, "filters applied"
        );

        if files.is_empty() {
            return Ok(IngestReport {
                skipped_hidden,
                filtered_by_type,
                has_directories,
                ..IngestReport::default()
            });
        }

        let deduped = dedup_root_folder(files, known_roots, policy);

        let file_ids = self.uploader.upload(&deduped.files).await?;
        debug!(
            uploader = %self.uploader.identifier(),
            uploaded = file_ids.len(),
            "batch uploaded"
        );

        if let Some(store) = &self.store {
            for (id, file) in file_ids.iter().zip(&deduped.files) {
                if let Some(relative_path) = &file.relative_path {
                    store.set(id, relative_path).await;
                }
            }
        }

        Ok(IngestReport {
            file_ids,
            files: deduped.files,
            skipped_hidden,
            filtered_by_type,
            original_root: deduped.original_root,
            renamed_root: deduped.renamed_root,
            has_directories,
        })
    }

    /// Get the configured uploader
    pub fn uploader(&self) -> &Arc<dyn FileUploader> {
        &self.uploader
    }
}
