pub mod dedup;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod store;
pub mod traverse;
pub mod tree;
pub mod types;
pub mod upload;

pub use dedup::{dedup_root_folder, CollisionPolicy, DedupOutcome};
pub use error::{IngestError, Result};
pub use filter::{filter_by_extensions, filter_hidden_and_ignored, FilterOutcome, IGNORED_NAMES};
pub use pipeline::{IngestConfig, IngestPipeline, IngestReport, DEFAULT_EXTENSIONS, DEFAULT_MAX_BATCH_SIZE};
pub use store::{JsonFilePathStore, MemoryPathStore, PathStore};
pub use traverse::{collect_drop_payload, DirectoryReader, DropEntry, DropPayload};
pub use tree::{build_file_tree, FileTree, TreeNode};
pub use types::{FileEntry, TraversalResult};
pub use upload::{FileUploader, HttpUploader};
