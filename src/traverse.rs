use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

use crate::{
    error::Result,
    types::{FileEntry, TraversalResult},
};

/// Capability interface over a platform directory-reader handle
///
/// Readers yield entries in batches; an empty batch signals that the
/// directory has been fully read. A reader is not reentrant: callers must
/// await each batch before requesting the next.
#[async_trait]
pub trait DirectoryReader: Send {
    /// Read the next batch of entries
    ///
    /// Returns an empty batch once the directory is exhausted.
    async fn read_batch(&mut self) -> Result<Vec<DropEntry>>;
}

/// A single entry found in a drop payload or directory batch
pub enum DropEntry {
    File(FileEntry),
    Directory {
        name: String,
        reader: Box<dyn DirectoryReader>,
    },
}

/// A drop or picker selection, in one of the two platform variants
///
/// `Entries` is the structured variant supporting recursive directory
/// traversal; `Files` is the flat fallback for platforms without entry
/// support.
pub enum DropPayload {
    Entries(Vec<DropEntry>),
    Files(Vec<FileEntry>),
}

/// Flatten a drop payload into a list of file entries
///
/// Directories are read batch-by-batch until exhausted, and every file found
/// under one is tagged with a synthetic relative path joining the traversed
/// directory names. The flat variant passes through unchanged with
/// `has_directories = false`. An empty payload yields an empty result.
pub async fn collect_drop_payload(payload: DropPayload) -> Result<TraversalResult> {
    match payload {
        DropPayload::Files(files) => Ok(TraversalResult {
            files,
            has_directories: false,
        }),
        DropPayload::Entries(entries) => {
            let mut files = Vec::new();
            let mut has_directories = false;

            for entry in entries {
                match entry {
                    DropEntry::File(file) => files.push(file),
                    DropEntry::Directory { name, mut reader } => {
                        has_directories = true;
                        walk_directory(name, reader.as_mut(), &mut files).await?;
                    }
                }
            }

            Ok(TraversalResult {
                files,
                has_directories,
            })
        }
    }
}

/// Drain one directory reader, recursing into subdirectories
///
/// Boxed future because async recursion needs an indirection.
fn walk_directory<'a>(
    prefix: String,
    reader: &'a mut dyn DirectoryReader,
    files: &'a mut Vec<FileEntry>,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(async move {
        loop {
            let batch = reader.read_batch().await?;
            if batch.is_empty() {
                return Ok(());
            }

            for entry in batch {
                match entry {
                    DropEntry::File(file) => {
                        let path = format!("{}/{}", prefix, file.name);
                        files.push(file.with_relative_path(path));
                    }
                    DropEntry::Directory {
                        name,
                        reader: mut child,
                    } => {
                        let child_prefix = format!("{}/{}", prefix, name);
                        walk_directory(child_prefix, child.as_mut(), files).await?;
                    }
                }
            }
        }
    })
}
