/// End-to-end walkthrough of the file intake pipeline
///
/// This example demonstrates:
/// - Building a structured drop payload with scripted directory readers
/// - Traversal, filtering and root deduplication
/// - A custom uploader implementation
/// - Rebuilding the display tree from the path store

use file_intake::{
    build_file_tree, CollisionPolicy, DirectoryReader, DropEntry, DropPayload, FileEntry,
    FileUploader, IngestPipeline, MemoryPathStore, PathStore, TreeNode,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

// ============================================================================
// Scripted Directory Reader
// ============================================================================

/// Stands in for a platform directory-reader handle, yielding pre-built
/// batches and then empty batches once exhausted
struct ScriptedReader {
    batches: VecDeque<Vec<DropEntry>>,
}

impl ScriptedReader {
    fn new(batches: Vec<Vec<DropEntry>>) -> Box<Self> {
        Box::new(Self {
            batches: batches.into(),
        })
    }
}

#[async_trait]
impl DirectoryReader for ScriptedReader {
    async fn read_batch(&mut self) -> file_intake::Result<Vec<DropEntry>> {
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}

// ============================================================================
// Custom Uploader
// ============================================================================

/// Uploader that just echoes sequential ids, printing what it receives
struct EchoUploader;

#[async_trait]
impl FileUploader for EchoUploader {
    async fn upload(&self, files: &[FileEntry]) -> file_intake::Result<Vec<String>> {
        for file in files {
            println!("   uploading {} ({} bytes)", file.display_path(), file.size);
        }
        Ok((0..files.len()).map(|i| format!("kb/{}", i)).collect())
    }

    fn identifier(&self) -> String {
        "echo".to_string()
    }
}

fn file(name: &str) -> DropEntry {
    DropEntry::File(FileEntry::new(
        name,
        "text/plain",
        Bytes::from_static(b"example content"),
    ))
}

fn print_tree(nodes: &[TreeNode], depth: usize) {
    for node in nodes {
        match node {
            TreeNode::Folder { name, children, .. } => {
                println!("   {}{}/", "  ".repeat(depth), name);
                print_tree(children, depth + 1);
            }
            TreeNode::File { name, .. } => {
                println!("   {}{}", "  ".repeat(depth), name);
            }
        }
    }
}

#[tokio::main]
async fn main() -> file_intake::Result<()> {
    println!("=== File Intake Example ===\n");

    // 1. A dropped folder with a junk subdirectory and a disallowed file
    println!("1. Ingesting a dropped folder");
    println!("-----------------------------");

    let payload = DropPayload::Entries(vec![DropEntry::Directory {
        name: "project".to_string(),
        reader: ScriptedReader::new(vec![vec![
            file("README.md"),
            file("app.exe"),
            DropEntry::Directory {
                name: "node_modules".to_string(),
                reader: ScriptedReader::new(vec![vec![file("dep.js")]]),
            },
            DropEntry::Directory {
                name: "src".to_string(),
                reader: ScriptedReader::new(vec![vec![file("main.py")]]),
            },
        ]]),
    }]);

    let store = Arc::new(MemoryPathStore::new());
    let pipeline = IngestPipeline::with_store(Arc::new(EchoUploader), store.clone());

    // "project" is already taken, so the batch gets a fresh root
    let known: HashSet<String> = ["project".to_string()].into_iter().collect();
    let report = pipeline
        .ingest(payload, &known, CollisionPolicy::Rename)
        .await?;

    println!("   Uploaded:          {}", report.file_ids.len());
    println!("   Skipped (hidden):  {}", report.skipped_hidden);
    println!("   Filtered (type):   {}", report.filtered_by_type);
    if let Some(renamed) = &report.renamed_root {
        println!(
            "   Root renamed:      {} -> {}",
            report.original_root.as_deref().unwrap_or("?"),
            renamed
        );
    }

    // 2. Display tree over the uploaded batch
    println!("\n2. Display tree");
    println!("---------------");

    let tree = build_file_tree(&report.files, None);
    print_tree(&tree.nodes, 0);
    println!("   leaf order: {:?}", tree.leaf_order);

    // 3. A later session rebuilds hierarchy from the path store
    println!("\n3. Rebuilding from the path store");
    println!("---------------------------------");

    let files: Vec<FileEntry> = store
        .entries()
        .await
        .values()
        .map(|path| {
            let name = path.rsplit('/').next().unwrap_or(path).to_string();
            FileEntry::new(name, "text/plain", Bytes::new()).with_relative_path(path.clone())
        })
        .collect();

    let tree = build_file_tree(&files, None);
    print_tree(&tree.nodes, 0);

    println!("\n=== Example Complete ===");
    Ok(())
}
