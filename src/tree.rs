use serde::Serialize;
use std::collections::HashSet;

use crate::types::FileEntry;

/// A node in the display tree
///
/// Leaves reference their backing [`FileEntry`] by index into the slice the
/// tree was built from, so a leaf always resolves to exactly one file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    Folder {
        name: String,
        key: String,
        children: Vec<TreeNode>,
    },
    File {
        name: String,
        key: String,
        file_index: usize,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder { name, .. } | TreeNode::File { name, .. } => name,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            TreeNode::Folder { key, .. } | TreeNode::File { key, .. } => key,
        }
    }
}

/// Display tree over one batch of files
#[derive(Debug, Default)]
pub struct FileTree {
    /// Top-level nodes, folders first, each level sorted by name
    pub nodes: Vec<TreeNode>,
    /// Leaf keys in enumeration order, for keyboard range selection: at each
    /// level the file leaves come first, then each folder subtree, both
    /// alphabetical
    pub leaf_order: Vec<String>,
    /// Whether any file in the batch carries a real hierarchy path; drives
    /// switching between flat and tree views
    pub has_hierarchy: bool,
}

#[derive(Default)]
struct FolderBuilder {
    folders: Vec<(String, FolderBuilder)>,
    files: Vec<(String, String, usize)>,
}

impl FolderBuilder {
    fn child(&mut self, name: &str) -> &mut FolderBuilder {
        let pos = match self.folders.iter().position(|(n, _)| n == name) {
            Some(pos) => pos,
            None => {
                self.folders.push((name.to_string(), FolderBuilder::default()));
                self.folders.len() - 1
            }
        };
        &mut self.folders[pos].1
    }

    fn finish(self, prefix: &str) -> Vec<TreeNode> {
        let mut folders: Vec<TreeNode> = self
            .folders
            .into_iter()
            .map(|(name, builder)| {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}/{}", prefix, name)
                };
                let children = builder.finish(&key);
                TreeNode::Folder { name, key, children }
            })
            .collect();
        folders.sort_by(|a, b| a.name().cmp(b.name()));

        let mut files: Vec<TreeNode> = self
            .files
            .into_iter()
            .map(|(name, key, file_index)| TreeNode::File {
                name,
                key,
                file_index,
            })
            .collect();
        files.sort_by(|a, b| a.name().cmp(b.name()));

        folders.extend(files);
        folders
    }
}

/// Build the display tree for a flat, possibly-mixed batch of files
///
/// Files without a hierarchy path become top-level leaves; files with one
/// are inserted along their path segments, creating folder nodes lazily.
/// When `search` is given, leaves whose name does not contain it
/// (case-insensitively) are left out, and folders with no surviving
/// descendants never materialize. Purely functional; call again whenever the
/// batch or search text changes.
pub fn build_file_tree(files: &[FileEntry], search: Option<&str>) -> FileTree {
    let query = search
        .map(str::to_lowercase)
        .filter(|q| !q.is_empty());

    let mut root = FolderBuilder::default();
    let mut used_keys: HashSet<String> = HashSet::new();

    for (index, file) in files.iter().enumerate() {
        let segments = file.path_segments();
        let (folder_segments, leaf_name) = if segments.len() >= 2 {
            (
                segments[..segments.len() - 1].to_vec(),
                segments[segments.len() - 1].to_string(),
            )
        } else {
            // Flat treatment, including malformed paths
            (Vec::new(), file.name.clone())
        };

        if let Some(query) = &query {
            if !leaf_name.to_lowercase().contains(query.as_str()) {
                continue;
            }
        }

        let mut node = &mut root;
        let mut prefix = String::new();
        for segment in &folder_segments {
            if prefix.is_empty() {
                prefix.push_str(segment);
            } else {
                prefix.push('/');
                prefix.push_str(segment);
            }
            used_keys.insert(prefix.clone());
            node = node.child(segment);
        }

        // Second leaf landing on a taken key is disambiguated with its path
        let key = if used_keys.insert(leaf_name.clone()) {
            leaf_name.clone()
        } else {
            let key = format!("{} ({})", leaf_name, file.display_path());
            used_keys.insert(key.clone());
            key
        };

        node.files.push((leaf_name, key, index));
    }

    let nodes = root.finish("");

    let mut leaf_order = Vec::new();
    collect_leaf_order(&nodes, &mut leaf_order);

    FileTree {
        nodes,
        leaf_order,
        has_hierarchy: files.iter().any(|f| f.has_hierarchy()),
    }
}

/// Enumerate leaf keys: file leaves of a level first, then folder subtrees
fn collect_leaf_order(nodes: &[TreeNode], order: &mut Vec<String>) {
    for node in nodes {
        if let TreeNode::File { key, .. } = node {
            order.push(key.clone());
        }
    }
    for node in nodes {
        if let TreeNode::Folder { children, .. } = node {
            collect_leaf_order(children, order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn entry(name: &str, path: Option<&str>) -> FileEntry {
        let mut e = FileEntry::new(name, "text/plain", Bytes::from_static(b"x"));
        e.relative_path = path.map(String::from);
        e
    }

    fn folder<'a>(nodes: &'a [TreeNode], name: &str) -> &'a TreeNode {
        nodes
            .iter()
            .find(|n| matches!(n, TreeNode::Folder { .. }) && n.name() == name)
            .expect("folder present")
    }

    #[test]
    fn test_mixed_hierarchy() {
        let files = vec![
            entry("b.txt", Some("Root/Sub/b.txt")),
            entry("a.txt", Some("Root/a.txt")),
        ];

        let tree = build_file_tree(&files, None);
        assert!(tree.has_hierarchy);
        assert_eq!(tree.nodes.len(), 1);

        let root = folder(&tree.nodes, "Root");
        let TreeNode::Folder { children, key, .. } = root else {
            unreachable!()
        };
        assert_eq!(key, "Root");
        // Folders sort before files
        assert_eq!(children[0].name(), "Sub");
        assert_eq!(children[1].name(), "a.txt");

        let TreeNode::Folder { children: sub, .. } = &children[0] else {
            unreachable!()
        };
        assert_eq!(sub[0].name(), "b.txt");

        assert_eq!(tree.leaf_order, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_flat_batch() {
        let files = vec![entry("z.txt", None), entry("a.txt", None)];

        let tree = build_file_tree(&files, None);
        assert!(!tree.has_hierarchy);
        assert_eq!(tree.nodes.len(), 2);
        assert_eq!(tree.nodes[0].name(), "a.txt");
        assert_eq!(tree.leaf_order, vec!["a.txt", "z.txt"]);
    }

    #[test]
    fn test_malformed_path_degrades_to_flat() {
        let files = vec![entry("odd.txt", Some("///"))];

        let tree = build_file_tree(&files, None);
        assert!(!tree.has_hierarchy);
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].name(), "odd.txt");
    }

    #[test]
    fn test_leaf_resolves_to_input_file() {
        let files = vec![entry("a.txt", Some("Root/a.txt"))];

        let tree = build_file_tree(&files, None);
        let TreeNode::Folder { children, .. } = &tree.nodes[0] else {
            unreachable!()
        };
        let TreeNode::File { file_index, .. } = &children[0] else {
            unreachable!()
        };
        assert_eq!(files[*file_index].name, "a.txt");
    }

    #[test]
    fn test_key_collision_suffixed_with_path() {
        let files = vec![
            entry("a.txt", Some("one/a.txt")),
            entry("a.txt", Some("two/a.txt")),
        ];

        let tree = build_file_tree(&files, None);
        assert_eq!(tree.leaf_order.len(), 2);
        assert_eq!(tree.leaf_order[0], "a.txt");
        assert_eq!(tree.leaf_order[1], "a.txt (two/a.txt)");
    }

    #[test]
    fn test_search_filters_leaves_and_prunes_folders() {
        let files = vec![
            entry("report.pdf", Some("docs/report.pdf")),
            entry("notes.txt", Some("scratch/notes.txt")),
        ];

        let tree = build_file_tree(&files, Some("REPORT"));
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].name(), "docs");
        assert_eq!(tree.leaf_order, vec!["report.pdf"]);
    }

    #[test]
    fn test_empty_search_is_no_filter() {
        let files = vec![entry("a.txt", None)];

        let tree = build_file_tree(&files, Some(""));
        assert_eq!(tree.nodes.len(), 1);
    }
}
