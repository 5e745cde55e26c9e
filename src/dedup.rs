use std::collections::HashSet;

use crate::types::FileEntry;

/// What to do when an incoming root folder name is already taken
///
/// `Merge` folds the batch into the existing root unchanged (reselecting
/// into an existing knowledge base); `Rename` gives the batch a fresh
/// non-colliding root (dropping a folder whose name is already in use).
/// The policy is always chosen explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    Merge,
    Rename,
}

/// Outcome of root-folder deduplication
///
/// Both name fields are `None` when the batch had no root or no collision.
#[derive(Debug)]
pub struct DedupOutcome {
    pub files: Vec<FileEntry>,
    /// Root name that collided with a known root, if any
    pub original_root: Option<String>,
    /// Replacement root name, only when the batch was renamed
    pub renamed_root: Option<String>,
}

/// Resolve a collision between the batch's root folder and known roots
///
/// The batch root is the first path segment of the first file carrying a
/// hierarchy; flat files pass through untouched in every case. On a rename,
/// the new name is `"<name> (<n>)"` for the smallest `n >= 2` not already in
/// `known_roots`, and every file under the old root gets its relative path
/// rewritten. At most one root is renamed per batch.
pub fn dedup_root_folder(
    files: Vec<FileEntry>,
    known_roots: &HashSet<String>,
    policy: CollisionPolicy,
) -> DedupOutcome {
    let root = match files.iter().find_map(|f| f.root_folder().map(String::from)) {
        Some(root) => root,
        None => {
            return DedupOutcome {
                files,
                original_root: None,
                renamed_root: None,
            }
        }
    };

    if !known_roots.contains(&root) {
        return DedupOutcome {
            files,
            original_root: None,
            renamed_root: None,
        };
    }

    match policy {
        CollisionPolicy::Merge => DedupOutcome {
            files,
            original_root: Some(root),
            renamed_root: None,
        },
        CollisionPolicy::Rename => {
            let renamed = next_available_name(&root, known_roots);
            let files = files
                .into_iter()
                .map(|file| rewrite_root(file, &root, &renamed))
                .collect();

            DedupOutcome {
                files,
                original_root: Some(root),
                renamed_root: Some(renamed),
            }
        }
    }
}

/// Smallest `"<name> (<n>)"` with `n >= 2` not present in the known set
fn next_available_name(name: &str, known_roots: &HashSet<String>) -> String {
    let mut n = 2u32;
    loop {
        let candidate = format!("{} ({})", name, n);
        if !known_roots.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn rewrite_root(mut file: FileEntry, from: &str, to: &str) -> FileEntry {
    let rewritten = {
        let segments = file.path_segments();
        if segments.len() >= 2 && segments[0] == from {
            let mut parts = vec![to];
            parts.extend_from_slice(&segments[1..]);
            Some(parts.join("/"))
        } else {
            None
        }
    };
    if let Some(path) = rewritten {
        file.relative_path = Some(path);
    }
    file
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

    fn roots(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rename_picks_smallest_free_suffix() {
        let files = vec![entry("f.txt", Some("a/f.txt"))];
        let known = roots(&["a", "a (2)"]);

        let outcome = dedup_root_folder(files, &known, CollisionPolicy::Rename);
        assert_eq!(outcome.original_root.as_deref(), Some("a"));
        assert_eq!(outcome.renamed_root.as_deref(), Some("a (3)"));
        assert_eq!(outcome.files[0].relative_path.as_deref(), Some("a (3)/f.txt"));
    }

    #[test]
    fn test_merge_leaves_files_untouched() {
        let files = vec![entry("f.txt", Some("a/f.txt"))];
        let known = roots(&["a", "a (2)"]);

        let outcome = dedup_root_folder(files, &known, CollisionPolicy::Merge);
        assert_eq!(outcome.original_root.as_deref(), Some("a"));
        assert_eq!(outcome.renamed_root, None);
        assert_eq!(outcome.files[0].relative_path.as_deref(), Some("a/f.txt"));
    }

    #[test]
    fn test_no_collision_returns_input_unchanged() {
        let files = vec![entry("f.txt", Some("fresh/f.txt"))];
        let known = roots(&["a"]);

        let outcome = dedup_root_folder(files, &known, CollisionPolicy::Rename);
        assert_eq!(outcome.original_root, None);
        assert_eq!(outcome.renamed_root, None);
        assert_eq!(outcome.files[0].relative_path.as_deref(), Some("fresh/f.txt"));
    }

    #[test]
    fn test_flat_files_pass_through() {
        let files = vec![entry("loose.txt", None)];
        let known = roots(&["loose.txt"]);

        let outcome = dedup_root_folder(files, &known, CollisionPolicy::Rename);
        assert_eq!(outcome.original_root, None);
        assert_eq!(outcome.files[0].relative_path, None);
    }

    #[test]
    fn test_rename_rewrites_nested_paths() {
        let files = vec![
            entry("a.txt", Some("docs/a.txt")),
            entry("b.txt", Some("docs/sub/b.txt")),
            entry("loose.txt", None),
        ];
        let known = roots(&["docs"]);

        let outcome = dedup_root_folder(files, &known, CollisionPolicy::Rename);
        assert_eq!(outcome.renamed_root.as_deref(), Some("docs (2)"));
        assert_eq!(outcome.files[0].relative_path.as_deref(), Some("docs (2)/a.txt"));
        assert_eq!(
            outcome.files[1].relative_path.as_deref(),
            Some("docs (2)/sub/b.txt")
        );
        assert_eq!(outcome.files[2].relative_path, None);
    }
}
