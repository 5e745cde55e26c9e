use bytes::Bytes;

/// A file captured from a drop or picker selection
///
/// Immutable once read from the platform. The optional relative path is a
/// `/`-separated string describing the file's position inside an uploaded
/// folder, either supplied by the picker or synthesized during traversal.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// File name, without any path
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME-ish content type, as reported by the platform
    pub content_type: String,
    /// The raw bytes of the file
    pub content: Bytes,
    /// Position within an uploaded folder, if any
    pub relative_path: Option<String>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, content: Bytes) -> Self {
        let size = content.len() as u64;
        Self {
            name: name.into(),
            size,
            content_type: content_type.into(),
            content,
            relative_path: None,
        }
    }

    /// Attach a relative path, builder-style
    pub fn with_relative_path(mut self, path: impl Into<String>) -> Self {
        self.relative_path = Some(path.into());
        self
    }

    /// Non-empty segments of the relative path
    ///
    /// Empty for flat files; a malformed path (empty or all separators)
    /// also yields no segments, degrading the file to flat treatment.
    pub fn path_segments(&self) -> Vec<&str> {
        match &self.relative_path {
            Some(path) => path.split('/').filter(|s| !s.is_empty()).collect(),
            None => Vec::new(),
        }
    }

    /// First path segment, when the file actually sits inside a folder
    pub fn root_folder(&self) -> Option<&str> {
        let segments = self.path_segments();
        if segments.len() >= 2 {
            Some(segments[0])
        } else {
            None
        }
    }

    /// True when the relative path places this file inside at least one folder
    pub fn has_hierarchy(&self) -> bool {
        self.path_segments().len() >= 2
    }

    /// Path shown to the user: the relative path when present, else the name
    pub fn display_path(&self) -> &str {
        self.relative_path.as_deref().unwrap_or(&self.name)
    }
}

/// Result of traversing a drop payload
#[derive(Debug, Default)]
pub struct TraversalResult {
    /// Flat list of every file found
    pub files: Vec<FileEntry>,
    /// Whether any directory was present in the payload
    pub has_directories: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, path: Option<&str>) -> FileEntry {
        let mut e = FileEntry::new(name, "text/plain", Bytes::from_static(b"x"));
        e.relative_path = path.map(String::from);
        e
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(
            entry("b.txt", Some("Root/Sub/b.txt")).path_segments(),
            vec!["Root", "Sub", "b.txt"]
        );
        assert!(entry("a.txt", None).path_segments().is_empty());
        assert!(entry("a.txt", Some("")).path_segments().is_empty());
        assert_eq!(entry("a.txt", Some("//a.txt")).path_segments(), vec!["a.txt"]);
    }

    #[test]
    fn test_root_folder() {
        assert_eq!(entry("a.txt", Some("Root/a.txt")).root_folder(), Some("Root"));
        assert_eq!(entry("a.txt", Some("a.txt")).root_folder(), None);
        assert_eq!(entry("a.txt", None).root_folder(), None);
    }

    #[test]
    fn test_has_hierarchy() {
        assert!(entry("b.txt", Some("Root/b.txt")).has_hierarchy());
        assert!(!entry("a.txt", Some("a.txt")).has_hierarchy());
        assert!(!entry("a.txt", None).has_hierarchy());
    }
}
