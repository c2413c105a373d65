//! Photo lookup: match tree codes to files in a photo folder.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Index of photo files, queried by case-insensitive substring match of a
/// tree code against the file stem.
#[derive(Debug, Default)]
pub struct PhotoIndex {
    entries: Vec<(String, PathBuf)>, // (lowercased stem, path)
}

impl PhotoIndex {
    /// Walk `dir` collecting image files. An absent or unreadable directory
    /// yields an empty index; the caller decides whether to warn.
    pub fn scan(dir: &Path) -> Self {
        let mut entries = Vec::new();
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let ext = path.extension()
                .and_then(|s| s.to_str())
                .map(str::to_ascii_lowercase);
            if !ext.as_deref().is_some_and(|e| PHOTO_EXTENSIONS.contains(&e)) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                entries.push((stem.to_ascii_lowercase(), path.to_path_buf()));
            }
        }
        entries.sort();
        Self { entries }
    }

    /// First file whose stem contains the tree code. Blank codes never match.
    pub fn find(&self, code: &str) -> Option<&Path> {
        let code = code.trim().to_ascii_lowercase();
        if code.is_empty() {
            return None;
        }
        self.entries.iter()
            .find(|(stem, _)| stem.contains(&code))
            .map(|(_, path)| path.as_path())
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::PhotoIndex;

    fn index_with(files: &[&str]) -> (tempfile::TempDir, PhotoIndex) {
        let dir = tempfile::tempdir().unwrap();
        for name in files {
            std::fs::write(dir.path().join(name), b"jpeg").unwrap();
        }
        let index = PhotoIndex::scan(dir.path());
        (dir, index)
    }

    #[test]
    fn matches_code_substring_case_insensitive() {
        let (_dir, index) = index_with(&["IMG_wt001_north.JPG", "wt002.jpg", "notes.txt"]);
        assert_eq!(index.len(), 2);

        let hit = index.find("WT001").unwrap();
        assert!(hit.file_name().unwrap().to_str().unwrap().contains("wt001"));
        assert!(index.find("wt002").is_some());
        assert!(index.find("wt999").is_none());
    }

    #[test]
    fn blank_code_never_matches() {
        let (_dir, index) = index_with(&["wt001.jpg"]);
        assert!(index.find("").is_none());
        assert!(index.find("   ").is_none());
    }

    #[test]
    fn missing_directory_yields_empty_index() {
        let index = PhotoIndex::scan(std::path::Path::new("no-such-photo-dir"));
        assert!(index.is_empty());
    }
}
