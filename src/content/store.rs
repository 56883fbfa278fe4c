//! Content store - loads posts from a flat directory of markdown files

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::projection::{project, ProjectedRecord};
use super::{ContentError, ContentRecord};

/// Recognized post file extensions, in order of precedence
const EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Read-only handle over a directory of posts, one file per post
///
/// The slug of a post is its file stem. Nothing is cached: every call reads
/// the directory again.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All slugs in the store, sorted ascending
    pub fn list_slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.scan()?.into_keys().collect())
    }

    /// Load one post, projected onto `fields`
    pub fn load_by_slug<S: AsRef<str>>(
        &self,
        slug: &str,
        fields: &[S],
    ) -> Result<ProjectedRecord, ContentError> {
        let record = self.record(slug)?;
        Ok(project(&record, fields))
    }

    /// Load every well-formed post, newest first
    ///
    /// Malformed posts are logged and left out so that one bad file does not
    /// take down the index. Posts sharing a date are ordered by slug.
    pub fn load_all<S: AsRef<str>>(
        &self,
        fields: &[S],
    ) -> Result<Vec<ProjectedRecord>, ContentError> {
        let mut records = Vec::new();

        for (slug, path) in self.scan()? {
            match read_record(&slug, &path) {
                Ok(record) => records.push(record),
                Err(e @ ContentError::Malformed { .. }) => {
                    tracing::warn!("Skipping post {:?}: {}", path, e);
                }
                Err(e) => return Err(e),
            }
        }

        records.sort_by(newest_first);

        Ok(records.iter().map(|r| project(r, fields)).collect())
    }

    /// Load the full record for a slug
    pub fn record(&self, slug: &str) -> Result<ContentRecord, ContentError> {
        let path = self.path_for(slug).ok_or_else(|| ContentError::NotFound {
            slug: slug.to_string(),
        })?;
        read_record(slug, &path)
    }

    /// Resolve a slug to its source file without leaving the root
    fn path_for(&self, slug: &str) -> Option<PathBuf> {
        if !is_safe_slug(slug) {
            return None;
        }
        EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", slug, ext)))
            .find(|p| p.is_file())
    }

    /// Map of slug to source file for every post file directly under the root
    fn scan(&self) -> Result<BTreeMap<String, PathBuf>, ContentError> {
        let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();

        if !self.root.exists() {
            tracing::debug!("Content directory {:?} does not exist", self.root);
            return Ok(found);
        }

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|e| {
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"))
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some((slug, rank)) = post_slug(path) else {
                continue;
            };

            insert_post(&mut found, slug, rank, path);
        }

        Ok(found)
    }
}

/// Record `path` under `slug` unless a file with a preferred extension holds it
fn insert_post(found: &mut BTreeMap<String, PathBuf>, slug: String, rank: usize, path: &Path) {
    match found.get(&slug) {
        Some(existing) if extension_rank(existing).is_some_and(|r| r <= rank) => {
            tracing::warn!("Ignoring {:?}: slug `{}` already taken", path, slug);
        }
        Some(existing) => {
            tracing::warn!("Ignoring {:?}: slug `{}` already taken", existing, slug);
            found.insert(slug, path.to_path_buf());
        }
        None => {
            found.insert(slug, path.to_path_buf());
        }
    }
}

fn read_record(slug: &str, path: &Path) -> Result<ContentRecord, ContentError> {
    let source = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ContentError::NotFound {
            slug: slug.to_string(),
        },
        std::io::ErrorKind::InvalidData => {
            ContentError::malformed(slug, "file is not valid UTF-8")
        }
        _ => ContentError::Io(e),
    })?;
    ContentRecord::parse(slug, &source)
}

fn newest_first(a: &ContentRecord, b: &ContentRecord) -> Ordering {
    b.date()
        .cmp(&a.date())
        .then_with(|| a.slug().cmp(b.slug()))
}

/// Slug and extension precedence of a post file
fn post_slug(path: &Path) -> Option<(String, usize)> {
    let rank = extension_rank(path)?;
    let stem = path.file_stem()?.to_str()?;
    if stem.starts_with('.') || !is_safe_slug(stem) {
        return None;
    }
    Some((stem.to_string(), rank))
}

fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?;
    EXTENSIONS.iter().position(|e| *e == ext)
}

/// A slug names a single file directly inside the store
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &Path, file: &str, title: &str, date: &str) {
        let content = format!(
            "---\ntitle: \"{}\"\ndate: \"{}\"\nexcerpt: About {}\ncoverImage: /assets/{}.png\n---\n\n# {}\n\nBody of {}.\n",
            title, date, title, title, title, title
        );
        fs::write(dir.join(file), content).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "hello-world.md", "Hello World", "2020-03-16T05:35:07.322Z");
        write_post(dir.path(), "dynamic-routing.md", "Dynamic Routing", "2020-03-17T05:35:07.322Z");
        write_post(dir.path(), "preview.md", "Preview", "2020-03-15T05:35:07.322Z");
        dir
    }

    #[test]
    fn test_list_slugs() {
        let dir = fixture();
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        write_post(&dir.path().join("drafts"), "nested.md", "Nested", "2021-01-01");

        let store = ContentStore::new(dir.path());
        assert_eq!(
            store.list_slugs().unwrap(),
            vec!["dynamic-routing", "hello-world", "preview"]
        );
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("nope"));
        assert!(store.list_slugs().unwrap().is_empty());
        assert!(store.load_all(&["slug"]).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_stem_prefers_md() {
        let dir = fixture();
        write_post(dir.path(), "hello-world.markdown", "Other", "2022-01-01");
        let store = ContentStore::new(dir.path());
        assert_eq!(store.list_slugs().unwrap().len(), 3);
        let post = store.load_by_slug("hello-world", &["title"]).unwrap();
        assert_eq!(post.get_str("title"), Some("Hello World"));
    }

    #[test]
    fn test_load_by_slug() {
        let dir = fixture();
        let store = ContentStore::new(dir.path());
        let post = store
            .load_by_slug("preview", &["title", "slug", "content", "missing"])
            .unwrap();
        assert_eq!(post.len(), 3);
        assert_eq!(post.get_str("slug"), Some("preview"));
        assert_eq!(post.get_str("content"), Some("# Preview\n\nBody of Preview.\n"));
    }

    #[test]
    fn test_load_by_slug_markdown_extension() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "long-form.markdown", "Long Form", "2023-05-05");
        let store = ContentStore::new(dir.path());
        let post = store.load_by_slug("long-form", &["title"]).unwrap();
        assert_eq!(post.get_str("title"), Some("Long Form"));
    }

    #[test]
    fn test_load_by_unknown_slug_is_not_found() {
        let dir = fixture();
        let store = ContentStore::new(dir.path());
        let err = store.load_by_slug("nope", &["title"]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_traversal_slug_is_not_found() {
        let dir = fixture();
        let inner = dir.path().join("posts");
        fs::create_dir(&inner).unwrap();
        let store = ContentStore::new(&inner);
        for slug in ["../hello-world", "..", "", "a/b", "a\\b"] {
            let err = store.load_by_slug(slug, &["title"]).unwrap_err();
            assert!(err.is_not_found(), "slug {:?}", slug);
        }
    }

    #[test]
    fn test_load_all_sorted_newest_first() {
        let dir = fixture();
        let store = ContentStore::new(dir.path());
        let posts = store.load_all(&["slug", "date"]).unwrap();
        let slugs: Vec<_> = posts.iter().filter_map(|p| p.get_str("slug")).collect();
        assert_eq!(slugs, vec!["dynamic-routing", "hello-world", "preview"]);
    }

    #[test]
    fn test_load_all_ties_broken_by_slug() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "charlie.md", "C", "2024-01-01");
        write_post(dir.path(), "alpha.md", "A", "2024-01-01");
        write_post(dir.path(), "bravo.md", "B", "2024-01-01T00:00:00Z");
        write_post(dir.path(), "newer.md", "N", "2024-06-01");
        let store = ContentStore::new(dir.path());

        let first: Vec<_> = store
            .load_all(&["slug"])
            .unwrap()
            .into_iter()
            .map(|p| p.get_str("slug").unwrap().to_string())
            .collect();
        assert_eq!(first, vec!["newer", "alpha", "bravo", "charlie"]);

        let second: Vec<_> = store
            .load_all(&["slug"])
            .unwrap()
            .into_iter()
            .map(|p| p.get_str("slug").unwrap().to_string())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_all_skips_malformed() {
        let dir = fixture();
        fs::write(dir.path().join("broken.md"), "---\ndate: 2024-01-01\n---\nno title").unwrap();
        let store = ContentStore::new(dir.path());

        let posts = store.load_all(&["slug"]).unwrap();
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| p.get_str("slug") != Some("broken")));

        assert!(store.list_slugs().unwrap().contains(&"broken".to_string()));
        let err = store.load_by_slug("broken", &["slug"]).unwrap_err();
        assert!(matches!(err, ContentError::Malformed { .. }));
    }

    #[test]
    fn test_duplicate_stem_md_replaces_earlier_markdown() {
        let mut found = BTreeMap::new();
        let long = PathBuf::from("/posts/a.markdown");
        let short = PathBuf::from("/posts/a.md");

        insert_post(&mut found, "a".to_string(), 1, &long);
        insert_post(&mut found, "a".to_string(), 0, &short);
        assert_eq!(found.get("a"), Some(&short));

        insert_post(&mut found, "a".to_string(), 1, &long);
        assert_eq!(found.get("a"), Some(&short));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_load_all_skips_non_utf8_post() {
        let dir = fixture();
        fs::write(dir.path().join("binary.md"), b"---\ntitle: \xff\xfe\n---\n").unwrap();
        let store = ContentStore::new(dir.path());

        let posts = store.load_all(&["slug"]).unwrap();
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| p.get_str("slug") != Some("binary")));

        let err = store.load_by_slug("binary", &["slug"]).unwrap_err();
        assert!(matches!(err, ContentError::Malformed { .. }));
    }

    #[test]
    fn test_store_is_read_only() {
        let dir = fixture();
        let before = fs::read_to_string(dir.path().join("preview.md")).unwrap();
        let store = ContentStore::new(dir.path());
        store.load_all(&["title", "content"]).unwrap();
        store.load_by_slug("preview", &["content"]).unwrap();
        let after = fs::read_to_string(dir.path().join("preview.md")).unwrap();
        assert_eq!(before, after);
    }
}
