//! Directory-level conversion: raw crawler dumps in, clean JSON out.
//!
//! Input layout is `<input>/<name>/<name>.html` plus `<input>/<name>/<name>.json`;
//! every entry becomes `<output>/<name>.json`. Entries are processed one at a
//! time in name order and the first failure stops the run.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::article::Article;
use crate::error::CleanerError;
use crate::Extractor;

pub const DEFAULT_INPUT_ROOT: &str = "../data/raw_html";
pub const DEFAULT_OUTPUT_ROOT: &str = "../data/clean_json";

/// Where to read raw entries from and where to write clean records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from(DEFAULT_INPUT_ROOT),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
        }
    }
}

impl BatchConfig {
    pub fn with_input_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_root = path.into();
        self
    }
    pub fn with_output_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_root = path.into();
        self
    }
}

/// One crawled article: a directory named after the article holding its
/// HTML dump and metadata sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    name: String,
    dir: PathBuf,
}

impl RawEntry {
    pub fn new(root: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            dir: root.join(&name),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn html_path(&self) -> PathBuf {
        self.dir.join(format!("{}.html", self.name))
    }

    pub fn meta_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.name))
    }

    /// Read the HTML dump. Bytes that are not UTF-8 are taken as Latin-1.
    pub fn read_html(&self) -> Result<String, CleanerError> {
        let path = self.html_path();
        let bytes = self.read_artifact(&path)?;
        Ok(String::from_utf8(bytes).unwrap_or_else(|err| {
            warn!(path = %path.display(), "HTML is not valid UTF-8, decoding as Latin-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }))
    }

    /// Read the metadata sidecar, which must hold a JSON object.
    pub fn read_meta(&self) -> Result<Map<String, Value>, CleanerError> {
        let path = self.meta_path();
        let bytes = self.read_artifact(&path)?;
        match serde_json::from_slice(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(CleanerError::MetadataNotObject { path }),
            Err(source) => Err(CleanerError::Metadata { path, source }),
        }
    }

    fn read_artifact(&self, path: &Path) -> Result<Vec<u8>, CleanerError> {
        fs::read(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => CleanerError::MissingArtifact {
                entry: self.name.clone(),
                path: path.to_path_buf(),
            },
            _ => CleanerError::io(path, err),
        })
    }
}

/// Subdirectories of `root`, sorted by name. Plain files are skipped.
///
/// A subdirectory whose name is not UTF-8 is an error: its artifact paths
/// cannot be named after it.
pub fn list_entries(root: &Path) -> Result<Vec<RawEntry>, CleanerError> {
    let mut entries = Vec::new();
    for dirent in fs::read_dir(root).map_err(|e| CleanerError::io(root, e))? {
        let dirent = dirent.map_err(|e| CleanerError::io(root, e))?;
        let path = dirent.path();
        if !path.is_dir() {
            debug!(path = %path.display(), "skipping non-directory");
            continue;
        }
        let name = dirent
            .file_name()
            .into_string()
            .map_err(|_| CleanerError::NonUtf8Entry { path })?;
        entries.push(RawEntry::new(root, name));
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Read one entry, extract its article and save it into `out_dir`.
pub fn convert_entry(
    entry: &RawEntry,
    out_dir: &Path,
    extractor: &Extractor,
) -> Result<PathBuf, CleanerError> {
    let html = entry.read_html()?;
    let meta = entry.read_meta()?;
    let article = Article::new(entry.name(), &html, meta, extractor);
    article.save(out_dir)
}

/// Files written by a completed run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Converter {
    config: BatchConfig,
    extractor: Extractor,
}

impl Converter {
    pub fn new(config: BatchConfig, extractor: Extractor) -> Self {
        Self { config, extractor }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Convert every entry under the input root.
    ///
    /// The input root is listed before the output directory is created
    /// (existing ones are reused), so an unreadable input leaves no trace.
    /// Stops at the first entry that fails; files written before it stay.
    pub fn run(&self) -> Result<BatchReport, CleanerError> {
        let entries = list_entries(&self.config.input_root)?;

        let out_dir = &self.config.output_root;
        fs::create_dir_all(out_dir).map_err(|e| CleanerError::io(out_dir, e))?;
        info!(
            input = %self.config.input_root.display(),
            output = %out_dir.display(),
            entries = entries.len(),
            "converting raw articles"
        );

        let mut report = BatchReport::default();
        for entry in &entries {
            let path = convert_entry(entry, out_dir, &self.extractor)?;
            debug!(entry = entry.name(), path = %path.display(), "saved clean article");
            report.written.push(path);
        }

        info!(written = report.len(), "batch complete");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_entry(root: &Path, name: &str, html: &[u8], meta: Option<&str>) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{name}.html")), html).unwrap();
        if let Some(meta) = meta {
            fs::write(dir.join(format!("{name}.json")), meta).unwrap();
        }
    }

    #[test]
    fn default_roots() {
        let config = BatchConfig::default();
        assert_eq!(config.input_root, Path::new("../data/raw_html"));
        assert_eq!(config.output_root, Path::new("../data/clean_json"));
    }

    #[test]
    fn entry_paths_follow_directory_name() {
        let entry = RawEntry::new(Path::new("raw"), "abc");
        assert_eq!(entry.html_path(), Path::new("raw/abc/abc.html"));
        assert_eq!(entry.meta_path(), Path::new("raw/abc/abc.json"));
    }

    #[test]
    fn list_entries_sorts_and_skips_files() {
        let root = tempfile::tempdir().unwrap();
        write_entry(root.path(), "b", b"", Some("{}"));
        write_entry(root.path(), "a", b"", Some("{}"));
        fs::write(root.path().join("notes.txt"), "stray").unwrap();

        let names: Vec<String> = list_entries(root.path())
            .unwrap()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn list_entries_on_missing_root_is_io_error() {
        let root = tempfile::tempdir().unwrap();
        let err = list_entries(&root.path().join("nope")).unwrap_err();
        assert!(matches!(err, CleanerError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_entry_name_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = tempfile::tempdir().unwrap();
        write_entry(root.path(), "good", b"", Some("{}"));
        let bad = root.path().join(OsStr::from_bytes(b"bad\xff"));
        fs::create_dir_all(&bad).unwrap();

        match list_entries(root.path()).unwrap_err() {
            CleanerError::NonUtf8Entry { path } => assert_eq!(path, bad),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn latin1_html_is_decoded() {
        let root = tempfile::tempdir().unwrap();
        write_entry(root.path(), "x", b"<p>caf\xe9</p>", Some("{}"));
        let html = RawEntry::new(root.path(), "x").read_html().unwrap();
        assert_eq!(html, "<p>caf\u{e9}</p>");
    }

    #[test]
    fn metadata_must_be_an_object() {
        let root = tempfile::tempdir().unwrap();
        write_entry(root.path(), "list", b"", Some("[1, 2]"));
        write_entry(root.path(), "broken", b"", Some("{\"url\": "));

        let err = RawEntry::new(root.path(), "list").read_meta().unwrap_err();
        assert!(matches!(err, CleanerError::MetadataNotObject { .. }));
        let err = RawEntry::new(root.path(), "broken").read_meta().unwrap_err();
        assert!(matches!(err, CleanerError::Metadata { .. }));
    }

    #[test]
    fn missing_sidecar_names_the_entry() {
        let root = tempfile::tempdir().unwrap();
        write_entry(root.path(), "lonely", b"<p>x</p>", None);
        let err = RawEntry::new(root.path(), "lonely").read_meta().unwrap_err();
        match err {
            CleanerError::MissingArtifact { entry, path } => {
                assert_eq!(entry, "lonely");
                assert!(path.ends_with("lonely/lonely.json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn report_len() {
        let mut report = BatchReport::default();
        assert!(report.is_empty());
        report.written.push(PathBuf::from("a.json"));
        assert_eq!(report.len(), 1);
    }
}
