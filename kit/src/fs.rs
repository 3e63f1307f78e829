//! File-write helpers.
//!
//! `write_file` writes exactly where it is told, creating parent directories on
//! the way. `OutputDir` adds the sandboxing rule used for generated artifacts:
//! a path that does not already name an `output` directory is placed under the
//! output root instead.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Directory component that marks a path as already living in an output tree.
pub const OUTPUT_SEGMENT: &str = "output";

#[derive(Debug, Error)]
pub enum FsError {
    #[error("unable to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to serialize JSON content: {0}")]
    Json(#[from] serde_json::Error),
    #[error("path {0} would escape the output root")]
    EscapesOutputRoot(PathBuf),
}

/// Content accepted by the write helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    Text(String),
    /// Written as pretty-printed JSON with two-space indentation.
    Json(Value),
    Bytes(Vec<u8>),
}

impl FileContent {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, FsError> {
        Ok(FileContent::Json(serde_json::to_value(value)?))
    }

    fn into_bytes(self) -> Result<Vec<u8>, FsError> {
        match self {
            FileContent::Text(text) => Ok(text.into_bytes()),
            FileContent::Json(value) => Ok(serde_json::to_string_pretty(&value)?.into_bytes()),
            FileContent::Bytes(bytes) => Ok(bytes),
        }
    }
}

impl From<&str> for FileContent {
    fn from(value: &str) -> Self {
        FileContent::Text(value.to_string())
    }
}

impl From<String> for FileContent {
    fn from(value: String) -> Self {
        FileContent::Text(value)
    }
}

impl From<Value> for FileContent {
    fn from(value: Value) -> Self {
        FileContent::Json(value)
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(value: Vec<u8>) -> Self {
        FileContent::Bytes(value)
    }
}

/// Writes `content` to `path`, creating missing parent directories and
/// overwriting any existing file.
pub fn write_file(path: impl AsRef<Path>, content: impl Into<FileContent>) -> Result<(), FsError> {
    let path = path.as_ref();
    let bytes = content.into().into_bytes()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| FsError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, &bytes).map_err(|source| FsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

/// Creates `path` and any missing parents. Existing directories are left alone.
pub fn create_dir(path: impl AsRef<Path>) -> Result<(), FsError> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|source| FsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "ensured directory");
    Ok(())
}

/// Root under which un-tagged paths are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
}

impl Default for OutputDir {
    fn default() -> Self {
        Self::new(Path::new(".").join(OUTPUT_SEGMENT))
    }
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps `path` to where it will be written. Paths containing an `output`
    /// component are returned unchanged; everything else is rebuilt under the
    /// root from its normal components, and `..` is refused.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, FsError> {
        let path = path.as_ref();
        if names_output_dir(path) {
            return Ok(path.to_path_buf());
        }

        let mut resolved = self.root.clone();
        for component in path.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::ParentDir => return Err(FsError::EscapesOutputRoot(path.to_path_buf())),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        Ok(resolved)
    }

    /// Resolves `path` and writes `content` there, returning the final location.
    pub fn write(
        &self,
        path: impl AsRef<Path>,
        content: impl Into<FileContent>,
    ) -> Result<PathBuf, FsError> {
        let target = self.resolve(path)?;
        write_file(&target, content)?;
        Ok(target)
    }
}

fn names_output_dir(path: &Path) -> bool {
    let mut components = path.components().peekable();
    while let Some(component) = components.next() {
        // The final component is the file itself, not a directory.
        if components.peek().is_none() {
            break;
        }
        if component.as_os_str() == OUTPUT_SEGMENT {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn untagged_paths_land_under_output_root() {
        let tmp = TempDir::new().unwrap();
        let output = OutputDir::new(tmp.path().join("output"));

        let written = output.write("reports/daily.txt", "hello").expect("write should succeed");

        assert_eq!(written, tmp.path().join("output/reports/daily.txt"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "hello");
    }

    #[test]
    fn tagged_paths_are_kept() {
        let tmp = TempDir::new().unwrap();
        let output = OutputDir::new(tmp.path().join("elsewhere"));
        let target = tmp.path().join("output").join("nested/file.txt");

        let written = output.write(&target, "kept").unwrap();

        assert_eq!(written, target);
        assert!(!tmp.path().join("elsewhere").exists());
    }

    #[test]
    fn file_named_output_is_not_a_tag() {
        let output = OutputDir::new("/srv/out");
        assert_eq!(output.resolve("output").unwrap(), PathBuf::from("/srv/out/output"));
        assert_eq!(output.resolve("./output/a.txt").unwrap(), PathBuf::from("./output/a.txt"));
    }

    #[test]
    fn absolute_untagged_paths_are_rebased() {
        let output = OutputDir::new("/srv/out");
        assert_eq!(
            output.resolve("/tmp/report.json").unwrap(),
            PathBuf::from("/srv/out/tmp/report.json")
        );
    }

    #[test]
    fn parent_components_are_refused() {
        let output = OutputDir::new("/srv/out");
        let err = output.resolve("../etc/passwd").unwrap_err();
        assert!(matches!(err, FsError::EscapesOutputRoot(_)));
    }

    #[test]
    fn json_content_is_indented_and_parses_back() {
        let tmp = TempDir::new().unwrap();
        let output = OutputDir::new(tmp.path().join("output"));
        let value = json!({ "name": "kit", "tags": ["a", "b"], "nested": { "n": 1 } });

        let written = output.write("data.json", value.clone()).unwrap();
        let text = fs::read_to_string(written).unwrap();

        assert!(text.contains("\n  \"name\": \"kit\""));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn serializable_structs_become_json() {
        #[derive(Serialize)]
        struct Report {
            count: u32,
        }
        let content = FileContent::json(&Report { count: 3 }).unwrap();
        assert_eq!(content, FileContent::Json(json!({ "count": 3 })));
    }

    #[test]
    fn write_file_overwrites_and_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/c.txt");

        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn write_errors_carry_the_path() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "file, not dir").unwrap();

        let err = write_file(blocker.join("child.txt"), "x").unwrap_err();
        match err {
            FsError::Io { path, .. } => assert_eq!(path, blocker),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
