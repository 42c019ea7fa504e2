use crate::error::{GeneratorError, GeneratorResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    Created,
    Overwritten,
    /// An existing shared file was patched in place
    Updated,
    /// Left untouched: already present, or overwrite declined
    Skipped,
    /// Dry run; nothing written
    Planned,
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactStatus::Created => "created",
            ArtifactStatus::Overwritten => "overwritten",
            ArtifactStatus::Updated => "updated",
            ArtifactStatus::Skipped => "skipped",
            ArtifactStatus::Planned => "planned",
        };
        f.write_str(s)
    }
}

/// A rendered file and what happened to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    /// Human label (`model`, `factory`, `repository interface`, ...)
    pub kind: String,
    pub path: PathBuf,
    pub contents: String,
    pub status: ArtifactStatus,
}

/// How a pending artifact treats an existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Skip with a warning when the file exists
    CreateOnly,
    /// Replace the file (caller has confirmed)
    Overwrite,
    /// Patch of a shared file
    Update,
}

/// Rendered but not yet written
#[derive(Debug, Clone)]
pub struct PendingArtifact {
    pub kind: String,
    pub path: PathBuf,
    pub contents: String,
    pub mode: WriteMode,
}

impl PendingArtifact {
    pub fn create(kind: impl Into<String>, path: PathBuf, contents: String) -> Self {
        Self {
            kind: kind.into(),
            path,
            contents,
            mode: WriteMode::CreateOnly,
        }
    }

    pub fn overwrite(kind: impl Into<String>, path: PathBuf, contents: String) -> Self {
        Self {
            kind: kind.into(),
            path,
            contents,
            mode: WriteMode::Overwrite,
        }
    }

    pub fn update(kind: impl Into<String>, path: PathBuf, contents: String) -> Self {
        Self {
            kind: kind.into(),
            path,
            contents,
            mode: WriteMode::Update,
        }
    }
}

/// File-system side of generation.
///
/// In dry-run mode nothing touches the disk; planned contents are remembered
/// so later steps of the same run see them as if they had been written.
#[derive(Debug, Default)]
pub struct ArtifactWriter {
    dry_run: bool,
    planned: BTreeMap<PathBuf, String>,
}

impl ArtifactWriter {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            planned: BTreeMap::new(),
        }
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.planned.contains_key(path) || path.exists()
    }

    /// Current contents, including planned dry-run writes
    pub fn read(&self, path: &Path) -> GeneratorResult<Option<String>> {
        if let Some(contents) = self.planned.get(path) {
            return Ok(Some(contents.clone()));
        }
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(path)
            .map(Some)
            .map_err(|e| GeneratorError::io(path, e))
    }

    /// Write every pending artifact in order.
    pub fn commit(&mut self, pending: Vec<PendingArtifact>) -> GeneratorResult<Vec<GeneratedArtifact>> {
        pending.into_iter().map(|p| self.write(p)).collect()
    }

    /// Write one artifact according to its [`WriteMode`]
    pub fn write(&mut self, pending: PendingArtifact) -> GeneratorResult<GeneratedArtifact> {
        let PendingArtifact {
            kind,
            path,
            contents,
            mode,
        } = pending;
        let existed = self.exists(&path);

        if existed && mode == WriteMode::CreateOnly {
            println!("⚠️  Skipping existing {kind} file: {path:?}");
            return Ok(GeneratedArtifact {
                kind,
                path,
                contents,
                status: ArtifactStatus::Skipped,
            });
        }

        let status = if self.dry_run {
            println!("📝 Would write {kind} → {path:?}");
            self.planned.insert(path.clone(), contents.clone());
            ArtifactStatus::Planned
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
            }
            fs::write(&path, &contents).map_err(|e| GeneratorError::io(&path, e))?;
            match (mode, existed) {
                (WriteMode::Update, true) => {
                    println!("🔧 Updated {kind} → {path:?}");
                    ArtifactStatus::Updated
                }
                (WriteMode::Overwrite, true) => {
                    println!("♻️  Overwrote {kind} → {path:?}");
                    ArtifactStatus::Overwritten
                }
                _ => {
                    println!("✅ Generated {kind} → {path:?}");
                    ArtifactStatus::Created
                }
            }
        };
        tracing::debug!(kind = %kind, path = %path.display(), status = %status, "artifact written");

        Ok(GeneratedArtifact {
            kind,
            path,
            contents,
            status,
        })
    }

    /// Record an artifact that was examined but needs no change
    pub fn unchanged(&self, kind: impl Into<String>, path: PathBuf, contents: String, reason: &str) -> GeneratedArtifact {
        let kind = kind.into();
        println!("ℹ️  {reason}: {path:?}");
        GeneratedArtifact {
            kind,
            path,
            contents,
            status: ArtifactStatus::Skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_only_skips_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app/Models/Product.php");
        let mut writer = ArtifactWriter::new(false);

        let first = writer
            .write(PendingArtifact::create("model", path.clone(), "one".to_string()))
            .unwrap();
        assert_eq!(first.status, ArtifactStatus::Created);

        let second = writer
            .write(PendingArtifact::create("model", path.clone(), "two".to_string()))
            .unwrap();
        assert_eq!(second.status, ArtifactStatus::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "one");

        let third = writer
            .write(PendingArtifact::overwrite("model", path.clone(), "three".to_string()))
            .unwrap();
        assert_eq!(third.status, ArtifactStatus::Overwritten);
        assert_eq!(fs::read_to_string(&path).unwrap(), "three");
    }

    #[test]
    fn test_update_of_missing_file_counts_as_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes/api.php");
        let mut writer = ArtifactWriter::new(false);

        let artifact = writer
            .write(PendingArtifact::update("route file", path, "<?php\n".to_string()))
            .unwrap();
        assert_eq!(artifact.status, ArtifactStatus::Created);
    }

    #[test]
    fn test_failed_commit_keeps_earlier_writes() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("app/Models/Product.php");
        let blocker = dir.path().join("app/Http");
        fs::create_dir_all(dir.path().join("app")).unwrap();
        fs::write(&blocker, "not a directory").unwrap();
        let mut writer = ArtifactWriter::new(false);

        let result = writer.commit(vec![
            PendingArtifact::create("model", model.clone(), "model".to_string()),
            PendingArtifact::create("controller", blocker.join("Controllers/ProductController.php"), "c".to_string()),
        ]);
        assert!(matches!(result, Err(GeneratorError::Io { .. })));
        assert_eq!(fs::read_to_string(&model).unwrap(), "model");
    }

    #[test]
    fn test_dry_run_remembers_planned_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app/Support/Filter.php");
        let mut writer = ArtifactWriter::new(true);

        let artifacts = writer
            .commit(vec![PendingArtifact::create("filter", path.clone(), "planned".to_string())])
            .unwrap();
        assert_eq!(artifacts[0].status, ArtifactStatus::Planned);
        assert!(!path.exists());
        assert!(writer.exists(&path));
        assert_eq!(writer.read(&path).unwrap().as_deref(), Some("planned"));
    }
}
