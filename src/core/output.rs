//! All-or-nothing writing of a run's output documents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempPath};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot stage {}: {source}", path.display())]
    Stage {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot move existing {} aside: {source}", path.display())]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot persist {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A rendered document and the file name it goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub contents: String,
}

/// Writes documents into one directory.
///
/// Every document is first written to a temporary file next to its
/// target. Only when all of them are staged are they renamed into place.
/// A file already sitting at a target is moved aside first; if a later
/// rename fails, new files are removed and the moved-aside files are put
/// back, so a failed call leaves the directory as it found it.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

/// A document renamed into place, with the file it displaced.
struct Committed {
    target: PathBuf,
    backup: Option<TempPath>,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_all(&self, documents: &[Document]) -> Result<Vec<PathBuf>, OutputError> {
        fs::create_dir_all(&self.dir).map_err(|source| OutputError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let mut staged = Vec::with_capacity(documents.len());
        for doc in documents {
            let target = self.dir.join(&doc.file_name);
            let tmp = stage(&self.dir, &doc.contents).map_err(|source| OutputError::Stage {
                path: target.clone(),
                source,
            })?;
            debug!(path = %target.display(), bytes = doc.contents.len(), "staged document");
            staged.push((tmp, target));
        }

        let mut committed: Vec<Committed> = Vec::with_capacity(staged.len());
        for (tmp, target) in staged {
            let backup = if target.is_file() {
                match move_aside(&self.dir, &target) {
                    Ok(backup) => Some(backup),
                    Err(source) => {
                        roll_back(committed);
                        return Err(OutputError::Backup {
                            path: target,
                            source,
                        });
                    }
                }
            } else {
                None
            };

            if let Err(err) = tmp.persist(&target) {
                if backup.is_some() {
                    committed.push(Committed {
                        target: target.clone(),
                        backup,
                    });
                }
                roll_back(committed);
                return Err(OutputError::Persist {
                    path: target,
                    source: err.error,
                });
            }
            debug!(path = %target.display(), "persisted document");
            committed.push(Committed { target, backup });
        }

        let mut written = Vec::with_capacity(committed.len());
        for entry in committed {
            if let Some(backup) = entry.backup {
                if let Err(err) = backup.close() {
                    warn!(path = %entry.target.display(), "cannot remove backup: {}", err);
                }
            }
            written.push(entry.target);
        }

        Ok(written)
    }
}

fn stage(dir: &Path, contents: &str) -> std::io::Result<NamedTempFile> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

/// Rename `target` to a fresh temporary path in `dir`.
fn move_aside(dir: &Path, target: &Path) -> std::io::Result<TempPath> {
    let backup = NamedTempFile::new_in(dir)?.into_temp_path();
    fs::rename(target, &backup)?;
    Ok(backup)
}

/// Undo `committed` newest first: restore displaced files, remove new ones.
fn roll_back(committed: Vec<Committed>) {
    for entry in committed.into_iter().rev() {
        let result = match entry.backup {
            Some(backup) => backup.persist(&entry.target).map_err(|e| e.error),
            None => fs::remove_file(&entry.target),
        };
        if let Err(err) = result {
            warn!(path = %entry.target.display(), "rollback failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, contents: &str) -> Document {
        Document {
            file_name: name.to_string(),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn writes_every_document() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());
        let written = writer
            .write_all(&[doc("a.txt", "alpha"), doc("b.txt", "beta")])
            .unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "beta");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 2);
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out/run1");
        OutputWriter::new(&nested)
            .write_all(&[doc("x.pddl", "(define)")])
            .unwrap();
        assert!(nested.join("x.pddl").exists());
    }

    #[test]
    fn failed_persist_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        // a directory in the way makes the second rename fail
        fs::create_dir(dir.path().join("blocked")).unwrap();
        fs::write(dir.path().join("blocked/inner"), "keep").unwrap();

        let err = OutputWriter::new(dir.path())
            .write_all(&[doc("first.txt", "1"), doc("blocked", "2")])
            .unwrap_err();

        assert!(matches!(err, OutputError::Persist { .. }));
        assert!(!dir.path().join("first.txt").exists());
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["blocked".to_string()]);
    }

    #[test]
    fn replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "old").unwrap();

        OutputWriter::new(dir.path())
            .write_all(&[doc("a.txt", "new")])
            .unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_rerun_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("problem-2.pddl"), "previous run").unwrap();
        fs::create_dir(dir.path().join("blocked")).unwrap();
        fs::write(dir.path().join("blocked/inner"), "keep").unwrap();

        let err = OutputWriter::new(dir.path())
            .write_all(&[doc("problem-2.pddl", "this run"), doc("blocked", "2")])
            .unwrap_err();

        assert!(matches!(err, OutputError::Persist { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("problem-2.pddl")).unwrap(),
            "previous run"
        );
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["blocked".to_string(), "problem-2.pddl".to_string()]);
    }
}
