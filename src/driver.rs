// src/driver.rs
use serde_json::Value;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::{
    canon,
    config::Config,
    error::SortError,
    types::{BatchReport, FailedFile},
};

/// Parses, normalizes and pretty-prints one document. `path` only labels errors.
pub fn render(path: &Path, raw: &str, indent: usize) -> Result<String, SortError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| SortError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(canon::to_pretty_string(&canon::normalize(value), indent)?)
}

pub async fn sort_file(path: &Path, config: &Config) -> Result<(), SortError> {
    sort_file_to(path, path, config).await
}

pub async fn sort_file_to(input: &Path, output: &Path, config: &Config) -> Result<(), SortError> {
    let raw = fs::read_to_string(input).await.map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            SortError::NotFound(input.to_path_buf())
        } else {
            SortError::Read {
                path: input.to_path_buf(),
                source,
            }
        }
    })?;
    let formatted = render(input, &raw, config.indent)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| SortError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    fs::write(output, formatted)
        .await
        .map_err(|source| SortError::Write {
            path: output.to_path_buf(),
            source,
        })?;

    info!("Sorted JSON saved to: {}", output.display());
    Ok(())
}

/// Normalizes every `*.json` file under `input_dir` into the same relative
/// location under `output_dir`. Per-file failures are logged and collected
/// in the report; only a missing or unreadable input directory aborts.
pub async fn sort_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: &Config,
) -> Result<BatchReport, SortError> {
    match fs::metadata(input_dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(SortError::NotADirectory(input_dir.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SortError::NotFound(input_dir.to_path_buf()))
        }
        Err(source) => {
            return Err(SortError::Read {
                path: input_dir.to_path_buf(),
                source,
            })
        }
    }
    fs::create_dir_all(output_dir)
        .await
        .map_err(|source| SortError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let mut report = BatchReport::default();
    let files = discover(input_dir, output_dir, &mut report).await?;
    info!("found {} JSON file(s) in {}", files.len(), input_dir.display());

    for file in files {
        let relative = file.strip_prefix(input_dir).unwrap_or(&file);
        let target = output_dir.join(relative);
        match sort_file_to(&file, &target, config).await {
            Ok(()) => report.processed.push(file),
            Err(e) => record_failure(&mut report, file, e),
        }
    }
    Ok(report)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

// Walks without following directory symlinks, returning files in sorted
// order. The output directory is skipped so a nested output tree is never
// fed back in.
async fn discover(
    root: &Path,
    skip: &Path,
    report: &mut BatchReport,
) -> Result<Vec<PathBuf>, SortError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.path() != skip);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(SortError::Read {
                    path: root.to_path_buf(),
                    source: err.into(),
                })
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                let e = SortError::Read {
                    path: path.clone(),
                    source: err.into(),
                };
                record_failure(report, path, e);
                continue;
            }
        };

        let path = entry.path();
        let file_type = entry.file_type();
        if file_type.is_file() {
            if is_json(path) {
                files.push(path.to_path_buf());
            }
        } else if file_type.is_symlink() && is_json(path) {
            match fs::metadata(path).await {
                Ok(meta) if meta.is_file() => files.push(path.to_path_buf()),
                Ok(_) => debug!("skipping non-file link {}", path.display()),
                Err(source) => {
                    let e = SortError::Read {
                        path: path.to_path_buf(),
                        source,
                    };
                    record_failure(report, path.to_path_buf(), e);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

fn record_failure(report: &mut BatchReport, path: PathBuf, e: SortError) {
    error!("Error processing JSON: {e}");
    report.failed.push(FailedFile {
        path,
        error: e.to_string(),
    });
}
