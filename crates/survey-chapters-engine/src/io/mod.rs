//! Chapter files on disk.
//!
//! Writes replace the whole file. Nothing is locked: if two tools save the
//! same chapter, the last write wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::ChapterCodec;
use crate::models::{Chapter, ChapterId, Language};
use crate::naming::NamingError;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Chapter file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid chapters directory: {0}")]
    InvalidChaptersDir(String),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error("No chapter number is left after {0}")]
    NumberExhausted(u32),
    #[error("Chapter {number} is already loaded from {}", .kept.display())]
    DuplicateNumber { number: u32, kept: PathBuf },
}

/// A file that could not be loaded during a batch load
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: IoError,
}

/// Outcome of [`load_chapters`]: what loaded, and what was skipped
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Sorted by chapter number
    pub chapters: Vec<Chapter>,
    pub failures: Vec<LoadFailure>,
}

pub fn chapter_path(chapters_dir: &Path, id: ChapterId) -> PathBuf {
    chapters_dir.join(id.file_name())
}

pub fn chapter_exists(chapters_dir: &Path, id: ChapterId) -> bool {
    chapter_path(chapters_dir, id).is_file()
}

/// Read and decode one chapter
pub fn read_chapter(
    chapters_dir: &Path,
    id: ChapterId,
    codec: &impl ChapterCodec,
) -> Result<Chapter, IoError> {
    let path = chapter_path(chapters_dir, id);
    if !path.exists() {
        return Err(IoError::NotFound(path));
    }
    let html = fs::read_to_string(&path)?;
    Ok(codec.decode(&html, id))
}

/// Encode a chapter and write it to its file, returning the path written
pub fn save_chapter(
    chapters_dir: &Path,
    chapter: &Chapter,
    codec: &impl ChapterCodec,
) -> Result<PathBuf, IoError> {
    validate_chapters_dir(chapters_dir)?;
    let path = chapter_path(chapters_dir, chapter.id());
    fs::write(&path, codec.encode(chapter))?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

pub fn delete_chapter(chapters_dir: &Path, id: ChapterId) -> Result<(), IoError> {
    let path = chapter_path(chapters_dir, id);
    if !path.exists() {
        return Err(IoError::NotFound(path));
    }
    fs::remove_file(&path)?;
    log::info!("deleted {}", path.display());
    Ok(())
}

/// One more than the highest chapter number present for `language`
pub fn next_chapter_number(chapters_dir: &Path, language: Language) -> Result<u32, IoError> {
    let highest = chapter_files(chapters_dir, language)?
        .into_iter()
        .filter_map(|path| file_id(&path).ok())
        .map(|id| id.number)
        .max()
        .unwrap_or(0);
    highest
        .checked_add(1)
        .ok_or(IoError::NumberExhausted(highest))
}

/// Decode every chapter file of one language.
///
/// A file that cannot be named or read is recorded in
/// [`LoadReport::failures`] and the rest are still loaded. Two files naming
/// the same number (`capitulo_1.html`, `capitulo_01.html`) load once: the
/// file with the canonical name wins, otherwise the first in name order.
pub fn load_chapters(
    chapters_dir: &Path,
    language: Language,
    codec: &impl ChapterCodec,
) -> Result<LoadReport, IoError> {
    let mut report = LoadReport::default();
    let mut files: Vec<(PathBuf, Result<ChapterId, IoError>)> =
        chapter_files(chapters_dir, language)?
            .into_iter()
            .map(|path| {
                let id = file_id(&path);
                (path, id)
            })
            .collect();
    files.sort_by_key(|(path, id)| !matches!(id, Ok(id) if path.ends_with(id.file_name())));
    let mut loaded_from: HashMap<u32, PathBuf> = HashMap::new();

    for (path, id) in files {
        let loaded = id.and_then(|id| {
            if let Some(kept) = loaded_from.get(&id.number) {
                return Err(IoError::DuplicateNumber {
                    number: id.number,
                    kept: kept.clone(),
                });
            }
            let html = fs::read_to_string(&path)?;
            loaded_from.insert(id.number, path.clone());
            Ok(codec.decode(&html, id))
        });
        match loaded {
            Ok(chapter) => report.chapters.push(chapter),
            Err(error) => {
                log::warn!("skipping {}: {error}", path.display());
                report.failures.push(LoadFailure { path, error });
            }
        }
    }

    report.chapters.sort_by_key(|c| c.number);
    Ok(report)
}

pub fn validate_chapters_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidChaptersDir(format!(
            "{} does not exist or is not a directory",
            path.display()
        )));
    }

    Ok(())
}

/// Files in `chapters_dir` named `<prefix>_*.html` for `language`, sorted
fn chapter_files(chapters_dir: &Path, language: Language) -> Result<Vec<PathBuf>, IoError> {
    validate_chapters_dir(chapters_dir)?;
    let prefix = format!("{}_", language.file_prefix());

    let mut files = Vec::new();
    for entry in fs::read_dir(chapters_dir)? {
        let path = entry?.path();
        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && name.starts_with(&prefix)
            && name.ends_with(".html")
            && path.is_file()
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_id(path: &Path) -> Result<ChapterId, IoError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    Ok(ChapterId::from_file_name(name)?)
}
