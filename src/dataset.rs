//! # Dataset Layout
//!
//! A dataset is a directory of collections, each holding one directory per
//! deployment, each holding media files (possibly nested):
//!
//! ```text
//! data/
//! └── R0001/
//!     ├── R0001_FileTimestampLog.csv
//!     ├── R0001-LOC01/
//!     │   ├── IMG_0001.JPG
//!     │   └── 100RECNX/IMG_0002.JPG
//!     └── R0001-LOC02_b/
//! ```
//!
//! The helpers here list those levels in a stable order so every command
//! walks the dataset the same way.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::media::{natural_cmp, Extension};

/// Collection directories under `data_path`, sorted by name.
///
/// When `filter` is non-empty only the named collections are returned.
pub fn list_collections<S: AsRef<str>>(data_path: &Path, filter: &[S]) -> Result<Vec<PathBuf>> {
    if !data_path.is_dir() {
        return Err(Error::DataPathNotFound {
            path: data_path.to_path_buf(),
        });
    }
    let collections = list_subdirectories(data_path, filter)?;
    for wanted in filter {
        let wanted = wanted.as_ref();
        if !collections.iter().any(|path| dir_name(path) == wanted) {
            log::warn!("Collection '{wanted}' not found in {}", data_path.display());
        }
    }
    Ok(collections)
}

/// Deployment directories of a collection, sorted by name.
pub fn list_deployments<S: AsRef<str>>(collection_path: &Path, filter: &[S]) -> Result<Vec<PathBuf>> {
    list_subdirectories(collection_path, filter)
}

/// `true` when `path` is a directory without any entry.
pub fn is_empty_dir(path: &Path) -> Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Final component of `path` as text, empty when there is none.
pub fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Media files below `deployment_path`, at any depth.
///
/// Only regular files with one of `extensions` are kept; hidden files and
/// directories are skipped. The result is in natural order of the path
/// relative to the deployment, so `IMG_2.JPG` comes before `IMG_10.JPG`.
pub fn media_files(deployment_path: &Path, extensions: &[Extension]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(deployment_path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        match Extension::from_path(entry.path()) {
            Some(extension) if extensions.contains(&extension) => {
                files.push(entry.into_path());
            }
            _ => log::trace!("Ignoring {}", entry.path().display()),
        }
    }

    files.sort_by(|a, b| {
        let a = a.strip_prefix(deployment_path).unwrap_or(a);
        let b = b.strip_prefix(deployment_path).unwrap_or(b);
        natural_cmp(a, b)
    });
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn list_subdirectories<S: AsRef<str>>(parent: &Path, filter: &[S]) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(parent)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let path = entry.path();
        let name = dir_name(&path);
        if filter.is_empty() || filter.iter().any(|f| f.as_ref() == name) {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const NO_FILTER: &[&str] = &[];

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_list_collections_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["R0002", "R0001", "R0003"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        touch(dir.path(), "notes.txt");

        let all = list_collections(dir.path(), NO_FILTER).unwrap();
        let names: Vec<_> = all.iter().map(|p| dir_name(p)).collect();
        assert_eq!(names, vec!["R0001", "R0002", "R0003"]);

        let some = list_collections(dir.path(), &["R0003", "R0009"]).unwrap();
        assert_eq!(some.len(), 1);
        assert_eq!(dir_name(&some[0]), "R0003");
    }

    #[test]
    fn test_list_collections_missing_data_path() {
        let dir = TempDir::new().unwrap();
        let err = list_collections(&dir.path().join("nope"), NO_FILTER).unwrap_err();
        assert!(matches!(err, Error::DataPathNotFound { .. }));
    }

    #[test]
    fn test_is_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(is_empty_dir(dir.path()).unwrap());
        touch(dir.path(), "a.jpg");
        assert!(!is_empty_dir(dir.path()).unwrap());
    }

    #[test]
    fn test_media_files_natural_order_and_filters() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "IMG_10.JPG");
        touch(root, "IMG_2.jpg");
        touch(root, "IMG_1.png");
        touch(root, "clip.MP4");
        touch(root, "notes.txt");
        touch(root, ".hidden.jpg");
        touch(root, ".thumbs/IMG_3.jpg");
        touch(root, "sub/IMG_4.jpg");

        let files = media_files(root, &[Extension::Jpg, Extension::Png]).unwrap();
        let relative: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            relative,
            vec!["IMG_1.png", "IMG_2.jpg", "IMG_10.JPG", "sub/IMG_4.jpg"]
        );
    }

    #[test]
    fn test_media_files_empty_deployment() {
        let dir = TempDir::new().unwrap();
        assert!(media_files(dir.path(), Extension::all()).unwrap().is_empty());
    }
}
