//! Discovery of per-recording detection tables.

use crate::constants::collector::{CSV_EXTENSION, VALIDATE_SUFFIX};
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// A detection table found under the collection root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFile {
    /// Full path to the table.
    pub path: PathBuf,
    /// File name used as the record's source name and exclusion key.
    pub file_name: String,
}

/// Find the detection tables below `root`.
///
/// Each immediate subdirectory `<name>` contributes its CSV files and, when
/// present, the CSV files of `<name>/<name>_Validate`. Tables directly in the
/// root are not included. Entries are returned in path order.
pub fn find_tables(root: &Path) -> Result<Vec<TableFile>> {
    let mut tables = Vec::new();
    for folder in subdirectories(root)? {
        tables.extend(tables_in(&folder)?);

        if let Some(name) = folder.file_name() {
            let validate = folder.join(format!("{}{VALIDATE_SUFFIX}", name.to_string_lossy()));
            if validate.is_dir() {
                tables.extend(tables_in(&validate)?);
            }
        }
    }

    Ok(tables)
}

/// Immediate subdirectories of `root`, in path order.
pub fn subdirectories(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }
    Ok(sorted_entries(root)?
        .into_iter()
        .filter(|path| path.is_dir())
        .collect())
}

/// CSV files directly inside `dir`, in path order.
pub fn tables_in(dir: &Path) -> Result<Vec<TableFile>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.is_file() && is_csv_file(path))
        .filter_map(|path| {
            let file_name = path.file_name()?.to_string_lossy().into_owned();
            Some(TableFile { path, file_name })
        })
        .collect())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        entries.push(entry?.path());
    }
    entries.sort();
    Ok(entries)
}

/// Check if a file is a CSV table.
fn is_csv_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new(CSV_EXTENSION)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, "Common Name,Confidence\n").unwrap();
    }

    #[test]
    fn test_is_csv_file() {
        assert!(is_csv_file(Path::new("rec1.csv")));
        assert!(is_csv_file(Path::new("rec1.BirdNET.results.CSV")));
        assert!(!is_csv_file(Path::new("rec1.txt")));
        assert!(!is_csv_file(Path::new("csv")));
    }

    #[test]
    fn test_find_tables_layout() {
        let root = tempfile::tempdir().unwrap();
        let site = root.path().join("SiteA");
        let validate = site.join("SiteA_Validate");
        let unrelated = site.join("Other");
        fs::create_dir_all(&validate).unwrap();
        fs::create_dir_all(&unrelated).unwrap();

        touch(&root.path().join("root_level.csv"));
        touch(&site.join("a.csv"));
        touch(&site.join("notes.txt"));
        touch(&validate.join("b.csv"));
        touch(&unrelated.join("c.csv"));

        let names: Vec<String> = find_tables(root.path())
            .unwrap()
            .into_iter()
            .map(|t| t.file_name)
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_find_tables_missing_root() {
        let result = find_tables(Path::new("/nonexistent/detections"));
        assert!(matches!(result, Err(Error::DirectoryNotFound { .. })));
    }
}
