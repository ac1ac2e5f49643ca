//! Detect files in an output directory that a split could clobber.

use std::fs;
use std::io;
use std::path::Path;

/// File names in `dir` ending with `.{extension}`, sorted.
///
/// A missing directory has no conflicts.
pub fn existing_outputs(dir: &Path, extension: &str) -> io::Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(&suffix) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
