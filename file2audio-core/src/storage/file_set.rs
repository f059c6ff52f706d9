use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::error::CodecError;
use crate::models::named_blob::NamedBlob;

/// Read files from disk, naming each by its final path component.
pub fn load_named_blobs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<NamedBlob>, CodecError> {
    paths
        .iter()
        .map(|path| -> Result<NamedBlob, CodecError> {
            let path = path.as_ref();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| CodecError::Storage(format!("{} has no file name", path.display())))?;
            let data = fs::read(path)
                .map_err(|e| CodecError::Storage(format!("failed to read {}: {}", path.display(), e)))?;
            log::debug!("loaded {} ({} bytes)", name, data.len());
            Ok(NamedBlob { name, data })
        })
        .collect()
}

/// Write decoded files into `dir`, returning the paths written in input order.
///
/// Names come from untrusted input, so only their final component is used:
/// directory parts are dropped, and empty, `.` or `..` names become
/// `file_<index>`. Repeated names get a ` (n)` suffix before the extension.
/// Existing files are only replaced when `overwrite` is set.
///
/// If a write fails, files this call created are removed again before the
/// error is returned. Files that existed beforehand are left in place.
pub fn write_named_blobs(dir: &Path, files: &[NamedBlob], overwrite: bool) -> Result<Vec<PathBuf>, CodecError> {
    fs::create_dir_all(dir)
        .map_err(|e| CodecError::Storage(format!("failed to create directory {}: {}", dir.display(), e)))?;

    // Resolve every target before writing anything.
    let mut taken = HashSet::new();
    let mut targets = Vec::with_capacity(files.len());
    for (index, file) in files.iter().enumerate() {
        let base = safe_file_name(&file.name, index);
        let name = unique_name(&base, &mut taken);
        let path = dir.join(&name);
        let existed = path.exists();
        if !overwrite && existed {
            return Err(CodecError::Storage(format!("{} already exists", path.display())));
        }
        targets.push((path, existed));
    }

    let mut created: Vec<&Path> = Vec::new();
    for (file, (path, existed)) in files.iter().zip(&targets) {
        if let Err(e) = fs::write(path, &file.data) {
            remove_created(&created);
            return Err(CodecError::Storage(format!("failed to write {}: {}", path.display(), e)));
        }
        if !existed {
            created.push(path.as_path());
        }
        log::debug!("wrote {} ({} bytes)", path.display(), file.data.len());
    }
    Ok(targets.into_iter().map(|(path, _)| path).collect())
}

fn remove_created(paths: &[&Path]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("failed to remove partial output {}: {}", path.display(), e);
        }
    }
}

/// Reduce an archived name to a single safe path component.
pub fn safe_file_name(name: &str, index: usize) -> String {
    let last = name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    match last {
        "" | "." | ".." => format!("file_{index}"),
        other => other.to_string(),
    }
}

fn unique_name(base: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(base.to_string()) {
        return base.to_string();
    }
    let (stem, ext) = match base.rfind('.') {
        Some(dot) if dot > 0 => (&base[..dot], &base[dot..]),
        _ => (base, ""),
    };
    let mut n = 1;
    loop {
        let candidate = format!("{stem} ({n}){ext}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
