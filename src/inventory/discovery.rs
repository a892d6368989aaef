use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A dump file and the device it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFile {
    pub hostname: String,
    pub path: PathBuf,
}

/// Recursively find files named `file_name` under `root`, in a stable
/// order. A missing root yields no files.
pub fn find_dumps(root: &Path, file_name: &str, hostname_depth: usize) -> Vec<DumpFile> {
    if !root.is_dir() {
        tracing::warn!("Configs directory {} does not exist", root.display());
        return Vec::new();
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable path under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name() != file_name {
            continue;
        }
        match hostname_from_path(root, entry.path(), hostname_depth) {
            Some(hostname) => found.push(DumpFile {
                hostname,
                path: entry.into_path(),
            }),
            None => tracing::warn!(
                "Cannot derive a hostname at depth {} for {}",
                hostname_depth,
                entry.path().display()
            ),
        }
    }

    tracing::debug!("Found {} {} files", found.len(), file_name);
    found
}

/// The directory component at `depth` below `root`.
/// e.g. root=/dumps, path=/dumps/SW-01/2024-06-01/show_vlan.json, depth=0 -> "SW-01"
pub fn hostname_from_path(root: &Path, path: &Path, depth: usize) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components: Vec<_> = relative.components().collect();
    // the file itself never names the host
    components.pop()?;
    components
        .get(depth)
        .and_then(|c| c.as_os_str().to_str())
        .map(str::to_string)
}
