use std::path::{Path, PathBuf};

/// Renders paths for messages, resolving as much of them as exists on disk.
///
/// A partially materialized tree usually has a missing tail, so canonicalizing
/// the whole path fails. The nearest existing ancestor is canonicalized instead
/// and the missing tail is appended to it unchanged.
pub trait PathDisplayExt {
    fn display_best_effort(&self) -> String;
}

impl PathDisplayExt for Path {
    fn display_best_effort(&self) -> String {
        resolve_existing_prefix(self)
            .unwrap_or_else(|| self.to_path_buf())
            .display()
            .to_string()
    }
}

fn resolve_existing_prefix(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .filter(|ancestor| !ancestor.as_os_str().is_empty())
        .find_map(|ancestor| {
            let canonical = ancestor.canonicalize().ok()?;
            let tail = path.strip_prefix(ancestor).ok()?;
            Some(if tail.as_os_str().is_empty() {
                canonical
            } else {
                canonical.join(tail)
            })
        })
}
