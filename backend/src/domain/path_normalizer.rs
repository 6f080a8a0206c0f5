/// Rewrites a server-absolute path into the path a client sees.
///
/// Paths outside `root_dir`, or any path when `root_dir` is empty, are
/// returned untouched. The root itself maps to `/`.
pub fn normalize(root_dir: &str, absolute_path: &str) -> String {
    if root_dir.is_empty() {
        return absolute_path.to_string();
    }

    match absolute_path.strip_prefix(root_dir) {
        None => absolute_path.to_string(),
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        Some(rest) => format!("/{}", rest),
    }
}
