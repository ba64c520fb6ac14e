//! Relative path checks for files stored inside a Version

/// A stored path is relative, linux-style, and never escapes the component root
pub fn is_valid_path(path: &str) -> bool {
    if path.trim().is_empty() || path != path.trim() {
        return false;
    }
    if path.starts_with('/') || path.contains('\\') || path.contains('\0') {
        return false;
    }
    path.split('/').all(|segment| !segment.is_empty() && segment != "..")
}

#[cfg(test)]
mod tests {
    include!("paths.test.rs");
}
