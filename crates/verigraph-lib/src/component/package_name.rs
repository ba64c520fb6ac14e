//! npm package name rules
//!
//! A dependency name is accepted when it is valid for new packages or for
//! legacy packages. The legacy rules are the looser set (uppercase, long names
//! and `~'!()*` are tolerated), so only violations of those are reported.

const BLOCKED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Characters `encodeURIComponent` leaves untouched
fn is_url_safe(part: &str) -> bool {
    part.chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_.!~*'()".contains(c))
}

/// Validate a package name, returning every rule it breaks
pub fn validate_package_name(name: &str) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push("name length must be greater than zero".to_string());
        return Err(errors);
    }
    if name.starts_with('.') {
        errors.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        errors.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        errors.push("name cannot contain leading or trailing spaces".to_string());
    }
    if BLOCKED_NAMES.contains(&name.to_lowercase().as_str()) {
        errors.push(format!("{} is a blocked name", name));
    }

    let url_safe = match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((scope, package)) => {
            !scope.is_empty() && !package.is_empty() && is_url_safe(scope) && is_url_safe(package)
        }
        None => is_url_safe(name),
    };
    if !url_safe {
        errors.push("name can only contain URL-friendly characters".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    include!("package_name.test.rs");
}
