//! Helpers for dotted, package-qualified type names.

/// Returns `true` if `name` carries a package prefix.
pub fn is_qualified(name: &str) -> bool {
    name.contains('.')
}

/// The package portion of a qualified name, or `None` for a bare name.
pub fn package_of(name: &str) -> Option<&str> {
    name.rfind('.').map(|i| &name[..i])
}

/// The trailing segment of a qualified name.
pub fn simple_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

/// Prefixes `name` with `package`. An empty package leaves the name as is.
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

/// Splits a comma separated list, trimming entries and skipping blanks.
pub fn split_list(src: &str) -> impl Iterator<Item = &str> + '_ {
    src.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Treats whitespace-only input as absent.
pub fn non_blank(src: &str) -> Option<&str> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
