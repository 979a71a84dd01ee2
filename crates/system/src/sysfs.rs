//! Small helpers for reading Linux sysfs attribute files.

use std::path::Path;

/// Read an attribute file and trim the trailing newline.
pub fn read_trimmed(path: impl AsRef<Path>) -> Option<String> {
    std::fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

/// Read an attribute file holding a single unsigned integer.
pub fn read_u64(path: impl AsRef<Path>) -> Option<u64> {
    read_trimmed(path)?.parse().ok()
}

/// Entries of `dir` whose file name starts with `prefix`, sorted by name.
pub fn entries_with_prefix(dir: impl AsRef<Path>, prefix: &str) -> Vec<std::path::PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix))
        })
        .collect();
    paths.sort_by(|a, b| natural_key(a).cmp(&natural_key(b)));
    paths
}

/// Sort `hwmon10` after `hwmon9`, then by full name.
fn natural_key(path: &Path) -> (String, u64, String) {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let digits_at = name.find(|c: char| c.is_ascii_digit()).unwrap_or(name.len());
    let (stem, digits) = name.split_at(digits_at);
    let number = digits
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0);
    (stem.to_string(), number, name.to_string())
}
