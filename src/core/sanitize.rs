// src/core/sanitize.rs

/// "New York" → "New_York". Only spaces are replaced; staged archives are
/// looked up by this exact stem.
pub fn region_file_stem(name: &str) -> String {
    name.replace(' ', "_")
}

/// Collapse line breaks so free text stays on one CSV line.
pub fn flatten_newlines(s: &str) -> String {
    s.replace(['\n', '\r'], " ")
}

/// Textual forms that count as "no value" after trimming.
pub const EMPTY_MARKERS: [&str; 4] = ["", "None", "nan", "[]"];

pub fn is_blank(s: &str) -> bool {
    EMPTY_MARKERS.contains(&s)
}
