//! The flat mirrorlist file format: one URL per line, `#`-comments and
//! blank lines ignored. Trivial by design (§1: "noted but not elaborated").

/// Parse a flat mirrorlist file's contents into an ordered list of raw URL
/// strings, ready to be fed to [`crate::Mirrorlist::append_flat`].
pub fn parse_flat_mirrorlist(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}
