//! This is where the [`MirrorEntry`] struct goes.
use crate::protocol::{self, Protocol};

/// The default preference assigned to mirrors that didn't come from a
/// Metalink (raw URLs, flat-list entries, and copies from another list).
pub const DEFAULT_PREFERENCE: i32 = 100;

/// A single, normalised mirror entry produced by the mirrorlist builder.
///
/// Invariants: `url` is never empty; `protocol` is always `classify(url)`;
/// `preference` is meant to be in `1..=100` but out-of-range values from a
/// Metalink source are kept verbatim for diagnostic purposes, not clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorEntry {
    /// Substituted, suffix-stripped URL. Never empty.
    pub url: String,

    /// Protocol derived from [`MirrorEntry::url`].
    pub protocol: Protocol,

    /// Meant to be 1-100, higher is better; defaults to 100 unless sourced
    /// from a Metalink entry's verbatim preference. Out-of-range values
    /// from a source are kept as-is, not clamped — they should not be
    /// produced by correct sources, but diagnosing them is easier if they
    /// survive unmodified.
    pub preference: i32,

    /// Consecutive-failure counter. Owned-for-writing by the downloader;
    /// this crate only ever initializes it to 0 and reads it back.
    pub fails: u32,
}

impl MirrorEntry {
    pub(crate) fn new(url: String, preference: i32) -> Self {
        let protocol = protocol::classify(&url);
        Self {
            url,
            protocol,
            preference,
            fails: 0,
        }
    }

    /// Host-only form of this mirror's URL (§4.A), used for cross-handle
    /// deduplication and reordering.
    pub fn host_only(&self) -> String {
        protocol::host_only(&self.url)
    }
}
