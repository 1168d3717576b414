//! The mirrorlist builder (§4.E): a composable, additive assembler that
//! turns raw URLs, flat lists, Metalink views, and other mirrorlists into a
//! single ordered [`Mirrorlist`].
use crate::metalink::Metalink;
use crate::mirror::{MirrorEntry, DEFAULT_PREFERENCE};
use crate::url_vars::{substitute, UrlVars};

/// An ordered sequence of mirror entries. Order is insertion order modulo
/// deduplication; duplicates are *not* removed here (only the cross-handle
/// sorter in [`crate::sorter`] deduplicates, and only by host).
///
/// There is no `free`/`drop` operation to call: `Drop` releases every entry
/// when a `Mirrorlist` goes out of scope, unlike the C original's
/// `lr_lrmirrorlist_free`, which the caller had to invoke explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mirrorlist {
    entries: Vec<MirrorEntry>,
}

impl Mirrorlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a `Mirrorlist` directly from already-constructed entries,
    /// without re-substituting or re-classifying them. Used by the
    /// cross-handle sorter to rebuild a list in probed order (§9: build a
    /// new list rather than mutate the old one in place).
    pub fn from_entries(entries: Vec<MirrorEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MirrorEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<MirrorEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a single raw URL. A no-op if `url` is empty. Classifies the
    /// (substituted) URL and appends with [`DEFAULT_PREFERENCE`].
    pub fn append_url(&mut self, url: &str, vars: Option<&UrlVars>) -> &mut Self {
        if url.is_empty() {
            return self;
        }
        let url = substitute(url, vars);
        self.entries.push(MirrorEntry::new(url, DEFAULT_PREFERENCE));
        self
    }

    /// Append every URL in `flat`, in order. Empty URLs are skipped.
    pub fn append_flat(&mut self, flat: &[String], vars: Option<&UrlVars>) -> &mut Self {
        for url in flat {
            self.append_url(url, vars);
        }
        self
    }

    /// Append every URL entry from a parsed Metalink, in document order.
    /// Entries with an empty URL are skipped. If `suffix` is given and a
    /// URL ends with it, exactly that trailing occurrence is stripped
    /// before substitution/classification — this is how librepo turns
    /// `.../repodata/repomd.xml` Metalink entries into base repository
    /// URLs. Preference is taken verbatim from the Metalink entry.
    pub fn append_metalink(
        &mut self,
        metalink: &Metalink,
        suffix: Option<&str>,
        vars: Option<&UrlVars>,
    ) -> &mut Self {
        for entry in &metalink.urls {
            if entry.url.is_empty() {
                continue;
            }
            let stripped = match suffix {
                Some(suffix) if entry.url.ends_with(suffix) => {
                    &entry.url[..entry.url.len() - suffix.len()]
                }
                _ => entry.url.as_str(),
            };
            let url = substitute(stripped, vars);
            self.entries.push(MirrorEntry::new(url, entry.preference));
        }
        self
    }

    /// Deep-copy every entry of `other` that has a non-empty URL. Preference
    /// and protocol are copied as-is (no re-classification); the copy's
    /// `fails` counter resets to 0, independent of the source's.
    pub fn append_list(&mut self, other: &Mirrorlist) -> &mut Self {
        for entry in &other.entries {
            if entry.url.is_empty() {
                continue;
            }
            self.entries.push(MirrorEntry {
                url: entry.url.clone(),
                protocol: entry.protocol,
                preference: entry.preference,
                fails: 0,
            });
        }
        self
    }
}
