//! This is where the [`Protocol`] enum and the URL classifier live.
use serde::{Deserialize, Serialize};

/// The protocol a mirror URL was classified as, determined purely by prefix
/// matching on the scheme (case-sensitive).
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// `http://` or `https://`.
    #[serde(rename = "http")]
    Http,

    /// `ftp://`.
    #[serde(rename = "ftp")]
    Ftp,

    /// `file:/` (single slash accepted, so `file:/x` and `file:///x` both match).
    #[serde(rename = "file")]
    File,

    /// `rsync://`.
    #[serde(rename = "rsync")]
    Rsync,

    /// `oci://`.
    #[serde(rename = "oci")]
    Oci,

    /// Anything that doesn't match a recognized scheme.
    #[serde(rename = "other")]
    Other,
}

/// Classify a URL by its scheme prefix. Pure and total; never fails.
///
/// Order matters: `file:/` is checked with a single trailing slash so that
/// both `file:/x` and `file:///x` are recognized, matching librepo's
/// `lr_detect_protocol`.
pub fn classify(url: &str) -> Protocol {
    if url.starts_with("http://") || url.starts_with("https://") {
        Protocol::Http
    } else if url.starts_with("ftp://") {
        Protocol::Ftp
    } else if url.starts_with("file:/") {
        Protocol::File
    } else if url.starts_with("rsync://") {
        Protocol::Rsync
    } else if url.starts_with("oci://") {
        Protocol::Oci
    } else {
        Protocol::Other
    }
}

/// Return the scheme + authority of `url`, with the path component removed
/// and no trailing slash. URLs without a recognizable scheme are returned
/// unchanged. Used to deduplicate mirrors by host before probing (§4.G).
pub fn host_only(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        // `file:/single-slash` has no `://`; treat it as having no authority
        // to strip past, same as librepo's lr_url_without_path.
        return url.to_owned();
    };
    let authority_start = scheme_end + 3;
    let rest = &url[authority_start..];
    let path_start = rest.find('/').map(|i| authority_start + i);
    match path_start {
        Some(i) => url[..i].to_owned(),
        None => url.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_recognizes_every_scheme() {
        assert_eq!(classify("http://foo"), Protocol::Http);
        assert_eq!(classify("https://foo"), Protocol::Http);
        assert_eq!(classify("ftp://foo"), Protocol::Ftp);
        assert_eq!(classify("file:/foo"), Protocol::File);
        assert_eq!(classify("file:///foo"), Protocol::File);
        assert_eq!(classify("rsync://foo"), Protocol::Rsync);
        assert_eq!(classify("oci://foo"), Protocol::Oci);
        assert_eq!(classify("nfs://foo"), Protocol::Other);
        assert_eq!(classify("not a url at all"), Protocol::Other);
    }

    #[test]
    fn classify_is_case_sensitive_on_scheme() {
        assert_eq!(classify("HTTP://foo"), Protocol::Other);
    }

    #[test]
    fn host_only_strips_path() {
        assert_eq!(host_only("http://example.com/some/path"), "http://example.com");
        assert_eq!(host_only("http://example.com/"), "http://example.com");
        assert_eq!(host_only("http://example.com"), "http://example.com");
    }

    #[test]
    fn host_only_preserves_empty_file_authority() {
        assert_eq!(host_only("file:///var/cache/repo"), "file://");
    }

    #[test]
    fn host_only_returns_unrecognizable_urls_unchanged() {
        assert_eq!(host_only("not-a-url"), "not-a-url");
    }
}
