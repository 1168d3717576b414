//! The Metalink output contract (§4.C) and a reference XML parser.
//!
//! The mirror-selection core treats Metalink parsing as an external
//! collaborator and only depends on this output shape. The parser below
//! exists so the contract is backed by something real and testable, built
//! on `quick-xml` the way the rest of this crate's pack leans on it for
//! XML; the mirror core itself never calls it directly.
use serde::{Deserialize, Deserializer};
use std::io::BufRead;

use crate::error::LibrepoError;

/// Parse a `preference` attribute leniently: absent is handled by serde's
/// own `default` (0), and a present-but-non-numeric value defaults to 0
/// with a warning rather than failing the whole document, matching
/// `lr_xml_parser_strtoll`'s behaviour on unparseable integers. A valid
/// negative value (e.g. `-5`) is kept verbatim, not clamped.
fn deserialize_preference<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().parse::<i32>() {
        Ok(value) => Ok(value),
        Err(_) => {
            tracing::warn!(raw = %raw, "metalink <url> preference attribute is not a valid integer, defaulting to 0");
            Ok(0)
        }
    }
}

/// One `<hash>` entry under a Metalink file's `<verification>` block.
/// Ignored by the mirror core; kept for API fidelity with the original
/// `LrMetalinkHash`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetalinkHash {
    #[serde(rename = "@type")]
    pub type_: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// One `<url>` entry under a Metalink file's `<resources>` block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetalinkUrl {
    #[serde(rename = "@protocol", default)]
    pub protocol: Option<String>,
    #[serde(rename = "@type", default)]
    pub type_: Option<String>,
    #[serde(rename = "@location", default)]
    pub location: Option<String>,
    #[serde(rename = "@preference", default, deserialize_with = "deserialize_preference")]
    pub preference: i32,
    #[serde(rename = "$text", default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawVerification {
    #[serde(rename = "hash", default)]
    hashes: Vec<MetalinkHash>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawResources {
    #[serde(rename = "url", default)]
    urls: Vec<MetalinkUrl>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFile {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    verification: Option<RawVerification>,
    #[serde(default)]
    resources: Option<RawResources>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFiles {
    #[serde(rename = "file", default)]
    files: Vec<RawFile>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMetalink {
    files: RawFiles,
}

/// Everything the mirror core can read out of a parsed Metalink document:
/// the ordered list of mirror URLs, plus the filename/timestamp/size/hash
/// metadata the mirror core ignores but downstream checksum verification
/// (out of scope here) needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metalink {
    pub filename: Option<String>,
    pub timestamp: Option<i64>,
    pub size: Option<u64>,
    pub hashes: Vec<MetalinkHash>,
    pub urls: Vec<MetalinkUrl>,
}

impl Metalink {
    /// Parse a Metalink XML document from a string.
    pub fn from_xml_str(xml: &str) -> Result<Self, LibrepoError> {
        let raw: RawMetalink =
            quick_xml::de::from_str(xml).map_err(LibrepoError::ParseError)?;
        Ok(Self::from_raw(raw))
    }

    /// Parse a Metalink XML document from any `BufRead` source.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LibrepoError> {
        let raw: RawMetalink =
            quick_xml::de::from_reader(reader).map_err(LibrepoError::ParseError)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawMetalink) -> Self {
        // The Metalink target format only ever describes a single <file>;
        // if more than one is present (malformed input) we use the first
        // and log the rest as ignored, rather than guessing which matters.
        let mut files = raw.files.files;
        if files.len() > 1 {
            tracing::warn!(count = files.len(), "metalink document has more than one <file>, using the first");
        }
        let Some(file) = files.drain(..).next() else {
            return Self::default();
        };

        let urls = file
            .resources
            .map(|r| r.urls)
            .unwrap_or_default()
            .into_iter()
            .map(|u| {
                if u.preference == 0 {
                    tracing::warn!(url = %u.url, "metalink <url> has preference 0 (absent, malformed, or explicitly zero)");
                }
                u
            })
            .collect();

        Self {
            filename: file.name,
            timestamp: file.timestamp,
            size: file.size,
            hashes: file.verification.map(|v| v.hashes).unwrap_or_default(),
            urls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<metalink>
  <files>
    <file name="repomd.xml">
      <size>6285</size>
      <verification>
        <hash type="sha256">deadbeef</hash>
      </verification>
      <resources>
        <url protocol="http" type="http" location="US" preference="100">http://foo/repodata/repomd.xml</url>
        <url protocol="ftp" type="ftp" location="CZ" preference="95">ftp://bar/repodata/repomd.xml</url>
      </resources>
    </file>
  </files>
</metalink>"#;

    #[test]
    fn parses_urls_in_document_order() {
        let metalink = Metalink::from_xml_str(SAMPLE).unwrap();
        assert_eq!(metalink.filename.as_deref(), Some("repomd.xml"));
        assert_eq!(metalink.urls.len(), 2);
        assert_eq!(metalink.urls[0].url, "http://foo/repodata/repomd.xml");
        assert_eq!(metalink.urls[0].preference, 100);
        assert_eq!(metalink.urls[1].preference, 95);
        assert_eq!(metalink.hashes[0].type_, "sha256");
    }

    #[test]
    fn negative_preference_survives_verbatim() {
        const XML: &str = r#"<?xml version="1.0"?>
<metalink>
  <files>
    <file name="repomd.xml">
      <resources>
        <url protocol="http" type="http" location="US" preference="100">http://foo/repodata/repomd.xml</url>
        <url protocol="ftp" type="ftp" location="CZ" preference="-5">ftp://bar/repodata/repomd.xml</url>
      </resources>
    </file>
  </files>
</metalink>"#;
        let metalink = Metalink::from_xml_str(XML).unwrap();
        assert_eq!(metalink.urls[1].preference, -5);
    }

    #[test]
    fn non_numeric_preference_defaults_to_zero_without_failing_the_document() {
        const XML: &str = r#"<?xml version="1.0"?>
<metalink>
  <files>
    <file name="repomd.xml">
      <resources>
        <url protocol="http" type="http" location="US" preference="abc">http://foo/repodata/repomd.xml</url>
      </resources>
    </file>
  </files>
</metalink>"#;
        let metalink = Metalink::from_xml_str(XML).unwrap();
        assert_eq!(metalink.urls.len(), 1);
        assert_eq!(metalink.urls[0].preference, 0);
    }
}
