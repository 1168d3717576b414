//! Mirror-selection core for a repository-download library.
//!
//! This crate turns the various sources of mirror URLs — a plain URL, a
//! flat mirrorlist file, a Metalink XML document, or another mirrorlist —
//! into a single ordered [`Mirrorlist`], then (optionally) reorders that
//! list by measured network proximity with [`fastest_mirror`] /
//! [`sort_internal_mirrorlist`] / [`sort_internal_mirrorlists`].
//!
//! It does not perform repository download orchestration, checksum
//! verification, or real bandwidth measurement — only TCP/TLS connect
//! latency, which is a coarse but cheap and ungameable proxy for
//! geographic proximity.

pub mod config;
pub mod error;
pub mod flatlist;
pub mod metalink;
pub mod mirror;
pub mod mirrorlist;
pub mod probe;
pub mod protocol;
pub mod sorter;
pub mod url_vars;

pub use config::ProbeConfig;
pub use error::LibrepoError;
pub use flatlist::parse_flat_mirrorlist;
pub use metalink::{Metalink, MetalinkHash, MetalinkUrl};
pub use mirror::MirrorEntry;
pub use mirrorlist::Mirrorlist;
pub use probe::fastest_mirror;
pub use protocol::{classify, host_only, Protocol};
pub use sorter::{sort_internal_mirrorlist, sort_internal_mirrorlists};
pub use url_vars::{substitute, UrlVars};
