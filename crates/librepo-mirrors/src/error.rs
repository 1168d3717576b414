//! Error taxonomy (§7). Kinds, not type names: `PerMirrorMeasurementFailure`
//! is deliberately absent here because it is never surfaced as an error —
//! it's encoded as `plain_connect_time = f64::INFINITY` instead.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibrepoError {
    /// Null/empty/malformed argument at a public boundary. Returned
    /// synchronously; no partial state is mutated before this is raised.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A connection resource or async runtime primitive could not be
    /// created. The probe aborts; the caller's mirror list is untouched.
    #[error("resource exhaustion: {0}")]
    ResourceExhaustion(String),

    /// Failure of the underlying transport driver (other than a timeout,
    /// which is per-mirror and not fatal). Already-allocated resources are
    /// released before this propagates.
    #[error("transport driver error: {0}")]
    TransportDriverError(#[from] std::io::Error),

    /// Raised only by the Metalink parser; propagated unchanged.
    #[error("metalink parse error: {0}")]
    ParseError(#[from] quick_xml::de::DeError),
}
