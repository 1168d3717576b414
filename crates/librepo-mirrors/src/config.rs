//! The caller's prototype connection (§6, §9): every field the probe
//! inherits rather than sets itself. The probe sets exactly two things on
//! top of this — the target URL and connect-only mode — everything else
//! (proxy, bound interface, timeouts, DNS) comes from here.
use std::time::Duration;

/// Default connect timeout applied to each probed mirror when the caller
/// doesn't override it. This is unrelated to the overall 2.0 s measurement
/// window (§4.F); it only bounds a single connection attempt.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Network-level configuration duplicated into every connection the probe
/// opens. §9 flags hidden process-wide defaults as a source of surprise in
/// the original; [`ProbeConfig::default()`] is this crate's explicit,
/// documented stand-in for that default template.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// `host:port` of an HTTP(S) proxy to connect through, if any.
    pub proxy: Option<String>,

    /// Local interface or address to bind outgoing connections to.
    ///
    /// Stored for API fidelity with the prototype-connection contract but
    /// not applied to the socket in this implementation — binding to a
    /// specific interface needs raw-socket options (`SO_BINDTODEVICE`/
    /// `IP_BOUND_IF`) that no crate in this pack's dependency set exposes.
    /// See DESIGN.md's Open Question resolution.
    pub bind_interface: Option<String>,

    /// Per-connection timeout for a single probe attempt.
    pub connect_timeout: Duration,

    /// DNS servers to use for resolution, if overriding the OS resolver.
    ///
    /// Stored for API fidelity; resolution is always delegated to the OS
    /// resolver via `tokio::net::lookup_host` (see DESIGN.md).
    pub dns_servers: Option<Vec<std::net::IpAddr>>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            bind_interface: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            dns_servers: None,
        }
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicate this prototype. The probe calls this once per connection
    /// rather than sharing one `ProbeConfig` across tasks (§4.F: "duplicated
    /// from the prototype, not shared").
    pub fn duplicate(&self) -> Self {
        self.clone()
    }
}
