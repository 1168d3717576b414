//! The fastest-mirror probe (§4.F): a concurrent, bounded-duration network
//! probe that opens connect-only connections to many mirror hosts in
//! parallel and sorts them by measured connect time.
//!
//! The source drives a `curl::multi` handle through an explicit
//! poll/perform loop under a 2.0 s wall-clock budget. §9's Design Notes
//! explicitly allow trading that for "many concurrent tasks gathered under
//! a 2-second deadline" provided the contract holds, which is the shape
//! this module takes: one `tokio` task per URL, each individually bounded
//! by `tokio::time::timeout_at` against a shared deadline, gathered with a
//! `JoinSet` the same way a rate-measurement pass gathers concurrent
//! per-mirror measurements.
use std::cmp::Ordering;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::config::ProbeConfig;
use crate::error::LibrepoError;
use crate::protocol::{self, Protocol};

/// The probe's wall-clock measurement window (§4.F).
pub const MEASUREMENT_WINDOW: Duration = Duration::from_millis(2000);

/// Measure the connect time of every URL in `urls` and return them
/// reordered, fastest first. The output is a permutation of the input: the
/// set of URLs is preserved, only the order changes (§8 property 1).
///
/// An empty `urls` is a successful no-op. Individual connection failures
/// never fail the call — they sort last with `plain_connect_time =
/// +infinity` (§7); only failure to spawn the measurement tasks themselves
/// is fatal to the whole probe.
pub async fn fastest_mirror(
    config: &ProbeConfig,
    urls: &[String],
) -> Result<Vec<String>, LibrepoError> {
    if urls.is_empty() {
        return Ok(Vec::new());
    }

    let deadline = Instant::now() + MEASUREMENT_WINDOW;
    let mut tasks: JoinSet<(usize, String, f64)> = JoinSet::new();

    for (index, url) in urls.iter().cloned().enumerate() {
        let config = config.duplicate();
        tasks.spawn(async move {
            let time = measure_connect_time(&config, &url, deadline).await;
            (index, url, time)
        });
    }

    let mut results: Vec<Option<(String, f64)>> = vec![None; urls.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, url, time)) => results[index] = Some((url, time)),
            Err(join_err) if join_err.is_panic() => {
                return Err(LibrepoError::ResourceExhaustion(format!(
                    "probe task panicked: {join_err}"
                )));
            }
            Err(join_err) => {
                // Cancellation: we never abort tasks ourselves, so this
                // would only happen if the enclosing runtime is shutting
                // down. Nothing sensible to recover, surface it.
                return Err(LibrepoError::ResourceExhaustion(format!(
                    "probe task did not complete: {join_err}"
                )));
            }
        }
    }

    let mut measured: Vec<(String, f64)> = results
        .into_iter()
        .map(|slot| slot.expect("every spawned probe task reports back exactly once"))
        .collect();

    // Vec::sort_by is stable, so ties keep their input-order position
    // (§5: "Implementations must sort stably to make tie behaviour
    // predictable.").
    measured.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    Ok(measured.into_iter().map(|(url, _)| url).collect())
}

async fn measure_connect_time(config: &ProbeConfig, url: &str, deadline: Instant) -> f64 {
    let protocol = protocol::classify(url);

    if protocol == Protocol::File {
        // Local sources are considered the best mirrors (§4.F).
        return 0.0;
    }

    let Ok(parsed) = url::Url::parse(url) else {
        tracing::debug!(url, "probe: url did not parse, no measurement possible");
        return f64::INFINITY;
    };
    let Some(host) = parsed.host_str().map(str::to_owned) else {
        tracing::debug!(url, "probe: url has no host, no measurement possible");
        return f64::INFINITY;
    };
    let port = parsed.port_or_known_default().unwrap_or(default_port(protocol));
    let is_tls = parsed.scheme() == "https";

    let start = Instant::now();
    // Two nested bounds: the prototype's own per-connection timeout, and
    // the probe-wide 2.0 s deadline shared by every task. Whichever fires
    // first turns into the same "no valid measurement" outcome.
    let attempt = tokio::time::timeout(config.connect_timeout, connect_only(config, &host, port, is_tls));

    match tokio::time::timeout_at(deadline, attempt).await {
        Ok(Ok(Ok(()))) => {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed == 0.0 {
                // A measured zero is treated as "no valid measurement" (§4.F).
                f64::INFINITY
            } else {
                elapsed
            }
        }
        Ok(Ok(Err(err))) => {
            tracing::debug!(url, error = %err, "probe: connection attempt failed");
            f64::INFINITY
        }
        Ok(Err(_connect_timeout_elapsed)) => {
            tracing::debug!(url, "probe: per-connection timeout elapsed");
            f64::INFINITY
        }
        Err(_window_elapsed) => {
            tracing::debug!(url, "probe: measurement window expired before connect completed");
            f64::INFINITY
        }
    }
}

fn default_port(protocol: Protocol) -> u16 {
    match protocol {
        Protocol::Ftp => 21,
        Protocol::Rsync => 873,
        Protocol::Oci => 443,
        Protocol::Http => 80,
        Protocol::File | Protocol::Other => 80,
    }
}

/// Open a connect-only connection: DNS + TCP, plus a TLS handshake for
/// `https`, but never an application-level request or response read.
async fn connect_only(
    config: &ProbeConfig,
    host: &str,
    port: u16,
    is_tls: bool,
) -> std::io::Result<()> {
    let target = match &config.proxy {
        // Connecting through the proxy's own socket is the coarse
        // connect-time analogue of routing the real transfer through it;
        // this crate does not speak CONNECT tunneling (out of scope for a
        // connect-only probe).
        Some(proxy) => proxy.clone(),
        None => format!("{host}:{port}"),
    };

    let stream = TcpStream::connect(&target).await?;

    if is_tls {
        perform_tls_handshake(host, stream).await?;
    } else {
        drop(stream);
    }

    Ok(())
}

async fn perform_tls_handshake(host: &str, stream: TcpStream) -> std::io::Result<()> {
    let connector = native_tls::TlsConnector::new()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let connector = tokio_native_tls::TlsConnector::from(connector);
    connector
        .connect(host, stream)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn empty_input_is_a_successful_no_op() {
        let config = ProbeConfig::default();
        let result = fastest_mirror(&config, &[]).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn s5_file_scheme_wins_over_an_open_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _accept = tokio::spawn(async move {
            let _ = listener.accept().await;
        });

        let urls = vec![
            format!("http://{addr}/"),
            "file:///var/cache/repo".to_owned(),
        ];
        let config = ProbeConfig::default();
        let sorted = fastest_mirror(&config, &urls).await.unwrap();
        assert_eq!(sorted[0], "file:///var/cache/repo");
    }

    #[tokio::test]
    async fn preservation_output_is_a_permutation_of_input() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _accept = tokio::spawn(async move {
            loop {
                if listener.accept().await.is_err() {
                    break;
                }
            }
        });

        let mut input = vec![format!("http://{addr}/a"), format!("http://{addr}/b")];
        input.sort();
        let config = ProbeConfig::default();
        let mut output = fastest_mirror(&config, &input).await.unwrap();
        output.sort();
        assert_eq!(input, output);
    }

    #[tokio::test]
    async fn unreachable_mirror_sorts_last_within_the_window() {
        // 192.0.2.0/24 is TEST-NET-1 (RFC 5737): reserved, never routable.
        let urls = vec![
            "http://192.0.2.1:9/".to_owned(),
            "file:///var/cache/repo".to_owned(),
        ];
        let config = ProbeConfig {
            connect_timeout: Duration::from_millis(100),
            ..ProbeConfig::default()
        };
        let start = std::time::Instant::now();
        let sorted = fastest_mirror(&config, &urls).await.unwrap();
        assert!(start.elapsed() <= Duration::from_millis(2100));
        assert_eq!(sorted[0], "file:///var/cache/repo");
        assert_eq!(sorted[1], "http://192.0.2.1:9/");
    }
}
