//! End-to-end probe + sorter scenarios that need a real loopback listener,
//! placed under `tests/` to keep network-touching cases out of `src/`.
use std::time::Duration;

use librepo_mirrors::{sort_internal_mirrorlists, Mirrorlist, ProbeConfig};
use tokio::net::TcpListener;

async fn accept_forever(listener: TcpListener) {
    loop {
        if listener.accept().await.is_err() {
            break;
        }
    }
}

#[tokio::test]
async fn bounded_duration_with_one_fast_and_one_blackholed_mirror() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let fast_addr = listener.local_addr().unwrap();
    tokio::spawn(accept_forever(listener));

    let config = ProbeConfig {
        connect_timeout: Duration::from_millis(300),
        ..ProbeConfig::default()
    };
    let urls = vec![
        format!("http://{fast_addr}/"),
        // RFC 5737 TEST-NET-1: reserved, guaranteed unroutable.
        "http://192.0.2.55:9999/".to_owned(),
    ];

    let start = std::time::Instant::now();
    let sorted = librepo_mirrors::fastest_mirror(&config, &urls).await.unwrap();
    assert!(start.elapsed() <= Duration::from_millis(2200));
    assert_eq!(sorted[0], format!("http://{fast_addr}/"));
    assert_eq!(sorted[1], "http://192.0.2.55:9999/");
}

#[tokio::test]
async fn cross_handle_sort_reorders_every_caller_list_by_shared_probe() {
    let fast = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let fast_addr = fast.local_addr().unwrap();
    tokio::spawn(accept_forever(fast));

    let config = ProbeConfig {
        connect_timeout: Duration::from_millis(300),
        ..ProbeConfig::default()
    };

    let mut first = Mirrorlist::new();
    first.append_url("http://192.0.2.44:9999/repo", None);
    first.append_url(&format!("http://{fast_addr}/repo"), None);

    let mut second = Mirrorlist::new();
    second.append_url(&format!("http://{fast_addr}/other"), None);

    let mut lists = vec![first, second];
    sort_internal_mirrorlists(&config, &mut lists).await.unwrap();

    assert_eq!(lists[0].entries()[0].url, format!("http://{fast_addr}/repo"));
    assert_eq!(lists[0].entries()[1].url, "http://192.0.2.44:9999/repo");
    assert_eq!(lists[1].entries()[0].url, format!("http://{fast_addr}/other"));
}
