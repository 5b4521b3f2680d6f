//! Client tests against a throwaway HTTP server on localhost.

use chartdash::Client;
use chartdash::dashboard::DataOrigin;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Serve `status`/`body` to every connection; returns the URL and a hit counter.
fn serve(status: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/dashboard", listener.local_addr().unwrap());
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            counter.fetch_add(1, Ordering::SeqCst);
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).is_ok() {
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                line.clear();
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    (url, hits)
}

const PAYLOAD: &str = r#"{
  "dashboardConfig": { "title": "Live Ops" },
  "insights": { "summary": "All good", "keyMetrics": [], "recommendations": [] },
  "charts": [
    { "type": "line", "id": "l", "title": "L",
      "data": [{ "name": "Jan", "v": 1 }], "series": [{ "dataKey": "v" }] }
  ]
}"#;

#[test]
fn live_payload_is_used() {
    let (url, hits) = serve("200 OK", PAYLOAD);
    let client = Client::new(Some(url)).unwrap().with_fallback_delay(Duration::ZERO);
    let out = client.load().unwrap();
    assert_eq!(out.origin, DataOrigin::Live);
    assert_eq!(out.payload.title(), "Live Ops");
    assert_eq!(out.payload.charts.len(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn client_errors_are_not_retried() {
    let (url, hits) = serve("404 Not Found", "{}");
    let client = Client::new(Some(url)).unwrap();
    let err = client.fetch().unwrap_err();
    assert!(format!("{:#}", err).contains("404"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn server_errors_are_retried_then_fall_back() {
    let (url, hits) = serve("503 Service Unavailable", "{}");
    let client = Client::new(Some(url)).unwrap().with_fallback_delay(Duration::ZERO);
    let out = client.load().unwrap();
    assert!(out.origin.is_fallback());
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[test]
fn undecodable_body_falls_back() {
    let (url, _) = serve("200 OK", r#"{"charts": 12}"#);
    let client = Client::new(Some(url)).unwrap().with_fallback_delay(Duration::ZERO);
    let out = client.load().unwrap();
    match out.origin {
        DataOrigin::Fallback { reason } => assert!(reason.contains("decode")),
        DataOrigin::Live => panic!("expected fallback"),
    }
    assert_eq!(out.payload.title(), "Sales Analytics Dashboard");
}
