//! Integration tests for the HTTP guard
//!
//! Serves a protected router on an ephemeral port and talks raw HTTP/1.1 to
//! it, so the peer address comes from a real accepted connection.

use axum::{http::StatusCode, routing::get, Router};
use geo_gate::{protect, AccessMatcher, CountryCode, GeoResolver, MatchLog, Policy, ResolutionError};
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Resolves loopback to a fixed country and records what it saw.
struct LoopbackResolver {
    country: &'static str,
    seen: Mutex<Vec<IpAddr>>,
}

impl GeoResolver for LoopbackResolver {
    fn lookup(&self, ip: IpAddr) -> Result<CountryCode, ResolutionError> {
        self.seen.lock().unwrap().push(ip);
        if ip.is_loopback() {
            Ok(CountryCode::new(self.country))
        } else {
            Ok(CountryCode::new(""))
        }
    }
}

async fn serve(policy: Policy, country: &'static str) -> (SocketAddr, Arc<LoopbackResolver>) {
    let resolver = Arc::new(LoopbackResolver {
        country,
        seen: Mutex::new(Vec::new()),
    });
    let matcher = Arc::new(AccessMatcher::new(
        policy,
        resolver.clone(),
        MatchLog::disabled(),
    ));

    let app = protect(
        Router::new()
            .route("/", get(|| async { "welcome" }))
            .fallback(|| async { StatusCode::NO_CONTENT }),
        matcher,
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    (addr, resolver)
}

async fn get_status(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        path
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_allowed_peer_gets_response() {
    let (addr, resolver) = serve(Policy::from_lists(["US"], Vec::<String>::new()), "US").await;

    let response = get_status(addr, "/").await;

    assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
    assert!(response.ends_with("welcome"));
    assert_eq!(
        resolver.seen.lock().unwrap().as_slice(),
        &["127.0.0.1".parse::<IpAddr>().unwrap()]
    );
}

#[tokio::test]
async fn test_denied_peer_gets_forbidden() {
    let (addr, _resolver) = serve(Policy::from_lists(Vec::<String>::new(), ["CN"]), "CN").await;

    let response = get_status(addr, "/").await;

    assert!(response.starts_with("HTTP/1.1 403"), "{}", response);
}

#[tokio::test]
async fn test_fallback_route_is_guarded() {
    let (addr, _resolver) = serve(Policy::from_lists(["BR"], Vec::<String>::new()), "US").await;

    let response = get_status(addr, "/anything").await;

    assert!(response.starts_with("HTTP/1.1 403"), "{}", response);
}

#[tokio::test]
async fn test_open_policy_skips_lookup() {
    let (addr, resolver) = serve(Policy::default(), "CN").await;

    let response = get_status(addr, "/anything").await;

    assert!(response.starts_with("HTTP/1.1 204"), "{}", response);
    assert!(resolver.seen.lock().unwrap().is_empty());
}
