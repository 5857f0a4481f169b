use std::net::TcpListener;
use std::time::Duration;

use httpmock::Method::GET;
use httpmock::MockServer;

use curly::{CurlyError, Request};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// A localhost port with nothing listening on it.
fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("addr").port()
}

#[test]
fn test_exhausted_proxies_propagate_the_connection_error() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start();
    let target = server.mock(|when, then| {
        when.method(GET).path("/direct");
        then.status(200);
    });

    let mut request = Request::new();
    request
        .add_proxy("127.0.0.1", free_port(), None, None, Duration::from_secs(2))
        .add_proxy("127.0.0.1", free_port(), None, None, Duration::from_secs(2));

    let err = request.get(&server.url("/direct")).unwrap_err();
    match err {
        CurlyError::FailedRequest { message, .. } => {
            assert!(!message.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }

    // no direct fallback once proxies are configured
    assert_eq!(target.hits(), 0);
}

#[test]
fn test_next_proxy_is_tried_after_a_connection_failure() {
    if !can_bind_localhost() {
        return;
    }
    // The mock server doubles as an HTTP proxy: it answers the
    // absolute-form request for the unresolvable upstream host.
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(GET).path("/upstream");
        then.status(200).body("via proxy");
    });

    let mut request = Request::new();
    request
        .add_proxy("127.0.0.1", free_port(), None, None, Duration::from_secs(2))
        .add_proxy("127.0.0.1", server.port(), None, None, Duration::from_secs(5));

    let response = request
        .get("http://upstream.invalid/upstream")
        .expect("second proxy should carry the request");

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body_str().unwrap(), "via proxy");
    upstream.assert();
}

#[test]
fn test_proxy_failure_without_remaining_candidates_is_fatal() {
    if !can_bind_localhost() {
        return;
    }
    let mut request = Request::new();
    request.add_proxy("127.0.0.1", free_port(), None, None, Duration::from_secs(2));

    let err = request.get("http://upstream.invalid/").unwrap_err();
    assert!(matches!(err, CurlyError::FailedRequest { .. }));
}
