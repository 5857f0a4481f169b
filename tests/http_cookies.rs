use httpmock::Method::GET;
use httpmock::MockServer;

use curly::Request;

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[test]
fn test_cookie_from_redirect_hop_reaches_the_next_hop() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/start");
        then.status(302)
            .header("Set-Cookie", "session=abc; Path=/")
            .header("Location", "/final");
    });
    let finish = server.mock(|when, then| {
        when.method(GET).path("/final").header("cookie", "session=abc");
        then.status(200).body("ok");
    });

    let mut request = Request::new();
    let response = request
        .get(&server.url("/start"))
        .expect("request should succeed");

    assert_eq!(response.status_code(), 200);
    finish.assert();
}

#[test]
fn test_cookies_persist_across_requests_on_one_client() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/login");
        then.status(200).header("Set-Cookie", "token=xyz; Path=/");
    });
    let guarded = server.mock(|when, then| {
        when.method(GET).path("/guarded").header("cookie", "token=xyz");
        then.status(200).body("welcome back");
    });

    let mut request = Request::new();
    request.get(&server.url("/login")).expect("login succeeds");
    let response = request
        .get(&server.url("/guarded"))
        .expect("cookie is replayed");

    assert_eq!(response.body_str().unwrap(), "welcome back");
    guarded.assert();
}
