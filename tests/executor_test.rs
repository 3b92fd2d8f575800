//! Behaviour chains run over real HTTP against a mock server.

use std::net::TcpListener;
use std::time::Duration;

use behaviours::behaviour::{checks, StatelessBehaviour};
use behaviours::error::RequestConstructionError;
use behaviours::executor::{run, StepStatus};
use behaviours::report::{MockReporter, PanicReporter};
use behaviours::transport::{HttpRunner, Request, Response};
use httpmock::prelude::*;

fn token_from(previous: Option<&Response>) -> Result<String, RequestConstructionError> {
    let response =
        previous.ok_or_else(|| RequestConstructionError::new("login response missing"))?;
    let json = response
        .json()
        .map_err(|e| RequestConstructionError::new(format!("login body is not JSON: {}", e)))?;
    json["token"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| RequestConstructionError::new("login body has no token"))
}

/// Address nothing listens on.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

#[test]
fn login_then_profile_over_http() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method(POST).path("/login").body("user=alice&pass=secret");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"token":"t-42"}"#);
    });
    let profile = server.mock(|when, then| {
        when.method(GET)
            .path("/profile")
            .header("Authorization", "Bearer t-42");
        then.status(200).body(r#"{"name":"Alice"}"#);
    });

    let login_url = server.url("/login");
    let profile_url = server.url("/profile");
    let behaviours = [
        StatelessBehaviour::new(
            "log in",
            move |_| Ok(Request::post(login_url.clone()).body("user=alice&pass=secret")),
            checks::expect_status(200),
        ),
        StatelessBehaviour::new(
            "fetch profile",
            move |previous| {
                let token = token_from(previous)?;
                Ok(Request::get(profile_url.clone())
                    .header("Authorization", format!("Bearer {}", token)))
            },
            checks::expect_body_contains("Alice"),
        ),
    ];

    let runner = HttpRunner::with_timeout(Duration::from_secs(5)).unwrap();
    let mut reporter = PanicReporter::new();
    let result = run(&mut reporter, &runner, &behaviours);

    assert!(result.success());
    assert_eq!(reporter.logged(), 4);
    login.assert_calls(1);
    profile.assert_calls(1);
}

#[test]
fn failed_check_stops_before_next_request() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.path("/first");
        then.status(503);
    });
    let second = server.mock(|when, then| {
        when.path("/second");
        then.status(200);
    });

    let first_url = server.url("/first");
    let second_url = server.url("/second");
    let behaviours = [
        StatelessBehaviour::new(
            "first",
            move |_| Ok(Request::get(first_url.clone())),
            checks::expect_success(),
        ),
        StatelessBehaviour::new(
            "second",
            move |_| Ok(Request::get(second_url.clone())),
            checks::accept_any(),
        ),
    ];

    let runner = HttpRunner::new().unwrap();
    let mut reporter = MockReporter::new();
    let result = run(&mut reporter, &runner, &behaviours);

    assert!(!result.success());
    assert_eq!(result.steps.len(), 1);
    assert_eq!(result.steps[0].status(), StepStatus::CheckFailed);
    assert_eq!(reporter.fatals().len(), 1);
    assert!(reporter.has_fatal("Error checking behaviour \"first\""));
    first.assert_calls(1);
    second.assert_calls(0);
}

#[test]
fn accepted_connection_failure_hands_none_forward() {
    let server = MockServer::start();
    let after = server.mock(|when, then| {
        when.path("/after");
        then.status(200);
    });

    let down_url = closed_port_url();
    let after_url = server.url("/after");
    let behaviours = [
        StatelessBehaviour::new(
            "service is down",
            move |_| Ok(Request::get(down_url.clone())),
            checks::expect_dispatch_error(),
        ),
        StatelessBehaviour::new(
            "next step sees no response",
            move |previous| match previous {
                None => Ok(Request::get(after_url.clone())),
                Some(_) => Err(RequestConstructionError::new("unexpected response")),
            },
            checks::expect_status(200),
        ),
    ];

    let runner = HttpRunner::with_timeout(Duration::from_secs(5)).unwrap();
    let result = run(&mut MockReporter::new(), &runner, &behaviours);

    assert!(result.success());
    after.assert_calls(1);
}

#[test]
#[should_panic(expected = "Error checking behaviour \"must be created\"")]
fn panic_reporter_fails_the_test() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/items");
        then.status(409);
    });

    let url = server.url("/items");
    let behaviours = [StatelessBehaviour::new(
        "must be created",
        move |_| Ok(Request::post(url.clone())),
        checks::expect_status(201),
    )];

    let runner = HttpRunner::new().unwrap();
    run(&mut PanicReporter::new(), &runner, &behaviours);
}
