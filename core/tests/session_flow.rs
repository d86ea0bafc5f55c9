//! Drive `RequestShim` against an in-memory transport that records every
//! request and replays canned responses, so the exact wire traffic can be
//! asserted without a server.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::json;
use shim_core::{
    HttpMethod, HttpRequest, HttpResponse, Payload, RequestShim, ShimConfig, ShimError, Token,
    Transport,
};

#[derive(Default)]
struct Recorder {
    sent: RefCell<Vec<HttpRequest>>,
    replies: RefCell<VecDeque<Result<HttpResponse, ShimError>>>,
}

impl Recorder {
    fn reply(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    fn refuse(self) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(ShimError::Transport("connection refused".to_string())));
        self
    }

    fn last(&self) -> HttpRequest {
        self.sent.borrow().last().cloned().expect("no request sent")
    }
}

impl Transport for Recorder {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ShimError> {
        self.sent.borrow_mut().push(request.clone());
        self.replies.borrow_mut().pop_front().expect("no canned reply left")
    }
}

fn shim(recorder: Recorder) -> RequestShim<Recorder> {
    RequestShim::new(&ShimConfig::default(), recorder)
}

fn fields(value: serde_json::Value) -> Payload {
    value.as_object().cloned().unwrap()
}

#[test]
fn init_login_then_get() {
    let mut shim = shim(
        Recorder::default()
            .reply(200, "")
            .reply(200, r#"{"token":"abc"}"#)
            .reply(200, "{}"),
    );

    shim.init().unwrap();
    let create = shim.transport().last();
    assert_eq!(create.url, "http://127.0.0.1:1145/user/create");
    assert_eq!(create.json_body().unwrap(), json!({"name": "test", "pass": "test"}));

    assert_eq!(shim.login().unwrap(), Token::new("abc"));
    let login = shim.transport().last();
    assert_eq!(login.method, HttpMethod::Post);
    assert_eq!(login.url, "http://127.0.0.1:1145/user/login");

    shim.get("/profile", Payload::new()).unwrap();
    let get = shim.transport().last();
    assert_eq!(get.method, HttpMethod::Get);
    assert_eq!(get.url, "http://127.0.0.1:1145/profile");
    assert_eq!(get.json_body().unwrap(), json!({"token": "abc"}));
}

#[test]
fn credentials_before_login_use_sentinel() {
    let shim = shim(Recorder::default());
    assert_eq!(serde_json::Value::Object(shim.current_credentials()), json!({"token": -1}));
}

#[test]
fn successful_login_replaces_credentials() {
    let mut shim = shim(Recorder::default().reply(200, r#"{"token":42}"#));
    shim.login().unwrap();
    assert_eq!(serde_json::Value::Object(shim.current_credentials()), json!({"token": 42}));
}

#[test]
fn post_body_is_right_biased_merge() {
    let mut shim = shim(
        Recorder::default()
            .reply(200, r#"{"token":42}"#)
            .reply(200, "")
            .reply(200, ""),
    );
    shim.login().unwrap();

    shim.post("crew/create", fields(json!({"token": 99, "x": 1}))).unwrap();
    assert_eq!(shim.transport().last().json_body().unwrap(), json!({"token": 99, "x": 1}));

    shim.post("crew/create", fields(json!({"x": 1}))).unwrap();
    let req = shim.transport().last();
    assert_eq!(req.url, "http://127.0.0.1:1145/crew/create");
    assert_eq!(req.json_body().unwrap(), json!({"token": 42, "x": 1}));
}

#[test]
fn token_wider_than_u64_is_echoed_digit_for_digit() {
    let mut shim = shim(
        Recorder::default()
            .reply(200, r#"{"token":218446744073709551615123456789}"#)
            .reply(200, "{}")
            .reply(200, "user time updated"),
    );
    shim.login().unwrap();

    shim.get("/x", Payload::new()).unwrap();
    assert_eq!(
        shim.transport().last().body.as_deref(),
        Some(r#"{"token":218446744073709551615123456789}"#)
    );

    shim.keep_alive().unwrap();
    assert_eq!(
        shim.transport().last().body.as_deref(),
        Some(r#"{"token":218446744073709551615123456789}"#)
    );
}

#[test]
fn rejected_login_keeps_previous_token() {
    let mut shim = shim(
        Recorder::default()
            .reply(200, r#"{"token":42}"#)
            .reply(401, "unable to login with given credentials"),
    );
    shim.login().unwrap();

    let err = shim.login().unwrap_err();
    assert!(matches!(err, ShimError::Status { status: 401, .. }));
    assert_eq!(shim.session().token(), &Token::new(42));
}

#[test]
fn login_without_token_field_is_an_error() {
    let mut shim = shim(Recorder::default().reply(200, "{}"));
    assert!(matches!(shim.login().unwrap_err(), ShimError::MissingToken));
    assert!(!shim.session().is_authenticated());
}

#[test]
fn transport_failure_propagates() {
    let mut shim = shim(Recorder::default().refuse().refuse());
    assert!(matches!(shim.init().unwrap_err(), ShimError::Transport(_)));
    assert!(matches!(shim.login().unwrap_err(), ShimError::Transport(_)));
    assert!(!shim.session().is_authenticated());
}

#[test]
fn non_success_get_is_returned_as_data() {
    let shim = shim(Recorder::default().reply(401, "unable to find a record for given token"));
    let resp = shim.get("crew/query", Payload::new()).unwrap();
    assert_eq!(resp.status, 401);
    assert!(!resp.is_success());
}

#[test]
fn init_ignores_status() {
    let shim = shim(Recorder::default().reply(409, "user already exists"));
    let resp = shim.init().unwrap();
    assert_eq!(resp.status, 409);
    assert!(!shim.session().is_authenticated());
}

#[test]
fn logout_clears_session_only_on_success() {
    let mut shim = shim(
        Recorder::default()
            .reply(200, r#"{"token":"abc"}"#)
            .reply(401, "unknown token")
            .reply(200, "logged out"),
    );
    shim.login().unwrap();

    assert!(shim.logout().is_err());
    assert_eq!(shim.session().token(), &Token::new("abc"));

    shim.logout().unwrap();
    let req = shim.transport().last();
    assert_eq!(req.url, "http://127.0.0.1:1145/user/logout");
    assert_eq!(req.json_body().unwrap(), json!({"token": "abc"}));
    assert!(!shim.session().is_authenticated());
}

#[test]
fn keep_alive_sends_current_token() {
    let mut shim = shim(
        Recorder::default()
            .reply(200, r#"{"token":5}"#)
            .reply(200, "user time updated"),
    );
    shim.login().unwrap();
    let resp = shim.keep_alive().unwrap();
    assert_eq!(resp.body, "user time updated");
    let req = shim.transport().last();
    assert_eq!(req.url, "http://127.0.0.1:1145/user/update");
    assert_eq!(req.json_body().unwrap(), json!({"token": 5}));
}

#[test]
fn separate_shims_keep_separate_sessions() {
    let mut alice = shim(Recorder::default().reply(200, r#"{"token":1}"#));
    let bob = shim(Recorder::default());
    alice.login().unwrap();
    assert!(alice.session().is_authenticated());
    assert!(!bob.session().is_authenticated());
}

#[test]
fn format_route_matches_both_styles() {
    let shim = shim(Recorder::default());
    assert_eq!(shim.format_route("/x"), "http://127.0.0.1:1145/x");
    assert_eq!(shim.format_route("x"), "http://127.0.0.1:1145/x");
}
