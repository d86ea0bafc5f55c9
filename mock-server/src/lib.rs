use std::{collections::HashMap, num::NonZeroU128, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct HelloNameRequest {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub pass: String,
}

/// Tokens are random non-zero 128-bit integers, sent as bare JSON numbers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: NonZeroU128,
}

/// Body of the token-guarded endpoints. The token is kept as raw JSON so a
/// malformed or sentinel token gets a 401 instead of an extractor rejection.
#[derive(Deserialize)]
pub struct TokenRequest {
    pub token: serde_json::Value,
}

#[derive(Default)]
pub struct Users {
    accounts: HashMap<String, String>,
    logins: HashMap<NonZeroU128, String>,
}

impl Users {
    /// Numbers keep their exact digits under `arbitrary_precision`, so the
    /// decimal text parses straight back into the issued token.
    fn lookup(&self, token: &serde_json::Value) -> Option<NonZeroU128> {
        let token: NonZeroU128 = token.as_number()?.to_string().parse().ok()?;
        self.logins.contains_key(&token).then_some(token)
    }
}

pub type Db = Arc<RwLock<Users>>;

type Reply = (StatusCode, String);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Users::default()));
    Router::new()
        .route("/test", get(hello))
        .route("/test_name", post(hello_name))
        .route("/user/test", get(user_test))
        .route("/user/create", post(create_user))
        .route("/user/login", post(log_in))
        .route("/user/logout", post(log_out))
        .route("/user/update", post(update_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn is_alnum(value: &str) -> bool {
    value.chars().all(char::is_alphanumeric)
}

async fn hello() -> &'static str {
    "Hello world!"
}

async fn hello_name(Json(input): Json<HelloNameRequest>) -> String {
    format!("Hello, {}!", input.name)
}

async fn user_test() -> &'static str {
    "User module is running!"
}

async fn create_user(State(db): State<Db>, Json(input): Json<LoginRequest>) -> Reply {
    if !is_alnum(&input.name) || !is_alnum(&input.pass) {
        warn!(name = %input.name, "rejecting non-alphanumeric user");
        return (StatusCode::BAD_REQUEST, "name or pass is not alphanumeric".to_string());
    }
    let mut users = db.write().await;
    if users.accounts.contains_key(&input.name) {
        return (StatusCode::CONFLICT, "user already exists".to_string());
    }
    info!(name = %input.name, "user created");
    users.accounts.insert(input.name, input.pass);
    (StatusCode::OK, "user created".to_string())
}

async fn log_in(
    State(db): State<Db>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Reply> {
    if !is_alnum(&input.name) || !is_alnum(&input.pass) {
        warn!(name = %input.name, "given name or pass is not alphanumeric");
        return Err((StatusCode::BAD_REQUEST, "name or pass is not alphanumeric".to_string()));
    }
    let mut users = db.write().await;
    if users.accounts.get(&input.name) != Some(&input.pass) {
        info!(name = %input.name, "log-in failed with given credentials");
        return Err((
            StatusCode::UNAUTHORIZED,
            "unable to login with given credentials".to_string(),
        ));
    }
    let token = issue_token();
    info!(name = %input.name, %token, "login success");
    users.logins.insert(token, input.name);
    Ok(Json(LoginResponse { token }))
}

async fn log_out(State(db): State<Db>, Json(input): Json<TokenRequest>) -> Reply {
    let mut users = db.write().await;
    match users.lookup(&input.token) {
        Some(token) => {
            users.logins.remove(&token);
            info!(%token, "logged out");
            (StatusCode::OK, "logged out".to_string())
        }
        None => unknown_token(&input.token),
    }
}

async fn update_user(State(db): State<Db>, Json(input): Json<TokenRequest>) -> Reply {
    let users = db.read().await;
    match users.lookup(&input.token) {
        Some(_) => (StatusCode::OK, "user time updated".to_string()),
        None => unknown_token(&input.token),
    }
}

fn issue_token() -> NonZeroU128 {
    // A v4 UUID always has its version bits set, so it is never zero.
    NonZeroU128::new(Uuid::new_v4().as_u128()).unwrap_or(NonZeroU128::MIN)
}

fn unknown_token(token: &serde_json::Value) -> Reply {
    warn!(%token, "unable to find record for log-in token");
    (
        StatusCode::UNAUTHORIZED,
        "unable to find a record for given token".to_string(),
    )
}
