//! In-memory poll service used as a test double for the client.
//!
//! Serves the same HTTP contract as the real service: registration, paged
//! poll listing with an `X-Total-Count` header, bearer-protected voting and
//! aggregated results. Polls and login tokens are seeded through `Store`
//! before the router is built.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionOut {
    pub id: i64,
    pub text: String,
    pub poll_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PollOut {
    pub id: i64,
    pub question: String,
    pub created_at: NaiveDateTime,
    pub owner_id: i64,
    pub options: Vec<OptionOut>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserOut {
    pub id: i64,
    pub username: String,
}

#[derive(Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct VoteIn {
    pub option_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteOut {
    pub id: i64,
    pub user_id: i64,
    pub option_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionTally {
    pub option_text: String,
    pub vote_count: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultsOut {
    pub poll_id: i64,
    pub question: String,
    pub results: Vec<OptionTally>,
}

#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

struct User {
    id: i64,
    username: String,
}

/// Service state. Seed it, then hand it to `app_with`.
#[derive(Default)]
pub struct Store {
    users: Vec<User>,
    polls: Vec<PollOut>,
    tokens: HashMap<String, i64>,
    votes: Vec<VoteOut>,
    next_id: i64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Add a poll owned by `owner_id` with one option per entry of `options`.
    pub fn add_poll(&mut self, question: &str, owner_id: i64, options: &[&str]) -> PollOut {
        let id = self.next_id();
        let options = options
            .iter()
            .map(|text| OptionOut {
                id: self.next_id(),
                text: text.to_string(),
                poll_id: id,
            })
            .collect();
        let poll = PollOut {
            id,
            question: question.to_string(),
            created_at: Utc::now().naive_utc(),
            owner_id,
            options,
        };
        self.polls.push(poll.clone());
        poll
    }

    /// Create (or reuse) `username` and return a bearer token for it, the way
    /// a successful login would.
    pub fn issue_token(&mut self, username: &str) -> String {
        let existing = self.users.iter().find(|u| u.username == username).map(|u| u.id);
        let user_id = match existing {
            Some(id) => id,
            None => self.insert_user(username),
        };
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), user_id);
        token
    }

    fn insert_user(&mut self, username: &str) -> i64 {
        let id = self.next_id();
        self.users.push(User {
            id,
            username: username.to_string(),
        });
        id
    }

    fn results(&self, poll: &PollOut) -> ResultsOut {
        let results = poll
            .options
            .iter()
            .map(|option| OptionTally {
                option_text: option.text.clone(),
                vote_count: self.votes.iter().filter(|v| v.option_id == option.id).count() as u64,
            })
            .collect();
        ResultsOut {
            poll_id: poll.id,
            question: poll.question.clone(),
            results,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::new())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/register", post(register))
        .route("/polls", get(list_polls))
        .route("/polls/{id}/vote", post(vote))
        .route("/polls/{id}/results", get(poll_results))
        .with_state(db)
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "detail": message }))).into_response()
}

async fn register(State(db): State<Db>, Json(input): Json<UserCreate>) -> Response {
    let mut store = db.write().await;
    if store.users.iter().any(|u| u.username == input.username) {
        return detail(StatusCode::BAD_REQUEST, "Username already registered");
    }
    let id = store.insert_user(&input.username);
    Json(UserOut {
        id,
        username: input.username,
    })
    .into_response()
}

async fn list_polls(State(db): State<Db>, Query(page): Query<Pagination>) -> Response {
    let store = db.read().await;
    let items: Vec<PollOut> = store
        .polls
        .iter()
        .skip(page.skip)
        .take(page.limit)
        .cloned()
        .collect();
    ([(TOTAL_COUNT, store.polls.len().to_string())], Json(items)).into_response()
}

fn bearer_user(store: &Store, headers: &HeaderMap) -> Option<i64> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    store.tokens.get(token).copied()
}

async fn vote(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<VoteIn>,
) -> Response {
    let mut store = db.write().await;
    let Some(user_id) = bearer_user(&store, &headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    };
    let option_exists = store
        .polls
        .iter()
        .find(|p| p.id == id)
        .is_some_and(|p| p.options.iter().any(|o| o.id == input.option_id));
    if !option_exists {
        return detail(StatusCode::NOT_FOUND, "Poll or option not found");
    }
    let vote = VoteOut {
        id: store.next_id(),
        user_id,
        option_id: input.option_id,
    };
    store.votes.push(vote.clone());
    Json(vote).into_response()
}

async fn poll_results(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.polls.iter().find(|p| p.id == id) {
        Some(poll) => Json(store.results(poll)).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Poll not found"),
    }
}
