use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, PollOut, ResultsOut, Store, UserOut, VoteOut};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn vote_request(uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- register ---

#[tokio::test]
async fn register_returns_user() {
    let resp = app()
        .oneshot(json_request("POST", "/register", r#"{"username":"alice","password":"pw"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: UserOut = body_json(resp).await;
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn register_missing_password_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/register", r#"{"username":"alice"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn register_duplicate_returns_400() {
    use tower::Service;

    let mut app = app().into_service();
    let body = r#"{"username":"bob","password":"pw"}"#;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/register", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/register", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let detail: serde_json::Value = body_json(resp).await;
    assert_eq!(detail["detail"], "Username already registered");
}

// --- list ---

#[tokio::test]
async fn list_polls_empty() {
    let resp = app().oneshot(get("/polls")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-total-count"], "0");
    let polls: Vec<PollOut> = body_json(resp).await;
    assert!(polls.is_empty());
}

#[tokio::test]
async fn list_polls_pages_and_reports_total() {
    let mut store = Store::new();
    for i in 0..7 {
        store.add_poll(&format!("Question {i}"), 1, &["yes", "no"]);
    }

    let resp = app_with(store).oneshot(get("/polls?skip=2&limit=3")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-total-count"], "7");
    let polls: Vec<PollOut> = body_json(resp).await;
    let questions: Vec<&str> = polls.iter().map(|p| p.question.as_str()).collect();
    assert_eq!(questions, vec!["Question 2", "Question 3", "Question 4"]);
}

// --- vote ---

#[tokio::test]
async fn vote_without_token_returns_401() {
    let mut store = Store::new();
    let poll = store.add_poll("Q", 1, &["a"]);
    let body = format!(r#"{{"option_id":{}}}"#, poll.options[0].id);

    let resp = app_with(store)
        .oneshot(vote_request(&format!("/polls/{}/vote", poll.id), None, &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn vote_with_unknown_token_returns_401() {
    let mut store = Store::new();
    let poll = store.add_poll("Q", 1, &["a"]);
    let body = format!(r#"{{"option_id":{}}}"#, poll.options[0].id);

    let resp = app_with(store)
        .oneshot(vote_request(&format!("/polls/{}/vote", poll.id), Some("forged"), &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn vote_on_foreign_option_returns_404() {
    let mut store = Store::new();
    let first = store.add_poll("First", 1, &["a"]);
    let second = store.add_poll("Second", 1, &["b"]);
    let token = store.issue_token("carol");
    let body = format!(r#"{{"option_id":{}}}"#, second.options[0].id);

    let resp = app_with(store)
        .oneshot(vote_request(&format!("/polls/{}/vote", first.id), Some(token.as_str()), &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- results ---

#[tokio::test]
async fn results_not_found() {
    let resp = app().oneshot(get("/polls/12345/results")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn results_bad_id_returns_400() {
    let resp = app().oneshot(get("/polls/not-a-number/results")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full vote lifecycle ---

#[tokio::test]
async fn vote_lifecycle() {
    use tower::Service;

    let mut store = Store::new();
    let poll = store.add_poll("Best editor?", 1, &["vim", "emacs"]);
    let token = store.issue_token("dave");
    let emacs = poll.options[1].id;
    let mut app = app_with(store).into_service();

    // vote
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(vote_request(
            &format!("/polls/{}/vote", poll.id),
            Some(token.as_str()),
            &format!(r#"{{"option_id":{emacs}}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let vote: VoteOut = body_json(resp).await;
    assert_eq!(vote.option_id, emacs);

    // results reflect the vote
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/polls/{}/results", poll.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let results: ResultsOut = body_json(resp).await;
    assert_eq!(results.question, "Best editor?");
    let counts: Vec<(String, u64)> = results
        .results
        .into_iter()
        .map(|r| (r.option_text, r.vote_count))
        .collect();
    assert_eq!(counts, vec![("vim".to_string(), 0), ("emacs".to_string(), 1)]);

    // unknown poll carries a detail body
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/polls/999/results"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_bytes(resp).await;
    assert!(!body.is_empty());
}
