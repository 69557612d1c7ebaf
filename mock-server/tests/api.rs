use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Todo, INVALID_UTF8_BODY};
use tower::ServiceExt;

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_text(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- todos ---

#[tokio::test]
async fn get_todo_returns_pretty_json() {
    let resp = app().oneshot(get("/todos/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json; charset=utf-8"
    );
    let text = body_text(resp).await;
    assert_eq!(text.lines().count(), 6, "one line per field plus braces");
    let todo: Todo = serde_json::from_str(&text).unwrap();
    assert_eq!(todo.id, 1);
    assert_eq!(todo.user_id, 1);
    assert_eq!(todo.title, "delectus aut autem");
    assert!(!todo.completed);
}

#[tokio::test]
async fn get_todo_not_found() {
    let resp = app().oneshot(get("/todos/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn get_todo_bad_id_returns_400() {
    let resp = app().oneshot(get("/todos/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_todos_returns_all_seeded() {
    let resp = app().oneshot(get("/todos")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(todos.len(), 4);
    assert_eq!(todos.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
}

// --- status ---

#[tokio::test]
async fn status_route_echoes_code() {
    for code in [200u16, 201, 404, 500, 503] {
        let resp = app().oneshot(get(&format!("/status/{code}"))).await.unwrap();
        assert_eq!(resp.status().as_u16(), code);
    }
}

#[tokio::test]
async fn status_route_rejects_out_of_range_code() {
    let resp = app().oneshot(get("/status/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- lines ---

#[tokio::test]
async fn lines_route_emits_numbered_json_lines() {
    let resp = app().oneshot(get("/lines/3")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_text(resp).await,
        "{\"line\":1}\n{\"line\":2}\n{\"line\":3}\n"
    );
}

#[tokio::test]
async fn lines_route_zero_is_empty() {
    let resp = app().oneshot(get("/lines/0")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn lines_route_caps_count() {
    let resp = app().oneshot(get("/lines/100001")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- raw bytes and headers ---

#[tokio::test]
async fn invalid_utf8_route_serves_raw_bytes() {
    let resp = app().oneshot(get("/bytes/invalid-utf8")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], INVALID_UTF8_BODY);
}

#[tokio::test]
async fn echo_accept_returns_header_value() {
    let req = Request::builder()
        .uri("/echo/accept")
        .header(http::header::ACCEPT, "application/json")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(body_text(resp).await, "application/json");
}

#[tokio::test]
async fn echo_accept_without_header_is_empty() {
    let resp = app().oneshot(get("/echo/accept")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}
