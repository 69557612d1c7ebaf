use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Upper bound for `/lines/{count}`.
pub const MAX_LINES: usize = 100_000;

/// Body served by `/bytes/invalid-utf8`; the second line is not UTF-8.
pub const INVALID_UTF8_BODY: &[u8] = b"{\"ok\":true}\n\xff\xfe\n{\"ok\":false}\n";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub completed: bool,
}

pub type Db = Arc<BTreeMap<u32, Todo>>;

pub fn seed() -> Db {
    let todos = [
        (1, "delectus aut autem", false),
        (2, "quis ut nam facilis et officia qui", false),
        (3, "fugiat veniam minus", false),
        (4, "et porro tempora", true),
    ];
    let db = todos
        .into_iter()
        .map(|(id, title, completed)| {
            let todo = Todo {
                user_id: 1,
                id,
                title: title.to_string(),
                completed,
            };
            (id, todo)
        })
        .collect();
    Arc::new(db)
}

pub fn app() -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/{id}", get(get_todo))
        .route("/status/{code}", get(status))
        .route("/lines/{count}", get(lines))
        .route("/bytes/invalid-utf8", get(invalid_utf8))
        .route("/echo/accept", get(echo_accept))
        .with_state(seed())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Pretty-printed JSON, one field per line, like the public endpoint serves.
fn pretty_json<T: Serialize>(value: &T) -> Result<impl IntoResponse, StatusCode> {
    let body =
        serde_json::to_string_pretty(value).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(([(header::CONTENT_TYPE, "application/json; charset=utf-8")], body))
}

async fn list_todos(State(db): State<Db>) -> Result<impl IntoResponse, StatusCode> {
    let todos: Vec<Todo> = db.values().cloned().collect();
    pretty_json(&todos)
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<impl IntoResponse, StatusCode> {
    debug!("GET /todos/{id}");
    let todo = db.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    pretty_json(todo)
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

async fn lines(Path(count): Path<usize>) -> Result<String, StatusCode> {
    if count > MAX_LINES {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok((1..=count).map(|n| format!("{{\"line\":{n}}}\n")).collect())
}

async fn invalid_utf8() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], INVALID_UTF8_BODY)
}

async fn echo_accept(headers: HeaderMap) -> String {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
