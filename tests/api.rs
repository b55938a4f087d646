use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use futures::StreamExt;
use scoreboard_back::{config::AppConfig, routes, state::AppState};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::{net::TcpListener, time::timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tower::ServiceExt;

const STREAM_WAIT: Duration = Duration::from_secs(5);

struct TestApp {
    router: Router,
    _saves: TempDir,
}

fn app() -> TestApp {
    let saves = TempDir::new().unwrap();
    let config = AppConfig::default().with_saves_dir(saves.path());
    TestApp {
        router: routes::router(AppState::new(config)),
        _saves: saves,
    }
}

async fn call(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn fresh_server_reports_defaults() {
    let app = app();
    let (status, state) = call(&app, Method::GET, "/api/state", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["homeName"], "Domácí");
    assert_eq!(state["awayName"], "Hosté");
    assert_eq!(state["homeShort"], "DOM");
    assert_eq!(state["awayShort"], "HOS");
    assert_eq!(state["timer"], "00:00");
    assert_eq!(state["running"], false);
    assert_eq!(state["halfLength"], 45);
    assert_eq!(state["half"], 1);
    assert_eq!(state["primaryColor"], "#1e3a8a");
}

#[tokio::test]
async fn update_regenerates_invalid_short_codes() {
    let app = app();
    let (status, state) = call(
        &app,
        Method::POST,
        "/api/update",
        Some(json!({ "homeName": "Sparta Praha", "homeShort": "ab1", "homeScore": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["homeShort"], "SPA");
    assert_eq!(state["homeScore"], 2);
    assert_eq!(state["awayShort"], "HOS");
}

#[tokio::test]
async fn update_ignores_clock_fields() {
    let app = app();
    let (status, state) = call(
        &app,
        Method::POST,
        "/api/update",
        Some(json!({ "timer": "12:00", "running": true, "theme": "bar" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["timer"], "00:00");
    assert_eq!(state["running"], false);
    assert_eq!(state["theme"], "bar");
}

#[tokio::test]
async fn malformed_color_is_rejected_without_changes() {
    let app = app();
    let (status, _) = call(
        &app,
        Method::POST,
        "/api/update",
        Some(json!({ "homeName": "Changed", "primaryColor": "blue-ish" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, state) = call(&app, Method::GET, "/api/state", None).await;
    assert_eq!(state["homeName"], "Domácí");
    assert_eq!(state["primaryColor"], "#1e3a8a");
}

#[tokio::test]
async fn swap_sides_toggles_only_the_flag() {
    let app = app();
    let (_, first) = call(&app, Method::POST, "/api/swapSides", None).await;
    assert_eq!(first["sidesFlipped"], true);
    assert_eq!(first["half"], 1);

    let (_, second) = call(&app, Method::POST, "/api/swapSides", None).await;
    assert_eq!(second["sidesFlipped"], false);
}

#[tokio::test]
async fn timer_commands_drive_the_clock() {
    let app = app();
    call(
        &app,
        Method::POST,
        "/api/import",
        Some(json!({ "timer": "10:00", "halfLength": 45 })),
    )
    .await;

    let (status, started) = call(&app, Method::POST, "/api/timer/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(started["running"], true);
    assert_eq!(started["timer"], "10:00");

    let (_, paused) = call(&app, Method::POST, "/api/timer/pause", None).await;
    assert_eq!(paused["running"], false);
    assert_eq!(paused["timer"], "10:00");

    let (_, second_half) = call(&app, Method::POST, "/api/timer/secondHalf", None).await;
    assert_eq!(second_half["half"], 2);
    assert_eq!(second_half["running"], true);
    assert_eq!(second_half["timer"], "45:00");
    assert_eq!(second_half["sidesFlipped"], true);

    let (_, reset) = call(&app, Method::POST, "/api/timer/reset", None).await;
    assert_eq!(reset["half"], 1);
    assert_eq!(reset["running"], false);
    assert_eq!(reset["timer"], "00:00");
}

#[tokio::test]
async fn import_normalizes_and_rejects_garbage() {
    let app = app();
    let (status, state) = call(
        &app,
        Method::POST,
        "/api/import",
        Some(json!({ "homeName": "Baník", "awayName": "Slavia", "half": 0, "homeShort": "toolong" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["half"], 1);
    assert_eq!(state["homeShort"], "BAN");
    assert_eq!(state["awayShort"], "SLA");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/import")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, unchanged) = call(&app, Method::GET, "/api/state", None).await;
    assert_eq!(unchanged["homeName"], "Baník");
}

#[tokio::test]
async fn import_accepts_multipart_upload() {
    let app = app();
    let boundary = "scoreboard-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"state.json\"\r\nContent-Type: application/json\r\n\r\n{}\r\n--{boundary}--\r\n",
        json!({ "homeName": "Upload", "homeScore": 4 })
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/import")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, state) = call(&app, Method::GET, "/api/state", None).await;
    assert_eq!(state["homeName"], "Upload");
    assert_eq!(state["homeScore"], 4);
}

#[tokio::test]
async fn export_is_an_attachment() {
    let app = app();
    let request = Request::builder()
        .uri("/api/export")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert!(disposition.contains("scoreboard-state.json"));
}

#[tokio::test]
async fn snapshots_round_trip_through_disk() {
    let app = app();
    call(
        &app,
        Method::POST,
        "/api/update",
        Some(json!({ "homeName": "Saved Team", "awayScore": 3 })),
    )
    .await;

    let (status, saved) = call(&app, Method::POST, "/api/save?filename=../derby", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["saved"], "..derby.json");

    let (_, body_saved) = call(
        &app,
        Method::POST,
        "/api/save",
        Some(json!({ "filename": "final" })),
    )
    .await;
    assert_eq!(body_saved["saved"], "final.json");

    let (_, names) = call(&app, Method::GET, "/api/saves", None).await;
    assert_eq!(names, json!(["..derby.json", "final.json"]));

    call(&app, Method::POST, "/api/timer/reset", None).await;
    call(
        &app,
        Method::POST,
        "/api/update",
        Some(json!({ "homeName": "Someone Else" })),
    )
    .await;

    let (status, loaded) = call(&app, Method::POST, "/api/load?filename=final", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded["homeName"], "Saved Team");
    assert_eq!(loaded["awayScore"], 3);
}

#[tokio::test]
async fn save_without_name_uses_a_timestamp() {
    let app = app();
    let (status, saved) = call(&app, Method::POST, "/api/save", None).await;

    assert_eq!(status, StatusCode::OK);
    let name = saved["saved"].as_str().unwrap();
    assert!(name.ends_with(".json"));
    assert_eq!(name.len(), "20240101-120000.json".len());
}

#[tokio::test]
async fn load_reports_missing_name_and_file() {
    let app = app();
    let (status, _) = call(&app, Method::POST, "/api/load", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, Method::POST, "/api/load?filename=nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_saves_directory_lists_nothing() {
    let app = app();
    let (status, names) = call(&app, Method::GET, "/api/saves", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names, json!([]));
}

#[tokio::test]
async fn color_derivation_requires_an_image() {
    let app = app();
    let (status, _) = call(&app, Method::GET, "/api/colors/derive", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, Method::POST, "/api/colors/derive", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn healthcheck_counts_viewers() {
    let app = app();
    let (status, health) = call(&app, Method::GET, "/healthcheck", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health, json!({ "status": "ok", "subscribers": 0 }));
}

#[tokio::test]
async fn stream_starts_with_the_current_state() {
    let app = app();
    call(
        &app,
        Method::POST,
        "/api/update",
        Some(json!({ "awayName": "Streamed" })),
    )
    .await;

    let request = Request::builder()
        .uri("/api/stream")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/event-stream"
    );

    let mut body = response.into_body().into_data_stream();
    let state = next_sse_state(&mut body).await;
    assert_eq!(state["awayName"], "Streamed");
    assert_eq!(state["sidesFlipped"], false);

    let (_, health) = call(&app, Method::GET, "/healthcheck", None).await;
    assert_eq!(health["subscribers"], 1);

    call(&app, Method::POST, "/api/swapSides", None).await;
    let changed = next_sse_state(&mut body).await;
    assert_eq!(changed["sidesFlipped"], true);
    assert_eq!(changed["awayName"], "Streamed");

    drop(body);
    let (_, health) = call(&app, Method::GET, "/healthcheck", None).await;
    assert_eq!(health["subscribers"], 0);
}

#[tokio::test]
async fn control_root_redirects_to_trailing_slash() {
    let app = app();
    let request = Request::builder()
        .uri("/ovladani")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/ovladani/");
}

async fn next_sse_state<S>(body: &mut S) -> Value
where
    S: futures::Stream<Item = Result<axum::body::Bytes, axum::Error>> + Unpin,
{
    let frame = timeout(STREAM_WAIT, body.next())
        .await
        .expect("sse frame in time")
        .unwrap()
        .unwrap();
    let text = String::from_utf8(frame.to_vec()).unwrap();
    let data = text.trim().strip_prefix("data: ").unwrap();
    serde_json::from_str(data).unwrap()
}

#[tokio::test]
async fn websocket_pushes_initial_and_changed_state() {
    let app = app();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, server).await.unwrap();
    });

    let (mut socket, _) = connect_async(format!("ws://{addr}/api/ws")).await.unwrap();

    let initial = next_ws_state(&mut socket).await;
    assert_eq!(initial["homeName"], "Domácí");
    assert_eq!(initial["sidesFlipped"], false);

    call(&app, Method::POST, "/api/swapSides", None).await;
    let changed = next_ws_state(&mut socket).await;
    assert_eq!(changed["sidesFlipped"], true);

    let (_, health) = call(&app, Method::GET, "/healthcheck", None).await;
    assert_eq!(health["subscribers"], 1);
}

async fn next_ws_state<S>(socket: &mut S) -> Value
where
    S: futures::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let message = timeout(STREAM_WAIT, socket.next())
            .await
            .expect("websocket frame in time")
            .unwrap()
            .unwrap();
        if let Message::Text(text) = message {
            return serde_json::from_str(&text).unwrap();
        }
    }
}
