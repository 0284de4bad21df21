//! Client tests against an axum fake of the guest backend.

use std::{
  sync::{Arc, Mutex},
  time::Duration,
};

use axum::{
  Json, Router,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
  routing::{get, post},
};
use concierge_core::{
  api::GuestApi,
  guest::{AccessibilityOption, Guest, GuestId, GuestInput, OptionSelection},
  session::GuestSession,
};
use serde_json::{Value, json};
use tokio::{
  io::{AsyncReadExt, AsyncWriteExt},
  net::TcpListener,
};

use crate::{ApiClient, ApiConfig, NetworkError};

// ─── Fake backend ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct Backend {
  guests:      Arc<Mutex<Vec<Guest>>>,
  /// Last JSON body received by a write endpoint.
  last_body:   Arc<Mutex<Option<Value>>>,
}

fn not_found() -> (StatusCode, Json<Value>) {
  (StatusCode::NOT_FOUND, Json(json!({ "detail": "Guest not found" })))
}

async fn list_guests(State(b): State<Backend>) -> Json<Vec<Guest>> {
  Json(b.guests.lock().unwrap().clone())
}

async fn get_guest(
  State(b): State<Backend>,
  Path(id): Path<GuestId>,
) -> Result<Json<Guest>, (StatusCode, Json<Value>)> {
  let guests = b.guests.lock().unwrap();
  guests
    .iter()
    .find(|g| g.id == id)
    .cloned()
    .map(Json)
    .ok_or_else(not_found)
}

async fn create_guest(State(b): State<Backend>, Json(body): Json<Value>) -> impl IntoResponse {
  let input: GuestInput = serde_json::from_value(body["guest"].clone()).unwrap();
  let mut guests = b.guests.lock().unwrap();
  let id = guests.iter().map(|g| g.id).max().unwrap_or(0) + 1;
  let guest = Guest::from_input(id, input);
  guests.push(guest.clone());
  *b.last_body.lock().unwrap() = Some(body);
  (StatusCode::CREATED, Json(guest))
}

async fn update_guest(
  State(b): State<Backend>,
  Path(id): Path<GuestId>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
  let input: GuestInput = serde_json::from_value(body["updated_guest"].clone()).unwrap();
  let mut guests = b.guests.lock().unwrap();
  let slot = guests.iter_mut().find(|g| g.id == id).ok_or_else(not_found)?;
  *slot = Guest::from_input(id, input);
  let updated = slot.clone();
  *b.last_body.lock().unwrap() = Some(body);
  Ok((StatusCode::CREATED, Json(updated)))
}

async fn delete_guest(
  State(b): State<Backend>,
  Path(id): Path<GuestId>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
  let mut guests = b.guests.lock().unwrap();
  let before = guests.len();
  guests.retain(|g| g.id != id);
  if guests.len() == before {
    return Err(not_found());
  }
  Ok(StatusCode::NO_CONTENT)
}

async fn list_options() -> Json<Vec<AccessibilityOption>> {
  Json(vec![
    AccessibilityOption { id: 1, name: "Wheelchair access".into() },
    AccessibilityOption { id: 2, name: "Hearing loop".into() },
  ])
}

async fn spawn_backend(seed: Vec<Guest>) -> (ApiClient, Backend) {
  let backend = Backend::default();
  *backend.guests.lock().unwrap() = seed;

  let app = Router::new()
    .route("/guest/all", get(list_guests))
    .route("/guest/create", post(create_guest))
    .route(
      "/guest/{id}",
      get(get_guest).put(update_guest).delete(delete_guest),
    )
    .route("/accessibility_option/all", get(list_options))
    .with_state(backend.clone());

  let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
  let addr = listener.local_addr().expect("local addr");
  tokio::spawn(async move {
    let _ = axum::serve(listener, app).await;
  });

  let client = ApiClient::new(ApiConfig {
    base_url: format!("http://{addr}/"),
    timeout:  Duration::from_secs(5),
  })
  .expect("client");
  (client, backend)
}

fn guest(id: GuestId, first: &str, last: &str) -> Guest {
  Guest::from_input(id, GuestInput {
    first_name: first.into(),
    last_name: last.into(),
    ..GuestInput::default()
  })
}

fn input(first: &str, last: &str) -> GuestInput {
  GuestInput {
    first_name: first.into(),
    last_name: last.into(),
    city: "Oslo".into(),
    ..GuestInput::default()
  }
}

// ─── Requests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lists_guests_and_options() {
  let (client, _) = spawn_backend(vec![guest(1, "Ann", "Lee")]).await;
  let guests = client.list_guests().await.unwrap();
  assert_eq!(guests, vec![guest(1, "Ann", "Lee")]);

  let options = client.list_accessibility_options().await.unwrap();
  assert_eq!(options.len(), 2);
}

#[tokio::test]
async fn get_missing_guest_is_not_found() {
  let (client, _) = spawn_backend(vec![]).await;
  let err = client.get_guest(9).await.unwrap_err();
  assert!(err.is_not_found());
  match err {
    NetworkError::Status { detail, .. } => assert_eq!(detail.as_deref(), Some("Guest not found")),
    other => panic!("unexpected error: {other}"),
  }
}

#[tokio::test]
async fn create_sends_sentinel_when_no_options() {
  let (client, backend) = spawn_backend(vec![]).await;
  let created = client
    .create_guest(&input("Ann", "Lee"), &OptionSelection::new())
    .await
    .unwrap();
  assert_eq!(created.id, 1);
  assert_eq!(created.city, "Oslo");

  let body = backend.last_body.lock().unwrap().clone().unwrap();
  assert_eq!(body["accessibility_option_ids"], json!([-1]));
  assert_eq!(body["guest"]["first_name"], json!("Ann"));
}

#[tokio::test]
async fn update_sends_new_option_ids() {
  let (client, backend) = spawn_backend(vec![guest(4, "Ann", "Lee")]).await;
  let selection: OptionSelection = [1, 2].into_iter().collect();
  let updated = client
    .update_guest(4, &input("Anna", "Lee"), &selection)
    .await
    .unwrap();
  assert_eq!(updated.first_name, "Anna");

  let body = backend.last_body.lock().unwrap().clone().unwrap();
  assert_eq!(body["new_accessibility_option_ids"], json!([1, 2]));
  assert_eq!(body["updated_guest"]["first_name"], json!("Anna"));
}

#[tokio::test]
async fn delete_accepts_empty_response() {
  let (client, backend) = spawn_backend(vec![guest(1, "Ann", "Lee")]).await;
  client.delete_guest(1).await.unwrap();
  assert!(backend.guests.lock().unwrap().is_empty());
  assert!(client.delete_guest(1).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
  // Bind then drop to get a port with nothing listening.
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let client = ApiClient::new(ApiConfig {
    base_url: format!("http://{addr}"),
    timeout:  Duration::from_secs(2),
  })
  .unwrap();
  let err = client.list_guests().await.unwrap_err();
  assert!(matches!(err, NetworkError::Transport { .. }), "{err}");
}

#[tokio::test]
async fn stalled_body_is_a_timeout() {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    let Ok((mut socket, _)) = listener.accept().await else { return };
    let mut buf = [0u8; 1024];
    let _ = socket.read(&mut buf).await;
    let head = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n[";
    let _ = socket.write_all(head.as_bytes()).await;
    tokio::time::sleep(Duration::from_secs(5)).await;
  });

  let client = ApiClient::new(ApiConfig {
    base_url: format!("http://{addr}"),
    timeout:  Duration::from_millis(300),
  })
  .unwrap();
  let err = client.list_guests().await.unwrap_err();
  assert!(err.is_timeout(), "{err}");
  assert!(matches!(err, NetworkError::Transport { .. }));
}

#[test]
fn rejects_malformed_base_url() {
  let err = ApiClient::new(ApiConfig {
    base_url: "not a url".into(),
    ..ApiConfig::default()
  })
  .unwrap_err();
  assert!(matches!(err, NetworkError::InvalidBaseUrl { .. }));
}

// ─── Through the session ─────────────────────────────────────────────────────

#[tokio::test]
async fn session_round_trip_over_http() {
  let (client, _) = spawn_backend(vec![guest(1, "Ann", "Lee"), guest(2, "Bob", "Stone")]).await;
  let mut session = GuestSession::new(client);
  session.load().await.unwrap();
  assert_eq!(session.view().displayed().len(), 2);

  let selection: OptionSelection = [2].into_iter().collect();
  session.create(&input("Cleo", "Ray"), &selection).await.unwrap();
  let cleo = session.view().get(3).unwrap();
  assert_eq!(cleo.accessibility_options[0].name, "Hearing loop");

  session.delete(1).await.unwrap();
  let ids: Vec<_> = session.view().all().iter().map(|g| g.id).collect();
  assert_eq!(ids, vec![2, 3]);

  let err = session.delete(1).await.unwrap_err();
  assert!(err.is_not_found());
  assert_eq!(session.view().all().len(), 2);

  // Same client, called through the trait.
  assert_eq!(GuestApi::list_guests(session.api()).await.unwrap().len(), 2);
}
