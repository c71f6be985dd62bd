//! HTTP gateway against an in-process `/stars` service.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use shared::{NotificationKind, ProfilePayload, SocialLinks, SocialPlatform};
use star_client::domain::RecordingNotificationSink;
use star_client::{ClientConfig, HttpProfileGateway, ProfileSession, ProfileSyncGateway, SyncError};

type Collection = Arc<Mutex<Vec<Value>>>;

async fn list_stars(State(collection): State<Collection>) -> Json<Vec<Value>> {
    Json(collection.lock().unwrap().clone())
}

async fn create_star(State(collection): State<Collection>, Json(mut body): Json<Value>) -> Response {
    let name = body["name"].as_str().map(str::to_string);
    match name.as_deref() {
        Some("Taken Name") => (StatusCode::BAD_REQUEST, "Name already taken").into_response(),
        Some("explode") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => {
            let mut stars = collection.lock().unwrap();
            body["_id"] = json!(format!("srv-{}", stars.len() + 1));
            stars.insert(0, body.clone());
            (StatusCode::CREATED, Json(body)).into_response()
        }
    }
}

async fn delete_star(State(collection): State<Collection>, Path(id): Path<String>) -> StatusCode {
    let mut stars = collection.lock().unwrap();
    match stars.iter().position(|star| star["_id"] == id.as_str()) {
        Some(index) => {
            stars.remove(index);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn spawn_stub(seed: Vec<Value>) -> (String, Collection) {
    let collection: Collection = Arc::new(Mutex::new(seed));
    let app = Router::new()
        .route("/stars", get(list_stars).post(create_star))
        .route("/stars/:id", delete(delete_star))
        .with_state(Arc::clone(&collection));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), collection)
}

fn gateway(base_url: &str) -> HttpProfileGateway {
    let config = ClientConfig {
        api_base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..ClientConfig::default()
    };
    HttpProfileGateway::new(&config).unwrap()
}

fn stored_star(id: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("Star {}", id),
        "bio": "Known for things",
        "dp": format!("/{}.jpg", id),
        "dob": "1990-05-01T00:00:00.000Z",
        "ig_link": format!("https://instagram.com/{}", id),
        "x_link": "https://x.com",
        "ph_link": "https://youtube.com",
        "of_link": "https://threads.net",
        "web": "https://yoursite.com",
        "rating": 4.5,
        "__v": 0
    })
}

fn payload(name: &str) -> ProfilePayload {
    ProfilePayload {
        name: name.to_string(),
        bio: String::new(),
        image_url: String::new(),
        date_of_birth: NaiveDate::from_ymd_opt(1985, 12, 24).unwrap(),
        social_links: SocialLinks::default(),
        rating: 3.0,
    }
}

#[tokio::test]
async fn list_reads_wire_format() {
    let (url, _) = spawn_stub(vec![stored_star("a"), stored_star("b")]).await;

    let profiles = gateway(&url).list().await.unwrap();

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].id, "a");
    assert_eq!(profiles[0].name(), "Star a");
    assert_eq!(profiles[0].details.image_url, "/a.jpg");
    assert_eq!(
        profiles[0].details.date_of_birth,
        NaiveDate::from_ymd_opt(1990, 5, 1).unwrap()
    );
    assert_eq!(
        profiles[0].details.social_links.get(SocialPlatform::Instagram),
        "https://instagram.com/a"
    );
    assert_eq!(profiles[1].id, "b");
}

#[tokio::test]
async fn create_returns_server_identity() {
    let (url, collection) = spawn_stub(vec![stored_star("a")]).await;

    let profile = gateway(&url).create(&payload("Jane Doe")).await.unwrap();

    assert_eq!(profile.id, "srv-2");
    assert_eq!(profile.details, payload("Jane Doe"));

    let stored = collection.lock().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0]["dob"], "1985-12-24");
    assert_eq!(stored[0]["web"], "https://yoursite.com");
}

#[tokio::test]
async fn status_codes_map_to_sync_errors() {
    let (url, _) = spawn_stub(Vec::new()).await;
    let gateway = gateway(&url);

    assert_eq!(
        gateway.create(&payload("Taken Name")).await,
        Err(SyncError::ServerRejected("Name already taken".to_string()))
    );
    assert_eq!(
        gateway.create(&payload("explode")).await,
        Err(SyncError::Network("Request failed with status code 500".to_string()))
    );
    assert_eq!(
        gateway.delete("ghost").await,
        Err(SyncError::NotFound("ghost".to_string()))
    );
}

#[tokio::test]
async fn delete_sends_reserved_characters_as_one_segment() {
    let (url, collection) = spawn_stub(vec![stored_star("a/b?c"), stored_star("a")]).await;

    gateway(&url).delete("a/b?c").await.unwrap();

    let stored = collection.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["_id"], "a");
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = gateway(&format!("http://{}", addr)).list().await;

    assert!(matches!(result, Err(SyncError::Network(_))));
}

#[tokio::test]
async fn session_round_trip_over_http() {
    let (url, collection) = spawn_stub(vec![stored_star("a"), stored_star("b")]).await;
    let session = ProfileSession::new(gateway(&url), RecordingNotificationSink::new());

    assert_eq!(session.bootstrap().await, Ok(2));

    let created = session.create_profile(payload("Jane Doe")).await.unwrap();
    let ids: Vec<String> = session.snapshot().profiles.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![created.id.clone(), "a".to_string(), "b".to_string()]);

    session.delete_profile("a").await.unwrap();
    let ids: Vec<String> = session.snapshot().profiles.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![created.id, "b".to_string()]);
    assert_eq!(collection.lock().unwrap().len(), 2);

    let notifications = session.notifier().take();
    assert_eq!(notifications.len(), 2);
    assert!(notifications.iter().all(|n| n.kind == NotificationKind::Success));
}

#[tokio::test]
async fn rejected_mutations_roll_back_over_http() {
    let (url, collection) =
        spawn_stub(vec![stored_star("a"), stored_star("b"), stored_star("c")]).await;
    let session = ProfileSession::new(gateway(&url), RecordingNotificationSink::new());
    session.bootstrap().await.unwrap();

    let result = session.create_profile(payload("Taken Name")).await;
    assert_eq!(
        result,
        Err(SyncError::ServerRejected("Name already taken".to_string()))
    );

    // Removed remotely behind the session's back
    collection.lock().unwrap().retain(|star| star["_id"] != "b");
    let result = session.delete_profile("b").await;
    assert_eq!(result, Err(SyncError::NotFound("b".to_string())));

    let ids: Vec<String> = session.snapshot().profiles.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    let notifications = session.notifier().take();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0].title, "Name already taken");
    assert_eq!(notifications[1].title, "Profile not found: b");
    assert!(notifications.iter().all(|n| n.is_failure()));
}
