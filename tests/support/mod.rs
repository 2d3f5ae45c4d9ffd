// Shared mock booking backend for integration tests.
use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

// Every JSON body the mock backend received, in arrival order.
pub type Received = Arc<Mutex<Vec<Value>>>;

// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn_backend(router: Router) -> String {
    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock backend failed");
    });
    format!("http://{addr}")
}

// A backend that reports the room as free and confirms every create.
pub fn happy_backend() -> (Router, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/api/bookings/check", post(happy_handler))
        .with_state(received.clone());
    (router, received)
}

async fn happy_handler(
    State(received): State<Received>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let is_create = body["isCreate"].as_bool().unwrap_or(false);
    received.lock().expect("received mutex poisoned").push(body);

    if is_create {
        (StatusCode::OK, Json(json!({ "message": "Booking confirmed" })))
    } else {
        (
            StatusCode::OK,
            Json(json!({ "roomAvailable": true, "message": "Room is free" })),
        )
    }
}
