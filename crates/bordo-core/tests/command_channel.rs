//! Integration tests for the backend client against a local mock API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use bordo_core::backend::{BackendClient, COMMAND_FALLBACK};
use bordo_core::config::Config;
use bordo_core::mapper::{self, ColorTier};
use bordo_core::state::{ChannelId, Dashboard};

/// Spin up a mock backend on an ephemeral port. Returns the base URL and a
/// counter of `/command` hits.
async fn mock_backend() -> (String, Arc<AtomicUsize>) {
    let command_hits = Arc::new(AtomicUsize::new(0));

    let hits = Arc::clone(&command_hits);
    let app = Router::new()
        .route(
            "/motor",
            get(|| async {
                Json(json!({
                    "temperatura_motor_ect": 90.0,
                    "posicao_virabrequim_ckp": 180.0,
                }))
            }),
        )
        .route(
            "/command",
            post(move |Json(body): Json<serde_json::Value>| {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let text = body["command"].as_str().unwrap_or_default();
                    Json(json!({ "response": format!("entendido: {text}") }))
                }
            }),
        )
        .route(
            "/lights",
            post(|| async { Json(json!({ "response": "luzes alternadas" })) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend serve");
    });

    (format!("http://{addr}"), command_hits)
}

#[tokio::test]
async fn blank_command_is_a_no_op() {
    let (base_url, command_hits) = mock_backend().await;
    let client = BackendClient::new(base_url);

    assert_eq!(client.send_command("").await, None);
    assert_eq!(client.send_command("   ").await, None);
    assert_eq!(command_hits.load(Ordering::SeqCst), 0, "no request may go out");
}

#[tokio::test]
async fn command_roundtrip_returns_backend_text() {
    let (base_url, command_hits) = mock_backend().await;
    let client = BackendClient::new(base_url);

    let reply = client.send_command("  ligar farol  ").await;
    assert_eq!(reply.as_deref(), Some("entendido: ligar farol"));
    assert_eq!(command_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transport_failure_surfaces_fallback_text() {
    // Bind, grab the port, then drop the listener so nothing answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BackendClient::new(format!("http://{addr}"));
    let reply = client.send_command("qualquer coisa").await;
    assert_eq!(reply.as_deref(), Some(COMMAND_FALLBACK));
}

#[tokio::test]
async fn lights_toggle_returns_feedback() {
    let (base_url, _) = mock_backend().await;
    let client = BackendClient::new(base_url);
    assert_eq!(client.toggle_lights().await.unwrap(), "luzes alternadas");
}

#[tokio::test]
async fn motor_sample_drives_both_rings() {
    let (base_url, _) = mock_backend().await;
    let client = BackendClient::new(base_url);
    let dash = Dashboard::new(&Config::default());

    let readings = client.motor().await.expect("mock /motor");
    dash.update_channel(ChannelId::EngineTemp, readings.coolant_temp_c)
        .await
        .unwrap();
    let rpm = mapper::rpm_from_crank_angle(readings.crank_angle_deg, 8000.0);
    dash.update_channel(ChannelId::EngineRpm, rpm).await.unwrap();

    let snap = dash.snapshot().await;
    let temp = snap.channel(ChannelId::EngineTemp);
    assert_eq!(temp.reading.value, 90.0);
    // 90/120 = 75% sits in the 60–80% band.
    assert_eq!(temp.reading.tier, ColorTier::Elevated);
    assert_eq!(snap.channel(ChannelId::EngineRpm).reading.value, 4000.0);
}
