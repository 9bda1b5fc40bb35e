#![allow(dead_code)]

use rendezvous::messages::{Joined, LobbyCreated};
use rendezvous::signaling::{LobbyRegistry, SessionDescription};
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct TestServer {
    base_url: String,
    pub registry: Arc<LobbyRegistry>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn slot_url(&self, lobby_id: &str, slot: impl std::fmt::Display, kind: &str) -> String {
        self.url(&format!("/lobbies/{}/slots/{}/{}", lobby_id, slot, kind))
    }

    pub async fn create_lobby(&self) -> String {
        let response = self.client.post(self.url("/lobbies")).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json::<LobbyCreated>().await.unwrap().lobby_id
    }

    pub async fn join(&self, lobby_id: &str) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/lobbies/{}/join", lobby_id)))
            .send()
            .await
            .unwrap()
    }

    pub async fn join_slot(&self, lobby_id: &str) -> usize {
        let response = self.join(lobby_id).await;
        assert!(response.status().is_success());
        response.json::<Joined>().await.unwrap().slot_index
    }

    pub async fn post_payload(
        &self,
        lobby_id: &str,
        slot: impl std::fmt::Display,
        kind: &str,
        body: impl Into<reqwest::Body>,
    ) -> reqwest::Response {
        self.client
            .post(self.slot_url(lobby_id, slot, kind))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn get_payload(
        &self,
        lobby_id: &str,
        slot: impl std::fmt::Display,
        kind: &str,
    ) -> reqwest::Response {
        self.client
            .get(self.slot_url(lobby_id, slot, kind))
            .send()
            .await
            .unwrap()
    }
}

pub async fn spawn_test_server() -> TestServer {
    let registry = Arc::new(LobbyRegistry::new());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = rendezvous::app_with_registry(registry.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        registry,
        client: reqwest::Client::new(),
    }
}

pub fn offer_json(sdp: &str) -> String {
    serde_json::to_string(&SessionDescription::new("offer", sdp)).unwrap()
}

pub fn answer_json(sdp: &str) -> String {
    serde_json::to_string(&SessionDescription::new("answer", sdp)).unwrap()
}
