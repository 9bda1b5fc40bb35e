//! HTTP handlers for lobbies and per-slot offers/answers.
//!
//! Lobby and slot misses all look the same to the caller. Payload bodies go
//! back out exactly as they came in.

use super::error::{ApiError, RegistryError};
use super::messages::{Joined, LobbyCreated, LobbyList, UnregisteredPeers};
use super::payload::PayloadKind;
use crate::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::debug;

pub async fn create_lobby(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<LobbyCreated>), ApiError> {
    let lobby_id = state.registry.create_lobby()?;
    Ok((StatusCode::CREATED, Json(LobbyCreated { lobby_id })))
}

pub async fn list_lobbies(State(state): State<AppState>) -> Json<LobbyList> {
    let lobby_ids = state.registry.lobby_ids().into_iter().collect();
    Json(LobbyList { lobby_ids })
}

pub async fn delete_lobby(
    State(state): State<AppState>,
    Path(lobby_id): Path<String>,
) -> StatusCode {
    state.registry.delete_lobby(&lobby_id);
    StatusCode::NO_CONTENT
}

pub async fn join_lobby(
    State(state): State<AppState>,
    Path(lobby_id): Path<String>,
) -> Result<Json<Joined>, ApiError> {
    let slot_index = state.registry.join(&lobby_id).map_err(rejected)?;
    Ok(Json(Joined { slot_index }))
}

pub async fn unregistered_peers(
    State(state): State<AppState>,
    Path(lobby_id): Path<String>,
) -> Result<Json<UnregisteredPeers>, ApiError> {
    let slot_indices = state
        .registry
        .unregistered_peers(&lobby_id)
        .map_err(rejected)?;
    Ok(Json(UnregisteredPeers { slot_indices }))
}

pub async fn get_offer(
    State(state): State<AppState>,
    Path((lobby_id, slot)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    fetch_payload(&state, &lobby_id, &slot, PayloadKind::Offer)
}

pub async fn get_answer(
    State(state): State<AppState>,
    Path((lobby_id, slot)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    fetch_payload(&state, &lobby_id, &slot, PayloadKind::Answer)
}

pub async fn post_offer(
    State(state): State<AppState>,
    Path((lobby_id, slot)): Path<(String, String)>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    state
        .registry
        .post_payload(&lobby_id, &slot, PayloadKind::Offer, body)
        .map_err(rejected)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn post_answer(
    State(state): State<AppState>,
    Path((lobby_id, slot)): Path<(String, String)>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    state
        .registry
        .post_payload(&lobby_id, &slot, PayloadKind::Answer, body)
        .map_err(rejected)?;
    Ok(StatusCode::NO_CONTENT)
}

fn fetch_payload(
    state: &AppState,
    lobby_id: &str,
    slot: &str,
    kind: PayloadKind,
) -> Result<Response, ApiError> {
    let payload = state
        .registry
        .get_payload(lobby_id, slot, kind)
        .map_err(rejected)?;
    let headers = [(header::CONTENT_TYPE, "application/json")];
    Ok((headers, payload.into_bytes()).into_response())
}

fn rejected(err: RegistryError) -> ApiError {
    if err.is_not_found() {
        debug!(%err, "Request rejected");
    }
    err.into()
}
