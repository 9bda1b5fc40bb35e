use super::error::RegistryError;
use super::lobby::SlotTable;
use super::lobby_id::{LOBBY_ID_LENGTH, MAX_ID_ATTEMPTS, generate_unique_lobby_id};
use super::payload::{Payload, PayloadKind};
use axum::body::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

type LobbyHandle = Arc<Mutex<SlotTable>>;

/// All live lobbies, keyed by lobby id.
///
/// The map is only held long enough to clone a lobby handle; slot reads and
/// writes then happen under that lobby's own lock, so lobbies never contend
/// with each other.
///
/// Slot-scoped operations check, in order: the lobby exists, the slot
/// segment is a non-negative integer, the slot exists. A posted body is
/// checked last.
pub struct LobbyRegistry {
    lobbies: DashMap<String, LobbyHandle>,
    id_length: usize,
    max_id_attempts: u32,
}

impl LobbyRegistry {
    pub fn new() -> Self {
        Self::with_id_policy(LOBBY_ID_LENGTH, MAX_ID_ATTEMPTS)
    }

    pub fn with_id_policy(id_length: usize, max_id_attempts: u32) -> Self {
        Self {
            lobbies: DashMap::new(),
            id_length,
            max_id_attempts,
        }
    }

    /// Create a lobby holding only the host slot and return its id
    pub fn create_lobby(&self) -> Result<String, RegistryError> {
        let lobby_id = generate_unique_lobby_id(
            |id| match self.lobbies.entry(id.to_string()) {
                Entry::Occupied(_) => false,
                Entry::Vacant(entry) => {
                    entry.insert(Arc::new(Mutex::new(SlotTable::new())));
                    true
                }
            },
            self.id_length,
            self.max_id_attempts,
        )
        .map_err(|collision| {
            warn!(attempts = collision.attempts, "Lobby id space exhausted");
            RegistryError::Collision {
                attempts: collision.attempts,
            }
        })?;

        info!(lobby_id, "Created lobby");
        Ok(lobby_id)
    }

    /// Append a peer slot to a lobby and return its index
    pub fn join(&self, lobby_id: &str) -> Result<usize, RegistryError> {
        let lobby = self.lobby(lobby_id)?;
        let index = lock(&lobby).join();
        info!(lobby_id, index, "Peer joined lobby");
        Ok(index)
    }

    /// Remove a lobby. Returns whether it existed.
    pub fn delete_lobby(&self, lobby_id: &str) -> bool {
        let removed = self.lobbies.remove(lobby_id).is_some();
        if removed {
            info!(lobby_id, "Deleted lobby");
        }
        removed
    }

    pub fn lobby_ids(&self) -> BTreeSet<String> {
        self.lobbies.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn contains(&self, lobby_id: &str) -> bool {
        self.lobbies.contains_key(lobby_id)
    }

    /// Joined peers whose slot has no answer yet
    pub fn unregistered_peers(&self, lobby_id: &str) -> Result<Vec<usize>, RegistryError> {
        let lobby = self.lobby(lobby_id)?;
        let peers = lock(&lobby).unregistered_peers();
        Ok(peers)
    }

    pub fn get_payload(
        &self,
        lobby_id: &str,
        slot: &str,
        kind: PayloadKind,
    ) -> Result<Payload, RegistryError> {
        let lobby = self.lobby(lobby_id)?;
        let index = parse_slot(lobby_id, slot)?;

        let mut table = lock(&lobby);
        let payload = table
            .slot(index)
            .ok_or_else(|| slot_not_found(lobby_id, index))?
            .payload(kind)
            .cloned()
            .ok_or_else(|| RegistryError::PayloadNotSet {
                lobby_id: lobby_id.to_string(),
                index,
                kind: kind.as_str(),
            })?;
        table.touch();

        debug!(lobby_id, index, kind = kind.as_str(), "Payload read");
        Ok(payload)
    }

    /// Store `body` in a slot exactly as given, once it has the shape of a
    /// session description
    pub fn post_payload(
        &self,
        lobby_id: &str,
        slot: &str,
        kind: PayloadKind,
        body: impl Into<Bytes>,
    ) -> Result<(), RegistryError> {
        let lobby = self.lobby(lobby_id)?;
        let index = parse_slot(lobby_id, slot)?;
        // Decoded outside the lock; reported only once the slot is known to exist
        let decoded = Payload::parse(body);

        let mut table = lock(&lobby);
        if table.slot(index).is_none() {
            return Err(slot_not_found(lobby_id, index));
        }
        let payload = decoded.inspect_err(|err| {
            warn!(lobby_id, index, kind = kind.as_str(), %err, "Undecodable payload");
        })?;
        table.post(index, kind, payload);

        debug!(lobby_id, index, kind = kind.as_str(), "Payload posted");
        Ok(())
    }

    pub fn get_offer(&self, lobby_id: &str, slot: &str) -> Result<Payload, RegistryError> {
        self.get_payload(lobby_id, slot, PayloadKind::Offer)
    }

    pub fn get_answer(&self, lobby_id: &str, slot: &str) -> Result<Payload, RegistryError> {
        self.get_payload(lobby_id, slot, PayloadKind::Answer)
    }

    pub fn post_offer(
        &self,
        lobby_id: &str,
        slot: &str,
        body: impl Into<Bytes>,
    ) -> Result<(), RegistryError> {
        self.post_payload(lobby_id, slot, PayloadKind::Offer, body)
    }

    pub fn post_answer(
        &self,
        lobby_id: &str,
        slot: &str,
        body: impl Into<Bytes>,
    ) -> Result<(), RegistryError> {
        self.post_payload(lobby_id, slot, PayloadKind::Answer, body)
    }

    /// Remove every lobby idle for at least `max_idle` as of `now`.
    /// Returns the removed ids.
    pub fn evict_idle(&self, now: Instant, max_idle: Duration) -> Vec<String> {
        let mut evicted = Vec::new();
        self.lobbies.retain(|lobby_id, lobby| {
            let idle = lock(lobby).idle_for(now) >= max_idle;
            if idle {
                evicted.push(lobby_id.clone());
            }
            !idle
        });
        evicted
    }

    fn lobby(&self, lobby_id: &str) -> Result<LobbyHandle, RegistryError> {
        self.lobbies
            .get(lobby_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RegistryError::LobbyNotFound(lobby_id.to_string()))
    }
}

impl Default for LobbyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Digits only; signs, whitespace and the empty string are rejected.
pub fn parse_slot_index(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_slot(lobby_id: &str, raw: &str) -> Result<usize, RegistryError> {
    parse_slot_index(raw).ok_or_else(|| RegistryError::MalformedSlot {
        lobby_id: lobby_id.to_string(),
        raw: raw.to_string(),
    })
}

fn lock(lobby: &Mutex<SlotTable>) -> MutexGuard<'_, SlotTable> {
    // Every mutation is a single push or assignment, so a poisoned table is still consistent
    lobby.lock().unwrap_or_else(PoisonError::into_inner)
}

fn slot_not_found(lobby_id: &str, index: usize) -> RegistryError {
    RegistryError::SlotNotFound {
        lobby_id: lobby_id.to_string(),
        index,
    }
}
