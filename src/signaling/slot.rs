use super::payload::{Payload, PayloadKind};

/// One peer's position in a lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    pub is_host: bool,
    offer: Option<Payload>,
    answer: Option<Payload>,
}

impl Slot {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            is_host: index == 0,
            offer: None,
            answer: None,
        }
    }

    pub fn payload(&self, kind: PayloadKind) -> Option<&Payload> {
        match kind {
            PayloadKind::Offer => self.offer.as_ref(),
            PayloadKind::Answer => self.answer.as_ref(),
        }
    }

    /// Last write wins.
    pub fn set_payload(&mut self, kind: PayloadKind, payload: Payload) {
        match kind {
            PayloadKind::Offer => self.offer = Some(payload),
            PayloadKind::Answer => self.answer = Some(payload),
        }
    }

    pub fn has_answer(&self) -> bool {
        self.answer.is_some()
    }
}
