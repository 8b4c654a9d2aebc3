use crate::*;

/// Audit events, the only supported mechanism for external observers to
/// reconstruct history.
///
/// Names and payloads are stable. Each aggregate appends to its own log;
/// state is mutated first and the event recorded second, and a failed
/// operation records nothing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Event {
    VoterRegistered {
        wallet: Address,
        constituency_id: ConstituencyId,
        timestamp: Timestamp,
    },
    VoterDeactivated {
        wallet: Address,
        reason: String,
    },
    VoterReactivated {
        wallet: Address,
    },
    ElectionCreated {
        election_id: ElectionId,
        name: String,
        commit_deadline: Timestamp,
        reveal_deadline: Timestamp,
        created_by: Address,
    },
    VoteCommitted {
        voter: Address,
        receipt: Hash32,
        timestamp: Timestamp,
    },
    VoteRevealed {
        voter: Address,
        timestamp: Timestamp,
    },
    ElectionFinalized {
        total_reveals: u64,
        timestamp: Timestamp,
    },
    ElectionCancelled {
        reason: String,
        timestamp: Timestamp,
    },
    VerificationPerformed {
        verifier: Address,
        election_id: ElectionId,
        voter: Address,
        receipt_valid: bool,
        timestamp: Timestamp,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::VoterRegistered { .. } => "voter_registered",
            Event::VoterDeactivated { .. } => "voter_deactivated",
            Event::VoterReactivated { .. } => "voter_reactivated",
            Event::ElectionCreated { .. } => "election_created",
            Event::VoteCommitted { .. } => "vote_committed",
            Event::VoteRevealed { .. } => "vote_revealed",
            Event::ElectionFinalized { .. } => "election_finalized",
            Event::ElectionCancelled { .. } => "election_cancelled",
            Event::VerificationPerformed { .. } => "verification_performed",
        }
    }

    pub fn pack(&self) -> Vec<u8> {
        serde_cbor::to_vec(self).expect("commitvote: unexpected error packing event")
    }

    pub fn unpack(packed: &[u8]) -> Result<Self, serde_cbor::Error> {
        serde_cbor::from_slice(packed)
    }
}

/// Append-only, ordered event log owned by a single aggregate.
///
/// The sequence number of an event is its index; ordering across
/// aggregates is the serialization order of the host.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    pub fn record(&mut self, event: Event) {
        log::debug!("event {}: {:?}", event.name(), event);
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
