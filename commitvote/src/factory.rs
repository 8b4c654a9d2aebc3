use crate::*;
use std::sync::Arc;

/// Upper bound on the candidate list accepted at creation.
pub const MAX_CANDIDATES: usize = 50;

/// Advisory category tag; it does not alter protocol behavior.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ElectionType {
    General,
    Constituency,
}

/// Everything a caller specifies when creating an election. The
/// recognized options are exhaustive; there is no other configuration
/// surface.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ElectionConfig {
    pub name: String,
    pub description: String,
    pub commit_deadline: Timestamp,
    pub reveal_deadline: Timestamp,
    pub candidate_names: Vec<String>,
    pub candidate_parties: Vec<String>,
    /// Zero opens the ballot to all eligible voters.
    pub constituency_id: ConstituencyId,
    pub election_type: ElectionType,
}

/// One row of the election directory.
#[derive(Clone, Debug)]
pub struct ElectionRecord {
    pub id: ElectionId,
    pub name: String,
    pub description: String,
    pub ballot: BallotHandle,
    pub created_at: Timestamp,
    pub created_by: Address,
    pub election_type: ElectionType,
}

/// Admin-gated creation of ballots, and an append-only directory of the
/// elections created so far. Ids are issued densely from 1.
///
/// The factory hands each new ballot to its creator as admin and retains
/// no administrative power over it afterwards.
pub struct ElectionFactory {
    access: AccessController,
    registry: RegistryHandle,
    elections: Vec<ElectionRecord>,
    clock: Arc<dyn Clock>,
    events: EventLog,
}

impl ElectionFactory {
    pub fn new(owner: Address, registry: RegistryHandle, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        Ok(ElectionFactory {
            access: AccessController::new(owner)?,
            registry,
            elections: Vec::new(),
            clock,
            events: EventLog::new(),
        })
    }

    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn is_admin(&self, who: Address) -> bool {
        self.access.is_admin(who)
    }

    pub fn add_admin(&mut self, caller: Address, admin: Address) -> Result<(), Error> {
        self.access.add_admin(caller, admin)
    }

    pub fn remove_admin(&mut self, caller: Address, admin: Address) -> Result<(), Error> {
        self.access.remove_admin(caller, admin)
    }

    /// Create a ballot and append it to the directory. Admin-only.
    pub fn create_election(
        &mut self,
        caller: Address,
        config: ElectionConfig,
    ) -> Result<(ElectionId, BallotHandle), Error> {
        self.access.require_admin(caller)?;
        if config.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }

        let now = self.clock.now();
        if config.commit_deadline <= now {
            return Err(Error::DeadlineOrdering);
        }
        if config.reveal_deadline <= config.commit_deadline {
            return Err(Error::DeadlineOrdering);
        }

        // Empty, oversized, and unbalanced candidate lists all fall under
        // the same kind; the lists must line up one-to-one.
        if config.candidate_names.is_empty()
            || config.candidate_names.len() > MAX_CANDIDATES
            || config.candidate_names.len() != config.candidate_parties.len()
        {
            return Err(Error::CandidateCountMismatch);
        }

        let candidates = config
            .candidate_names
            .iter()
            .zip(config.candidate_parties.iter())
            .enumerate()
            .map(|(index, (name, party))| Candidate {
                id: index as u64 + 1,
                name: name.clone(),
                party: party.clone(),
                vote_count: 0,
            })
            .collect();

        let election_id = self.elections.len() as u64 + 1;
        let ballot = Shared::new(Ballot::new(
            election_id,
            config.name.clone(),
            caller,
            self.registry.clone(),
            config.constituency_id,
            config.commit_deadline,
            config.reveal_deadline,
            candidates,
            self.clock.clone(),
        ));

        self.elections.push(ElectionRecord {
            id: election_id,
            name: config.name.clone(),
            description: config.description,
            ballot: ballot.clone(),
            created_at: now,
            created_by: caller,
            election_type: config.election_type,
        });

        self.events.record(Event::ElectionCreated {
            election_id,
            name: config.name,
            commit_deadline: config.commit_deadline,
            reveal_deadline: config.reveal_deadline,
            created_by: caller,
        });
        Ok((election_id, ballot))
    }

    pub fn election_count(&self) -> u64 {
        self.elections.len() as u64
    }

    /// Directory entry by position (0-based insertion order).
    pub fn election(&self, index: usize) -> Option<&ElectionRecord> {
        self.elections.get(index)
    }

    /// Find the directory entry for a ballot handle.
    pub fn election_by_ballot(&self, ballot: &BallotHandle) -> Result<&ElectionRecord, Error> {
        self.elections
            .iter()
            .find(|record| record.ballot.ptr_eq(ballot))
            .ok_or(Error::BallotNotFound)
    }

    pub fn all_elections(&self) -> &[ElectionRecord] {
        &self.elections
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }
}
