use crate::*;
use std::sync::Arc;

/// Outcome of checking a participation receipt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReceiptVerification {
    pub is_registered: bool,
    pub has_committed: bool,
    pub has_revealed: bool,
    pub receipt_valid: bool,
    pub commit_timestamp: Option<Timestamp>,
    pub stored_receipt: Option<Hash32>,
}

/// Tally-vs-reveal consistency check: the number of accepted reveals must
/// equal the sum of candidate counters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IntegrityReport {
    pub consistent: bool,
    pub total_reveals: u64,
    pub total_candidate_votes: u64,
    pub total_commits: u64,
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Participation {
    pub committed: bool,
    pub revealed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElectionSummary {
    pub name: String,
    pub total_committers: u64,
    pub total_revealed: u64,
    pub candidate_count: u64,
    pub finalized: bool,
    pub cancelled: bool,
}

/// Read-only derivations over a ballot and the registry.
///
/// Owns no election state; the only thing it keeps is its own audit log
/// of performed receipt verifications.
pub struct Verifier {
    clock: Arc<dyn Clock>,
    events: EventLog,
}

impl Verifier {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Verifier {
            clock,
            events: EventLog::new(),
        }
    }

    /// Prove participation from a receipt without disclosing the vote.
    ///
    /// The provided receipt is valid iff it equals the stored one and is
    /// not the zero hash. Every check is recorded for auditability.
    pub fn verify_voter_receipt(
        &mut self,
        caller: Address,
        registry: &RegistryHandle,
        ballot: &BallotHandle,
        voter: Address,
        receipt: Hash32,
    ) -> ReceiptVerification {
        let is_registered = {
            let registry = registry.lock();
            registry.voter_info(voter).is_ok()
        };

        let (election_id, status) = {
            let ballot = ballot.lock();
            (ballot.election_id(), ballot.voter_commit_status(voter))
        };

        let receipt_valid =
            !receipt.is_zero() && status.receipt.map(|stored| stored == receipt).unwrap_or(false);

        self.events.record(Event::VerificationPerformed {
            verifier: caller,
            election_id,
            voter,
            receipt_valid,
            timestamp: self.clock.now(),
        });

        ReceiptVerification {
            is_registered,
            has_committed: status.has_committed,
            has_revealed: status.has_revealed,
            receipt_valid,
            commit_timestamp: status.committed_at,
            stored_receipt: status.receipt,
        }
    }

    /// Recompute the candidate totals and compare them with the reveal
    /// counter.
    pub fn verify_election_integrity(&self, ballot: &BallotHandle) -> IntegrityReport {
        let ballot = ballot.lock();
        let total_candidate_votes: u64 = ballot
            .all_candidates()
            .iter()
            .map(|candidate| candidate.vote_count)
            .sum();

        IntegrityReport {
            consistent: total_candidate_votes == ballot.total_reveals(),
            total_reveals: ballot.total_reveals(),
            total_candidate_votes,
            total_commits: ballot.total_commits(),
        }
    }

    pub fn did_voter_participate(&self, ballot: &BallotHandle, voter: Address) -> Participation {
        let status = ballot.lock().voter_commit_status(voter);
        Participation {
            committed: status.has_committed,
            revealed: status.has_revealed,
        }
    }

    pub fn election_summary(&self, ballot: &BallotHandle) -> ElectionSummary {
        let ballot = ballot.lock();
        ElectionSummary {
            name: ballot.name().to_owned(),
            total_committers: ballot.total_commits(),
            total_revealed: ballot.total_reveals(),
            candidate_count: ballot.all_candidates().len() as u64,
            finalized: ballot.is_finalized(),
            cancelled: ballot.is_cancelled(),
        }
    }

    /// Same hashing contract as the ballot.
    pub fn compute_commit_hash(candidate: CandidateId, secret: &Secret) -> Hash32 {
        commit_hash(candidate, secret)
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }
}
