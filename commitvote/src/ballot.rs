use crate::*;
use indexmap::IndexMap;
use std::sync::Arc;

/// Temporal state of a ballot, a pure function of the clock and the two
/// deadlines. No transition call exists; the phase changes by itself as
/// time passes.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Commit,
    Reveal,
    Tally,
}

/// A candidate line on the ballot.
///
/// `vote_count` is monotonically non-decreasing and incremented exactly
/// once per accepted reveal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
    pub vote_count: u64,
}

/// Per-voter progress through the commit-reveal machine.
///
/// A wallet absent from the commit map has not participated; once present
/// it only ever moves `Committed` → `Revealed`. The receipt and the
/// commit hash are immutable after commit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state")]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    Committed {
        commit_hash: Hash32,
        receipt: Hash32,
        committed_at: Timestamp,
    },
    Revealed {
        commit_hash: Hash32,
        receipt: Hash32,
        committed_at: Timestamp,
        candidate_id: CandidateId,
    },
}

impl CommitState {
    pub fn commit_hash(&self) -> Hash32 {
        match self {
            CommitState::Committed { commit_hash, .. } => *commit_hash,
            CommitState::Revealed { commit_hash, .. } => *commit_hash,
        }
    }

    pub fn receipt(&self) -> Hash32 {
        match self {
            CommitState::Committed { receipt, .. } => *receipt,
            CommitState::Revealed { receipt, .. } => *receipt,
        }
    }

    pub fn committed_at(&self) -> Timestamp {
        match self {
            CommitState::Committed { committed_at, .. } => *committed_at,
            CommitState::Revealed { committed_at, .. } => *committed_at,
        }
    }

    pub fn revealed_candidate(&self) -> Option<CandidateId> {
        match self {
            CommitState::Committed { .. } => None,
            CommitState::Revealed { candidate_id, .. } => Some(*candidate_id),
        }
    }

    pub fn has_revealed(&self) -> bool {
        matches!(self, CommitState::Revealed { .. })
    }
}

/// A voter's participation as exposed to hosts and auditors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoterCommitStatus {
    pub has_committed: bool,
    pub has_revealed: bool,
    pub commit_hash: Option<Hash32>,
    pub receipt: Option<Hash32>,
    pub committed_at: Option<Timestamp>,
    pub revealed_candidate: Option<CandidateId>,
}

/// Lifecycle label derived from the phase and the two terminal flags,
/// for off-system categorization.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ElectionStatus {
    Active,
    Reveal,
    Tallying,
    Finalized,
    Cancelled,
}

/// Summary facts about one election.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElectionInfo {
    pub election_id: ElectionId,
    pub name: String,
    pub constituency_id: ConstituencyId,
    pub commit_deadline: Timestamp,
    pub reveal_deadline: Timestamp,
    pub candidate_count: u64,
    pub total_commits: u64,
    pub total_reveals: u64,
    pub is_cancelled: bool,
    pub is_finalized: bool,
    pub status: ElectionStatus,
}

/// A single election's commit-reveal state machine.
///
/// During the commit window eligible voters submit hiding, binding
/// commitments; during the reveal window they disclose `(candidate,
/// secret)` and the ballot checks the pre-image and counts the vote.
/// After the reveal deadline anyone may finalize. Cancellation is a
/// ballot-global terminal gate: it freezes counters and makes
/// finalization permanently unavailable.
///
/// Eligibility and constituency are checked at commit time only. A voter
/// deactivated after committing can still reveal; re-checking at reveal
/// would allow censorship of already-committed votes.
pub struct Ballot {
    election_id: ElectionId,
    name: String,
    admin: Address,
    registry: RegistryHandle,
    constituency_id: ConstituencyId,
    commit_deadline: Timestamp,
    reveal_deadline: Timestamp,
    candidates: Vec<Candidate>,
    commits: IndexMap<Address, CommitState>,
    total_commits: u64,
    total_reveals: u64,
    is_cancelled: bool,
    is_finalized: bool,
    clock: Arc<dyn Clock>,
    events: EventLog,
}

impl Ballot {
    /// Ballots are created through the factory, which validates the
    /// configuration before calling this.
    pub(crate) fn new(
        election_id: ElectionId,
        name: String,
        admin: Address,
        registry: RegistryHandle,
        constituency_id: ConstituencyId,
        commit_deadline: Timestamp,
        reveal_deadline: Timestamp,
        candidates: Vec<Candidate>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Ballot {
            election_id,
            name,
            admin,
            registry,
            constituency_id,
            commit_deadline,
            reveal_deadline,
            candidates,
            commits: IndexMap::new(),
            total_commits: 0,
            total_reveals: 0,
            is_cancelled: false,
            is_finalized: false,
            clock,
            events: EventLog::new(),
        }
    }

    /// The phase a given instant falls in. A deadline instant still
    /// belongs to the window it closes.
    pub fn phase_at(&self, now: Timestamp) -> Phase {
        if now <= self.commit_deadline {
            Phase::Commit
        } else if now <= self.reveal_deadline {
            Phase::Reveal
        } else {
            Phase::Tally
        }
    }

    pub fn current_phase(&self) -> Phase {
        self.phase_at(self.clock.now())
    }

    /// Submit a commitment. Returns the participation receipt.
    pub fn commit_vote(&mut self, caller: Address, commit_hash: Hash32) -> Result<Hash32, Error> {
        if self.is_cancelled {
            return Err(Error::ElectionCancelled);
        }
        let now = self.clock.now();
        if self.phase_at(now) != Phase::Commit {
            return Err(Error::WrongPhase);
        }
        if commit_hash.is_zero() {
            return Err(Error::EmptyHash);
        }
        if self.commits.contains_key(&caller) {
            return Err(Error::AlreadyCommitted);
        }

        // Consistent registry snapshot for the whole eligibility check
        {
            let registry = self.registry.lock();
            if !registry.is_eligible(caller) {
                return Err(Error::NotEligible);
            }
            if self.constituency_id > 0
                && registry.voter_constituency(caller)? != self.constituency_id
            {
                return Err(Error::WrongConstituency);
            }
        }

        let receipt = receipt_hash(caller, commit_hash, now, self.election_id);
        self.commits.insert(
            caller,
            CommitState::Committed {
                commit_hash,
                receipt,
                committed_at: now,
            },
        );
        self.total_commits += 1;

        self.events.record(Event::VoteCommitted {
            voter: caller,
            receipt,
            timestamp: now,
        });
        Ok(receipt)
    }

    /// Disclose the committed choice, proving the pre-image. A failed
    /// reveal (wrong secret, wrong candidate) leaves the commit intact and
    /// may be retried within the window.
    pub fn reveal_vote(
        &mut self,
        caller: Address,
        candidate_id: CandidateId,
        secret: &Secret,
    ) -> Result<(), Error> {
        if self.is_cancelled {
            return Err(Error::ElectionCancelled);
        }
        let now = self.clock.now();
        if self.phase_at(now) != Phase::Reveal {
            return Err(Error::WrongPhase);
        }

        let state = self.commits.get(&caller).ok_or(Error::NoCommit)?;
        if state.has_revealed() {
            return Err(Error::AlreadyRevealed);
        }
        if candidate_id == 0 || candidate_id > self.candidates.len() as u64 {
            return Err(Error::InvalidCandidate);
        }
        if commit_hash(candidate_id, secret) != state.commit_hash() {
            return Err(Error::HashMismatch);
        }

        let revealed = CommitState::Revealed {
            commit_hash: state.commit_hash(),
            receipt: state.receipt(),
            committed_at: state.committed_at(),
            candidate_id,
        };
        self.commits.insert(caller, revealed);
        self.candidates[candidate_id as usize - 1].vote_count += 1;
        self.total_reveals += 1;

        self.events.record(Event::VoteRevealed {
            voter: caller,
            timestamp: now,
        });
        Ok(())
    }

    /// Close the election once the reveal window has passed. Anyone may
    /// call this; a second call fails.
    pub fn finalize(&mut self) -> Result<(), Error> {
        if self.is_cancelled {
            return Err(Error::ElectionCancelled);
        }
        let now = self.clock.now();
        if now <= self.reveal_deadline {
            return Err(Error::RevealNotEnded);
        }
        if self.is_finalized {
            return Err(Error::AlreadyFinalized);
        }

        self.is_finalized = true;
        self.events.record(Event::ElectionFinalized {
            total_reveals: self.total_reveals,
            timestamp: now,
        });
        Ok(())
    }

    /// Abort the election. Admin-only. Counters and existing commits are
    /// kept, but no further commits, reveals, or finalization are
    /// accepted, so results are never declared final.
    pub fn cancel_election(&mut self, caller: Address, reason: &str) -> Result<(), Error> {
        self.require_admin(caller)?;
        if self.is_cancelled {
            return Err(Error::ElectionCancelled);
        }
        // A finalized election has declared results; it can no longer be
        // cancelled without contradicting them.
        if self.is_finalized {
            return Err(Error::AlreadyFinalized);
        }

        self.is_cancelled = true;
        self.events.record(Event::ElectionCancelled {
            reason: reason.to_owned(),
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    /// Move the commit deadline forward. Admin-only.
    ///
    /// The new deadline must be in the future and stay strictly before the
    /// reveal deadline. Extending while the ballot is already in REVEAL
    /// re-opens the commit window; that is a documented consequence of the
    /// phase being a pure function of the clock.
    pub fn extend_commit_deadline(&mut self, caller: Address, new: Timestamp) -> Result<(), Error> {
        self.require_admin(caller)?;
        if new <= self.commit_deadline {
            return Err(Error::CanOnlyExtend);
        }
        if new >= self.reveal_deadline {
            return Err(Error::DeadlineOrdering);
        }
        if new <= self.clock.now() {
            return Err(Error::CanOnlyExtend);
        }
        self.commit_deadline = new;
        Ok(())
    }

    /// Move the reveal deadline forward. Admin-only. Unavailable once the
    /// election is finalized.
    pub fn extend_reveal_deadline(&mut self, caller: Address, new: Timestamp) -> Result<(), Error> {
        self.require_admin(caller)?;
        if self.is_finalized {
            return Err(Error::AlreadyFinalized);
        }
        if new <= self.reveal_deadline {
            return Err(Error::CanOnlyExtend);
        }
        self.reveal_deadline = new;
        Ok(())
    }

    pub fn candidate(&self, id: CandidateId) -> Result<&Candidate, Error> {
        if id == 0 || id > self.candidates.len() as u64 {
            return Err(Error::InvalidCandidate);
        }
        Ok(&self.candidates[id as usize - 1])
    }

    pub fn all_candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Candidate counts, gated until the reveal window has passed or the
    /// election was finalized. Cancelled elections never expose results
    /// unless they were finalized first, which cancellation rules out.
    pub fn results(&self) -> Result<&[Candidate], Error> {
        if self.is_finalized {
            return Ok(&self.candidates);
        }
        if self.is_cancelled {
            return Err(Error::ElectionCancelled);
        }
        if self.clock.now() <= self.reveal_deadline {
            return Err(Error::ResultsNotReady);
        }
        Ok(&self.candidates)
    }

    pub fn voter_commit_status(&self, voter: Address) -> VoterCommitStatus {
        match self.commits.get(&voter) {
            Some(state) => VoterCommitStatus {
                has_committed: true,
                has_revealed: state.has_revealed(),
                commit_hash: Some(state.commit_hash()),
                receipt: Some(state.receipt()),
                committed_at: Some(state.committed_at()),
                revealed_candidate: state.revealed_candidate(),
            },
            None => VoterCommitStatus {
                has_committed: false,
                has_revealed: false,
                commit_hash: None,
                receipt: None,
                committed_at: None,
                revealed_candidate: None,
            },
        }
    }

    /// Check a participation receipt. The zero hash never verifies.
    pub fn verify_receipt(&self, voter: Address, receipt: Hash32) -> bool {
        if receipt.is_zero() {
            return false;
        }
        match self.commits.get(&voter) {
            Some(state) => state.receipt() == receipt,
            None => false,
        }
    }

    pub fn election_info(&self) -> ElectionInfo {
        let status = if self.is_cancelled {
            ElectionStatus::Cancelled
        } else if self.is_finalized {
            ElectionStatus::Finalized
        } else {
            match self.current_phase() {
                Phase::Commit => ElectionStatus::Active,
                Phase::Reveal => ElectionStatus::Reveal,
                Phase::Tally => ElectionStatus::Tallying,
            }
        };

        ElectionInfo {
            election_id: self.election_id,
            name: self.name.clone(),
            constituency_id: self.constituency_id,
            commit_deadline: self.commit_deadline,
            reveal_deadline: self.reveal_deadline,
            candidate_count: self.candidates.len() as u64,
            total_commits: self.total_commits,
            total_reveals: self.total_reveals,
            is_cancelled: self.is_cancelled,
            is_finalized: self.is_finalized,
            status,
        }
    }

    pub fn total_committers(&self) -> u64 {
        self.total_commits
    }

    /// Committers in commit order.
    pub fn committers(&self) -> impl Iterator<Item = Address> + '_ {
        self.commits.keys().copied()
    }

    /// Client-side commitment helper; bit-identical to what `reveal_vote`
    /// recomputes.
    pub fn compute_commit_hash(candidate: CandidateId, secret: &Secret) -> Hash32 {
        commit_hash(candidate, secret)
    }

    pub fn election_id(&self) -> ElectionId {
        self.election_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn constituency_id(&self) -> ConstituencyId {
        self.constituency_id
    }

    pub fn commit_deadline(&self) -> Timestamp {
        self.commit_deadline
    }

    pub fn reveal_deadline(&self) -> Timestamp {
        self.reveal_deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled
    }

    pub fn is_finalized(&self) -> bool {
        self.is_finalized
    }

    pub fn total_commits(&self) -> u64 {
        self.total_commits
    }

    pub fn total_reveals(&self) -> u64 {
        self.total_reveals
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    fn require_admin(&self, caller: Address) -> Result<(), Error> {
        if caller != self.admin {
            return Err(Error::NotAdmin);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Timestamp = 1_700_000_000;

    fn addr(n: u8) -> Address {
        let mut bytes = [0; 20];
        bytes[19] = n;
        Address::new(bytes)
    }

    fn idhash(n: u8) -> Hash32 {
        let mut bytes = [0; 32];
        bytes[31] = n;
        Hash32::new(bytes)
    }

    fn candidates(names: &[&str]) -> Vec<Candidate> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Candidate {
                id: i as u64 + 1,
                name: (*name).to_owned(),
                party: "Independent".to_owned(),
                vote_count: 0,
            })
            .collect()
    }

    fn setup(constituency: ConstituencyId) -> (Ballot, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(T));
        let mut registry = VoterRegistry::new(addr(1), clock.clone()).unwrap();
        registry.register_voter(addr(1), addr(10), idhash(1), 1).unwrap();
        registry.register_voter(addr(1), addr(11), idhash(2), 1).unwrap();
        registry.register_voter(addr(1), addr(12), idhash(3), 2).unwrap();

        let ballot = Ballot::new(
            1,
            "Test Election".to_owned(),
            addr(1),
            Shared::new(registry),
            constituency,
            T + 3_600,
            T + 7_200,
            candidates(&["Alice", "Bob", "Carol"]),
            clock.clone(),
        );
        (ballot, clock)
    }

    #[test]
    fn phase_follows_the_clock() {
        let (ballot, clock) = setup(0);
        assert_eq!(ballot.current_phase(), Phase::Commit);

        clock.set(T + 3_600);
        assert_eq!(ballot.current_phase(), Phase::Commit);
        clock.set(T + 3_601);
        assert_eq!(ballot.current_phase(), Phase::Reveal);

        clock.set(T + 7_200);
        assert_eq!(ballot.current_phase(), Phase::Reveal);
        clock.set(T + 7_201);
        assert_eq!(ballot.current_phase(), Phase::Tally);
    }

    #[test]
    fn commit_then_reveal_counts_the_vote() {
        let (mut ballot, clock) = setup(0);
        let secret = Secret::from([0x55; 32]);
        let commitment = Ballot::compute_commit_hash(2, &secret);

        let receipt = ballot.commit_vote(addr(10), commitment).unwrap();
        assert_eq!(ballot.total_commits(), 1);
        assert!(ballot.verify_receipt(addr(10), receipt));

        clock.set(T + 3_601);
        ballot.reveal_vote(addr(10), 2, &secret).unwrap();

        assert_eq!(ballot.total_reveals(), 1);
        assert_eq!(ballot.candidate(2).unwrap().vote_count, 1);
        assert_eq!(ballot.candidate(1).unwrap().vote_count, 0);

        let status = ballot.voter_commit_status(addr(10));
        assert!(status.has_committed && status.has_revealed);
        assert_eq!(status.revealed_candidate, Some(2));
    }

    #[test]
    fn commit_preconditions() {
        let (mut ballot, clock) = setup(0);
        let commitment = Ballot::compute_commit_hash(1, &Secret::from([1; 32]));

        // Zero hash
        assert_eq!(
            ballot.commit_vote(addr(10), Hash32::ZERO),
            Err(Error::EmptyHash),
        );
        // Unregistered caller
        assert_eq!(
            ballot.commit_vote(addr(99), commitment),
            Err(Error::NotEligible),
        );

        // Double commit
        ballot.commit_vote(addr(10), commitment).unwrap();
        assert_eq!(
            ballot.commit_vote(addr(10), commitment),
            Err(Error::AlreadyCommitted),
        );

        // After the commit window
        clock.set(T + 3_601);
        assert_eq!(
            ballot.commit_vote(addr(11), commitment),
            Err(Error::WrongPhase),
        );
    }

    #[test]
    fn deactivated_voter_cannot_commit_but_can_reveal() {
        let (mut ballot, clock) = setup(0);
        let secret = Secret::from([7; 32]);
        ballot
            .commit_vote(addr(10), Ballot::compute_commit_hash(1, &secret))
            .unwrap();

        // Deactivate both a committed and an uncommitted voter
        {
            let registry = ballot.registry.clone();
            let mut registry = registry.lock();
            registry.deactivate_voter(addr(1), addr(10), "audit").unwrap();
            registry.deactivate_voter(addr(1), addr(11), "audit").unwrap();
        }

        assert_eq!(
            ballot.commit_vote(addr(11), Ballot::compute_commit_hash(1, &secret)),
            Err(Error::NotEligible),
        );

        // Eligibility is enforced at commit time only
        clock.set(T + 3_601);
        ballot.reveal_vote(addr(10), 1, &secret).unwrap();
        assert_eq!(ballot.total_reveals(), 1);
    }

    #[test]
    fn constituency_restriction() {
        let (mut ballot, _clock) = setup(1);
        let commitment = Ballot::compute_commit_hash(1, &Secret::from([9; 32]));

        ballot.commit_vote(addr(10), commitment).unwrap();
        assert_eq!(
            ballot.commit_vote(addr(12), commitment),
            Err(Error::WrongConstituency),
        );
    }

    #[test]
    fn reveal_preconditions() {
        let (mut ballot, clock) = setup(0);
        let secret = Secret::from([3; 32]);
        ballot
            .commit_vote(addr(10), Ballot::compute_commit_hash(1, &secret))
            .unwrap();

        // Still in the commit window
        assert_eq!(
            ballot.reveal_vote(addr(10), 1, &secret),
            Err(Error::WrongPhase),
        );

        clock.set(T + 3_601);
        // No commit on record
        assert_eq!(
            ballot.reveal_vote(addr(11), 1, &secret),
            Err(Error::NoCommit),
        );
        // Candidate out of range
        assert_eq!(
            ballot.reveal_vote(addr(10), 0, &secret),
            Err(Error::InvalidCandidate),
        );
        assert_eq!(
            ballot.reveal_vote(addr(10), 4, &secret),
            Err(Error::InvalidCandidate),
        );
        // Wrong secret leaves the commit intact
        assert_eq!(
            ballot.reveal_vote(addr(10), 1, &Secret::from([4; 32])),
            Err(Error::HashMismatch),
        );
        assert_eq!(ballot.total_reveals(), 0);

        // Retry with the right secret succeeds
        ballot.reveal_vote(addr(10), 1, &secret).unwrap();
        assert_eq!(
            ballot.reveal_vote(addr(10), 1, &secret),
            Err(Error::AlreadyRevealed),
        );
    }

    #[test]
    fn finalize_gates() {
        let (mut ballot, clock) = setup(0);

        clock.set(T + 7_200);
        assert_eq!(ballot.finalize(), Err(Error::RevealNotEnded));

        clock.set(T + 7_201);
        ballot.finalize().unwrap();
        assert!(ballot.is_finalized());
        assert_eq!(ballot.finalize(), Err(Error::AlreadyFinalized));
    }

    #[test]
    fn cancellation_is_terminal() {
        let (mut ballot, clock) = setup(0);
        let secret = Secret::from([8; 32]);
        ballot
            .commit_vote(addr(10), Ballot::compute_commit_hash(1, &secret))
            .unwrap();

        assert_eq!(
            ballot.cancel_election(addr(9), "not admin"),
            Err(Error::NotAdmin),
        );
        ballot.cancel_election(addr(1), "audit failure").unwrap();
        assert!(ballot.is_cancelled());
        assert_eq!(
            ballot.cancel_election(addr(1), "again"),
            Err(Error::ElectionCancelled),
        );

        assert_eq!(
            ballot.commit_vote(addr(11), Ballot::compute_commit_hash(1, &secret)),
            Err(Error::ElectionCancelled),
        );
        clock.set(T + 3_601);
        assert_eq!(
            ballot.reveal_vote(addr(10), 1, &secret),
            Err(Error::ElectionCancelled),
        );
        clock.set(T + 7_201);
        assert_eq!(ballot.finalize(), Err(Error::ElectionCancelled));
        assert_eq!(ballot.results().unwrap_err(), Error::ElectionCancelled);

        // Counters frozen where they stood
        assert_eq!(ballot.total_commits(), 1);
        assert_eq!(ballot.total_reveals(), 0);
    }

    #[test]
    fn cancel_after_finalize_is_rejected() {
        let (mut ballot, clock) = setup(0);
        clock.set(T + 7_201);
        ballot.finalize().unwrap();
        assert_eq!(
            ballot.cancel_election(addr(1), "too late"),
            Err(Error::AlreadyFinalized),
        );
    }

    #[test]
    fn results_gate() {
        let (mut ballot, clock) = setup(0);
        assert_eq!(ballot.results().unwrap_err(), Error::ResultsNotReady);

        clock.set(T + 7_200);
        assert_eq!(ballot.results().unwrap_err(), Error::ResultsNotReady);
        clock.set(T + 7_201);
        assert!(ballot.results().is_ok());

        ballot.finalize().unwrap();
        assert!(ballot.results().is_ok());
    }

    #[test]
    fn deadlines_only_move_forward() {
        let (mut ballot, clock) = setup(0);

        assert_eq!(
            ballot.extend_commit_deadline(addr(1), T + 3_600),
            Err(Error::CanOnlyExtend),
        );
        assert_eq!(
            ballot.extend_commit_deadline(addr(1), T + 7_200),
            Err(Error::DeadlineOrdering),
        );
        ballot.extend_commit_deadline(addr(1), T + 5_000).unwrap();
        assert_eq!(ballot.commit_deadline(), T + 5_000);

        assert_eq!(
            ballot.extend_reveal_deadline(addr(1), T + 7_200),
            Err(Error::CanOnlyExtend),
        );
        ballot.extend_reveal_deadline(addr(1), T + 9_000).unwrap();
        assert_eq!(ballot.reveal_deadline(), T + 9_000);

        assert_eq!(
            ballot.extend_commit_deadline(addr(9), T + 6_000),
            Err(Error::NotAdmin),
        );

        // Finalization freezes the reveal deadline
        clock.set(T + 9_001);
        ballot.finalize().unwrap();
        assert_eq!(
            ballot.extend_reveal_deadline(addr(1), T + 10_000),
            Err(Error::AlreadyFinalized),
        );
    }

    #[test]
    fn commit_deadline_extension_can_reopen_commit() {
        let (mut ballot, clock) = setup(0);
        let secret = Secret::from([6; 32]);

        clock.set(T + 3_601);
        assert_eq!(ballot.current_phase(), Phase::Reveal);

        // Extending into the past of the clock is rejected
        clock.set(T + 5_000);
        assert_eq!(
            ballot.extend_commit_deadline(addr(1), T + 4_000),
            Err(Error::CanOnlyExtend),
        );

        // A future value below the reveal deadline re-opens COMMIT
        ballot.extend_commit_deadline(addr(1), T + 6_000).unwrap();
        assert_eq!(ballot.current_phase(), Phase::Commit);
        ballot
            .commit_vote(addr(10), Ballot::compute_commit_hash(1, &secret))
            .unwrap();
    }

    #[test]
    fn receipt_verification() {
        let (mut ballot, _clock) = setup(0);
        let receipt = ballot
            .commit_vote(addr(10), Ballot::compute_commit_hash(1, &Secret::from([2; 32])))
            .unwrap();

        assert!(ballot.verify_receipt(addr(10), receipt));
        assert!(!ballot.verify_receipt(addr(11), receipt));
        assert!(!ballot.verify_receipt(addr(10), Hash32::ZERO));

        let mut tampered = receipt.to_bytes();
        tampered[31] ^= 1;
        assert!(!ballot.verify_receipt(addr(10), Hash32::new(tampered)));
    }

    #[test]
    fn info_reflects_lifecycle() {
        let (mut ballot, clock) = setup(0);
        assert_eq!(ballot.election_info().status, ElectionStatus::Active);

        clock.set(T + 3_601);
        assert_eq!(ballot.election_info().status, ElectionStatus::Reveal);
        clock.set(T + 7_201);
        assert_eq!(ballot.election_info().status, ElectionStatus::Tallying);

        ballot.finalize().unwrap();
        let info = ballot.election_info();
        assert_eq!(info.status, ElectionStatus::Finalized);
        assert_eq!(info.candidate_count, 3);
        assert_eq!(info.election_id, 1);
    }

    #[test]
    fn commit_order_is_preserved() {
        let (mut ballot, _clock) = setup(0);
        let commitment = Ballot::compute_commit_hash(1, &Secret::from([1; 32]));
        ballot.commit_vote(addr(11), commitment).unwrap();
        ballot.commit_vote(addr(10), commitment).unwrap();

        let order: Vec<Address> = ballot.committers().collect();
        assert_eq!(order, vec![addr(11), addr(10)]);
        assert_eq!(ballot.total_committers(), 2);
    }
}
