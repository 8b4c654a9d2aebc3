use thiserror::Error;

/// Protocol error kinds (closed set).
///
/// Every failed operation surfaces exactly one of these and leaves all
/// state unchanged: there is no partial mutation, no retry, and no event
/// emission on failure. Hosts map the kind to user-facing messages.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("commitvote: address must not be zero")]
    ZeroAddress,

    #[error("commitvote: caller is not the owner")]
    NotOwner,

    #[error("commitvote: caller is not an admin")]
    NotAdmin,

    #[error("commitvote: wallet is already registered")]
    AlreadyRegistered,

    #[error("commitvote: identity hash has already been consumed")]
    IdentityReused,

    #[error("commitvote: constituency id must be non-zero")]
    InvalidConstituency,

    #[error("commitvote: wallet is not registered")]
    NotRegistered,

    #[error("commitvote: operation is not allowed in the current phase")]
    WrongPhase,

    #[error("commitvote: election has been cancelled")]
    ElectionCancelled,

    #[error("commitvote: hash must not be zero")]
    EmptyHash,

    #[error("commitvote: voter has already committed")]
    AlreadyCommitted,

    #[error("commitvote: voter has no commit")]
    NoCommit,

    #[error("commitvote: voter has already revealed")]
    AlreadyRevealed,

    #[error("commitvote: candidate id is out of range")]
    InvalidCandidate,

    #[error("commitvote: reveal does not match the stored commitment")]
    HashMismatch,

    #[error("commitvote: voter is not eligible")]
    NotEligible,

    #[error("commitvote: voter belongs to a different constituency")]
    WrongConstituency,

    #[error("commitvote: reveal phase has not ended")]
    RevealNotEnded,

    #[error("commitvote: election is already finalized")]
    AlreadyFinalized,

    #[error("commitvote: deadlines may only move forward")]
    CanOnlyExtend,

    #[error("commitvote: commit deadline must stay before the reveal deadline")]
    DeadlineOrdering,

    #[error("commitvote: results are not ready")]
    ResultsNotReady,

    #[error("commitvote: no election found for that ballot")]
    BallotNotFound,

    #[error("commitvote: election name must not be empty")]
    EmptyName,

    #[error("commitvote: candidate names and parties must be non-empty and match")]
    CandidateCountMismatch,
}
