use crate::*;
use sha3::{Digest as _, Keccak256};

/// Compute the Keccak-256 hash of a single byte slice.
///
/// This is the Ethereum-style Keccak, not the NIST SHA3-256 variant.
#[inline]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the Keccak-256 hash of several concatenated byte slices without
/// allocating an intermediate buffer.
#[inline]
pub fn keccak256_iter<'a, I>(parts: I) -> [u8; 32]
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// A u64 widened to the 32-byte big-endian integer encoding used on the wire.
fn u256_be(value: u64) -> [u8; 32] {
    let mut out = [0; 32];
    out[24..].copy_from_slice(&value.to_be_bytes());
    out
}

/// The hiding, binding commitment to a candidate choice:
/// `keccak256(u256_be(candidate) ‖ secret)`.
///
/// Hosts computing commitments client-side must produce the identical
/// digest; `Ballot::compute_commit_hash` and `Verifier::compute_commit_hash`
/// both delegate here so the two sides cannot drift.
pub fn commit_hash(candidate: CandidateId, secret: &Secret) -> Hash32 {
    let candidate = u256_be(candidate);
    Hash32::new(keccak256_iter([&candidate[..], secret.as_bytes()]))
}

/// The participation receipt issued at commit time:
/// `keccak256(voter ‖ commit_hash ‖ u256_be(timestamp) ‖ u256_be(election))`.
///
/// The receipt binds who committed, what they committed, and when, without
/// disclosing the vote.
pub fn receipt_hash(
    voter: Address,
    commit: Hash32,
    timestamp: Timestamp,
    election: ElectionId,
) -> Hash32 {
    let timestamp = u256_be(timestamp);
    let election = u256_be(election);
    Hash32::new(keccak256_iter([
        voter.as_bytes(),
        commit.as_bytes(),
        &timestamp[..],
        &election[..],
    ]))
}
