//! Privacy-preserving elections over a two-phase commit-reveal protocol.
//!
//! A voter first publishes a hiding, binding commitment to their choice,
//! then later reveals `(candidate, secret)` proving the commitment; the
//! ballot counts the vote and issues a receipt that proves participation
//! without disclosing it. Four aggregates make up the core: the
//! [`VoterRegistry`] (eligibility), per-election [`Ballot`]s (the state
//! machine), the [`ElectionFactory`] (creation and directory), and the
//! [`Verifier`] (receipt and integrity checks).

#[macro_use]
extern crate serde;

mod access;
mod address;
mod ballot;
mod clock;
mod error;
mod event;
mod factory;
mod hash;
mod registry;
mod shared;
mod verifier;

pub use access::*;
pub use address::*;
pub use ballot::*;
pub use clock::*;
pub use error::*;
pub use event::*;
pub use factory::*;
pub use hash::*;
pub use registry::*;
pub use shared::*;
pub use verifier::*;
