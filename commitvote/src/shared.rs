use crate::{Ballot, VoterRegistry};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Single-writer handle to an aggregate.
///
/// Every state-mutating operation runs to completion under the aggregate's
/// mutex, which is what makes the multi-field counters safe to maintain.
/// A ballot holds a `RegistryHandle` and locks it for the duration of its
/// eligibility checks; the registry never locks ballots, so the lock order
/// is acyclic.
pub struct Shared<T>(Arc<Mutex<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared(Arc::new(Mutex::new(value)))
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.0.lock().expect("commitvote: aggregate mutex poisoned")
    }

    /// Whether two handles refer to the same aggregate.
    pub fn ptr_eq(&self, other: &Shared<T>) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Shared").finish_non_exhaustive()
    }
}

pub type RegistryHandle = Shared<VoterRegistry>;
pub type BallotHandle = Shared<Ballot>;
