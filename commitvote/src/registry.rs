use crate::*;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A registered voter.
///
/// Created once; `active` is the only field that changes afterwards.
/// The identity hash stays consumed for the lifetime of the registry,
/// even while the voter is deactivated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoterRecord {
    pub wallet: Address,
    pub identity_hash: Hash32,
    pub constituency_id: ConstituencyId,
    pub active: bool,
    pub registered_at: Timestamp,
}

/// Eligibility source of truth for every ballot.
///
/// Enforces one-identity-one-wallet: an identity hash maps to at most one
/// wallet, forever. Ballots read eligibility and constituency through a
/// `RegistryHandle` at commit time; registry writes during an active
/// election take effect for subsequent operations only.
pub struct VoterRegistry {
    access: AccessController,
    voters: IndexMap<Address, VoterRecord>,
    consumed_identities: BTreeSet<Hash32>,
    clock: Arc<dyn Clock>,
    events: EventLog,
}

impl VoterRegistry {
    pub fn new(owner: Address, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        Ok(VoterRegistry {
            access: AccessController::new(owner)?,
            voters: IndexMap::new(),
            consumed_identities: BTreeSet::new(),
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

    /// Register a wallet under a fresh identity hash. Admin-only.
    ///
    /// The identity hash is consumed permanently on success; deactivation
    /// never releases it.
    pub fn register_voter(
        &mut self,
        caller: Address,
        wallet: Address,
        identity_hash: Hash32,
        constituency_id: ConstituencyId,
    ) -> Result<(), Error> {
        self.access.require_admin(caller)?;
        if wallet.is_zero() {
            return Err(Error::ZeroAddress);
        }
        if constituency_id == 0 {
            return Err(Error::InvalidConstituency);
        }
        if identity_hash.is_zero() {
            return Err(Error::EmptyHash);
        }
        if self.voters.contains_key(&wallet) {
            return Err(Error::AlreadyRegistered);
        }
        if self.consumed_identities.contains(&identity_hash) {
            return Err(Error::IdentityReused);
        }

        let now = self.clock.now();
        self.voters.insert(
            wallet,
            VoterRecord {
                wallet,
                identity_hash,
                constituency_id,
                active: true,
                registered_at: now,
            },
        );
        self.consumed_identities.insert(identity_hash);

        self.events.record(Event::VoterRegistered {
            wallet,
            constituency_id,
            timestamp: now,
        });
        Ok(())
    }

    /// Mark a voter inactive. Admin-only. Idempotent: deactivating an
    /// already-inactive voter changes nothing and records no event.
    pub fn deactivate_voter(
        &mut self,
        caller: Address,
        wallet: Address,
        reason: &str,
    ) -> Result<(), Error> {
        self.access.require_admin(caller)?;
        let record = self.voters.get_mut(&wallet).ok_or(Error::NotRegistered)?;
        if record.active {
            record.active = false;
            self.events.record(Event::VoterDeactivated {
                wallet,
                reason: reason.to_owned(),
            });
        }
        Ok(())
    }

    /// Mark a voter active again. Admin-only. Idempotent like deactivation.
    pub fn reactivate_voter(&mut self, caller: Address, wallet: Address) -> Result<(), Error> {
        self.access.require_admin(caller)?;
        let record = self.voters.get_mut(&wallet).ok_or(Error::NotRegistered)?;
        if !record.active {
            record.active = true;
            self.events.record(Event::VoterReactivated { wallet });
        }
        Ok(())
    }

    /// Registered and active.
    pub fn is_eligible(&self, wallet: Address) -> bool {
        self.voters
            .get(&wallet)
            .map(|record| record.active)
            .unwrap_or(false)
    }

    pub fn voter_constituency(&self, wallet: Address) -> Result<ConstituencyId, Error> {
        self.voters
            .get(&wallet)
            .map(|record| record.constituency_id)
            .ok_or(Error::NotRegistered)
    }

    /// Constant-time comparison of a candidate identity hash against the
    /// stored one. Unregistered wallets compare unequal to everything.
    pub fn verify_identity(&self, wallet: Address, candidate: Hash32) -> bool {
        match self.voters.get(&wallet) {
            Some(record) => record.identity_hash.ct_eq(&candidate),
            None => false,
        }
    }

    pub fn voter_info(&self, wallet: Address) -> Result<&VoterRecord, Error> {
        self.voters.get(&wallet).ok_or(Error::NotRegistered)
    }

    pub fn voter_count(&self) -> u64 {
        self.voters.len() as u64
    }

    /// Voters in registration order, for audit enumeration.
    pub fn voter_at_index(&self, index: usize) -> Option<&VoterRecord> {
        self.voters.get_index(index).map(|(_, record)| record)
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }
}
