use crate::*;
use std::collections::BTreeSet;

/// Two-level capability check embedded by each aggregate.
///
/// The owner is fixed at construction, is always an admin, and cannot be
/// removed. Admins are granted and revoked by the owner only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessController {
    owner: Address,
    admins: BTreeSet<Address>,
}

impl AccessController {
    pub fn new(owner: Address) -> Result<Self, Error> {
        if owner.is_zero() {
            return Err(Error::ZeroAddress);
        }
        Ok(AccessController {
            owner,
            admins: BTreeSet::new(),
        })
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_admin(&self, who: Address) -> bool {
        who == self.owner || self.admins.contains(&who)
    }

    pub fn require_owner(&self, caller: Address) -> Result<(), Error> {
        if caller != self.owner {
            return Err(Error::NotOwner);
        }
        Ok(())
    }

    pub fn require_admin(&self, caller: Address) -> Result<(), Error> {
        if !self.is_admin(caller) {
            return Err(Error::NotAdmin);
        }
        Ok(())
    }

    /// Grant the admin capability. Owner-only.
    pub fn add_admin(&mut self, caller: Address, admin: Address) -> Result<(), Error> {
        self.require_owner(caller)?;
        if admin.is_zero() {
            return Err(Error::ZeroAddress);
        }
        self.admins.insert(admin);
        Ok(())
    }

    /// Revoke the admin capability. Owner-only.
    ///
    /// The owner is not held in the admin set, so it cannot be revoked
    /// through here.
    pub fn remove_admin(&mut self, caller: Address, admin: Address) -> Result<(), Error> {
        self.require_owner(caller)?;
        self.admins.remove(&admin);
        Ok(())
    }
}
