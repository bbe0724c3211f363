//! Pseudonymous references for audit rows and outbound payloads.
//!
//! Internal UUIDs never leave the engine. Anything that crosses the
//! boundary carries a salted, truncated digest instead: stable within
//! one deployment, unlinkable without the salt.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hex characters kept from the full digest.
const REFERENCE_LEN: usize = 16;

/// Derives opaque references from internal identifiers.
#[derive(Debug, Clone)]
pub struct ReferenceHasher {
    salt: String,
}

impl ReferenceHasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Truncated hex SHA-256 of `{kind}:{salt}:{id}`. The kind prefix
    /// keeps patient and scenario reference spaces disjoint even for
    /// equal ids.
    pub fn reference(&self, kind: &str, id: &Uuid) -> String {
        let digest = Sha256::digest(format!("{kind}:{}:{id}", self.salt));
        let mut hex = format!("{digest:x}");
        hex.truncate(REFERENCE_LEN);
        hex
    }

    pub fn patient_ref(&self, id: &Uuid) -> String {
        self.reference("patient", id)
    }

    pub fn scenario_ref(&self, id: &Uuid) -> String {
        self.reference("scenario", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_stable() {
        let hasher = ReferenceHasher::new("unit-salt");
        let id = Uuid::new_v4();

        assert_eq!(hasher.patient_ref(&id), hasher.patient_ref(&id));
    }

    #[test]
    fn reference_is_short_hex() {
        let hasher = ReferenceHasher::new("unit-salt");
        let r = hasher.patient_ref(&Uuid::new_v4());

        assert_eq!(r.len(), 16);
        assert!(r.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn kinds_do_not_collide() {
        let hasher = ReferenceHasher::new("unit-salt");
        let id = Uuid::new_v4();

        assert_ne!(hasher.patient_ref(&id), hasher.scenario_ref(&id));
    }

    #[test]
    fn salt_changes_every_reference() {
        let id = Uuid::new_v4();
        let a = ReferenceHasher::new("salt-a").patient_ref(&id);
        let b = ReferenceHasher::new("salt-b").patient_ref(&id);

        assert_ne!(a, b);
    }

    #[test]
    fn raw_id_never_appears() {
        let id = Uuid::new_v4();
        let r = ReferenceHasher::new("unit-salt").patient_ref(&id);

        assert!(!r.contains(&id.to_string()));
        assert!(!id.to_string().contains(&r));
    }
}
