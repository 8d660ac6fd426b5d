//! In-memory roster store.
//!
//! The store owns the authoritative member list. Readers that outlive a
//! single call (insight tasks) take a [`RosterSnapshot`] instead of
//! borrowing the store.

use crate::error::RosterError;
use crate::models::{HealthMetrics, Member, Status};
use std::ops::Deref;
use std::sync::Arc;
use tracing::debug;

/// Result of a successful upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// Immutable copy of the roster at a point in time.
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot(Arc<[Member]>);

impl Deref for RosterSnapshot {
    type Target = [Member];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Holds community members in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    members: Vec<Member>,
}

impl RosterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated with the seed members.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for member in super::seed::seed_members() {
            if let Err(e) = store.upsert(member) {
                tracing::error!("Skipping invalid seed member: {}", e);
            }
        }
        store
    }

    /// All members, in insertion order.
    pub fn list(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Look up a member by id.
    pub fn get(&self, id: &str) -> Result<&Member, RosterError> {
        self.members
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))
    }

    /// Insert a member, or replace the one with the same id in place.
    ///
    /// The store is left untouched when validation fails.
    pub fn upsert(&mut self, member: Member) -> Result<UpsertOutcome, RosterError> {
        validate_member(&member)?;

        match self.position(&member.id) {
            Some(idx) => {
                debug!("Replacing member {}", member.id);
                self.members[idx] = member;
                Ok(UpsertOutcome::Replaced)
            }
            None => {
                debug!("Inserting member {}", member.id);
                self.members.push(member);
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    /// Change a member's status.
    #[allow(dead_code)] // Mutation API; the CLI renders the seed roster as-is
    pub fn set_status(&mut self, id: &str, status: Status) -> Result<(), RosterError> {
        let idx = self
            .position(id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;
        self.members[idx].status = status;
        Ok(())
    }

    /// Replace a member's metrics after validating them.
    #[allow(dead_code)] // Mutation API; the CLI renders the seed roster as-is
    pub fn update_metrics(&mut self, id: &str, metrics: HealthMetrics) -> Result<(), RosterError> {
        let idx = self
            .position(id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;
        validate_metrics(&metrics)?;
        self.members[idx].metrics = metrics;
        Ok(())
    }

    /// Take an immutable copy of the current roster.
    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot(self.members.as_slice().into())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.members.iter().position(|m| m.id == id)
    }
}

/// Check every member field against its allowed range.
pub fn validate_member(member: &Member) -> Result<(), RosterError> {
    if member.id.trim().is_empty() {
        return Err(RosterError::validation("id", "must not be empty"));
    }
    if member.name.trim().is_empty() {
        return Err(RosterError::validation("name", "must not be empty"));
    }
    if member.age == 0 {
        return Err(RosterError::validation("age", "must be a positive integer"));
    }
    if !member.email.contains('@') {
        return Err(RosterError::validation(
            "email",
            format!("not an email address: {}", member.email),
        ));
    }
    validate_metrics(&member.metrics)
}

/// Check metric ranges. Step counts are unsigned and need no check.
pub fn validate_metrics(metrics: &HealthMetrics) -> Result<(), RosterError> {
    if metrics.heart_rate == 0 {
        return Err(RosterError::validation("heartRate", "must be greater than 0"));
    }
    if !metrics.sleep_hours.is_finite() || metrics.sleep_hours < 0.0 {
        return Err(RosterError::validation(
            "sleepHours",
            format!("must be a non-negative number, got {}", metrics.sleep_hours),
        ));
    }
    if metrics.stress_level > 10 {
        return Err(RosterError::validation(
            "stressLevel",
            format!("must be between 0 and 10, got {}", metrics.stress_level),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_member(id: &str, status: Status) -> Member {
        Member {
            id: id.to_string(),
            name: format!("Member {}", id),
            age: 30,
            email: format!("member{}@example.com", id),
            status,
            last_activity: "1 hour ago".to_string(),
            avatar: "https://example.com/avatar.png".to_string(),
            metrics: HealthMetrics {
                avg_steps: 5000,
                heart_rate: 70,
                sleep_hours: 7.0,
                stress_level: 5,
            },
        }
    }

    #[test]
    fn test_seeded_store() {
        let store = RosterStore::seeded();
        assert_eq!(store.len(), 5);
        assert_eq!(store.list()[0].name, "Sarah Jenkins");
        assert_eq!(store.get("2").unwrap().status, Status::AtRisk);
    }

    #[test]
    fn test_get_unknown_id() {
        let store = RosterStore::seeded();
        assert_eq!(
            store.get("42").unwrap_err(),
            RosterError::NotFound("42".to_string())
        );
    }

    #[test]
    fn test_upsert_inserts_then_replaces_in_place() {
        let mut store = RosterStore::new();
        store.upsert(create_test_member("a", Status::Active)).unwrap();
        store.upsert(create_test_member("b", Status::Active)).unwrap();

        let mut updated = create_test_member("a", Status::Inactive);
        updated.name = "Renamed".to_string();
        assert_eq!(store.upsert(updated).unwrap(), UpsertOutcome::Replaced);

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].id, "a");
        assert_eq!(store.list()[0].name, "Renamed");
        assert_eq!(store.list()[1].id, "b");
    }

    #[test]
    fn test_upsert_stress_level_bounds() {
        let mut store = RosterStore::new();

        let mut too_stressed = create_test_member("a", Status::Active);
        too_stressed.metrics.stress_level = 11;
        let err = store.upsert(too_stressed).unwrap_err();
        assert!(matches!(
            err,
            RosterError::Validation {
                field: "stressLevel",
                ..
            }
        ));
        assert!(store.is_empty());

        let mut max_stress = create_test_member("a", Status::Active);
        max_stress.metrics.stress_level = 10;
        assert_eq!(store.upsert(max_stress).unwrap(), UpsertOutcome::Inserted);
    }

    #[test]
    fn test_rejected_replace_keeps_previous() {
        let mut store = RosterStore::new();
        store.upsert(create_test_member("a", Status::Active)).unwrap();

        let mut bad = create_test_member("a", Status::Inactive);
        bad.age = 0;
        assert!(store.upsert(bad).is_err());
        assert_eq!(store.get("a").unwrap().status, Status::Active);
    }

    #[test]
    fn test_validate_member_fields() {
        let mut m = create_test_member("a", Status::Active);
        m.metrics.heart_rate = 0;
        assert!(validate_member(&m).is_err());

        let mut m = create_test_member("a", Status::Active);
        m.metrics.sleep_hours = -1.0;
        assert!(validate_member(&m).is_err());

        let mut m = create_test_member("a", Status::Active);
        m.metrics.sleep_hours = f64::NAN;
        assert!(validate_member(&m).is_err());

        let mut m = create_test_member("a", Status::Active);
        m.email = "not-an-email".to_string();
        assert!(validate_member(&m).is_err());

        let mut m = create_test_member("", Status::Active);
        m.id = "  ".to_string();
        assert!(validate_member(&m).is_err());
    }

    #[test]
    fn test_set_status_and_update_metrics() {
        let mut store = RosterStore::seeded();
        store.set_status("2", Status::Active).unwrap();
        assert_eq!(store.get("2").unwrap().status, Status::Active);

        let metrics = HealthMetrics {
            avg_steps: 6000,
            heart_rate: 80,
            sleep_hours: 6.0,
            stress_level: 6,
        };
        store.update_metrics("2", metrics).unwrap();
        assert_eq!(store.get("2").unwrap().metrics, metrics);

        assert!(store.set_status("99", Status::Inactive).is_err());
        let bad = HealthMetrics {
            stress_level: 12,
            ..metrics
        };
        assert!(store.update_metrics("2", bad).is_err());
        assert_eq!(store.get("2").unwrap().metrics, metrics);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_writes() {
        let mut store = RosterStore::seeded();
        let snapshot = store.snapshot();

        store.set_status("1", Status::Inactive).unwrap();
        store.upsert(create_test_member("6", Status::Active)).unwrap();

        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot[0].status, Status::Active);
        assert_eq!(store.len(), 6);
    }
}
