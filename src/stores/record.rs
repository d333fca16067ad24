use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};

use crate::stores::seed_data;
use crate::types::domain::{Approval, Claim, ClaimDecision, Role, SupportingDocument, User};
use crate::types::internal::EntityKind;

/// A record type that can live in an [`EntityStore`](super::EntityStore)
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Name of the backing collection (JSON file stem)
    const COLLECTION: &'static str;
    const KIND: EntityKind;

    fn id(&self) -> i32;

    /// Basic integrity check applied on every load.
    /// Records failing it are dropped and the collection is re-persisted.
    fn is_intact(&self) -> bool;

    /// Sample data written the first time the collection is created
    fn seed() -> Vec<Self>;
}

/// Dates at or before this year are treated as defaulted garbage
const MIN_VALID_YEAR: i32 = 2000;

impl Record for Claim {
    const COLLECTION: &'static str = "claims";
    const KIND: EntityKind = EntityKind::Claim;

    fn id(&self) -> i32 {
        self.id
    }

    fn is_intact(&self) -> bool {
        self.id > 0
            && self.claim_date.year() > MIN_VALID_YEAR
            && self.submission_date.year() > MIN_VALID_YEAR
            && self.hours_worked > Decimal::ZERO
            && self.hourly_rate > Decimal::ZERO
            && self.total_amount > Decimal::ZERO
    }

    fn seed() -> Vec<Self> {
        seed_data::claims()
    }
}

impl Record for Approval {
    const COLLECTION: &'static str = "approvals";
    const KIND: EntityKind = EntityKind::Approval;

    fn id(&self) -> i32 {
        self.id
    }

    fn is_intact(&self) -> bool {
        self.id > 0 && self.claim_id > 0 && self.approval_date.year() > MIN_VALID_YEAR
    }

    fn seed() -> Vec<Self> {
        seed_data::approvals()
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> i32 {
        self.id
    }

    fn is_intact(&self) -> bool {
        self.id > 0 && !self.email.trim().is_empty()
    }

    fn seed() -> Vec<Self> {
        seed_data::users()
    }
}

impl Record for Role {
    const COLLECTION: &'static str = "roles";
    const KIND: EntityKind = EntityKind::Role;

    fn id(&self) -> i32 {
        self.id
    }

    fn is_intact(&self) -> bool {
        self.id > 0 && !self.name.trim().is_empty()
    }

    fn seed() -> Vec<Self> {
        seed_data::roles()
    }
}

impl Record for SupportingDocument {
    const COLLECTION: &'static str = "documents";
    const KIND: EntityKind = EntityKind::Document;

    fn id(&self) -> i32 {
        self.id
    }

    fn is_intact(&self) -> bool {
        self.id > 0 && !self.file_name.trim().is_empty() && !self.file_path.trim().is_empty()
    }

    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

impl Record for ClaimDecision {
    const COLLECTION: &'static str = "decisions";
    const KIND: EntityKind = EntityKind::Decision;

    fn id(&self) -> i32 {
        self.id
    }

    fn is_intact(&self) -> bool {
        self.id > 0 && self.claim_id > 0 && self.decided_at.year() > MIN_VALID_YEAR
    }

    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn claim() -> Claim {
        Claim {
            id: 1,
            claim_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            status: "Pending".into(),
            hours_worked: dec(40),
            hourly_rate: dec(450),
            total_amount: dec(18000),
            submission_date: Utc.with_ymd_and_hms(2024, 1, 6, 9, 0, 0).unwrap(),
            last_updated: None,
            status_notes: None,
            notes: None,
            user_id: 1,
        }
    }

    #[test]
    fn test_claim_integrity() {
        assert!(claim().is_intact());

        let mut zero_id = claim();
        zero_id.id = 0;
        assert!(!zero_id.is_intact());

        let mut default_date = claim();
        default_date.claim_date = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        assert!(!default_date.is_intact());

        let mut no_total = claim();
        no_total.total_amount = Decimal::ZERO;
        assert!(!no_total.is_intact());
    }

    #[test]
    fn test_approval_integrity() {
        let approval = Approval {
            id: 3,
            approval_date: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            comments: String::new(),
            claim_id: 2,
            approver_id: 1,
        };
        assert!(approval.is_intact());

        let orphan = Approval { claim_id: 0, ..approval };
        assert!(!orphan.is_intact());
    }

    #[test]
    fn test_seeds_are_intact() {
        assert!(Claim::seed().iter().all(Record::is_intact));
        assert!(Approval::seed().iter().all(Record::is_intact));
        assert!(User::seed().iter().all(Record::is_intact));
        assert!(Role::seed().iter().all(Record::is_intact));
        assert!(SupportingDocument::seed().is_empty());
        assert!(ClaimDecision::seed().is_empty());
    }
}
