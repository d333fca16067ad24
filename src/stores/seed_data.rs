//! First-run sample data. Each collection is seeded at most once, when its
//! backing store does not exist yet.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::types::domain::{Approval, Claim, ClaimStatus, Role, User};

const SEED_LECTURER_RATE: i64 = 450;

pub fn roles() -> Vec<Role> {
    ["Lecturer", "Coordinator", "Manager", "Administrator"]
        .iter()
        .zip(1..)
        .map(|(name, id)| Role {
            id,
            name: name.to_string(),
        })
        .collect()
}

pub fn users() -> Vec<User> {
    let user = |id: i32, first: &str, last: &str, email: &str, contact: &str, role_id: i32| User {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        contact_number: contact.to_string(),
        hourly_rate: if role_id == 1 {
            Decimal::from(SEED_LECTURER_RATE)
        } else {
            Decimal::ZERO
        },
        role_id,
    };

    vec![
        user(1, "Sizwe", "Mahlangu", "sizwe.m@university.edu", "123-456-7890", 1),
        user(2, "Khumo", "Thato", "khumo.t@university.edu", "098-765-4321", 2),
        user(3, "Mike", "Johnson", "mike.johnson@university.edu", "555-123-4567", 1),
        user(4, "Sarah", "Williams", "sarah.williams@university.edu", "444-987-6543", 3),
    ]
}

pub fn claims() -> Vec<Claim> {
    let now = Utc::now();
    let claim = |id: i32,
                 claim_days_ago: i64,
                 status: ClaimStatus,
                 hours: i64,
                 rate: Decimal,
                 submitted_days_ago: i64,
                 user_id: i32| {
        let hours_worked = Decimal::from(hours);
        Claim {
            id,
            claim_date: (now - Duration::days(claim_days_ago)).date_naive(),
            status,
            hours_worked,
            hourly_rate: rate,
            total_amount: hours_worked * rate,
            submission_date: now - Duration::days(submitted_days_ago),
            last_updated: None,
            status_notes: None,
            notes: None,
            user_id,
        }
    };

    vec![
        claim(1, 7, ClaimStatus::Pending, 40, Decimal::new(2500, 2), 5, 1),
        claim(2, 14, ClaimStatus::Approved, 35, Decimal::new(3000, 2), 12, 2),
        claim(3, 21, ClaimStatus::Rejected, 20, Decimal::new(2800, 2), 18, 3),
        claim(4, 3, ClaimStatus::Pending, 45, Decimal::new(3200, 2), 1, 1),
    ]
}

/// Only the entry for the approved sample claim survives the first roster read;
/// the others are pruned because their claims are not approved.
pub fn approvals() -> Vec<Approval> {
    let now = Utc::now();
    vec![
        Approval {
            id: 1,
            approval_date: now - Duration::days(3),
            comments: "Approved - documentation complete".to_string(),
            claim_id: 2,
            approver_id: 4,
        },
        Approval {
            id: 2,
            approval_date: now - Duration::days(10),
            comments: "Rejected - insufficient documentation".to_string(),
            claim_id: 3,
            approver_id: 3,
        },
        Approval {
            id: 3,
            approval_date: now - Duration::days(1),
            comments: "Approved with conditions".to_string(),
            claim_id: 1,
            approver_id: 4,
        },
    ]
}
