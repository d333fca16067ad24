use std::str::FromStr;

use rust_decimal::Decimal;
use sea_orm::Set;

use crate::stores::database_backend::DbRecord;
use crate::types::db;
use crate::types::domain::{Approval, Claim, ClaimDecision, ClaimStatus, Role, SupportingDocument, User};

fn decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim()).ok()
}

fn status_column(status: &ClaimStatus) -> Option<String> {
    (!status.is_unset()).then(|| status.as_str().to_string())
}

impl DbRecord for Claim {
    type Entity = db::claim::Entity;
    type Model = db::claim::Model;
    type ActiveModel = db::claim::ActiveModel;

    fn to_active_model(&self) -> Self::ActiveModel {
        db::claim::ActiveModel {
            id: Set(self.id),
            claim_date: Set(self.claim_date),
            status: Set(status_column(&self.status)),
            hours_worked: Set(self.hours_worked.to_string()),
            hourly_rate: Set(self.hourly_rate.to_string()),
            total_amount: Set(self.total_amount.to_string()),
            submission_date: Set(self.submission_date),
            last_updated: Set(self.last_updated),
            status_notes: Set(self.status_notes.clone()),
            notes: Set(self.notes.clone()),
            user_id: Set(self.user_id),
        }
    }

    fn from_model(model: Self::Model) -> Option<Self> {
        Some(Claim {
            id: model.id,
            claim_date: model.claim_date,
            status: ClaimStatus::parse(model.status.as_deref()),
            hours_worked: decimal(&model.hours_worked)?,
            hourly_rate: decimal(&model.hourly_rate)?,
            total_amount: decimal(&model.total_amount)?,
            submission_date: model.submission_date,
            last_updated: model.last_updated,
            status_notes: model.status_notes,
            notes: model.notes,
            user_id: model.user_id,
        })
    }
}

impl DbRecord for User {
    type Entity = db::user::Entity;
    type Model = db::user::Model;
    type ActiveModel = db::user::ActiveModel;

    fn to_active_model(&self) -> Self::ActiveModel {
        db::user::ActiveModel {
            id: Set(self.id),
            first_name: Set(self.first_name.clone()),
            last_name: Set(self.last_name.clone()),
            email: Set(self.email.clone()),
            contact_number: Set(self.contact_number.clone()),
            hourly_rate: Set(self.hourly_rate.to_string()),
            role_id: Set(self.role_id),
        }
    }

    fn from_model(model: Self::Model) -> Option<Self> {
        Some(User {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            contact_number: model.contact_number,
            hourly_rate: decimal(&model.hourly_rate)?,
            role_id: model.role_id,
        })
    }
}

impl DbRecord for Role {
    type Entity = db::role::Entity;
    type Model = db::role::Model;
    type ActiveModel = db::role::ActiveModel;

    fn to_active_model(&self) -> Self::ActiveModel {
        db::role::ActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
        }
    }

    fn from_model(model: Self::Model) -> Option<Self> {
        Some(Role {
            id: model.id,
            name: model.name,
        })
    }
}

impl DbRecord for Approval {
    type Entity = db::approval::Entity;
    type Model = db::approval::Model;
    type ActiveModel = db::approval::ActiveModel;

    fn to_active_model(&self) -> Self::ActiveModel {
        db::approval::ActiveModel {
            id: Set(self.id),
            approval_date: Set(self.approval_date),
            comments: Set(self.comments.clone()),
            claim_id: Set(self.claim_id),
            approver_id: Set(self.approver_id),
        }
    }

    fn from_model(model: Self::Model) -> Option<Self> {
        Some(Approval {
            id: model.id,
            approval_date: model.approval_date,
            comments: model.comments,
            claim_id: model.claim_id,
            approver_id: model.approver_id,
        })
    }
}

impl DbRecord for SupportingDocument {
    type Entity = db::supporting_document::Entity;
    type Model = db::supporting_document::Model;
    type ActiveModel = db::supporting_document::ActiveModel;

    fn to_active_model(&self) -> Self::ActiveModel {
        db::supporting_document::ActiveModel {
            id: Set(self.id),
            file_name: Set(self.file_name.clone()),
            file_path: Set(self.file_path.clone()),
            file_size: Set(self.file_size),
            content_type: Set(self.content_type.clone()),
            upload_date: Set(self.upload_date),
            claim_id: Set(self.claim_id),
        }
    }

    fn from_model(model: Self::Model) -> Option<Self> {
        Some(SupportingDocument {
            id: model.id,
            file_name: model.file_name,
            file_path: model.file_path,
            file_size: model.file_size,
            content_type: model.content_type,
            upload_date: model.upload_date,
            claim_id: model.claim_id,
        })
    }
}

impl DbRecord for ClaimDecision {
    type Entity = db::claim_decision::Entity;
    type Model = db::claim_decision::Model;
    type ActiveModel = db::claim_decision::ActiveModel;

    fn to_active_model(&self) -> Self::ActiveModel {
        db::claim_decision::ActiveModel {
            id: Set(self.id),
            claim_id: Set(self.claim_id),
            decision: Set(self.decision.as_str().to_string()),
            comments: Set(self.comments.clone()),
            decided_by: Set(self.decided_by),
            decided_at: Set(self.decided_at),
        }
    }

    fn from_model(model: Self::Model) -> Option<Self> {
        Some(ClaimDecision {
            id: model.id,
            claim_id: model.claim_id,
            decision: ClaimStatus::parse(Some(&model.decision)),
            comments: model.comments,
            decided_by: model.decided_by,
            decided_at: model.decided_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_money_column_rejects_row() {
        let model = db::user::Model {
            id: 9,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.c".to_string(),
            contact_number: String::new(),
            hourly_rate: "not-a-number".to_string(),
            role_id: 1,
        };

        assert!(User::from_model(model).is_none());
    }

    #[test]
    fn test_unset_status_is_stored_as_null() {
        assert_eq!(status_column(&ClaimStatus::Unset), None);
        assert_eq!(status_column(&ClaimStatus::Completed), Some("Completed".to_string()));
    }
}
