use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::claim_coordinator::sort_newest_first;
use crate::coordinators::decision_workflow::{non_blank, DecisionWorkflow};
use crate::errors::InternalError;
use crate::stores::EntityStore;
use crate::types::domain::{Claim, ClaimStatus, User};
use crate::types::dto::claim::ClaimView;
use crate::types::dto::tracking::ClaimStatusSnapshot;
use crate::types::internal::RequestContext;

/// Status tracking for claims, including the payment track
/// (`Processing`, `Completed`) that the review screens never set
pub struct TrackingCoordinator {
    claims: Arc<EntityStore<Claim>>,
    users: Arc<EntityStore<User>>,
    workflow: DecisionWorkflow,
}

impl TrackingCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            claims: app_data.claims.clone(),
            users: app_data.users.clone(),
            workflow: DecisionWorkflow::new(&app_data),
        }
    }

    pub async fn list(&self) -> Result<Vec<ClaimView>, InternalError> {
        let mut claims = self.claims.all().await?;
        sort_newest_first(&mut claims);
        let users = self.users.all().await?;
        Ok(ClaimView::with_owners(claims, &users))
    }

    pub async fn details(&self, id: i32) -> Result<ClaimView, InternalError> {
        let claim = self.claims.get(id).await?;
        let owner = self.users.find(claim.user_id).await?;
        Ok(ClaimView::new(claim, owner.as_ref()))
    }

    pub async fn status(&self, claim_id: i32) -> Result<ClaimStatusSnapshot, InternalError> {
        let claim = self.claims.get(claim_id).await?;
        Ok(ClaimStatusSnapshot::from(&claim))
    }

    /// Set any status string; the notes replace the current status notes
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        claim_id: i32,
        new_status: &str,
        notes: Option<String>,
    ) -> Result<Claim, InternalError> {
        let status = ClaimStatus::parse(Some(new_status.trim()));
        self.workflow
            .set_status(ctx, claim_id, status, non_blank(notes), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_json_app_data, test_ctx};

    #[tokio::test]
    async fn test_update_status_accepts_free_text() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = TrackingCoordinator::new(app_data);
        let ctx = test_ctx();

        let claim = coordinator
            .update_status(&ctx, 1, "Processing", Some("Sent to payroll".to_string()))
            .await
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::Processing);
        assert_eq!(claim.status_notes.as_deref(), Some("Sent to payroll"));

        let claim = coordinator.update_status(&ctx, 1, "On hold", None).await.unwrap();
        assert_eq!(claim.status, ClaimStatus::Other("On hold".to_string()));

        let snapshot = coordinator.status(1).await.unwrap();
        assert_eq!(snapshot.status, "On hold");
        assert_eq!(snapshot.status_progress, 0);
    }

    #[tokio::test]
    async fn test_update_status_of_missing_claim() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = TrackingCoordinator::new(app_data);

        let err = coordinator.update_status(&test_ctx(), 99, "Approved", None).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
