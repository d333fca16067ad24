use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::app_data::AppData;
use crate::coordinators::claim_coordinator::sort_newest_first;
use crate::coordinators::decision_workflow::{non_blank, DecisionWorkflow};
use crate::errors::InternalError;
use crate::stores::EntityStore;
use crate::types::domain::{Approval, Claim, ClaimDecision, User};
use crate::types::dto::approval::{ApprovalView, DecisionView};
use crate::types::dto::claim::ClaimView;
use crate::types::internal::RequestContext;

/// Review workflow: decisions, the approved roster and the decision history
///
/// The approvals collection only ever lists claims that are currently
/// approved. Listing it drops (and persists the removal of) entries whose claim
/// has since moved to another status; the full trail lives in the decision log.
pub struct ApprovalCoordinator {
    claims: Arc<EntityStore<Claim>>,
    users: Arc<EntityStore<User>>,
    approvals: Arc<EntityStore<Approval>>,
    decisions: Arc<EntityStore<ClaimDecision>>,
    decision_lock: Arc<Mutex<()>>,
    workflow: DecisionWorkflow,
}

impl ApprovalCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            claims: app_data.claims.clone(),
            users: app_data.users.clone(),
            approvals: app_data.approvals.clone(),
            decisions: app_data.decisions.clone(),
            decision_lock: app_data.decision_lock.clone(),
            workflow: DecisionWorkflow::new(&app_data),
        }
    }

    /// Approved roster, most recent approval first
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<ApprovalView>, InternalError> {
        let _guard = self.decision_lock.lock().await;

        let claims: HashMap<i32, Claim> = self
            .claims
            .all()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let approved: HashSet<i32> = claims
            .values()
            .filter(|c| c.status.is_approved())
            .map(|c| c.id)
            .collect();

        let stale = self
            .approvals
            .filter(|a| !approved.contains(&a.claim_id))
            .await?;
        if !stale.is_empty() {
            self.approvals
                .update(|records| {
                    records.retain(|a| approved.contains(&a.claim_id));
                    Ok(())
                })
                .await?;
            tracing::info!(
                request_id = %ctx.request_id,
                "Pruned {} approvals for claims no longer approved",
                stale.len()
            );
        }

        let mut roster = self.approvals.all().await?;
        roster.sort_by(|a, b| b.approval_date.cmp(&a.approval_date).then(a.id.cmp(&b.id)));

        Ok(roster
            .into_iter()
            .map(|a| {
                let claim = claims.get(&a.claim_id);
                ApprovalView::new(a, claim)
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<ApprovalView, InternalError> {
        let approval = self.approvals.get(id).await?;
        let claim = self.claims.find(approval.claim_id).await?;
        Ok(ApprovalView::new(approval, claim.as_ref()))
    }

    /// Replace the comments; absent comments keep the current ones
    pub async fn edit(
        &self,
        ctx: &RequestContext,
        id: i32,
        comments: Option<String>,
    ) -> Result<ApprovalView, InternalError> {
        let _guard = self.decision_lock.lock().await;
        let updated = self
            .approvals
            .update_one(id, |approval| {
                if let Some(comments) = comments {
                    approval.comments = comments;
                }
                Ok(())
            })
            .await?;

        tracing::info!(request_id = %ctx.request_id, approval_id = id, "Approval updated");

        let claim = self.claims.find(updated.claim_id).await?;
        Ok(ApprovalView::new(updated, claim.as_ref()))
    }

    /// Every claim in any status, newest submission first
    pub async fn pending_claims(&self) -> Result<Vec<ClaimView>, InternalError> {
        let mut claims = self.claims.all().await?;
        sort_newest_first(&mut claims);
        let users = self.users.all().await?;
        Ok(ClaimView::with_owners(claims, &users))
    }

    /// Claim under review
    pub async fn process_approval(&self, claim_id: i32) -> Result<ClaimView, InternalError> {
        let claim = self.claims.get(claim_id).await?;
        let owner = self.users.find(claim.user_id).await?;
        Ok(ClaimView::new(claim, owner.as_ref()))
    }

    pub async fn approve(
        &self,
        ctx: &RequestContext,
        claim_id: i32,
        comments: Option<String>,
        approver_id: Option<i32>,
    ) -> Result<Claim, InternalError> {
        self.workflow
            .approve(ctx, claim_id, non_blank(comments), approver_id)
            .await
    }

    pub async fn reject(
        &self,
        ctx: &RequestContext,
        claim_id: i32,
        comments: Option<String>,
        approver_id: Option<i32>,
    ) -> Result<Claim, InternalError> {
        self.workflow
            .reject(ctx, claim_id, non_blank(comments), approver_id)
            .await
    }

    /// Decision log for one claim, oldest first
    pub async fn history(&self, claim_id: i32) -> Result<Vec<DecisionView>, InternalError> {
        self.claims.get(claim_id).await?;

        let mut decisions = self.decisions.filter(|d| d.claim_id == claim_id).await?;
        decisions.sort_by(|a, b| a.decided_at.cmp(&b.decided_at).then(a.id.cmp(&b.id)));
        Ok(decisions.into_iter().map(DecisionView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_json_app_data, test_ctx};

    #[tokio::test]
    async fn test_list_prunes_entries_of_unapproved_claims() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = ApprovalCoordinator::new(app_data.clone());

        let roster = coordinator.list(&test_ctx()).await.unwrap();

        // Seeded entries for claims 1 (Pending) and 3 (Rejected) are dropped
        assert_eq!(roster.iter().map(|a| a.claim_id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(app_data.approvals.count().await.unwrap(), 1);

        app_data.reset_caches().await;
        assert_eq!(app_data.approvals.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reject_then_list_hides_claim() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = ApprovalCoordinator::new(app_data);
        let ctx = test_ctx();

        coordinator.approve(&ctx, 1, Some("ok".to_string()), None).await.unwrap();
        let roster = coordinator.list(&ctx).await.unwrap();
        assert_eq!(roster.iter().filter(|a| a.claim_id == 1).count(), 1);

        coordinator.reject(&ctx, 1, None, None).await.unwrap();
        let roster = coordinator.list(&ctx).await.unwrap();
        assert!(roster.iter().all(|a| a.claim_id != 1));

        let history = coordinator.history(1).await.unwrap();
        let decisions: Vec<&str> = history.iter().map(|d| d.decision.as_str()).collect();
        assert_eq!(decisions, vec!["Approved", "Rejected"]);
    }

    #[tokio::test]
    async fn test_edit_keeps_comments_when_absent() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = ApprovalCoordinator::new(app_data);
        let ctx = test_ctx();

        let unchanged = coordinator.edit(&ctx, 1, None).await.unwrap();
        assert_eq!(unchanged.comments, "Approved - documentation complete");

        let changed = coordinator.edit(&ctx, 1, Some("Checked twice".to_string())).await.unwrap();
        assert_eq!(changed.comments, "Checked twice");
    }

    #[tokio::test]
    async fn test_edit_waits_for_decision_lock() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = Arc::new(ApprovalCoordinator::new(app_data.clone()));

        let guard = app_data.decision_lock.lock().await;
        let task = tokio::spawn({
            let coordinator = coordinator.clone();
            async move {
                coordinator
                    .edit(&test_ctx(), 1, Some("Rechecked".to_string()))
                    .await
            }
        });

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!task.is_finished());
        assert_eq!(
            app_data.approvals.get(1).await.unwrap().comments,
            "Approved - documentation complete"
        );

        drop(guard);
        let view = task.await.unwrap().unwrap();
        assert_eq!(view.comments, "Rechecked");
    }

    #[tokio::test]
    async fn test_history_of_unknown_claim_is_not_found() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = ApprovalCoordinator::new(app_data);

        assert!(coordinator.history(77).await.unwrap_err().is_not_found());
    }
}
