use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::stores::{next_id_of, EntityStore};
use crate::types::domain::{Approval, Claim, ClaimDecision, ClaimStatus};
use crate::types::internal::RequestContext;

pub const DEFAULT_APPROVE_NOTE: &str = "Approved by coordinator/manager";
pub const DEFAULT_REJECT_NOTE: &str = "Rejected by coordinator/manager";

/// The single write path for claim status changes
///
/// Each change runs under `AppData::decision_lock` and, in order:
/// 1. writes the claim
/// 2. reconciles the approvals roster (upsert when approved, remove otherwise)
/// 3. appends a [`ClaimDecision`]
///
/// If step 2 fails the claim is written back to its previous state. A failed
/// step 3 is logged and the applied change is still reported as success.
pub struct DecisionWorkflow {
    claims: Arc<EntityStore<Claim>>,
    approvals: Arc<EntityStore<Approval>>,
    decisions: Arc<EntityStore<ClaimDecision>>,
    lock: Arc<Mutex<()>>,
    default_approver_id: i32,
}

impl DecisionWorkflow {
    pub fn new(app_data: &AppData) -> Self {
        Self {
            claims: app_data.claims.clone(),
            approvals: app_data.approvals.clone(),
            decisions: app_data.decisions.clone(),
            lock: app_data.decision_lock.clone(),
            default_approver_id: app_data.settings.default_approver_id(),
        }
    }

    pub async fn approve(
        &self,
        ctx: &RequestContext,
        claim_id: i32,
        comments: Option<String>,
        approver_id: Option<i32>,
    ) -> Result<Claim, InternalError> {
        let notes = non_blank(comments).unwrap_or_else(|| DEFAULT_APPROVE_NOTE.to_string());
        self.set_status(ctx, claim_id, ClaimStatus::Approved, Some(notes), approver_id)
            .await
    }

    pub async fn reject(
        &self,
        ctx: &RequestContext,
        claim_id: i32,
        comments: Option<String>,
        approver_id: Option<i32>,
    ) -> Result<Claim, InternalError> {
        let notes = non_blank(comments).unwrap_or_else(|| DEFAULT_REJECT_NOTE.to_string());
        self.set_status(ctx, claim_id, ClaimStatus::Rejected, Some(notes), approver_id)
            .await
    }

    /// Set any status; `notes` replaces the claim's status notes
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        claim_id: i32,
        status: ClaimStatus,
        notes: Option<String>,
        approver_id: Option<i32>,
    ) -> Result<Claim, InternalError> {
        let _guard = self.lock.lock().await;
        let now = Utc::now();

        let previous = self.claims.get(claim_id).await?;
        let updated = self
            .claims
            .update_one(claim_id, |claim| {
                claim.status = status;
                claim.status_notes = notes;
                claim.last_updated = Some(now);
                Ok(())
            })
            .await?;

        let decided_by = approver_id
            .filter(|id| *id > 0)
            .unwrap_or(self.default_approver_id);
        self.reconcile(ctx, previous, &updated, decided_by, now).await?;
        Ok(updated)
    }

    /// Apply an arbitrary edit; the roster and decision log follow only if the
    /// status changed
    pub async fn edit<F>(&self, ctx: &RequestContext, claim_id: i32, change: F) -> Result<Claim, InternalError>
    where
        F: FnOnce(&mut Claim) -> Result<(), InternalError> + Send,
    {
        let _guard = self.lock.lock().await;

        let previous = self.claims.get(claim_id).await?;
        let updated = self.claims.update_one(claim_id, change).await?;

        if previous.status != updated.status {
            let now = updated.last_activity();
            self.reconcile(ctx, previous, &updated, self.default_approver_id, now)
                .await?;
        }
        Ok(updated)
    }

    async fn reconcile(
        &self,
        ctx: &RequestContext,
        previous: Claim,
        updated: &Claim,
        decided_by: i32,
        at: DateTime<Utc>,
    ) -> Result<(), InternalError> {
        let comments = updated.status_notes.clone();

        let roster_result = if updated.status.is_approved() {
            self.upsert_approval(updated.id, comments.clone().unwrap_or_default(), decided_by, at)
                .await
        } else {
            self.remove_approvals(updated.id).await
        };

        if let Err(err) = roster_result {
            tracing::error!(
                request_id = %ctx.request_id,
                claim_id = updated.id,
                "Approval roster update failed, restoring claim: {}",
                err
            );
            let claim_id = previous.id;
            if let Err(restore_err) = self
                .claims
                .update_one(claim_id, move |claim| {
                    *claim = previous;
                    Ok(())
                })
                .await
            {
                tracing::error!(claim_id, "Failed to restore claim: {}", restore_err);
            }
            return Err(err);
        }

        let claim_id = updated.id;
        let decision = updated.status.clone();
        let logged = self
            .decisions
            .insert_with(move |id| {
                Ok(ClaimDecision {
                    id,
                    claim_id,
                    decision,
                    comments,
                    decided_by,
                    decided_at: at,
                })
            })
            .await;

        // Claim and roster are already written
        if let Err(err) = logged {
            tracing::error!(
                request_id = %ctx.request_id,
                claim_id,
                status = %updated.status,
                "Decision applied but not recorded in the log: {}",
                err
            );
            return Ok(());
        }

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor,
            claim_id,
            status = %updated.status,
            "Recorded claim decision"
        );
        Ok(())
    }

    async fn upsert_approval(
        &self,
        claim_id: i32,
        comments: String,
        approver_id: i32,
        at: DateTime<Utc>,
    ) -> Result<(), InternalError> {
        self.approvals
            .update(|records| {
                match records.iter_mut().find(|a| a.claim_id == claim_id) {
                    Some(existing) => {
                        existing.comments = comments;
                        existing.approval_date = at;
                        existing.approver_id = approver_id;
                    }
                    None => {
                        let id = next_id_of(records);
                        records.push(Approval {
                            id,
                            approval_date: at,
                            comments,
                            claim_id,
                            approver_id,
                        });
                    }
                }
                Ok(())
            })
            .await
    }

    async fn remove_approvals(&self, claim_id: i32) -> Result<(), InternalError> {
        if self.approvals.find_by(|a| a.claim_id == claim_id).await?.is_none() {
            return Ok(());
        }
        self.approvals
            .update(|records| {
                records.retain(|a| a.claim_id != claim_id);
                Ok(())
            })
            .await
    }
}

/// Blank form values count as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
