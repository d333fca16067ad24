use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::claim_coordinator::sort_newest_first;
use crate::errors::InternalError;
use crate::services::StatusSummary;
use crate::stores::EntityStore;
use crate::types::domain::{Approval, Claim, ClaimStatus, User};
use crate::types::dto::approval::ApprovalView;
use crate::types::dto::claim::ClaimView;
use crate::types::dto::dashboard::{CoordinatorDashboard, HomeSummary, HrDashboard, ManagerDashboard};

const RECENT_LIMIT: usize = 5;

/// Read-only aggregates for the role dashboards
pub struct DashboardCoordinator {
    claims: Arc<EntityStore<Claim>>,
    users: Arc<EntityStore<User>>,
    approvals: Arc<EntityStore<Approval>>,
}

impl DashboardCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            claims: app_data.claims.clone(),
            users: app_data.users.clone(),
            approvals: app_data.approvals.clone(),
        }
    }

    async fn claims_newest_first(&self) -> Result<Vec<Claim>, InternalError> {
        let mut claims = self.claims.all().await?;
        sort_newest_first(&mut claims);
        Ok(claims)
    }

    pub async fn coordinator(&self) -> Result<CoordinatorDashboard, InternalError> {
        let claims = self.claims_newest_first().await?;
        let users = self.users.all().await?;
        let summary = StatusSummary::of(&claims);

        let pending: Vec<Claim> = claims
            .iter()
            .filter(|c| c.status.matches(ClaimStatus::Pending.as_str()))
            .cloned()
            .collect();
        let recent: Vec<Claim> = claims.into_iter().take(RECENT_LIMIT).collect();

        Ok(CoordinatorDashboard {
            total_claims: summary.total as u32,
            pending_count: summary.pending as u32,
            approved_count: summary.approved as u32,
            rejected_count: summary.rejected as u32,
            pending_claims: ClaimView::with_owners(pending, &users),
            recent_claims: ClaimView::with_owners(recent, &users),
        })
    }

    pub async fn manager(&self) -> Result<ManagerDashboard, InternalError> {
        let claims = self.claims_newest_first().await?;
        let users = self.users.all().await?;
        let summary = StatusSummary::of(&claims);

        let mut approvals = self.approvals.all().await?;
        approvals.sort_by(|a, b| b.approval_date.cmp(&a.approval_date).then(a.id.cmp(&b.id)));
        let recent_approvals = approvals
            .into_iter()
            .filter_map(|a| {
                let claim = claims.iter().find(|c| c.id == a.claim_id)?;
                claim.status.is_approved().then(|| ApprovalView::new(a, Some(claim)))
            })
            .take(RECENT_LIMIT)
            .collect();

        Ok(ManagerDashboard {
            total_claims: summary.total as u32,
            pending_count: summary.pending as u32,
            processing_count: summary.processing as u32,
            completed_count: (summary.completed + summary.approved) as u32,
            rejected_count: summary.rejected as u32,
            all_claims: ClaimView::with_owners(claims, &users),
            recent_approvals,
        })
    }

    pub async fn hr(&self) -> Result<HrDashboard, InternalError> {
        let claims = self.claims.all().await?;
        let summary = StatusSummary::of(&claims);

        Ok(HrDashboard {
            total_users: self.users.count().await? as u32,
            total_claims: summary.total as u32,
            pending_count: summary.pending as u32,
            approved_count: summary.approved as u32,
            rejected_count: summary.rejected as u32,
            processing_count: summary.processing as u32,
            approved_amount: summary.approved_amount,
        })
    }

    pub async fn home(&self) -> Result<HomeSummary, InternalError> {
        let claims = self.claims.all().await?;
        let summary = StatusSummary::of(&claims);

        Ok(HomeSummary {
            total_users: self.users.count().await? as u32,
            total_claims: summary.total as u32,
            pending_count: summary.pending as u32,
            approved_count: summary.approved as u32,
            rejected_count: summary.rejected as u32,
        })
    }
}
