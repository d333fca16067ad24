use std::sync::Arc;

use chrono::Utc;

use crate::app_data::AppData;
use crate::coordinators::decision_workflow::{non_blank, DecisionWorkflow};
use crate::errors::InternalError;
use crate::services::claim_rules::{total_amount, validate_claim_values};
use crate::stores::EntityStore;
use crate::types::domain::{Claim, ClaimStatus, User};
use crate::types::dto::claim::{ClaimForm, ClaimFormOptions, ClaimView, UserOption};
use crate::types::internal::RequestContext;

/// Claim CRUD plus approval from the claim detail page
pub struct ClaimCoordinator {
    claims: Arc<EntityStore<Claim>>,
    users: Arc<EntityStore<User>>,
    workflow: DecisionWorkflow,
}

impl ClaimCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            claims: app_data.claims.clone(),
            users: app_data.users.clone(),
            workflow: DecisionWorkflow::new(&app_data),
        }
    }

    /// Every claim, newest submission first
    pub async fn list(&self) -> Result<Vec<ClaimView>, InternalError> {
        let mut claims = self.claims.all().await?;
        sort_newest_first(&mut claims);
        let users = self.users.all().await?;
        Ok(ClaimView::with_owners(claims, &users))
    }

    pub async fn get(&self, id: i32) -> Result<ClaimView, InternalError> {
        let claim = self.claims.get(id).await?;
        let owner = self.users.find(claim.user_id).await?;
        Ok(ClaimView::new(claim, owner.as_ref()))
    }

    pub async fn create_form(&self) -> Result<ClaimFormOptions, InternalError> {
        let users = self.users.all().await?;
        Ok(ClaimFormOptions {
            claim_date: Utc::now().date_naive(),
            users: users.iter().map(UserOption::from).collect(),
        })
    }

    /// Validate and store a new claim with status Pending
    pub async fn create(&self, ctx: &RequestContext, form: ClaimForm) -> Result<ClaimView, InternalError> {
        validate_claim_values(form.hours_worked, form.hourly_rate, form.user_id)?;

        let total = total_amount(form.hours_worked, form.hourly_rate)?;
        let claim = self
            .claims
            .insert_with(|id| {
                Ok(Claim {
                    id,
                    claim_date: form.claim_date,
                    status: ClaimStatus::Pending,
                    hours_worked: form.hours_worked,
                    hourly_rate: form.hourly_rate,
                    total_amount: total,
                    submission_date: Utc::now(),
                    last_updated: None,
                    status_notes: None,
                    notes: non_blank(form.notes),
                    user_id: form.user_id,
                })
            })
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            claim_id = claim.id,
            user_id = claim.user_id,
            "Claim created"
        );

        let owner = self.users.find(claim.user_id).await?;
        Ok(ClaimView::new(claim, owner.as_ref()))
    }

    /// Re-validate, recompute the total and stamp `lastUpdated`
    ///
    /// A blank `status` keeps the current one.
    pub async fn edit(&self, ctx: &RequestContext, id: i32, form: ClaimForm) -> Result<ClaimView, InternalError> {
        validate_claim_values(form.hours_worked, form.hourly_rate, form.user_id)?;

        let now = Utc::now();
        let status = non_blank(form.status).map(|s| ClaimStatus::parse(Some(s.trim())));
        let updated = self
            .workflow
            .edit(ctx, id, move |claim| {
                claim.claim_date = form.claim_date;
                claim.hours_worked = form.hours_worked;
                claim.hourly_rate = form.hourly_rate;
                claim.user_id = form.user_id;
                claim.notes = non_blank(form.notes);
                if let Some(status) = status {
                    claim.status = status;
                }
                claim.recompute_total()?;
                claim.last_updated = Some(now);
                Ok(())
            })
            .await?;

        tracing::info!(request_id = %ctx.request_id, claim_id = id, "Claim updated");

        let owner = self.users.find(updated.user_id).await?;
        Ok(ClaimView::new(updated, owner.as_ref()))
    }

    pub async fn approve(
        &self,
        ctx: &RequestContext,
        id: i32,
        comments: Option<String>,
    ) -> Result<Claim, InternalError> {
        self.workflow.approve(ctx, id, comments, None).await
    }
}

/// Descending submission date, ties broken by ascending id
pub fn sort_newest_first(claims: &mut [Claim]) {
    claims.sort_by(|a, b| {
        b.submission_date
            .cmp(&a.submission_date)
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use crate::test::utils::{setup_json_app_data, test_ctx};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn form(hours: &str, rate: &str) -> ClaimForm {
        ClaimForm {
            claim_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            hours_worked: hours.parse().unwrap(),
            hourly_rate: rate.parse().unwrap(),
            user_id: 3,
            notes: Some("   ".to_string()),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_computes_total_and_stays_pending() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = ClaimCoordinator::new(app_data);

        let claim = coordinator.create(&test_ctx(), form("12.5", "300")).await.unwrap();

        assert_eq!(claim.id, 5);
        assert_eq!(claim.status, "Pending");
        assert_eq!(claim.total_amount, Decimal::from(3750));
        assert_eq!(claim.notes, None);
        assert_eq!(claim.user_name.as_deref(), Some("Mike Johnson"));
    }

    #[tokio::test]
    async fn test_invalid_claim_is_not_stored() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = ClaimCoordinator::new(app_data.clone());

        let err = coordinator.create(&test_ctx(), form("200", "300")).await.unwrap_err();

        assert!(matches!(
            err,
            InternalError::Validation(ValidationError::HoursOutOfRange)
        ));
        assert_eq!(app_data.claims.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_overflowing_total_is_rejected_on_create_and_edit() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = ClaimCoordinator::new(app_data.clone());
        let ctx = test_ctx();
        let mut huge = form("168", "1");
        huge.hourly_rate = Decimal::MAX / Decimal::from(2);

        let err = coordinator.create(&ctx, huge.clone()).await.unwrap_err();
        assert!(matches!(
            err,
            InternalError::Validation(ValidationError::AmountTooLarge)
        ));
        assert_eq!(app_data.claims.count().await.unwrap(), 4);

        let err = coordinator.edit(&ctx, 1, huge).await.unwrap_err();
        assert!(matches!(
            err,
            InternalError::Validation(ValidationError::AmountTooLarge)
        ));
        assert_eq!(app_data.claims.get(1).await.unwrap().hours_worked, Decimal::from(40));
    }

    #[tokio::test]
    async fn test_edit_recomputes_and_keeps_blank_status() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = ClaimCoordinator::new(app_data);
        let mut changes = form("10", "100");
        changes.status = Some(String::new());

        let claim = coordinator.edit(&test_ctx(), 2, changes).await.unwrap();

        assert_eq!(claim.status, "Approved");
        assert_eq!(claim.total_amount, Decimal::from(1000));
        assert!(claim.last_updated.is_some());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = ClaimCoordinator::new(app_data);

        let claims = coordinator.list().await.unwrap();
        assert!(claims
            .windows(2)
            .all(|pair| pair[0].submission_date >= pair[1].submission_date));
    }
}
