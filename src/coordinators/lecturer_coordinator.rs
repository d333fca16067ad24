use std::sync::Arc;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

use crate::app_data::AppData;
use crate::coordinators::claim_coordinator::sort_newest_first;
use crate::coordinators::decision_workflow::non_blank;
use crate::errors::{InternalError, ValidationError};
use crate::services::claim_rules::{total_amount, validate_claim_values};
use crate::services::MonthlyAllowance;
use crate::stores::{next_id_of, EntityStore};
use crate::types::domain::{Claim, ClaimStatus, Role, User};
use crate::types::dto::claim::ClaimView;
use crate::types::dto::dashboard::{LecturerDashboard, MonthlyHours, SubmitClaimDefaults, SubmitClaimRequest};
use crate::types::dto::user::UserView;
use crate::types::internal::{EntityKind, RequestContext};

/// Lecturer self-service: dashboard, capped submission and own claims
///
/// The lecturer is identified by an explicit user id; a user whose role is not
/// Lecturer is treated as missing.
pub struct LecturerCoordinator {
    users: Arc<EntityStore<User>>,
    roles: Arc<EntityStore<Role>>,
    claims: Arc<EntityStore<Claim>>,
    monthly_cap: Decimal,
    default_rate: Decimal,
}

impl LecturerCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            users: app_data.users.clone(),
            roles: app_data.roles.clone(),
            claims: app_data.claims.clone(),
            monthly_cap: app_data.settings.monthly_hours_cap(),
            default_rate: app_data.settings.default_lecturer_rate(),
        }
    }

    /// Load a lecturer, persisting the default rate if theirs is unset
    async fn lecturer(&self, ctx: &RequestContext, id: i32) -> Result<User, InternalError> {
        let user = self.users.get(id).await?;
        let is_lecturer = self
            .roles
            .find(user.role_id)
            .await?
            .is_some_and(|role| role.is_lecturer());
        if !is_lecturer {
            return Err(InternalError::not_found(EntityKind::User, id));
        }

        if user.hourly_rate > Decimal::ZERO {
            return Ok(user);
        }

        let rate = self.default_rate;
        let updated = self
            .users
            .update_one(id, |u| {
                u.hourly_rate = rate;
                Ok(())
            })
            .await?;
        tracing::info!(
            request_id = %ctx.request_id,
            user_id = id,
            rate = %rate,
            "Assigned default hourly rate to lecturer"
        );
        Ok(updated)
    }

    async fn allowance(&self, user_id: i32, year: i32, month: u32) -> Result<MonthlyAllowance, InternalError> {
        let claims = self.claims.filter(|c| c.user_id == user_id).await?;
        Ok(MonthlyAllowance::for_month(&claims, user_id, year, month, self.monthly_cap))
    }

    async fn own_claims(&self, lecturer: &User) -> Result<Vec<ClaimView>, InternalError> {
        let mut claims = self.claims.filter(|c| c.user_id == lecturer.id).await?;
        sort_newest_first(&mut claims);
        Ok(claims
            .into_iter()
            .map(|c| ClaimView::new(c, Some(lecturer)))
            .collect())
    }

    pub async fn dashboard(&self, ctx: &RequestContext, id: i32) -> Result<LecturerDashboard, InternalError> {
        let lecturer = self.lecturer(ctx, id).await?;
        let today = Utc::now().date_naive();
        let allowance = self.allowance(id, today.year(), today.month()).await?;
        let claims = self.own_claims(&lecturer).await?;
        let roles = self.roles.all().await?;

        Ok(LecturerDashboard {
            lecturer: UserView::new(lecturer, &roles),
            monthly_hours: monthly_hours(&allowance),
            claims,
        })
    }

    /// Form defaults; refused once the current month is full
    pub async fn submit_form(&self, ctx: &RequestContext, id: i32) -> Result<SubmitClaimDefaults, InternalError> {
        let lecturer = self.lecturer(ctx, id).await?;
        let today = Utc::now().date_naive();
        let allowance = self.allowance(id, today.year(), today.month()).await?;

        if allowance.is_exhausted() {
            return Err(ValidationError::MonthlyCapReached { cap: self.monthly_cap }.into());
        }

        Ok(SubmitClaimDefaults {
            user_id: lecturer.id,
            claim_date: today,
            hourly_rate: lecturer.hourly_rate,
            monthly_hours: monthly_hours(&allowance),
        })
    }

    /// Store a claim at the lecturer's own rate, enforcing the monthly cap
    /// for the month of `claimDate`
    pub async fn submit(&self, ctx: &RequestContext, request: SubmitClaimRequest) -> Result<ClaimView, InternalError> {
        let lecturer = self.lecturer(ctx, request.user_id).await?;
        validate_claim_values(request.hours_worked, lecturer.hourly_rate, lecturer.id)?;

        let cap = self.monthly_cap;
        let year = request.claim_date.year();
        let month = request.claim_date.month();
        let rate = lecturer.hourly_rate;
        let user_id = lecturer.id;

        let claim = self
            .claims
            .update(move |records| {
                MonthlyAllowance::for_month(records, user_id, year, month, cap)
                    .check(request.hours_worked)?;
                let total = total_amount(request.hours_worked, rate)?;

                let claim = Claim {
                    id: next_id_of(records),
                    claim_date: request.claim_date,
                    status: ClaimStatus::Pending,
                    hours_worked: request.hours_worked,
                    hourly_rate: rate,
                    total_amount: total,
                    submission_date: Utc::now(),
                    last_updated: None,
                    status_notes: None,
                    notes: non_blank(request.notes),
                    user_id,
                };
                records.push(claim.clone());
                Ok(claim)
            })
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            claim_id = claim.id,
            user_id,
            total = %claim.total_amount,
            "Lecturer submitted claim"
        );
        Ok(ClaimView::new(claim, Some(&lecturer)))
    }

    pub async fn my_claims(&self, ctx: &RequestContext, id: i32) -> Result<Vec<ClaimView>, InternalError> {
        let lecturer = self.lecturer(ctx, id).await?;
        self.own_claims(&lecturer).await
    }
}

fn monthly_hours(allowance: &MonthlyAllowance) -> MonthlyHours {
    MonthlyHours {
        used: allowance.used,
        cap: allowance.cap,
        remaining: allowance.remaining(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_json_app_data, test_ctx};
    use chrono::NaiveDate;

    fn request(user_id: i32, date: NaiveDate, hours: i64) -> SubmitClaimRequest {
        SubmitClaimRequest {
            user_id,
            claim_date: date,
            hours_worked: Decimal::from(hours),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_submit_uses_lecturer_rate() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = LecturerCoordinator::new(app_data);
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        let claim = coordinator.submit(&test_ctx(), request(1, date, 40)).await.unwrap();

        assert_eq!(claim.hourly_rate, Decimal::from(450));
        assert_eq!(claim.total_amount, Decimal::from(18000));
        assert_eq!(claim.status, "Pending");
    }

    #[tokio::test]
    async fn test_submit_over_cap_is_rejected_and_not_stored() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = LecturerCoordinator::new(app_data.clone());
        let ctx = test_ctx();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        coordinator.submit(&ctx, request(1, date, 150)).await.unwrap();
        let before = app_data.claims.count().await.unwrap();

        let err = coordinator.submit(&ctx, request(1, date, 31)).await.unwrap_err();

        assert!(matches!(
            err,
            InternalError::Validation(ValidationError::MonthlyCapExceeded { .. })
        ));
        assert_eq!(
            err.to_string(),
            "This submission would exceed the monthly limit of 180 hours. You have 30.0 hours remaining this month."
        );
        assert_eq!(app_data.claims.count().await.unwrap(), before);

        // Exactly reaching the cap is allowed
        coordinator.submit(&ctx, request(1, date, 30)).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_lecturer_is_not_found() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = LecturerCoordinator::new(app_data);

        // Seeded user 2 is a coordinator
        let err = coordinator.dashboard(&test_ctx(), 2).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unset_rate_gets_default_persisted() {
        let (_dir, app_data) = setup_json_app_data();
        app_data
            .users
            .update_one(3, |u| {
                u.hourly_rate = Decimal::ZERO;
                Ok(())
            })
            .await
            .unwrap();
        let coordinator = LecturerCoordinator::new(app_data.clone());

        let dashboard = coordinator.dashboard(&test_ctx(), 3).await.unwrap();

        assert_eq!(dashboard.lecturer.hourly_rate, Decimal::from(450));
        app_data.reset_caches().await;
        assert_eq!(app_data.users.get(3).await.unwrap().hourly_rate, Decimal::from(450));
    }

    #[tokio::test]
    async fn test_full_month_refuses_submission_form() {
        let (_dir, app_data) = setup_json_app_data();
        let coordinator = LecturerCoordinator::new(app_data);
        let ctx = test_ctx();
        let today = Utc::now().date_naive();

        // Seeded claims for user 3 may fall in this month; fill whatever is left
        let defaults = coordinator.submit_form(&ctx, 3).await.unwrap();
        let remaining = defaults.monthly_hours.remaining;
        let mut left = remaining;
        while left > Decimal::ZERO {
            let chunk = left.min(Decimal::from(168));
            coordinator
                .submit(
                    &ctx,
                    SubmitClaimRequest {
                        user_id: 3,
                        claim_date: today,
                        hours_worked: chunk,
                        notes: None,
                    },
                )
                .await
                .unwrap();
            left -= chunk;
        }

        let err = coordinator.submit_form(&ctx, 3).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "You have reached the maximum limit of 180 hours for this month. Cannot submit more claims."
        );
    }
}
