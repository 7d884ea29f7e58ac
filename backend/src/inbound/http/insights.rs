//! Derived-value handlers: status proposal, retirement, category, money and
//! the age increment operation.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Status, UserCategory, UserId, UserInsights};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposedStatusBody {
    pub proposed_status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YearsToRetirementBody {
    pub years_to_retirement: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBody {
    pub user_category: UserCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalMoneyBody {
    pub total_money: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountEligibilityBody {
    pub eligible_for_discount: bool,
}

/// Result of a successful age increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgeIncrementBody {
    pub message: String,
    pub years_added: u32,
}

async fn insights_for(state: &HttpState, path: web::Path<String>) -> ApiResult<UserInsights> {
    let id = UserId::new(path.into_inner());
    state.users.user_insights(&id).await
}

/// Status suggested by the user's money balance.
#[utoipa::path(
    get,
    path = "/users/{id}/proposed-status",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Proposed status", body = ProposedStatusBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["insights"],
    operation_id = "proposedStatus"
)]
#[get("/users/{id}/proposed-status")]
pub async fn proposed_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProposedStatusBody>> {
    let insights = insights_for(&state, path).await?;
    Ok(web::Json(ProposedStatusBody {
        proposed_status: insights.proposed_status,
    }))
}

#[utoipa::path(
    get,
    path = "/users/{id}/years-to-retirement",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Years until retirement", body = YearsToRetirementBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["insights"],
    operation_id = "yearsToRetirement"
)]
#[get("/users/{id}/years-to-retirement")]
pub async fn years_to_retirement(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<YearsToRetirementBody>> {
    let insights = insights_for(&state, path).await?;
    Ok(web::Json(YearsToRetirementBody {
        years_to_retirement: insights.years_to_retirement,
    }))
}

#[utoipa::path(
    get,
    path = "/users/{id}/category",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Age category", body = CategoryBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["insights"],
    operation_id = "userCategory"
)]
#[get("/users/{id}/category")]
pub async fn category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CategoryBody>> {
    let insights = insights_for(&state, path).await?;
    Ok(web::Json(CategoryBody {
        user_category: insights.category,
    }))
}

/// Own money plus that of direct children.
#[utoipa::path(
    get,
    path = "/users/{id}/total-money",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Total money", body = TotalMoneyBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["insights"],
    operation_id = "totalMoney"
)]
#[get("/users/{id}/total-money")]
pub async fn total_money(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TotalMoneyBody>> {
    let insights = insights_for(&state, path).await?;
    Ok(web::Json(TotalMoneyBody {
        total_money: insights.total_money,
    }))
}

#[utoipa::path(
    get,
    path = "/users/{id}/discount-eligibility",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Discount eligibility", body = DiscountEligibilityBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["insights"],
    operation_id = "discountEligibility"
)]
#[get("/users/{id}/discount-eligibility")]
pub async fn discount_eligibility(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DiscountEligibilityBody>> {
    let insights = insights_for(&state, path).await?;
    Ok(web::Json(DiscountEligibilityBody {
        eligible_for_discount: insights.eligible_for_discount,
    }))
}

/// Age a user up to `target_age`.
///
/// A missing user is reported before the target is validated.
#[utoipa::path(
    post,
    path = "/users/{id}/increment-age-until/{target_age}",
    params(
        ("id" = String, Path, description = "User identifier"),
        ("target_age" = String, Path, description = "Age to reach; must be an integer above the current age")
    ),
    responses(
        (status = 200, description = "Age updated", body = AgeIncrementBody),
        (status = 400, description = "Invalid target age", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["insights"],
    operation_id = "incrementAgeUntil"
)]
#[post("/users/{id}/increment-age-until/{target_age}")]
pub async fn increment_age_until(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<AgeIncrementBody>> {
    let (id, target_age) = path.into_inner();
    let id = UserId::new(id);
    let years_added = state.users.increment_age_until(&id, &target_age).await?;
    info!(user_id = %id, years_added, "age incremented");
    Ok(web::Json(AgeIncrementBody {
        message: "Age incremented successfully".into(),
        years_added,
    }))
}
