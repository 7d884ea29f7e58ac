//! Top-level user handlers.
//!
//! ```text
//! POST /users {"firstName":"John","age":30,"money":5000}
//! GET /users/1
//! DELETE /users/1
//! ```

use actix_web::http::header::{self, ContentType};
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, route, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{UserChanges, UserDraft, UserId, UserSnapshot};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

const COLLECTION_ALLOW: &str = "GET, POST, OPTIONS";
const ITEM_ALLOW: &str = "GET, PUT, DELETE, HEAD, OPTIONS";

/// Confirmation body returned by delete and age-increment operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a root user. Inline children become records of their own.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserDraft,
    responses(
        (status = 201, description = "User created", body = UserSnapshot),
        (status = 400, description = "Malformed body", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserDraft>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// List every user, children included, in creation order.
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "Users", body = [UserSnapshot])),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserSnapshot>>> {
    Ok(web::Json(state.users.list_users().await?))
}

#[utoipa::path(
    options,
    path = "/users",
    responses((status = 200, description = "Supported methods", headers(("Allow" = String)))),
    tags = ["users"],
    operation_id = "usersOptions"
)]
#[route("/users", method = "OPTIONS")]
pub async fn users_options() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ALLOW, COLLECTION_ALLOW))
        .finish()
}

/// Fetch one user with its children embedded. `HEAD` returns headers only.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSnapshot),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[route("/users/{id}", method = "GET", method = "HEAD")]
pub async fn get_user(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    let user = state.users.get_user(&id).await?;
    if req.method() == Method::HEAD {
        return Ok(HttpResponse::Ok().content_type(ContentType::json()).finish());
    }
    Ok(HttpResponse::Ok().json(user))
}

/// Replace the supplied scalar fields of a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserChanges,
    responses(
        (status = 200, description = "Updated user", body = UserSnapshot),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserChanges>,
) -> ApiResult<web::Json<UserSnapshot>> {
    let id = UserId::new(path.into_inner());
    Ok(web::Json(
        state.users.update_user(&id, payload.into_inner()).await?,
    ))
}

/// Merge the supplied scalar fields into a user.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserChanges,
    responses(
        (status = 200, description = "Patched user", body = UserSnapshot),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "patchUser"
)]
#[patch("/users/{id}")]
pub async fn patch_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserChanges>,
) -> ApiResult<web::Json<UserSnapshot>> {
    let id = UserId::new(path.into_inner());
    Ok(web::Json(
        state.users.update_user(&id, payload.into_inner()).await?,
    ))
}

/// Delete a user and every descendant.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User and descendants removed", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = UserId::new(path.into_inner());
    let removed = state.users.delete_user(&id).await?;
    info!(user_id = %id, removed = removed.len(), "cascade delete served");
    Ok(web::Json(MessageResponse {
        message: "User and their descendants deleted successfully".into(),
    }))
}

#[utoipa::path(
    options,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses((status = 200, description = "Supported methods", headers(("Allow" = String)))),
    tags = ["users"],
    operation_id = "userOptions"
)]
#[route("/users/{id}", method = "OPTIONS")]
pub async fn user_options() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ALLOW, ITEM_ALLOW))
        .finish()
}
