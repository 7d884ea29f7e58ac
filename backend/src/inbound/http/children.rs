//! Child handlers nested under `/users/{id}/children`.
//!
//! Children are directory records in their own right; these routes only
//! scope lookups to a parent's children list.

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::domain::{UserChanges, UserDraft, UserId, UserSnapshot};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

fn ids(path: web::Path<(String, String)>) -> (UserId, UserId) {
    let (parent, child) = path.into_inner();
    (UserId::new(parent), UserId::new(child))
}

/// Create a child under an existing user.
#[utoipa::path(
    post,
    path = "/users/{id}/children",
    params(("id" = String, Path, description = "Parent identifier")),
    request_body = UserDraft,
    responses(
        (status = 201, description = "Child created", body = UserSnapshot),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["children"],
    operation_id = "addChild"
)]
#[post("/users/{id}/children")]
pub async fn add_child(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserDraft>,
) -> ApiResult<HttpResponse> {
    let parent = UserId::new(path.into_inner());
    let child = state.users.add_child(&parent, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(child))
}

#[utoipa::path(
    get,
    path = "/users/{id}/children",
    params(("id" = String, Path, description = "Parent identifier")),
    responses(
        (status = 200, description = "Direct children", body = [UserSnapshot]),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["children"],
    operation_id = "listChildren"
)]
#[get("/users/{id}/children")]
pub async fn list_children(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<UserSnapshot>>> {
    let parent = UserId::new(path.into_inner());
    Ok(web::Json(state.users.list_children(&parent).await?))
}

#[utoipa::path(
    get,
    path = "/users/{id}/children/{child_id}",
    params(
        ("id" = String, Path, description = "Parent identifier"),
        ("child_id" = String, Path, description = "Child identifier")
    ),
    responses(
        (status = 200, description = "Child", body = UserSnapshot),
        (status = 404, description = "User or child not found", body = ErrorBody)
    ),
    tags = ["children"],
    operation_id = "getChild"
)]
#[get("/users/{id}/children/{child_id}")]
pub async fn get_child(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<UserSnapshot>> {
    let (parent, child) = ids(path);
    Ok(web::Json(state.users.get_child(&parent, &child).await?))
}

#[utoipa::path(
    put,
    path = "/users/{id}/children/{child_id}",
    params(
        ("id" = String, Path, description = "Parent identifier"),
        ("child_id" = String, Path, description = "Child identifier")
    ),
    request_body = UserChanges,
    responses(
        (status = 200, description = "Updated child", body = UserSnapshot),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 404, description = "User or child not found", body = ErrorBody)
    ),
    tags = ["children"],
    operation_id = "updateChild"
)]
#[put("/users/{id}/children/{child_id}")]
pub async fn update_child(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<UserChanges>,
) -> ApiResult<web::Json<UserSnapshot>> {
    let (parent, child) = ids(path);
    Ok(web::Json(
        state
            .users
            .update_child(&parent, &child, payload.into_inner())
            .await?,
    ))
}

/// Remove one child record. Its own children are left in place.
#[utoipa::path(
    delete,
    path = "/users/{id}/children/{child_id}",
    params(
        ("id" = String, Path, description = "Parent identifier"),
        ("child_id" = String, Path, description = "Child identifier")
    ),
    responses(
        (status = 200, description = "Removed child", body = UserSnapshot),
        (status = 404, description = "User or child not found", body = ErrorBody)
    ),
    tags = ["children"],
    operation_id = "deleteChild"
)]
#[delete("/users/{id}/children/{child_id}")]
pub async fn delete_child(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<UserSnapshot>> {
    let (parent, child) = ids(path);
    let removed = state.users.delete_child(&parent, &child).await?;
    info!(parent_id = %parent, child_id = %child, "child removed");
    Ok(web::Json(removed))
}
