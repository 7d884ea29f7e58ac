//! HTTP inbound adapter exposing the user directory as REST endpoints.

pub mod children;
pub mod error;
pub mod health;
pub mod insights;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every directory route plus the JSON and path error handlers.
///
/// Health probes are registered by the server, which owns their state.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::create_user)
        .service(users::list_users)
        .service(users::users_options)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::patch_user)
        .service(users::delete_user)
        .service(users::user_options)
        .service(children::add_child)
        .service(children::list_children)
        .service(children::get_child)
        .service(children::update_child)
        .service(children::delete_child)
        .service(insights::proposed_status)
        .service(insights::years_to_retirement)
        .service(insights::category)
        .service(insights::total_money)
        .service(insights::discount_eligibility)
        .service(insights::increment_age_until);
}
