//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every directory endpoint, the health probes and the
//! JSON bodies they exchange. The document backs Swagger UI in debug builds
//! and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Status, UserCategory, UserChanges, UserDraft, UserSnapshot};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::insights::{
    AgeIncrementBody, CategoryBody, DiscountEligibilityBody, ProposedStatusBody, TotalMoneyBody,
    YearsToRetirementBody,
};
use crate::inbound::http::users::MessageResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "In-memory directory of users with parent/child relations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::users_options,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::user_options,
        crate::inbound::http::children::add_child,
        crate::inbound::http::children::list_children,
        crate::inbound::http::children::get_child,
        crate::inbound::http::children::update_child,
        crate::inbound::http::children::delete_child,
        crate::inbound::http::insights::proposed_status,
        crate::inbound::http::insights::years_to_retirement,
        crate::inbound::http::insights::category,
        crate::inbound::http::insights::total_money,
        crate::inbound::http::insights::discount_eligibility,
        crate::inbound::http::insights::increment_age_until,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSnapshot,
        UserDraft,
        UserChanges,
        Status,
        UserCategory,
        ErrorBody,
        MessageResponse,
        ProposedStatusBody,
        YearsToRetirementBody,
        CategoryBody,
        TotalMoneyBody,
        DiscountEligibilityBody,
        AgeIncrementBody
    )),
    tags(
        (name = "users", description = "Top-level user operations"),
        (name = "children", description = "Operations scoped to a user's children"),
        (name = "insights", description = "Values derived from a user's record"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("UserSnapshot", &["id", "firstName", "children", "postCode", "status"])]
    #[case("ErrorBody", &["error"])]
    #[case("AgeIncrementBody", &["message", "yearsAdded"])]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let present = object_fields(name);
        for field in fields {
            assert!(present.iter().any(|p| p == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    #[case("/users")]
    #[case("/users/{id}")]
    #[case("/users/{id}/children/{child_id}")]
    #[case("/users/{id}/increment-age-until/{target_age}")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path));
    }
}
