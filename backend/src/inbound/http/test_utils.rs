//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use super::configure;
use super::state::HttpState;
use crate::Trace;
use crate::domain::ports::UserDirectory;
use crate::outbound::memory::InMemoryUserDirectory;

/// Application wired exactly like the server, backed by `users`.
pub fn directory_app_with(
    users: Arc<dyn UserDirectory>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(users)))
        .wrap(Trace)
        .configure(configure)
}

/// Application backed by a fresh in-memory directory.
pub fn directory_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    directory_app_with(Arc::new(InMemoryUserDirectory::new()))
}

/// Create parent `1` (age 40, money 2000, VIP) with inline children `2`
/// (money 500) and `3` (money 300).
pub async fn seed_family<S, B>(app: &S)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({
            "firstName": "Parent",
            "lastName": "Doe",
            "age": 40,
            "money": 2000,
            "status": "vip",
            "children": [
                { "firstName": "Child1", "age": 10, "money": 500 },
                { "firstName": "Child2", "age": 12, "money": 300 }
            ]
        }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED, "seeding succeeds");
}

/// Read a response body as JSON.
pub async fn body_json<B: MessageBody>(res: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}
