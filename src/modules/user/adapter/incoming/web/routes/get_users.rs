use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;
use crate::shared::persistence::{Page, PageRequest};
use crate::user::application::ports::incoming::use_cases::UserView;
use crate::AppState;
use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetUsersQuery {
    /// 1-based page number, default 1
    pub page: Option<u64>,
    /// Items per page, default 20, at most 100
    pub page_size: Option<u64>,
}

/// List users (admin)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(GetUsersQuery),
    responses(
        (status = 200, description = "Page of live users, newest first", body = inline(SuccessResponse<Page<UserView>>)),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/users")]
pub async fn get_users_handler(
    _admin: AdminUser,
    query: web::Query<GetUsersQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let page = PageRequest::new(query.page, query.page_size);

    match data.user.list.execute(page).await {
        Ok(users) => ApiResponse::success(users),
        Err(e) => {
            error!(error = %e, "Failed to list users");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::{TestAppStateBuilder, TestBackend};
    use crate::tests::support::auth_helper::bearer;
    use crate::user::application::domain::entities::Role;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_get_users_paginates() {
        let backend = TestBackend::new();
        let admin = backend.seed_user("root@example.com", "Password1", vec![Role::Admin]);
        for i in 0..4 {
            backend.seed_user(&format!("user{}@example.com", i), "Password1", vec![Role::User]);
        }
        let tokens = backend.login(&admin, "Password1").await;

        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::from_backend(&backend).build())
                .app_data(backend.token_provider_data())
                .service(get_users_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/users?page=2&page_size=2")
            .insert_header(bearer(&tokens.access_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["total"], 5);
        assert_eq!(json["data"]["page"], 2);
        assert_eq!(json["data"]["total_pages"], 3);
        assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_get_users_clamps_page_size() {
        let backend = TestBackend::new();
        let admin = backend.seed_user("root@example.com", "Password1", vec![Role::Admin]);
        let tokens = backend.login(&admin, "Password1").await;

        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::from_backend(&backend).build())
                .app_data(backend.token_provider_data())
                .service(get_users_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/users?page_size=1000")
            .insert_header(bearer(&tokens.access_token))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["page_size"], 100);
    }

    #[actix_web::test]
    async fn test_get_users_refuses_logged_out_and_deleted_admin() {
        let backend = TestBackend::new();
        let admin = backend.seed_user("root@example.com", "Password1", vec![Role::Admin]);
        let other = backend.seed_user("ops@example.com", "Password1", vec![Role::Admin]);
        let tokens = backend.login(&admin, "Password1").await;
        let state = TestAppStateBuilder::from_backend(&backend).build();
        state.auth.logout.execute(tokens.session_id).await.unwrap();
        state.user.soft_delete.execute(other.id, admin.id).await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(backend.token_provider_data())
                .service(get_users_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/users")
            .insert_header(bearer(&tokens.access_token))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_get_users_with_page_beyond_any_offset() {
        let backend = TestBackend::new();
        let admin = backend.seed_user("root@example.com", "Password1", vec![Role::Admin]);
        let tokens = backend.login(&admin, "Password1").await;

        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::from_backend(&backend).build())
                .app_data(backend.token_provider_data())
                .service(get_users_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/users?page={}&page_size=100", u64::MAX))
            .insert_header(bearer(&tokens.access_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["items"].as_array().unwrap().len(), 0);
    }

    #[actix_web::test]
    async fn test_get_users_repository_failure() {
        let backend = TestBackend::new();
        let admin = backend.seed_user("root@example.com", "Password1", vec![Role::Admin]);
        let tokens = backend.login(&admin, "Password1").await;
        backend.users.fail_with(
            crate::user::application::ports::outgoing::UserRepositoryError::DatabaseError(
                "db down".to_string(),
            ),
        );

        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::from_backend(&backend).build())
                .app_data(backend.token_provider_data())
                .service(get_users_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/users")
            .insert_header(bearer(&tokens.access_token))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 500);
    }
}
