mod common;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::Harness;
use member_api::{
    error::ApiError,
    repo::users::UserView,
    service::users::{Paging, RegisterUser, UpdateUser, UserService},
};
use tower::ServiceExt;

async fn seed_account(h: &Harness, email: &str, role_id: &str) {
    h.state
        .users()
        .register(RegisterUser {
            user_name: "Gate".to_string(),
            user_email: email.to_string(),
            user_password: "pw".to_string(),
            user_phone: "010-0000-0000".to_string(),
            department_id: "DEP001".to_string(),
            is_socialed: false,
        })
        .await
        .unwrap();
    if role_id != "ROLE_MEMBER" {
        h.state.users().change_role(email, role_id).await.unwrap();
    }
}

fn admin_request(token: Option<&str>) -> Request<Body> {
    let builder = Request::builder().uri("/admin/users").method("GET");
    let builder = match token {
        Some(token) => builder.header("X-User-Id", token),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn missing_identity_header_is_unauthenticated() {
    let h = Harness::new().await;
    let app = member_api::router(h.state.clone());

    let response = app.oneshot(admin_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn undecryptable_token_is_unauthenticated() {
    let h = Harness::new().await;
    let app = member_api::router(h.state.clone());

    let response = app
        .oneshot(admin_request(Some("not-a-real-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_without_an_active_account_is_unauthenticated() {
    let h = Harness::new().await;
    let app = member_api::router(h.state.clone());

    // Decrypts fine, resolves to nobody.
    let token = h.token_for("ghost@x.com");
    let response = app.oneshot(admin_request(Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_role_is_forbidden() {
    let h = Harness::new().await;
    seed_account(&h, "member@x.com", "ROLE_MEMBER").await;
    let app = member_api::router(h.state.clone());

    let token = h.token_for("member@x.com");
    let response = app.oneshot(admin_request(Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_role_passes_the_gate() {
    let h = Harness::new().await;
    seed_account(&h, "root@x.com", "ROLE_ADMIN").await;
    let app = member_api::router(h.state.clone());

    let token = h.token_for("root@x.com");
    let response = app.oneshot(admin_request(Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Delegating wrapper that counts how often the user listing is served.
struct CountingUserService {
    inner: Arc<dyn UserService>,
    list_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl UserService for CountingUserService {
    async fn register(&self, input: RegisterUser) -> Result<(), ApiError> {
        self.inner.register(input).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.inner.login(email, password).await
    }

    async fn get_user(&self, email: &str) -> Result<UserView, ApiError> {
        self.inner.get_user(email).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ApiError> {
        self.inner.exists_by_email(email).await
    }

    async fn list_users(&self, paging: Paging) -> Result<Vec<UserView>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_users(paging).await
    }

    async fn list_users_by_department(
        &self,
        department_id: &str,
        paging: Paging,
    ) -> Result<Vec<UserView>, ApiError> {
        self.inner.list_users_by_department(department_id, paging).await
    }

    async fn update_user(&self, email: &str, input: UpdateUser) -> Result<(), ApiError> {
        self.inner.update_user(email, input).await
    }

    async fn change_password(
        &self,
        email: &str,
        current: &str,
        new: &str,
    ) -> Result<(), ApiError> {
        self.inner.change_password(email, current, new).await
    }

    async fn change_role(&self, email: &str, role_id: &str) -> Result<(), ApiError> {
        self.inner.change_role(email, role_id).await
    }

    async fn withdraw(&self, email: &str) -> Result<(), ApiError> {
        self.inner.withdraw(email).await
    }
}

#[tokio::test]
async fn admin_request_reaches_the_handler_exactly_once() {
    let list_calls = Arc::new(AtomicUsize::new(0));
    let counter = list_calls.clone();
    let h = Harness::build(move |inner| {
        Arc::new(CountingUserService {
            inner,
            list_calls: counter,
        })
    })
    .await;
    seed_account(&h, "root@x.com", "ROLE_ADMIN").await;
    let app = member_api::router(h.state.clone());

    let token = h.token_for("root@x.com");
    let response = app.oneshot(admin_request(Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(list_calls.load(Ordering::SeqCst), 1);

    // A rejected request never reaches the handler at all.
    let app = member_api::router(h.state.clone());
    let response = app.oneshot(admin_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn every_admin_route_sits_behind_the_gate() {
    let h = Harness::new().await;

    for (method, uri) in [
        ("GET", "/admin/users"),
        ("GET", "/admin/users/ann%40x.com"),
        ("DELETE", "/admin/users/ann%40x.com"),
        ("PUT", "/admin/users/roles"),
        ("GET", "/admin/departments/DEP001/users"),
        ("GET", "/admin/departments"),
        ("POST", "/admin/departments"),
        ("GET", "/admin/roles"),
        ("GET", "/admin/event-levels"),
    ] {
        let app = member_api::router(h.state.clone());
        let request = Request::builder()
            .uri(uri)
            .method(method)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{method} {uri} reachable without identity"
        );
    }
}

#[tokio::test]
async fn member_routes_do_not_require_admin() {
    let h = Harness::new().await;
    seed_account(&h, "member@x.com", "ROLE_MEMBER").await;
    let app = member_api::router(h.state.clone());

    let token = h.token_for("member@x.com");
    let request = Request::builder()
        .uri("/users/me")
        .method("GET")
        .header("X-User-Id", &token)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
