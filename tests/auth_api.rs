//! Auth client and gateway against an in-process mock of the back-office API.

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use pitboss::{
    PitbossError,
    auth::{AuthApi, AuthClient, AuthGateway, ModuleAccess, RoleTable},
};

const TOKEN: &str = "tok-123";

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    match (body["username"].as_str(), body["password"].as_str()) {
        (Some("marta"), Some("secret")) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "user": {"id": 7, "username": "marta", "nombre": "Marta"},
                    "roles": [{"role_nombre": "extracciones"}, {"role_nombre": "supervisor"}],
                    "modules": ["Tickets", {"nombre": "Zonas", "ruta": "/zonas"}],
                    "token": TOKEN
                }
            })),
        ),
        (Some("hollow"), _) => (
            StatusCode::OK,
            Json(json!({"success": true, "data": null})),
        ),
        (Some("boom"), _) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "message": "db down"})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Credenciales inválidas"})),
        ),
    }
}

async fn verify(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if bearer == Some(TOKEN) {
        (
            StatusCode::OK,
            Json(json!({"success": true, "data": {"user": {"id": 7, "username": "marta.r"}}})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Token inválido"})),
        )
    }
}

async fn register(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"success": true, "data": {"id": 42, "username": body["username"]}}))
}

/// Serve the mock API on an ephemeral port and return its base URL.
async fn spawn_api() -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify", get(verify))
        .route("/api/auth/register", post(register));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

#[tokio::test]
async fn login_flattens_roles_and_modules() {
    let client = AuthClient::new(spawn_api().await).unwrap();
    let data = client.login("marta", "secret").await.unwrap();

    assert_eq!(data.token, TOKEN);
    assert_eq!(data.user.id, Some(7));
    assert_eq!(data.user.username, "marta");
    assert_eq!(data.roles, vec!["extracciones", "supervisor"]);
    assert_eq!(
        data.modules,
        vec![
            ModuleAccess::new("Tickets"),
            ModuleAccess {
                name: "Zonas".into(),
                route: Some("/zonas".into()),
            },
        ]
    );
}

#[tokio::test]
async fn refused_login_carries_server_message() {
    let client = AuthClient::new(spawn_api().await).unwrap();
    let err = client.login("marta", "wrong").await.unwrap_err();
    assert!(matches!(err, PitbossError::Auth(ref m) if m == "Credenciales inválidas"));
}

#[tokio::test]
async fn server_error_is_a_network_failure() {
    let client = AuthClient::new(spawn_api().await).unwrap();
    let err = client.login("boom", "x").await.unwrap_err();
    assert!(matches!(err, PitbossError::Network(_)));
}

#[tokio::test]
async fn success_without_data_is_a_network_failure() {
    let client = AuthClient::new(spawn_api().await).unwrap();
    let err = client.login("hollow", "x").await.unwrap_err();
    assert!(matches!(err, PitbossError::Network(ref m) if m.contains("missing data")));
}

#[tokio::test]
async fn unreachable_api_is_a_network_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = AuthClient::new(format!("http://{}", addr)).unwrap();
    let err = client.verify(TOKEN).await.unwrap_err();
    assert!(matches!(err, PitbossError::Network(_)));
}

#[tokio::test]
async fn verify_sends_bearer_token() {
    let client = AuthClient::new(spawn_api().await).unwrap();
    let user = client.verify(TOKEN).await.unwrap();
    assert_eq!(user.username, "marta.r");

    let err = client.verify("stale").await.unwrap_err();
    assert!(matches!(err, PitbossError::Auth(_)));
}

#[tokio::test]
async fn register_returns_data_payload() {
    let client = AuthClient::new(spawn_api().await).unwrap();
    let created = client
        .register(&json!({"username": "nuevo", "password": "x"}))
        .await
        .unwrap();
    assert_eq!(created, json!({"id": 42, "username": "nuevo"}));
}

#[tokio::test]
async fn gateway_sign_in_restore_sign_out() {
    let client = AuthClient::new(spawn_api().await).unwrap();
    let mut gateway = AuthGateway::new(client, RoleTable::default());

    let route = gateway.sign_in("marta", "secret").await.unwrap();
    assert_eq!(route, "/supervisor/dashboard");
    assert!(gateway.sessions().is_authenticated());
    assert_eq!(gateway.sessions().token(), Some(TOKEN));

    let restored = gateway.restore().await.unwrap();
    assert_eq!(restored.as_deref(), Some("/supervisor/dashboard"));
    let session = gateway.sessions().current().unwrap();
    assert_eq!(session.user.username, "marta.r");
    assert!(session.can_access("zonas"));

    assert!(gateway.sign_out().is_some());
    assert_eq!(gateway.landing_route(), "/dashboard");
    assert_eq!(gateway.restore().await.unwrap(), None);
}

#[tokio::test]
async fn gateway_rejects_blank_credentials_without_calling_api() {
    // Port 9 is never contacted: validation fails first.
    let client = AuthClient::new("http://127.0.0.1:9").unwrap();
    let mut gateway = AuthGateway::new(client, RoleTable::default());
    let err = gateway.sign_in("  ", "secret").await.unwrap_err();
    assert!(matches!(err, PitbossError::Validation(_)));
    assert!(!gateway.sessions().is_authenticated());
}
