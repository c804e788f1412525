// tests/http_api.rs
//
// Rotas que respondem sem tocar no banco: validação, IDs e sessão.

mod common;

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use rstest::rstest;
use serde_json::json;
use tower::ServiceExt;

use backoffice::middleware::session::SESSION_COOKIE;
use common::{body_bytes, body_json, empty_request, json_request, multipart_request, offline_app, offline_state};

#[tokio::test]
async fn health_answers_ok() {
    let response = offline_app()
        .oneshot(empty_request("GET", "/api/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");
}

#[tokio::test]
async fn openapi_document_lists_the_resources() {
    let response = offline_app()
        .oneshot(empty_request("GET", "/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    for path in ["/api/pedidos", "/api/produtos/{id}/image", "/api/login/verificarSenha"] {
        assert!(doc["paths"].get(path).is_some(), "faltou {path}");
    }
}

#[rstest]
#[case("GET", "/api/cargos/abc")]
#[case("GET", "/api/categorias/0")]
#[case("DELETE", "/api/produtos/-4")]
#[case("GET", "/api/pedidos/1.5")]
#[case("DELETE", "/api/pedido-itens/1/x")]
#[tokio::test]
async fn non_numeric_ids_are_rejected(#[case] method: &str, #[case] uri: &str) {
    let response = offline_app()
        .oneshot(empty_request(method, uri))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "ID deve ser um número válido.");
}

#[tokio::test]
async fn malformed_json_is_a_json_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/cargos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = offline_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Dados inválidos.");
    assert!(body["details"]["reason"].is_string());
}

#[tokio::test]
async fn role_without_code_is_rejected() {
    let response = offline_app()
        .oneshot(json_request("POST", "/api/cargos", json!({ "nomecargo": "Gerente" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["code"].is_array());
    assert!(body["details"].get("name").is_none());
}

#[tokio::test]
async fn order_without_customer_employee_or_items_is_rejected() {
    let response = offline_app()
        .oneshot(json_request("POST", "/api/pedidos", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Um ou mais campos são inválidos.");
    for field in ["customerId", "employeeId", "items"] {
        assert!(body["details"][field].is_array(), "faltou {field}");
    }
}

#[tokio::test]
async fn order_with_repeated_product_is_rejected() {
    let payload = json!({
        "customerId": 1,
        "employeeId": 2,
        "items": [
            { "productId": 5, "quantity": 1, "unitPrice": 10.0 },
            { "productId": 5, "quantity": 2, "unitPrice": 10.0 }
        ]
    });

    let response = offline_app()
        .oneshot(json_request("PUT", "/api/pedidos/9", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["items"].is_array());
}

#[tokio::test]
async fn order_total_beyond_the_column_limit_is_rejected() {
    let payload = json!({
        "customerId": 1,
        "employeeId": 2,
        "items": [{ "productId": 5, "quantity": 2147483647, "unitPrice": 1e25 }]
    });

    let response = offline_app()
        .oneshot(json_request("POST", "/api/pedidos", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["items"].is_array());
}

#[tokio::test]
async fn validation_messages_follow_accept_language() {
    let mut request = json_request("POST", "/api/pedidos", json!({ "customerId": 1 }));
    request
        .headers_mut()
        .insert(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9".parse().unwrap());

    let response = offline_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "One or more fields are invalid.");
}

#[tokio::test]
async fn item_update_with_zero_quantity_is_rejected() {
    let response = offline_app()
        .oneshot(json_request(
            "PUT",
            "/api/pedido-itens/3/7",
            json!({ "quantity": 0, "unitPrice": 4.5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn payment_must_be_positive() {
    let response = offline_app()
        .oneshot(json_request(
            "POST",
            "/api/pagamentos",
            json!({ "orderId": 1, "amountPaid": 0, "paymentMethodId": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["amountPaid"].is_array());
}

#[tokio::test]
async fn product_form_without_name_is_rejected() {
    let response = offline_app()
        .oneshot(multipart_request(
            "POST",
            "/api/produtos",
            &[("precounitario", "9,50")],
            Some(("image/png", &b"\x89PNG"[..])),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn product_form_with_negative_price_is_rejected() {
    let response = offline_app()
        .oneshot(multipart_request(
            "POST",
            "/api/produtos",
            &[("nomeproduto", "Suco"), ("precounitario", "-1")],
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["price"].is_array());
}

#[tokio::test]
async fn product_form_with_price_beyond_the_limit_is_rejected() {
    let response = offline_app()
        .oneshot(multipart_request(
            "POST",
            "/api/produtos",
            &[("nomeproduto", "Suco"), ("precounitario", "10000000000")],
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["price"].is_array());
}

// --- Sessão ---

#[tokio::test]
async fn session_check_without_cookie_is_not_logged_in() {
    let response = offline_app()
        .oneshot(empty_request("POST", "/api/login/verificaSeUsuarioEstaLogado"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "not_logged_in" }));
}

#[tokio::test]
async fn tampered_cookie_is_not_logged_in() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/login/verificaSeUsuarioEstaLogado")
        .header(header::COOKIE, format!("{SESSION_COOKIE}=nao-e-um-token"))
        .body(Body::empty())
        .unwrap();

    let response = offline_app().oneshot(request).await.unwrap();

    assert_eq!(body_json(response).await, json!({ "status": "not_logged_in" }));
}

#[tokio::test]
async fn valid_cookie_reports_the_user() {
    let state = offline_state();
    let (_, token) = state.auth_service.create_session(3, "Ana").unwrap();
    let app = backoffice::routes::create_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/login/verificaSeUsuarioEstaLogado")
        .header(header::COOKIE, format!("{SESSION_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        body_json(response).await,
        json!({ "status": "ok", "id": 3, "name": "Ana" })
    );
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let response = offline_app()
        .oneshot(empty_request("POST", "/api/login/logout"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(body_json(response).await, json!({ "status": "logged_out" }));
}

#[rstest]
#[case("/api/login/verificarGerente")]
#[case("/api/login/verificarGerente?idusuario=")]
#[case("/api/login/verificarGerente?idusuario=abc")]
#[tokio::test]
async fn manager_check_needs_a_numeric_user(#[case] uri: &str) {
    let response = offline_app()
        .oneshot(empty_request("GET", uri))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn password_check_requires_email_and_password() {
    let response = offline_app()
        .oneshot(json_request(
            "POST",
            "/api/login/verificarSenha",
            json!({ "email": "ana@restaurante.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["password"].is_array());
}
