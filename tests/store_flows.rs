// tests/store_flows.rs
//
// Fluxos completos contra um Postgres real (um banco novo por teste).
// Rode com `DATABASE_URL=... cargo test -- --ignored`.

mod common;

use axum::http::{header, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use backoffice::middleware::session::SESSION_COOKIE;
use common::{app_with_pool, body_bytes, body_json, empty_request, json_request, multipart_request};

struct Fixture {
    user_id: i32,
    customer_id: i32,
    juice_id: i32,
    burger_id: i32,
}

async fn seed(pool: &PgPool) -> Fixture {
    let user_id: i32 = sqlx::query_scalar(
        "INSERT INTO usuario (nomeusuario, email, senha) VALUES ('Ana', 'ana@restaurante.com', 'x') RETURNING idusuario",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let customer_id: i32 = sqlx::query_scalar(
        "INSERT INTO cliente (nomecliente, email) VALUES ('Bruno', 'bruno@mail.com') RETURNING idcliente",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let juice_id: i32 = sqlx::query_scalar(
        "INSERT INTO produto (nomeproduto, precounitario) VALUES ('Suco', 10.00) RETURNING idproduto",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let burger_id: i32 = sqlx::query_scalar(
        "INSERT INTO produto (nomeproduto, precounitario) VALUES ('Hambúrguer', 5.00) RETURNING idproduto",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    Fixture {
        user_id,
        customer_id,
        juice_id,
        burger_id,
    }
}

async fn count_orders(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM pedido")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn order_lifecycle_keeps_total_and_status(pool: PgPool) {
    let f = seed(&pool).await;
    let (app, _) = app_with_pool(pool.clone());

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/pedidos",
            json!({
                "customerId": f.customer_id,
                "employeeId": f.user_id,
                "items": [
                    { "productId": f.juice_id, "quantity": 2, "unitPrice": 10.0 },
                    { "productId": f.burger_id, "quantity": 1, "unitPrice": 5.0 }
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert_eq!(created["total"], json!(25.0));
    let order_id = created["id"].as_i64().unwrap();

    let detail = body_json(
        app.clone()
            .oneshot(empty_request("GET", &format!("/api/pedidos/{order_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(detail["status"], "pending");
    assert_eq!(detail["customerName"], "Bruno");
    assert_eq!(detail["items"].as_array().unwrap().len(), 2);

    // Troca completa dos itens
    let replaced = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/pedidos/{order_id}"),
            json!({
                "customerId": f.customer_id,
                "employeeId": f.user_id,
                "items": [{ "productId": f.burger_id, "quantity": 3, "unitPrice": 5.0 }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(replaced.status(), StatusCode::OK);
    assert_eq!(body_json(replaced).await["total"], json!(15.0));

    // Item avulso recalcula o total
    let added = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/pedido-itens",
            json!({ "orderId": order_id, "productId": f.juice_id, "quantity": 1, "unitPrice": 10.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(added.status(), StatusCode::CREATED);
    assert_eq!(body_json(added).await["total"], json!(25.0));

    let method_id: i32 = sqlx::query_scalar(
        "INSERT INTO formadepagamento (nomeformapagamento) VALUES ('Pix') RETURNING idformapagamento",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let paid = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/pagamentos",
            json!({ "orderId": order_id, "amountPaid": 25.0, "paymentMethodId": method_id }),
        ))
        .await
        .unwrap();
    assert_eq!(paid.status(), StatusCode::CREATED);

    let list = body_json(
        app.clone()
            .oneshot(empty_request("GET", "/api/pedidos"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(list[0]["status"], "paid");

    let deleted = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/pedidos/{order_id}")))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = app
        .oneshot(empty_request("DELETE", &format!("/api/pedidos/{order_id}")))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn order_with_unknown_product_leaves_nothing_behind(pool: PgPool) {
    let f = seed(&pool).await;
    let (app, _) = app_with_pool(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/pedidos",
            json!({
                "customerId": f.customer_id,
                "employeeId": f.user_id,
                "items": [
                    { "productId": f.juice_id, "quantity": 1, "unitPrice": 10.0 },
                    { "productId": 9999, "quantity": 1, "unitPrice": 1.0 }
                ]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count_orders(&pool).await, 0);
}

async fn stored_total_matches_items(pool: &PgPool, order_id: i64) -> bool {
    sqlx::query_scalar(
        r#"
        SELECT p.valortotal = COALESCE(SUM(pp.quantidade * pp.precounitario), 0)
        FROM pedido p
        LEFT JOIN pedidoproduto pp ON pp.idpedido = p.idpedido
        WHERE p.idpedido = $1
        GROUP BY p.valortotal
        "#,
    )
    .bind(order_id as i32)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn fractional_prices_are_stored_in_cents(pool: PgPool) {
    let f = seed(&pool).await;
    let (app, _) = app_with_pool(pool.clone());

    let created = app
        .oneshot(json_request(
            "POST",
            "/api/pedidos",
            json!({
                "customerId": f.customer_id,
                "employeeId": f.user_id,
                "items": [{ "productId": f.juice_id, "quantity": 3, "unitPrice": 0.335 }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert_eq!(created["total"], json!(1.02));

    let order_id = created["id"].as_i64().unwrap();
    assert!(stored_total_matches_items(&pool, order_id).await);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn item_that_overflows_the_total_is_rejected(pool: PgPool) {
    let f = seed(&pool).await;
    let (app, _) = app_with_pool(pool.clone());

    let created = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/pedidos",
                json!({
                    "customerId": f.customer_id,
                    "employeeId": f.user_id,
                    "items": [{ "productId": f.juice_id, "quantity": 1, "unitPrice": 10.0 }]
                }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let order_id = created["id"].as_i64().unwrap();

    // Preço válido, mas quantidade × preço não cabe no total do pedido
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/pedido-itens",
            json!({
                "orderId": order_id,
                "productId": f.burger_id,
                "quantity": 2147483647,
                "unitPrice": 9999.99
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let detail = body_json(
        app.oneshot(empty_request("GET", &format!("/api/pedidos/{order_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(detail["total"], json!(10.0));
    assert_eq!(detail["items"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn role_codes_are_unique(pool: PgPool) {
    let (app, _) = app_with_pool(pool);
    let payload = json!({ "name": "Gerente", "code": "GER" });

    let first = app
        .clone()
        .oneshot(json_request("POST", "/api/cargos", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(json_request("POST", "/api/cargos", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let check = app
        .oneshot(json_request(
            "POST",
            "/api/cargos/verificarCodigo",
            json!({ "code": "GER" }),
        ))
        .await
        .unwrap();
    assert_eq!(check.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(check).await, json!({ "exists": true }));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn product_image_is_served_with_its_type(pool: PgPool) {
    let (app, _) = app_with_pool(pool);
    let png: &[u8] = b"\x89PNG\r\n\x1a\nfake";

    let created = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/api/produtos",
            &[("nomeproduto", "Suco de Uva"), ("precounitario", "8,50")],
            Some(("image/png", png)),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert_eq!(created["price"], json!(8.5));
    assert_eq!(created["hasImage"], json!(true));
    let product_id = created["id"].as_i64().unwrap();

    let image = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/produtos/{product_id}/image")))
        .await
        .unwrap();
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(image.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(body_bytes(image).await, png);

    let plain = body_json(
        app.clone()
            .oneshot(multipart_request(
                "POST",
                "/api/produtos",
                &[("nomeproduto", "Água"), ("precounitario", "3")],
                None,
            ))
            .await
            .unwrap(),
    )
    .await;
    let missing = app
        .oneshot(empty_request(
            "GET",
            &format!("/api/produtos/{}/image", plain["id"]),
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn product_image_is_replaced_on_update(pool: PgPool) {
    let (app, _) = app_with_pool(pool);
    let png: &[u8] = b"\x89PNG\r\n\x1a\nprimeira";
    let jpeg: &[u8] = b"\xff\xd8\xff\xe0segunda";

    let created = body_json(
        app.clone()
            .oneshot(multipart_request(
                "POST",
                "/api/produtos",
                &[("nomeproduto", "Pastel"), ("precounitario", "6")],
                None,
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(created["hasImage"], json!(false));
    let uri = format!("/api/produtos/{}", created["id"]);
    let image_uri = format!("{uri}/image");

    for (content_type, bytes) in [("image/png", png), ("image/jpeg", jpeg)] {
        let updated = app
            .clone()
            .oneshot(multipart_request("PUT", &uri, &[], Some((content_type, bytes))))
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        let updated = body_json(updated).await;
        assert_eq!(updated["hasImage"], json!(true));
        assert_eq!(updated["name"], "Pastel");

        let image = app
            .clone()
            .oneshot(empty_request("GET", &image_uri))
            .await
            .unwrap();
        assert_eq!(image.status(), StatusCode::OK);
        assert_eq!(image.headers()[header::CONTENT_TYPE], content_type);
        assert_eq!(body_bytes(image).await, bytes);
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn login_sets_the_session_cookie(pool: PgPool) {
    let (app, _) = app_with_pool(pool.clone());

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/usuarios",
            json!({ "name": "Carla", "email": "carla@restaurante.com", "password": "s3nha" }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert!(created.get("password").is_none());

    let stored: String = sqlx::query_scalar("SELECT senha FROM usuario WHERE email = $1")
        .bind("carla@restaurante.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(stored.starts_with("$2"));

    let wrong = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login/verificarSenha",
            json!({ "email": "carla@restaurante.com", "senha": "errada" }),
        ))
        .await
        .unwrap();
    assert!(wrong.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body_json(wrong).await, json!({ "status": "incorrect" }));

    let ok = app
        .oneshot(json_request(
            "POST",
            "/api/login/verificarSenha",
            json!({ "email": "carla@restaurante.com", "senha": "s3nha" }),
        ))
        .await
        .unwrap();
    let set_cookie = ok.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(set_cookie.contains("HttpOnly"));
    assert_eq!(body_json(ok).await["status"], "ok");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn legacy_cleartext_password_still_logs_in(pool: PgPool) {
    let f = seed(&pool).await;
    let (_, state) = app_with_pool(pool);

    let session = state
        .auth_service
        .login("ana@restaurante.com", "x")
        .await
        .unwrap();

    let (claims, _) = session.expect("senha antiga deveria conferir");
    assert_eq!(claims.sub, f.user_id);
    assert_eq!(claims.name, "Ana");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn manager_is_the_employee_with_the_configured_role(pool: PgPool) {
    let f = seed(&pool).await;
    let (app, _) = app_with_pool(pool.clone());

    // Banco novo: o primeiro cargo recebe o ID 1, o padrão de MANAGER_ROLE_ID
    sqlx::query("INSERT INTO cargos (nomecargo, codigocargo) VALUES ('Gerente', 'GER')")
        .execute(&pool)
        .await
        .unwrap();

    let before = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/api/login/verificarGerente?idusuario={}", f.user_id),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(before).await, json!({ "isManager": false }));

    let employee = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/funcionarios",
            json!({ "name": "Ana", "roleId": 1, "userId": f.user_id }),
        ))
        .await
        .unwrap();
    assert_eq!(employee.status(), StatusCode::CREATED);

    let after = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/api/login/verificarGerente?idusuario={}", f.user_id),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(after).await, json!({ "isManager": true }));

    // Mesma conta em outro funcionário
    let duplicate = app
        .oneshot(json_request(
            "POST",
            "/api/funcionarios",
            json!({ "name": "Ana 2", "userId": f.user_id }),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn category_in_use_cannot_be_deleted(pool: PgPool) {
    let (app, _) = app_with_pool(pool.clone());

    let category = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/categorias",
                json!({ "name": "Bebidas", "description": "Sucos e refrigerantes" }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let category_id = category["id"].as_i64().unwrap();

    sqlx::query("INSERT INTO produto (nomeproduto, precounitario, idcategoria) VALUES ('Suco', 7, $1)")
        .bind(category_id as i32)
        .execute(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(empty_request("DELETE", &format!("/api/categorias/{category_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
