// src/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo da API sobre o estado já criado.
pub fn create_router(app_state: AppState) -> Router {
    let login_routes = Router::new()
        .route("/verificarEmail", post(handlers::auth::verify_email))
        .route("/verificarSenha", post(handlers::auth::verify_password))
        .route(
            "/verificaSeUsuarioEstaLogado",
            post(handlers::auth::session_status),
        )
        .route("/logout", post(handlers::auth::logout))
        .route("/verificarGerente", get(handlers::auth::check_manager));

    let role_routes = Router::new()
        .route(
            "/",
            get(handlers::roles::list_roles).post(handlers::roles::create_role),
        )
        .route("/verificarCodigo", post(handlers::roles::check_role_code))
        .route(
            "/{id}",
            get(handlers::roles::get_role)
                .put(handlers::roles::update_role)
                .delete(handlers::roles::delete_role),
        );

    let category_routes = Router::new()
        .route(
            "/",
            get(handlers::categories::list_categories).post(handlers::categories::create_category),
        )
        .route(
            "/{id}",
            get(handlers::categories::get_category)
                .put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        );

    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::people::list_users).post(handlers::people::create_user),
        )
        .route(
            "/{id}",
            get(handlers::people::get_user)
                .put(handlers::people::update_user)
                .delete(handlers::people::delete_user),
        );

    let customer_routes = Router::new()
        .route(
            "/",
            get(handlers::people::list_customers).post(handlers::people::create_customer),
        )
        .route("/usuario/{id}", get(handlers::people::get_customer_for_user))
        .route(
            "/{id}",
            get(handlers::people::get_customer)
                .put(handlers::people::update_customer)
                .delete(handlers::people::delete_customer),
        );

    let employee_routes = Router::new()
        .route(
            "/",
            get(handlers::people::list_employees).post(handlers::people::create_employee),
        )
        .route(
            "/{id}",
            get(handlers::people::get_employee)
                .put(handlers::people::update_employee)
                .delete(handlers::people::delete_employee),
        );

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/{id}/image", get(handlers::products::get_product_image));

    let order_routes = Router::new()
        .route(
            "/",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/clientes", get(handlers::orders::list_customer_options))
        .route("/funcionarios", get(handlers::orders::list_employee_options))
        .route("/produtos", get(handlers::orders::list_product_options))
        .route(
            "/{id}",
            get(handlers::orders::get_order)
                .put(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        );

    let order_item_routes = Router::new()
        .route("/", post(handlers::orders::add_order_item))
        .route("/{id}", get(handlers::orders::list_order_items))
        .route(
            "/{order_id}/{product_id}",
            put(handlers::orders::update_order_item).delete(handlers::orders::delete_order_item),
        );

    let payment_method_routes = Router::new()
        .route(
            "/",
            get(handlers::finance::list_payment_methods)
                .post(handlers::finance::create_payment_method),
        )
        .route(
            "/{id}",
            get(handlers::finance::get_payment_method)
                .put(handlers::finance::update_payment_method)
                .delete(handlers::finance::delete_payment_method),
        );

    let payment_routes = Router::new().route(
        "/",
        get(handlers::finance::list_payments).post(handlers::finance::register_payment),
    );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/login", login_routes)
        .nest("/api/cargos", role_routes)
        .nest("/api/categorias", category_routes)
        .nest("/api/usuarios", user_routes)
        .nest("/api/pessoas", customer_routes)
        .nest("/api/funcionarios", employee_routes)
        .nest("/api/produtos", product_routes)
        .nest("/api/pedidos", order_routes)
        .nest("/api/pedido-itens", order_item_routes)
        .nest("/api/formas-pagamento", payment_method_routes)
        .nest("/api/pagamentos", payment_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
