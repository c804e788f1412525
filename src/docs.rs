// src/docs.rs

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::middleware::session::SESSION_COOKIE;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Login ---
        handlers::auth::verify_email,
        handlers::auth::verify_password,
        handlers::auth::session_status,
        handlers::auth::logout,
        handlers::auth::check_manager,

        // --- Cargos ---
        handlers::roles::list_roles,
        handlers::roles::create_role,
        handlers::roles::get_role,
        handlers::roles::update_role,
        handlers::roles::delete_role,
        handlers::roles::check_role_code,

        // --- Categorias ---
        handlers::categories::list_categories,
        handlers::categories::create_category,
        handlers::categories::get_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- Usuários ---
        handlers::people::list_users,
        handlers::people::create_user,
        handlers::people::get_user,
        handlers::people::update_user,
        handlers::people::delete_user,

        // --- Clientes ---
        handlers::people::list_customers,
        handlers::people::create_customer,
        handlers::people::get_customer,
        handlers::people::get_customer_for_user,
        handlers::people::update_customer,
        handlers::people::delete_customer,

        // --- Funcionários ---
        handlers::people::list_employees,
        handlers::people::create_employee,
        handlers::people::get_employee,
        handlers::people::update_employee,
        handlers::people::delete_employee,

        // --- Produtos ---
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::get_product_image,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Pedidos ---
        handlers::orders::list_orders,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,
        handlers::orders::list_customer_options,
        handlers::orders::list_employee_options,
        handlers::orders::list_product_options,

        // --- Itens de Pedido ---
        handlers::orders::list_order_items,
        handlers::orders::add_order_item,
        handlers::orders::update_order_item,
        handlers::orders::delete_order_item,

        // --- Financeiro ---
        handlers::finance::list_payment_methods,
        handlers::finance::create_payment_method,
        handlers::finance::get_payment_method,
        handlers::finance::update_payment_method,
        handlers::finance::delete_payment_method,
        handlers::finance::list_payments,
        handlers::finance::register_payment,
    ),
    components(
        schemas(
            // --- Login ---
            models::auth::VerifyEmailPayload,
            models::auth::EmailCheck,
            models::auth::VerifyPasswordPayload,
            models::auth::LoginOutcome,
            models::auth::SessionStatus,
            models::auth::ManagerCheck,

            // --- Cadastros ---
            models::roles::Role,
            models::roles::CreateRolePayload,
            models::roles::UpdateRolePayload,
            models::roles::CheckRoleCodePayload,
            models::roles::RoleCodeCheck,
            models::categories::Category,
            models::categories::CreateCategoryPayload,
            models::categories::UpdateCategoryPayload,

            // --- Pessoas ---
            models::people::User,
            models::people::CreateUserPayload,
            models::people::UpdateUserPayload,
            models::people::Customer,
            models::people::CreateCustomerPayload,
            models::people::UpdateCustomerPayload,
            models::people::CustomerLink,
            models::people::EmployeeView,
            models::people::CreateEmployeePayload,
            models::people::UpdateEmployeePayload,

            // --- Produtos ---
            models::products::ProductView,
            models::products::ProductUpload,

            // --- Pedidos ---
            models::orders::PaymentStatus,
            models::orders::LineItemPayload,
            models::orders::OrderPayload,
            models::orders::AddItemPayload,
            models::orders::UpdateItemPayload,
            models::orders::OrderSummary,
            models::orders::OrderHeader,
            models::orders::OrderItemView,
            models::orders::OrderDetail,
            models::orders::OrderCreated,
            models::orders::CustomerOption,
            models::orders::EmployeeOption,
            models::orders::ProductOption,

            // --- Financeiro ---
            models::finance::PaymentMethod,
            models::finance::CreatePaymentMethodPayload,
            models::finance::UpdatePaymentMethodPayload,
            models::finance::Payment,
            models::finance::PaymentView,
            models::finance::RegisterPaymentPayload,
        )
    ),
    tags(
        (name = "Login", description = "Sessão do back-office"),
        (name = "Cargos", description = "Cargos dos funcionários"),
        (name = "Categorias", description = "Categorias de produtos"),
        (name = "Usuários", description = "Contas de acesso"),
        (name = "Clientes", description = "Cadastro de clientes"),
        (name = "Funcionários", description = "Cadastro de funcionários"),
        (name = "Produtos", description = "Cardápio e imagens"),
        (name = "Pedidos", description = "Pedidos e listas de apoio"),
        (name = "Itens de Pedido", description = "Alteração item a item"),
        (name = "Financeiro", description = "Formas de pagamento e pagamentos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}
