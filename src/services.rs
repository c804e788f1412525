pub mod auth;
pub mod category_service;
pub mod customer_service;
pub mod employee_service;
pub mod finance_service;
pub mod order_service;
pub mod product_service;
pub mod role_service;
pub mod user_service;
