pub mod category_repo;
pub use category_repo::CategoryRepository;
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod role_repo;
pub use role_repo::RoleRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
