pub mod auth;
pub mod categories;
pub mod finance;
pub mod orders;
pub mod people;
pub mod products;
pub mod roles;
