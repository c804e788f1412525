pub mod i18n;
pub mod json_body;
pub mod path_ids;
pub mod session;
