pub mod auth_handler;
pub mod health_handler;
pub mod page_handler;
pub mod quiz_handler;
