pub mod health_handlers;
pub mod page_handlers;
pub mod viewer;
