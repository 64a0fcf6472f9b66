pub mod app_state;
pub mod http_error;
pub mod oauth;
pub mod page;
pub mod routes;
pub mod schema;
pub mod session;
