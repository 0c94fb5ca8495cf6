/// HTTP request handlers
///
/// Thin layer over the services: parse the request, call the service,
/// translate the result. All policy lives below this module.
pub mod auth;
pub mod feed;
pub mod images;
pub mod users;
pub mod ws;
