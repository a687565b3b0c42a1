//! HTTP endpoints, one sub-module per area. Each area exposes
//! `configure_routes()` returning its actix `Scope`, except the suggestion
//! endpoints, which sit directly under `/api`.

pub mod alerts;
pub mod cameras;
pub mod groups;
pub mod organizations;
pub mod servers;
pub mod suggestions;
pub mod users;
pub mod vss;

use crate::error::ApiError;
use actix_web::web;

/// JSON extractor settings: body size limit and `{"error"}` bodies for
/// payloads that fail to parse.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::bad_request(format!("Invalid JSON body: {err}")).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(format!("Invalid query string: {err}")).into())
}

/// Registers every area on an app or test service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(suggestions::configure)
        .service(organizations::configure_routes())
        .service(users::configure_routes())
        .service(servers::configure_routes())
        .service(groups::configure_routes())
        .service(cameras::configure_routes())
        .service(alerts::configure_routes())
        .service(vss::configure_routes());
}

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Builds the full app over `state` for handler tests.
#[cfg(test)]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($crate::services::json_config(10 * 1024 * 1024))
                .app_data($crate::services::query_config())
                .app_data(actix_web::web::Data::new($state))
                .configure($crate::services::configure),
        )
        .await
    };
}
#[cfg(test)]
pub(crate) use test_app;
