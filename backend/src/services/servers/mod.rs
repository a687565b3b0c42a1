//! # Server Service Module
//!
//! Registry of VSS processing servers. Exactly one server may carry
//! `isSystemDefault`; it is the one the VSS client talks to. Every change of
//! the default is a single batch that clears the other flags, sets the new
//! one and re-counts defaults before committing, then drops the cached VSS
//! base URL so the next proxy call picks the new server up.
//!
//! ## Sub-modules:
//! - `create`: registers a server, optionally as the new default.
//! - `list`: all servers.
//! - `default`: makes a server the default, or stops it being the default.
//! - `delete`: removes a non-default server and clears organization preferences pointing at it.

mod create;
mod default;
mod delete;
mod list;

use crate::store::{collections, Bound, DocumentStore, Filter, StoreError, WriteBatch};
use actix_web::web::{delete as delete_route, get, post, put, scope};
use actix_web::Scope;
use common::model::server::Server;
use serde_json::json;

const API_PATH: &str = "/api/servers";

const SINGLE_DEFAULT: &str = "Only one server can be the system default.";
const DEFAULT_REQUIRED: &str = "A system default server is required.";

/// # Registered Routes:
///
/// *   **`POST /`**: `create::process`
/// *   **`GET /`**: `list::process`
/// *   **`PUT /{server_id}/default`**: `default::set`
/// *   **`DELETE /{server_id}/default`**: `default::unset`
/// *   **`DELETE /{server_id}`**: `delete::process`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("", get().to(list::process))
        .route("/{server_id}/default", put().to(default::set))
        .route("/{server_id}/default", delete_route().to(default::unset))
        .route("/{server_id}", delete_route().to(delete::process))
}

/// Queues the writes that make `server_id` the only default: every other
/// default is cleared and the count is checked to be exactly one.
fn make_default(
    store: &DocumentStore,
    batch: &mut WriteBatch,
    server_id: &str,
) -> Result<(), StoreError> {
    let defaults = store.list::<Server>(
        collections::SERVERS,
        &[Filter::eq("isSystemDefault", true)],
    )?;
    for other in defaults.iter().filter(|s| s.id != server_id) {
        batch.update(
            collections::SERVERS,
            &other.id,
            json!({ "isSystemDefault": false }),
        );
    }
    batch
        .ensure_count(
            collections::SERVERS,
            vec![Filter::eq("isSystemDefault", true)],
            Bound::AtMost(1),
            SINGLE_DEFAULT,
        )
        .ensure_count(
            collections::SERVERS,
            vec![Filter::eq("isSystemDefault", true)],
            Bound::AtLeast(1),
            DEFAULT_REQUIRED,
        );
    Ok(())
}

#[cfg(test)]
mod testing {
    use common::model::server::{Protocol, Server, ServerStatus};

    pub fn server(name: &str, address: &str, is_system_default: bool) -> Server {
        Server {
            name: name.into(),
            ip_address_with_port: address.into(),
            protocol: Protocol::Http,
            status: ServerStatus::Online,
            is_system_default,
        }
    }
}
