//! # User Service Module
//!
//! Membership and roles. Joining and listing are reached through
//! `/api/organizations/{organization_id}/users` and are registered by the
//! organizations scope; role changes and removal live under `/api/users`.
//!
//! Every write that can take a role away from someone carries a count
//! invariant: an organization keeps at least one `user-admin` and the system
//! keeps at least one `system-admin`. The check runs inside the write
//! transaction, so two administrators demoting each other at the same time
//! cannot both succeed.

mod delete;
pub(super) mod join;
pub(super) mod list;
mod role;

use crate::store::{collections, Bound, Filter, WriteBatch};
use actix_web::web::{delete as delete_route, put, scope};
use actix_web::Scope;
use common::model::user::{Role, User};

const API_PATH: &str = "/api/users";

const LAST_USER_ADMIN: &str = "An organization must keep at least one user-admin.";
const LAST_SYSTEM_ADMIN: &str = "At least one system-admin must remain.";

/// # Registered Routes:
///
/// *   **`PUT /{user_id}/role`**: `role::process`
/// *   **`DELETE /{user_id}`**: `delete::process`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{user_id}/role", put().to(role::process))
        .route("/{user_id}", delete_route().to(delete::process))
}

/// Adds the admin-count invariants for `user` losing its current role
/// (demotion or removal), plus a guard that the role is still the one read.
fn guard_role_loss(batch: &mut WriteBatch, user_id: &str, user: &User) {
    batch.require_field_equals(collections::USERS, user_id, "role", user.role.as_str());
    match (user.role, user.organization_id.as_deref()) {
        (Role::UserAdmin, Some(organization_id)) => {
            batch.ensure_count(
                collections::USERS,
                vec![
                    Filter::eq("organizationId", organization_id),
                    Filter::eq("role", Role::UserAdmin.as_str()),
                ],
                Bound::AtLeast(1),
                LAST_USER_ADMIN,
            );
        }
        (Role::SystemAdmin, _) => {
            batch.ensure_count(
                collections::USERS,
                vec![Filter::eq("role", Role::SystemAdmin.as_str())],
                Bound::AtLeast(1),
                LAST_SYSTEM_ADMIN,
            );
        }
        _ => {}
    }
}
