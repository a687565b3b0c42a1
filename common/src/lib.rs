//! Types shared between the OctaVision backend and its clients.
//!
//! - `model`: the documents persisted in the store (organizations, users,
//!   cameras, configurations, groups, servers) plus the VSS wire types.
//! - `requests`: JSON payloads accepted and returned by the HTTP API.
//! - `wizard`: the three-step add-camera state machine.
//! - `validation`: field rules reused by the wizard and by the backend.

pub mod language;
pub mod model;
pub mod requests;
pub mod validation;
pub mod wizard;
