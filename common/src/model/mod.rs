//! Documents persisted in the store and the VSS wire types.

pub mod alert;
pub mod camera;
pub mod configuration;
pub mod document;
pub mod group;
pub mod organization;
pub mod server;
pub mod user;
pub mod vss;
