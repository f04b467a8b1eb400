//! Types shared between the admin client crates

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod dashboard;
pub mod errors;
pub mod id;
pub mod list;
pub mod location;
pub mod logs;
mod macros;
pub mod req_args;
pub mod sensor;
pub mod session;
pub mod token;
pub mod uac;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;

