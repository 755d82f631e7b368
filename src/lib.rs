#![doc = "The `taskman` library crate."]
#![doc = ""]
#![doc = "Contains the domain models, authentication machinery (password hashing,"]
#![doc = "opaque bearer tokens, middleware), route handlers, and error handling for"]
#![doc = "the taskman API. The binary in `main.rs` wires these into an HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
