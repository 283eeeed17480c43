//! Networking modules for the dashboard's HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls to the server's `/api` proxy and `types` defines
//! the shared wire schema.

pub mod api;
pub mod types;
