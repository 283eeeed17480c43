//! Services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own outbound calls and session bookkeeping so route
//! handlers can stay focused on protocol translation and cookie plumbing.

pub mod assets;
pub mod auth;
pub mod backend;
pub mod session;
