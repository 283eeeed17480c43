//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `table`, `form`, `toast`) so components
//! depend on small focused models that test without a browser.

pub mod auth;
pub mod form;
pub mod table;
pub mod toast;
