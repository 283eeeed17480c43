//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (params, loading, navigation)
//! and delegates rendering details to `components`.

pub mod dashboard;
pub mod entity_edit;
pub mod entity_list;
pub mod landing;
pub mod login;
