//! Backend contract shared by the admin UI and the server-side proxy.
//!
//! SYSTEM CONTEXT
//! ==============
//! The fitness backend is a separate REST service. Both halves of the
//! dashboard speak to it through the types in this crate: the browser builds
//! page queries and reads list envelopes, the server turns entity operations
//! into concrete backend requests and maps failures into `GatewayError`.
//!
//! DESIGN
//! ======
//! Nothing here performs I/O. Requests are plain descriptions
//! (`ApiRequest`) so the HTTP executor can live wherever the transport does
//! and every path/header rule stays unit-testable.

pub mod asset;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod query;
pub mod request;

pub use entity::EntityKind;
pub use envelope::{ItemEnvelope, ListData, ListEnvelope, ensure_success};
pub use error::GatewayError;
pub use query::{ListParams, PageQuery};
pub use request::{ApiRequest, Body, Method};
