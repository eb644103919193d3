//! Backend library modules.
//!
//! The crate is laid out hexagonally: `domain` holds entities, invariants,
//! and the services implementing the driving ports; `inbound` adapts HTTP to
//! those ports; `outbound` adapts the driven ports to PostgreSQL and the
//! notifier; `server` wires everything into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Request tracing middleware attaching a `Trace-Id` header.
pub use middleware::trace::Trace;
