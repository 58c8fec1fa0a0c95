//! Edukit Store - storage interface and persistence gateway
//!
//! - [`Repository`]: keyed async storage for any [`Entity`]
//! - [`InMemoryRepository`]: a `HashMap` behind one mutex
//! - [`StoreGateway`]: the content [`PersistenceGateway`](edukit_content::PersistenceGateway)
//!   over a repository, assigning ids and timestamps
//! - [`AuditLog`]: hash-chained record of applied writes

#![warn(unreachable_pub)]

pub mod audit;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod repository;

pub use audit::{verify_chain, AuditAction, AuditEvent, AuditLog, EventId};
pub use error::{AuditError, StoreError};
pub use gateway::StoreGateway;
pub use memory::InMemoryRepository;
pub use repository::{require, Entity, Repository};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
