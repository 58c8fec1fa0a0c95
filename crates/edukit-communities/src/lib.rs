//! Edukit Communities - learning communities for teachers
//!
//! Operations are registered in a [`CommandTable`] by name. Each takes a
//! JSON object that is checked against the JSON Schema of its typed input,
//! then runs against [`CommunityService`] over the storage interface.
//!
//! # Example
//!
//! ```rust,no_run
//! use edukit_communities::{CommandTable, CommunitiesConfig, CommunityService};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), edukit_communities::CommunityError> {
//! let service = Arc::new(CommunityService::in_memory(CommunitiesConfig::default()));
//! let table = CommandTable::with_defaults(service)?;
//! let community = table
//!     .dispatch(
//!         "create_community",
//!         json!({ "name": "KS2 Maths", "description": "", "ownerId": "t-1" }),
//!     )
//!     .await?;
//! println!("{}", community["id"]);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod input;
pub mod model;
pub mod seed;
pub mod service;
pub mod table;

pub use error::CommunityError;
pub use model::{Community, Discussion, Reply};
pub use seed::{load_seed, parse_seed, SeedCommunity};
pub use service::{CommunitiesConfig, CommunityService, DEFAULT_MAX_NAME_LENGTH};
pub use table::{CommandTable, Request, Response};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
