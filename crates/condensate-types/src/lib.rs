//! # condensate-types
//!
//! Shared domain types for the Condensate client SDK.
//!
//! This crate defines the data structures exchanged with the memory store:
//! - Episodic items: raw text submitted for ingestion
//! - Assertions: learned facts returned by the store
//! - Admin views: ingested memory records and store statistics
//! - Retrieval: question/answer payloads for the memory router
//! - Settings: layered client configuration
//!
//! ## Usage
//!
//! ```rust
//! use condensate_types::{EpisodicItem, Source};
//!
//! let item = EpisodicItem::new("proj-1", Source::Note, "Cats are mammals");
//! assert!(item.validate().is_ok());
//! ```

pub mod admin;
pub mod assertion;
pub mod config;
pub mod error;
pub mod item;
pub mod retrieve;

pub use admin::{MemoryRecord, StoreStats};
pub use assertion::Assertion;
pub use config::{Settings, DEFAULT_TIMEOUT_SECS, DEFAULT_URL};
pub use error::CondensateError;
pub use item::{EpisodicItem, Source};
pub use retrieve::{RetrieveRequest, RetrieveResponse};
