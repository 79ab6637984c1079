//! Client library for the Condensate memory store.
//!
//! This crate provides:
//! - `CondensateClient` for ingesting episodic items and querying assertions
//! - `Transport` / `HttpTransport`, the HTTP seam the client sends through
//! - The response adapter that validates loosely typed learnings records
//!
//! # Example
//!
//! ```rust,no_run
//! use condensate_client::{ClientConfig, CondensateClient, EpisodicItem, Source};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://localhost:8000").with_api_key("sk-local");
//!     let client = CondensateClient::new(config)?;
//!
//!     let item = EpisodicItem::new("proj-1", Source::Note, "Cats are mammals");
//!     client.add_item(&item).await?;
//!
//!     for assertion in client.query_assertions("mammals").await? {
//!         println!("{}", assertion);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use adapter::{decode_assertions, decode_memories, decode_object, LearningRecord};
pub use client::{
    filter_assertions, CondensateClient, LEARNINGS_PATH, MEMORIES_PATH, RETRIEVE_PATH, STATS_PATH,
};
pub use config::ClientConfig;
pub use error::{ClientError, FieldProblem};
pub use transport::{HttpTransport, RawResponse, Transport};

// Re-export domain types for convenience
pub use condensate_types::{
    Assertion, EpisodicItem, MemoryRecord, RetrieveRequest, RetrieveResponse, Source, StoreStats,
};
