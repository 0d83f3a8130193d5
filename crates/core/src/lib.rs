//! # Upskiller Core
//!
//! Domain types, traits, and error definitions for the Semiconductor
//! Logistics AI-Upskiller. This crate has **zero framework dependencies**:
//! it defines the model every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Every external service is a trait here:
//! - [`Provider`]: hosted LLM inference (complete, stream, embed)
//! - [`ResourceStore`]: read-only similarity lookup over ingested fragments
//! - [`WebSearch`]: best-effort web search returning a structured failure
//!
//! Implementations live in their own crates, so the pipeline can be tested
//! with scripted stand-ins.

pub mod error;
pub mod learner;
pub mod message;
pub mod mode;
pub mod provider;
pub mod retrieval;
pub mod search;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use learner::{JobRole, LiteracyLevel};
pub use message::{Message, Role};
pub use mode::Mode;
pub use provider::{Provider, ProviderRequest, ProviderResponse, StreamChunk};
pub use retrieval::{Fragment, FragmentQuery, Provenance, ResourceStore};
pub use search::{SearchFailure, SearchResult, WebSearch};
