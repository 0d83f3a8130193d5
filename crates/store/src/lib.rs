//! Fragment store implementations for the Upskiller.
//!
//! The response pipeline only sees the read-only [`ResourceStore`] trait.
//! Writes go through [`JsonlStore::replace_all`], driven by the [`Ingestor`].
//!
//! [`ResourceStore`]: upskiller_core::ResourceStore

pub mod embedding;
pub mod ingest;
pub mod jsonl;
pub mod keyword;
pub mod splitter;
pub mod vector;

pub use embedding::{Embedder, ProviderEmbedder};
#[cfg(feature = "local-embeddings")]
pub use embedding::LocalEmbedder;
pub use ingest::{IngestReport, Ingestor};
pub use jsonl::JsonlStore;
pub use splitter::TextSplitter;
pub use vector::{cosine_similarity, reciprocal_rank_fusion, vector_search};
