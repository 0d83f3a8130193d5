//! Context management: turning a query into the text bound into a prompt.

pub mod assembler;

pub use assembler::{AssembledContext, AssemblerSettings, ContextAssembler, WebOutcome, WEB_RESULTS_HEADER};
