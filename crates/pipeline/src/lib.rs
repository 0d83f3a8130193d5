//! The response pipeline: the heart of the Upskiller.
//!
//! A request flows through four stages:
//!
//! 1. **Dispatch** the mode into a [`ContextStrategy`]
//! 2. **Assemble** context: fragments from the store (always), web results
//!    (search mode only, best-effort)
//! 3. **Compose** one prompt from context, role, literacy level and mode
//! 4. **Stream** the model's answer back chunk by chunk
//!
//! Only a store failure or a provider failure crosses this boundary as an
//! error. A failed web search degrades into a marker inside the context.

pub mod context;
pub mod dispatch;
pub mod pipeline;
pub mod prompt;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use context::{AssembledContext, AssemblerSettings, ContextAssembler, WebOutcome};
pub use dispatch::{dispatch, ContextStrategy, ModeInstructions};
pub use pipeline::{
    collect_text, LearnerRequest, PipelineResponse, PreparedPrompt, ResponsePipeline, ResponseStream,
};
pub use prompt::{compose, ComposedPrompt};
