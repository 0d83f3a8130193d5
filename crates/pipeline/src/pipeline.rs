//! The response pipeline: dispatch → assemble → compose → stream.
//!
//! # Flow
//!
//! 1. Select the [`ContextStrategy`](crate::ContextStrategy) for the mode
//! 2. Assemble context (store always, web in search mode)
//! 3. Compose the prompt
//! 4. Open a provider stream and hand the caller an ordered text stream
//!
//! There are no retries. Dropping the returned stream cancels consumption.

use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{debug, info};
use upskiller_core::provider::StreamChunk;
use upskiller_core::{Error, JobRole, LiteracyLevel, Mode, Provider, ProviderRequest};

use crate::context::{AssembledContext, ContextAssembler};
use crate::dispatch::dispatch;
use crate::prompt::{compose, ComposedPrompt};

/// Ordered text chunks of a model answer.
pub type ResponseStream = Pin<Box<dyn Stream<Item = upskiller_core::Result<String>> + Send>>;

/// One learner request.
#[derive(Debug, Clone)]
pub struct LearnerRequest {
    pub query: String,
    pub role: JobRole,
    pub level: LiteracyLevel,
    pub mode: Mode,
}

impl LearnerRequest {
    pub fn new(query: impl Into<String>, role: JobRole, level: LiteracyLevel, mode: Mode) -> Self {
        Self {
            query: query.into(),
            role,
            level,
            mode,
        }
    }
}

/// A prepared prompt together with the context it was built from.
#[derive(Debug, Clone)]
pub struct PreparedPrompt {
    pub prompt: ComposedPrompt,
    pub context: AssembledContext,
}

/// A streaming answer plus the context that produced it.
pub struct PipelineResponse {
    pub context: AssembledContext,
    pub stream: ResponseStream,
}

/// Drives one request from query to streamed answer.
pub struct ResponsePipeline {
    provider: Arc<dyn Provider>,
    assembler: ContextAssembler,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl ResponsePipeline {
    pub fn new(
        provider: Arc<dyn Provider>,
        assembler: ContextAssembler,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            assembler,
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Assemble context and compose the prompt without calling the model.
    pub async fn prepare(&self, request: &LearnerRequest) -> upskiller_core::Result<PreparedPrompt> {
        let strategy = dispatch(request.mode);
        let context = self.assembler.assemble(&request.query, &strategy).await?;
        let prompt = compose(&context.text, request.role, request.level, request.mode, &request.query);

        debug!(mode = %request.mode, prompt_len = prompt.as_str().len(), "Prompt composed");
        Ok(PreparedPrompt { prompt, context })
    }

    /// Run the full pipeline and stream the answer.
    pub async fn respond(&self, request: &LearnerRequest) -> upskiller_core::Result<PipelineResponse> {
        info!(mode = %request.mode, role = %request.role, level = %request.level, "Pipeline: request received");

        let PreparedPrompt { prompt, context } = self.prepare(request).await?;

        let mut provider_request =
            ProviderRequest::from_prompt(&self.model, prompt.into_string(), self.temperature);
        provider_request.max_tokens = self.max_tokens;
        provider_request.stream = true;

        let rx = self.provider.stream(provider_request).await?;
        debug!(provider = %self.provider.name(), model = %self.model, "Pipeline: stream opened");

        let stream = ReceiverStream::new(rx).filter_map(chunk_text);

        Ok(PipelineResponse {
            context,
            stream: Box::pin(stream),
        })
    }
}

/// Keep non-empty text deltas and errors; drop bookkeeping chunks.
fn chunk_text(
    item: Result<StreamChunk, upskiller_core::error::ProviderError>,
) -> Option<upskiller_core::Result<String>> {
    match item {
        Ok(chunk) => chunk.content.filter(|c| !c.is_empty()).map(Ok),
        Err(e) => Some(Err(Error::Provider(e))),
    }
}

/// Drain a response stream into one string, stopping at the first error.
pub async fn collect_text(mut stream: ResponseStream) -> upskiller_core::Result<String> {
    let mut out = String::new();
    while let Some(chunk) = stream.next().await {
        out.push_str(&chunk?);
    }
    Ok(out)
}
