use async_trait::async_trait;
use crate::error::Result;
use crate::models::{Completion, CompletionRequest};

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion>;
    fn name(&self) -> &str;
}
