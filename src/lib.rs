pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod llm;
pub mod search;
pub mod pipeline;
pub mod output;
pub mod assistant;

pub use assistant::{ResearchAssistant, ResearchOutcome};
pub use config::{Config, PipelineConfig, ResearchConfig};
pub use credentials::{check_credentials, CredentialReport, REQUIRED_KEYS};
pub use error::{Error, Result};
pub use llm::{GeminiProvider, LLMProvider};
pub use output::ResultWriter;
pub use pipeline::ResearchPipeline;
pub use search::{SearchTool, SerperClient};
