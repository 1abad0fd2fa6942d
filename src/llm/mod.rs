pub mod provider;
pub mod gemini;
pub mod prompts;

pub use provider::LLMProvider;
pub use gemini::GeminiProvider;
pub use prompts::{AgentProfile, StagePrompt};
