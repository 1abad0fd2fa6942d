pub mod stage;
pub mod runner;

pub use stage::{build_stages, Stage};
pub use runner::ResearchPipeline;
