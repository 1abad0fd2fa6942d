use std::path::PathBuf;

use crate::error::Result;
use crate::models::PipelineOutput;
use crate::output::ResultWriter;
use crate::pipeline::ResearchPipeline;

#[derive(Debug)]
pub struct ResearchOutcome {
    pub output: PipelineOutput,
    /// `None` when the proposal could not be written; the text is still in `output`.
    pub saved_to: Option<PathBuf>,
}

impl ResearchOutcome {
    pub fn proposal(&self) -> &str {
        self.output.final_output()
    }
}

pub struct ResearchAssistant {
    pipeline: ResearchPipeline,
    writer: ResultWriter,
}

impl ResearchAssistant {
    pub fn new(pipeline: ResearchPipeline, writer: ResultWriter) -> Self {
        Self { pipeline, writer }
    }

    /// Runs the pipeline and persists the proposal. Pipeline errors abort
    /// before anything is written; write errors are logged and swallowed.
    pub async fn research_and_propose(&self, topic: &str) -> Result<ResearchOutcome> {
        let output = self.pipeline.run(topic).await?;

        let saved_to = match self.writer.save(&output.topic, output.final_output()) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!(
                    "Error saving results to {}: {}",
                    self.writer.output_dir().display(),
                    e
                );
                None
            }
        };

        Ok(ResearchOutcome { output, saved_to })
    }
}
