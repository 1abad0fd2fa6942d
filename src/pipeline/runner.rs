use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::llm::LLMProvider;
use crate::models::{Completion, Message, PipelineOutput, StageResult, ToolCall};
use crate::pipeline::stage::{build_stages, Stage};
use crate::search::{SearchTool, WEB_SEARCH_TOOL};

const DEFAULT_SEARCH_RESULTS: u32 = 10;

pub struct ResearchPipeline {
    llm: Arc<dyn LLMProvider>,
    search: Arc<dyn SearchTool>,
    config: PipelineConfig,
}

impl ResearchPipeline {
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        search: Arc<dyn SearchTool>,
        config: PipelineConfig,
    ) -> Self {
        Self { llm, search, config }
    }

    /// Runs every stage in order. The first failing stage aborts the run and
    /// its error is returned as-is.
    pub async fn run(&self, topic: &str) -> Result<PipelineOutput> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Error::EmptyTopic);
        }

        let stages = build_stages(topic, &self.config.research);
        let total = stages.len();
        let mut completed: Vec<StageResult> = Vec::with_capacity(total);

        for (i, stage) in stages.iter().enumerate() {
            tracing::info!(
                "Stage {}/{}: {} ({})",
                i + 1,
                total,
                stage.kind,
                stage.agent.role
            );

            let spinner = self.spinner(&format!("[{}/{}] {}", i + 1, total, stage.kind));
            let result = self.run_stage(stage, &completed).await;
            spinner.finish_and_clear();

            let output = result.map_err(|e| {
                tracing::error!("{} stage failed: {}", stage.kind, e);
                e
            })?;

            tracing::info!("{} finished ({} chars)", stage.kind, output.len());
            tracing::debug!("{} output:\n{}", stage.kind, output);

            completed.push(StageResult {
                kind: stage.kind,
                output,
            });
        }

        Ok(PipelineOutput {
            topic: topic.to_string(),
            stages: completed,
        })
    }

    async fn run_stage(&self, stage: &Stage, completed: &[StageResult]) -> Result<String> {
        let mut request = stage.to_request(completed);
        let mut tool_rounds = 0;

        loop {
            if tool_rounds >= self.config.max_tool_rounds && !request.tools.is_empty() {
                tracing::warn!(
                    "{} reached {} tool rounds, asking for a final answer",
                    stage.kind,
                    tool_rounds
                );
                request.tools.clear();
            }

            match self.llm.complete(request.clone()).await? {
                Completion::Text(text) => return Ok(text),
                Completion::ToolCalls(calls) => {
                    if request.tools.is_empty() {
                        return Err(Error::LLMApi(format!(
                            "{} requested tool '{}' but no tools are available to this stage",
                            self.llm.name(),
                            calls.first().map(|c| c.name.as_str()).unwrap_or("")
                        )));
                    }

                    let mut results = Vec::with_capacity(calls.len());
                    for call in &calls {
                        results.push((call.name.clone(), self.execute_tool(call).await?));
                    }

                    request.messages.push(Message::tool_calls(calls));
                    request.messages.push(Message::tool_results(results));
                    tool_rounds += 1;
                }
            }
        }
    }

    /// Unknown tools and bad arguments go back to the model as an error
    /// payload; a failing search aborts the stage.
    async fn execute_tool(&self, call: &ToolCall) -> Result<Value> {
        if call.name != WEB_SEARCH_TOOL {
            tracing::warn!("Model requested unknown tool: {}", call.name);
            return Ok(json!({ "error": format!("Unknown tool: {}", call.name) }));
        }

        let query = match call.arguments.get("query").and_then(Value::as_str) {
            Some(q) if !q.trim().is_empty() => q,
            _ => return Ok(json!({ "error": "Missing required parameter: query" })),
        };

        let num_results = call
            .arguments
            .get("num_results")
            .and_then(Value::as_u64)
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or(DEFAULT_SEARCH_RESULTS);

        let hits = self.search.search(query, num_results).await?;
        Ok(json!({ "query": query, "results": hits }))
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}
