use crate::config::ResearchConfig;
use crate::llm::prompts::{self, AgentProfile, StagePrompt};
use crate::models::{CompletionRequest, StageKind, StageResult};
use crate::search::web_search_spec;

/// One request descriptor in the pipeline.
#[derive(Debug, Clone)]
pub struct Stage {
    pub kind: StageKind,
    pub agent: AgentProfile,
    pub instruction: String,
    pub expected_output: String,
    pub depends_on: Vec<StageKind>,
    pub uses_search: bool,
}

impl Stage {
    /// Builds the model request, pulling the outputs this stage depends on
    /// from `completed` in dependency order.
    pub fn to_request(&self, completed: &[StageResult]) -> CompletionRequest {
        let context = self
            .depends_on
            .iter()
            .filter_map(|kind| completed.iter().find(|r| r.kind == *kind))
            .collect();

        let prompt = StagePrompt {
            instruction: &self.instruction,
            expected_output: &self.expected_output,
            context,
        };

        let request = CompletionRequest::new(self.agent.system_prompt(), prompt.to_prompt());
        if self.uses_search {
            request.with_tools(vec![web_search_spec()])
        } else {
            request
        }
    }
}

/// The fixed chain: find papers, then extract questions, then write the proposal.
pub fn build_stages(topic: &str, config: &ResearchConfig) -> Vec<Stage> {
    vec![
        Stage {
            kind: StageKind::FindPapers,
            agent: prompts::paper_finder(),
            instruction: prompts::find_papers_instruction(topic, config),
            expected_output: prompts::FIND_PAPERS_OUTPUT.to_string(),
            depends_on: Vec::new(),
            uses_search: true,
        },
        Stage {
            kind: StageKind::ExtractQuestions,
            agent: prompts::question_extractor(),
            instruction: prompts::extract_questions_instruction(topic),
            expected_output: prompts::EXTRACT_QUESTIONS_OUTPUT.to_string(),
            depends_on: vec![StageKind::FindPapers],
            uses_search: false,
        },
        Stage {
            kind: StageKind::WriteProposal,
            agent: prompts::proposal_writer(),
            instruction: prompts::write_proposal_instruction(topic),
            expected_output: prompts::WRITE_PROPOSAL_OUTPUT.to_string(),
            depends_on: vec![StageKind::FindPapers, StageKind::ExtractQuestions],
            uses_search: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_form_linear_chain() {
        let stages = build_stages("Topic", &ResearchConfig::default());
        let kinds: Vec<_> = stages.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![StageKind::FindPapers, StageKind::ExtractQuestions, StageKind::WriteProposal]
        );

        // every dependency points at an earlier stage
        for (i, stage) in stages.iter().enumerate() {
            for dep in &stage.depends_on {
                let pos = kinds.iter().position(|k| k == dep).unwrap();
                assert!(pos < i);
            }
        }
    }

    #[test]
    fn test_only_first_stage_searches() {
        let stages = build_stages("Topic", &ResearchConfig::default());
        assert!(stages[0].uses_search);
        assert!(stages[1..].iter().all(|s| !s.uses_search));

        assert_eq!(stages[0].to_request(&[]).tools.len(), 1);
        assert!(stages[2].to_request(&[]).tools.is_empty());
    }

    #[test]
    fn test_request_carries_dependencies() {
        let stages = build_stages("Topic", &ResearchConfig::default());
        let completed = vec![
            StageResult { kind: StageKind::FindPapers, output: "PAPERS-OUT".into() },
            StageResult { kind: StageKind::ExtractQuestions, output: "GAPS-OUT".into() },
        ];

        let second = stages[1].to_request(&completed).prompt_text();
        assert!(second.contains("PAPERS-OUT"));
        assert!(!second.contains("GAPS-OUT"));

        let third = stages[2].to_request(&completed);
        assert!(third.prompt_text().contains("PAPERS-OUT"));
        assert!(third.prompt_text().contains("GAPS-OUT"));
        assert!(third
            .system
            .as_deref()
            .unwrap()
            .contains("Academic Project Proposal Writer"));
    }
}
