use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    FindPapers,
    ExtractQuestions,
    WriteProposal,
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::FindPapers => write!(f, "Paper Search"),
            StageKind::ExtractQuestions => write!(f, "Question Extraction"),
            StageKind::WriteProposal => write!(f, "Proposal Writing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    pub kind: StageKind,
    pub output: String,
}

/// Every stage output of one successful run, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub topic: String,
    pub stages: Vec<StageResult>,
}

impl PipelineOutput {
    pub fn stage(&self, kind: StageKind) -> Option<&StageResult> {
        self.stages.iter().find(|s| s.kind == kind)
    }

    /// Output of the last stage, which is the proposal itself.
    pub fn final_output(&self) -> &str {
        self.stages.last().map(|s| s.output.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct ProposalDocument {
    pub topic: String,
    pub generated_at: DateTime<Local>,
    pub body: String,
}

impl ProposalDocument {
    pub fn new(topic: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            generated_at: Local::now(),
            body: body.into(),
        }
    }

    /// `research_proposal_<topic>_<YYYYMMDD_HHMMSS>.<extension>`, with spaces and
    /// path separators in the topic replaced by underscores.
    pub fn file_name(&self, extension: &str) -> String {
        let slug: String = self
            .topic
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '_',
                other => other,
            })
            .collect();

        format!(
            "research_proposal_{}_{}.{}",
            slug,
            self.generated_at.format("%Y%m%d_%H%M%S"),
            extension
        )
    }

    pub fn render(&self) -> String {
        format!(
            "# Research Proposal: {}\n\nGenerated on: {}\n\n---\n\n{}",
            self.topic,
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
            self.body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_document(topic: &str, body: &str) -> ProposalDocument {
        ProposalDocument {
            topic: topic.to_string(),
            generated_at: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_file_name() {
        let doc = fixed_document("Graph Neural Networks", "ABC");
        assert_eq!(
            doc.file_name("md"),
            "research_proposal_Graph_Neural_Networks_20240309_140507.md"
        );
    }

    #[test]
    fn test_file_name_replaces_separators() {
        let doc = fixed_document("CI/CD pipelines", "");
        assert_eq!(
            doc.file_name("txt"),
            "research_proposal_CI_CD_pipelines_20240309_140507.txt"
        );
    }

    #[test]
    fn test_render_layout() {
        let doc = fixed_document("Quantum Error Correction", "Body text");
        assert_eq!(
            doc.render(),
            "# Research Proposal: Quantum Error Correction\n\n\
             Generated on: 2024-03-09 14:05:07\n\n---\n\nBody text"
        );
    }

    #[test]
    fn test_final_output_is_last_stage() {
        let output = PipelineOutput {
            topic: "T".to_string(),
            stages: vec![
                StageResult { kind: StageKind::FindPapers, output: "S1".to_string() },
                StageResult { kind: StageKind::WriteProposal, output: "S3".to_string() },
            ],
        };
        assert_eq!(output.final_output(), "S3");
        assert_eq!(output.stage(StageKind::FindPapers).unwrap().output, "S1");
        assert!(output.stage(StageKind::ExtractQuestions).is_none());
    }
}
