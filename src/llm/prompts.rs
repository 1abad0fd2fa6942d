use crate::config::ResearchConfig;
use crate::models::StageResult;

pub const FIND_PAPERS_OUTPUT: &str =
    "List of relevant academic papers with summaries and key details";
pub const EXTRACT_QUESTIONS_OUTPUT: &str =
    "Detailed analysis of research questions, gaps, and opportunities";
pub const WRITE_PROPOSAL_OUTPUT: &str =
    "Complete academic project proposal with all required sections";

/// Persona handed to the model as its system instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProfile {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl AgentProfile {
    pub fn new(role: &str, goal: &str, backstory: &str) -> Self {
        Self {
            role: role.to_string(),
            goal: goal.to_string(),
            backstory: backstory.to_string(),
        }
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\n\nYour goal: {}\n\n\
             Work through the task carefully and reply with the complete final answer.",
            self.role, self.backstory, self.goal
        )
    }
}

pub fn paper_finder() -> AgentProfile {
    AgentProfile::new(
        "Academic Paper Research Specialist",
        "Find relevant academic papers and research articles on given topics",
        "You are an expert academic researcher who specializes in finding high-quality \
         research papers, journal articles, and conference proceedings. You know how to \
         search for the most relevant and recent papers in any field.",
    )
}

pub fn question_extractor() -> AgentProfile {
    AgentProfile::new(
        "Research Question Analysis Expert",
        "Extract and analyze research questions, problems, and gaps from academic papers",
        "You are skilled at reading academic papers and identifying the core research \
         questions, methodology, and research gaps. You can summarize complex research \
         into clear, understandable insights.",
    )
}

pub fn proposal_writer() -> AgentProfile {
    AgentProfile::new(
        "Academic Project Proposal Writer",
        "Create comprehensive project proposals based on research analysis",
        "You are an experienced academic writer who creates compelling project proposals. \
         You know how to structure proposals with clear objectives, methodology, timeline, \
         and expected outcomes.",
    )
}

pub fn find_papers_instruction(topic: &str, config: &ResearchConfig) -> String {
    let min_papers = config.max_papers.saturating_sub(2).max(1).min(config.max_papers);

    format!(
        r#"Search for the most relevant and recent academic papers on the topic: "{topic}"

Focus on:
1. Recent papers (published {year} or later)
2. High-impact journals and conferences, preferably from: {sources}
3. Papers with clear research questions
4. Diverse perspectives on the topic

Use the web_search tool to look papers up. Find {min}-{max} relevant papers and provide:
- Paper titles
- Authors
- Publication year
- Brief summary of each paper
- Key findings or contributions"#,
        topic = topic,
        year = config.min_year,
        sources = config.preferred_sources.join(", "),
        min = min_papers,
        max = config.max_papers,
    )
}

pub fn extract_questions_instruction(topic: &str) -> String {
    format!(
        r#"Based on the papers found, analyze and extract:

1. Main research questions being addressed
2. Research methodologies used
3. Key findings and conclusions
4. Identified research gaps or limitations
5. Future work suggestions
6. Common themes across papers

Create a comprehensive analysis that identifies what has been done and what
opportunities exist for new research in "{}"."#,
        topic
    )
}

pub fn write_proposal_instruction(topic: &str) -> String {
    format!(
        r#"Based on the research analysis, create a comprehensive project proposal for "{}".

The proposal should include:

1. **Title**: Clear and descriptive project title
2. **Abstract**: 150-200 word summary
3. **Introduction**: Background and motivation
4. **Literature Review**: Summary of existing research
5. **Research Questions**: 2-3 specific research questions
6. **Methodology**: Proposed research approach
7. **Timeline**: Project phases and milestones
8. **Expected Outcomes**: What the project will deliver
9. **Significance**: Why this research matters
10. **Resources Needed**: Tools, data, equipment

Make it suitable for academic submission (thesis, grant application, etc.)"#,
        topic
    )
}

/// User turn for one stage: the task, its acceptance criteria, and the raw
/// output of every stage it depends on.
#[derive(Debug, Clone)]
pub struct StagePrompt<'a> {
    pub instruction: &'a str,
    pub expected_output: &'a str,
    pub context: Vec<&'a StageResult>,
}

impl StagePrompt<'_> {
    pub fn to_prompt(&self) -> String {
        let mut prompt = format!(
            "## Task\n{}\n\n## Expected output\n{}\n",
            self.instruction.trim(),
            self.expected_output
        );

        if !self.context.is_empty() {
            prompt.push_str("\n## Context from previous steps\n");
            for result in &self.context {
                prompt.push_str(&format!("\n### {}\n{}\n", result.kind, result.output.trim()));
            }
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StageKind;

    #[test]
    fn test_find_papers_uses_config() {
        let config = ResearchConfig::new(6, 2022, Some(vec!["arxiv".into(), "acm".into()]), "markdown");
        let text = find_papers_instruction("Federated Learning", &config);
        assert!(text.contains("\"Federated Learning\""));
        assert!(text.contains("published 2022 or later"));
        assert!(text.contains("arxiv, acm"));
        assert!(text.contains("Find 4-6 relevant papers"));
    }

    #[test]
    fn test_paper_range_never_inverted() {
        for (max, expected) in [(1, "Find 1-1"), (2, "Find 1-2"), (3, "Find 1-3"), (7, "Find 5-7")] {
            let config = ResearchConfig::new(max, 2020, None, "markdown");
            let text = find_papers_instruction("Topic", &config);
            assert!(text.contains(&format!("{} relevant papers", expected)), "max {}", max);
        }
    }

    #[test]
    fn test_proposal_lists_ten_sections() {
        let text = write_proposal_instruction("Robotics");
        for section in [
            "Title", "Abstract", "Introduction", "Literature Review", "Research Questions",
            "Methodology", "Timeline", "Expected Outcomes", "Significance", "Resources Needed",
        ] {
            assert!(text.contains(&format!("**{}**", section)), "missing {}", section);
        }
    }

    #[test]
    fn test_prompt_includes_context_in_order() {
        let first = StageResult { kind: StageKind::FindPapers, output: "papers".into() };
        let second = StageResult { kind: StageKind::ExtractQuestions, output: "gaps".into() };
        let prompt = StagePrompt {
            instruction: "Write it",
            expected_output: WRITE_PROPOSAL_OUTPUT,
            context: vec![&first, &second],
        }
        .to_prompt();

        let papers_at = prompt.find("papers").unwrap();
        let gaps_at = prompt.find("gaps").unwrap();
        assert!(papers_at < gaps_at);
        assert!(prompt.contains("### Paper Search"));
    }

    #[test]
    fn test_prompt_without_context() {
        let prompt = StagePrompt {
            instruction: "Find",
            expected_output: FIND_PAPERS_OUTPUT,
            context: Vec::new(),
        }
        .to_prompt();
        assert!(!prompt.contains("Context from previous steps"));
    }

    #[test]
    fn test_system_prompt_carries_persona() {
        let system = paper_finder().system_prompt();
        assert!(system.starts_with("You are Academic Paper Research Specialist."));
        assert!(system.contains("Your goal: Find relevant academic papers"));
    }
}
