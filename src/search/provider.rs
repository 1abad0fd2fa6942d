use async_trait::async_trait;
use serde_json::json;

use crate::error::Result;
use crate::models::{SearchHit, ToolSpec};

pub const WEB_SEARCH_TOOL: &str = "web_search";

#[async_trait]
pub trait SearchTool: Send + Sync {
    async fn search(&self, query: &str, num_results: u32) -> Result<Vec<SearchHit>>;
    fn name(&self) -> &str;
}

/// Function declaration advertised to the model for stages that may search.
pub fn web_search_spec() -> ToolSpec {
    ToolSpec {
        name: WEB_SEARCH_TOOL.to_string(),
        description: "Search the web for academic papers, articles, and conference \
                      proceedings. Returns titles, links, and snippets."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Number of results to return (default 10)"
                }
            },
            "required": ["query"]
        }),
    }
}
