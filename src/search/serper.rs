use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::SearchHit;
use crate::search::provider::SearchTool;

pub struct SerperClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SearchHit>,
}

impl SerperClient {
    pub fn new(api_key: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert("X-API-KEY", header::HeaderValue::from_str(api_key)?);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: "https://google.serper.dev".to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn parse_hits(body: &str) -> Result<Vec<SearchHit>> {
    let response: SerperResponse = serde_json::from_str(body)
        .map_err(|e| Error::ParseError(format!("Failed to parse search response: {}", e)))?;
    Ok(response.organic)
}

#[async_trait]
impl SearchTool for SerperClient {
    async fn search(&self, query: &str, num_results: u32) -> Result<Vec<SearchHit>> {
        let url = format!("{}/search", self.base_url);
        tracing::info!("Searching the web: {}", query);

        let response = self
            .client
            .post(&url)
            .json(&SerperRequest {
                q: query,
                num: num_results.clamp(1, 20),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::SearchApi(format!(
                "Search for '{}' failed: {} - {}",
                query, status, body
            )));
        }

        let body = response.text().await?;
        let hits = parse_hits(&body)?;
        tracing::debug!("Search returned {} results", hits.len());
        Ok(hits)
    }

    fn name(&self) -> &str {
        "Serper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_organic_results() {
        let body = r#"{
            "searchParameters": {"q": "graph neural networks"},
            "organic": [
                {"title": "A Survey on GNNs", "link": "https://arxiv.org/abs/1901.00596",
                 "snippet": "Deep learning on graphs", "date": "2019", "position": 1},
                {"title": "GraphSAGE", "link": "https://example.org/sage"}
            ]
        }"#;

        let hits = parse_hits(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "A Survey on GNNs");
        assert_eq!(hits[0].date.as_deref(), Some("2019"));
        assert_eq!(hits[1].snippet, "");
        assert!(hits[1].date.is_none());
    }

    #[test]
    fn test_parse_without_organic() {
        assert!(parse_hits(r#"{"knowledgeGraph": {}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_body() {
        assert!(matches!(parse_hits("not json"), Err(Error::ParseError(_))));
    }
}
