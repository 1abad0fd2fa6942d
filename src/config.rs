use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::credentials::{GEMINI_API_KEY, SERPER_API_KEY};
use crate::error::{Error, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

const DEFAULT_SOURCES: [&str; 6] = [
    "arxiv",
    "ieee",
    "acm",
    "springer",
    "elsevier",
    "google scholar",
];

/// Research parameters shared by every stage prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchConfig {
    pub max_papers: u32,
    pub min_year: i32,
    pub preferred_sources: Vec<String>,
    pub output_format: String,
}

impl ResearchConfig {
    /// Builds a config, falling back to the default source list when
    /// `preferred_sources` is unset or empty.
    pub fn new(
        max_papers: u32,
        min_year: i32,
        preferred_sources: Option<Vec<String>>,
        output_format: impl Into<String>,
    ) -> Self {
        let preferred_sources = preferred_sources
            .filter(|sources| !sources.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect());

        Self {
            max_papers,
            min_year,
            preferred_sources,
            output_format: output_format.into(),
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self.output_format.as_str() {
            "text" | "txt" => "txt",
            _ => "md",
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self::new(7, 2020, None, "markdown")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub serper_api_key: String,
    pub model: String,
    pub temperature: f32,
    pub output_dir: PathBuf,
    pub max_tool_rounds: usize,
    pub research: ResearchConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{} environment variable not set", key)))
        };

        let gemini_api_key = required(GEMINI_API_KEY)?;
        let serper_api_key = required(SERPER_API_KEY)?;

        let model = lookup("RESEARCH_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = parse_var(&lookup, "RESEARCH_TEMPERATURE", 0.1_f32)?;

        let output_dir = lookup("RESEARCH_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let max_tool_rounds = parse_var(&lookup, "RESEARCH_MAX_TOOL_ROUNDS", 5_usize)?;

        let defaults = ResearchConfig::default();

        let max_papers = parse_var(&lookup, "RESEARCH_MAX_PAPERS", defaults.max_papers)?;
        if max_papers == 0 {
            return Err(Error::Config(
                "RESEARCH_MAX_PAPERS must be at least 1".to_string(),
            ));
        }

        let min_year = parse_var(&lookup, "RESEARCH_MIN_YEAR", defaults.min_year)?;

        let preferred_sources = lookup("RESEARCH_SOURCES").map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        });

        let output_format = lookup("RESEARCH_OUTPUT_FORMAT")
            .map(|v| v.to_lowercase())
            .unwrap_or(defaults.output_format);

        if !matches!(output_format.as_str(), "markdown" | "text" | "txt") {
            return Err(Error::Config(format!(
                "Unsupported output format: {}",
                output_format
            )));
        }

        Ok(Self {
            gemini_api_key,
            serper_api_key,
            model,
            temperature,
            output_dir,
            max_tool_rounds,
            research: ResearchConfig::new(max_papers, min_year, preferred_sources, output_format),
        })
    }
}

/// Parses an optional variable; a set but malformed value is a config error.
fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", key, v))),
        None => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub research: ResearchConfig,
    pub max_tool_rounds: usize,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            research: ResearchConfig::default(),
            max_tool_rounds: 5,
            show_progress: false,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            research: config.research.clone(),
            max_tool_rounds: config.max_tool_rounds,
            show_progress: true,
        }
    }
}
