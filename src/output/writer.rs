use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ResearchConfig;
use crate::error::Result;
use crate::models::ProposalDocument;

pub struct ResultWriter {
    output_dir: PathBuf,
    extension: &'static str,
}

impl ResultWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P, config: &ResearchConfig) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            extension: config.file_extension(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Writes the proposal and returns the path of the new file. The output
    /// directory must already exist.
    pub fn save(&self, topic: &str, result: &str) -> Result<PathBuf> {
        self.save_document(&ProposalDocument::new(topic, result))
    }

    pub fn save_document(&self, document: &ProposalDocument) -> Result<PathBuf> {
        let path = self.output_dir.join(document.file_name(self.extension));
        fs::write(&path, document.render())?;
        tracing::info!("Results saved to: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_save_proposal() {
        let dir = TempDir::new().unwrap();
        let writer = ResultWriter::new(dir.path(), &ResearchConfig::default());

        let path = writer.save("Graph Neural Networks", "ABC").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("research_proposal_Graph_Neural_Networks_"));
        assert!(name.ends_with(".md"));
        // YYYYMMDD_HHMMSS
        let stamp = &name["research_proposal_Graph_Neural_Networks_".len()..name.len() - 3];
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("ABC"));
        assert!(content
            .lines()
            .any(|line| line.contains("Graph Neural Networks")));
        assert!(content.contains("\n---\n"));
    }

    #[test]
    fn test_text_format_extension() {
        let dir = TempDir::new().unwrap();
        let config = ResearchConfig::new(7, 2020, None, "text");
        let path = ResultWriter::new(dir.path(), &config).save("NLP", "x").unwrap();
        assert_eq!(path.extension().unwrap(), "txt");
    }

    #[test]
    fn test_missing_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let writer = ResultWriter::new(dir.path().join("missing"), &ResearchConfig::default());

        let err = writer.save("Topic", "text").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_ensure_output_dir_creates_nested() {
        let dir = TempDir::new().unwrap();
        let writer = ResultWriter::new(dir.path().join("a/b"), &ResearchConfig::default());
        writer.ensure_output_dir().unwrap();
        writer.ensure_output_dir().unwrap();
        assert!(writer.save("Topic", "text").is_ok());
    }
}
