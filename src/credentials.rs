use std::env;
use std::fmt;

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const SERPER_API_KEY: &str = "SERPER_DEV_API_KEY";

pub const REQUIRED_KEYS: [&str; 2] = [GEMINI_API_KEY, SERPER_API_KEY];

/// Outcome of a credential check. Only names are kept, never values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialReport {
    pub missing: Vec<String>,
}

impl CredentialReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for CredentialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return write!(f, "All API keys found");
        }

        writeln!(f, "Missing API keys: {}", self.missing.join(", "))?;
        writeln!(f)?;
        write!(f, "Please set them in your .env file:")?;
        for key in &self.missing {
            write!(f, "\n{}=your_api_key_here", key)?;
        }
        Ok(())
    }
}

pub fn check_credentials(names: &[&str]) -> CredentialReport {
    check_credentials_with(names, |key| env::var(key).ok())
}

/// Checks `names` in order against `lookup`. Unset or empty values count as
/// missing; any other value, including whitespace, counts as present.
pub fn check_credentials_with<F>(names: &[&str], lookup: F) -> CredentialReport
where
    F: Fn(&str) -> Option<String>,
{
    let missing = names
        .iter()
        .filter(|name| {
            lookup(name)
                .map(|value| value.is_empty())
                .unwrap_or(true)
        })
        .map(|name| name.to_string())
        .collect();

    CredentialReport { missing }
}
