// file: src/repository/reference.rs
// description: parse https, ssh and shorthand repository references
// reference: https://docs.rs/regex

use crate::error::{PipelineError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref HTTPS_REFERENCE: Regex = Regex::new(
        r"^https://[^/\s]+/([^/\s]+)/([^/\s]+?)(?:\.git)?/?$"
    ).expect("HTTPS_REFERENCE regex is valid");

    static ref SSH_REFERENCE: Regex = Regex::new(
        r"^git@[^:\s]+:([^/\s]+)/([^/\s]+?)(?:\.git)?/?$"
    ).expect("SSH_REFERENCE regex is valid");

    static ref SHORTHAND_REFERENCE: Regex = Regex::new(
        r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$"
    ).expect("SHORTHAND_REFERENCE regex is valid");
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    /// Accepts `https://host/owner/name`, `git@host:owner/name.git` or
    /// `owner/name`. A trailing `.git` or `/` is dropped from the name.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        [&*HTTPS_REFERENCE, &*SSH_REFERENCE, &*SHORTHAND_REFERENCE]
            .iter()
            .find_map(|pattern| pattern.captures(input))
            .and_then(|caps| Self::new(&caps[1], &caps[2]).ok())
            .ok_or_else(|| PipelineError::InvalidReference(input.to_string()))
    }

    pub fn new(owner: &str, name: &str) -> Result<Self> {
        if owner.is_empty() || name.is_empty() {
            return Err(PipelineError::InvalidReference(format!("{}/{}", owner, name)));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_forms_yield_same_pair() {
        let expected = RepositoryRef::new("a", "b").unwrap();

        for input in [
            "https://github.com/a/b",
            "https://github.com/a/b/",
            "https://github.com/a/b.git",
            "git@github.com:a/b.git",
            "a/b",
            "a/b.git",
            "  a/b  ",
        ] {
            assert_eq!(RepositoryRef::parse(input).unwrap(), expected, "input: {input}");
        }
    }

    #[test]
    fn test_realistic_names() {
        let repo = RepositoryRef::parse("https://github.com/rust-lang/rust-clippy").unwrap();
        assert_eq!(repo.owner(), "rust-lang");
        assert_eq!(repo.name(), "rust-clippy");

        let repo = RepositoryRef::parse("git@github.com:tokio-rs/tokio.git").unwrap();
        assert_eq!(repo.owner(), "tokio-rs");
        assert_eq!(repo.name(), "tokio");

        let repo = RepositoryRef::parse("serde-rs/json.rs").unwrap();
        assert_eq!(repo.name(), "json.rs");
    }

    #[test]
    fn test_other_hosts_accepted() {
        let repo = RepositoryRef::parse("https://ghe.example.com/team/service").unwrap();
        assert_eq!(repo.to_string(), "team/service");
    }

    #[test]
    fn test_invalid_references() {
        for input in [
            "not a valid ref!!",
            "",
            "just-a-name",
            "a/b/c",
            "https://github.com/onlyowner",
            "git@github.com:a",
        ] {
            assert!(
                matches!(
                    RepositoryRef::parse(input),
                    Err(PipelineError::InvalidReference(_))
                ),
                "input: {input}"
            );
        }
    }

    #[test]
    fn test_invalid_reference_message_names_input_once() {
        let message = RepositoryRef::parse("no-slash-here").unwrap_err().to_string();
        assert_eq!(message.matches("no-slash-here").count(), 1);
        assert!(message.contains("owner/name"));
    }

    #[test]
    fn test_display() {
        let repo = RepositoryRef::parse("octocat/hello-world").unwrap();
        assert_eq!(format!("{}", repo), "octocat/hello-world");
    }
}
