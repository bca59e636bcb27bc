//! Parser for bulk credential files.
//!
//! One assignment per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! COMPANY_NAME = "Example Company LLC"
//! COMPANY_EIN='12-3456789'
//! ```
//!
//! A line that does not parse, names an unknown credential, or assigns an
//! empty value becomes a [`LineFailure`]; the remaining lines are unaffected.

use keyshelf_core::{CredentialName, SecretString};
use once_cell::sync::Lazy;
use regex::Regex;

static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(?:"([^"]*)"|'([^']*)')$"#)
        .expect("invalid regex")
});

/// A valid assignment.
#[derive(Debug)]
pub struct Assignment {
    /// 1-based line number.
    pub line: usize,
    pub name: CredentialName,
    pub value: SecretString,
}

/// A line that was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

/// Result of parsing a credentials file.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub assignments: Vec<Assignment>,
    pub failures: Vec<LineFailure>,
}

/// Parse the contents of a credentials file.
pub fn parse_credentials(content: &str) -> ParsedFile {
    let mut parsed = ParsedFile::default();

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        match parse_line(text) {
            Ok((name, value)) => parsed.assignments.push(Assignment { line, name, value }),
            Err(reason) => parsed.failures.push(LineFailure { line, reason }),
        }
    }

    parsed
}

fn parse_line(text: &str) -> Result<(CredentialName, SecretString), String> {
    let caps = ASSIGNMENT
        .captures(text)
        .ok_or_else(|| "malformed line, expected NAME = \"value\"".to_string())?;

    let raw_name = &caps[1];
    let name: CredentialName = raw_name.parse().map_err(|_| {
        format!(
            "unknown key '{raw_name}' (available keys: {})",
            CredentialName::available()
        )
    })?;

    let value = caps
        .get(2)
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .unwrap_or_default();
    if value.is_empty() {
        return Err(format!("empty value for {name}"));
    }

    Ok((name, SecretString::new(value)))
}
