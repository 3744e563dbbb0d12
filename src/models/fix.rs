//! Fix records produced by the synthesizer and statuses returned by the applier.

use serde::Serialize;
use std::fmt;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A proposed rewrite of one source line.
///
/// `original` is the line as read at synthesis time, without its terminator.
/// A `replacement` of `None` means no automatic fix exists and the issue must
/// be resolved by hand. Embedded `\n` in `replacement` expands the target into
/// several physical lines.
pub struct Fix {
    pub file: String,
    pub line: usize,
    pub original: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    pub message: String,
}

impl Fix {
    pub fn manual(file: &str, line: usize, original: &str, message: impl Into<String>) -> Self {
        Fix {
            file: file.to_string(),
            line,
            original: original.to_string(),
            replacement: None,
            message: message.into(),
        }
    }

    pub fn is_manual(&self) -> bool {
        self.replacement.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a successful apply call.
pub enum ApplyStatus {
    Applied { file: String, line: usize },
    NotApplicable { file: String, line: usize },
}

impl fmt::Display for ApplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyStatus::Applied { file, line } => {
                write!(f, "Applied fix to {} line {}", file, line)
            }
            ApplyStatus::NotApplicable { file, line } => {
                write!(f, "No automatic fix available for {} line {}", file, line)
            }
        }
    }
}
