//! Text-processing tool payloads (`/api/process`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextOperation {
    #[default]
    Uppercase,
    Lowercase,
    Reverse,
    Wordcount,
}

impl TextOperation {
    pub const ALL: [TextOperation; 4] = [
        TextOperation::Uppercase,
        TextOperation::Lowercase,
        TextOperation::Reverse,
        TextOperation::Wordcount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextOperation::Uppercase => "uppercase",
            TextOperation::Lowercase => "lowercase",
            TextOperation::Reverse => "reverse",
            TextOperation::Wordcount => "wordcount",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TextOperation::Uppercase => TextOperation::Lowercase,
            TextOperation::Lowercase => TextOperation::Reverse,
            TextOperation::Reverse => TextOperation::Wordcount,
            TextOperation::Wordcount => TextOperation::Uppercase,
        }
    }
}

impl std::fmt::Display for TextOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TextOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown operation: {s}"))
    }
}

/// Request body for `/api/process`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRequest {
    pub text: String,
    pub operation: TextOperation,
}

/// `result` is a string for the transforms and a number for `wordcount`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextOutput {
    Count(u64),
    Text(String),
}

impl std::fmt::Display for TextOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextOutput::Count(n) => write!(f, "{n}"),
            TextOutput::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextResponse {
    pub operation: TextOperation,
    pub original: String,
    pub result: TextOutput,
}
