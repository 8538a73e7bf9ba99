// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline document parsing: YAML (default), TOML, or JSON surface syntax,
//! decoded into a [`PipelineDocument`] and validated before the engine sees
//! it.

use std::path::Path;

use thiserror::Error;

use crate::document::{PipelineDocument, StepKind, ALLOWED_SCRIPT_IMPORTS};

/// Document surface format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
    Json,
}

impl Format {
    /// Infer from a file extension, defaulting to YAML when the extension
    /// is absent or unrecognized.
    pub fn from_extension(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Format::Toml,
            Some("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Parse a document from a string in the given format, then validate it.
pub fn parse_str(text: &str, format: Format) -> Result<PipelineDocument, ParseError> {
    let doc: PipelineDocument = match format {
        Format::Yaml => serde_yaml::from_str(text)?,
        Format::Toml => toml::from_str(text)?,
        Format::Json => serde_json::from_str(text)?,
    };
    validate(&doc)?;
    Ok(doc)
}

/// Parse a document from a file, tilde-expanding the path and inferring the
/// format from its extension.
pub fn parse_file(path: impl AsRef<Path>) -> Result<PipelineDocument, ParseError> {
    let expanded = expand_tilde(path.as_ref());
    let format = Format::from_extension(&expanded);
    let text = std::fs::read_to_string(&expanded).map_err(|source| ParseError::Io {
        path: expanded.display().to_string(),
        source,
    })?;
    parse_str(&text, format)
}

/// Expand a leading `~` against the invoking user's home directory.
pub fn expand_tilde(path: &Path) -> std::path::PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };
    if let Some(rest) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if s == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    path.to_path_buf()
}

fn validate(doc: &PipelineDocument) -> Result<(), ParseError> {
    for (index, step) in doc.steps.iter().enumerate() {
        if let Some(name) = &step.name {
            if name.trim().is_empty() {
                return Err(ParseError::Validation(format!(
                    "step {index} has an empty name"
                )));
            }
        }
        if let StepKind::Script { imports, .. } = &step.kind {
            for import in imports {
                if !ALLOWED_SCRIPT_IMPORTS.contains(&import.as_str()) {
                    return Err(ParseError::Validation(format!(
                        "step {} imports unknown module '{import}'",
                        step.effective_name(index)
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
