//! Tool catalogue and argument decoding

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON object carrying tool arguments
pub type Arguments = serde_json::Map<String, Value>;

// ============================================================================
// Request types for summarize-bg
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SummarizeBgParams {
    /// Local path or http(s) URL of the rulebook PDF
    pub file: String,
}

// ============================================================================
// Request types for generate-feedback
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerateFeedbackParams {
    /// Name of the person receiving feedback
    pub name: String,
    /// Freeform observations about their work
    pub description: String,
}

/// A decoded tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    SummarizeBg(SummarizeBgParams),
    GenerateFeedback(GenerateFeedbackParams),
}

impl ToolCall {
    pub const SUMMARIZE_BG: &'static str = "summarize-bg";
    pub const GENERATE_FEEDBACK: &'static str = "generate-feedback";

    /// Decode a raw `(name, arguments)` pair.
    ///
    /// The tool name is checked first, then the arguments. An absent, null
    /// or empty required string is reported as `Missing <field>`.
    pub fn parse(name: &str, arguments: Option<Arguments>) -> Result<Self> {
        match name {
            Self::SUMMARIZE_BG => Ok(ToolCall::SummarizeBg(decode(arguments, &["file"])?)),
            Self::GENERATE_FEEDBACK => Ok(ToolCall::GenerateFeedback(decode(
                arguments,
                &["name", "description"],
            )?)),
            _ => Err(Error::UnknownTool {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::SummarizeBg(_) => Self::SUMMARIZE_BG,
            ToolCall::GenerateFeedback(_) => Self::GENERATE_FEEDBACK,
        }
    }
}

fn decode<T: DeserializeOwned>(
    arguments: Option<Arguments>,
    required: &[&'static str],
) -> Result<T> {
    let arguments = arguments.ok_or(Error::MissingArguments)?;

    for &name in required {
        match arguments.get(name) {
            None | Some(Value::Null) => return Err(Error::MissingArgument { name }),
            Some(Value::String(value)) if value.is_empty() => {
                return Err(Error::MissingArgument { name })
            }
            _ => {}
        }
    }

    serde_json::from_value(Value::Object(arguments)).map_err(|e| Error::InvalidArguments {
        reason: e.to_string(),
    })
}
