//! Prompt assembly
//!
//! Serializes a system instruction, the prior turns and the new user message
//! into one linear text block for a text-generation API:
//!
//! ```text
//! <system prompt>
//!
//! <role>: <content>
//! ...
//! User: <new message>
//! Assistant:
//! ```
//!
//! Roles are written exactly as stored. Contents are written verbatim, so a
//! multi-line turn stays multi-line. Nothing is truncated or windowed.

use crate::conversation::{History, InvalidTurn};
use thiserror::Error;

/// Label written in front of the new message
const USER_LABEL: &str = "User: ";

/// Cue marking where generation continues (trailing space, no newline)
pub const ASSISTANT_CUE: &str = "Assistant: ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<InvalidTurn> for PromptError {
    fn from(err: InvalidTurn) -> Self {
        PromptError::InvalidInput(err.to_string())
    }
}

/// Assemble the prompt text.
///
/// `new_message` must be non-empty; an empty message is a caller bug and is
/// reported as `InvalidInput`. `history` may be empty.
pub fn assemble(
    system_prompt: &str,
    history: &History,
    new_message: &str,
) -> Result<String, PromptError> {
    if new_message.is_empty() {
        return Err(PromptError::InvalidInput(
            "new message must not be empty".to_string(),
        ));
    }

    let turns_len: usize = history
        .iter()
        .map(|turn| turn.role().as_str().len() + turn.content().len() + 3)
        .sum();
    let mut out = String::with_capacity(
        system_prompt.len() + 2 + turns_len + USER_LABEL.len() + new_message.len() + 1
            + ASSISTANT_CUE.len(),
    );

    out.push_str(system_prompt);
    out.push_str("\n\n");

    for turn in history {
        out.push_str(turn.role().as_str());
        out.push_str(": ");
        out.push_str(turn.content());
        out.push('\n');
    }

    out.push_str(USER_LABEL);
    out.push_str(new_message);
    out.push('\n');
    out.push_str(ASSISTANT_CUE);

    Ok(out)
}
