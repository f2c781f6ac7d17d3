//! System prompt for the teaching assistant
//!
//! The built-in prompt can be replaced at startup by pointing
//! `SYSTEM_PROMPT_PATH` at a text file.

use std::path::Path;

/// Built-in prompt establishing the assistant's role.
///
/// The first line ends in a space; it is part of the prompt text.
pub const TEACHING_ASSISTANT_PROMPT: &str = concat!(
    "You are a helpful teaching assistant for Computer Science Engineering students. \n",
    r"

Your role:
- Explain concepts clearly with examples when needed
- Focus on topics like DSA (Data Structures & Algorithms), DBMS (Database Management Systems), OS (Operating Systems), CN (Computer Networks), Full Stack Web Development, Machine Learning and AI, Data Analysis, and programming in C++, Java, and Python
- Provide step-by-step explanations for complex topics
- Give practical examples and code snippets when appropriate
- Be encouraging and supportive to students
- If asked about topics outside CSE, politely redirect to CSE-related topics

Guidelines:
- Keep explanations clear and student-friendly
- Use analogies when explaining complex concepts
- Provide code examples in C++, Java, or Python when relevant
- Break down complex problems into smaller, manageable parts
- Always be patient and encouraging"
);

/// Load the system prompt, preferring the override file when one is given.
///
/// A missing, unreadable or blank override file is an error.
pub fn load_system_prompt(override_path: Option<&Path>) -> std::io::Result<String> {
    let Some(path) = override_path else {
        return Ok(TEACHING_ASSISTANT_PROMPT.to_string());
    };

    let content = std::fs::read_to_string(path)?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("system prompt file {} is empty", path.display()),
        ));
    }

    tracing::info!(path = %path.display(), bytes = trimmed.len(), "Loaded system prompt override");
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_prompt() {
        let prompt = load_system_prompt(None).unwrap();
        assert!(prompt.starts_with("You are a helpful teaching assistant"));
        assert!(prompt.ends_with("Always be patient and encouraging"));
    }

    #[test]
    fn test_default_prompt_first_line_keeps_trailing_space() {
        let first = TEACHING_ASSISTANT_PROMPT.lines().next().unwrap();
        assert_eq!(
            first,
            "You are a helpful teaching assistant for Computer Science Engineering students. "
        );
        assert!(TEACHING_ASSISTANT_PROMPT.contains("students. \n\nYour role:\n"));
    }

    #[test]
    fn test_override_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\n  You are a terse tutor.  \n").unwrap();

        let prompt = load_system_prompt(Some(file.path())).unwrap();
        assert_eq!(prompt, "You are a terse tutor.");
    }

    #[test]
    fn test_empty_override_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_system_prompt(Some(file.path())).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_missing_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_system_prompt(Some(&dir.path().join("nope.txt"))).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
