//! Typed output of the response renderer

use serde::Serialize;
use ts_rs::TS;

/// Inline content of a text line, heading or list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Inline {
    Text { text: String },
    InlineCode { text: String },
    Bold { text: String },
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text { text: s.into() }
    }

    pub fn code(s: impl Into<String>) -> Self {
        Inline::InlineCode { text: s.into() }
    }

    pub fn bold(s: impl Into<String>) -> Self {
        Inline::Bold { text: s.into() }
    }
}

/// One rendered fragment. Text held here is raw; escaping is the job of
/// whatever turns fragments into markup (see `render::html`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Fragment {
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    CodeBlock {
        #[serde(skip_serializing_if = "Option::is_none")]
        #[ts(optional)]
        language: Option<String>,
        code: String,
    },
    /// Run of consecutive list items (bulleted and numbered alike)
    List {
        items: Vec<Vec<Inline>>,
    },
    Text {
        text: String,
    },
    InlineCode {
        text: String,
    },
    Bold {
        text: String,
    },
    LineBreak,
}

impl From<Inline> for Fragment {
    fn from(inline: Inline) -> Self {
        match inline {
            Inline::Text { text } => Fragment::Text { text },
            Inline::InlineCode { text } => Fragment::InlineCode { text },
            Inline::Bold { text } => Fragment::Bold { text },
        }
    }
}

impl Fragment {
    pub fn heading(level: u8, content: Vec<Inline>) -> Self {
        Fragment::Heading { level, content }
    }

    pub fn code_block(language: Option<&str>, code: impl Into<String>) -> Self {
        Fragment::CodeBlock {
            language: language.map(str::to_string),
            code: code.into(),
        }
    }

    #[cfg(test)]
    pub fn text(s: impl Into<String>) -> Self {
        Fragment::Text { text: s.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let fragments = vec![
            Fragment::heading(2, vec![Inline::text("Sub")]),
            Fragment::code_block(None, "x"),
            Fragment::List {
                items: vec![vec![Inline::bold("a")]],
            },
            Fragment::LineBreak,
        ];

        assert_eq!(
            serde_json::to_value(&fragments).unwrap(),
            json!([
                { "kind": "heading", "level": 2, "content": [{ "kind": "text", "text": "Sub" }] },
                { "kind": "code_block", "code": "x" },
                { "kind": "list", "items": [[{ "kind": "bold", "text": "a" }]] },
                { "kind": "line_break" },
            ])
        );
    }
}
