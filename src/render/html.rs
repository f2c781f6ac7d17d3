//! HTML emission for rendered fragments
//!
//! Every piece of text that came from the model is escaped before it is
//! placed between tags. Only the tags written here are live markup.

use super::fragment::{Fragment, Inline};
use std::fmt::Write;

/// Escape `& < > " '` (and `/`) for use in element content or a quoted attribute
fn escape(text: &str) -> std::borrow::Cow<'_, str> {
    html_escape::encode_safe(text)
}

/// Write fragments as HTML using the chat UI's class names
pub fn to_html(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        write_fragment(&mut out, fragment);
    }
    out
}

fn write_fragment(out: &mut String, fragment: &Fragment) {
    match fragment {
        Fragment::Heading { level, content } => {
            let level = (*level).clamp(1, 6);
            let _ = write!(out, "<h{level} class=\"response-header\">");
            write_inlines(out, content);
            let _ = write!(out, "</h{level}>");
        }
        Fragment::CodeBlock { language, code } => {
            out.push_str("<div class=\"code-block-wrapper\">");
            if let Some(language) = language {
                let _ = write!(
                    out,
                    "<div class=\"code-language\">{}</div>",
                    escape(language)
                );
            }
            let _ = write!(
                out,
                "<pre class=\"code-block\"><code>{}</code></pre></div>",
                escape(code)
            );
        }
        Fragment::List { items } => {
            out.push_str("<ul class=\"response-list\">");
            for item in items {
                out.push_str("<li class=\"response-list-item\">");
                write_inlines(out, item);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        Fragment::Text { text } => out.push_str(&escape(text)),
        Fragment::InlineCode { text } => write_inline_code(out, text),
        Fragment::Bold { text } => write_bold(out, text),
        Fragment::LineBreak => out.push_str("<br>"),
    }
}

fn write_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text { text } => out.push_str(&escape(text)),
            Inline::InlineCode { text } => write_inline_code(out, text),
            Inline::Bold { text } => write_bold(out, text),
        }
    }
}

fn write_inline_code(out: &mut String, text: &str) {
    let _ = write!(out, "<code class=\"inline-code\">{}</code>", escape(text));
}

fn write_bold(out: &mut String, text: &str) {
    let _ = write!(out, "<strong>{}</strong>", escape(text));
}
