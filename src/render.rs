//! Response rendering
//!
//! Turns raw model text into a typed fragment sequence (headings, code
//! blocks, inline code, lists, bold, line breaks). Rendering is a pure
//! function of its input and never fails; malformed markup degrades to text.

mod fragment;
mod html;
mod scanner;

#[cfg(test)]
mod proptests;

pub use fragment::{Fragment, Inline};

/// Render raw model text into fragments
pub fn render(raw_text: &str) -> Vec<Fragment> {
    scanner::scan(raw_text)
}

/// Escaped HTML for already-rendered fragments
pub fn to_html(fragments: &[Fragment]) -> String {
    html::to_html(fragments)
}
