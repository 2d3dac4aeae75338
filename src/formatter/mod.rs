//! Converts freeform assistant text into display markup.
//!
//! Text is split into lines, each non-blank line becomes one [`Block`]
//! (heading, label heading, list item or paragraph), and the blocks are
//! rendered in input order. Formatting is total: any string, including the
//! empty one, yields valid markup.
//!
//! The formatter does not escape anything. Callers that need escaping should
//! escape before formatting; escaping `<`, `>` and `&` leaves every
//! structural marker intact.
//!
//! Formatting is not idempotent. Feeding markup back in treats it as
//! ordinary paragraph text.

mod block;
mod emphasis;
mod render;

use serde::{Deserialize, Serialize};

pub use block::{heading_level, parse_blocks, Block};
pub use emphasis::rewrite_emphasis;
pub use render::render_blocks;

/// Which call site the text is rendered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    /// Quiz and assignment hints: structure only.
    #[default]
    Hint,
    /// Statistics and diagnostics reports: markdown emphasis is rewritten too.
    Report,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedText {
    pub blocks: Vec<Block>,
    pub markup: String,
}

pub fn format(source: &str) -> String {
    format_with_style(source, FormatStyle::Hint).markup
}

pub fn format_report(source: &str) -> String {
    format_with_style(source, FormatStyle::Report).markup
}

pub fn format_with_style(source: &str, style: FormatStyle) -> FormattedText {
    let blocks = match style {
        FormatStyle::Hint => parse_blocks(source),
        FormatStyle::Report => parse_blocks(&rewrite_emphasis(source)),
    };
    let markup = render_blocks(&blocks);
    FormattedText { blocks, markup }
}
