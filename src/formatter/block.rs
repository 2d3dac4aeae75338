use once_cell::sync::Lazy;
use regex::Regex;

const HEADING_MARKER: char = '#';
const BULLET_MARKERS: [char; 2] = ['-', '•'];
const HEADING_LEVEL_OFFSET: usize = 2;
const MAX_HEADING_LEVEL: usize = 6;
const MAX_LABEL_CHARS: usize = 100;

static LABEL_HEADING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z\s]+:$").expect("LABEL_HEADING_REGEX is a valid regex pattern")
});

/// One classified unit of display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    /// An `ALL CAPS:` label line, kept verbatim including the colon.
    SubHeading(String),
    /// `continues_list` is true when the previous line was also a list item,
    /// so the renderer keeps both in the same list container.
    ListItem { text: String, continues_list: bool },
    Paragraph(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    SubHeading(&'a str),
    ListItem(&'a str),
    Paragraph(&'a str),
}

pub fn heading_level(marker_count: usize) -> u8 {
    marker_count
        .saturating_add(HEADING_LEVEL_OFFSET)
        .min(MAX_HEADING_LEVEL) as u8
}

fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if line.starts_with(HEADING_MARKER) {
        let rest = line.trim_start_matches(HEADING_MARKER);
        let marker_count = line.len() - rest.len();
        return LineKind::Heading {
            level: heading_level(marker_count),
            text: rest.trim_start(),
        };
    }

    if trimmed.chars().count() < MAX_LABEL_CHARS && LABEL_HEADING_REGEX.is_match(trimmed) {
        return LineKind::SubHeading(trimmed);
    }

    if let Some(rest) = trimmed.strip_prefix(|c: char| BULLET_MARKERS.contains(&c)) {
        return LineKind::ListItem(rest.trim_start());
    }

    LineKind::Paragraph(line)
}

/// Splits `source` into lines and classifies each one, in input order.
pub fn parse_blocks(source: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut list_open = false;

    for line in source.lines() {
        let block = match classify_line(line) {
            LineKind::Blank => {
                list_open = false;
                continue;
            }
            LineKind::ListItem(text) => {
                let block = Block::ListItem {
                    text: text.to_string(),
                    continues_list: list_open,
                };
                list_open = true;
                block
            }
            LineKind::Heading { level, text } => Block::Heading {
                level,
                text: text.to_string(),
            },
            LineKind::SubHeading(label) => Block::SubHeading(label.to_string()),
            LineKind::Paragraph(text) => Block::Paragraph(text.to_string()),
        };

        if !matches!(block, Block::ListItem { .. }) {
            list_open = false;
        }
        blocks.push(block);
    }

    blocks
}
