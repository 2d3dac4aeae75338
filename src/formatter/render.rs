use super::block::Block;

/// Renders blocks as markup. Each uninterrupted run of list items gets
/// exactly one `<ul>` wrapper.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut markup = String::with_capacity(blocks.len() * 16);
    let mut list_open = false;

    for block in blocks {
        let continues_list = matches!(
            block,
            Block::ListItem {
                continues_list: true,
                ..
            }
        );
        if list_open && !continues_list {
            markup.push_str("</ul>");
            list_open = false;
        }

        match block {
            Block::Heading { level, text } => {
                markup.push_str(&format!("<h{level}>{text}</h{level}>"));
            }
            Block::SubHeading(label) => {
                markup.push_str("<p class=\"label-heading\"><strong>");
                markup.push_str(label);
                markup.push_str("</strong></p>");
            }
            Block::ListItem { text, .. } => {
                if !list_open {
                    markup.push_str("<ul>");
                    list_open = true;
                }
                markup.push_str("<li>");
                markup.push_str(text);
                markup.push_str("</li>");
            }
            Block::Paragraph(text) => {
                markup.push_str("<p>");
                markup.push_str(text);
                markup.push_str("</p>");
            }
        }
    }

    if list_open {
        markup.push_str("</ul>");
    }
    markup
}
