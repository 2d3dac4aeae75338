use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    formatter::format_with_style,
    models::dto::{request::FormatRequest, response::FormatResponse},
};

/// Reply fields that carry displayable text, in priority order.
const DISPLAY_FIELDS: [&str; 5] = ["response", "message", "answer", "overview", "statistics"];

/// Picks the text a widget should show for a backend reply.
pub fn extract_display_text(payload: &Value) -> AppResult<String> {
    let field = DISPLAY_FIELDS
        .iter()
        .find_map(|name| payload.get(*name).and_then(Value::as_str));

    match field {
        Some(text) => Ok(text.to_string()),
        None => Ok(serde_json::to_string_pretty(payload)?),
    }
}

pub fn render(request: FormatRequest) -> AppResult<FormatResponse> {
    let text = match (request.text, request.payload) {
        (Some(text), _) => text,
        (None, Some(payload)) => extract_display_text(&payload)?,
        (None, None) => {
            return Err(AppError::ValidationError(
                "Either text or payload is required".to_string(),
            ))
        }
    };

    let text = if request.escape_html {
        html_escape::encode_text(&text).into_owned()
    } else {
        text
    };

    let formatted = format_with_style(&text, request.style);
    Ok(FormatResponse {
        block_count: formatted.blocks.len(),
        markup: formatted.markup,
    })
}
