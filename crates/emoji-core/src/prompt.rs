use crate::types::Description;

/// Build the single instruction sent to the model.
///
/// The source markup is fenced verbatim and the description is inserted as-is.
pub fn build_prompt(source_markup: &str, description: &Description) -> String {
    format!(
        r#"
You are an expert SVG artist. I want you to create a modified version of the following SVG emoji:

```svg
{source_markup}
```

Modification request: {description}

Please create a new SVG emoji based on the original one, but modified according to the request.
The SVG should:
1. Be simple and clean
2. Maintain the same general style as the original
3. Have the same viewBox, width, and height attributes
4. Only include the SVG code, no explanations or markdown

Return ONLY the SVG code, nothing else.
"#
    )
}

/// First `max_chars` characters of `text`, for log lines.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
