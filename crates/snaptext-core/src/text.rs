/// Clean up raw OCR output.
///
/// Drops the single trailing character the engine appends, trims the
/// rest, and for vertical scripts removes every space and newline.
pub fn clean_text(raw: &str, vertical: bool) -> String {
    let mut chars = raw.chars();
    chars.next_back();
    let trimmed = chars.as_str().trim();

    if vertical {
        trimmed.chars().filter(|c| !matches!(c, ' ' | '\n')).collect()
    } else {
        trimmed.to_string()
    }
}
