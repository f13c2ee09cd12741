// Word-wrapped "not enough data" SVG image

/// Greedy word wrap against an approximate characters-per-line limit
/// derived from the width. An over-long word is kept whole even if it
/// overflows.
fn wrap_message(message: &str, chars_per_line: usize) -> Vec<String> {
    let message = message.trim();
    if message.len() <= chars_per_line {
        return vec![message.to_string()];
    }

    let mut lines = Vec::new();
    let mut chars_left = chars_per_line as i64;
    let mut line = String::new();
    for word in message.split_whitespace() {
        let word_length = word.len() as i64;
        if chars_left > 0 && (word_length <= chars_left || word_length > chars_per_line as i64) {
            line.push_str(word);
            line.push(' ');
            chars_left -= word_length;
        } else {
            lines.push(line.trim_end().to_string());
            line = format!("{word} ");
            chars_left = chars_per_line as i64 - word_length;
        }
    }
    let line = line.trim_end();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
    lines
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Render a message image sized consistently with a chart of the given
/// width so the page layout does not jump. Height grows with the number
/// of wrapped lines.
pub fn render_message(message: &str, width: u32) -> String {
    let width = width + 100;
    let chars_per_line = (width / 15) as usize;
    let lines = wrap_message(message, chars_per_line);
    let width = width + 10;
    let height = lines.len() * 30 + 20;

    let spans: String = lines
        .iter()
        .map(|line| format!(r#"<tspan x="0" dy="30">{}</tspan>"#, escape_xml(line)))
        .collect();

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width}" height="{height}"><rect width="100%" height="100%" fill="#272727"/><text x="0" y="0" fill="white" font-size="24" font-family="sans-serif">{spans}</text></svg>"##
    )
}
