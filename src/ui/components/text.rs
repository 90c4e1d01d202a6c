//! Text layout helpers for fixed-width output.

/// Word-wraps `text` to `width` columns, keeping at most `max_lines` lines.
///
/// Whitespace, including newlines, is collapsed. Words longer than a line are
/// split. When text is cut off the last kept line ends with `…`.
pub fn wrap_clamped(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if max_lines == 0 {
        return Vec::new();
    }
    let width = width.max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut truncated = false;

    'words: for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };

            if needed <= width {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current_len += word.len();
                current.extend(word);
                break;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                if lines.len() == max_lines {
                    truncated = true;
                    break 'words;
                }
                continue;
            }

            let rest = word.split_off(width);
            current.extend(word);
            current_len = width;
            word = rest;
        }
    }

    if !truncated && current_len > 0 {
        lines.push(current);
    }

    if truncated {
        if let Some(last) = lines.last_mut() {
            let keep = last.chars().count().min(width - 1);
            *last = last.chars().take(keep).collect::<String>();
            last.push('…');
        }
    }

    lines
}

/// Pads or cuts `text` to exactly `width` columns.
pub fn fit_width(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.chars().take(width).collect()
    } else {
        let mut out = String::with_capacity(text.len() + width - len);
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(width - len));
        out
    }
}
