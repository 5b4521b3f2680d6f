//! Text measurement, truncation and wrapping. Plotters cannot measure text
//! before drawing, so widths are estimated from the character count.

/// Estimated pixel width of `text` at `font_px`.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Cut `text` so it fits `max_px`, ending in a single ellipsis when shortened.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out: String = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) > max_px {
            out.pop();
            break;
        }
    }
    while !out.is_empty() && estimate_text_width_px(&format!("{out}…"), font_px) > max_px {
        out.pop();
    }
    if out.is_empty() {
        out
    } else {
        out + "…"
    }
}

/// Break `text` into lines no wider than `max_px`, on word boundaries where
/// possible. Words longer than a line are split by characters.
pub fn wrap_text_to_width(text: &str, font_px: u32, max_px: u32) -> Vec<String> {
    if max_px <= 12 {
        return vec![truncate_to_width(text, font_px, max_px)];
    }
    let fits = |s: &str| estimate_text_width_px(s, font_px) <= max_px;

    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };
        if fits(&candidate) {
            cur = candidate;
            continue;
        }
        if !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
            if fits(word) {
                cur = word.to_string();
                continue;
            }
        }
        // hard break
        for ch in word.chars() {
            cur.push(ch);
            if !fits(&cur) {
                cur.pop();
                if cur.is_empty() {
                    break;
                }
                lines.push(std::mem::take(&mut cur));
                cur.push(ch);
            }
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}
