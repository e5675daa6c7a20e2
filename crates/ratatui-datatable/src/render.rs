//! Width-aware text placement into a ratatui [`Buffer`].

use ratatui::buffer::Buffer;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub fn str_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Writes `text` at `(x, y)` using at most `max_cols` cells and returns the cells used.
///
/// Zero-width characters are dropped and a wide character that would straddle the limit is not
/// drawn. Control characters (tabs, newlines) render as a single space.
pub fn put_str(x: u16, y: u16, max_cols: u16, buf: &mut Buffer, text: &str, style: Style) -> u16 {
    let mut used = 0u16;
    let mut tmp = [0u8; 4];
    for ch in text.chars() {
        let ch = if ch.is_control() { ' ' } else { ch };
        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if used + w > max_cols {
            break;
        }
        if let Some(cell) = buf.cell_mut((x + used, y)) {
            cell.set_symbol(ch.encode_utf8(&mut tmp));
            cell.set_style(style);
        }
        // The trailing half of a wide glyph must be blank so the terminal does not draw over it.
        for extra in 1..w {
            if let Some(cell) = buf.cell_mut((x + used + extra, y)) {
                cell.set_symbol("");
                cell.set_style(style);
            }
        }
        used += w;
    }
    used
}

/// Like [`put_str`] but replaces the last visible cell with `…` when the text does not fit.
pub fn put_str_ellipsized(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    text: &str,
    style: Style,
) -> u16 {
    if max_cols == 0 {
        return 0;
    }
    if str_width(text) <= max_cols as usize {
        return put_str(x, y, max_cols, buf, text, style);
    }
    let used = put_str(x, y, max_cols - 1, buf, text, style);
    put_str(x + used, y, 1, buf, "…", style);
    used + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn line(buf: &Buffer, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol()).unwrap_or(""))
            .collect()
    }

    #[test]
    fn put_str_stops_at_limit() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        assert_eq!(put_str(0, 0, 3, &mut buf, "abcdef", Style::default()), 3);
        assert_eq!(line(&buf, 6), "abc   ");
    }

    #[test]
    fn wide_char_is_not_split() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        assert_eq!(put_str(0, 0, 3, &mut buf, "你好", Style::default()), 2);
        assert_eq!(line(&buf, 4), "你  ");
    }

    #[test]
    fn ellipsis_marks_truncation() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        put_str_ellipsized(0, 0, 4, &mut buf, "abcdef", Style::default());
        assert_eq!(line(&buf, 5), "abc… ");
    }
}
