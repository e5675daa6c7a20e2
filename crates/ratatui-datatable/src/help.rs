use crate::keymap::Binding;
use crate::render;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct HelpBarOptions {
    pub style: Style,
    pub key_style: Style,
    pub separator: String,
}

impl Default for HelpBarOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            key_style: Style::default(),
            separator: " · ".to_string(),
        }
    }
}

/// One-line `key desc · key desc` strip. Entries that do not fit are dropped whole.
#[derive(Clone, Debug, Default)]
pub struct HelpBar {
    bindings: Vec<Binding>,
    options: HelpBarOptions,
}

impl HelpBar {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            options: HelpBarOptions::default(),
        }
    }

    pub fn with_options(bindings: Vec<Binding>, options: HelpBarOptions) -> Self {
        Self { bindings, options }
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.options.style);

        let mut x = area.x;
        let right = area.x + area.width;
        for (i, b) in self.bindings.iter().enumerate() {
            let sep = if i > 0 { self.options.separator.as_str() } else { "" };
            let entry_w = render::str_width(sep)
                + render::str_width(&b.help_key)
                + 1
                + render::str_width(&b.help_desc);
            if x as usize + entry_w > right as usize {
                break;
            }
            x += render::put_str(x, area.y, right - x, buf, sep, self.options.style);
            x += render::put_str(x, area.y, right - x, buf, &b.help_key, self.options.key_style);
            x += render::put_str(x, area.y, right - x, buf, " ", self.options.style);
            x += render::put_str(x, area.y, right - x, buf, &b.help_desc, self.options.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;

    fn bindings() -> Vec<Binding> {
        vec![
            Binding::new("q", "quit", vec![keymap::key_char('q')]),
            Binding::new("s", "sort", vec![keymap::key_char('s')]),
        ]
    }

    #[test]
    fn drops_entries_that_do_not_fit() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        HelpBar::new(bindings()).render_ref(Rect::new(0, 0, 10, 1), &mut buf);
        let text: String = (0..10)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol()).unwrap_or(""))
            .collect();
        assert_eq!(text, "q quit    ");
    }

    #[test]
    fn narrow_area_renders_nothing() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        HelpBar::new(bindings()).render_ref(Rect::new(0, 0, 3, 1), &mut buf);
        assert!(buf.content.iter().all(|c| c.symbol() == " "));
    }
}
