use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A named group of keys, shown in the help bar as `help_key help_desc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }
}

/// Exact match on code and modifiers. Shift is ignored for characters, whose case already
/// carries it (`G` arrives with shift on most backends).
pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    if pattern.code != event.code {
        return false;
    }
    let (p, e) = (pattern.modifiers, event.modifiers);
    let shift_ok = matches!(event.code, KeyCode::Char(_)) || p.shift == e.shift;
    shift_ok && p.ctrl == e.ctrl && p.alt == e.alt
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}

/// Everything the table widget can be asked to do from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableCommand {
    CursorUp,
    CursorDown,
    PreviousPage,
    NextPage,
    FirstPage,
    LastPage,
    PreviousColumn,
    NextColumn,
    SortColumn,
    ToggleRow,
    ToggleAll,
    ClearSelection,
    CyclePageSize,
    Activate,
}

/// Key bindings for [`crate::view::DataTableView`].
///
/// Defaults are Vim-flavoured: `j`/`k` move the row cursor, `h`/`l` flip pages, `g`/`G` jump to
/// the first/last page.
#[derive(Clone, Debug)]
pub struct TableBindings {
    pub cursor_up: Binding,
    pub cursor_down: Binding,
    pub previous_page: Binding,
    pub next_page: Binding,
    pub first_page: Binding,
    pub last_page: Binding,
    pub previous_column: Binding,
    pub next_column: Binding,
    pub sort_column: Binding,
    pub toggle_row: Binding,
    pub toggle_all: Binding,
    pub clear_selection: Binding,
    pub cycle_page_size: Binding,
    pub activate: Binding,
}

impl Default for TableBindings {
    fn default() -> Self {
        Self {
            cursor_up: Binding::new("↑/k", "up", vec![key(KeyCode::Up), key_char('k')]),
            cursor_down: Binding::new("↓/j", "down", vec![key(KeyCode::Down), key_char('j')]),
            previous_page: Binding::new(
                "←/h",
                "prev page",
                vec![key(KeyCode::Left), key(KeyCode::PageUp), key_char('h')],
            ),
            next_page: Binding::new(
                "→/l",
                "next page",
                vec![key(KeyCode::Right), key(KeyCode::PageDown), key_char('l')],
            ),
            first_page: Binding::new("g", "first", vec![key(KeyCode::Home), key_char('g')]),
            last_page: Binding::new("G", "last", vec![key(KeyCode::End), key_char('G')]),
            previous_column: Binding::new(
                "[",
                "prev col",
                vec![key(KeyCode::BackTab), key_char('[')],
            ),
            next_column: Binding::new("]", "next col", vec![key(KeyCode::Tab), key_char(']')]),
            sort_column: Binding::new("s", "sort", vec![key_char('s')]),
            toggle_row: Binding::new("space", "select", vec![key_char(' ')]),
            toggle_all: Binding::new("a", "select all", vec![key_char('a'), key_ctrl('a')]),
            clear_selection: Binding::new("esc", "clear", vec![key(KeyCode::Esc)]),
            cycle_page_size: Binding::new("p", "page size", vec![key_char('p')]),
            activate: Binding::new("enter", "open", vec![key(KeyCode::Enter)]),
        }
    }
}

impl TableBindings {
    fn table(&self) -> [(&Binding, TableCommand); 14] {
        [
            (&self.cursor_up, TableCommand::CursorUp),
            (&self.cursor_down, TableCommand::CursorDown),
            (&self.previous_page, TableCommand::PreviousPage),
            (&self.next_page, TableCommand::NextPage),
            (&self.first_page, TableCommand::FirstPage),
            (&self.last_page, TableCommand::LastPage),
            (&self.previous_column, TableCommand::PreviousColumn),
            (&self.next_column, TableCommand::NextColumn),
            (&self.sort_column, TableCommand::SortColumn),
            (&self.toggle_row, TableCommand::ToggleRow),
            (&self.toggle_all, TableCommand::ToggleAll),
            (&self.clear_selection, TableCommand::ClearSelection),
            (&self.cycle_page_size, TableCommand::CyclePageSize),
            (&self.activate, TableCommand::Activate),
        ]
    }

    pub fn command_for(&self, key: &KeyEvent) -> Option<TableCommand> {
        self.table()
            .into_iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, command)| command)
    }

    /// Short list for a one-line help bar.
    pub fn help(&self) -> Vec<Binding> {
        vec![
            self.next_page.clone(),
            self.sort_column.clone(),
            self.toggle_row.clone(),
            self.toggle_all.clone(),
            self.cycle_page_size.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("a", "all", vec![key_char('a')]);
        assert!(b.matches(&key_char('a')));
        assert!(!b.matches(&key_ctrl('a')));
    }

    #[test]
    fn uppercase_char_matches_with_shift() {
        let shifted = key_char('G').with_modifiers(KeyModifiers {
            shift: true,
            ..KeyModifiers::none()
        });
        let bindings = TableBindings::default();
        assert_eq!(bindings.command_for(&shifted), Some(TableCommand::LastPage));
    }

    #[test]
    fn default_bindings_resolve() {
        let bindings = TableBindings::default();
        assert_eq!(
            bindings.command_for(&key(KeyCode::Down)),
            Some(TableCommand::CursorDown)
        );
        assert_eq!(
            bindings.command_for(&key_char(' ')),
            Some(TableCommand::ToggleRow)
        );
        assert_eq!(bindings.command_for(&key_char('z')), None);
    }
}
