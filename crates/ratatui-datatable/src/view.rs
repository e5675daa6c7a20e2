use crate::help::HelpBar;
use crate::help::HelpBarOptions;
use crate::input::InputEvent;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::TableBindings;
use crate::keymap::TableCommand;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui_datatable_core::pagination::PaginationState;
use ratatui_datatable_core::row::TableRow;
use ratatui_datatable_core::selection::CheckboxState;
use ratatui_datatable_core::table::DataTable;
use tracing::trace;

/// Width of the leading `[x] ` column.
const CHECKBOX_WIDTH: u16 = 4;

/// What changed in the underlying [`DataTable`] as a result of an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableChange {
    Page,
    PageSize,
    Sort,
    Selection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataTableAction {
    None,
    /// Only view state (cursor, focused column) moved.
    Redraw,
    /// `Enter` on a row; the index is the row's position on the current page.
    Activated(usize),
    Changed(TableChange),
}

/// Options for [`DataTableView`].
///
/// Styles left at `Style::default()` fall back to the [`Theme`] passed to `render`.
#[derive(Clone, Debug)]
pub struct DataTableViewOptions {
    pub show_header: bool,
    pub show_footer: bool,
    pub show_help: bool,
    pub show_checkboxes: bool,
    pub col_gap: u16,
    pub style: Style,
    pub header_style: Style,
    pub footer_style: Style,
    pub grid_line_style: Style,
    pub cursor_style: Style,
    pub selected_style: Style,
    pub focused_column_style: Style,
    pub empty_message: String,
    pub loading_message: String,
}

impl Default for DataTableViewOptions {
    fn default() -> Self {
        Self {
            show_header: true,
            show_footer: true,
            show_help: false,
            show_checkboxes: true,
            col_gap: 1,
            style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            footer_style: Style::default(),
            grid_line_style: Style::default(),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            selected_style: Style::default().add_modifier(Modifier::BOLD),
            focused_column_style: Style::default().add_modifier(Modifier::UNDERLINED),
            empty_message: "No data".to_string(),
            loading_message: "Loading...".to_string(),
        }
    }
}

/// Geometry of the last render, kept for mouse hit-testing.
#[derive(Clone, Debug, Default)]
struct HitMap {
    header: Option<Rect>,
    body: Rect,
    checkbox: Option<(u16, u16)>,
    columns: Vec<(u16, u16)>,
    scroll: usize,
}

impl HitMap {
    fn column_at(&self, x: u16) -> Option<usize> {
        self.columns
            .iter()
            .position(|&(start, width)| x >= start && x < start + width)
    }

    fn in_checkbox(&self, x: u16) -> bool {
        self.checkbox
            .is_some_and(|(start, width)| x >= start && x < start + width)
    }
}

struct Regions {
    header: Option<Rect>,
    body: Rect,
    footer: Option<Rect>,
    help: Option<Rect>,
}

/// Renders one page of a [`DataTable`] and turns key/mouse input into table operations.
///
/// The view owns only presentation state: the row cursor (an index into the visible page), the
/// focused column, and a scroll offset for pages taller than the body area. Sort, page, and
/// selection live in the table, so the same table can be shown by several views.
pub struct DataTableView {
    options: DataTableViewOptions,
    bindings: TableBindings,
    cursor: usize,
    focused_column: usize,
    scroll: usize,
    body_height: usize,
    loading: bool,
    hit_map: HitMap,
}

impl Default for DataTableView {
    fn default() -> Self {
        Self::with_options(DataTableViewOptions::default())
    }
}

impl DataTableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DataTableViewOptions) -> Self {
        Self {
            options,
            bindings: TableBindings::default(),
            cursor: 0,
            focused_column: 0,
            scroll: 0,
            body_height: 0,
            loading: false,
            hit_map: HitMap::default(),
        }
    }

    pub fn options(&self) -> &DataTableViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DataTableViewOptions) {
        self.options = options;
    }

    pub fn bindings(&self) -> &TableBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: TableBindings) {
        self.bindings = bindings;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
        self.ensure_cursor_visible();
    }

    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    pub fn set_focused_column(&mut self, column: usize) {
        self.focused_column = column;
    }

    /// While loading, the body shows the loading message instead of rows, and commands that act
    /// on rows (cursor, row and header checkboxes, activation) are ignored.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The row under the cursor on the current page.
    pub fn cursor_row<'a, R: TableRow>(&self, table: &'a DataTable<R>) -> Option<&'a R> {
        table.visible_rows().get(self.cursor).copied()
    }

    pub fn handle_event<R: TableRow>(
        &mut self,
        event: InputEvent,
        table: &mut DataTable<R>,
    ) -> DataTableAction {
        match event {
            InputEvent::Key(key) => match self.bindings.command_for(&key) {
                Some(command) => self.apply(command, table),
                None => DataTableAction::None,
            },
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, table),
        }
    }

    /// Runs `command` against `table`, as if its key had been pressed.
    pub fn apply<R: TableRow>(
        &mut self,
        command: TableCommand,
        table: &mut DataTable<R>,
    ) -> DataTableAction {
        trace!(?command, "data table command");
        if self.loading && acts_on_rows(command) {
            return DataTableAction::None;
        }
        let visible = table.visible_rows().len();
        match command {
            TableCommand::CursorUp => self.move_cursor(-1, visible),
            TableCommand::CursorDown => self.move_cursor(1, visible),
            TableCommand::PreviousPage => self.page_changed(table.previous_page()),
            TableCommand::NextPage => self.page_changed(table.next_page()),
            TableCommand::FirstPage => self.page_changed(table.first_page()),
            TableCommand::LastPage => self.page_changed(table.last_page()),
            TableCommand::PreviousColumn => self.move_column(-1, table.columns().len()),
            TableCommand::NextColumn => self.move_column(1, table.columns().len()),
            TableCommand::SortColumn => self.sort_focused(table),
            TableCommand::ToggleRow => {
                let id = table.visible_rows().get(self.cursor).map(|r| r.id());
                let toggled = id.is_some_and(|id| table.toggle(id));
                changed_if(toggled, TableChange::Selection)
            }
            TableCommand::ToggleAll => changed_if(table.toggle_all(), TableChange::Selection),
            TableCommand::ClearSelection => {
                changed_if(table.clear_selection(), TableChange::Selection)
            }
            TableCommand::CyclePageSize => {
                let action = changed_if(table.cycle_page_size(), TableChange::PageSize);
                self.clamp_cursor(table.visible_rows().len());
                action
            }
            TableCommand::Activate => {
                if self.cursor < visible {
                    DataTableAction::Activated(self.cursor)
                } else {
                    DataTableAction::None
                }
            }
        }
    }

    fn handle_mouse<R: TableRow>(
        &mut self,
        mouse: MouseEvent,
        table: &mut DataTable<R>,
    ) -> DataTableAction {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.apply(TableCommand::CursorUp, table),
            MouseEventKind::ScrollDown => self.apply(TableCommand::CursorDown, table),
            MouseEventKind::LeftClick => {
                if let Some(header) = self.hit_map.header
                    && contains(header, mouse.x, mouse.y)
                {
                    if self.hit_map.in_checkbox(mouse.x) {
                        return self.apply(TableCommand::ToggleAll, table);
                    }
                    return match self.hit_map.column_at(mouse.x) {
                        Some(col) => {
                            self.focused_column = col;
                            self.sort_focused(table)
                        }
                        None => DataTableAction::None,
                    };
                }

                let body = self.hit_map.body;
                if self.loading || !contains(body, mouse.x, mouse.y) {
                    return DataTableAction::None;
                }
                let row = self.hit_map.scroll + (mouse.y - body.y) as usize;
                if row >= table.visible_rows().len() {
                    return DataTableAction::None;
                }
                self.cursor = row;
                if let Some(col) = self.hit_map.column_at(mouse.x) {
                    self.focused_column = col;
                }
                if self.hit_map.in_checkbox(mouse.x) {
                    return self.apply(TableCommand::ToggleRow, table);
                }
                DataTableAction::Redraw
            }
        }
    }

    fn move_cursor(&mut self, delta: isize, visible: usize) -> DataTableAction {
        if visible == 0 {
            return DataTableAction::None;
        }
        let next = self
            .cursor
            .saturating_add_signed(delta)
            .min(visible - 1);
        if next == self.cursor {
            return DataTableAction::None;
        }
        self.cursor = next;
        self.ensure_cursor_visible();
        DataTableAction::Redraw
    }

    fn move_column(&mut self, delta: isize, columns: usize) -> DataTableAction {
        if columns == 0 {
            return DataTableAction::None;
        }
        let next = self
            .focused_column
            .saturating_add_signed(delta)
            .min(columns - 1);
        if next == self.focused_column {
            return DataTableAction::None;
        }
        self.focused_column = next;
        DataTableAction::Redraw
    }

    fn page_changed(&mut self, changed: bool) -> DataTableAction {
        if !changed {
            return DataTableAction::None;
        }
        self.cursor = 0;
        self.scroll = 0;
        DataTableAction::Changed(TableChange::Page)
    }

    fn sort_focused<R: TableRow>(&mut self, table: &mut DataTable<R>) -> DataTableAction {
        let key = table
            .columns()
            .get(self.focused_column)
            .map(|c| c.key().to_string());
        match key {
            Some(key) => changed_if(table.set_sort(&key), TableChange::Sort),
            None => DataTableAction::None,
        }
    }

    fn clamp_cursor(&mut self, visible: usize) {
        self.cursor = self.cursor.min(visible.saturating_sub(1));
        self.ensure_cursor_visible();
    }

    fn ensure_cursor_visible(&mut self) {
        if self.body_height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.body_height {
            self.scroll = self.cursor + 1 - self.body_height;
        }
    }

    fn regions(&self, area: Rect) -> Regions {
        let mut top = area.y;
        let mut bottom = area.y + area.height;

        let mut take_top = |enabled: bool| {
            (enabled && bottom > top).then(|| {
                top += 1;
                Rect::new(area.x, top - 1, area.width, 1)
            })
        };
        let header = take_top(self.options.show_header);

        let mut take_bottom = |enabled: bool| {
            (enabled && bottom > top).then(|| {
                bottom -= 1;
                Rect::new(area.x, bottom, area.width, 1)
            })
        };
        let help = take_bottom(self.options.show_help);
        let footer = take_bottom(self.options.show_footer);

        Regions {
            header,
            body: Rect::new(area.x, top, area.width, bottom - top),
            footer,
            help,
        }
    }

    pub fn render<R: TableRow>(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        table: &DataTable<R>,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let base_style = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        let header_style = self.options.header_style.patch(theme.accent);
        let grid_line_style = if self.options.grid_line_style == Style::default() {
            theme.text_muted
        } else {
            self.options.grid_line_style
        };
        let footer_style = if self.options.footer_style == Style::default() {
            theme.text_muted
        } else {
            self.options.footer_style
        };
        let selected_style = base_style.patch(self.options.selected_style);
        let cursor_style = base_style.patch(self.options.cursor_style);

        buf.set_style(area, base_style);
        let regions = self.regions(area);
        let view = table.view();

        self.body_height = regions.body.height as usize;
        self.focused_column = self
            .focused_column
            .min(table.columns().len().saturating_sub(1));
        self.clamp_cursor(view.rows.len());
        let max_scroll = view.rows.len().saturating_sub(self.body_height);
        self.scroll = self.scroll.min(max_scroll);

        self.hit_map = self.layout_columns(area, table);
        self.hit_map.header = regions.header;
        self.hit_map.body = regions.body;
        self.hit_map.scroll = self.scroll;

        if let Some(header) = regions.header {
            buf.set_style(header, header_style);
            self.render_header(header, buf, table, view.header_checkbox, header_style);
            self.render_separators(header, buf, grid_line_style);
        }

        let body = regions.body;
        if body.height > 0 {
            let message = if self.loading {
                Some(self.options.loading_message.as_str())
            } else if view.rows.is_empty() {
                Some(self.options.empty_message.as_str())
            } else {
                None
            };
            if let Some(message) = message {
                render::put_str(body.x, body.y, body.width, buf, message, theme.text_muted);
            } else {
                for (dy, (index, row)) in view
                    .rows
                    .iter()
                    .enumerate()
                    .skip(self.scroll)
                    .take(body.height as usize)
                    .enumerate()
                {
                    let line = Rect::new(body.x, body.y + dy as u16, body.width, 1);
                    let selected = view.selection.contains(&row.id());
                    let style = if index == self.cursor {
                        cursor_style
                    } else if selected {
                        selected_style
                    } else {
                        base_style
                    };
                    buf.set_style(line, style);
                    self.render_row(line, buf, table, row, selected, style);
                    self.render_separators(line, buf, grid_line_style.patch(style));
                }
            }
        }

        if let Some(footer) = regions.footer {
            buf.set_style(footer, footer_style);
            let text = footer_text(view.pagination, view.selection.len());
            render::put_str_ellipsized(footer.x, footer.y, footer.width, buf, &text, footer_style);
        }

        if let Some(help) = regions.help {
            HelpBar::with_options(
                self.bindings.help(),
                HelpBarOptions {
                    style: theme.text_muted,
                    key_style: theme.accent,
                    ..Default::default()
                },
            )
            .render_ref(help, buf);
        }
    }

    fn layout_columns<R: TableRow>(&self, area: Rect, table: &DataTable<R>) -> HitMap {
        let right = area.x + area.width;
        let mut x = area.x;
        let mut map = HitMap::default();

        if self.options.show_checkboxes {
            let w = CHECKBOX_WIDTH.min(area.width);
            map.checkbox = Some((x, w));
            x += w;
        }
        for col in table.columns() {
            if x >= right {
                break;
            }
            let w = col.preferred_width().min(right - x);
            map.columns.push((x, w));
            x = x.saturating_add(w).saturating_add(self.options.col_gap);
        }
        map
    }

    fn render_header<R: TableRow>(
        &self,
        line: Rect,
        buf: &mut Buffer,
        table: &DataTable<R>,
        checkbox: CheckboxState,
        style: Style,
    ) {
        if let Some((x, w)) = self.hit_map.checkbox {
            render::put_str(x, line.y, w, buf, checkbox.symbol(), style);
        }
        let sort = table.sort();
        for (i, (col, &(x, w))) in table
            .columns()
            .iter()
            .zip(self.hit_map.columns.iter())
            .enumerate()
        {
            let indicator = sort.direction_for(col.key()).indicator();
            let label = if indicator.is_empty() {
                col.label().to_string()
            } else {
                format!("{} {indicator}", col.label())
            };
            let style = if i == self.focused_column {
                style.patch(self.options.focused_column_style)
            } else {
                style
            };
            render::put_str_ellipsized(x, line.y, w, buf, &label, style);
        }
    }

    fn render_row<R: TableRow>(
        &self,
        line: Rect,
        buf: &mut Buffer,
        table: &DataTable<R>,
        row: &R,
        selected: bool,
        style: Style,
    ) {
        if let Some((x, w)) = self.hit_map.checkbox {
            let mark = if selected {
                CheckboxState::Checked
            } else {
                CheckboxState::Unchecked
            };
            render::put_str(x, line.y, w, buf, mark.symbol(), style);
        }
        for (col, &(x, w)) in table.columns().iter().zip(self.hit_map.columns.iter()) {
            let text = col.value(row).to_string();
            render::put_str_ellipsized(x, line.y, w, buf, &text, style);
        }
    }

    fn render_separators(&self, line: Rect, buf: &mut Buffer, style: Style) {
        if self.options.col_gap == 0 {
            return;
        }
        let right = line.x + line.width;
        let count = self.hit_map.columns.len();
        for &(x, w) in self.hit_map.columns.iter().take(count.saturating_sub(1)) {
            let sep_x = x + w;
            if sep_x < right {
                render::put_str(sep_x, line.y, 1, buf, "│", style);
            }
        }
    }
}

/// Commands that need the rows on screen; ignored while the loading message hides them.
fn acts_on_rows(command: TableCommand) -> bool {
    matches!(
        command,
        TableCommand::CursorUp
            | TableCommand::CursorDown
            | TableCommand::ToggleRow
            | TableCommand::ToggleAll
            | TableCommand::Activate
    )
}

fn changed_if(changed: bool, change: TableChange) -> DataTableAction {
    if changed {
        DataTableAction::Changed(change)
    } else {
        DataTableAction::None
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// `11-20 of 42 · page 2/5 · 10 per page · 3 selected`
pub fn footer_text(pagination: PaginationState, selected: usize) -> String {
    let mut s = match pagination.row_range() {
        Some((first, last)) => format!("{first}-{last} of {}", pagination.total_count()),
        None => format!("0 of {}", pagination.total_count()),
    };
    s.push_str(&format!(
        " · page {}/{} · {} per page",
        pagination.page_index() + 1,
        pagination.page_count(),
        pagination.page_size()
    ));
    if selected > 0 {
        s.push_str(&format!(" · {selected} selected"));
    }
    s
}
