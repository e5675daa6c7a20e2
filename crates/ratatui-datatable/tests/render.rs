use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_datatable::CellValue;
use ratatui_datatable::Column;
use ratatui_datatable::DataTable;
use ratatui_datatable::DataTableView;
use ratatui_datatable::TableOptions;
use ratatui_datatable::TableRow;
use ratatui_datatable::input::InputEvent;
use ratatui_datatable::input::MouseEvent;
use ratatui_datatable::input::MouseEventKind;
use ratatui_datatable::keymap;
use ratatui_datatable::theme::Theme;
use ratatui_datatable::view::DataTableAction;
use ratatui_datatable::view::TableChange;

const WIDTH: u16 = 50;
const HEIGHT: u16 = 6;

#[derive(Clone, Debug)]
struct Item {
    id: u32,
    name: &'static str,
    qty: i64,
}

impl TableRow for Item {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn table() -> DataTable<Item> {
    DataTable::builder()
        .column(
            Column::new("name", "Name", |r: &Item| CellValue::from(r.name))
                .sortable()
                .width(8),
        )
        .column(
            Column::new("qty", "Qty", |r: &Item| CellValue::from(r.qty))
                .sortable()
                .width(5),
        )
        .rows(vec![
            Item { id: 1, name: "b", qty: 1 },
            Item { id: 2, name: "a", qty: 2 },
            Item { id: 3, name: "c", qty: 0 },
        ])
        .options(TableOptions {
            page_size: 2,
            ..Default::default()
        })
        .build()
        .expect("valid table")
}

fn draw(view: &mut DataTableView, table: &DataTable<Item>) -> Vec<String> {
    let area = Rect::new(0, 0, WIDTH, HEIGHT);
    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf, &Theme::default(), table);
    (0..HEIGHT)
        .map(|y| {
            (0..WIDTH)
                .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(""))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

fn press(view: &mut DataTableView, table: &mut DataTable<Item>, c: char) -> DataTableAction {
    view.handle_event(InputEvent::Key(keymap::key_char(c)), table)
}

#[test]
fn renders_header_rows_and_footer() {
    let table = table();
    let mut view = DataTableView::new();
    let lines = draw(&mut view, &table);

    assert_eq!(lines[0], "[ ] Name    │Qty");
    assert_eq!(lines[1], "[ ] b       │1");
    assert_eq!(lines[2], "[ ] a       │2");
    assert_eq!(lines[3], "");
    assert_eq!(lines[5], "1-2 of 3 · page 1/2 · 2 per page");
}

#[test]
fn keyboard_sorts_selects_and_pages() {
    let mut table = table();
    let mut view = DataTableView::new();
    draw(&mut view, &table);

    assert_eq!(
        press(&mut view, &mut table, 's'),
        DataTableAction::Changed(TableChange::Sort)
    );
    let lines = draw(&mut view, &table);
    assert_eq!(lines[0], "[ ] Name ▲  │Qty");
    assert_eq!(lines[1], "[ ] a       │2");

    assert_eq!(press(&mut view, &mut table, 'j'), DataTableAction::Redraw);
    assert_eq!(
        press(&mut view, &mut table, ' '),
        DataTableAction::Changed(TableChange::Selection)
    );
    assert!(table.is_selected(&1));
    let lines = draw(&mut view, &table);
    assert_eq!(lines[0], "[-] Name ▲  │Qty");
    assert_eq!(lines[2], "[x] b       │1");
    assert!(lines[5].ends_with("1 selected"));

    assert_eq!(
        press(&mut view, &mut table, 'l'),
        DataTableAction::Changed(TableChange::Page)
    );
    assert_eq!(view.cursor(), 0);
    let lines = draw(&mut view, &table);
    assert_eq!(lines[1], "[ ] c       │0");
    assert!(table.is_selected(&1));

    assert_eq!(press(&mut view, &mut table, 'l'), DataTableAction::None);
    assert_eq!(
        press(&mut view, &mut table, '\n'),
        DataTableAction::None,
        "unbound keys do nothing"
    );
}

#[test]
fn enter_activates_cursor_row() {
    let mut table = table();
    let mut view = DataTableView::new();
    view.handle_event(
        InputEvent::Key(keymap::key(ratatui_datatable::input::KeyCode::Down)),
        &mut table,
    );
    let action = view.handle_event(
        InputEvent::Key(keymap::key(ratatui_datatable::input::KeyCode::Enter)),
        &mut table,
    );
    assert_eq!(action, DataTableAction::Activated(1));
    assert_eq!(view.cursor_row(&table).map(|r| r.id), Some(2));
}

#[test]
fn mouse_click_on_header_sorts_that_column() {
    let mut table = table();
    let mut view = DataTableView::new();
    draw(&mut view, &table);

    let click = |x, y| {
        InputEvent::Mouse(MouseEvent {
            x,
            y,
            kind: MouseEventKind::LeftClick,
        })
    };

    assert_eq!(
        view.handle_event(click(14, 0), &mut table),
        DataTableAction::Changed(TableChange::Sort)
    );
    assert_eq!(table.sort().column(), Some("qty"));
    assert_eq!(view.focused_column(), 1);

    let lines = draw(&mut view, &table);
    assert_eq!(lines[0], "[ ] Name    │Qty ▲");
    assert_eq!(lines[1], "[ ] c       │0");

    assert_eq!(
        view.handle_event(click(1, 2), &mut table),
        DataTableAction::Changed(TableChange::Selection)
    );
    assert!(table.is_selected(&1));

    assert_eq!(
        view.handle_event(click(1, 0), &mut table),
        DataTableAction::Changed(TableChange::Selection)
    );
    assert!(table.is_all_selected());
}

#[test]
fn page_size_cycles_through_options() {
    let mut table = table();
    let mut view = DataTableView::new();
    assert_eq!(
        press(&mut view, &mut table, 'p'),
        DataTableAction::Changed(TableChange::PageSize)
    );
    assert_eq!(table.pagination().page_size(), 10);
    let lines = draw(&mut view, &table);
    assert_eq!(lines[3], "[ ] c       │0");
    assert_eq!(lines[5], "1-3 of 3 · page 1/1 · 10 per page");
}

#[test]
fn empty_and_loading_states() {
    let mut table = table();
    table.set_rows(Vec::new());
    let mut view = DataTableView::new();
    let lines = draw(&mut view, &table);
    assert_eq!(lines[1], "No data");
    assert_eq!(lines[5], "0 of 0 · page 1/1 · 2 per page");

    view.set_loading(true);
    let lines = draw(&mut view, &table);
    assert_eq!(lines[1], "Loading...");
}

#[test]
fn loading_ignores_row_input_but_keeps_paging() {
    let mut table = table();
    let mut view = DataTableView::new();
    view.set_loading(true);
    draw(&mut view, &table);

    assert_eq!(press(&mut view, &mut table, ' '), DataTableAction::None);
    assert_eq!(press(&mut view, &mut table, 'a'), DataTableAction::None);
    assert_eq!(press(&mut view, &mut table, 'j'), DataTableAction::None);
    assert_eq!(view.cursor(), 0);
    assert_eq!(
        view.handle_event(
            InputEvent::Key(keymap::key(ratatui_datatable::input::KeyCode::Enter)),
            &mut table
        ),
        DataTableAction::None
    );

    let click = |x, y| {
        InputEvent::Mouse(MouseEvent {
            x,
            y,
            kind: MouseEventKind::LeftClick,
        })
    };
    assert_eq!(view.handle_event(click(1, 1), &mut table), DataTableAction::None);
    assert_eq!(view.handle_event(click(1, 0), &mut table), DataTableAction::None);
    assert!(table.selection().is_empty());

    assert_eq!(
        press(&mut view, &mut table, 'l'),
        DataTableAction::Changed(TableChange::Page)
    );

    view.set_loading(false);
    assert_eq!(
        press(&mut view, &mut table, ' '),
        DataTableAction::Changed(TableChange::Selection)
    );
}
