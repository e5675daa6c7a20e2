use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_datatable::Callbacks;
use ratatui_datatable::CellValue;
use ratatui_datatable::Column;
use ratatui_datatable::DataTable;
use ratatui_datatable::DataTableView;
use ratatui_datatable::TableOptions;
use ratatui_datatable::TableRow;
use ratatui_datatable::crossterm_input::input_event_from_crossterm;
use ratatui_datatable::theme::Theme;
use ratatui_datatable::view::DataTableAction;
use ratatui_datatable::view::DataTableViewOptions;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Debug)]
struct Invoice {
    id: u32,
    customer: String,
    status: &'static str,
    amount: f64,
    overdue: bool,
}

impl TableRow for Invoice {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn invoices() -> Vec<Invoice> {
    const CUSTOMERS: [&str; 6] = ["Acme", "Globex", "Initech", "Umbrella", "Hooli", "Stark"];
    const STATUSES: [&str; 3] = ["paid", "pending", "failed"];
    (1..=137)
        .map(|i: u32| Invoice {
            id: i,
            customer: format!("{} #{i}", CUSTOMERS[i as usize % CUSTOMERS.len()]),
            status: STATUSES[(i as usize * 7) % STATUSES.len()],
            amount: f64::from((i * 7919) % 50_000) / 100.0,
            overdue: i % 5 == 0,
        })
        .collect()
}

fn init_logging() {
    // Logs go to a file: stdout belongs to the terminal UI.
    let Ok(path) = std::env::var("DATATABLE_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> io::Result<()> {
    init_logging();

    let status = Rc::new(RefCell::new(String::from("ready")));
    let (on_page, on_sort, on_sel) = (status.clone(), status.clone(), status.clone());

    let mut table = DataTable::builder()
        .column(Column::new("id", "#", |r: &Invoice| CellValue::from(r.id)).sortable().width(5))
        .column(
            Column::new("customer", "Customer", |r: &Invoice| CellValue::from(&r.customer))
                .sortable()
                .width(16),
        )
        .column(Column::new("status", "Status", |r: &Invoice| CellValue::from(r.status)).width(9))
        .column(
            Column::new("amount", "Amount", |r: &Invoice| CellValue::from(r.amount))
                .sortable()
                .width(10),
        )
        .column(
            Column::new("overdue", "Overdue", |r: &Invoice| CellValue::from(r.overdue))
                .sortable()
                .width(8),
        )
        .rows(invoices())
        .options(TableOptions {
            page_size: 20,
            ..Default::default()
        })
        .callbacks(
            Callbacks::new()
                .on_page_change(move |i| *on_page.borrow_mut() = format!("page -> {}", i + 1))
                .on_sort_change(move |s| {
                    *on_sort.borrow_mut() = format!("sort -> {:?} {:?}", s.column(), s.direction())
                })
                .on_selection_change(move |ids| {
                    *on_sel.borrow_mut() = format!("{} selected", ids.len())
                }),
        )
        .build()
        .map_err(io::Error::other)?;

    let mut view = DataTableView::with_options(DataTableViewOptions {
        show_help: true,
        ..Default::default()
    });

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let theme = Theme::default();

    let res = run(&mut terminal, &theme, &mut table, &mut view, &status);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    table: &mut DataTable<Invoice>,
    view: &mut DataTableView,
    status: &Rc<RefCell<String>>,
) -> io::Result<()> {
    let mut filter: Option<String> = None;

    loop {
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title("DataTable (/ filter, q quit)")
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let buf = f.buffer_mut();
            let table_area = Rect::new(
                inner.x,
                inner.y,
                inner.width,
                inner.height.saturating_sub(1),
            );
            let status_area = Rect::new(inner.x, inner.y + table_area.height, inner.width, 1);

            view.render(table_area, buf, theme, table);

            let line = match &filter {
                Some(q) => format!("filter: {q}_"),
                None => status.borrow().clone(),
            };
            buf.set_span(
                status_area.x,
                status_area.y,
                &Span::styled(line, theme.text_muted),
                status_area.width,
            );
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;

        if let Some(query) = filter.as_mut() {
            if let Event::Key(key) = ev
                && key.kind == KeyEventKind::Press
            {
                match key.code {
                    KeyCode::Esc => {
                        filter = None;
                        table.clear_filter();
                    }
                    KeyCode::Enter => filter = None,
                    KeyCode::Backspace => {
                        query.pop();
                        table.set_text_filter(query);
                    }
                    KeyCode::Char(c) => {
                        query.push(c);
                        table.set_text_filter(query);
                    }
                    _ => {}
                }
            }
            continue;
        }

        if let Event::Key(key) = &ev
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('/') => {
                    filter = Some(String::new());
                    continue;
                }
                _ => {}
            }
        }

        if let Some(ev) = input_event_from_crossterm(ev)
            && let DataTableAction::Activated(_) = view.handle_event(ev, table)
            && let Some(row) = view.cursor_row(table)
        {
            *status.borrow_mut() = format!(
                "opened invoice {} ({}, {:.2})",
                row.id, row.customer, row.amount
            );
        }
    }
}
