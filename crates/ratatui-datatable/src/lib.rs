//! `ratatui-datatable` is a paginated, sortable, selectable table widget for ratatui.
//!
//! The state lives in [`ratatui_datatable_core`] (re-exported here as [`state`]): a
//! [`DataTable`] derives the visible page from your rows, and this crate's [`DataTableView`]
//! draws it and maps input to table operations.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you feed [`input::InputEvent`]s and call `render` from your app.
//! - No async runtime. In server-driven mode the table tells you (through callbacks or the
//!   returned [`view::DataTableAction`]) when to fetch another page; fetching is up to you.
//! - Selection follows row identity, so it is preserved while sorting and paging.
//!
//! ## Getting started
//!
//! ```no_run
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use ratatui_datatable::Column;
//! use ratatui_datatable::DataTable;
//! use ratatui_datatable::DataTableView;
//! use ratatui_datatable::TableRow;
//! use ratatui_datatable::theme::Theme;
//!
//! struct Host {
//!     name: String,
//!     load: f64,
//! }
//!
//! impl TableRow for Host {
//!     type Id = String;
//!     fn id(&self) -> String {
//!         self.name.clone()
//!     }
//! }
//!
//! let table = DataTable::new(
//!     vec![
//!         Column::new("name", "Host", |h: &Host| h.name.as_str().into()).sortable(),
//!         Column::new("load", "Load", |h: &Host| h.load.into()).sortable().width(6),
//!     ],
//!     vec![Host { name: "db-1".into(), load: 0.7 }],
//! )
//! .unwrap();
//!
//! let mut view = DataTableView::new();
//! let area = Rect::new(0, 0, 40, 8);
//! let mut buf = Buffer::empty(area);
//! view.render(area, &mut buf, &Theme::default(), &table);
//! ```
pub use ratatui_datatable_core as state;

pub use ratatui_datatable_core::column::Column;
pub use ratatui_datatable_core::events::Callbacks;
pub use ratatui_datatable_core::options::DataMode;
pub use ratatui_datatable_core::options::TableOptions;
pub use ratatui_datatable_core::row::CellValue;
pub use ratatui_datatable_core::row::TableRow;
pub use ratatui_datatable_core::selection::SelectionScope;
pub use ratatui_datatable_core::sort::SortDirection;
pub use ratatui_datatable_core::sort::SortState;
pub use ratatui_datatable_core::table::DataTable;

pub mod theme;

pub mod render;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod help;
pub mod input;
pub mod keymap;
pub mod view;

pub use view::DataTableView;
