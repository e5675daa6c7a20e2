//! `ratatui-datatable-core` holds the UI-agnostic state behind a paginated data table.
//!
//! Nothing in this crate draws or reads from a terminal. It reconciles a dataset with the sort,
//! page, and selection actions a user performs, and derives the rows that belong on screen.
//! The widget crate `ratatui-datatable` renders that derived view with ratatui.
//!
//! ## Pieces
//!
//! - [`sort::SortState`]: active column and direction, plus the comparator derived from it.
//! - [`pagination::PaginationState`]: page index/size against a total count, always clamped.
//! - [`selection::RowSelection`]: selected row identifiers with all/indeterminate queries.
//! - [`table::DataTable`]: owns rows and columns, composes filter → sort → page slice, and
//!   notifies the host through [`events::Callbacks`].
//!
//! ## Identity, not position
//!
//! Rows implement [`row::TableRow`] and expose a stable identifier. Selection is keyed by that
//! identifier, so it survives sorting, paging, and filtering.
//!
//! ## Getting started
//!
//! ```
//! use ratatui_datatable_core::column::Column;
//! use ratatui_datatable_core::row::TableRow;
//! use ratatui_datatable_core::table::DataTable;
//!
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl TableRow for User {
//!     type Id = u32;
//!     fn id(&self) -> u32 {
//!         self.id
//!     }
//! }
//!
//! let mut table = DataTable::builder()
//!     .column(Column::new("name", "Name", |u: &User| u.name.as_str().into()).sortable())
//!     .rows(vec![
//!         User { id: 1, name: "b".into() },
//!         User { id: 2, name: "a".into() },
//!     ])
//!     .build()
//!     .unwrap();
//!
//! table.set_sort("name");
//! let ids: Vec<u32> = table.visible_rows().iter().map(|u| u.id).collect();
//! assert_eq!(ids, vec![2, 1]);
//! ```
pub mod column;
pub mod error;
pub mod events;
pub mod options;
pub mod pagination;
pub mod row;
pub mod selection;
pub mod sort;
pub mod table;

pub use error::Result;
pub use error::TableError;
