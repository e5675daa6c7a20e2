use crate::row::CellValue;
use std::cmp::Ordering;
use std::fmt;

pub const DEFAULT_COLUMN_WIDTH: u16 = 12;

type Accessor<R> = Box<dyn Fn(&R) -> CellValue>;

/// Describes one column of a [`crate::table::DataTable`].
///
/// The accessor is the single source of truth for a cell: it feeds sorting, the text filter, and
/// rendering.
pub struct Column<R> {
    key: String,
    label: String,
    sortable: bool,
    width: u16,
    accessor: Accessor<R>,
}

impl<R> Column<R> {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&R) -> CellValue + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            width: DEFAULT_COLUMN_WIDTH,
            accessor: Box::new(accessor),
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Preferred width in terminal columns. Zero is bumped to one.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn preferred_width(&self) -> u16 {
        self.width
    }

    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }

    /// Ascending comparison of two rows by this column's value.
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        self.value(a).cmp(&self.value(b))
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_flags_and_clamps_width() {
        let col = Column::new("n", "N", |v: &i64| CellValue::from(*v))
            .sortable()
            .width(0);
        assert!(col.is_sortable());
        assert_eq!(col.preferred_width(), 1);
        assert_eq!(col.compare(&1, &2), Ordering::Less);
    }
}
