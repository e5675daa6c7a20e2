//! The view composer: rows + columns + sort + pagination + selection.
//!
//! All derivation is synchronous. The filtered and sorted row order is memoized on
//! `(data revision, filter revision, sort state)`; the page slice is cut from it on demand, so
//! paging and selection never trigger a re-sort.

use crate::column::Column;
use crate::error::Result;
use crate::error::TableError;
use crate::events::Callbacks;
use crate::events::TableEvent;
use crate::options::DataMode;
use crate::options::TableOptions;
use crate::pagination::PaginationState;
use crate::row::TableRow;
use crate::selection::CheckboxState;
use crate::selection::RowSelection;
use crate::selection::SelectionScope;
use crate::sort::SortState;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;
use tracing::trace;

enum RowFilter<R> {
    Predicate(Box<dyn Fn(&R) -> bool>),
    /// Lower-cased needle matched against every column's display value.
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OrderKey {
    data_revision: u64,
    filter_revision: u64,
    sort: SortState,
}

#[derive(Debug)]
struct RowOrder {
    key: OrderKey,
    indices: Vec<usize>,
}

/// The derived state handed to a renderer.
#[derive(Debug)]
pub struct TableView<'a, R: TableRow> {
    pub rows: Vec<&'a R>,
    pub pagination: PaginationState,
    pub page_count: usize,
    pub sort: &'a SortState,
    pub selection: &'a RowSelection<R::Id>,
    pub header_checkbox: CheckboxState,
}

/// Client- or server-driven table state.
///
/// Every mutating operation returns whether it changed anything. Invalid input never errors:
/// page indices and sizes clamp, and unknown columns or row ids are ignored.
pub struct DataTable<R: TableRow> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    options: TableOptions,
    filter: Option<RowFilter<R>>,
    sort: SortState,
    pagination: PaginationState,
    selection: RowSelection<R::Id>,
    known_ids: BTreeSet<R::Id>,
    callbacks: Callbacks<R::Id>,
    data_revision: u64,
    filter_revision: u64,
    order: Option<RowOrder>,
}

pub struct DataTableBuilder<R: TableRow> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    options: TableOptions,
    sort: SortState,
    callbacks: Callbacks<R::Id>,
}

impl<R: TableRow> Default for DataTableBuilder<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            options: TableOptions::default(),
            sort: SortState::unsorted(),
            callbacks: Callbacks::default(),
        }
    }
}

impl<R: TableRow> DataTableBuilder<R> {
    pub fn column(mut self, column: Column<R>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column<R>>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Initial sort. Ignored if it names an unknown or non-sortable column.
    pub fn sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn callbacks(mut self, callbacks: Callbacks<R::Id>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn build(self) -> Result<DataTable<R>> {
        self.options.validate()?;
        check_unique_keys(&self.columns)?;

        let mut table = DataTable {
            rows: self.rows,
            columns: self.columns,
            pagination: PaginationState::new(self.options.page_size),
            options: self.options,
            filter: None,
            sort: SortState::unsorted(),
            selection: RowSelection::new(),
            known_ids: BTreeSet::new(),
            callbacks: self.callbacks,
            data_revision: 0,
            filter_revision: 0,
            order: None,
        };
        if table.is_sortable(self.sort.column()) {
            table.sort = self.sort;
        }
        table.rebuild_known_ids();
        table.refresh();
        Ok(table)
    }
}

fn check_unique_keys<R>(columns: &[Column<R>]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for col in columns {
        if !seen.insert(col.key()) {
            return Err(TableError::DuplicateColumn {
                key: col.key().to_string(),
            });
        }
    }
    Ok(())
}

impl<R: TableRow> DataTable<R> {
    pub fn builder() -> DataTableBuilder<R> {
        DataTableBuilder::default()
    }

    /// Client-mode table with default options.
    pub fn new(columns: Vec<Column<R>>, rows: Vec<R>) -> Result<Self> {
        Self::builder().columns(columns).rows(rows).build()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key() == key)
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn mode(&self) -> DataMode {
        self.options.mode
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    pub fn selection(&self) -> &RowSelection<R::Id> {
        &self.selection
    }

    pub fn set_callbacks(&mut self, callbacks: Callbacks<R::Id>) {
        self.callbacks = callbacks;
    }

    /// Replaces the dataset.
    ///
    /// In client mode the selection is pruned to ids present in the new rows. In server mode
    /// `rows` is the current page only, so the selection is kept as is.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.update_rows(|current| *current = rows);
    }

    /// Mutates the dataset in place; derived state is recomputed afterwards.
    pub fn update_rows(&mut self, f: impl FnOnce(&mut Vec<R>)) {
        let before = self.pagination;
        f(&mut self.rows);
        self.data_revision = self.data_revision.wrapping_add(1);
        self.rebuild_known_ids();
        debug!(rows = self.rows.len(), revision = self.data_revision, "table data replaced");

        if !self.options.mode.is_server() {
            let known = &self.known_ids;
            if self.selection.retain(|id| known.contains(id)) {
                self.commit_selection();
            }
        }
        self.refresh();
        self.commit_pagination(before);
    }

    /// Replaces the column set. Drops the active sort if its column disappears.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) -> Result<()> {
        check_unique_keys(&columns)?;
        let before = self.pagination;
        self.columns = columns;
        if !self.is_sortable(self.sort.column()) && self.sort.is_sorted() {
            self.sort.clear();
            self.commit_sort();
        }
        // Accessors may have changed under the same keys.
        self.order = None;
        self.refresh();
        self.commit_pagination(before);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: DataMode) {
        if self.options.mode == mode {
            return;
        }
        let before = self.pagination;
        self.options.mode = mode;
        debug!(?mode, "table mode changed");
        self.order = None;
        self.refresh();
        self.commit_pagination(before);
    }

    /// Dataset size reported by the host in server mode. Ignored in client mode, where the count
    /// is the number of rows passing the filter.
    pub fn set_total_count(&mut self, total_count: usize) -> bool {
        if !self.options.mode.is_server() {
            return false;
        }
        let before = self.pagination;
        self.options.mode = DataMode::Server { total_count };
        self.pagination.set_total_count(total_count);
        self.commit_pagination(before)
    }

    /// Keeps only rows matching `predicate` (client mode) and returns to the first page.
    pub fn set_filter(&mut self, predicate: impl Fn(&R) -> bool + 'static) {
        self.replace_filter(Some(RowFilter::Predicate(Box::new(predicate))));
    }

    /// Case-insensitive substring match against every column's display value. An empty or
    /// whitespace-only query clears the filter.
    pub fn set_text_filter(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.clear_filter();
        } else {
            self.replace_filter(Some(RowFilter::Text(query.to_lowercase())));
        }
    }

    pub fn clear_filter(&mut self) {
        if self.filter.is_some() {
            self.replace_filter(None);
        }
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    fn replace_filter(&mut self, filter: Option<RowFilter<R>>) {
        let before = self.pagination;
        self.filter = filter;
        self.filter_revision = self.filter_revision.wrapping_add(1);
        debug!(active = self.filter.is_some(), "table filter changed");
        self.pagination.first_page();
        self.refresh();
        self.commit_pagination(before);
    }

    fn is_sortable(&self, key: Option<&str>) -> bool {
        match key {
            Some(key) => self.column(key).is_some_and(Column::is_sortable),
            None => true,
        }
    }

    /// Activates `key`: asc → desc → none on the same column, asc on a new one.
    /// Unknown or non-sortable columns are ignored.
    pub fn set_sort(&mut self, key: &str) -> bool {
        if !self.column(key).is_some_and(Column::is_sortable) {
            debug!(column = key, "ignoring sort on unknown or non-sortable column");
            return false;
        }
        let before = self.pagination;
        self.sort.cycle(key);
        self.commit_sort();
        self.refresh();
        self.commit_pagination(before);
        true
    }

    /// Sets the sort outright, e.g. when restoring saved state.
    pub fn set_sort_state(&mut self, sort: SortState) -> bool {
        if sort == self.sort || !self.is_sortable(sort.column()) {
            return false;
        }
        let before = self.pagination;
        self.sort = sort;
        self.commit_sort();
        self.refresh();
        self.commit_pagination(before);
        true
    }

    pub fn clear_sort(&mut self) -> bool {
        self.set_sort_state(SortState::unsorted())
    }

    /// Comparator for the current sort over this table's columns.
    pub fn comparator(&self) -> Box<dyn Fn(&R, &R) -> Ordering + '_> {
        self.sort.comparator(&self.columns)
    }

    pub fn set_page_index(&mut self, page_index: usize) -> bool {
        let before = self.pagination;
        self.pagination.set_page_index(page_index);
        self.commit_pagination(before)
    }

    pub fn page_by(&mut self, delta: isize) -> bool {
        let before = self.pagination;
        self.pagination.page_by(delta);
        self.commit_pagination(before)
    }

    pub fn next_page(&mut self) -> bool {
        self.page_by(1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.page_by(-1)
    }

    pub fn first_page(&mut self) -> bool {
        self.set_page_index(0)
    }

    pub fn last_page(&mut self) -> bool {
        self.set_page_index(self.pagination.last_page_index())
    }

    /// Zero is treated as one. The previously first visible row stays on the new page.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let before = self.pagination;
        self.pagination.set_page_size(page_size);
        self.commit_pagination(before)
    }

    /// Switches to the next entry of [`TableOptions::page_size_options`].
    pub fn cycle_page_size(&mut self) -> bool {
        match self.options.next_page_size(self.pagination.page_size()) {
            Some(size) => self.set_page_size(size),
            None => false,
        }
    }

    pub fn is_selected(&self, id: &R::Id) -> bool {
        self.selection.contains(id)
    }

    /// Flips selection of `id`. Unknown ids are ignored; a selected id can always be
    /// deselected.
    pub fn toggle(&mut self, id: R::Id) -> bool {
        if !self.selection.contains(&id) && !self.known_ids.contains(&id) {
            debug!(?id, "ignoring toggle of unknown row");
            return false;
        }
        self.selection.toggle(id);
        self.commit_selection();
        true
    }

    /// Selects the given ids, skipping unknown ones.
    pub fn select_ids(&mut self, ids: impl IntoIterator<Item = R::Id>) -> bool {
        let known = &self.known_ids;
        let changed = self
            .selection
            .select_all(ids.into_iter().filter(|id| known.contains(id)));
        if changed {
            self.commit_selection();
        }
        changed
    }

    /// Selects every row in the [`SelectionScope`] target.
    pub fn select_all(&mut self) -> bool {
        let targets = self.selection_targets();
        self.select_ids(targets)
    }

    /// Deselects every row in the [`SelectionScope`] target; rows outside it stay selected.
    pub fn deselect_all(&mut self) -> bool {
        let targets = self.selection_targets();
        let changed = self.selection.deselect_all(&targets);
        if changed {
            self.commit_selection();
        }
        changed
    }

    /// Header checkbox behaviour: deselect the target if it is fully selected, otherwise
    /// select all of it.
    pub fn toggle_all(&mut self) -> bool {
        if self.is_all_selected() {
            self.deselect_all()
        } else {
            self.select_all()
        }
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.commit_selection();
        }
        changed
    }

    /// Ids a "select all" acts on: the visible page for [`SelectionScope::Page`], every row
    /// passing the filter for [`SelectionScope::Dataset`].
    pub fn selection_targets(&self) -> Vec<R::Id> {
        let indices = match self.options.selection_scope {
            SelectionScope::Page => self.visible_indices(),
            SelectionScope::Dataset => self.ordered_indices(),
        };
        indices
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .map(TableRow::id)
            .collect()
    }

    pub fn header_checkbox(&self) -> CheckboxState {
        self.selection.checkbox_state(&self.selection_targets())
    }

    pub fn is_all_selected(&self) -> bool {
        self.header_checkbox() == CheckboxState::Checked
    }

    pub fn is_indeterminate(&self) -> bool {
        self.header_checkbox() == CheckboxState::Indeterminate
    }

    /// Selected rows that are currently loaded, in dataset order.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.rows
            .iter()
            .filter(|r| self.selection.contains(&r.id()))
            .collect()
    }

    /// Number of rows passing the filter (client mode) or loaded rows (server mode).
    pub fn filtered_len(&self) -> usize {
        self.ordered_indices().len()
    }

    pub fn visible_rows(&self) -> Vec<&R> {
        self.visible_indices()
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .collect()
    }

    pub fn view(&self) -> TableView<'_, R> {
        TableView {
            rows: self.visible_rows(),
            pagination: self.pagination,
            page_count: self.pagination.page_count(),
            sort: &self.sort,
            selection: &self.selection,
            header_checkbox: self.header_checkbox(),
        }
    }

    fn ordered_indices(&self) -> &[usize] {
        self.order
            .as_ref()
            .map(|o| o.indices.as_slice())
            .unwrap_or(&[])
    }

    fn visible_indices(&self) -> &[usize] {
        let ordered = self.ordered_indices();
        if self.options.mode.is_server() {
            ordered
        } else {
            self.pagination.visible_slice(ordered)
        }
    }

    fn rebuild_known_ids(&mut self) {
        self.known_ids = self.rows.iter().map(TableRow::id).collect();
    }

    fn row_matches(&self, row: &R) -> bool {
        match &self.filter {
            None => true,
            Some(RowFilter::Predicate(p)) => p(row),
            Some(RowFilter::Text(needle)) => self
                .columns
                .iter()
                .any(|c| c.value(row).to_string().to_lowercase().contains(needle.as_str())),
        }
    }

    /// Brings the memoized row order and the page count in line with current inputs.
    fn refresh(&mut self) {
        let key = OrderKey {
            data_revision: self.data_revision,
            filter_revision: self.filter_revision,
            sort: self.sort.clone(),
        };
        if self.order.as_ref().is_some_and(|o| o.key == key) {
            trace!("row order memo hit");
        } else {
            let indices = if self.options.mode.is_server() {
                (0..self.rows.len()).collect()
            } else {
                let mut indices: Vec<usize> = (0..self.rows.len())
                    .filter(|&i| self.row_matches(&self.rows[i]))
                    .collect();
                let cmp = self.sort.comparator(&self.columns);
                indices.sort_by(|&a, &b| cmp(&self.rows[a], &self.rows[b]));
                indices
            };
            trace!(rows = indices.len(), "row order recomputed");
            self.order = Some(RowOrder { key, indices });
        }

        let total = match self.options.mode {
            DataMode::Client => self.filtered_len(),
            DataMode::Server { total_count } => total_count,
        };
        self.pagination.set_total_count(total);
    }

    fn commit_pagination(&mut self, before: PaginationState) -> bool {
        let after = self.pagination;
        if after.page_size() != before.page_size() {
            debug!(page_size = after.page_size(), "page size changed");
            self.callbacks
                .emit(TableEvent::PageSizeChanged(after.page_size()));
        }
        if after.page_index() != before.page_index() {
            debug!(page_index = after.page_index(), "page changed");
            self.callbacks
                .emit(TableEvent::PageChanged(after.page_index()));
        }
        after != before
    }

    fn commit_sort(&mut self) {
        debug!(
            column = self.sort.column(),
            direction = ?self.sort.direction(),
            "sort changed"
        );
        self.callbacks
            .emit(TableEvent::SortChanged(self.sort.clone()));
    }

    fn commit_selection(&mut self) {
        debug!(selected = self.selection.len(), "selection changed");
        if self.callbacks.wants_selection() {
            self.callbacks
                .emit(TableEvent::SelectionChanged(self.selection.selected_ids()));
        }
    }
}

impl<R: TableRow> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("options", &self.options)
            .field("filtered", &self.filter.is_some())
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("selected", &self.selection.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::CellValue;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
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

    fn item(id: u32, name: &'static str, qty: i64) -> Item {
        Item { id, name, qty }
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("name", "Name", |r: &Item| CellValue::from(r.name)).sortable(),
            Column::new("qty", "Qty", |r: &Item| CellValue::from(r.qty)),
        ]
    }

    fn ids(table: &DataTable<Item>) -> Vec<u32> {
        table.visible_rows().iter().map(|r| r.id).collect()
    }

    fn sample(n: u32, page_size: usize) -> DataTable<Item> {
        let rows = (1..=n).map(|i| item(i, "x", i64::from(i))).collect();
        DataTable::builder()
            .columns(columns())
            .rows(rows)
            .options(TableOptions {
                page_size,
                ..Default::default()
            })
            .build()
            .unwrap()
    }

    #[test]
    fn duplicate_column_keys_are_rejected() {
        let mut cols = columns();
        cols.push(Column::new("qty", "Again", |r: &Item| CellValue::from(r.qty)));
        let err = DataTable::<Item>::new(cols, Vec::new()).unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn { key: "qty".into() });
    }

    #[test]
    fn sorting_unknown_or_plain_column_is_noop() {
        let mut t = sample(3, 10);
        assert!(!t.set_sort("missing"));
        assert!(!t.set_sort("qty"));
        assert!(!t.sort().is_sorted());
    }

    #[test]
    fn order_memo_survives_paging() {
        let mut t = sample(25, 10);
        t.set_sort("name");
        let key = t.order.as_ref().map(|o| o.key.clone());
        t.next_page();
        t.toggle(3);
        assert_eq!(t.order.as_ref().map(|o| o.key.clone()), key);
        assert_eq!(ids(&t), (11..=20).collect::<Vec<_>>());
    }

    #[test]
    fn predicate_filter_resets_page_and_count() {
        let mut t = sample(30, 10);
        t.last_page();
        t.set_filter(|r| r.qty % 2 == 0);
        assert_eq!(t.pagination().page_index(), 0);
        assert_eq!(t.filtered_len(), 15);
        assert_eq!(t.page_count(), 2);
        t.clear_filter();
        assert_eq!(t.filtered_len(), 30);
    }

    #[test]
    fn text_filter_matches_any_column_case_insensitively() {
        let mut t = DataTable::new(
            columns(),
            vec![item(1, "Alpha", 7), item(2, "beta", 17), item(3, "Gamma", 3)],
        )
        .unwrap();
        t.set_text_filter("ALP");
        assert_eq!(ids(&t), vec![1]);
        t.set_text_filter("7");
        assert_eq!(ids(&t), vec![1, 2]);
        t.set_text_filter("   ");
        assert!(!t.has_filter());
    }

    #[test]
    fn toggle_ignores_unknown_ids() {
        let mut t = sample(3, 10);
        assert!(!t.toggle(42));
        assert!(t.selection().is_empty());
        assert!(t.toggle(2));
        assert!(t.is_selected(&2));
    }

    #[test]
    fn set_rows_prunes_selection_in_client_mode() {
        let mut t = sample(5, 10);
        t.select_ids([1, 4, 5]);
        t.set_rows(vec![item(1, "a", 1), item(2, "b", 2)]);
        assert_eq!(t.selection().selected_ids(), vec![1]);
    }

    #[test]
    fn page_scope_targets_visible_rows_only() {
        let mut t = DataTable::builder()
            .columns(columns())
            .rows((1..=5).map(|i| item(i, "x", 0)).collect())
            .options(TableOptions {
                page_size: 2,
                selection_scope: SelectionScope::Page,
                ..Default::default()
            })
            .build()
            .unwrap();
        t.next_page();
        assert!(t.toggle_all());
        assert_eq!(t.selection().selected_ids(), vec![3, 4]);
        assert!(t.is_all_selected());

        t.next_page();
        assert_eq!(t.header_checkbox(), CheckboxState::Unchecked);
        t.previous_page();
        assert!(t.toggle_all());
        assert!(t.selection().is_empty());
    }

    #[test]
    fn dataset_scope_spans_pages_and_respects_filter() {
        let mut t = sample(6, 2);
        t.set_filter(|r| r.id != 6);
        t.select_all();
        assert_eq!(t.selection().len(), 5);
        assert!(t.is_all_selected());
        t.toggle(1);
        assert!(t.is_indeterminate());
    }

    #[test]
    fn callbacks_fire_only_on_change() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (pages, sizes, sorts, sels) = (log.clone(), log.clone(), log.clone(), log.clone());
        let mut t = sample(10, 3);
        t.set_callbacks(
            Callbacks::new()
                .on_page_change(move |i| pages.borrow_mut().push(format!("page {i}")))
                .on_page_size_change(move |s| sizes.borrow_mut().push(format!("size {s}")))
                .on_sort_change(move |s| {
                    sorts
                        .borrow_mut()
                        .push(format!("sort {:?} {:?}", s.column(), s.direction()))
                })
                .on_selection_change(move |ids| sels.borrow_mut().push(format!("sel {ids:?}"))),
        );

        t.previous_page();
        t.last_page();
        t.set_page_size(5);
        t.set_sort("name");
        t.toggle(2);
        t.clear_selection();
        t.clear_selection();

        assert_eq!(
            *log.borrow(),
            vec![
                "page 3",
                "size 5",
                "page 1",
                "sort Some(\"name\") Asc",
                "sel [2]",
                "sel []",
            ]
        );
    }

    #[test]
    fn server_mode_passes_rows_through() {
        let mut t = DataTable::builder()
            .columns(columns())
            .rows(vec![item(7, "z", 1), item(3, "a", 2)])
            .options(TableOptions {
                page_size: 2,
                mode: DataMode::Server { total_count: 9 },
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(t.page_count(), 5);

        t.set_sort("name");
        assert_eq!(ids(&t), vec![7, 3]);

        t.toggle(7);
        assert!(t.set_page_index(4));
        t.set_rows(vec![item(9, "q", 0)]);
        assert!(t.is_selected(&7));
        assert!(t.toggle(7));
        assert!(!t.is_selected(&7));

        assert!(t.set_total_count(3));
        assert_eq!(t.pagination().page_index(), 1);
    }

    #[test]
    fn set_sort_state_restores_and_ignores_invalid() {
        let rows = vec![item(1, "b", 1), item(2, "a", 2), item(3, "c", 0)];
        let mut t = DataTable::new(columns(), rows).unwrap();

        assert!(t.set_sort_state(SortState::desc("name")));
        assert_eq!(ids(&t), vec![3, 1, 2]);
        assert!(!t.set_sort_state(SortState::desc("name")));

        assert!(!t.set_sort_state(SortState::asc("qty")));
        assert!(!t.set_sort_state(SortState::asc("missing")));
        assert_eq!(t.sort(), &SortState::desc("name"));

        assert!(t.clear_sort());
        assert!(!t.sort().is_sorted());
        assert_eq!(ids(&t), vec![1, 2, 3]);
        assert!(!t.clear_sort());
    }

    #[test]
    fn builder_ignores_unusable_initial_sort() {
        let rows = || vec![item(1, "b", 1), item(2, "a", 2), item(3, "c", 0)];
        let build = |sort: SortState| {
            DataTable::builder()
                .columns(columns())
                .rows(rows())
                .sort(sort)
                .build()
                .unwrap()
        };

        assert!(!build(SortState::asc("missing")).sort().is_sorted());
        assert!(!build(SortState::asc("qty")).sort().is_sorted());

        let t = build(SortState::desc("name"));
        assert_eq!(t.sort(), &SortState::desc("name"));
        assert_eq!(ids(&t), vec![3, 1, 2]);
    }

    #[test]
    fn set_mode_switches_row_source_and_count() {
        let mut t = sample(25, 10);
        t.set_page_index(2);
        assert_eq!(ids(&t), (21..=25).collect::<Vec<_>>());

        t.set_mode(DataMode::Server { total_count: 100 });
        assert!(t.mode().is_server());
        assert_eq!(t.page_count(), 10);
        assert_eq!(t.pagination().page_index(), 2);
        assert_eq!(t.visible_rows().len(), 25);

        t.set_mode(DataMode::Client);
        assert_eq!(t.page_count(), 3);
        assert_eq!(ids(&t), (21..=25).collect::<Vec<_>>());

        t.set_mode(DataMode::Server { total_count: 5 });
        assert_eq!(t.page_count(), 1);
        assert_eq!(t.pagination().page_index(), 0);
    }

    #[test]
    fn removing_sorted_column_clears_sort() {
        let mut t = sample(3, 10);
        t.set_sort("name");
        t.set_columns(vec![Column::new("qty", "Qty", |r: &Item| CellValue::from(r.qty))])
            .unwrap();
        assert!(!t.sort().is_sorted());
    }
}
