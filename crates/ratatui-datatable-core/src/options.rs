use crate::error::Result;
use crate::error::TableError;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::pagination::DEFAULT_PAGE_SIZE_OPTIONS;
use crate::selection::SelectionScope;

/// Where sorting and paging happen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "kind"))]
pub enum DataMode {
    /// The table holds the full dataset and derives filter, sort, and page slice itself.
    #[default]
    Client,
    /// The table holds only the current page; the host refetches on page/sort changes and
    /// reports the dataset size.
    Server { total_count: usize },
}

impl DataMode {
    pub fn is_server(&self) -> bool {
        matches!(self, DataMode::Server { .. })
    }
}

/// Options for [`crate::table::DataTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableOptions {
    pub page_size: usize,
    /// Sizes offered by the page-size switcher, in cycling order.
    pub page_size_options: Vec<usize>,
    pub selection_scope: SelectionScope,
    pub mode: DataMode,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            selection_scope: SelectionScope::default(),
            mode: DataMode::default(),
        }
    }
}

impl TableOptions {
    pub fn validate(&self) -> Result<()> {
        if self.page_size_options.is_empty() {
            return Err(TableError::EmptyPageSizeOptions);
        }
        if self.page_size_options.contains(&0) {
            return Err(TableError::ZeroPageSizeOption);
        }
        Ok(())
    }

    /// The option after `current` in cycling order, wrapping around. Sizes that are not listed
    /// jump to the first option larger than them, or to the first option.
    pub fn next_page_size(&self, current: usize) -> Option<usize> {
        let opts = &self.page_size_options;
        match opts.iter().position(|&s| s == current) {
            Some(i) => opts.get((i + 1) % opts.len()).copied(),
            None => opts
                .iter()
                .copied()
                .find(|&s| s > current)
                .or_else(|| opts.first().copied()),
        }
    }
}
