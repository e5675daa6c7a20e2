use std::collections::BTreeSet;

/// Which rows a "select all" acts on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SelectionScope {
    /// Every row that passes the current filter, across all pages.
    #[default]
    Dataset,
    /// Only the rows on the current page.
    Page,
}

/// Tri-state used by a header checkbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckboxState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl CheckboxState {
    pub fn symbol(self) -> &'static str {
        match self {
            CheckboxState::Unchecked => "[ ]",
            CheckboxState::Indeterminate => "[-]",
            CheckboxState::Checked => "[x]",
        }
    }
}

/// Selected row identifiers.
///
/// Rows are tracked by id, never by position, so the set is unaffected by sorting or paging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowSelection<Id: Ord> {
    selected: BTreeSet<Id>,
}

impl<Id: Ord> Default for RowSelection<Id> {
    fn default() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }
}

impl<Id: Ord + Clone> RowSelection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.selected.iter()
    }

    /// Selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<Id> {
        self.selected.iter().cloned().collect()
    }

    /// Flips membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn select(&mut self, id: Id) -> bool {
        self.selected.insert(id)
    }

    pub fn deselect(&mut self, id: &Id) -> bool {
        self.selected.remove(id)
    }

    /// Adds every id. Returns `true` if anything was newly selected.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = Id>) -> bool {
        ids.into_iter()
            .fold(false, |changed, id| self.selected.insert(id) || changed)
    }

    /// Removes every id. Returns `true` if anything was deselected.
    pub fn deselect_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a Id>) -> bool
    where
        Id: 'a,
    {
        ids.into_iter()
            .fold(false, |changed, id| self.selected.remove(id) || changed)
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Drops ids for which `keep` is false. Returns `true` if anything was dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&Id) -> bool) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| keep(id));
        self.selected.len() != before
    }

    /// Header checkbox state for the target `ids`.
    ///
    /// Checked needs a non-empty target that is fully selected; an empty target is unchecked.
    pub fn checkbox_state<'a>(&self, ids: impl IntoIterator<Item = &'a Id>) -> CheckboxState
    where
        Id: 'a,
    {
        let (total, hits) = ids.into_iter().fold((0usize, 0usize), |(total, hits), id| {
            (total + 1, hits + usize::from(self.selected.contains(id)))
        });
        if total == 0 || hits == 0 {
            CheckboxState::Unchecked
        } else if hits == total {
            CheckboxState::Checked
        } else {
            CheckboxState::Indeterminate
        }
    }

    pub fn is_all_selected<'a>(&self, ids: impl IntoIterator<Item = &'a Id>) -> bool
    where
        Id: 'a,
    {
        self.checkbox_state(ids) == CheckboxState::Checked
    }

    pub fn is_indeterminate<'a>(&self, ids: impl IntoIterator<Item = &'a Id>) -> bool
    where
        Id: 'a,
    {
        self.checkbox_state(ids) == CheckboxState::Indeterminate
    }
}
