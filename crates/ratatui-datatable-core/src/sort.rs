use crate::column::Column;
use std::cmp::Ordering;

/// Direction of the active sort. `None` means rows keep their input order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    None,
}

impl SortDirection {
    /// Next direction when the same column is activated again: asc → desc → none → asc.
    pub fn next(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
            SortDirection::None => SortDirection::Asc,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
            SortDirection::None => "",
        }
    }
}

/// Which column is sorted, and how.
///
/// `direction` is [`SortDirection::None`] exactly when no column is set; every constructor and
/// transition keeps that pairing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawSortState"))]
pub struct SortState {
    column: Option<String>,
    direction: SortDirection,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSortState {
    #[serde(default)]
    column: Option<String>,
    #[serde(default)]
    direction: SortDirection,
}

#[cfg(feature = "serde")]
impl From<RawSortState> for SortState {
    fn from(raw: RawSortState) -> Self {
        match raw.column {
            Some(column) => SortState::new(column, raw.direction),
            None => SortState::unsorted(),
        }
    }
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        if direction == SortDirection::None {
            return Self::unsorted();
        }
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Desc)
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_sorted(&self) -> bool {
        self.column.is_some()
    }

    /// Direction shown for `key`: the active direction on the sorted column, `None` elsewhere.
    pub fn direction_for(&self, key: &str) -> SortDirection {
        if self.column() == Some(key) {
            self.direction
        } else {
            SortDirection::None
        }
    }

    /// Activates `key`. The active column cycles its direction; any other column starts
    /// ascending and replaces the previous one.
    ///
    /// This does not check that `key` exists or is sortable; the table does that before calling.
    pub fn cycle(&mut self, key: &str) {
        if self.column() == Some(key) {
            self.direction = self.direction.next();
            if self.direction == SortDirection::None {
                self.column = None;
            }
        } else {
            self.column = Some(key.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::unsorted();
    }

    /// Builds the row comparator for this state.
    ///
    /// Returns a comparator that reports every pair as equal when unsorted, or when the active
    /// column is missing from `columns` or not sortable. Combined with a stable sort this keeps
    /// input order.
    pub fn comparator<'a, R>(
        &self,
        columns: &'a [Column<R>],
    ) -> Box<dyn Fn(&R, &R) -> Ordering + 'a> {
        let active = self
            .column()
            .and_then(|key| columns.iter().find(|c| c.key() == key && c.is_sortable()));
        match (active, self.direction) {
            (Some(col), SortDirection::Asc) => Box::new(move |a, b| col.compare(a, b)),
            (Some(col), SortDirection::Desc) => Box::new(move |a, b| col.compare(b, a)),
            _ => Box::new(|_, _| Ordering::Equal),
        }
    }
}
