//! Notifications from a [`crate::table::DataTable`] to its host.
//!
//! In server-driven mode the host listens to these to refetch the page it should display. In
//! client mode the table derives everything itself and the callbacks are optional.

use crate::sort::SortState;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableEvent<Id> {
    PageChanged(usize),
    PageSizeChanged(usize),
    SortChanged(SortState),
    /// Full selection after the change, in ascending id order.
    SelectionChanged(Vec<Id>),
}

type Handler<T> = Option<Box<dyn FnMut(T)>>;

/// Optional per-event handlers. A handler only runs when its piece of state actually changed.
pub struct Callbacks<Id> {
    on_page_change: Handler<usize>,
    on_page_size_change: Handler<usize>,
    on_sort_change: Handler<SortState>,
    on_selection_change: Handler<Vec<Id>>,
}

impl<Id> Default for Callbacks<Id> {
    fn default() -> Self {
        Self {
            on_page_change: None,
            on_page_size_change: None,
            on_sort_change: None,
            on_selection_change: None,
        }
    }
}

impl<Id> Callbacks<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page_change(mut self, handler: impl FnMut(usize) + 'static) -> Self {
        self.on_page_change = Some(Box::new(handler));
        self
    }

    pub fn on_page_size_change(mut self, handler: impl FnMut(usize) + 'static) -> Self {
        self.on_page_size_change = Some(Box::new(handler));
        self
    }

    pub fn on_sort_change(mut self, handler: impl FnMut(SortState) + 'static) -> Self {
        self.on_sort_change = Some(Box::new(handler));
        self
    }

    pub fn on_selection_change(mut self, handler: impl FnMut(Vec<Id>) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(handler));
        self
    }

    /// Routes `event` to its handler, if one is registered.
    pub fn emit(&mut self, event: TableEvent<Id>) {
        match event {
            TableEvent::PageChanged(index) => {
                if let Some(handler) = self.on_page_change.as_mut() {
                    handler(index);
                }
            }
            TableEvent::PageSizeChanged(size) => {
                if let Some(handler) = self.on_page_size_change.as_mut() {
                    handler(size);
                }
            }
            TableEvent::SortChanged(sort) => {
                if let Some(handler) = self.on_sort_change.as_mut() {
                    handler(sort);
                }
            }
            TableEvent::SelectionChanged(ids) => {
                if let Some(handler) = self.on_selection_change.as_mut() {
                    handler(ids);
                }
            }
        }
    }

    pub(crate) fn wants_selection(&self) -> bool {
        self.on_selection_change.is_some()
    }
}

impl<Id> fmt::Debug for Callbacks<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_page_change", &self.on_page_change.is_some())
            .field("on_page_size_change", &self.on_page_size_change.is_some())
            .field("on_sort_change", &self.on_sort_change.is_some())
            .field("on_selection_change", &self.on_selection_change.is_some())
            .finish()
    }
}
