//! Row accessor: resolves the three semantic sub-elements of a row and maps
//! row handles back to indices. Pure lookups over the layout built at
//! startup; holds no state of its own.

use log::warn;

use crate::surface::{Part, Surface};

#[derive(Debug, Clone)]
pub struct LeftItem<E> {
    pub el: E,
    /// Trimmed display text.
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct RightMatch<E> {
    pub el: E,
}

#[derive(Debug, Clone)]
pub struct MiddleGap<E> {
    pub el: E,
}

pub struct RowAccessor<'a, S: Surface> {
    surface: &'a S,
}

impl<'a, S: Surface> RowAccessor<'a, S> {
    pub fn new(surface: &'a S) -> Self {
        Self { surface }
    }

    pub fn left_item(&self, row: usize) -> Option<LeftItem<S::El>> {
        let el = self.part(row, Part::LeftItem)?;
        let text = self.surface.text(&el).trim().to_string();
        Some(LeftItem { el, text })
    }

    pub fn right_match(&self, row: usize) -> Option<RightMatch<S::El>> {
        Some(RightMatch {
            el: self.part(row, Part::RightMatch)?,
        })
    }

    pub fn middle_gap(&self, row: usize) -> Option<MiddleGap<S::El>> {
        Some(MiddleGap {
            el: self.part(row, Part::MiddleGap)?,
        })
    }

    /// Inverse of the indexing used to build the rows.
    pub fn row_index_of(&self, row_el: &S::El) -> Option<usize> {
        self.surface.row_id(row_el)
    }

    fn part(&self, row: usize, part: Part) -> Option<S::El> {
        let count = self.surface.row_count();
        let Some(row_el) = self.surface.row(row) else {
            // Callers only hand us indices recovered from row handles, so
            // this is a broken precondition rather than user input.
            warn!("row index {row} out of range ({count} rows)");
            return None;
        };
        let found = self.surface.part(&row_el, part);
        if found.is_none() {
            warn!("row {row} is missing its {part:?} element");
        }
        found
    }
}
