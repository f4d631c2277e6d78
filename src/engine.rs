//! Selection/swap engine. Owns the single selection record and drives every
//! transition: which elements are selectable, how a click is interpreted,
//! how a swap commits and how its animation is scheduled and reset.
//!
//! All transitions run synchronously inside one click callback. The only
//! asynchrony is the per-swap cleanup task: one-shot, fire-and-forget, with
//! its two candidates and one gap marker captured at schedule time, so
//! overlapping swaps never share cleanup targets.

use log::warn;

use crate::rows::RowAccessor;
use crate::surface::{Flag, Surface};

/// Duration of the swap animation and the delay of its cleanup task.
pub const SWAP_ANIMATION_MS: u32 = 500;

/// What a click resolved to, classified by the input layer before the engine
/// sees it. At most one of the left-item/right-match variants per click.
#[derive(Debug, Clone)]
pub enum ClickTarget<E> {
    LeftItem { row: usize, el: E },
    RightMatch { row: usize, el: E },
    /// Bare row area with neither sub-element under the pointer.
    Row,
    /// Click did not land inside any row.
    Outside,
}

struct SelectedItem<E> {
    el: E,
    row: usize,
}

pub struct Engine<S: Surface> {
    surface: S,
    selection: Option<SelectedItem<S::El>>,
}

impl<S: Surface> Engine<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            selection: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Row of the pending left item, if any.
    pub fn selected_row(&self) -> Option<usize> {
        self.selection.as_ref().map(|item| item.row)
    }

    pub fn handle_click(&mut self, target: ClickTarget<S::El>) {
        match target {
            ClickTarget::LeftItem { row, el } => {
                if self.surface.has_flag(&el, Flag::Selected) {
                    // Second tap on the same item: toggle the selection off.
                    self.set_selected(None);
                    self.set_matches_selectable(false);
                } else {
                    self.set_selected(Some(SelectedItem { el, row }));
                    self.set_matches_selectable(true);
                }
            }
            ClickTarget::RightMatch { row, el } => self.assign_match(row, el),
            ClickTarget::Row | ClickTarget::Outside => {}
        }
    }

    /// Replace the selection. Sweeps the selected flag off every left item
    /// first, not just the one we believe was selected, so the visuals can
    /// never drift from the state record. `None` means clear only.
    fn set_selected(&mut self, next: Option<SelectedItem<S::El>>) {
        self.selection = None;
        for row in 0..self.surface.row_count() {
            if let Some(item) = self.rows().left_item(row) {
                self.surface.set_flag(&item.el, Flag::Selected, false);
            }
        }

        let Some(next) = next else {
            return;
        };

        self.surface.set_flag(&next.el, Flag::Selected, true);
        if let Some(gap) = self.rows().middle_gap(next.row) {
            self.surface.set_flag(&gap.el, Flag::Hidden, false);
        }
        self.selection = Some(next);
    }

    /// One global toggle for every right-match candidate; there is no
    /// per-row selectability.
    fn set_matches_selectable(&mut self, selectable: bool) {
        for row in 0..self.surface.row_count() {
            if let Some(candidate) = self.rows().right_match(row) {
                self.surface
                    .set_flag(&candidate.el, Flag::Selectable, selectable);
            }
        }
    }

    /// A right-match candidate was clicked: swap its value with the one in
    /// the selected row, then settle back to idle.
    fn assign_match(&mut self, target_row: usize, clicked: S::El) {
        // A right match only means something while a left item is pending.
        let Some(selected) = self.selection.take() else {
            return;
        };

        let slots = (
            self.rows().right_match(selected.row),
            self.rows().middle_gap(selected.row),
        );
        if let (Some(swap), Some(gap)) = slots {
            let clicked_text = self.surface.text(&clicked);
            self.surface.set_text(&clicked, &self.surface.text(&swap.el));
            self.surface.set_text(&swap.el, &clicked_text);

            if selected.row != target_row {
                self.animate_swap(selected.row, target_row, clicked, swap.el, gap.el);
            } else {
                // Self-swap: nothing moved, no animation to run.
                self.surface.set_flag(&gap.el, Flag::Hidden, true);
            }
        } else {
            warn!("row {} lost its match slot or gap marker", selected.row);
        }

        // Cleanup is unconditional and safe to repeat.
        self.set_matches_selectable(false);
        self.surface.set_flag(&selected.el, Flag::Selected, false);
    }

    /// Cosmetic only: the value exchange has already committed by the time
    /// this runs. Slides both candidates by the vertical distance between
    /// the two rows, then a deferred task clears the styling and hides the
    /// gap marker. The task is never cancelled; it owns its captures.
    fn animate_swap(
        &self,
        selected_row: usize,
        target_row: usize,
        clicked: S::El,
        swap: S::El,
        gap: S::El,
    ) {
        let (Some(from), Some(to)) = (self.surface.row(selected_row), self.surface.row(target_row))
        else {
            warn!("cannot animate swap between rows {selected_row} and {target_row}");
            self.surface.set_flag(&gap, Flag::Hidden, true);
            return;
        };

        let distance = self.surface.top(&from) - self.surface.top(&to);
        self.surface.shift(&clicked, distance);
        self.surface.shift(&swap, -distance);

        let surface = self.surface.clone();
        self.surface.defer(
            SWAP_ANIMATION_MS,
            Box::new(move || {
                surface.reset_shift(&clicked);
                surface.reset_shift(&swap);
                surface.set_flag(&gap, Flag::Hidden, true);
            }),
        );
    }

    fn rows(&self) -> RowAccessor<'_, S> {
        RowAccessor::new(&self.surface)
    }
}
