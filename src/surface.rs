//! The seam between the game logic and whatever renders it. The engine and
//! row accessor only ever talk to a [`Surface`]; the browser implementation
//! lives in `dom.rs`, and tests run against the in-memory fake below.

/// Structural marker of a row sub-element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    LeftItem,
    RightMatch,
    MiddleGap,
}

/// Named boolean visual flags. The DOM backend mirrors these as CSS classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// A left item the player has picked and not yet matched.
    Selected,
    /// A right-match candidate that may currently be tapped.
    Selectable,
    /// Element is not displayed at all.
    Hidden,
}

pub trait Surface: Clone + 'static {
    /// Handle to a rendered element. Cheap to clone; captured by value in
    /// deferred tasks.
    type El: Clone + 'static;

    fn row_count(&self) -> usize;

    /// Row container for a zero-based index, if the index is in range.
    fn row(&self, index: usize) -> Option<Self::El>;

    /// Sub-element of a row container, looked up by structural marker.
    fn part(&self, row: &Self::El, part: Part) -> Option<Self::El>;

    /// Stable zero-based index attached to a row container at render time.
    /// Inverse of [`Surface::row`].
    fn row_id(&self, row: &Self::El) -> Option<usize>;

    fn has_flag(&self, el: &Self::El, flag: Flag) -> bool;
    fn set_flag(&self, el: &Self::El, flag: Flag, on: bool);

    fn text(&self, el: &Self::El) -> String;
    fn set_text(&self, el: &Self::El, text: &str);

    /// Current on-screen vertical position, used only for animation distance.
    fn top(&self, el: &Self::El) -> f64;

    /// Apply an eased vertical offset to an element.
    fn shift(&self, el: &Self::El, offset_px: f64);

    /// Clear any offset/transition styling back to neutral.
    fn reset_shift(&self, el: &Self::El);

    /// Run a task after a fixed delay. Fire-and-forget: tasks are never
    /// cancelled, and each captures everything it touches at schedule time.
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

#[cfg(test)]
pub(crate) mod fake {
    use super::{Flag, Part, Surface};
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    const ROW_HEIGHT: f64 = 40.0;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FakeEl {
        row: usize,
        part: Option<Part>,
    }

    #[derive(Default)]
    struct ElState {
        text: String,
        flags: HashSet<Flag>,
        shift: Option<f64>,
    }

    struct Inner {
        rows: Vec<[ElState; 3]>,
        tasks: Vec<(u32, Box<dyn FnOnce()>)>,
    }

    fn slot(part: Part) -> usize {
        match part {
            Part::LeftItem => 0,
            Part::MiddleGap => 1,
            Part::RightMatch => 2,
        }
    }

    /// In-memory board: rows stacked `ROW_HEIGHT` pixels apart, middle gaps
    /// starting hidden, deferred tasks queued until `run_pending`.
    #[derive(Clone)]
    pub struct FakeSurface {
        inner: Rc<RefCell<Inner>>,
    }

    impl FakeSurface {
        pub fn new(rows: &[(&str, &str)]) -> Self {
            let rows = rows
                .iter()
                .map(|(left, right)| {
                    let mut cells =
                        [ElState::default(), ElState::default(), ElState::default()];
                    cells[slot(Part::LeftItem)].text = (*left).to_string();
                    cells[slot(Part::RightMatch)].text = (*right).to_string();
                    cells[slot(Part::MiddleGap)].flags.insert(Flag::Hidden);
                    cells
                })
                .collect();
            Self {
                inner: Rc::new(RefCell::new(Inner {
                    rows,
                    tasks: Vec::new(),
                })),
            }
        }

        pub fn el(&self, row: usize, part: Part) -> FakeEl {
            FakeEl {
                row,
                part: Some(part),
            }
        }

        pub fn pending_tasks(&self) -> usize {
            self.inner.borrow().tasks.len()
        }

        /// Fire every queued task, oldest first. Borrow is released before
        /// invocation so tasks may call back into the surface.
        pub fn run_pending(&self) {
            let tasks = std::mem::take(&mut self.inner.borrow_mut().tasks);
            for (_, task) in tasks {
                task();
            }
        }

        pub fn right_texts(&self) -> Vec<String> {
            let inner = self.inner.borrow();
            inner
                .rows
                .iter()
                .map(|cells| cells[slot(Part::RightMatch)].text.clone())
                .collect()
        }

        pub fn shift_of(&self, el: &FakeEl) -> Option<f64> {
            let inner = self.inner.borrow();
            inner.rows[el.row][slot(el.part.unwrap())].shift
        }
    }

    impl Surface for FakeSurface {
        type El = FakeEl;

        fn row_count(&self) -> usize {
            self.inner.borrow().rows.len()
        }

        fn row(&self, index: usize) -> Option<FakeEl> {
            (index < self.row_count()).then_some(FakeEl {
                row: index,
                part: None,
            })
        }

        fn part(&self, row: &FakeEl, part: Part) -> Option<FakeEl> {
            row.part.is_none().then_some(FakeEl {
                row: row.row,
                part: Some(part),
            })
        }

        fn row_id(&self, row: &FakeEl) -> Option<usize> {
            row.part.is_none().then_some(row.row)
        }

        fn has_flag(&self, el: &FakeEl, flag: Flag) -> bool {
            let inner = self.inner.borrow();
            inner.rows[el.row][slot(el.part.unwrap())]
                .flags
                .contains(&flag)
        }

        fn set_flag(&self, el: &FakeEl, flag: Flag, on: bool) {
            let mut inner = self.inner.borrow_mut();
            let flags = &mut inner.rows[el.row][slot(el.part.unwrap())].flags;
            if on {
                flags.insert(flag);
            } else {
                flags.remove(&flag);
            }
        }

        fn text(&self, el: &FakeEl) -> String {
            let inner = self.inner.borrow();
            inner.rows[el.row][slot(el.part.unwrap())].text.clone()
        }

        fn set_text(&self, el: &FakeEl, text: &str) {
            let mut inner = self.inner.borrow_mut();
            inner.rows[el.row][slot(el.part.unwrap())].text = text.to_string();
        }

        fn top(&self, el: &FakeEl) -> f64 {
            el.row as f64 * ROW_HEIGHT
        }

        fn shift(&self, el: &FakeEl, offset_px: f64) {
            let mut inner = self.inner.borrow_mut();
            inner.rows[el.row][slot(el.part.unwrap())].shift = Some(offset_px);
        }

        fn reset_shift(&self, el: &FakeEl) {
            let mut inner = self.inner.borrow_mut();
            inner.rows[el.row][slot(el.part.unwrap())].shift = None;
        }

        fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            self.inner.borrow_mut().tasks.push((delay_ms, task));
        }
    }
}
