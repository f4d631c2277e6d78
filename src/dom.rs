//! Browser implementation of [`Surface`] plus the delegated click
//! classification. Everything here is a thin wrapper over `web_sys`; all
//! decision logic stays in the engine.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::engine::{ClickTarget, SWAP_ANIMATION_MS};
use crate::surface::{Flag, Part, Surface};

const ROW_SELECTOR: &str = ".row";
const ROW_INDEX_ATTR: &str = "data-row";

impl Flag {
    fn class_name(self) -> &'static str {
        match self {
            Flag::Selected => "selected",
            Flag::Selectable => "selectable",
            Flag::Hidden => "nodisplay",
        }
    }
}

impl Part {
    fn selector(self) -> &'static str {
        match self {
            Part::LeftItem => ".left-item",
            Part::RightMatch => ".right-match",
            Part::MiddleGap => ".middle-gap",
        }
    }
}

/// Row layout cached once at mount, in document order.
#[derive(Clone)]
pub struct DomSurface {
    rows: Rc<Vec<Element>>,
}

impl DomSurface {
    /// Cache the row containers under `container`. Returns `None` when the
    /// container holds no rows, which means mount ran before render.
    pub fn mount(container: &Element) -> Option<Self> {
        let list = container.query_selector_all(ROW_SELECTOR).ok()?;
        let rows: Vec<Element> = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();
        if rows.is_empty() {
            return None;
        }
        Some(Self {
            rows: Rc::new(rows),
        })
    }
}

impl Surface for DomSurface {
    type El = Element;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, index: usize) -> Option<Element> {
        self.rows.get(index).cloned()
    }

    fn part(&self, row: &Element, part: Part) -> Option<Element> {
        row.query_selector(part.selector()).ok().flatten()
    }

    fn row_id(&self, row: &Element) -> Option<usize> {
        row.get_attribute(ROW_INDEX_ATTR)?.parse().ok()
    }

    fn has_flag(&self, el: &Element, flag: Flag) -> bool {
        el.class_list().contains(flag.class_name())
    }

    fn set_flag(&self, el: &Element, flag: Flag, on: bool) {
        let result = if on {
            el.class_list().add_1(flag.class_name())
        } else {
            el.class_list().remove_1(flag.class_name())
        };
        if result.is_err() {
            warn!("failed to toggle class {:?}", flag.class_name());
        }
    }

    fn text(&self, el: &Element) -> String {
        el.text_content().unwrap_or_default()
    }

    fn set_text(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn top(&self, el: &Element) -> f64 {
        el.get_bounding_client_rect().top()
    }

    fn shift(&self, el: &Element, offset_px: f64) {
        let Some(html) = el.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        let _ = style.set_property("transition", &format!("transform {SWAP_ANIMATION_MS}ms ease"));
        let _ = style.set_property("transform", &format!("translateY({offset_px}px)"));
    }

    fn reset_shift(&self, el: &Element) {
        let Some(html) = el.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        let _ = style.remove_property("transition");
        let _ = style.remove_property("transform");
    }

    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        // One-shot and never cancelled; the task owns its captures.
        Timeout::new(delay_ms, task).forget();
    }
}

/// Walk up from the event target to the nearest row, then to the nearest
/// left-item or right-match inside it. Mirrors a single delegated listener
/// on the container.
pub fn classify_click(event: &MouseEvent, surface: &DomSurface) -> ClickTarget<Element> {
    let Some(target) = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
    else {
        return ClickTarget::Outside;
    };

    let Some(row_el) = target.closest(ROW_SELECTOR).ok().flatten() else {
        return ClickTarget::Outside;
    };

    let Some(row) = surface.row_id(&row_el) else {
        warn!("row container without a {ROW_INDEX_ATTR} attribute");
        return ClickTarget::Outside;
    };

    if let Some(el) = target.closest(Part::LeftItem.selector()).ok().flatten() {
        return ClickTarget::LeftItem { row, el };
    }
    if let Some(el) = target.closest(Part::RightMatch.selector()).ok().flatten() {
        return ClickTarget::RightMatch { row, el };
    }
    ClickTarget::Row
}
