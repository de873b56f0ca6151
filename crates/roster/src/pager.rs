//! Pager contract and a page-number based default.
//!
//! A paged collection only needs three things from its pager: accept the
//! total item count, report the current `[start, end)` window, and render
//! itself as a display fragment.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Tracks the total item count and exposes the current page window.
pub trait Pager {
    /// Sets the total number of items; the window is recomputed.
    fn update(&mut self, total: usize);

    /// Index of the first item on the current page.
    fn start(&self) -> usize;

    /// Index one past the last item on the current page.
    fn end(&self) -> usize;

    /// Navigation markup for the current state.
    fn fragment(&self) -> String;

    /// Number of items the window covers.
    fn window_len(&self) -> usize {
        self.end().saturating_sub(self.start())
    }
}

impl<P: Pager + ?Sized> Pager for &mut P {
    fn update(&mut self, total: usize) {
        (**self).update(total)
    }

    fn start(&self) -> usize {
        (**self).start()
    }

    fn end(&self) -> usize {
        (**self).end()
    }

    fn fragment(&self) -> String {
        (**self).fragment()
    }
}

/// Page-number pager.
///
/// Pages are 1-based. A `size` of zero puts everything on one page.
///
/// ```rust
/// use roster::{PageWindow, Pager};
///
/// let mut pager = PageWindow::new(2, 10);
/// pager.update(25);
/// assert_eq!((pager.start(), pager.end()), (10, 20));
///
/// pager.update(5);
/// assert_eq!(pager.page(), 1);
/// assert_eq!((pager.start(), pager.end()), (0, 5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    page: usize,
    size: usize,
    total: usize,
    link_prefix: String,
}

impl PageWindow {
    /// Default link prefix used by [`fragment`](Pager::fragment).
    pub const DEFAULT_LINK_PREFIX: &'static str = "?page=";

    /// Creates a pager on `page` (1-based) with `size` items per page.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page: page.max(1),
            size,
            total: 0,
            link_prefix: Self::DEFAULT_LINK_PREFIX.to_string(),
        }
    }

    /// Sets the string prepended to page numbers in generated links.
    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = prefix.into();
        self
    }

    /// Moves to another page; clamped on the next [`update`](Pager::update).
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Current page (1-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total item count from the last update.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of pages; at least one.
    pub fn page_count(&self) -> usize {
        if self.size == 0 || self.total == 0 {
            1
        } else {
            self.total.div_ceil(self.size)
        }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

impl Pager for PageWindow {
    fn update(&mut self, total: usize) {
        self.total = total;
        self.page = self.page.clamp(1, self.page_count());
    }

    fn start(&self) -> usize {
        if self.size == 0 {
            0
        } else {
            (self.page - 1).saturating_mul(self.size).min(self.total)
        }
    }

    fn end(&self) -> usize {
        if self.size == 0 {
            self.total
        } else {
            self.start().saturating_add(self.size).min(self.total)
        }
    }

    fn fragment(&self) -> String {
        let pages = self.page_count();
        if pages <= 1 {
            return String::new();
        }

        let mut html = String::from("<ul class=\"pager\">");
        for page in 1..=pages {
            if page == self.page {
                let _ = write!(html, "<li class=\"active\"><span>{}</span></li>", page);
            } else {
                let _ = write!(
                    html,
                    "<li><a href=\"{}{}\">{}</a></li>",
                    self.link_prefix, page, page
                );
            }
        }
        html.push_str("</ul>");
        html
    }
}
