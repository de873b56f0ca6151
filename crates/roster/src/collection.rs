//! Generic collection and the three-view render pipeline.
//!
//! Rendering is defined once, on the [`Listing`] trait, in terms of three
//! named views:
//!
//! ```text
//! items non-empty:  index(items = item(i1) + item(i2) + ...)
//! items empty:      empty()       if an empty view is configured
//!                   ""            otherwise
//! ```
//!
//! [`Collection`] is the plain implementation; [`Paged`](crate::Paged)
//! implements the same trait and adds identifier resolution and paging.
//! Implementors may override any step (for example `render_item` to bind
//! extra variables) and keep the rest.

use roster_query::EntityQuery;
use roster_render::{RenderError, ViewRenderer};
use serde::Serialize;

use crate::cursor::Cursor;
use crate::views::{ViewData, ViewNames};

/// A rendered list of items.
pub trait Listing {
    /// Item type bound into the item view.
    type Item: Serialize;
    /// Renderer the views are resolved through.
    type Renderer: ViewRenderer;

    /// Items in render order.
    fn items(&self) -> &[Self::Item];

    /// The renderer.
    fn renderer(&self) -> &Self::Renderer;

    /// The view names.
    fn views(&self) -> &ViewNames;

    /// Renders one item through the item view, bound as `item`.
    fn render_item(&self, item: &Self::Item) -> Result<String, RenderError> {
        self.renderer()
            .view(&self.views().item)
            .set("item", item)?
            .output()
    }

    /// Wraps already-rendered items in the index view, bound as `items`.
    fn render_index(&self, items: &str) -> Result<String, RenderError> {
        self.renderer()
            .view(&self.views().index)
            .set_safe("items", items)
            .output()
    }

    /// Renders the empty view with no variables.
    ///
    /// Returns an empty string when no empty view is configured.
    fn render_empty(&self) -> Result<String, RenderError> {
        match &self.views().empty {
            Some(name) => self.renderer().view(name).output(),
            None => Ok(String::new()),
        }
    }

    /// Renders the whole collection.
    fn render(&self) -> Result<String, RenderError> {
        let items = self.items();
        if items.is_empty() {
            return self.render_empty();
        }

        let mut html = String::new();
        for item in items {
            html.push_str(&self.render_item(item)?);
        }
        self.render_index(&html)
    }

    /// Variables for a surrounding view: `{prefix}html`.
    ///
    /// `restricted` names keys the caller does not want; it is accepted for
    /// symmetry with richer implementations and not consulted here.
    fn to_view(&self, prefix: &str, restricted: &[&str]) -> Result<ViewData, RenderError> {
        let _ = restricted;
        let mut data = ViewData::new();
        data.insert(format!("{}html", prefix), self.render()?);
        Ok(data)
    }
}

/// An ordered, in-memory collection rendered through named views.
///
/// ```rust
/// use roster::{Collection, Listing, Renderer};
///
/// let mut renderer = Renderer::new();
/// renderer.add_template("www/index", "<ul>{{ items }}</ul>").unwrap();
/// renderer.add_template("www/item", "<li>{{ item }}</li>").unwrap();
/// renderer.add_template("www/empty", "none").unwrap();
///
/// let mut fruits = Collection::new(renderer);
/// assert_eq!(fruits.render().unwrap(), "none");
///
/// fruits.replace(vec!["apple", "pear"]);
/// assert_eq!(fruits.render().unwrap(), "<ul><li>apple</li><li>pear</li></ul>");
/// ```
#[derive(Debug)]
pub struct Collection<T, R> {
    items: Vec<T>,
    cursor: Cursor,
    renderer: R,
    views: ViewNames,
}

impl<T, R> Collection<T, R> {
    /// Creates an empty collection with the generic view names.
    pub fn new(renderer: R) -> Self {
        Self::with_views(renderer, ViewNames::generic())
    }

    /// Creates an empty collection with custom view names.
    pub fn with_views(renderer: R, views: ViewNames) -> Self {
        Self {
            items: Vec::new(),
            cursor: Cursor::new(),
            renderer,
            views,
        }
    }

    /// Replaces every item and rewinds the cursor.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.cursor.rewind();
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// Replaces the items with every record the query yields.
    pub fn fill_from<Q>(&mut self, query: &mut Q) -> Result<&mut Self, roster_query::QueryError>
    where
        Q: EntityQuery<Item = T> + ?Sized,
    {
        let items = query.exec()?;
        self.replace(items);
        Ok(self)
    }

    /// Collection size.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the items in order without touching the cursor.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the collection, returning its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn views(&self) -> &ViewNames {
        &self.views
    }

    /// Replaces the view names.
    pub fn set_views(&mut self, views: ViewNames) {
        self.views = views;
    }

    /// Mutable access to the renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // Cursor protocol

    /// The item under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.cursor.current(&self.items)
    }

    /// Position of the item under the cursor.
    pub fn key(&self) -> Option<usize> {
        self.cursor.key(self.items.len())
    }

    /// Moves the cursor forward.
    pub fn advance(&mut self) {
        self.cursor.advance(self.items.len());
    }

    /// `false` once the cursor passed the last item.
    pub fn is_valid(&self) -> bool {
        self.cursor.is_valid(self.items.len())
    }

    /// Moves the cursor back to the first item.
    pub fn rewind(&mut self) {
        self.cursor.rewind();
    }
}

impl<T: Serialize, R: ViewRenderer> Listing for Collection<T, R> {
    type Item = T;
    type Renderer = R;

    fn items(&self) -> &[T] {
        Collection::items(self)
    }

    fn renderer(&self) -> &R {
        Collection::renderer(self)
    }

    fn views(&self) -> &ViewNames {
        Collection::views(self)
    }
}

impl<'a, T, R> IntoIterator for &'a Collection<T, R> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
