//! Paged collection: identifier resolution, filtering, sorting and
//! pager-bounded fetching on top of the render pipeline.
//!
//! [`Paged::fill`] drives the query session through these steps:
//!
//! ```text
//! candidates   field_values(pk)            no handlers
//!              handler chain               otherwise
//! search       cond_any(LIKE %phrase% per searchable field)
//! sorters      order_by(field, dir)        registration order
//! re-resolve   cond(pk, candidates).field_values_in(pk, candidates)
//!              empty → stop, collection stays empty
//! pager        update(total); slice [start, end)
//! fetch        cond(pk, slice).exec()
//! ```
//!
//! The query and pager are injected; pass `&mut` references to keep using
//! them after the collection is dropped.

use roster_query::{Clause, EntityQuery, Key, OrderBy, QueryError};
use roster_render::{RenderError, ViewRenderer};
use serde::Serialize;
use tracing::{debug, warn};

use crate::collection::{Collection, Listing};
use crate::config::{CollectionConfig, HandlerFailure};
use crate::error::CollectionError;
use crate::handler::{handler_fn, handler_with, HandlerChain, HandlerError, IdHandler};
use crate::pager::Pager;
use crate::views::{ViewData, ViewNames};

/// A collection filled page by page from an [`EntityQuery`].
///
/// ```rust
/// use roster::{Dir, Listing, MemoryQuery, PageWindow, Paged, Renderer};
/// # use roster::{Number, Record, Value};
/// # #[derive(Clone, serde::Serialize)]
/// # struct Book { id: i64, title: String }
/// # impl Record for Book {
/// #     fn field_names() -> &'static [&'static str] { &["id", "title"] }
/// #     fn field(&self, name: &str) -> Value<'_> {
/// #         match name {
/// #             "id" => Value::Number(Number::I64(self.id)),
/// #             "title" => Value::String(&self.title),
/// #             _ => Value::None,
/// #         }
/// #     }
/// # }
///
/// let mut renderer = Renderer::new();
/// renderer.add_template("www/collection/index", "{{ items }}").unwrap();
/// renderer.add_template("www/collection/item/index", "[{{ item.title }}]").unwrap();
///
/// let query = MemoryQuery::new(vec![
///     Book { id: 1, title: "Dune".into() },
///     Book { id: 2, title: "Emma".into() },
///     Book { id: 3, title: "Beloved".into() },
/// ]);
///
/// let mut books = Paged::new(renderer, query, PageWindow::new(1, 2));
/// books.sorter("title", Dir::Asc).fill().unwrap();
///
/// assert_eq!(books.render().unwrap(), "[Beloved][Dune]");
/// assert_eq!(books.pager().page_count(), 2);
/// ```
pub struct Paged<Q, P, R>
where
    Q: EntityQuery,
{
    collection: Collection<Q::Item, R>,
    query: Q,
    pager: P,
    primary_field: String,
    ids: Vec<Key>,
    handlers: HandlerChain,
    sorters: Vec<OrderBy>,
    search: Vec<String>,
    on_handler_failure: HandlerFailure,
}

impl<Q, P, R> Paged<Q, P, R>
where
    Q: EntityQuery,
    P: Pager,
{
    /// Creates an empty paged collection keyed on `id`, using the paged
    /// view names.
    pub fn new(renderer: R, query: Q, pager: P) -> Self {
        Self {
            collection: Collection::with_views(renderer, ViewNames::paged()),
            query,
            pager,
            primary_field: "id".to_string(),
            ids: Vec::new(),
            handlers: HandlerChain::new(),
            sorters: Vec::new(),
            search: Vec::new(),
            on_handler_failure: HandlerFailure::default(),
        }
    }

    /// Sets the field holding entity identifiers.
    pub fn with_primary_field(mut self, field: impl Into<String>) -> Self {
        self.primary_field = field.into();
        self
    }

    /// Replaces the view names.
    pub fn with_views(mut self, views: ViewNames) -> Self {
        self.collection.set_views(views);
        self
    }

    /// Applies the primary field, view overrides and failure policy from
    /// `config`.
    ///
    /// The pager is not touched; build one with
    /// [`CollectionConfig::pager`] and pass it to [`new`](Self::new).
    pub fn with_config(mut self, config: &CollectionConfig) -> Self {
        self.primary_field = config.primary_field.clone();
        self.collection
            .set_views(config.views.apply(ViewNames::paged()));
        self.on_handler_failure = config.on_handler_failure;
        self
    }

    /// Adds a search term. Empty and `None` terms are ignored.
    pub fn search<'s>(&mut self, term: impl Into<Option<&'s str>>) -> &mut Self {
        if let Some(term) = term.into().filter(|t| !t.is_empty()) {
            self.search.push(term.to_string());
        }
        self
    }

    /// Appends an identifier handler.
    pub fn handler<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Vec<Key>) -> Result<(), HandlerError> + 'static,
    {
        self.handlers.push(handler_fn(f));
        self
    }

    /// Appends an identifier handler that receives `args` on every call.
    pub fn handler_with<F, A>(&mut self, f: F, args: A) -> &mut Self
    where
        F: FnMut(&mut Vec<Key>, &A) -> Result<(), HandlerError> + 'static,
        A: 'static,
    {
        self.handlers.push(handler_with(f, args));
        self
    }

    /// Appends a handler implemented as a type.
    pub fn id_handler(&mut self, handler: impl IdHandler + 'static) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    /// Appends a sort directive. Earlier directives take priority.
    ///
    /// The field is not checked until the query runs.
    pub fn sorter(&mut self, field: impl Into<String>, dir: roster_query::Dir) -> &mut Self {
        self.sorters.push(OrderBy::new(field, dir));
        self
    }

    /// Sets what [`fill`](Self::fill) does when a handler fails.
    pub fn on_handler_failure(&mut self, policy: HandlerFailure) -> &mut Self {
        self.on_handler_failure = policy;
        self
    }

    /// Resolves identifiers, updates the pager and fetches the current page.
    ///
    /// Every call starts over: previous identifiers and items are discarded.
    /// When no identifier survives the re-resolve pass the collection stays
    /// empty and the pager is not updated.
    ///
    /// The pass runs between a [`checkpoint`](EntityQuery::checkpoint) and a
    /// [`rollback`](EntityQuery::rollback) of the query session, so the
    /// search, sorters and key restrictions it attaches are gone afterwards
    /// and every call recomputes from the session as it was handed in.
    ///
    /// # Errors
    ///
    /// Query failures are returned as they happen. A handler failure is
    /// returned under [`HandlerFailure::Abort`] and logged under
    /// [`HandlerFailure::Continue`].
    pub fn fill(&mut self) -> Result<&mut Self, CollectionError> {
        self.ids.clear();
        self.collection.clear();

        self.query.checkpoint();
        let filled = self.fill_page();
        self.query.rollback();
        filled.map(|()| self)
    }

    fn fill_page(&mut self) -> Result<(), CollectionError> {
        let candidates = if self.handlers.is_empty() {
            debug!(target: "roster::paged", field = %self.primary_field, "resolving all identifiers");
            self.query.field_values(&self.primary_field)?
        } else {
            debug!(target: "roster::paged", handlers = self.handlers.len(), "running identifier handlers");
            let mut ids = Vec::new();
            if let Err(err) = self.handlers.run(&mut ids) {
                match self.on_handler_failure {
                    HandlerFailure::Abort => return Err(err.into()),
                    HandlerFailure::Continue => {
                        warn!(target: "roster::paged", error = %err, kept = ids.len(), "continuing with partial identifiers");
                    }
                }
            }
            ids
        };

        let clauses = self.search_clauses()?;
        if !clauses.is_empty() {
            debug!(target: "roster::paged", fields = clauses.len(), "applying search");
            self.query.cond_any(clauses);
        }

        for sorter in &self.sorters {
            self.query.order_by(&sorter.field, sorter.dir);
        }

        let ordered = self
            .query
            .cond(&self.primary_field, &candidates)
            .field_values_in(&self.primary_field, &candidates)?;
        if ordered.is_empty() {
            debug!(target: "roster::paged", candidates = candidates.len(), "nothing to display");
            return Ok(());
        }

        self.pager.update(ordered.len());
        let start = self.pager.start().min(ordered.len());
        let end = self.pager.end().clamp(start, ordered.len());
        debug!(target: "roster::paged", total = ordered.len(), start, end, "page window");

        let page = ordered[start..end].to_vec();
        let items = self.query.cond(&self.primary_field, &page).exec()?;
        self.ids = page;
        self.collection.replace(items);
        Ok(())
    }

    fn search_clauses(&self) -> Result<Vec<Clause>, QueryError> {
        let Some(phrase) = self.search_phrase() else {
            return Ok(Vec::new());
        };
        let pattern = format!("%{}%", escape_like(&phrase));
        self.query
            .fields()
            .iter()
            .map(|field| Clause::like(field.as_str(), &pattern))
            .collect()
    }

    /// Identifiers of the current page after the last [`fill`](Self::fill).
    pub fn ids(&self) -> &[Key] {
        &self.ids
    }

    /// Registered search terms.
    pub fn search_terms(&self) -> &[String] {
        &self.search
    }

    /// The search terms joined by a space, or `None` if there are none.
    pub fn search_phrase(&self) -> Option<String> {
        (!self.search.is_empty()).then(|| self.search.join(" "))
    }

    pub fn sorters(&self) -> &[OrderBy] {
        &self.sorters
    }

    pub fn primary_field(&self) -> &str {
        &self.primary_field
    }

    pub fn pager(&self) -> &P {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut P {
        &mut self.pager
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut Q {
        &mut self.query
    }

    /// The fetched page as a plain collection.
    pub fn collection(&self) -> &Collection<Q::Item, R> {
        &self.collection
    }

    /// Mutable access to the fetched page, for cursor iteration.
    pub fn collection_mut(&mut self) -> &mut Collection<Q::Item, R> {
        &mut self.collection
    }

    /// Number of items on the current page.
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// Returns `true` if the current page holds no items.
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Iterates the current page in fetch order.
    pub fn iter(&self) -> std::slice::Iter<'_, Q::Item> {
        self.collection.iter()
    }
}

impl<Q, P, R> Listing for Paged<Q, P, R>
where
    Q: EntityQuery,
    Q::Item: Serialize,
    P: Pager,
    R: ViewRenderer,
{
    type Item = Q::Item;
    type Renderer = R;

    fn items(&self) -> &[Q::Item] {
        self.collection.items()
    }

    fn renderer(&self) -> &R {
        self.collection.renderer()
    }

    fn views(&self) -> &ViewNames {
        self.collection.views()
    }

    /// Adds the pager fragment as `{prefix}pager`.
    fn to_view(&self, prefix: &str, _restricted: &[&str]) -> Result<ViewData, RenderError> {
        let mut data = ViewData::new();
        data.insert(format!("{}html", prefix), self.render()?);
        data.insert(format!("{}pager", prefix), self.pager.fragment());
        Ok(data)
    }
}

impl<'a, Q, P, R> IntoIterator for &'a Paged<Q, P, R>
where
    Q: EntityQuery,
{
    type Item = &'a Q::Item;
    type IntoIter = std::slice::Iter<'a, Q::Item>;

    fn into_iter(self) -> Self::IntoIter {
        (&self.collection).into_iter()
    }
}

/// Escapes LIKE wildcards so a search phrase matches literally.
fn escape_like(phrase: &str) -> String {
    let mut escaped = String::with_capacity(phrase.len());
    for c in phrase.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::PageWindow;
    use roster_query::{Dir, MemoryQuery, Number, Op, Record, Value};
    use roster_render::Renderer;

    #[derive(Debug, Clone, Serialize)]
    struct Product {
        id: i64,
        title: String,
        price: i64,
    }

    impl Record for Product {
        fn field_names() -> &'static [&'static str] {
            &["id", "title", "price"]
        }

        fn field(&self, name: &str) -> Value<'_> {
            match name {
                "id" => Value::Number(Number::I64(self.id)),
                "title" => Value::String(&self.title),
                "price" => Value::Number(Number::I64(self.price)),
                _ => Value::None,
            }
        }
    }

    fn product(id: i64, title: &str, price: i64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
        }
    }

    fn catalog() -> MemoryQuery<Product> {
        MemoryQuery::new(vec![
            product(1, "Oak desk", 300),
            product(2, "Desk lamp", 40),
            product(3, "Pine desk", 250),
            product(4, "Chair", 90),
            product(5, "100% wool rug", 120),
        ])
    }

    fn renderer() -> Renderer {
        let mut r = Renderer::new();
        r.add_template("www/collection/index", "<ul>{{ items }}</ul>")
            .unwrap();
        r.add_template("www/collection/item/index", "<li>{{ item.id }}</li>")
            .unwrap();
        r.add_template("www/collection/item/empty", "empty").unwrap();
        r
    }

    fn ids(list: &[i64]) -> Vec<Key> {
        list.iter().map(|&n| Key::Int(n)).collect()
    }

    #[test]
    fn test_fill_first_page() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 2));
        paged.fill().unwrap();

        assert_eq!(paged.ids(), ids(&[1, 2]).as_slice());
        assert_eq!(paged.len(), 2);
        assert_eq!(paged.pager().total(), 5);
        assert_eq!(paged.render().unwrap(), "<ul><li>1</li><li>2</li></ul>");
    }

    #[test]
    fn test_fill_sorted_second_page() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(2, 2));
        paged.sorter("price", Dir::Desc).fill().unwrap();

        // price desc: 1, 3, 5, 4, 2
        assert_eq!(paged.ids(), ids(&[5, 4]).as_slice());
    }

    #[test]
    fn test_search_matches_any_field_case_insensitive() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 10));
        paged.search("DESK").fill().unwrap();

        assert_eq!(paged.search_phrase().as_deref(), Some("DESK"));
        assert_eq!(paged.ids(), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn test_search_wildcards_are_literal() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 10));
        paged.search("100%").fill().unwrap();
        assert_eq!(paged.ids(), ids(&[5]).as_slice());
    }

    #[test]
    fn test_search_ignores_empty_terms() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 10));
        paged.search("").search(None::<&str>);
        assert!(paged.search_terms().is_empty());
        assert_eq!(paged.search_phrase(), None);

        paged.search("oak").search("desk");
        assert_eq!(paged.search_phrase().as_deref(), Some("oak desk"));
    }

    #[test]
    fn test_handlers_replace_resolve_all() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 10));
        paged
            .handler(|ids| {
                ids.extend([Key::Int(4), Key::Int(2)]);
                Ok(())
            })
            .sorter("id", Dir::Asc)
            .fill()
            .unwrap();

        assert_eq!(paged.ids(), ids(&[2, 4]).as_slice());
    }

    #[test]
    fn test_handler_with_bound_args() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 10));
        paged
            .handler_with(
                |ids, wanted: &Vec<i64>| {
                    ids.extend(wanted.iter().map(|&n| Key::Int(n)));
                    Ok(())
                },
                vec![3, 1],
            )
            .fill()
            .unwrap();

        assert_eq!(paged.len(), 2);
    }

    #[test]
    fn test_abort_policy_returns_error() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 10));
        paged
            .handler(|ids| {
                ids.push(Key::Int(1));
                Ok(())
            })
            .handler(|_| Err(HandlerError::new("category service down")));

        let err = paged.fill().err().unwrap();
        assert!(matches!(err, CollectionError::Handler(ref e) if e.index == 1));
        assert!(paged.is_empty());
        assert_eq!(paged.pager().total(), 0);
    }

    #[test]
    fn test_continue_policy_keeps_partial_ids() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 10));
        paged
            .on_handler_failure(HandlerFailure::Continue)
            .handler(|ids| {
                ids.push(Key::Int(3));
                Err(HandlerError::new("partial"))
            })
            .fill()
            .unwrap();

        assert_eq!(paged.ids(), ids(&[3]).as_slice());
    }

    #[test]
    fn test_no_match_renders_empty_view() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 10));
        paged.search("sofa").fill().unwrap();

        assert!(paged.is_empty());
        assert_eq!(paged.render().unwrap(), "empty");
    }

    #[test]
    fn test_refill_discards_previous_page() {
        let mut pager = PageWindow::new(1, 2);
        let mut query = catalog();
        let mut paged = Paged::new(renderer(), &mut query, &mut pager);

        paged.fill().unwrap();
        paged.pager_mut().set_page(3);
        paged.fill().unwrap();

        assert_eq!(paged.ids(), ids(&[5]).as_slice());
        drop(paged);
        assert_eq!(pager.page(), 3);
    }

    #[test]
    fn test_page_navigation_on_one_session() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 2));
        paged.fill().unwrap();
        assert_eq!(paged.render().unwrap(), "<ul><li>1</li><li>2</li></ul>");

        paged.pager_mut().set_page(2);
        paged.fill().unwrap();
        assert_eq!(paged.pager().total(), 5);
        assert_eq!(paged.ids(), ids(&[3, 4]).as_slice());
        assert_eq!(paged.render().unwrap(), "<ul><li>3</li><li>4</li></ul>");
    }

    #[test]
    fn test_fill_leaves_session_as_handed_in() {
        let mut query = catalog();
        query.and(Clause::new("price", Op::Lt, 200i64));
        let mut paged = Paged::new(renderer(), query, PageWindow::new(1, 10));
        paged.search("desk").sorter("price", Dir::Asc);

        paged.fill().unwrap();
        paged.fill().unwrap();

        assert_eq!(paged.ids(), ids(&[2]).as_slice());
        assert_eq!(paged.query().and_clauses().len(), 1);
        assert!(paged.query().or_groups().is_empty());
        assert!(paged.query().orderings().is_empty());
    }

    #[test]
    fn test_failed_fill_rolls_back_session() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 10));
        paged.search("desk").sorter("weight", Dir::Asc);

        assert!(paged.fill().is_err());
        assert!(paged.query().or_groups().is_empty());
        assert!(paged.query().orderings().is_empty());
    }

    #[test]
    fn test_to_view_includes_pager() {
        let mut paged = Paged::new(renderer(), catalog(), PageWindow::new(1, 3));
        paged.fill().unwrap();

        let data = paged.to_view("products_", &[]).unwrap();
        assert_eq!(data["products_html"], "<ul><li>1</li><li>2</li><li>3</li></ul>");
        assert!(data["products_pager"].starts_with("<ul class=\"pager\">"));
    }

    #[test]
    fn test_with_config() {
        let config = CollectionConfig::from_yaml_str(
            "primary_field: sku\nviews:\n  empty: ''\non_handler_failure: continue\n",
        )
        .unwrap();
        let paged = Paged::new(renderer(), catalog(), config.pager()).with_config(&config);

        assert_eq!(paged.primary_field(), "sku");
        assert_eq!(paged.views().empty, None);
        assert_eq!(paged.views().index, "www/collection/index");
    }

    #[test]
    fn test_unknown_primary_field_is_query_error() {
        let mut paged =
            Paged::new(renderer(), catalog(), PageWindow::new(1, 10)).with_primary_field("sku");
        let err = paged.fill().err().unwrap();
        assert!(matches!(
            err,
            CollectionError::Query(QueryError::UnknownField(ref f)) if f == "sku"
        ));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
