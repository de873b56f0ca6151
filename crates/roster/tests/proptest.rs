//! Property-based tests for the fill and render pipeline.

use std::collections::BTreeSet;

use proptest::prelude::*;
use roster::{
    Collection, Dir, Key, Listing, MemoryQuery, Number, PageWindow, Paged, Pager, Record,
    Renderer, Value,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct Row {
    id: i64,
    rank: i64,
}

impl Record for Row {
    fn field_names() -> &'static [&'static str] {
        &["id", "rank"]
    }

    fn field(&self, name: &str) -> Value<'_> {
        match name {
            "id" => Value::Number(Number::I64(self.id)),
            "rank" => Value::Number(Number::I64(self.rank)),
            _ => Value::None,
        }
    }
}

fn renderer() -> Renderer {
    let mut r = Renderer::new();
    r.add_template("www/index", "[{{ items }}]").unwrap();
    r.add_template("www/item", "{{ item.id }},").unwrap();
    r.add_template("www/empty", "-").unwrap();
    r.add_template("www/collection/index", "[{{ items }}]")
        .unwrap();
    r.add_template("www/collection/item/index", "{{ item.id }},")
        .unwrap();
    r.add_template("www/collection/item/empty", "-").unwrap();
    r
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::btree_set(-500i64..500, 0..40).prop_flat_map(|ids: BTreeSet<i64>| {
        let n = ids.len();
        (Just(ids), prop::collection::vec(0i64..10, n)).prop_map(|(ids, ranks)| {
            ids.into_iter()
                .zip(ranks)
                .map(|(id, rank)| Row { id, rank })
                .collect()
        })
    })
}

proptest! {
    #[test]
    fn page_never_exceeds_window(
        rows in rows_strategy(),
        page in 1usize..8,
        size in 0usize..7,
    ) {
        let total = rows.len();
        let mut paged = Paged::new(renderer(), MemoryQuery::new(rows), PageWindow::new(page, size));
        paged.fill().unwrap();

        let window = paged.pager().window_len();
        prop_assert!(paged.len() <= window || total == 0);
        prop_assert_eq!(paged.len(), paged.ids().len());
    }

    #[test]
    fn page_is_slice_of_sorted_ids(
        rows in rows_strategy(),
        page in 1usize..8,
        size in 1usize..7,
    ) {
        let mut sorted: Vec<(i64, i64)> = rows.iter().map(|r| (r.rank, r.id)).collect();
        sorted.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        let expected: Vec<Key> = sorted.iter().map(|&(_, id)| Key::Int(id)).collect();

        let mut paged = Paged::new(renderer(), MemoryQuery::new(rows), PageWindow::new(page, size));
        paged
            .sorter("rank", Dir::Desc)
            .sorter("id", Dir::Asc)
            .fill()
            .unwrap();

        if expected.is_empty() {
            prop_assert!(paged.is_empty());
        } else {
            let (start, end) = (paged.pager().start(), paged.pager().end());
            prop_assert_eq!(paged.ids(), &expected[start..end]);
            let fetched: Vec<Key> = paged.iter().map(|r| Key::Int(r.id)).collect();
            prop_assert_eq!(fetched.as_slice(), paged.ids());
        }
    }

    #[test]
    fn render_is_index_of_concatenated_items(ids in prop::collection::vec(0i64..1000, 1..20)) {
        let mut c = Collection::new(renderer());
        c.replace(ids.into_iter().map(|id| Row { id, rank: 0 }).collect());

        let items: String = c
            .iter()
            .map(|row| c.render_item(row).unwrap())
            .collect();
        prop_assert_eq!(c.render().unwrap(), c.render_index(&items).unwrap());
    }

    #[test]
    fn blank_search_terms_are_ignored(terms in prop::collection::vec("[a-z]{0,3}", 0..6)) {
        let mut paged = Paged::new(renderer(), MemoryQuery::<Row>::new(Vec::new()), PageWindow::default());
        for term in &terms {
            paged.search(term.as_str());
        }

        let kept: Vec<&String> = terms.iter().filter(|t| !t.is_empty()).collect();
        prop_assert_eq!(paged.search_terms().len(), kept.len());
    }
}

#[test]
fn empty_collection_renders_empty_view() {
    let c: Collection<Row, _> = Collection::new(renderer());
    assert_eq!(c.render().unwrap(), c.render_empty().unwrap());
}
