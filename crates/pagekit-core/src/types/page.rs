//! Page containers for paginated responses.
//!
//! Every page carries the same [`PageMeta`] envelope. Content comes in two
//! wire shapes: a flat `content` array, or an `ids` list plus an `index` map
//! keyed by id. [`IndexablePage`] picks between the two at conversion time
//! based on the `indexed` flag of the originating [`Pageable`].

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Serialize, Serializer};

use crate::types::pagination::Pageable;
use crate::types::sorting::Sort;

/// Content that exposes an identifier usable as an index key.
pub trait HasIdentifier {
    /// Identifier type.
    type Id: Clone + Eq + Hash + fmt::Debug;

    /// The element's identifier.
    fn id(&self) -> Self::Id;
}

impl<T: HasIdentifier + ?Sized> HasIdentifier for &T {
    type Id = T::Id;

    fn id(&self) -> Self::Id {
        (**self).id()
    }
}

/// Paging metadata shared by all page shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    number: u64,
    size: u64,
    number_of_elements: u64,
    total_elements: u64,
    total_pages: u64,
    sort: Option<Sort>,
    first: bool,
    last: bool,
}

impl PageMeta {
    /// Derive the envelope for one page of a `total_elements` result set.
    ///
    /// `total_pages` is never zero, so page 0 of an empty result set is both
    /// first and last. `last` is not clamped: any page at or past the final
    /// one reports `last = true`. `number_of_elements` starts at zero and is
    /// filled in by the page that owns the content.
    pub fn new(total_elements: u64, pageable: &Pageable) -> Self {
        let number = pageable.page();
        let size = pageable.size();
        let total_pages = total_elements.div_ceil(size.max(1)).max(1);

        Self {
            number,
            size,
            number_of_elements: 0,
            total_elements,
            total_pages,
            sort: pageable.sort().cloned(),
            first: number == 0,
            last: number >= total_pages - 1,
        }
    }

    fn with_number_of_elements(mut self, count: usize) -> Self {
        self.number_of_elements = count as u64;
        self
    }

    /// Re-derive a [`Pageable`] with this page's number, size, and sort.
    pub fn pageable(&self, indexed: bool) -> Pageable {
        let pageable = Pageable::new(self.number, self.size).with_indexed(indexed);
        match &self.sort {
            Some(sort) => pageable.with_sort(sort.clone()),
            None => pageable,
        }
    }

    /// Page index (0-based).
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Requested page size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of elements on this page.
    pub fn number_of_elements(&self) -> u64 {
        self.number_of_elements
    }

    /// Number of elements across all pages.
    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Sort applied to the result set.
    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// Whether this is the first page.
    pub fn first(&self) -> bool {
        self.first
    }

    /// Whether this is the last page.
    pub fn last(&self) -> bool {
        self.last
    }
}

/// Page whose content is a flat, ordered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayPage<T> {
    #[serde(flatten)]
    meta: PageMeta,
    content: Vec<T>,
}

impl<T> ArrayPage<T> {
    /// Create a page from its content and the result set's total count.
    pub fn new(content: Vec<T>, total_elements: u64, pageable: &Pageable) -> Self {
        let meta = PageMeta::new(total_elements, pageable).with_number_of_elements(content.len());
        Self { meta, content }
    }

    /// Paging metadata.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Page content.
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page, returning its content.
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Transform every element; `f` also receives the element's position.
    pub fn map<U, F>(self, mut f: F) -> ArrayPage<U>
    where
        F: FnMut(T, usize) -> U,
    {
        let pageable = self.meta.pageable(false);
        let content = self
            .content
            .into_iter()
            .enumerate()
            .map(|(position, item)| f(item, position))
            .collect();
        ArrayPage::new(content, self.meta.total_elements, &pageable)
    }

    fn by_ref(&self) -> ArrayPage<&T> {
        ArrayPage {
            meta: self.meta.clone(),
            content: self.content.iter().collect(),
        }
    }
}

/// Page whose content is normalized into an id list and an id-keyed map.
///
/// The map carries no order; `ids` is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedPage<I: Eq + Hash, T> {
    #[serde(flatten)]
    meta: PageMeta,
    ids: Vec<I>,
    index: HashMap<I, T>,
}

impl<I: Eq + Hash, T> IndexedPage<I, T> {
    /// Create a page from pre-built ids and index.
    pub fn new(
        ids: Vec<I>,
        index: HashMap<I, T>,
        total_elements: u64,
        pageable: &Pageable,
    ) -> Self {
        let meta = PageMeta::new(total_elements, pageable).with_number_of_elements(index.len());
        Self { meta, ids, index }
    }

    /// Normalize ordered content by each element's id.
    ///
    /// Duplicate ids keep their position in `ids`; the later element wins
    /// in `index`.
    pub fn from_content(content: Vec<T>, total_elements: u64, pageable: &Pageable) -> Self
    where
        T: HasIdentifier<Id = I>,
    {
        let ids = content.iter().map(|item| item.id()).collect();
        let index = content.into_iter().map(|item| (item.id(), item)).collect();
        Self::new(ids, index, total_elements, pageable)
    }

    /// Paging metadata.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Ids in result order.
    pub fn ids(&self) -> &[I] {
        &self.ids
    }

    /// Elements keyed by id.
    pub fn index(&self) -> &HashMap<I, T> {
        &self.index
    }

    /// Elements in `ids` order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &T> {
        self.ids.iter().filter_map(|id| self.index.get(id))
    }

    /// Transform every indexed value, keeping ids and keys.
    pub fn map<U, F>(self, mut f: F) -> IndexedPage<I, U>
    where
        F: FnMut(T) -> U,
    {
        let pageable = self.meta.pageable(true);
        let index = self
            .index
            .into_iter()
            .map(|(id, item)| (id, f(item)))
            .collect();
        IndexedPage::new(self.ids, index, self.meta.total_elements, &pageable)
    }

    fn by_ref(&self) -> IndexedPage<I, &T>
    where
        I: Clone,
    {
        IndexedPage {
            meta: self.meta.clone(),
            ids: self.ids.clone(),
            index: self.index.iter().map(|(id, item)| (id.clone(), item)).collect(),
        }
    }
}

/// Page that keeps ordered content and decides its wire shape late.
///
/// Converted with [`to_wire`](Self::to_wire): indexed pages become an
/// [`IndexedPage`] keyed by [`HasIdentifier::id`], others an [`ArrayPage`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndexablePage<T> {
    meta: PageMeta,
    content: Vec<T>,
    indexed: bool,
}

impl<T> IndexablePage<T> {
    /// Create a page; the output shape follows `pageable.indexed()`.
    pub fn new(content: Vec<T>, total_elements: u64, pageable: &Pageable) -> Self {
        let meta = PageMeta::new(total_elements, pageable).with_number_of_elements(content.len());
        Self {
            meta,
            content,
            indexed: pageable.indexed(),
        }
    }

    /// Paging metadata.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Page content in result order.
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Whether the page converts to the indexed shape.
    pub fn indexed(&self) -> bool {
        self.indexed
    }

    /// Transform every element; `f` also receives the element's position.
    pub fn map<U, F>(self, mut f: F) -> IndexablePage<U>
    where
        F: FnMut(T, usize) -> U,
    {
        let pageable = self.meta.pageable(self.indexed);
        let content = self
            .content
            .into_iter()
            .enumerate()
            .map(|(position, item)| f(item, position))
            .collect();
        IndexablePage::new(content, self.meta.total_elements, &pageable)
    }

    /// Borrowing wire conversion; repeated calls yield equal results.
    pub fn to_wire(&self) -> WirePage<T::Id, &T>
    where
        T: HasIdentifier,
    {
        let pageable = self.meta.pageable(self.indexed);
        WirePage::from_content(self.content.iter().collect(), self.meta.total_elements, &pageable)
    }

    /// Consuming wire conversion.
    pub fn into_wire(self) -> WirePage<T::Id, T>
    where
        T: HasIdentifier,
    {
        let pageable = self.meta.pageable(self.indexed);
        WirePage::from_content(self.content, self.meta.total_elements, &pageable)
    }
}

impl<T> Serialize for IndexablePage<T>
where
    T: HasIdentifier + Serialize,
    T::Id: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

/// Serialized form of a page: one of the two wire shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WirePage<I: Eq + Hash, T> {
    /// `{..meta, content: [...]}`
    Array(ArrayPage<T>),
    /// `{..meta, ids: [...], index: {id: item}}`
    Indexed(IndexedPage<I, T>),
}

impl<I: Eq + Hash, T> WirePage<I, T> {
    fn from_content(content: Vec<T>, total_elements: u64, pageable: &Pageable) -> Self
    where
        T: HasIdentifier<Id = I>,
    {
        if pageable.indexed() {
            Self::Indexed(IndexedPage::from_content(content, total_elements, pageable))
        } else {
            Self::Array(ArrayPage::new(content, total_elements, pageable))
        }
    }

    /// Paging metadata.
    pub fn meta(&self) -> &PageMeta {
        match self {
            Self::Array(page) => page.meta(),
            Self::Indexed(page) => page.meta(),
        }
    }
}

/// Any page variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Page<T: HasIdentifier> {
    /// Flat content.
    Array(ArrayPage<T>),
    /// Id-normalized content.
    Indexed(IndexedPage<T::Id, T>),
    /// Shape chosen at conversion time.
    Indexable(IndexablePage<T>),
}

impl<T: HasIdentifier> Page<T> {
    /// Paging metadata.
    pub fn meta(&self) -> &PageMeta {
        match self {
            Self::Array(page) => page.meta(),
            Self::Indexed(page) => page.meta(),
            Self::Indexable(page) => page.meta(),
        }
    }

    /// Transform every element, keeping the variant and metadata.
    pub fn map<U, F>(self, mut f: F) -> Page<U>
    where
        U: HasIdentifier<Id = T::Id>,
        F: FnMut(T) -> U,
    {
        match self {
            Self::Array(page) => Page::Array(page.map(|item, _| f(item))),
            Self::Indexed(page) => Page::Indexed(page.map(f)),
            Self::Indexable(page) => Page::Indexable(page.map(|item, _| f(item))),
        }
    }

    /// Borrowing wire conversion.
    pub fn to_wire(&self) -> WirePage<T::Id, &T> {
        match self {
            Self::Array(page) => WirePage::Array(page.by_ref()),
            Self::Indexed(page) => WirePage::Indexed(page.by_ref()),
            Self::Indexable(page) => page.to_wire(),
        }
    }

    /// Consuming wire conversion.
    pub fn into_wire(self) -> WirePage<T::Id, T> {
        match self {
            Self::Array(page) => WirePage::Array(page),
            Self::Indexed(page) => WirePage::Indexed(page),
            Self::Indexable(page) => page.into_wire(),
        }
    }
}

impl<T: HasIdentifier> From<ArrayPage<T>> for Page<T> {
    fn from(page: ArrayPage<T>) -> Self {
        Self::Array(page)
    }
}

impl<T: HasIdentifier> From<IndexedPage<T::Id, T>> for Page<T> {
    fn from(page: IndexedPage<T::Id, T>) -> Self {
        Self::Indexed(page)
    }
}

impl<T: HasIdentifier> From<IndexablePage<T>> for Page<T> {
    fn from(page: IndexablePage<T>) -> Self {
        Self::Indexable(page)
    }
}

impl<T> Serialize for Page<T>
where
    T: HasIdentifier + Serialize,
    T::Id: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sorting::Order;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Item {
        id: u32,
        name: &'static str,
    }

    impl HasIdentifier for Item {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn items() -> Vec<Item> {
        vec![Item { id: 1, name: "one" }, Item { id: 2, name: "two" }]
    }

    #[test]
    fn test_empty_result_set_is_single_page() {
        for page in [0, 3] {
            for size in [1, 10] {
                let meta = PageMeta::new(0, &Pageable::new(page, size));
                assert_eq!(meta.total_pages(), 1);
                assert!(meta.last());
                assert_eq!(meta.first(), page == 0);
            }
        }
    }

    #[test]
    fn test_total_pages_and_last() {
        for total in 1..=25u64 {
            for size in 1..=7u64 {
                let expected = total.div_ceil(size);
                for number in 0..expected + 2 {
                    let meta = PageMeta::new(total, &Pageable::new(number, size));
                    assert_eq!(meta.total_pages(), expected);
                    assert_eq!(meta.last(), number >= expected - 1);
                }
            }
        }
    }

    #[test]
    fn test_page_past_end_reports_last() {
        let meta = PageMeta::new(15, &Pageable::new(9999, 10));
        assert_eq!(meta.total_pages(), 2);
        assert!(meta.last());
        assert!(!meta.first());
    }

    #[test]
    fn test_array_page_serialization() {
        let pageable = Pageable::new(0, 2).with_sort(Sort::new(vec![Order::desc("id")]));
        let page = ArrayPage::new(vec![1, 2], 5, &pageable);
        assert_eq!(
            serde_json::to_value(&page).expect("serialize"),
            json!({
                "number": 0,
                "size": 2,
                "numberOfElements": 2,
                "totalElements": 5,
                "totalPages": 3,
                "sort": [{ "property": "id", "direction": "descending" }],
                "first": true,
                "last": false,
                "content": [1, 2],
            })
        );
    }

    #[test]
    fn test_indexed_iter_follows_ids() {
        let content = vec![
            Item { id: 2, name: "two" },
            Item { id: 1, name: "one" },
            Item { id: 3, name: "three" },
        ];
        let page = IndexedPage::from_content(content, 3, &Pageable::new(0, 10));
        let names: Vec<_> = page.iter_ordered().map(|item| item.name).collect();
        assert_eq!(names, vec!["two", "one", "three"]);
    }

    #[test]
    fn test_array_page_into_content() {
        let page = ArrayPage::new(items(), 9, &Pageable::new(0, 2));
        assert_eq!(page.meta().total_pages(), 5);
        assert_eq!(page.into_content(), items());
    }

    #[test]
    fn test_array_page_map() {
        let pageable = Pageable::new(1, 2).with_indexed(true);
        let page = ArrayPage::new(vec!["a", "b"], 4, &pageable);
        let mapped = page.clone().map(|s, i| format!("{i}:{s}"));
        assert_eq!(mapped.content(), &["0:a".to_string(), "1:b".to_string()]);
        assert_eq!(mapped.meta(), page.meta());
    }

    #[test]
    fn test_indexed_page_map_keeps_keys() {
        let page = IndexedPage::from_content(items(), 2, &Pageable::new(0, 10));
        let mapped = page.map(|item| item.name.len());
        assert_eq!(mapped.ids(), &[1, 2]);
        assert_eq!(mapped.index().get(&1), Some(&3));
        assert_eq!(mapped.meta().number_of_elements(), 2);
        assert_eq!(mapped.meta().total_elements(), 2);
    }

    #[test]
    fn test_indexed_page_serialization() {
        let page = IndexedPage::from_content(items(), 2, &Pageable::new(0, 10));
        let json = serde_json::to_value(&page).expect("serialize");
        assert_eq!(json["ids"], json!([1, 2]));
        assert_eq!(json["index"]["1"], json!({ "id": 1, "name": "one" }));
        assert_eq!(json["sort"], json!(null));
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let content = vec![
            Item { id: 7, name: "first" },
            Item { id: 7, name: "second" },
        ];
        let page = IndexedPage::from_content(content, 2, &Pageable::new(0, 10));
        assert_eq!(page.ids(), &[7, 7]);
        assert_eq!(page.index()[&7].name, "second");
        assert_eq!(page.meta().number_of_elements(), 1);
        let names: Vec<_> = page.iter_ordered().map(|item| item.name).collect();
        assert_eq!(names, vec!["second", "second"]);
    }

    #[test]
    fn test_indexable_to_wire_is_repeatable() {
        let page = IndexablePage::new(items(), 2, &Pageable::new(0, 10));
        let first = page.to_wire();
        let second = page.to_wire();
        assert_eq!(first, second);
        assert!(matches!(first, WirePage::Array(_)));
    }

    #[test]
    fn test_indexable_indexed_shape() {
        let page = IndexablePage::new(items(), 2, &Pageable::new(0, 10).with_indexed(true));
        match page.to_wire() {
            WirePage::Indexed(indexed) => {
                assert_eq!(indexed.ids(), &[1, 2]);
                assert_eq!(indexed.index()[&1], &items()[0]);
                assert_eq!(indexed.index()[&2], &items()[1]);
            }
            WirePage::Array(_) => panic!("expected indexed shape"),
        }
    }

    #[test]
    fn test_indexable_map_preserves_indexed_flag() {
        let page = IndexablePage::new(items(), 12, &Pageable::new(1, 2).with_indexed(true));
        let mapped = page.map(|item, position| Item {
            id: item.id * 10,
            name: if position == 0 { "head" } else { item.name },
        });
        assert!(mapped.indexed());
        assert_eq!(mapped.meta().total_elements(), 12);
        assert_eq!(mapped.meta().number(), 1);
        let json = serde_json::to_value(&mapped).expect("serialize");
        assert_eq!(json["ids"], json!([10, 20]));
        assert_eq!(json["index"]["10"]["name"], json!("head"));
    }

    #[test]
    fn test_page_enum_dispatch() {
        let pageable = Pageable::new(0, 10);
        let page: Page<Item> = ArrayPage::new(items(), 2, &pageable).into();
        let mapped = page.map(|item| Item {
            name: "x",
            ..item
        });
        assert_eq!(mapped.meta().number_of_elements(), 2);
        let json = serde_json::to_value(&mapped).expect("serialize");
        assert_eq!(json["content"][1], json!({ "id": 2, "name": "x" }));

        let indexed: Page<Item> = IndexedPage::from_content(items(), 2, &pageable).into();
        assert!(matches!(indexed.into_wire(), WirePage::Indexed(_)));
    }
}
