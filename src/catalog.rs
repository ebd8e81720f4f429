//! In-memory book catalog standing in for a data-access layer.

use std::cmp::Ordering;

use serde::Serialize;

use pagekit_core::types::{HasIdentifier, Pageable, Sort};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub year: u16,
}

impl Book {
    pub fn new(id: u32, title: &str, author: &str, year: u16) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            year,
        }
    }
}

impl HasIdentifier for Book {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Read-only collection of books.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// A small fixed catalog.
    pub fn sample() -> Self {
        Self::new(vec![
            Book::new(1, "Dune", "Frank Herbert", 1965),
            Book::new(2, "Neuromancer", "William Gibson", 1984),
            Book::new(3, "Hyperion", "Dan Simmons", 1989),
            Book::new(4, "Foundation", "Isaac Asimov", 1951),
            Book::new(5, "Solaris", "Stanislaw Lem", 1961),
            Book::new(6, "The Dispossessed", "Ursula K. Le Guin", 1974),
            Book::new(7, "I, Robot", "Isaac Asimov", 1950),
        ])
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Returns one page of books, sorted as requested, and the total count.
    ///
    /// Unknown sort properties are ignored.
    pub fn find_page(&self, pageable: &Pageable) -> (Vec<Book>, u64) {
        let mut books = self.books.clone();
        if let Some(sort) = pageable.sort() {
            books.sort_by(|a, b| compare(a, b, sort));
        }

        let total = books.len() as u64;
        let offset = usize::try_from(pageable.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pageable.limit()).unwrap_or(usize::MAX);
        let content = books.into_iter().skip(offset).take(limit).collect();

        (content, total)
    }
}

fn compare(a: &Book, b: &Book, sort: &Sort) -> Ordering {
    sort.iter().fold(Ordering::Equal, |acc, order| {
        acc.then_with(|| {
            let ordering = match order.property() {
                "id" => a.id.cmp(&b.id),
                "title" => a.title.cmp(&b.title),
                "author" => a.author.cmp(&b.author),
                "year" => a.year.cmp(&b.year),
                _ => Ordering::Equal,
            };
            if order.direction().is_descending() {
                ordering.reverse()
            } else {
                ordering
            }
        })
    })
}
