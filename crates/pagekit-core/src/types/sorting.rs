//! Sorting types and the `sort` query parameter parser.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

impl Direction {
    /// Lenient coercion: only a case-insensitive `"descending"` is descending.
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.to_lowercase() == "descending" => Self::Descending,
            _ => Self::Ascending,
        }
    }

    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// Return the wire name of this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    /// Whether this is [`Direction::Descending`].
    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Descending)
    }
}

impl FromStr for Direction {
    type Err = AppError;

    /// Strict parsing used for explicit directions in the `sort` parameter.
    ///
    /// Matching is exact: `ASC` or `Descending` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            _ => Err(AppError::invalid_sort()),
        }
    }
}

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    property: String,
    #[serde(default)]
    direction: Direction,
}

impl Order {
    /// Create a new order on `property`.
    pub fn new(property: impl Into<String>, direction: Direction) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    /// Create an order from raw direction text, defaulting to ascending on
    /// anything that is not `"descending"`.
    pub fn lenient(property: impl Into<String>, direction: Option<&str>) -> Self {
        Self::new(property, Direction::coerce(direction))
    }

    /// Create an ascending order on `property`.
    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Ascending)
    }

    /// Create a descending order on `property`.
    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Descending)
    }

    /// Property name to sort by.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Ordered list of sort keys: primary first, then secondary, and so on.
///
/// Serializes as the bare list of orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// Wrap pre-built orders.
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Iterate over the orders. Each call starts over from the first key.
    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    /// Invoke `f` with the property name and direction of every order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&str, Direction),
    {
        for order in &self.orders {
            f(order.property(), order.direction());
        }
    }

    /// The orders as a slice.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Number of sort keys.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether there are no sort keys.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl From<Vec<Order>> for Sort {
    fn from(orders: Vec<Order>) -> Self {
        Self::new(orders)
    }
}

impl IntoIterator for Sort {
    type Item = Order;
    type IntoIter = std::vec::IntoIter<Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

impl FromStr for Sort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tokens(s.split(','))
    }
}

/// Raw value of the `sort` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortParam {
    /// A single occurrence, e.g. `sort=name,age:desc`.
    Single(String),
    /// Repeated occurrences, e.g. `sort=name&sort=age:desc`.
    Multi(Vec<String>),
}

impl From<&str> for SortParam {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for SortParam {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for SortParam {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

/// Parse a raw `sort` parameter into a [`Sort`].
///
/// Tokens are `property[:direction]` separated by commas. Empty tokens and
/// empty `:` segments are skipped. A missing direction means ascending; an
/// unrecognized one fails with [`ErrorKind::InvalidSort`](crate::error::ErrorKind::InvalidSort).
pub fn parse_sort(raw: &SortParam) -> AppResult<Sort> {
    match raw {
        SortParam::Single(value) => parse_tokens(value.split(',')),
        SortParam::Multi(values) => parse_tokens(values.iter().flat_map(|v| v.split(','))),
    }
}

fn parse_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> AppResult<Sort> {
    let mut orders = Vec::new();

    for token in tokens.filter(|t| !t.is_empty()) {
        let mut parts = token.split(':').filter(|p| !p.is_empty());
        let Some(property) = parts.next() else {
            continue;
        };
        let direction = match parts.next() {
            Some(raw) => raw.parse::<Direction>()?,
            None => Direction::default(),
        };
        orders.push(Order::new(property, direction));
    }

    Ok(Sort::new(orders))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn pairs(sort: &Sort) -> Vec<(String, Direction)> {
        sort.iter()
            .map(|o| (o.property().to_string(), o.direction()))
            .collect()
    }

    #[test]
    fn test_default_direction_is_ascending() {
        assert_eq!(Direction::default(), Direction::Ascending);
        assert_eq!(Order::lenient("name", None).direction(), Direction::Ascending);
    }

    #[test]
    fn test_lenient_order_coercion() {
        assert_eq!(
            Order::lenient("a", Some("DESCENDING")).direction(),
            Direction::Descending
        );
        assert_eq!(Order::lenient("a", Some("desc")).direction(), Direction::Ascending);
        assert_eq!(Order::lenient("a", Some("")).direction(), Direction::Ascending);
        assert_eq!(Order::lenient("a", Some("decending")).direction(), Direction::Ascending);
    }

    #[test]
    fn test_parse_mixed_directions() {
        let sort = parse_sort(&"a,b:desc,c:asc".into()).expect("should parse");
        assert_eq!(
            pairs(&sort),
            vec![
                ("a".to_string(), Direction::Ascending),
                ("b".to_string(), Direction::Descending),
                ("c".to_string(), Direction::Ascending),
            ]
        );
    }

    #[test]
    fn test_parse_full_direction_names() {
        let sort: Sort = "a:descending,b:ascending".parse().expect("should parse");
        assert_eq!(sort.orders()[0], Order::desc("a"));
        assert_eq!(sort.orders()[1], Order::asc("b"));
    }

    #[test]
    fn test_parse_uppercase_direction_rejected() {
        for raw in ["a:DESC", "a:Descending", "a:ASC", "a:Asc"] {
            let err = parse_sort(&raw.into()).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidSort, "{raw}");
        }
    }

    #[test]
    fn test_direction_wire_names() {
        assert_eq!(Direction::Ascending.as_str(), "ascending");
        assert_eq!(Direction::Descending.as_str(), "descending");
        assert_eq!(
            serde_json::to_value(Direction::Descending).expect("serialize"),
            serde_json::json!(Direction::Descending.as_str())
        );
    }

    #[test]
    fn test_parse_skips_empty_tokens() {
        let sort = parse_sort(&"a,,b,".into()).expect("should parse");
        assert_eq!(sort.len(), 2);
        assert!(sort.iter().all(|o| !o.property().is_empty()));
    }

    #[test]
    fn test_parse_doubled_colon() {
        let sort = parse_sort(&"a::desc".into()).expect("should parse");
        assert_eq!(sort.orders(), &[Order::desc("a")]);
    }

    #[test]
    fn test_parse_multi_value() {
        let raw = SortParam::Multi(vec!["name".into(), "age:desc,id".into()]);
        let sort = parse_sort(&raw).expect("should parse");
        assert_eq!(
            sort.orders(),
            &[Order::asc("name"), Order::desc("age"), Order::asc("id")]
        );
    }

    #[test]
    fn test_parse_invalid_direction() {
        let err = parse_sort(&"a:foo".into()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSort);
    }

    #[test]
    fn test_parse_empty_input() {
        let sort = parse_sort(&"".into()).expect("should parse");
        assert!(sort.is_empty());
    }

    #[test]
    fn test_iteration_is_restartable() {
        let sort = Sort::new(vec![Order::asc("a"), Order::desc("b")]);
        let first: Vec<_> = sort.iter().collect();
        let second: Vec<_> = (&sort).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_for_each_passes_scalars() {
        let sort = Sort::new(vec![Order::asc("a"), Order::desc("b")]);
        let mut seen = Vec::new();
        sort.for_each(|property, direction| {
            seen.push(format!("{property} {}", direction.as_sql()));
        });
        assert_eq!(seen, vec!["a ASC", "b DESC"]);
    }

    #[test]
    fn test_serializes_as_bare_list() {
        let sort = Sort::new(vec![Order::desc("age")]);
        let json = serde_json::to_value(&sort).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!([{ "property": "age", "direction": "descending" }])
        );
    }
}
