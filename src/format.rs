//! Minimal text formats for declaring graphs and expected results compactly.
//!
//! A [`Format`] converts between a string and a value, with the round-trip
//! law `parse(write(v)) == v`. Collections are `", "`-delimited; a multimap
//! is a comma-separated list of `key = value` entries, one entry per pair:
//!
//! ```
//! use sieve_digraph::format::{parse_list, parse_multimap};
//!
//! assert_eq!(parse_list("a, b, c"), ["a", "b", "c"]);
//! let parents = parse_multimap("b = a, c = b, c = a").unwrap();
//! assert_eq!(parents[1], ("c".to_string(), vec!["b".to_string(), "a".to_string()]));
//! ```

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::marker::PhantomData;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

/// Errors raised while parsing a formatted string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A scalar item could not be converted.
    #[error("invalid item `{input}`: {reason}")]
    InvalidItem { input: String, reason: String },
    /// A multimap entry is not of the form `key = value`.
    #[error("malformed entry `{0}`: expected `key = value`")]
    MalformedEntry(String),
}

/// Bidirectional conversion between strings and values.
pub trait Format {
    type Value;

    fn parse(&self, s: &str) -> Result<Self::Value, ParseError>;
    fn write(&self, value: &Self::Value) -> String;
}

/// Pass-through format for `String`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrFormat;

impl Format for StrFormat {
    type Value = String;

    fn parse(&self, s: &str) -> Result<String, ParseError> {
        Ok(s.to_string())
    }

    fn write(&self, value: &String) -> String {
        value.clone()
    }
}

/// Format for any `FromStr + Display` scalar (integers, floats, `bool`, …).
#[derive(Clone, Copy, Debug)]
pub struct FromStrFormat<T>(PhantomData<fn() -> T>);

impl<T> Default for FromStrFormat<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T> FromStrFormat<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Format for FromStrFormat<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    type Value = T;

    fn parse(&self, s: &str) -> Result<T, ParseError> {
        s.parse().map_err(|e: T::Err| ParseError::InvalidItem {
            input: s.to_string(),
            reason: e.to_string(),
        })
    }

    fn write(&self, value: &T) -> String {
        value.to_string()
    }
}

/// Delimited list of items; the empty string is the empty list.
#[derive(Clone, Copy, Debug)]
pub struct ListFormat<F> {
    item: F,
    delimiter: &'static str,
}

impl<F: Format> ListFormat<F> {
    pub fn new(item: F, delimiter: &'static str) -> Self {
        Self { item, delimiter }
    }

    /// `", "`-delimited list.
    pub fn comma(item: F) -> Self {
        Self::new(item, ", ")
    }
}

impl<F: Format> Format for ListFormat<F> {
    type Value = Vec<F::Value>;

    fn parse(&self, s: &str) -> Result<Self::Value, ParseError> {
        if s.is_empty() {
            return Ok(Vec::new());
        }
        s.split(self.delimiter).map(|part| self.item.parse(part)).collect()
    }

    fn write(&self, value: &Self::Value) -> String {
        value.iter().map(|v| self.item.write(v)).join(self.delimiter)
    }
}

/// Delimited set of items; duplicates collapse. Written order is unspecified.
#[derive(Clone, Copy, Debug)]
pub struct SetFormat<F> {
    list: ListFormat<F>,
}

impl<F: Format> SetFormat<F> {
    pub fn new(item: F, delimiter: &'static str) -> Self {
        Self {
            list: ListFormat::new(item, delimiter),
        }
    }

    /// `", "`-delimited set.
    pub fn comma(item: F) -> Self {
        Self::new(item, ", ")
    }
}

impl<F> Format for SetFormat<F>
where
    F: Format,
    F::Value: Eq + Hash,
{
    type Value = HashSet<F::Value>;

    fn parse(&self, s: &str) -> Result<Self::Value, ParseError> {
        Ok(self.list.parse(s)?.into_iter().collect())
    }

    fn write(&self, value: &Self::Value) -> String {
        value
            .iter()
            .map(|v| self.list.item.write(v))
            .join(self.list.delimiter)
    }
}

/// Keys with their values, grouped by key in order of first appearance.
pub type Multimap = Vec<(String, Vec<String>)>;

/// `key = value, key = value, …` over strings. Entries and their sides are
/// trimmed; repeated keys accumulate values and repeated pairs collapse.
#[derive(Clone, Copy, Debug, Default)]
pub struct MultimapFormat;

impl Format for MultimapFormat {
    type Value = Multimap;

    fn parse(&self, s: &str) -> Result<Multimap, ParseError> {
        let mut out: Multimap = Vec::new();
        if s.trim().is_empty() {
            return Ok(out);
        }
        for entry in s.split(',').map(str::trim) {
            let (key, value) = match entry.split('=').map(str::trim).collect_tuple::<(&str, &str)>() {
                Some((k, v)) if !k.is_empty() && !v.is_empty() => (k, v),
                _ => return Err(ParseError::MalformedEntry(entry.to_string())),
            };
            match out.iter_mut().find(|(k, _)| k.as_str() == key) {
                Some((_, values)) => {
                    if !values.iter().any(|v| v == value) {
                        values.push(value.to_string());
                    }
                }
                None => out.push((key.to_string(), vec![value.to_string()])),
            }
        }
        Ok(out)
    }

    fn write(&self, value: &Multimap) -> String {
        value
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| format!("{k} = {v}")))
            .join(", ")
    }
}

/// `", "`-delimited list of strings.
pub fn parse_list(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(", ").map(str::to_string).collect()
}

/// `", "`-delimited set of strings.
pub fn parse_set(s: &str) -> HashSet<String> {
    parse_list(s).into_iter().collect()
}

/// String multimap, see [`MultimapFormat`].
pub fn parse_multimap(s: &str) -> Result<Multimap, ParseError> {
    MultimapFormat.parse(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_empty_collection() {
        assert!(parse_list("").is_empty());
        assert!(parse_set("").is_empty());
        assert!(parse_multimap("").unwrap().is_empty());
        let ints = ListFormat::comma(FromStrFormat::<i32>::new());
        assert_eq!(ints.parse("").unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn scalar_errors_carry_input() {
        let ints = ListFormat::comma(FromStrFormat::<i32>::new());
        assert_eq!(ints.parse("1, 2, 3").unwrap(), vec![1, 2, 3]);
        match ints.parse("1, x") {
            Err(ParseError::InvalidItem { input, .. }) => assert_eq!(input, "x"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn multimap_groups_and_trims() {
        let m = parse_multimap("a = e ,e=a, a = b, a = e").unwrap();
        assert_eq!(
            m,
            vec![
                ("a".to_string(), vec!["e".to_string(), "b".to_string()]),
                ("e".to_string(), vec!["a".to_string()]),
            ]
        );
        assert_eq!(MultimapFormat.write(&m), "a = e, a = b, e = a");
    }

    #[test]
    fn multimap_rejects_malformed_entries() {
        assert_eq!(
            parse_multimap("a = b, c"),
            Err(ParseError::MalformedEntry("c".to_string()))
        );
        assert!(parse_multimap("a = b = c").is_err());
        assert!(parse_multimap("a = ").is_err());
    }

    #[test]
    fn set_collapses_duplicates() {
        let s = parse_set("a, b, a");
        assert_eq!(s.len(), 2);
        let f = SetFormat::comma(StrFormat);
        assert_eq!(f.parse(&f.write(&s)).unwrap(), s);
    }
}
