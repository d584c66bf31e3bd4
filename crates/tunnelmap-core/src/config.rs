//! Declarative configuration blocks.
//!
//! A [`Config`] is a tagged tree: string attributes plus an ordered list of
//! named child blocks. Tunnel records, unit abilities and scenario actions are
//! all expressed this way, and the registry persists itself as one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static EMPTY: Config = Config::new();

/// A block of attributes and tagged children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<(String, Config)>,
}

impl Config {
    /// Create an empty block.
    pub const fn new() -> Self {
        Self {
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// A shared empty block.
    pub fn empty() -> &'static Config {
        &EMPTY
    }

    /// Builder form of [`Config::set`].
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    /// Builder form of [`Config::add_child`].
    pub fn with_child(mut self, tag: &str, child: Config) -> Self {
        self.add_child(tag, child);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Remove an attribute, returning its old value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    /// Append a child block.
    pub fn add_child(&mut self, tag: &str, child: Config) {
        self.children.push((tag.to_string(), child));
    }

    /// Check whether the attribute is present (even if empty).
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Raw attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attribute value, or `""` when absent.
    pub fn str(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Boolean attribute.
    ///
    /// Accepts `yes`/`true`/`on`/`1` and `no`/`false`/`off`/`0`; anything else,
    /// including absence, yields `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(str::trim) {
            Some("yes" | "true" | "on" | "1") => true,
            Some("no" | "false" | "off" | "0") => false,
            _ => default,
        }
    }

    /// Integer attribute, or `default` when absent or unparsable.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Iterate over all attributes in key order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of children with the given tag.
    pub fn child_count(&self, tag: &str) -> usize {
        self.children(tag).count()
    }

    /// Children with the given tag, in insertion order.
    pub fn children<'a, 't>(&'a self, tag: &'t str) -> impl Iterator<Item = &'a Config> + 't
    where
        'a: 't,
    {
        self.children
            .iter()
            .filter(move |(t, _)| t == tag)
            .map(|(_, c)| c)
    }

    /// The `index`-th child with the given tag.
    pub fn child(&self, tag: &str, index: usize) -> Option<&Config> {
        self.children(tag).nth(index)
    }

    /// The first child with the given tag, or a shared empty block.
    pub fn child_or_empty(&self, tag: &str) -> &Config {
        self.child(tag, 0).unwrap_or(&EMPTY)
    }

    /// True when there are neither attributes nor children.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_parsing() {
        let cfg = Config::new()
            .with("a", "yes")
            .with("b", "no")
            .with("c", true)
            .with("d", "maybe");

        assert!(cfg.get_bool("a", false));
        assert!(!cfg.get_bool("b", true));
        assert!(cfg.get_bool("c", false));
        assert!(cfg.get_bool("d", true));
        assert!(!cfg.get_bool("d", false));
        assert!(cfg.get_bool("missing", true));
    }

    #[test]
    fn test_int_parsing() {
        let cfg = Config::new().with("n", 42).with("bad", "x");
        assert_eq!(cfg.get_int("n", 0), 42);
        assert_eq!(cfg.get_int("bad", 7), 7);
        assert_eq!(cfg.get_int("missing", -1), -1);
    }

    #[test]
    fn test_children_by_tag() {
        let cfg = Config::new()
            .with_child("source", Config::new().with("x", 1))
            .with_child("target", Config::new().with("x", 2))
            .with_child("source", Config::new().with("x", 3));

        assert_eq!(cfg.child_count("source"), 2);
        assert_eq!(cfg.child_count("filter"), 0);
        assert_eq!(cfg.child("source", 1).map(|c| c.str("x")), Some("3"));
        assert_eq!(cfg.child_or_empty("target").str("x"), "2");
        assert!(cfg.child_or_empty("filter").is_empty());
    }

    #[test]
    fn test_child_outlives_tag() {
        let cfg = Config::new().with_child("source", Config::new().with("x", 1));
        let found = {
            let tag = String::from("source");
            cfg.child(&tag, 0)
        };
        assert_eq!(found.map(|c| c.str("x")), Some("1"));
    }

    #[test]
    fn test_empty_attribute_is_present() {
        let cfg = Config::new().with("id", "");
        assert!(cfg.has_attribute("id"));
        assert_eq!(cfg.get("id"), Some(""));
        assert!(!cfg.has_attribute("reversed"));
    }

    #[test]
    fn test_serialization() {
        let cfg = Config::new()
            .with("id", "gate")
            .with_child("filter", Config::new().with("side", 1));

        let json = serde_json::to_string(&cfg).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cfg);
    }
}
