//! Intermediate document tree.
//!
//! A [`Node`] mirrors the nesting of the target XML: mappings become nested
//! elements, lists become repeated sibling elements with the same tag, and
//! scalars become element text. Empty and zero values are pruned by
//! [`Node::normalize`] before rendering, so absent data never produces an
//! empty tag.

use rust_decimal::Decimal;

use crate::core::FatturaError;

/// Leaf value of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
}

impl Scalar {
    /// Text content as emitted on the wire.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Decimal(d) => d.to_string(),
        }
    }

    /// Falsy values: empty text and numeric zero.
    fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Integer(n) => *n == 0,
            Self::Decimal(d) => d.is_zero(),
        }
    }
}

/// A node of the intermediate tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(Scalar),
    /// Repeated element: every entry is emitted under the parent's tag.
    List(Vec<Node>),
    /// Ordered mapping from tag name to child.
    Map(Vec<(String, Node)>),
}

impl Node {
    /// Start an ordered mapping.
    pub fn map() -> MapBuilder {
        MapBuilder::default()
    }

    /// A node that normalization always drops.
    pub fn empty() -> Self {
        Self::Map(Vec::new())
    }

    /// Drop falsy scalars, then any list or mapping left without children.
    /// Returns `None` if nothing remains.
    pub fn normalize(self) -> Option<Self> {
        match self {
            Self::Scalar(s) if s.is_empty() => None,
            Self::Scalar(s) => Some(Self::Scalar(s)),
            Self::List(items) => {
                let items: Vec<_> = items.into_iter().filter_map(Self::normalize).collect();
                (!items.is_empty()).then_some(Self::List(items))
            }
            Self::Map(entries) => {
                let entries: Vec<_> = entries
                    .into_iter()
                    .filter_map(|(key, node)| node.normalize().map(|n| (key, n)))
                    .collect();
                (!entries.is_empty()).then_some(Self::Map(entries))
            }
        }
    }

    /// First child under `key` (mappings only).
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, n)| n),
            _ => None,
        }
    }

    /// Follow a path of keys through nested mappings.
    pub fn path(&self, keys: &[&str]) -> Option<&Node> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Scalar text, if this is a scalar.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Scalar(s) => Some(s.to_text()),
            _ => None,
        }
    }
}

/// Fluent builder for [`Node::Map`], preserving insertion order.
#[derive(Debug, Default)]
pub struct MapBuilder {
    entries: Vec<(String, Node)>,
}

impl MapBuilder {
    pub fn entry(mut self, key: &str, value: impl Into<Node>) -> Self {
        self.entries.push((key.to_string(), value.into()));
        self
    }

    pub fn build(self) -> Node {
        Node::Map(self.entries)
    }
}

impl From<MapBuilder> for Node {
    fn from(builder: MapBuilder) -> Self {
        builder.build()
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::Text(value))
    }
}

impl From<&String> for Node {
    fn from(value: &String) -> Self {
        Self::Scalar(Scalar::Text(value.clone()))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Self::Scalar(Scalar::Integer(value.into()))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

impl From<Decimal> for Node {
    fn from(value: Decimal) -> Self {
        Self::Scalar(Scalar::Decimal(value))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Node::empty, Into::into)
    }
}

/// A normalized document ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    version: String,
    entries: Vec<(String, Node)>,
}

impl Document {
    /// Normalize `tree` and wrap it as the children of the root element.
    ///
    /// `version` is the root `versione` attribute.
    pub fn new(version: impl Into<String>, tree: Node) -> Result<Self, FatturaError> {
        match tree.normalize() {
            Some(Node::Map(entries)) => Ok(Self {
                version: version.into(),
                entries,
            }),
            Some(_) => Err(FatturaError::Render(
                "document root must be a mapping".into(),
            )),
            None => Err(FatturaError::Render("document has no content".into())),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn entries(&self) -> &[(String, Node)] {
        &self.entries
    }

    /// Follow a path of keys from the root's children.
    pub fn path(&self, keys: &[&str]) -> Option<&Node> {
        let (first, rest) = keys.split_first()?;
        let node = self
            .entries
            .iter()
            .find(|(k, _)| k == first)
            .map(|(_, n)| n)?;
        node.path(rest)
    }
}
