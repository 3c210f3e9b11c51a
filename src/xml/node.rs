use std::fmt;

use super::writer::to_xml;

/// Element attributes in insertion order.
///
/// Equality ignores order: two sets of attributes are equal when they hold
/// the same key/value pairs.
#[derive(Debug, Clone, Default)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Attributes {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// What an element holds between its tags.
///
/// Text compares equal when it matches after trimming, the same rule the
/// reader applies, so a built tree equals its reparsed form.
#[derive(Debug, Clone, Default)]
pub enum Content {
    /// Nothing: serialized as a self-closing tag
    #[default]
    Empty,

    /// Character data
    Text(String),

    /// Child elements, in document order
    Children(Vec<Node>),
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Content::Empty, Content::Empty) => true,
            (Content::Text(a), Content::Text(b)) => a.trim() == b.trim(),
            (Content::Children(a), Content::Children(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Content {}

/// An XML element.
///
/// Used both to build the query sent to Lime and to read its responses.
///
/// # Examples
///
/// ```
/// use lime_query::xml::{Attributes, Node};
///
/// let n = Node::with_attributes_and_text("node", Attributes::from([("id", "12")]), "Hello");
/// assert_eq!(n.to_xml(), r#"<node id="12">Hello</node>"#);
///
/// let parent = Node::with_children("parent", vec![
///     Node::with_text("child", "Ann"),
///     Node::with_text("child", "Bo"),
/// ]);
/// assert_eq!(parent.children_by_name("child").len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    attributes: Attributes,
    content: Content,
}

impl Node {
    /// `<name/>`
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            attributes: Attributes::new(),
            content: Content::Empty,
        }
    }

    /// `<name>text</name>`. Empty or whitespace-only text yields an empty
    /// element; other text is kept as given.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Node::new(name).holding_text(text)
    }

    /// `<name k="v"/>`
    pub fn with_attributes(name: impl Into<String>, attributes: Attributes) -> Self {
        Node {
            attributes,
            ..Node::new(name)
        }
    }

    /// `<name k="v">text</name>`
    pub fn with_attributes_and_text(
        name: impl Into<String>,
        attributes: Attributes,
        text: impl Into<String>,
    ) -> Self {
        Node::with_attributes(name, attributes).holding_text(text)
    }

    /// `<name><child/></name>`
    pub fn with_child(name: impl Into<String>, child: Node) -> Self {
        Node::with_children(name, vec![child])
    }

    /// `<name><a/><b/></name>`. No children yields an empty element.
    pub fn with_children(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::new(name).holding_children(children)
    }

    /// `<name k="v"><a/><b/></name>`
    pub fn with_attributes_and_children(
        name: impl Into<String>,
        attributes: Attributes,
        children: Vec<Node>,
    ) -> Self {
        Node::with_attributes(name, attributes).holding_children(children)
    }

    pub(crate) fn from_parts(name: String, attributes: Attributes, content: Content) -> Self {
        Node {
            name,
            attributes,
            content,
        }
    }

    fn holding_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.content = if text.trim().is_empty() {
            Content::Empty
        } else {
            Content::Text(text)
        };
        self
    }

    fn holding_children(mut self, children: Vec<Node>) -> Self {
        self.content = if children.is_empty() {
            Content::Empty
        } else {
            Content::Children(children)
        };
        self
    }

    /// Adds or replaces an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// The element text, if it holds text.
    pub fn text_value(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Child elements; empty unless the element holds a child list.
    pub fn children(&self) -> &[Node] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Direct children named `name`, in document order.
    pub fn children_by_name(&self, name: &str) -> Vec<&Node> {
        self.children().iter().filter(|c| c.name == name).collect()
    }

    pub fn first_child(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.content, Content::Empty)
    }

    pub fn to_xml(&self) -> String {
        to_xml(self)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children().iter()
    }
}
