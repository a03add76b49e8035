//! # MEI Tree
//!
//! Generic element tree used to hold an MEI document.
//!
//! Children are stored behind `Arc` so a document can be cloned in
//! O(root children) and edited with path copying: only the elements on the
//! path from the root to the edited element are duplicated, every other
//! subtree stays shared with earlier snapshots.

use std::sync::Arc;

/// Attribute carrying element identifiers
pub const XML_ID: &str = "xml:id";

/// Child node of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Arc<Element>),
    Text(String),
    Comment(String),
    CData(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(Arc::new(element))
    }
}

/// Markup element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Qualified name as written in the source (`zone`, `mei:zone`)
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child.into());
        self
    }

    /// Name without namespace prefix
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn is(&self, local_name: &str) -> bool {
        self.local_name() == local_name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute(XML_ID)
    }

    /// Child elements with their index in `children`
    pub fn child_elements(&self) -> impl Iterator<Item = (usize, &Element)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node.as_element().map(|element| (i, element)))
    }

    pub fn first_child(&self, local_name: &str) -> Option<(usize, &Element)> {
        self.child_elements()
            .find(|(_, element)| element.is(local_name))
    }

    pub fn push_child(&mut self, child: Element) -> usize {
        self.children.push(child.into());
        self.children.len() - 1
    }

    pub fn insert_child(&mut self, index: usize, child: Element) -> usize {
        let index = index.min(self.children.len());
        self.children.insert(index, child.into());
        index
    }

    /// Resolve a path relative to this element
    pub fn descendant(&self, path: &NodePath) -> Option<&Element> {
        let mut current = self;
        for &step in path.steps() {
            current = current.children.get(step)?.as_element()?;
        }
        Some(current)
    }

    /// Resolve a path for editing, un-sharing every element along the way
    pub fn descendant_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        let mut current = self;
        for &step in path.steps() {
            current = match current.children.get_mut(step)? {
                Node::Element(child) => Arc::make_mut(child),
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Position of an element as child indices from the root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn steps(&self) -> &[usize] {
        &self.0
    }

    pub fn child(&self, index: usize) -> Self {
        let mut steps = self.0.clone();
        steps.push(index);
        Self(steps)
    }

    /// Parent path and index within the parent; `None` for the root
    pub fn split_last(&self) -> Option<(NodePath, usize)> {
        let (&last, parent) = self.0.split_last()?;
        Some((NodePath(parent.to_vec()), last))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(steps: Vec<usize>) -> Self {
        Self(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("mei").with_child(
            Element::new("music").with_child(
                Element::new("facsimile")
                    .with_child(Element::new("surface").with_attribute(XML_ID, "s1")),
            ),
        )
    }

    #[test]
    fn test_local_name_strips_prefix() {
        let element = Element::new("mei:zone");
        assert_eq!(element.local_name(), "zone");
        assert!(element.is("zone"));
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut element = Element::new("zone")
            .with_attribute("ulx", "1")
            .with_attribute("uly", "2");
        element.set_attribute("ulx", "10");

        assert_eq!(element.attributes[0], ("ulx".to_string(), "10".to_string()));
        assert_eq!(element.attributes.len(), 2);
    }

    #[test]
    fn test_descendant_lookup() {
        let root = sample();
        let path = NodePath::from(vec![0, 0, 0]);
        assert_eq!(root.descendant(&path).and_then(Element::id), Some("s1"));
        assert!(root.descendant(&NodePath::from(vec![0, 3])).is_none());
    }

    #[test]
    fn test_descendant_mut_copies_only_the_path() {
        let original = Arc::new(sample());
        let mut edited = original.clone();

        Arc::make_mut(&mut edited)
            .descendant_mut(&NodePath::from(vec![0, 0, 0]))
            .unwrap()
            .set_attribute("n", "1");

        let path = NodePath::from(vec![0, 0, 0]);
        assert_eq!(original.descendant(&path).unwrap().attribute("n"), None);
        assert_eq!(edited.descendant(&path).unwrap().attribute("n"), Some("1"));
    }

    #[test]
    fn test_split_last() {
        let path = NodePath::from(vec![2, 5]);
        let (parent, index) = path.split_last().unwrap();
        assert_eq!(parent, NodePath::from(vec![2]));
        assert_eq!(index, 5);
        assert!(NodePath::root().split_last().is_none());
    }
}
