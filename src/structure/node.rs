use derive_more::{Display, From};
use hashlink::LinkedHashMap;
use hashlink::linked_hash_map::{IntoIter, Iter};

/// A single entry of a structure description.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Node {
    /// A directory, possibly with no declared children.
    Container(Container),
    /// A file holding exactly this content.
    Leaf(String),
}

impl From<&str> for Node {
    fn from(content: &str) -> Self {
        Node::Leaf(content.to_string())
    }
}

impl Node {
    pub fn kind(&self) -> EntryKind {
        match self {
            Node::Container(_) => EntryKind::Directory,
            Node::Leaf(_) => EntryKind::File,
        }
    }
}

/// The on-disk kind an entry materializes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntryKind {
    #[display("directory")]
    Directory,
    #[display("file")]
    File,
}

/// Named children of a directory, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    entries: LinkedHashMap<String, Node>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any previous entry with the same name.
    pub fn with(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(name, node);
        self
    }

    /// Inserts an entry and returns the one it replaced, if any.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        self.entries.replace(name.into(), node.into())
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Node> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl IntoIterator for Container {
    type Item = (String, Node);
    type IntoIter = IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = (&'a String, &'a Node);
    type IntoIter = Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<N: Into<String>, V: Into<Node>> FromIterator<(N, V)> for Container {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Container::new(), |container, (name, node)| {
                container.with(name, node)
            })
    }
}
