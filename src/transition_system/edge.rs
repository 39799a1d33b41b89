use crate::prelude::*;

/// The label of an edge. Epsilon edges are taken without reading input, which is represented
/// by a separate variant so that no input character can ever be confused with it.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Label {
    /// The empty label.
    Epsilon,
    /// A single input character.
    Symbol(char),
}

impl Label {
    /// Returns true if `self` is the empty label.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// Returns the character if `self` is not the empty label.
    pub fn symbol(&self) -> Option<char> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(c) => Some(*c),
        }
    }

    /// Returns true if an edge with this label can be taken when reading `c`. This never
    /// holds for [`Label::Epsilon`].
    pub fn matches(&self, c: char) -> bool {
        self.symbol() == Some(c)
    }
}

impl From<char> for Label {
    fn from(value: char) -> Self {
        Label::Symbol(value)
    }
}

impl Show for Label {
    fn show(&self) -> String {
        match self {
            Label::Epsilon => "ε".to_string(),
            Label::Symbol(c) => c.show(),
        }
    }
}

/// Represents a directed, labeled edge between two vertices of a [`Store`].
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Edge {
    source: Vertex,
    target: Vertex,
    label: Label,
}

impl Edge {
    /// Creates a new edge with the given source, label and target.
    pub fn new(source: Vertex, label: Label, target: Vertex) -> Self {
        Self {
            source,
            target,
            label,
        }
    }

    /// Returns the vertex the edge leaves.
    pub fn source(&self) -> Vertex {
        self.source
    }

    /// Returns the vertex the edge points to.
    pub fn target(&self) -> Vertex {
        self.target
    }

    /// Returns the label of the edge.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Shorthand for `self.label().is_epsilon()`.
    pub fn is_epsilon(&self) -> bool {
        self.label.is_epsilon()
    }

    /// Destructures the edge into its components.
    pub fn into_tuple(self) -> (Vertex, Label, Vertex) {
        (self.source, self.label, self.target)
    }

    pub(super) fn shifted(self, offset: usize) -> Self {
        Self {
            source: self.source.shifted(offset),
            target: self.target.shifted(offset),
            label: self.label,
        }
    }
}

impl Show for Edge {
    fn show(&self) -> String {
        format!(
            "({}, {}, {})",
            self.source.show(),
            self.label.show(),
            self.target.show()
        )
    }
}
