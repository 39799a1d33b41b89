use std::fmt::Display;

use itertools::Itertools;

use crate::prelude::*;

/// Types that can be rendered in the graphviz DOT format.
pub trait Dottable {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    fn dot_representation(&self) -> String;
}

/// Attributes of a node in the DOT output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{s}\""),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
        }
    }
}

/// Attributes of an edge in the DOT output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label=\"{lbl}\""),
        }
    }
}

impl Nfa {
    fn dot_state_attributes(&self, q: Vertex) -> Vec<DotStateAttribute> {
        let shape = if q == self.accept() {
            "doublecircle"
        } else {
            "circle"
        };
        vec![
            DotStateAttribute::Shape(shape.into()),
            DotStateAttribute::Label(q.show()),
        ]
    }
}

impl Dottable for Nfa {
    fn dot_representation(&self) -> String {
        let header = [
            "digraph NFA {".to_string(),
            "rankdir=LR".to_string(),
            "init [label=\"\", shape=none]".to_string(),
        ];

        let states = self.store().vertices().map(|q| {
            format!(
                "{} [{}]",
                q.show(),
                self.dot_state_attributes(q).into_iter().join(", ")
            )
        });

        let init = std::iter::once(format!("init -> {}", self.start().show()));

        let transitions = self.store().edges().map(|e| {
            format!(
                "{} -> {} [{}]",
                e.source().show(),
                e.target().show(),
                DotTransitionAttribute::Label(e.label().show())
            )
        });

        header
            .into_iter()
            .chain(states)
            .chain(init)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }
}
