use serde::{Deserialize, Serialize};

/// Directed relation label. Labels come in inverse pairs; the assembler
/// emits both directions for every relation it records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdgeLabel {
    ParentOf,
    ChildOf,
    BaseClassOf,
    DerivedClassOf,
    Implements,
    ImplementedBy,
    Overrides,
    OverriddenBy,
    Calls,
    CalledBy,
    Instantiates,
    InstantiatedBy,
    Uses,
    UsedBy,
}

impl EdgeLabel {
    pub fn inverse(self) -> Self {
        match self {
            EdgeLabel::ParentOf => EdgeLabel::ChildOf,
            EdgeLabel::ChildOf => EdgeLabel::ParentOf,
            EdgeLabel::BaseClassOf => EdgeLabel::DerivedClassOf,
            EdgeLabel::DerivedClassOf => EdgeLabel::BaseClassOf,
            EdgeLabel::Implements => EdgeLabel::ImplementedBy,
            EdgeLabel::ImplementedBy => EdgeLabel::Implements,
            EdgeLabel::Overrides => EdgeLabel::OverriddenBy,
            EdgeLabel::OverriddenBy => EdgeLabel::Overrides,
            EdgeLabel::Calls => EdgeLabel::CalledBy,
            EdgeLabel::CalledBy => EdgeLabel::Calls,
            EdgeLabel::Instantiates => EdgeLabel::InstantiatedBy,
            EdgeLabel::InstantiatedBy => EdgeLabel::Instantiates,
            EdgeLabel::Uses => EdgeLabel::UsedBy,
            EdgeLabel::UsedBy => EdgeLabel::Uses,
        }
    }
}

/// A directed edge. `resolved` states whether the resolution target of
/// the relation exists as a node in the emitted graph; an edge and its
/// inverse always carry the same flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub src: String,
    pub label: EdgeLabel,
    pub dst: String,
    pub resolved: bool,
}
