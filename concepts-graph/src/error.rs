use thiserror::Error;

/// Failure modes of the graph utility.
///
/// Mirrors the "named error kinds, no exceptions from pure algorithms"
/// shape used throughout this workspace: every fallible operation here
/// is a query about graph *shape* (is it acyclic? does this node
/// exist?), never an I/O or allocation failure.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum GraphError {
    /// A node id was used that doesn't belong to this graph.
    #[error("unknown node id {0:?}")]
    UnknownNode(crate::NodeId),
    /// An operation that requires an acyclic graph (e.g. topological
    /// sort) was given a graph with a cycle.
    #[error("graph contains a cycle")]
    Cyclic,
}
