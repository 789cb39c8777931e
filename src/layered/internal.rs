//! Flat, indexed internal representation used by the layered engine.
//! `Vec<LNode>`/`Vec<LEdge>`/`Vec<LPort>` with newtype indices replace
//! circular parent/child/edge object pointers: cache-friendly for the hot
//! inner loops (barycenter sort, cycle DFS) and free of ownership cycles.

use crate::graph::PortSide;

macro_rules! index_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            pub fn idx(self) -> usize {
                self.0 as usize
            }
            pub fn from_usize(i: usize) -> Self {
                $name(i as u32)
            }
        }
    };
}

index_type!(NodeIdx);
index_type!(EdgeIdx);
index_type!(PortIdx);

/// Layout direction. Default `DOWN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn from_str(s: &str) -> Direction {
        match s.to_ascii_uppercase().as_str() {
            "UP" => Direction::Up,
            "LEFT" => Direction::Left,
            "RIGHT" => Direction::Right,
            _ => Direction::Down,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Layer constraint, internal mirror of [`crate::graph::LayerConstraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    First,
    Last,
}

#[derive(Debug, Clone)]
pub struct LPort {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub side: PortSide,
    /// `elk.port.index`, used to order ports on the same side.
    pub index: f64,
    pub owner: NodeIdx,
    pub x: f64,
    pub y: f64,
    /// Index into the owning container's `ports` vec, for write-back.
    pub orig_port_index: usize,
}

#[derive(Debug, Clone)]
pub struct LNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub is_dummy: bool,
    pub layer: i64,
    pub position: usize,
    pub x: f64,
    pub y: f64,
    pub incoming: Vec<EdgeIdx>,
    pub outgoing: Vec<EdgeIdx>,
    pub ports: Vec<PortIdx>,
    pub constraint: Option<Constraint>,
    /// Index into the owning container's `children` vec, for write-back.
    /// `None` for dummy nodes, which never write back.
    pub orig_child_index: Option<usize>,
}

impl LNode {
    pub fn successors<'a>(&'a self, edges: &'a [LEdge]) -> impl Iterator<Item = NodeIdx> + 'a {
        self.outgoing.iter().map(move |&e| edges[e.idx()].target)
    }

    pub fn predecessors<'a>(&'a self, edges: &'a [LEdge]) -> impl Iterator<Item = NodeIdx> + 'a {
        self.incoming.iter().map(move |&e| edges[e.idx()].source)
    }
}

#[derive(Debug, Clone)]
pub struct LEdge {
    pub id: String,
    pub source: NodeIdx,
    pub target: NodeIdx,
    pub source_port: Option<PortIdx>,
    pub target_port: Option<PortIdx>,
    /// Index into the owning container's `edges` vec, for write-back.
    pub orig_edge_index: usize,
    pub reversed: bool,
    pub self_loop: bool,
    /// Dummy nodes inserted for long edges, in source-to-target order.
    pub dummies: Vec<NodeIdx>,
}

/// One adjacent-layer hop of an edge's source-to-target path: either the
/// whole edge (if it spans exactly one layer) or one link of its dummy
/// chain. Crossing reduction and coordinate assignment work over these
/// rather than raw edges, since a long edge has no single "layer" of its
/// own.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub from: NodeIdx,
    pub to: NodeIdx,
    pub orig_edge: EdgeIdx,
}

/// The transient internal graph the layered engine builds on entry and
/// discards after write-back.
#[derive(Debug, Default)]
pub struct LGraph {
    pub nodes: Vec<LNode>,
    pub edges: Vec<LEdge>,
    pub ports: Vec<LPort>,
    /// Populated by dummy insertion; empty before it runs.
    pub segments: Vec<Segment>,
}

impl LGraph {
    pub fn node(&self, i: NodeIdx) -> &LNode {
        &self.nodes[i.idx()]
    }
    pub fn node_mut(&mut self, i: NodeIdx) -> &mut LNode {
        &mut self.nodes[i.idx()]
    }
    pub fn edge(&self, i: EdgeIdx) -> &LEdge {
        &self.edges[i.idx()]
    }
    pub fn edge_mut(&mut self, i: EdgeIdx) -> &mut LEdge {
        &mut self.edges[i.idx()]
    }
    pub fn port(&self, i: PortIdx) -> &LPort {
        &self.ports[i.idx()]
    }

    /// Non-self-loop edge indices.
    pub fn acyclic_edges(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        (0..self.edges.len())
            .map(EdgeIdx::from_usize)
            .filter(move |&e| !self.edge(e).self_loop)
    }

    pub fn max_layer(&self) -> i64 {
        self.nodes.iter().map(|n| n.layer).max().unwrap_or(0)
    }

    pub fn min_layer(&self) -> i64 {
        self.nodes.iter().map(|n| n.layer).min().unwrap_or(0)
    }
}
