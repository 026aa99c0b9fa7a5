//! 图核心模块
//!
//! 定义顶点、边、图和线图的核心数据结构

mod edge;
mod graph;
mod line_graph;
mod vertex;

pub use edge::Edge;
pub use graph::Graph;
pub use line_graph::{build_line_graph, line_graph_edge_count, LineGraph, LineVertex};
pub use vertex::{VertexKey, VertexLabel};
