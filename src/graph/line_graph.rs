//! 线图构建
//!
//! 原图的每条边成为线图的一个顶点；两条原边共享一个端点时，
//! 对应的线图顶点相连。线图是独立拥有的新图，顶点只记录原边下标。

use super::edge::Edge;
use super::graph::Graph;
use super::vertex::VertexKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// 线图顶点：原图中第 N 条边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineVertex(pub usize);

impl fmt::Display for LineVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// 线图
#[derive(Debug, Clone)]
pub struct LineGraph<V: VertexKey> {
    graph: Graph<LineVertex>,
    /// 线图顶点下标 -> 原边
    tags: Vec<Edge<V>>,
}

impl<V: VertexKey> LineGraph<V> {
    /// 从原图构建线图
    ///
    /// 按端点分组原边，连接同一端点上的每一对边：O(E + Σ deg(v)²)。
    /// 原图没有重边，所以任意两条边最多共享一个端点，每对只会出现一次。
    pub fn build(source: &Graph<V>) -> Self {
        let tags: Vec<Edge<V>> = source.edges().cloned().collect();

        let mut graph = Graph::new();
        for i in 0..tags.len() {
            graph.add_vertex(LineVertex(i));
        }

        // 原图顶点下标 -> 关联边下标
        let mut incident: Vec<Vec<usize>> = vec![Vec::new(); source.vertex_count()];
        for (i, edge) in tags.iter().enumerate() {
            let (low, high) = edge.endpoints();
            for endpoint in [low, high] {
                if let Some(v) = source.index_of(endpoint) {
                    incident[v].push(i);
                }
            }
        }

        for edges_at_vertex in &incident {
            for (k, &a) in edges_at_vertex.iter().enumerate() {
                for &b in &edges_at_vertex[k + 1..] {
                    graph.insert_edge(Edge::new(LineVertex(a), LineVertex(b)));
                }
            }
        }

        debug!(
            source_vertices = source.vertex_count(),
            source_edges = source.edge_count(),
            line_edges = graph.edge_count(),
            "line graph built"
        );

        Self { graph, tags }
    }

    /// 线图本身
    pub fn graph(&self) -> &Graph<LineVertex> {
        &self.graph
    }

    /// 线图顶点对应的原边
    pub fn edge_of(&self, vertex: LineVertex) -> Option<&Edge<V>> {
        self.tags.get(vertex.0)
    }

    /// 原边对应的线图顶点
    pub fn vertex_of(&self, edge: &Edge<V>) -> Option<LineVertex> {
        self.tags.iter().position(|e| e == edge).map(LineVertex)
    }

    /// 所有原边（按线图顶点顺序）
    pub fn tags(&self) -> &[Edge<V>] {
        &self.tags
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// 从原图构建线图
pub fn build_line_graph<V: VertexKey>(source: &Graph<V>) -> LineGraph<V> {
    LineGraph::build(source)
}

/// 不构建线图，由度数直接计算线图边数：Σ deg(v)(deg(v)-1)/2
pub fn line_graph_edge_count<V: VertexKey>(source: &Graph<V>) -> usize {
    (0..source.vertex_count())
        .map(|i| {
            let d = source.degree_at(i);
            d * d.saturating_sub(1) / 2
        })
        .sum()
}
