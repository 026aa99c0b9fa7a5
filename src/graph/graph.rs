//! 图数据结构
//!
//! 简单无向图：无自环、无重边。顶点和边都保持插入顺序，
//! 这样排序策略的并列项和着色结果在多次运行间完全一致。

use super::edge::Edge;
use super::vertex::{VertexKey, VertexLabel};
use crate::error::{Error, Result};
use indexmap::IndexSet;
use tracing::debug;

/// 简单无向图
#[derive(Debug, Clone)]
pub struct Graph<V: VertexKey> {
    /// 顶点集合（插入顺序）
    vertices: IndexSet<V>,
    /// 邻接表：顶点下标 -> 邻居下标（插入顺序）
    adjacency: Vec<IndexSet<usize>>,
    /// 边集合（规范化端点，插入顺序）
    edges: IndexSet<Edge<V>>,
}

impl<V: VertexKey> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexKey> Graph<V> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            vertices: IndexSet::new(),
            adjacency: Vec::new(),
            edges: IndexSet::new(),
        }
    }

    /// 由顶点和边构建图，遇到第一个错误即返回
    pub fn from_edges<I, E>(vertices: I, edges: E) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        E: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Self::new();
        for v in vertices {
            graph.add_vertex(v);
        }
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点
    ///
    /// 重复添加是空操作，返回 `false`，不视为错误。
    pub fn add_vertex(&mut self, v: V) -> bool {
        let (_, inserted) = self.vertices.insert_full(v);
        if inserted {
            self.adjacency.push(IndexSet::new());
        }
        inserted
    }

    /// 顶点是否存在
    pub fn has_vertex(&self, v: &V) -> bool {
        self.vertices.contains(v)
    }

    /// 顶点下标（插入顺序）
    pub fn index_of(&self, v: &V) -> Option<usize> {
        self.vertices.get_index_of(v)
    }

    /// 按下标获取顶点
    pub fn vertex_at(&self, index: usize) -> Option<&V> {
        self.vertices.get_index(index)
    }

    /// 所有顶点（插入顺序）
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.iter()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// 失败时图保持不变。
    pub fn add_edge(&mut self, u: V, v: V) -> Result<()> {
        let edge = Edge::new(u, v);
        if edge.is_loop() {
            debug!(edge = %edge, "rejected self loop");
            return Err(Error::SelfLoop(edge.to_string()));
        }

        let (low, high) = edge.endpoints();
        for endpoint in [low, high] {
            if !self.vertices.contains(endpoint) {
                debug!(edge = %edge, vertex = %endpoint, "rejected edge with unknown vertex");
                return Err(Error::UnknownVertex(endpoint.to_string()));
            }
        }

        if self.edges.contains(&edge) {
            debug!(edge = %edge, "rejected duplicate edge");
            return Err(Error::DuplicateEdge(edge.to_string()));
        }

        self.insert_edge(edge);
        Ok(())
    }

    /// 插入一条已校验的边，调用方保证端点存在且不是自环
    pub(crate) fn insert_edge(&mut self, edge: Edge<V>) -> bool {
        let (low, high) = edge.endpoints();
        let (Some(i), Some(j)) = (self.index_of(low), self.index_of(high)) else {
            return false;
        };
        if !self.edges.insert(edge) {
            return false;
        }
        self.adjacency[i].insert(j);
        self.adjacency[j].insert(i);
        true
    }

    /// 边是否存在（方向无关）
    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        self.edges.contains(&Edge::new(u.clone(), v.clone()))
    }

    /// 所有边（插入顺序）
    pub fn edges(&self) -> impl Iterator<Item = &Edge<V>> + '_ {
        self.edges.iter()
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ==================== 邻居查询 ====================

    /// 顶点的邻居
    pub fn neighbors<'a>(&'a self, v: &V) -> impl Iterator<Item = &'a V> + 'a {
        self.index_of(v)
            .into_iter()
            .flat_map(move |i| self.neighbor_indices(i))
            .filter_map(move |j| self.vertices.get_index(j))
    }

    /// 按下标获取邻居下标
    pub fn neighbor_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(index)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// 顶点的度（不存在的顶点为 0）
    pub fn degree(&self, v: &V) -> usize {
        self.index_of(v).map_or(0, |i| self.degree_at(i))
    }

    /// 按下标获取度
    pub fn degree_at(&self, index: usize) -> usize {
        self.adjacency.get(index).map_or(0, |set| set.len())
    }

    /// 最大度
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(|set| set.len()).max().unwrap_or(0)
    }
}

impl Graph<VertexLabel> {
    /// 创建带 `count` 个字母标签顶点的图（A, B, C, ...）
    pub fn with_vertex_count(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidVertexCount("顶点数量必须为正整数".to_string()));
        }
        let mut graph = Self::new();
        for label in VertexLabel::sequence(count) {
            graph.add_vertex(label);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(graph: &Graph<VertexLabel>) -> Vec<&str> {
        graph.vertices().map(|v| v.as_str()).collect()
    }

    #[test]
    fn test_graph_basic() {
        let mut graph = Graph::with_vertex_count(3).unwrap();
        assert_eq!(labels(&graph), vec!["A", "B", "C"]);

        graph.add_edge("A".into(), "B".into()).unwrap();
        graph.add_edge("C".into(), "B".into()).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge(&"B".into(), &"A".into()));
        assert!(graph.has_edge(&"B".into(), &"C".into()));
        assert!(!graph.has_edge(&"A".into(), &"C".into()));
        assert_eq!(graph.degree(&"B".into()), 2);
        assert_eq!(graph.max_degree(), 2);

        let neighbors: Vec<_> = graph.neighbors(&"B".into()).map(|v| v.as_str()).collect();
        assert_eq!(neighbors, vec!["A", "C"]);
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut graph = Graph::with_vertex_count(2).unwrap();
        graph.add_edge("A".into(), "B".into()).unwrap();

        let err = graph.add_edge("B".into(), "A".into()).unwrap_err();
        assert!(matches!(err, Error::DuplicateEdge(_)));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(&"A".into()), 1);
    }

    #[test]
    fn test_unknown_vertex_rejected() {
        let mut graph = Graph::from_edges(["A", "B"].map(VertexLabel::from), []).unwrap();

        let err = graph.add_edge("X".into(), "Y".into()).unwrap_err();
        assert!(matches!(err, Error::UnknownVertex(_)));
        let err = graph.add_edge("A".into(), "Z".into()).unwrap_err();
        assert!(matches!(err, Error::UnknownVertex(ref v) if v == "Z"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = Graph::with_vertex_count(1).unwrap();
        let err = graph.add_edge("A".into(), "A".into()).unwrap_err();
        assert!(matches!(err, Error::SelfLoop(_)));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_vertex_idempotent() {
        let mut graph: Graph<u32> = Graph::new();
        assert!(graph.add_vertex(7));
        assert!(!graph.add_vertex(7));
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.index_of(&7), Some(0));
    }

    #[test]
    fn test_zero_vertex_count() {
        assert!(matches!(
            Graph::with_vertex_count(0),
            Err(Error::InvalidVertexCount(_))
        ));
    }

    #[test]
    fn test_from_edges_propagates_error() {
        let result = Graph::from_edges([1u32, 2, 3], [(1, 2), (2, 1)]);
        assert!(matches!(result, Err(Error::DuplicateEdge(_))));
    }
}
