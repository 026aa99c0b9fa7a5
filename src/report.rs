//! 着色报告
//!
//! 顶点模式直接给出顶点颜色和色数；边模式先构建线图并着色，
//! 再把线图顶点逐个映射回原边，得到边颜色和边色数。

use crate::algorithm::{greedy_color, Coloring, OrderingStrategy};
use crate::error::{Error, Result};
use crate::graph::{build_line_graph, Edge, Graph, LineGraph, LineVertex, VertexKey};
use crate::metrics;
use crate::types::{ColorIndex, ColoringMode};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::info;

/// 顶点着色报告
#[derive(Debug, Clone)]
pub struct VertexColoringReport<V: VertexKey> {
    pub coloring: Coloring<V>,
    /// 使用的颜色数（色数的上界）
    pub chromatic_number: usize,
    pub strategy: &'static str,
    pub elapsed: Duration,
}

impl<V: VertexKey> VertexColoringReport<V> {
    pub fn from_coloring(coloring: Coloring<V>, strategy: &'static str) -> Self {
        Self {
            chromatic_number: coloring.color_count(),
            coloring,
            strategy,
            elapsed: Duration::ZERO,
        }
    }
}

/// 边着色报告
#[derive(Debug, Clone)]
pub struct EdgeColoringReport<V: VertexKey> {
    /// 原边 -> 颜色（原图边顺序）
    pub edge_colors: IndexMap<Edge<V>, ColorIndex>,
    /// 使用的颜色数（边色数的上界）
    pub chromatic_index: usize,
    pub line_graph_vertices: usize,
    pub line_graph_edges: usize,
    pub strategy: &'static str,
    pub elapsed: Duration,
}

impl<V: VertexKey> EdgeColoringReport<V> {
    /// 把线图上的着色映射回原边
    pub fn from_line_coloring(
        line: &LineGraph<V>,
        coloring: Coloring<LineVertex>,
        strategy: &'static str,
    ) -> Result<Self> {
        let mut edge_colors = IndexMap::with_capacity(coloring.len());
        for (vertex, color) in coloring {
            let edge = line
                .edge_of(vertex)
                .ok_or_else(|| Error::UnknownVertex(vertex.to_string()))?;
            edge_colors.insert(edge.clone(), color);
        }

        let chromatic_index = edge_colors.values().collect::<HashSet<_>>().len();
        Ok(Self {
            edge_colors,
            chromatic_index,
            line_graph_vertices: line.vertex_count(),
            line_graph_edges: line.edge_count(),
            strategy,
            elapsed: Duration::ZERO,
        })
    }

    /// 获取边颜色（端点顺序无关）
    pub fn color_of(&self, u: &V, v: &V) -> Option<ColorIndex> {
        self.edge_colors.get(&Edge::new(u.clone(), v.clone())).copied()
    }

    /// 是否为合法边着色：共享端点的边颜色不同
    pub fn is_proper(&self) -> bool {
        let edges: Vec<_> = self.edge_colors.iter().collect();
        edges.iter().enumerate().all(|(i, (e1, c1))| {
            edges[i + 1..]
                .iter()
                .all(|(e2, c2)| c1 != c2 || !e1.shares_endpoint(e2))
        })
    }
}

/// 一次着色请求的报告
#[derive(Debug, Clone)]
pub enum ColoringReport<V: VertexKey> {
    Vertex(VertexColoringReport<V>),
    Edge(EdgeColoringReport<V>),
}

impl<V: VertexKey> ColoringReport<V> {
    pub fn mode(&self) -> ColoringMode {
        match self {
            ColoringReport::Vertex(_) => ColoringMode::Vertex,
            ColoringReport::Edge(_) => ColoringMode::Edge,
        }
    }

    /// 色数或边色数
    pub fn color_count(&self) -> usize {
        match self {
            ColoringReport::Vertex(r) => r.chromatic_number,
            ColoringReport::Edge(r) => r.chromatic_index,
        }
    }

    pub fn strategy(&self) -> &'static str {
        match self {
            ColoringReport::Vertex(r) => r.strategy,
            ColoringReport::Edge(r) => r.strategy,
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            ColoringReport::Vertex(r) => r.elapsed,
            ColoringReport::Edge(r) => r.elapsed,
        }
    }

    /// (实体, 颜色) 列表，实体为顶点标签或 `A-B` 形式的边
    pub fn assignments(&self) -> Vec<(String, ColorIndex)> {
        match self {
            ColoringReport::Vertex(r) => r
                .coloring
                .iter()
                .map(|(v, c)| (v.to_string(), c))
                .collect(),
            ColoringReport::Edge(r) => r
                .edge_colors
                .iter()
                .map(|(e, &c)| (e.to_string(), c))
                .collect(),
        }
    }
}

/// 顶点着色
pub fn color_vertices<V, S>(graph: &Graph<V>, strategy: &S) -> VertexColoringReport<V>
where
    V: VertexKey,
    S: OrderingStrategy,
{
    let timer = metrics::global_metrics().record_coloring_start();
    let start = Instant::now();

    let coloring = greedy_color(graph, strategy);
    let mut report = VertexColoringReport::from_coloring(coloring, strategy.name());
    report.elapsed = start.elapsed();

    metrics::global_metrics().record_coloring_complete(
        timer,
        ColoringMode::Vertex,
        graph.vertex_count(),
    );
    info!(
        mode = "vertex",
        strategy = report.strategy,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        chromatic_number = report.chromatic_number,
        elapsed_us = report.elapsed.as_micros() as u64,
        "vertex coloring applied"
    );
    report
}

/// 边着色（线图上的顶点着色）
pub fn color_edges<V, S>(graph: &Graph<V>, strategy: &S) -> Result<EdgeColoringReport<V>>
where
    V: VertexKey,
    S: OrderingStrategy,
{
    let timer = metrics::global_metrics().record_coloring_start();
    let start = Instant::now();

    let line = build_line_graph(graph);
    let coloring = greedy_color(line.graph(), strategy);
    let report = EdgeColoringReport::from_line_coloring(&line, coloring, strategy.name());
    metrics::global_metrics().record_coloring_complete(
        timer,
        ColoringMode::Edge,
        graph.edge_count(),
    );

    let mut report = report?;
    report.elapsed = start.elapsed();
    info!(
        mode = "edge",
        strategy = report.strategy,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        chromatic_index = report.chromatic_index,
        elapsed_us = report.elapsed.as_micros() as u64,
        "edge coloring applied"
    );
    Ok(report)
}

/// 按模式着色
pub fn color_graph<V, S>(
    graph: &Graph<V>,
    mode: ColoringMode,
    strategy: &S,
) -> Result<ColoringReport<V>>
where
    V: VertexKey,
    S: OrderingStrategy,
{
    match mode {
        ColoringMode::Vertex => Ok(ColoringReport::Vertex(color_vertices(graph, strategy))),
        ColoringMode::Edge => color_edges(graph, strategy).map(ColoringReport::Edge),
    }
}
