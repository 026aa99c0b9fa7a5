//! 贪心着色
//!
//! 按策略给出的顺序处理顶点，每个顶点取已着色邻居未使用的最小颜色。
//! 结果总是合法着色，但颜色数只是色数的上界。

use super::coloring::Coloring;
use super::strategy::OrderingStrategy;
use crate::graph::{Graph, VertexKey};
use crate::types::ColorIndex;
use indexmap::IndexMap;
use smallvec::{smallvec, SmallVec};
use tracing::debug;

/// 贪心着色
///
/// 相同的顶点集、边集和插入顺序总是得到相同的结果。空图得到空着色。
pub fn greedy_color<V, S>(graph: &Graph<V>, strategy: &S) -> Coloring<V>
where
    V: VertexKey,
    S: OrderingStrategy,
{
    let n = graph.vertex_count();
    let mut colors: Vec<Option<ColorIndex>> = vec![None; n];

    for index in strategy.order(graph) {
        colors[index] = Some(first_available(graph, &colors, index));
    }

    let assigned: IndexMap<V, ColorIndex> = graph
        .vertices()
        .zip(colors)
        .map(|(v, c)| (v.clone(), c.unwrap_or_default()))
        .collect();
    let coloring = Coloring::new(assigned);

    debug!(
        strategy = strategy.name(),
        vertices = n,
        edges = graph.edge_count(),
        colors = coloring.color_count(),
        "greedy coloring finished"
    );

    coloring
}

/// 已着色邻居未使用的最小颜色
///
/// 顶点度为 d 时最多有 d 种颜色被占用，答案一定在 0..=d 内。
fn first_available<V: VertexKey>(
    graph: &Graph<V>,
    colors: &[Option<ColorIndex>],
    index: usize,
) -> ColorIndex {
    let degree = graph.degree_at(index);
    let mut taken: SmallVec<[bool; 32]> = smallvec![false; degree + 1];

    for neighbor in graph.neighbor_indices(index) {
        if let Some(c) = colors[neighbor] {
            if c <= degree {
                taken[c] = true;
            }
        }
    }

    taken.iter().position(|&t| !t).unwrap_or(degree)
}
