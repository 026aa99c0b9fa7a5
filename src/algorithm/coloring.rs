//! 着色结果

use crate::graph::{Edge, Graph, VertexKey};
use crate::types::ColorIndex;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashSet};

/// 顶点 -> 颜色编号的映射（按图的顶点顺序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coloring<V: VertexKey> {
    colors: IndexMap<V, ColorIndex>,
}

impl<V: VertexKey> Coloring<V> {
    pub(crate) fn new(colors: IndexMap<V, ColorIndex>) -> Self {
        Self { colors }
    }

    /// 获取顶点颜色
    pub fn color_of(&self, v: &V) -> Option<ColorIndex> {
        self.colors.get(v).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, ColorIndex)> + '_ {
        self.colors.iter().map(|(v, &c)| (v, c))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// 使用的不同颜色数量
    pub fn color_count(&self) -> usize {
        self.colors.values().collect::<HashSet<_>>().len()
    }

    /// 最大颜色编号
    pub fn max_color(&self) -> Option<ColorIndex> {
        self.colors.values().copied().max()
    }

    /// 按颜色分组
    pub fn classes(&self) -> BTreeMap<ColorIndex, Vec<V>> {
        let mut classes: BTreeMap<ColorIndex, Vec<V>> = BTreeMap::new();
        for (v, &c) in &self.colors {
            classes.entry(c).or_default().push(v.clone());
        }
        classes
    }

    /// 同色相邻的边
    pub fn conflicts<'a>(&self, graph: &'a Graph<V>) -> Vec<&'a Edge<V>> {
        graph
            .edges()
            .filter(|edge| {
                let (u, v) = edge.endpoints();
                match (self.color_of(u), self.color_of(v)) {
                    (Some(cu), Some(cv)) => cu == cv,
                    _ => false,
                }
            })
            .collect()
    }

    /// 是否为图的合法着色：每个顶点恰有一个颜色，且相邻顶点颜色不同
    pub fn is_proper(&self, graph: &Graph<V>) -> bool {
        self.len() == graph.vertex_count()
            && graph.vertices().all(|v| self.colors.contains_key(v))
            && self.conflicts(graph).is_empty()
    }
}

impl<V: VertexKey> IntoIterator for Coloring<V> {
    type Item = (V, ColorIndex);
    type IntoIter = indexmap::map::IntoIter<V, ColorIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.into_iter()
    }
}
