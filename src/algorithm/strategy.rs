//! 顶点排序策略
//!
//! 贪心着色的结果取决于处理顶点的顺序。策略只负责给出顺序，
//! 新策略实现 [`OrderingStrategy`] 并在 [`Strategy`] 中登记即可。

use crate::error::Error;
use crate::graph::{Graph, VertexKey};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// 排序策略
pub trait OrderingStrategy {
    /// 策略名称
    fn name(&self) -> &'static str;

    /// 返回顶点下标的处理顺序，必须是 `0..vertex_count` 的一个排列
    fn order<V: VertexKey>(&self, graph: &Graph<V>) -> Vec<usize>;
}

/// 度数从大到小（并列时按插入顺序）
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestFirst;

impl OrderingStrategy for LargestFirst {
    fn name(&self) -> &'static str {
        "largest_first"
    }

    fn order<V: VertexKey>(&self, graph: &Graph<V>) -> Vec<usize> {
        let mut order: Vec<usize> = (0..graph.vertex_count()).collect();
        // sort_by_key 是稳定排序
        order.sort_by_key(|&i| Reverse(graph.degree_at(i)));
        order
    }
}

/// 反复移除当前度数最小的顶点，按移除的逆序着色
#[derive(Debug, Clone, Copy, Default)]
pub struct SmallestLast;

impl OrderingStrategy for SmallestLast {
    fn name(&self) -> &'static str {
        "smallest_last"
    }

    fn order<V: VertexKey>(&self, graph: &Graph<V>) -> Vec<usize> {
        let n = graph.vertex_count();
        let mut degrees: Vec<usize> = (0..n).map(|i| graph.degree_at(i)).collect();
        let mut removed = vec![false; n];
        let mut order = Vec::with_capacity(n);

        for _ in 0..n {
            let Some(next) = (0..n)
                .filter(|&i| !removed[i])
                .min_by_key(|&i| degrees[i])
            else {
                break;
            };
            removed[next] = true;
            order.push(next);
            for j in graph.neighbor_indices(next) {
                if !removed[j] {
                    degrees[j] -= 1;
                }
            }
        }

        order.reverse();
        order
    }
}

/// 广度优先顺序：从每个未访问顶点（插入顺序）出发
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectedSequentialBfs;

impl OrderingStrategy for ConnectedSequentialBfs {
    fn name(&self) -> &'static str {
        "connected_sequential_bfs"
    }

    fn order<V: VertexKey>(&self, graph: &Graph<V>) -> Vec<usize> {
        let n = graph.vertex_count();
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut queue = VecDeque::new();

        for start in 0..n {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            queue.push_back(start);

            while let Some(current) = queue.pop_front() {
                order.push(current);
                for neighbor in graph.neighbor_indices(current) {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        order
    }
}

/// 策略选择参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    LargestFirst,
    SmallestLast,
    ConnectedSequentialBfs,
}

impl Strategy {
    /// 所有可选策略
    pub const ALL: [Strategy; 3] = [
        Strategy::LargestFirst,
        Strategy::SmallestLast,
        Strategy::ConnectedSequentialBfs,
    ];

    pub fn as_str(&self) -> &'static str {
        self.name()
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::LargestFirst
    }
}

impl OrderingStrategy for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::LargestFirst => LargestFirst.name(),
            Strategy::SmallestLast => SmallestLast.name(),
            Strategy::ConnectedSequentialBfs => ConnectedSequentialBfs.name(),
        }
    }

    fn order<V: VertexKey>(&self, graph: &Graph<V>) -> Vec<usize> {
        match self {
            Strategy::LargestFirst => LargestFirst.order(graph),
            Strategy::SmallestLast => SmallestLast.order(graph),
            Strategy::ConnectedSequentialBfs => ConnectedSequentialBfs.order(graph),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "largest_first" | "lf" => Ok(Strategy::LargestFirst),
            "smallest_last" | "sl" => Ok(Strategy::SmallestLast),
            "connected_sequential_bfs" | "bfs" => Ok(Strategy::ConnectedSequentialBfs),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexLabel;

    fn path_abcd() -> Graph<VertexLabel> {
        let mut graph = Graph::with_vertex_count(4).unwrap();
        graph.add_edge("A".into(), "B".into()).unwrap();
        graph.add_edge("B".into(), "C".into()).unwrap();
        graph.add_edge("C".into(), "D".into()).unwrap();
        graph
    }

    fn is_permutation(order: &[usize], n: usize) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted == (0..n).collect::<Vec<_>>()
    }

    #[test]
    fn test_largest_first_ties_by_insertion() {
        // B, C 度为 2；A, D 度为 1
        assert_eq!(LargestFirst.order(&path_abcd()), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_smallest_last_order() {
        let graph = path_abcd();
        let order = SmallestLast.order(&graph);
        assert!(is_permutation(&order, 4));
        // 移除顺序 A, B, C, D
        assert_eq!(order, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_bfs_order_covers_components() {
        let graph = Graph::from_edges(0u32..5, [(0, 3), (3, 1), (2, 4)]).unwrap();
        assert_eq!(ConnectedSequentialBfs.order(&graph), vec![0, 3, 1, 2, 4]);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("largest-first".parse::<Strategy>().unwrap(), Strategy::LargestFirst);
        assert_eq!("SL".parse::<Strategy>().unwrap(), Strategy::SmallestLast);
        assert_eq!("bfs".parse::<Strategy>().unwrap(), Strategy::ConnectedSequentialBfs);
        assert!(matches!("random".parse::<Strategy>(), Err(Error::UnknownStrategy(_))));
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_strategy_serde() {
        let json = serde_json::to_string(&Strategy::SmallestLast).unwrap();
        assert_eq!(json, "\"smallest_last\"");
    }
}
