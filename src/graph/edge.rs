//! 边定义
//!
//! 无向边：端点在构造时规范化（较小者在前），(u, v) 与 (v, u) 是同一条边

use crate::graph::vertex::VertexKey;
use std::fmt;

/// 无向边
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<V> {
    /// 较小的端点
    low: V,
    /// 较大的端点
    high: V,
}

impl<V: VertexKey> Edge<V> {
    /// 创建边（端点顺序无关）
    pub fn new(u: V, v: V) -> Self {
        if u <= v {
            Self { low: u, high: v }
        } else {
            Self { low: v, high: u }
        }
    }

    /// 规范化后的端点对
    pub fn endpoints(&self) -> (&V, &V) {
        (&self.low, &self.high)
    }

    /// 是否为自环
    pub fn is_loop(&self) -> bool {
        self.low == self.high
    }

    /// 是否以 `v` 为端点
    pub fn contains(&self, v: &V) -> bool {
        &self.low == v || &self.high == v
    }

    /// 给定一个端点，返回另一个端点
    pub fn other(&self, v: &V) -> Option<&V> {
        if &self.low == v {
            Some(&self.high)
        } else if &self.high == v {
            Some(&self.low)
        } else {
            None
        }
    }

    /// 两条不同的边恰好共享一个端点时返回该端点
    pub fn common_endpoint(&self, other: &Edge<V>) -> Option<&V> {
        if self == other {
            return None;
        }
        if other.contains(&self.low) {
            Some(&self.low)
        } else if other.contains(&self.high) {
            Some(&self.high)
        } else {
            None
        }
    }

    /// 线图邻接关系：两条边恰好共享一个端点
    pub fn shares_endpoint(&self, other: &Edge<V>) -> bool {
        self.common_endpoint(other).is_some()
    }
}

impl<V: fmt::Display> fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_normalization() {
        let e1 = Edge::new("B", "A");
        let e2 = Edge::new("A", "B");
        assert_eq!(e1, e2);
        assert_eq!(e1.endpoints(), (&"A", &"B"));
        assert_eq!(e1.to_string(), "A-B");
    }

    #[test]
    fn test_common_endpoint() {
        let ab = Edge::new(1u32, 2);
        let bc = Edge::new(2u32, 3);
        let cd = Edge::new(3u32, 4);

        assert_eq!(ab.common_endpoint(&bc), Some(&2));
        assert!(!ab.shares_endpoint(&cd));
        assert!(!ab.shares_endpoint(&ab));
        assert_eq!(bc.other(&3), Some(&2));
        assert_eq!(bc.other(&9), None);
    }
}
