//! 顶点定义
//!
//! 顶点标识只需要可比较、可哈希、可显示，标签和整数都可以直接作为顶点

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// 顶点标识需满足的约束
pub trait VertexKey: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display {}

impl<T> VertexKey for T where T: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display {}

/// 字母顶点标签（A, B, ..., Z, AA, AB, ...）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexLabel(String);

impl VertexLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// 第 `index` 个标签（从 0 开始）
    pub fn nth(index: usize) -> Self {
        let mut n = index + 1;
        let mut chars = Vec::new();
        while n > 0 {
            n -= 1;
            chars.push((b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        Self(chars.into_iter().rev().collect())
    }

    /// 前 `count` 个标签
    pub fn sequence(count: usize) -> Vec<Self> {
        (0..count).map(Self::nth).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VertexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VertexLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for VertexLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}
