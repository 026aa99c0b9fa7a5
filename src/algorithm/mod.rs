//! 图算法模块
//!
//! 包含贪心着色及其顶点排序策略

mod coloring;
mod greedy;
mod strategy;

pub use coloring::Coloring;
pub use greedy::greedy_color;
pub use strategy::{ConnectedSequentialBfs, LargestFirst, OrderingStrategy, SmallestLast, Strategy};
