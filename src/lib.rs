//! ChromaGraph - 无向图贪心着色
//!
//! 在手工构建的小型无向图上计算贪心着色，支持：
//! - 顶点着色，报告色数上界（Chromatic Number）
//! - 通过线图进行边着色，报告边色数上界（Chromatic Index）
//! - 可替换的顶点排序策略（默认 largest-first）
//! - 交互式命令行和 HTTP API

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod report;
pub mod server;
pub mod types;

// 重导出常用类型
pub use algorithm::{greedy_color, Coloring, OrderingStrategy, Strategy};
pub use error::{Error, Result};
pub use graph::{
    build_line_graph, line_graph_edge_count, Edge, Graph, LineGraph, LineVertex, VertexKey,
    VertexLabel,
};
pub use report::{
    color_edges, color_graph, color_vertices, ColoringReport, EdgeColoringReport,
    VertexColoringReport,
};
pub use types::{ColorIndex, ColoringMode};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
