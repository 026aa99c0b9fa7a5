//! 结果打印器
//!
//! 以表格形式输出图、着色结果和统计信息

use crate::graph::{Graph, VertexKey};
use crate::metrics::MetricsSnapshot;
use crate::report::ColoringReport;
use crate::types::{ColorIndex, ColoringMode};
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};

/// 显示用调色板，颜色编号超出长度时循环使用
pub const PALETTE: &[&str] = &[
    "red",
    "green",
    "blue",
    "yellow",
    "magenta",
    "cyan",
    "bright red",
    "bright green",
    "bright blue",
    "bright yellow",
    "bright magenta",
    "bright cyan",
];

/// 颜色编号对应的调色板颜色名
pub fn palette_name(color: ColorIndex) -> &'static str {
    PALETTE[color % PALETTE.len()]
}

/// 结果打印器
pub struct Printer {
    /// 是否输出 ANSI 颜色
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// 调色板单元格
    fn swatch(&self, color: ColorIndex) -> String {
        let name = palette_name(color);
        if self.color {
            format!("{} {}", "●".color(name), name)
        } else {
            name.to_string()
        }
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table
    }

    /// 打印着色报告
    pub fn format_report<V: VertexKey>(&self, report: &ColoringReport<V>) -> String {
        let heading = format!(
            "{}: {}",
            report.mode().measure_name(),
            report.color_count()
        );
        let heading = if self.color {
            heading.bold().to_string()
        } else {
            heading
        };

        let assignments = report.assignments();
        let elapsed_ms = report.elapsed().as_secs_f64() * 1000.0;
        if assignments.is_empty() {
            return format!(
                "{}\n(没有可着色的{})\n",
                heading,
                match report.mode() {
                    ColoringMode::Vertex => "顶点",
                    ColoringMode::Edge => "边",
                }
            );
        }

        let entity = match report.mode() {
            ColoringMode::Vertex => "Vertex",
            ColoringMode::Edge => "Edge",
        };

        let mut table = Self::new_table();
        table.set_titles(row![entity, "Color", "Palette"]);
        for (name, color) in &assignments {
            table.add_row(Row::new(vec![
                Cell::new(name),
                Cell::new(&color.to_string()),
                Cell::new(&self.swatch(*color)),
            ]));
        }

        format!(
            "{}\n{}策略: {}，耗时 {:.3} ms\n",
            heading,
            table,
            report.strategy(),
            elapsed_ms
        )
    }

    /// 打印图结构
    pub fn format_graph<V: VertexKey>(&self, graph: &Graph<V>) -> String {
        let mut table = Self::new_table();
        table.set_titles(row!["Vertex", "Degree", "Neighbors"]);
        for v in graph.vertices() {
            let neighbors: Vec<String> = graph.neighbors(v).map(|n| n.to_string()).collect();
            table.add_row(Row::new(vec![
                Cell::new(&v.to_string()),
                Cell::new(&graph.degree(v).to_string()),
                Cell::new(&neighbors.join(", ")),
            ]));
        }

        let edges: Vec<String> = graph.edges().map(|e| e.to_string()).collect();
        format!(
            "{}{} 个顶点，{} 条边: {}\n",
            table,
            graph.vertex_count(),
            graph.edge_count(),
            if edges.is_empty() {
                "(无)".to_string()
            } else {
                edges.join(" ")
            }
        )
    }

    /// 打印统计信息
    pub fn format_stats(
        &self,
        snapshot: &MetricsSnapshot,
        graph_size: Option<(usize, usize)>,
    ) -> String {
        let mut table = Self::new_table();
        table.set_titles(row!["Property", "Value"]);
        if let Some((vertices, edges)) = graph_size {
            table.add_row(row!["Vertex Count", vertices.to_string()]);
            table.add_row(row!["Edge Count", edges.to_string()]);
        }
        table.add_row(row!["Vertex Colorings", snapshot.vertex_colorings.to_string()]);
        table.add_row(row!["Edge Colorings", snapshot.edge_colorings.to_string()]);
        table.add_row(row![
            "Avg Coloring Time (ms)",
            format!("{:.3}", snapshot.avg_coloring_duration_ms)
        ]);
        table.add_row(row!["Edges Accepted", snapshot.edges_accepted.to_string()]);
        table.add_row(row!["Edges Rejected", snapshot.edges_rejected.to_string()]);
        table.to_string()
    }

    /// 打印帮助信息
    pub fn print_help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   ChromaGraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

步骤:
  1. 添加顶点   2. 添加边   3. 选择着色方式

基础命令:
  help, h, ?             显示帮助
  quit, exit, q          退出程序

  vertices, v <数量>     添加顶点（标签为 A, B, C, ...）
                         示例: vertices 4

  edge, e <A-B> ...      添加一条或多条边
                         示例: edge A-B B-C C-D

  color, c <vertex|edge> 贪心着色并显示色数 / 边色数
                         示例: color vertex

  strategy, s [名称]     查看或设置排序策略
                         可选: largest_first(默认), smallest_last,
                               connected_sequential_bfs

  show, graph            显示当前图
  stats, info            显示统计信息
  reset                  清空当前图，重新开始
  clear                  清屏

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}
