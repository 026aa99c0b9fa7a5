//! 交互命令处理
//!
//! 会话按三个步骤推进：添加顶点 -> 添加边 -> 选择着色方式

use crate::algorithm::Strategy;
use crate::cli::printer::Printer;
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexLabel};
use crate::metrics;
use crate::report::{color_graph, ColoringReport};
use crate::types::{ColoringMode, DEFAULT_MAX_VERTICES};

/// 命令执行结果
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 会话状态
pub struct Session {
    /// 当前图（添加顶点之后才存在）
    graph: Option<Graph<VertexLabel>>,
    /// 排序策略
    strategy: Strategy,
    /// 最近一次着色结果
    last_report: Option<ColoringReport<VertexLabel>>,
    printer: Printer,
    /// 允许的最大顶点数
    max_vertices: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Strategy::default(), Printer::default())
    }
}

impl Session {
    pub fn new(strategy: Strategy, printer: Printer) -> Self {
        Self {
            graph: None,
            strategy,
            last_report: None,
            printer,
            max_vertices: DEFAULT_MAX_VERTICES,
        }
    }

    /// 设置最大顶点数
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    pub fn graph(&self) -> Option<&Graph<VertexLabel>> {
        self.graph.as_ref()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn last_report(&self) -> Option<&ColoringReport<VertexLabel>> {
        self.last_report.as_ref()
    }

    /// 解析并执行一条命令
    pub fn execute(&mut self, input: &str) -> CommandResult {
        let input = input.trim();
        let cmd_line = input.strip_prefix(':').unwrap_or(input);

        let parts: Vec<&str> = cmd_line.splitn(2, char::is_whitespace).collect();
        let cmd = parts[0].to_lowercase();
        let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "" => CommandResult::Continue,

            "help" | "h" | "?" => CommandResult::Message(Printer::print_help()),

            "quit" | "exit" | "q" => CommandResult::Exit,

            "vertices" | "vertex" | "v" => self.add_vertices(args),

            "edge" | "edges" | "e" => self.add_edges(args),

            "color" | "colour" | "c" => self.color(args),

            "strategy" | "s" => self.set_strategy(args),

            "show" | "graph" => match &self.graph {
                Some(graph) => CommandResult::Message(self.printer.format_graph(graph)),
                None => CommandResult::Error("请先添加顶点!".to_string()),
            },

            "stats" | "info" => {
                let snapshot = metrics::global_metrics().snapshot();
                let size = self
                    .graph
                    .as_ref()
                    .map(|g| (g.vertex_count(), g.edge_count()));
                CommandResult::Message(self.printer.format_stats(&snapshot, size))
            }

            "reset" => {
                self.graph = None;
                self.last_report = None;
                CommandResult::Message("图已清空".to_string())
            }

            "clear" => {
                print!("\x1B[2J\x1B[1;1H");
                CommandResult::Continue
            }

            _ => CommandResult::Error(format!("未知命令: {}。输入 'help' 查看帮助。", cmd)),
        }
    }

    fn add_vertices(&mut self, args: &str) -> CommandResult {
        if self.graph.is_some() {
            return CommandResult::Message("顶点已添加! 输入 'reset' 重新开始".to_string());
        }

        let Ok(count) = args.parse::<usize>() else {
            return CommandResult::Error("用法: vertices <数量>".to_string());
        };
        if count > self.max_vertices {
            let e = Error::InvalidVertexCount(format!(
                "{} 超过上限 {}",
                count, self.max_vertices
            ));
            return CommandResult::Error(e.to_string());
        }

        match Graph::with_vertex_count(count) {
            Ok(graph) => {
                let labels: Vec<String> = graph.vertices().map(|v| v.to_string()).collect();
                self.graph = Some(graph);
                CommandResult::Message(format!(
                    "已添加 {} 个顶点: {}",
                    count,
                    labels.join(" ")
                ))
            }
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }

    fn add_edges(&mut self, args: &str) -> CommandResult {
        let Some(graph) = self.graph.as_mut() else {
            return CommandResult::Error("请先添加顶点!".to_string());
        };

        let specs: Vec<&str> = args
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();
        if specs.is_empty() {
            return CommandResult::Error("用法: edge <A-B> [C-D ...]".to_string());
        }

        let metrics = metrics::global_metrics();
        let mut lines = Vec::with_capacity(specs.len());
        let mut added = 0;

        for spec in specs {
            let result = parse_edge_spec(spec).and_then(|(u, v)| graph.add_edge(u, v));
            match result {
                Ok(()) => {
                    metrics.record_edge_accepted();
                    added += 1;
                    lines.push(format!("  + {}", spec));
                }
                Err(e) => {
                    metrics.record_edge_rejected();
                    lines.push(format!("  ! {}", e));
                }
            }
        }

        self.last_report = None;
        lines.push(format!(
            "已添加 {} 条边，当前共 {} 条",
            added,
            graph.edge_count()
        ));
        CommandResult::Message(lines.join("\n"))
    }

    fn color(&mut self, args: &str) -> CommandResult {
        let Some(graph) = self.graph.as_ref() else {
            return CommandResult::Error("请先添加顶点和边!".to_string());
        };

        if args.is_empty() {
            return CommandResult::Error("用法: color <vertex|edge>".to_string());
        }
        let mode = match args.parse::<ColoringMode>() {
            Ok(mode) => mode,
            Err(e) => return CommandResult::Error(e.to_string()),
        };

        match color_graph(graph, mode, &self.strategy) {
            Ok(report) => {
                let output = self.printer.format_report(&report);
                self.last_report = Some(report);
                CommandResult::Message(output)
            }
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }

    fn set_strategy(&mut self, args: &str) -> CommandResult {
        if args.is_empty() {
            let available: Vec<&str> = Strategy::ALL.iter().map(|s| s.as_str()).collect();
            return CommandResult::Message(format!(
                "当前策略: {}\n可选策略: {}",
                self.strategy,
                available.join(", ")
            ));
        }

        match args.parse::<Strategy>() {
            Ok(strategy) => {
                self.strategy = strategy;
                CommandResult::Message(format!("排序策略已设置为 {}", strategy))
            }
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }
}

/// 解析 `A-B` 形式的边
///
/// 标签区分大小写。交互命令按空白和逗号切分参数，所以边内不能含空格。
pub fn parse_edge_spec(spec: &str) -> Result<(VertexLabel, VertexLabel)> {
    let parts: Vec<&str> = spec.split('-').map(str::trim).collect();
    match parts.as_slice() {
        [u, v] if !u.is_empty() && !v.is_empty() => {
            Ok((VertexLabel::from(*u), VertexLabel::from(*v)))
        }
        _ => Err(Error::InvalidEdgeSpec(spec.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Strategy::LargestFirst, Printer::new(false))
    }

    fn message(result: CommandResult) -> String {
        match result {
            CommandResult::Message(m) => m,
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_edge_spec() {
        let (u, v) = parse_edge_spec(" A - B ").unwrap();
        assert_eq!((u.as_str(), v.as_str()), ("A", "B"));

        for bad in ["AB", "A-B-C", "-B", "A-", ""] {
            assert!(matches!(parse_edge_spec(bad), Err(Error::InvalidEdgeSpec(_))), "{}", bad);
        }
    }

    #[test]
    fn test_vertex_count_limit() {
        let mut s = session();
        match s.execute("vertices 3000000") {
            CommandResult::Error(e) => assert!(e.contains("超过上限")),
            other => panic!("expected error, got {:?}", other),
        }
        assert!(s.graph().is_none());

        let mut s = session().with_max_vertices(3);
        assert!(matches!(s.execute("vertices 4"), CommandResult::Error(_)));
        assert!(message(s.execute("vertices 3")).contains("A B C"));
    }

    #[test]
    fn test_edge_with_inner_spaces_is_split() {
        let mut s = session();
        s.execute("vertices 2");
        let out = message(s.execute("edge A - B"));
        assert_eq!(out.matches("无效的边格式").count(), 3);
        assert_eq!(s.graph().unwrap().edge_count(), 0);
    }

    #[test]
    fn test_full_workflow() {
        let mut s = session();
        assert!(message(s.execute("vertices 4")).contains("A B C D"));
        let out = message(s.execute("edge A-B B-C, C-D"));
        assert!(out.contains("已添加 3 条边"));

        let out = message(s.execute("color vertex"));
        assert!(out.starts_with("Chromatic Number: 2"));
        assert_eq!(s.last_report().map(|r| r.color_count()), Some(2));
    }

    #[test]
    fn test_edge_rejections_are_reported() {
        let mut s = session();
        s.execute("vertices 2");
        let out = message(s.execute("edge A-B B-A A-X A-A oops"));

        assert!(out.contains("边已存在: A-B"));
        assert!(out.contains("顶点不存在: X"));
        assert!(out.contains("不允许自环"));
        assert!(out.contains("无效的边格式: oops"));
        assert_eq!(s.graph().unwrap().edge_count(), 1);
    }

    #[test]
    fn test_step_order_enforced() {
        let mut s = session();
        assert!(matches!(s.execute("edge A-B"), CommandResult::Error(_)));
        assert!(matches!(s.execute("color vertex"), CommandResult::Error(_)));

        s.execute("vertices 3");
        assert!(message(s.execute("vertices 5")).contains("顶点已添加"));
        assert_eq!(s.graph().unwrap().vertex_count(), 3);
    }

    #[test]
    fn test_edge_coloring_and_invalid_mode() {
        let mut s = session();
        s.execute("v 3");
        s.execute("e A-B B-C C-A");
        assert!(message(s.execute("c edge")).starts_with("Chromatic Index: 3"));
        assert!(matches!(s.execute("color face"), CommandResult::Error(_)));
    }

    #[test]
    fn test_strategy_and_misc_commands() {
        let mut s = session();
        assert!(message(s.execute("strategy")).contains("largest_first"));
        message(s.execute("strategy smallest-last"));
        assert_eq!(s.strategy(), Strategy::SmallestLast);
        assert!(matches!(s.execute("strategy random"), CommandResult::Error(_)));

        assert_eq!(s.execute(":quit"), CommandResult::Exit);
        assert_eq!(s.execute("   "), CommandResult::Continue);
        assert!(matches!(s.execute("frobnicate"), CommandResult::Error(_)));

        s.execute("vertices 2");
        message(s.execute("reset"));
        assert!(s.graph().is_none());
    }
}
