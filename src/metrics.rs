//! 性能指标收集模块
//!
//! 记录每次着色请求的次数和耗时，支持快照和 Prometheus 格式导出

use crate::types::ColoringMode;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 慢请求阈值
const SLOW_COLORING: Duration = Duration::from_millis(100);

/// 系统全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 着色统计
    coloring_stats: ColoringStats,
    /// 图输入统计
    input_stats: InputStats,
    /// 启动时间
    start_time: Instant,
}

/// 着色统计
#[derive(Debug, Default)]
struct ColoringStats {
    /// 顶点着色次数
    vertex_colorings: AtomicU64,
    /// 边着色次数
    edge_colorings: AtomicU64,
    /// 进行中的请求数
    in_flight: AtomicU64,
    /// 总耗时（微秒）
    total_duration_us: AtomicU64,
    /// 慢请求数
    slow_colorings: AtomicU64,
    /// 已着色顶点数
    vertices_colored: AtomicU64,
    /// 已着色边数
    edges_colored: AtomicU64,
}

/// 图输入统计
#[derive(Debug, Default)]
struct InputStats {
    /// 接受的边
    edges_accepted: AtomicU64,
    /// 被拒绝的边（重复、未知顶点、自环、格式错误）
    edges_rejected: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub vertex_colorings: u64,
    pub edge_colorings: u64,
    pub in_flight: u64,
    pub avg_coloring_duration_ms: f64,
    pub slow_colorings: u64,
    pub vertices_colored: u64,
    pub edges_colored: u64,
    pub edges_accepted: u64,
    pub edges_rejected: u64,
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            coloring_stats: ColoringStats::default(),
            input_stats: InputStats::default(),
            start_time: Instant::now(),
        }
    }

    /// 记录着色开始
    pub fn record_coloring_start(&self) -> ColoringTimer {
        self.coloring_stats.in_flight.fetch_add(1, Ordering::Relaxed);
        ColoringTimer::new()
    }

    /// 记录着色完成，`entities` 为着色的顶点数或边数
    pub fn record_coloring_complete(&self, timer: ColoringTimer, mode: ColoringMode, entities: usize) {
        let duration = timer.elapsed();
        let stats = &self.coloring_stats;

        stats.in_flight.fetch_sub(1, Ordering::Relaxed);
        match mode {
            ColoringMode::Vertex => {
                stats.vertex_colorings.fetch_add(1, Ordering::Relaxed);
                stats.vertices_colored.fetch_add(entities as u64, Ordering::Relaxed);
            }
            ColoringMode::Edge => {
                stats.edge_colorings.fetch_add(1, Ordering::Relaxed);
                stats.edges_colored.fetch_add(entities as u64, Ordering::Relaxed);
            }
        }

        stats
            .total_duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        if duration >= SLOW_COLORING {
            stats.slow_colorings.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 记录接受的边
    pub fn record_edge_accepted(&self) {
        self.input_stats.edges_accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录被拒绝的边
    pub fn record_edge_rejected(&self) {
        self.input_stats.edges_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let stats = &self.coloring_stats;
        let vertex_colorings = stats.vertex_colorings.load(Ordering::Relaxed);
        let edge_colorings = stats.edge_colorings.load(Ordering::Relaxed);
        let total_duration_us = stats.total_duration_us.load(Ordering::Relaxed);
        let total = vertex_colorings + edge_colorings;

        let avg_coloring_duration_ms = if total > 0 {
            (total_duration_us as f64) / (total as f64) / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            vertex_colorings,
            edge_colorings,
            in_flight: stats.in_flight.load(Ordering::Relaxed),
            avg_coloring_duration_ms,
            slow_colorings: stats.slow_colorings.load(Ordering::Relaxed),
            vertices_colored: stats.vertices_colored.load(Ordering::Relaxed),
            edges_colored: stats.edges_colored.load(Ordering::Relaxed),
            edges_accepted: self.input_stats.edges_accepted.load(Ordering::Relaxed),
            edges_rejected: self.input_stats.edges_rejected.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();
        let mut content = String::new();

        let mut push = |name: &str, kind: &str, help: &str, value: String| {
            content.push_str(&format!("# HELP chromagraph_{} {}\n", name, help));
            content.push_str(&format!("# TYPE chromagraph_{} {}\n", name, kind));
            content.push_str(&format!("chromagraph_{} {}\n", name, value));
        };

        push(
            "vertex_colorings_total",
            "counter",
            "Number of vertex coloring requests",
            snapshot.vertex_colorings.to_string(),
        );
        push(
            "edge_colorings_total",
            "counter",
            "Number of edge coloring requests",
            snapshot.edge_colorings.to_string(),
        );
        push(
            "colorings_in_flight",
            "gauge",
            "Coloring requests currently running",
            snapshot.in_flight.to_string(),
        );
        push(
            "coloring_duration_avg_ms",
            "gauge",
            "Average coloring duration in milliseconds",
            format!("{:.3}", snapshot.avg_coloring_duration_ms),
        );
        push(
            "slow_colorings_total",
            "counter",
            "Number of colorings slower than 100ms",
            snapshot.slow_colorings.to_string(),
        );
        push(
            "vertices_colored_total",
            "counter",
            "Vertices colored by vertex coloring",
            snapshot.vertices_colored.to_string(),
        );
        push(
            "edges_colored_total",
            "counter",
            "Edges colored by edge coloring",
            snapshot.edges_colored.to_string(),
        );
        push(
            "edges_accepted_total",
            "counter",
            "Edges accepted into a graph store",
            snapshot.edges_accepted.to_string(),
        );
        push(
            "edges_rejected_total",
            "counter",
            "Edges rejected by a graph store",
            snapshot.edges_rejected.to_string(),
        );
        push(
            "uptime_seconds",
            "counter",
            "System uptime in seconds",
            snapshot.uptime_seconds.to_string(),
        );

        PrometheusMetrics { content }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 着色计时器
pub struct ColoringTimer {
    start: Instant,
}

impl ColoringTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}
