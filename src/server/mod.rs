//! HTTP 服务器模块
//!
//! 提供着色 REST API。每个请求都构建自己的图，请求之间不共享图状态。

use crate::algorithm::Strategy;
use crate::cli::palette_name;
use crate::error::{Error, Result};
use crate::graph::{line_graph_edge_count, Graph, VertexLabel};
use crate::metrics;
use crate::report::{color_graph, ColoringReport};
use crate::types::{
    ColorIndex, ColoringMode, DEFAULT_MAX_EDGES, DEFAULT_MAX_LINE_EDGES, DEFAULT_MAX_VERTICES,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 单个请求允许的最大顶点数
    pub max_vertices: usize,
    /// 单个请求允许的最大边数
    pub max_edges: usize,
    /// 边着色时线图允许的最大边数
    pub max_line_edges: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_vertices: DEFAULT_MAX_VERTICES,
            max_edges: DEFAULT_MAX_EDGES,
            max_line_edges: DEFAULT_MAX_LINE_EDGES,
        }
    }
}

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 指标和统计
        .route("/metrics", get(metrics_handler))
        .route("/stats", get(stats_handler))
        // 着色
        .route("/color", post(color))
        .route("/color/batch", post(color_batch))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// 启动服务器
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState {
        config: Arc::new(config),
    };
    let app = router(state);

    info!("ChromaGraph 服务器启动于 http://{}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::ServerError(format!("绑定地址失败: {}", e)))?;

    axum::serve(listener, app).await?;

    Ok(())
}

// ==================== 请求与响应 ====================

/// 着色请求
#[derive(Debug, Clone, Deserialize)]
pub struct ColorRequest {
    /// 顶点数量，顶点标签为 A, B, C, ...
    pub vertex_count: usize,
    /// 已解析的边 [["A", "B"], ...]
    #[serde(default)]
    pub edges: Vec<(String, String)>,
    #[serde(default)]
    pub mode: ColoringMode,
    #[serde(default)]
    pub strategy: Strategy,
}

/// 被拒绝的边
#[derive(Debug, Clone, Serialize)]
pub struct RejectedEdge {
    pub edge: String,
    pub reason: String,
}

/// 单个实体的颜色
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    /// 顶点标签或 `A-B` 形式的边
    pub target: String,
    pub color: ColorIndex,
    pub palette: &'static str,
}

/// 着色响应
#[derive(Debug, Clone, Serialize)]
pub struct ColorResponse {
    pub request_id: Uuid,
    pub mode: ColoringMode,
    pub strategy: Strategy,
    pub vertex_count: usize,
    pub edge_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chromatic_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chromatic_index: Option<usize>,
    pub assignments: Vec<Assignment>,
    pub rejected: Vec<RejectedEdge>,
    pub elapsed_ms: f64,
}

/// 处理一个着色请求
///
/// 被拒绝的边记录在响应中，不会中断请求。规模检查在插入边和构建线图之前完成。
pub fn process_request(req: &ColorRequest, config: &ServerConfig) -> Result<ColorResponse> {
    if req.vertex_count > config.max_vertices {
        return Err(Error::InvalidVertexCount(format!(
            "{} 超过上限 {}",
            req.vertex_count, config.max_vertices
        )));
    }
    if req.edges.len() > config.max_edges {
        return Err(Error::GraphTooLarge(format!(
            "{} 条边超过上限 {}",
            req.edges.len(),
            config.max_edges
        )));
    }

    let request_id = Uuid::new_v4();
    let metrics = metrics::global_metrics();
    let mut graph = Graph::with_vertex_count(req.vertex_count)?;
    let mut rejected = Vec::new();

    for (u, v) in &req.edges {
        match graph.add_edge(VertexLabel::from(u.as_str()), VertexLabel::from(v.as_str())) {
            Ok(()) => metrics.record_edge_accepted(),
            Err(e) if e.is_recoverable() => {
                metrics.record_edge_rejected();
                rejected.push(RejectedEdge {
                    edge: format!("{}-{}", u, v),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    if req.mode == ColoringMode::Edge {
        let line_edges = line_graph_edge_count(&graph);
        if line_edges > config.max_line_edges {
            return Err(Error::GraphTooLarge(format!(
                "线图有 {} 条边，超过上限 {}",
                line_edges, config.max_line_edges
            )));
        }
    }

    let report = color_graph(&graph, req.mode, &req.strategy)?;
    let (chromatic_number, chromatic_index) = match &report {
        ColoringReport::Vertex(r) => (Some(r.chromatic_number), None),
        ColoringReport::Edge(r) => (None, Some(r.chromatic_index)),
    };

    let assignments = report
        .assignments()
        .into_iter()
        .map(|(target, color)| Assignment {
            target,
            color,
            palette: palette_name(color),
        })
        .collect();

    info!(
        %request_id,
        mode = %req.mode,
        strategy = %req.strategy,
        colors = report.color_count(),
        rejected = rejected.len(),
        "coloring request served"
    );

    Ok(ColorResponse {
        request_id,
        mode: req.mode,
        strategy: req.strategy,
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
        chromatic_number,
        chromatic_index,
        assignments,
        rejected,
        elapsed_ms: report.elapsed().as_secs_f64() * 1000.0,
    })
}

// ==================== 处理器 ====================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus 格式指标
async fn metrics_handler() -> Response {
    let prom = metrics::global_metrics().to_prometheus();
    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        prom.content,
    )
        .into_response()
}

/// 详细统计信息
async fn stats_handler() -> impl IntoResponse {
    let snapshot = metrics::global_metrics().snapshot();
    Json(ApiResponse::success(snapshot))
}

fn error_status(e: &Error) -> StatusCode {
    match e {
        Error::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// 单个着色请求，在阻塞线程池上计算
async fn color(State(state): State<AppState>, Json(req): Json<ColorRequest>) -> Response {
    let config = state.config.clone();
    let result = tokio::task::spawn_blocking(move || process_request(&req, &config))
        .await
        .unwrap_or_else(|e| Err(Error::InternalError(format!("着色任务失败: {}", e))));

    match result {
        Ok(result) => (StatusCode::OK, Json(ApiResponse::success(result))).into_response(),
        Err(e) => {
            warn!(error = %e, "coloring request rejected");
            (
                error_status(&e),
                Json(ApiResponse::<()>::error(&e.to_string())),
            )
                .into_response()
        }
    }
}

/// 批量着色：请求之间相互独立，并行处理
async fn color_batch(
    State(state): State<AppState>,
    Json(requests): Json<Vec<ColorRequest>>,
) -> Response {
    let config = state.config.clone();
    let handle = tokio::task::spawn_blocking(move || {
        requests
            .par_iter()
            .map(|req| match process_request(req, &config) {
                Ok(result) => ApiResponse::success(result),
                Err(e) => ApiResponse::error(&e.to_string()),
            })
            .collect::<Vec<_>>()
    });

    match handle.await {
        Ok(results) => (StatusCode::OK, Json(ApiResponse::success(results))).into_response(),
        Err(e) => {
            let e = Error::InternalError(format!("批量任务失败: {}", e));
            (error_status(&e), Json(ApiResponse::<()>::error(&e.to_string()))).into_response()
        }
    }
}

/// API 响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn request(vertex_count: usize, edges: &[(&str, &str)], mode: ColoringMode) -> ColorRequest {
        ColorRequest {
            vertex_count,
            edges: edges
                .iter()
                .map(|(u, v)| (u.to_string(), v.to_string()))
                .collect(),
            mode,
            strategy: Strategy::LargestFirst,
        }
    }

    fn config() -> ServerConfig {
        ServerConfig::default()
    }

    fn state() -> AppState {
        AppState {
            config: Arc::new(config()),
        }
    }

    /// 以 A 为中心的星形
    fn star_request(leaves: usize, mode: ColoringMode) -> ColorRequest {
        ColorRequest {
            vertex_count: leaves + 1,
            edges: VertexLabel::sequence(leaves + 1)
                .into_iter()
                .skip(1)
                .map(|leaf| ("A".to_string(), leaf.to_string()))
                .collect(),
            mode,
            strategy: Strategy::LargestFirst,
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_process_vertex_request() {
        let req = request(
            4,
            &[("A", "B"), ("B", "C"), ("C", "D")],
            ColoringMode::Vertex,
        );
        let resp = process_request(&req, &config()).unwrap();

        assert_eq!(resp.chromatic_number, Some(2));
        assert_eq!(resp.chromatic_index, None);
        assert_eq!(resp.assignments.len(), 4);
        assert_eq!(resp.assignments[1].target, "B");
        assert_eq!(resp.assignments[1].color, 0);
        assert_eq!(resp.assignments[1].palette, "red");
    }

    #[test]
    fn test_process_edge_request_with_rejections() {
        let req = request(
            3,
            &[("A", "B"), ("B", "C"), ("C", "A"), ("B", "A"), ("A", "Q")],
            ColoringMode::Edge,
        );
        let resp = process_request(&req, &config()).unwrap();

        assert_eq!(resp.chromatic_index, Some(3));
        assert_eq!(resp.edge_count, 3);
        assert_eq!(resp.rejected.len(), 2);
        assert_eq!(resp.rejected[0].edge, "B-A");
        assert!(resp.rejected[1].reason.contains("Q"));
    }

    #[test]
    fn test_process_rejects_oversized_graph() {
        let limits = ServerConfig {
            max_vertices: 10,
            ..config()
        };
        let req = request(50, &[], ColoringMode::Vertex);
        assert!(matches!(
            process_request(&req, &limits),
            Err(Error::InvalidVertexCount(_))
        ));
        let req = request(0, &[], ColoringMode::Vertex);
        assert!(process_request(&req, &limits).is_err());
    }

    #[test]
    fn test_process_rejects_too_many_edges() {
        let limits = ServerConfig {
            max_edges: 2,
            ..config()
        };
        let req = request(3, &[("A", "B"), ("B", "C"), ("C", "A")], ColoringMode::Vertex);
        assert!(matches!(
            process_request(&req, &limits),
            Err(Error::GraphTooLarge(_))
        ));
    }

    #[test]
    fn test_process_rejects_oversized_line_graph() {
        // 星形 K1,n 的线图是 K_n，有 n(n-1)/2 条边
        let limits = ServerConfig {
            max_line_edges: 100,
            ..config()
        };
        let err = process_request(&star_request(20, ColoringMode::Edge), &limits).unwrap_err();
        assert!(matches!(err, Error::GraphTooLarge(ref msg) if msg.contains("190")));

        // 顶点着色不构建线图
        let resp = process_request(&star_request(20, ColoringMode::Vertex), &limits).unwrap();
        assert_eq!(resp.chromatic_number, Some(2));

        let resp = process_request(&star_request(14, ColoringMode::Edge), &limits).unwrap();
        assert_eq!(resp.chromatic_index, Some(14));
    }

    #[test]
    fn test_default_limits_reject_large_star() {
        let err = process_request(&star_request(3000, ColoringMode::Edge), &config()).unwrap_err();
        assert!(matches!(err, Error::GraphTooLarge(_)));
    }

    #[test]
    fn test_request_defaults() {
        let req: ColorRequest = serde_json::from_str(r#"{"vertex_count": 2}"#).unwrap();
        assert_eq!(req.mode, ColoringMode::Vertex);
        assert_eq!(req.strategy, Strategy::LargestFirst);
        assert!(req.edges.is_empty());

        let req: ColorRequest = serde_json::from_str(
            r#"{"vertex_count": 3, "edges": [["A","B"]], "mode": "edge", "strategy": "smallest_last"}"#,
        )
        .unwrap();
        assert_eq!(req.edges, vec![("A".to_string(), "B".to_string())]);
        assert_eq!(req.strategy, Strategy::SmallestLast);
    }

    #[test]
    fn test_color_handler() {
        tokio_test::block_on(async {
            let req = request(3, &[("A", "B"), ("B", "C"), ("C", "A")], ColoringMode::Vertex);
            let response = color(State(state()), Json(req)).await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = body_json(response).await;
            assert_eq!(body["success"], true);
            assert_eq!(body["data"]["chromatic_number"], 3);
        });
    }

    #[test]
    fn test_color_handler_bad_request() {
        tokio_test::block_on(async {
            let req = request(0, &[], ColoringMode::Vertex);
            let response = color(State(state()), Json(req)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body = body_json(response).await;
            assert_eq!(body["success"], false);
        });
    }

    #[test]
    fn test_batch_handler() {
        tokio_test::block_on(async {
            let requests = vec![
                request(2, &[("A", "B")], ColoringMode::Vertex),
                request(3, &[("A", "B"), ("B", "C")], ColoringMode::Edge),
                request(0, &[], ColoringMode::Vertex),
            ];
            let response = color_batch(State(state()), Json(requests)).await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = body_json(response).await;
            let results = body["data"].as_array().unwrap();
            assert_eq!(results.len(), 3);
            assert_eq!(results[0]["data"]["chromatic_number"], 2);
            assert_eq!(results[1]["data"]["chromatic_index"], 2);
            assert_eq!(results[2]["success"], false);
        });
    }
}
