//! ChromaGraph 服务器入口
//!
//! 启动 HTTP API 服务器

use chromagraph::server::{start_server, ServerConfig};
use chromagraph::types::{DEFAULT_MAX_EDGES, DEFAULT_MAX_LINE_EDGES, DEFAULT_MAX_VERTICES};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chromagraph-server")]
#[command(about = "ChromaGraph HTTP API 服务器")]
#[command(version)]
struct Args {
    /// 监听地址
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// 监听端口
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// 单个请求允许的最大顶点数
    #[arg(long, default_value_t = DEFAULT_MAX_VERTICES)]
    max_vertices: usize,

    /// 单个请求允许的最大边数
    #[arg(long, default_value_t = DEFAULT_MAX_EDGES)]
    max_edges: usize,

    /// 边着色时线图允许的最大边数
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_EDGES)]
    max_line_edges: usize,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chromagraph={}", args.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        version = chromagraph::VERSION,
        max_vertices = args.max_vertices,
        max_edges = args.max_edges,
        max_line_edges = args.max_line_edges,
        "ChromaGraph - 无向图贪心着色服务"
    );

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        max_vertices: args.max_vertices,
        max_edges: args.max_edges,
        max_line_edges: args.max_line_edges,
    };

    start_server(config).await?;

    Ok(())
}
