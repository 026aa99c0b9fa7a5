//! ChromaGraph CLI 工具
//!
//! 交互式命令行界面：添加顶点、添加边、选择着色方式

use chromagraph::algorithm::Strategy;
use chromagraph::cli::{CommandCompleter, CommandResult, Printer, Session};
use chromagraph::types::DEFAULT_MAX_VERTICES;
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chromagraph-cli")]
#[command(about = "ChromaGraph 命令行工具")]
#[command(version)]
struct Args {
    /// 初始排序策略
    #[arg(short, long, default_value = "largest_first")]
    strategy: Strategy,

    /// 允许的最大顶点数
    #[arg(long, default_value_t = DEFAULT_MAX_VERTICES)]
    max_vertices: usize,

    /// 关闭彩色输出
    #[arg(long)]
    no_color: bool,

    /// 执行以 ';' 分隔的命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,

    /// 历史记录文件（默认 ~/.chromagraph_history）
    #[arg(long)]
    history: Option<PathBuf>,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chromagraph={}", args.log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let mut session = Session::new(args.strategy, Printer::new(!args.no_color))
        .with_max_vertices(args.max_vertices);

    // 批量模式
    if let Some(script) = args.execute {
        for command in script.split(';') {
            if matches!(report(session.execute(command)), CommandResult::Exit) {
                break;
            }
        }
        return Ok(());
    }

    println!("{}", "ChromaGraph CLI - 无向图贪心着色".bold());
    println!("==================================");
    println!("输入 'help' 查看命令列表，'quit' 退出\n");

    let config = Config::builder().auto_add_history(true).build();
    let mut editor: Editor<CommandCompleter, DefaultHistory> = Editor::with_config(config)?;
    editor.set_helper(Some(CommandCompleter::new()));

    let history = args.history.or_else(default_history_path);
    if let Some(path) = &history {
        // 首次运行时文件不存在
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("chromagraph> ") {
            Ok(line) => {
                if matches!(report(session.execute(&line)), CommandResult::Exit) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("读取输入失败: {}", e);
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            tracing::warn!(error = %e, "保存历史记录失败");
        }
    }

    println!("再见！");
    Ok(())
}

/// 打印命令结果，原样返回
fn report(result: CommandResult) -> CommandResult {
    match &result {
        CommandResult::Message(msg) => println!("{}", msg),
        CommandResult::Error(err) => println!("{} {}", "错误:".red(), err),
        CommandResult::Continue | CommandResult::Exit => {}
    }
    result
}

fn default_history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".chromagraph_history"))
}
