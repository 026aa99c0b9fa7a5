//! 通用类型定义

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 颜色编号（从 0 开始）
pub type ColorIndex = usize;

/// 单个图默认允许的最大顶点数（命令行和服务器共用）
pub const DEFAULT_MAX_VERTICES: usize = 10_000;

/// 单个请求默认允许的最大边数
pub const DEFAULT_MAX_EDGES: usize = 20_000;

/// 边着色时线图默认允许的最大边数
pub const DEFAULT_MAX_LINE_EDGES: usize = 1_000_000;

/// 着色模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColoringMode {
    /// 顶点着色，结果为色数
    Vertex,
    /// 边着色（线图上的顶点着色），结果为边色数
    Edge,
}

impl ColoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColoringMode::Vertex => "vertex",
            ColoringMode::Edge => "edge",
        }
    }

    /// 结果标量的名称
    pub fn measure_name(&self) -> &'static str {
        match self {
            ColoringMode::Vertex => "Chromatic Number",
            ColoringMode::Edge => "Chromatic Index",
        }
    }
}

impl Default for ColoringMode {
    fn default() -> Self {
        ColoringMode::Vertex
    }
}

impl fmt::Display for ColoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColoringMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vertex" | "v" | "node" => Ok(ColoringMode::Vertex),
            "edge" | "e" => Ok(ColoringMode::Edge),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}
