//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    UnknownVertex(String),

    #[error("边已存在: {0}")]
    DuplicateEdge(String),

    #[error("不允许自环: {0}")]
    SelfLoop(String),

    #[error("无效的边格式: {0} (应为 A-B)")]
    InvalidEdgeSpec(String),

    #[error("无效的顶点数量: {0}")]
    InvalidVertexCount(String),

    #[error("图规模超过上限: {0}")]
    GraphTooLarge(String),

    #[error("无效的着色模式: {0} (可选 vertex 或 edge)")]
    InvalidMode(String),

    #[error("未知的排序策略: {0}")]
    UnknownStrategy(String),

    #[error("服务器错误: {0}")]
    ServerError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl Error {
    /// 图存储拒绝的插入操作（存储保持不变，可继续输入）
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnknownVertex(_)
                | Error::DuplicateEdge(_)
                | Error::SelfLoop(_)
                | Error::InvalidEdgeSpec(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(Error::DuplicateEdge("A-B".into()).is_recoverable());
        assert!(Error::UnknownVertex("X".into()).is_recoverable());
        assert!(!Error::InternalError("boom".into()).is_recoverable());
        assert!(!Error::GraphTooLarge("10 条边".into()).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let e = Error::DuplicateEdge("A-B".to_string());
        assert_eq!(e.to_string(), "边已存在: A-B");
    }
}
