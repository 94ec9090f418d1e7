/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : Graph 模块的错误类型
 */

use super::types::{ConnectionId, LayerId};
use thiserror::Error;

/// Graph 操作错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("未找到层{0:?}")]
    LayerNotFound(LayerId),
    #[error("未找到连接{0:?}")]
    ConnectionNotFound(ConnectionId),
    #[error("无效操作：{0}")]
    InvalidOperation(String),
    #[error("形状不匹配：期望{expected:?}，实际{got:?}（{message}）")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    #[error("层名称`{0}`已存在")]
    DuplicateLayerName(String),
}
