//! 训练数据相关的错误类型定义

use crate::nn::GraphError;
use thiserror::Error;

/// 训练数据相关错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    /// 没有任何样本
    #[error("数据集为空")]
    EmptyDataset,

    /// 样本长度不一致
    #[error("样本{index}的长度为{got}，期望{expected}")]
    ShapeMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    /// 输入与目标的样本数不一致
    #[error("输入有{inputs}个样本，目标却有{targets}个")]
    SampleCountMismatch { inputs: usize, targets: usize },

    /// 将样本前向传播到下一层时出错
    #[error("前向传播输入失败: {0}")]
    Propagation(#[from] GraphError),
}
