/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 全库通用的错误类型。
 *                 拓扑类问题（找不到输入/输出层、重复添加层）不走这里，而是以`Option`/`bool`就地返回；
 *                 这里只收录会中断训练的错误。
 */

use thiserror::Error;
mod ops;
pub use self::ops::*;

use crate::data::DataError;
use crate::nn::GraphError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 矩阵二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个矩阵的形状为{tensor1_shape:?}，第二个矩阵的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
}

/// 训练过程中的错误。除`Cancelled`外，任何一种出现在某一层的训练中都会终止整个逐层训练。
#[derive(Error, Debug)]
pub enum TrainingError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Data(#[from] DataError),

    /// 激活函数或权重更新产生了NaN/∞
    #[error("数值不稳定：{location}出现非有限值（NaN或∞）")]
    NumericInstability { location: String },

    #[error("配置解析失败：{0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("配置项`{name}`须{operator}{threshold}")]
    InvalidConfig {
        name: &'static str,
        operator: ComparisonOperator,
        threshold: f32,
    },

    #[error("输入形状{got:?}与可见层大小{expected}不符")]
    InputShapeMismatch { expected: usize, got: [usize; 2] },

    #[error("第{stage}层子网络没有对应的训练器")]
    MissingTrainer { stage: usize },

    /// 某一层训练失败，`source`为该层训练器报告的原始错误
    #[error("第{stage}层子网络训练失败：{source}")]
    StageFailed {
        stage: usize,
        #[source]
        source: Box<TrainingError>,
    },

    #[error("第{stage}层子网络的训练被取消")]
    Cancelled { stage: usize },
}

impl TrainingError {
    /// 出错（或被取消）的子网络序号
    pub fn failed_stage(&self) -> Option<usize> {
        match self {
            Self::StageFailed { stage, .. } | Self::Cancelled { stage } => Some(*stage),
            _ => None,
        }
    }

    /// 剥去`StageFailed`外壳后的原始错误
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::StageFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
