/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 逐元素激活函数。可见层侧与隐藏层侧可以各自指定。
 */

use crate::matrix::Matrix;
use serde::{Deserialize, Serialize};

/// 激活函数
///
/// - `Sigmoid`: 1 / (1 + e^(-x))（默认）
/// - `Tanh`: (e^x - e^(-x)) / (e^x + e^(-x))
/// - `ReLU`: max(0, x)
/// - `SoftPlus`: ln(1 + e^x)
/// - `Identity`: x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Sigmoid,
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
    #[serde(rename = "softplus")]
    SoftPlus,
    Identity,
}

impl Activation {
    /// 对单个数求值
    pub fn value(self, x: f32) -> f32 {
        match self {
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Self::Tanh => x.tanh(),
            Self::ReLU => x.max(0.0),
            // x较大时ln(1+e^x)≈x，避免e^x溢出
            Self::SoftPlus => {
                if x > 20.0 {
                    x
                } else {
                    x.exp().ln_1p()
                }
            }
            Self::Identity => x,
        }
    }

    /// 用函数值y表示的导数 f'(x)
    pub fn derivative_from_output(self, y: f32) -> f32 {
        match self {
            Self::Sigmoid => y * (1.0 - y),
            Self::Tanh => 1.0 - y * y,
            Self::ReLU => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::SoftPlus => 1.0 - (-y).exp(),
            Self::Identity => 1.0,
        }
    }

    /// 逐元素作用于矩阵
    pub fn apply(self, x: &Matrix) -> Matrix {
        x.map(|v| self.value(v))
    }

    /// 逐元素就地作用
    pub fn apply_inplace(self, x: &mut Matrix) {
        x.map_inplace(|v| self.value(v));
    }

    /// 以输出矩阵计算逐元素导数
    pub fn derivative(self, output: &Matrix) -> Matrix {
        output.map(|y| self.derivative_from_output(y))
    }
}
