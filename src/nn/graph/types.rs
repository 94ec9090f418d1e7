/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : Graph 模块的类型定义：层、连接及其句柄
 */

use crate::matrix::Matrix;
use rand::RngCore;

/// 层句柄。同一个层可以同时出现在多个网络里（如DBN相邻两个RBM的接缝处），
/// 判断“是否是同一个层”只需比较句柄。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

/// 连接句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

/// 网络句柄，用于在逐层训练时将子网络与其训练器对应起来
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkId(pub u64);

/// 层的种类。拓扑推断只根据这个标签来区分偏置层，不依赖任何类型层级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerKind {
    /// 承载真实数据的层
    #[default]
    Real,
    /// 恒定输出为1的偏置层，只能作为连接的输入端
    Bias,
}

/// 图中的一个层（节点）
#[derive(Debug, Clone)]
pub struct LayerNode {
    pub(in crate::nn::graph) id: LayerId,
    pub(in crate::nn::graph) name: String,
    pub(in crate::nn::graph) kind: LayerKind,
    pub(in crate::nn::graph) size: usize,
    /// 以本层为任一端点的全部连接，按创建顺序排列
    pub(in crate::nn::graph) connections: Vec<ConnectionId>,
}

impl LayerNode {
    pub const fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn is_bias(&self) -> bool {
        self.kind == LayerKind::Bias
    }

    /// 神经元个数（偏置层恒为1）
    pub const fn size(&self) -> usize {
        self.size
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }
}

/// 两个层之间的有向带权连接。
///
/// 端点在创建后不可变；权重矩阵形状为[输出层大小, 输入层大小]，可由训练器就地修改。
#[derive(Debug, Clone)]
pub struct Connection {
    pub(in crate::nn::graph) id: ConnectionId,
    pub(in crate::nn::graph) input: LayerId,
    pub(in crate::nn::graph) output: LayerId,
    pub(in crate::nn::graph) weights: Matrix,
}

impl Connection {
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    pub const fn input_layer(&self) -> LayerId {
        self.input
    }

    pub const fn output_layer(&self) -> LayerId {
        self.output
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut Matrix {
        &mut self.weights
    }

    /// `layer`是否为本连接的某一端
    pub fn touches(&self, layer: LayerId) -> bool {
        self.input == layer || self.output == layer
    }
}

/// 连接权重的初始化策略
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    /// 全零
    Zeros,
    /// 常数初始化
    Constant(f32),
    /// [min, max]上的均匀分布
    Uniform { min: f32, max: f32 },
    /// 正态分布
    Normal { mean: f32, std: f32 },
    /// Xavier/Glorot 初始化（适用于 Sigmoid/Tanh）
    Xavier,
}

impl Default for Init {
    /// RBM的常见做法：N(0, 0.01)
    fn default() -> Self {
        Self::Normal {
            mean: 0.0,
            std: 0.01,
        }
    }
}

impl Init {
    /// 生成形状为[rows, cols]的初始权重
    pub fn generate_with_rng(&self, rows: usize, cols: usize, rng: &mut dyn RngCore) -> Matrix {
        match self {
            Self::Zeros => Matrix::zeros(rows, cols),
            Self::Constant(v) => Matrix::from_elem(rows, cols, *v),
            Self::Uniform { min, max } => Matrix::random_with_rng(*min, *max, rows, cols, rng),
            Self::Normal { mean, std } => Matrix::normal_with_rng(*mean, *std, rows, cols, rng),
            Self::Xavier => {
                let (fan_in, fan_out) = (cols, rows);
                let std = (2.0 / (fan_in + fan_out) as f32).sqrt();
                Matrix::normal_with_rng(0.0, std, rows, cols, rng)
            }
        }
    }

    /// 使用全局 RNG 生成
    pub fn generate(&self, rows: usize, cols: usize) -> Matrix {
        self.generate_with_rng(rows, cols, &mut rand::thread_rng())
    }
}
