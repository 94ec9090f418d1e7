/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : Graph 句柄（用户级 API）
 */

use super::error::GraphError;
use super::inner::GraphInner;
use super::types::{ConnectionId, Init, LayerId, NetworkId};
use crate::matrix::Matrix;
use std::cell::RefCell;
use std::rc::Rc;

/// Graph - 网络结构图句柄
///
/// # 设计原则
/// - 是 `Rc<RefCell<GraphInner>>` 的薄封装
/// - Clone 语义：多个 Graph 引用同一个 GraphInner，
///   DBN 及其各个 RBM 因此能共享接缝处的同一个层
/// - 层与连接归图所有，网络与训练器只持有句柄
#[derive(Clone)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    // ==================== 创建 ====================

    /// 创建新图
    pub fn new() -> Self {
        Self::from_inner(GraphInner::new())
    }

    /// 创建带种子的图（用于确定性的权重初始化与训练）
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_inner(GraphInner::new_with_seed(seed))
    }

    /// 从现有 GraphInner 创建句柄
    pub fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// 获取内部 GraphInner 的不可变引用
    pub fn inner(&self) -> std::cell::Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    /// 获取内部 GraphInner 的可变引用
    pub fn inner_mut(&self) -> std::cell::RefMut<'_, GraphInner> {
        self.inner.borrow_mut()
    }

    /// 两个句柄是否指向同一张图
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ==================== 层与连接 ====================

    /// 新建承载数据的层
    pub fn new_layer(&self, size: usize, name: Option<&str>) -> Result<LayerId, GraphError> {
        self.inner.borrow_mut().new_layer(size, name)
    }

    /// 新建偏置层
    pub fn new_bias_layer(&self, name: Option<&str>) -> Result<LayerId, GraphError> {
        self.inner.borrow_mut().new_bias_layer(name)
    }

    /// 新建连接 `input -> output`
    pub fn new_connection(
        &self,
        input: LayerId,
        output: LayerId,
        init: &Init,
    ) -> Result<ConnectionId, GraphError> {
        self.inner.borrow_mut().new_connection(input, output, init)
    }

    /// 为`target`新建偏置层及偏置连接
    pub fn new_bias_connection(
        &self,
        target: LayerId,
        name: Option<&str>,
    ) -> Result<(LayerId, ConnectionId), GraphError> {
        self.inner.borrow_mut().new_bias_connection(target, name)
    }

    pub fn is_bias_layer(&self, id: LayerId) -> bool {
        self.inner.borrow().is_bias_layer(id)
    }

    pub fn layer_size(&self, id: LayerId) -> Result<usize, GraphError> {
        self.inner.borrow().get_layer_size(id)
    }

    pub fn layer_name(&self, id: LayerId) -> Result<String, GraphError> {
        Ok(self.inner.borrow().get_layer(id)?.name().to_string())
    }

    /// 连接的两端：（输入层，输出层）
    pub fn connection_endpoints(&self, id: ConnectionId) -> Result<(LayerId, LayerId), GraphError> {
        let g = self.inner.borrow();
        let c = g.get_connection(id)?;
        Ok((c.input_layer(), c.output_layer()))
    }

    // ==================== 权重读写 ====================

    /// 权重矩阵的拷贝
    pub fn weights(&self, id: ConnectionId) -> Result<Matrix, GraphError> {
        Ok(self.inner.borrow().get_weights(id)?.clone())
    }

    pub fn set_weights(&self, id: ConnectionId, weights: &Matrix) -> Result<(), GraphError> {
        self.inner.borrow_mut().set_weights(id, weights)
    }

    pub fn get_weight(&self, id: ConnectionId, row: usize, col: usize) -> Result<f32, GraphError> {
        let g = self.inner.borrow();
        let weights = g.get_weights(id)?;
        Self::check_index(id, weights, row, col)?;
        Ok(weights.get(row, col))
    }

    pub fn set_weight(
        &self,
        id: ConnectionId,
        row: usize,
        col: usize,
        value: f32,
    ) -> Result<(), GraphError> {
        let mut g = self.inner.borrow_mut();
        let weights = g.get_weights_mut(id)?;
        Self::check_index(id, weights, row, col)?;
        weights.set(row, col, value);
        Ok(())
    }

    /// 在闭包内就地修改权重
    pub fn update_weights<T>(
        &self,
        id: ConnectionId,
        f: impl FnOnce(&mut Matrix) -> T,
    ) -> Result<T, GraphError> {
        let mut g = self.inner.borrow_mut();
        Ok(f(g.get_weights_mut(id)?))
    }

    // ==================== 其他 ====================

    pub fn set_seed(&self, seed: u64) {
        self.inner.borrow_mut().set_seed(seed);
    }

    pub fn summary(&self) {
        self.inner.borrow().summary();
    }

    pub(crate) fn next_network_id(&self) -> NetworkId {
        self.inner.borrow_mut().next_network_id()
    }

    /// 用图的随机数生成器生成矩阵（如去噪自编码器的破坏掩码）
    pub(crate) fn random_matrix(&self, init: &Init, rows: usize, cols: usize) -> Matrix {
        self.inner
            .borrow_mut()
            .with_rng(|rng| init.generate_with_rng(rows, cols, rng))
    }

    fn check_index(
        id: ConnectionId,
        weights: &Matrix,
        row: usize,
        col: usize,
    ) -> Result<(), GraphError> {
        if row >= weights.rows() || col >= weights.cols() {
            return Err(GraphError::InvalidOperation(format!(
                "索引({row}, {col})超出连接{id:?}的权重形状{:?}",
                weights.shape()
            )));
        }
        Ok(())
    }
}
