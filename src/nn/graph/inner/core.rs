/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : GraphInner 核心操作
 */

use super::super::error::GraphError;
use super::super::types::{Connection, ConnectionId, Init, LayerId, LayerKind, LayerNode, NetworkId};
use super::GraphInner;
use crate::matrix::Matrix;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashMap;

impl GraphInner {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    /// 创建一个带固定种子的图（确保可重复性）
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_name_and_seed("default_graph", seed)
    }

    /// 创建一个带名称和固定种子的图
    pub fn with_name_and_seed(name: &str, seed: u64) -> Self {
        let mut graph = Self::with_name(name);
        graph.rng = Some(StdRng::seed_from_u64(seed));
        graph
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            layers: HashMap::new(),
            connections: HashMap::new(),
            next_layer_id: 0,
            next_connection_id: 0,
            next_network_id: 0,
            rng: None,
        }
    }

    // ========== 基础访问器 ==========

    /// 设置/重置图的随机种子
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Some(StdRng::seed_from_u64(seed));
    }

    /// 检查图是否有固定种子
    pub const fn has_seed(&self) -> bool {
        self.rng.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers_count(&self) -> usize {
        self.layers.len()
    }

    pub fn connections_count(&self) -> usize {
        self.connections.len()
    }

    pub fn has_layer(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    pub fn get_layer(&self, id: LayerId) -> Result<&LayerNode, GraphError> {
        self.layers.get(&id).ok_or(GraphError::LayerNotFound(id))
    }

    pub fn get_connection(&self, id: ConnectionId) -> Result<&Connection, GraphError> {
        self.connections
            .get(&id)
            .ok_or(GraphError::ConnectionNotFound(id))
    }

    pub fn get_connection_mut(&mut self, id: ConnectionId) -> Result<&mut Connection, GraphError> {
        self.connections
            .get_mut(&id)
            .ok_or(GraphError::ConnectionNotFound(id))
    }

    /// 不存在的层视为非偏置层
    pub fn is_bias_layer(&self, id: LayerId) -> bool {
        self.layers.get(&id).is_some_and(LayerNode::is_bias)
    }

    pub fn get_layer_size(&self, id: LayerId) -> Result<usize, GraphError> {
        Ok(self.get_layer(id)?.size())
    }

    /// 以`id`为端点的全部连接（不区分网络）
    pub fn get_layer_connections(&self, id: LayerId) -> Result<&[ConnectionId], GraphError> {
        Ok(self.get_layer(id)?.connections())
    }

    pub fn get_weights(&self, id: ConnectionId) -> Result<&Matrix, GraphError> {
        Ok(self.get_connection(id)?.weights())
    }

    pub fn get_weights_mut(&mut self, id: ConnectionId) -> Result<&mut Matrix, GraphError> {
        Ok(self.get_connection_mut(id)?.weights_mut())
    }

    /// 整体替换连接的权重，形状必须与原权重一致
    pub fn set_weights(&mut self, id: ConnectionId, weights: &Matrix) -> Result<(), GraphError> {
        let current = self.get_weights_mut(id)?;
        if !current.is_same_shape(weights) {
            return Err(GraphError::ShapeMismatch {
                expected: current.shape().to_vec(),
                got: weights.shape().to_vec(),
                message: format!("连接{id:?}的权重形状不可改变"),
            });
        }
        *current = weights.clone();
        Ok(())
    }

    // ========== 新建层与连接 ==========

    /// 新建一个承载数据的层
    pub fn new_layer(&mut self, size: usize, name: Option<&str>) -> Result<LayerId, GraphError> {
        if size == 0 {
            return Err(GraphError::InvalidOperation(
                "层的神经元个数必须大于0".to_string(),
            ));
        }
        self.add_layer_node(LayerKind::Real, size, name)
    }

    /// 新建一个偏置层（恒定输出1，大小固定为1）
    pub fn new_bias_layer(&mut self, name: Option<&str>) -> Result<LayerId, GraphError> {
        self.add_layer_node(LayerKind::Bias, 1, name)
    }

    /// 新建`input -> output`的连接，权重形状为[output大小, input大小]
    pub fn new_connection(
        &mut self,
        input: LayerId,
        output: LayerId,
        init: &Init,
    ) -> Result<ConnectionId, GraphError> {
        let rows = self.get_layer_size(output)?;
        let cols = self.get_layer_size(input)?;
        if input == output {
            return Err(GraphError::InvalidOperation(format!(
                "连接的两端不能是同一个层{input:?}"
            )));
        }
        if self.is_bias_layer(output) {
            return Err(GraphError::InvalidOperation(format!(
                "偏置层{output:?}只能作为连接的输入端"
            )));
        }

        let weights = self.with_rng(|rng| init.generate_with_rng(rows, cols, rng));
        let id = ConnectionId(self.next_connection_id);
        self.next_connection_id += 1;
        self.connections.insert(
            id,
            Connection {
                id,
                input,
                output,
                weights,
            },
        );
        for layer in [input, output] {
            if let Some(node) = self.layers.get_mut(&layer) {
                node.connections.push(id);
            }
        }
        Ok(id)
    }

    /// 为偏置层与`target`建立偏置连接，返回（偏置层，连接）。偏置权重初始化为0。
    pub fn new_bias_connection(
        &mut self,
        target: LayerId,
        name: Option<&str>,
    ) -> Result<(LayerId, ConnectionId), GraphError> {
        self.get_layer(target)?;
        let bias = self.new_bias_layer(name)?;
        let connection = self.new_connection(bias, target, &Init::Zeros)?;
        Ok((bias, connection))
    }

    // ========== 内部工具 ==========

    pub(crate) fn next_network_id(&mut self) -> NetworkId {
        let id = NetworkId(self.next_network_id);
        self.next_network_id += 1;
        id
    }

    /// 使用图的随机数生成器（未设种子时用 thread_rng）
    pub(crate) fn with_rng<T>(&mut self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        match self.rng.as_mut() {
            Some(rng) => f(rng),
            None => f(&mut rand::thread_rng()),
        }
    }

    fn add_layer_node(
        &mut self,
        kind: LayerKind,
        size: usize,
        name: Option<&str>,
    ) -> Result<LayerId, GraphError> {
        let id = LayerId(self.next_layer_id);
        let name = match name {
            Some(name) => name.to_string(),
            None => match kind {
                LayerKind::Real => format!("Layer:{}", id.0),
                LayerKind::Bias => format!("Bias:{}", id.0),
            },
        };
        if self.layers.values().any(|l| l.name == name) {
            return Err(GraphError::DuplicateLayerName(name));
        }

        self.next_layer_id += 1;
        self.layers.insert(
            id,
            LayerNode {
                id,
                name,
                kind,
                size,
                connections: Vec::new(),
            },
        );
        Ok(id)
    }
}
