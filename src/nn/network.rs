/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 神经网络 = 一组有序且不重复的层。
 *                 网络本身不登记连接：连接挂在层上，网络遍历自己的层按需收集，
 *                 并由此推断输入层、输出层。
 */

use super::graph::{ConnectionId, Graph, GraphError, LayerId, NetworkId};
use std::collections::HashSet;
use std::fmt::Write;

/// 保持插入顺序、不含重复元素的层集合
#[derive(Debug, Clone, Default)]
pub struct LayerSet {
    order: Vec<LayerId>,
    members: HashSet<LayerId>,
}

impl LayerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已存在则不插入，返回false
    pub fn insert(&mut self, layer: LayerId) -> bool {
        if self.members.insert(layer) {
            self.order.push(layer);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, layer: LayerId) -> bool {
        self.members.contains(&layer)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[LayerId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.order.iter().copied()
    }
}

/// 网络图
///
/// 一个层可以同时属于多个网络；在某个网络的视角下，
/// 只有两端都属于该网络的连接才是“可见”的。
#[derive(Clone)]
pub struct NeuralNetwork {
    id: NetworkId,
    graph: Graph,
    layers: LayerSet,
}

impl NeuralNetwork {
    pub fn new(graph: &Graph) -> Self {
        Self {
            id: graph.next_network_id(),
            graph: graph.clone(),
            layers: LayerSet::new(),
        }
    }

    /// 按给定顺序添加层，重复的层被忽略
    pub fn with_layers(graph: &Graph, layers: &[LayerId]) -> Self {
        let mut network = Self::new(graph);
        network.add_layers(layers.iter().copied());
        network
    }

    pub const fn id(&self) -> NetworkId {
        self.id
    }

    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// 本网络的层，按插入顺序
    pub fn layers(&self) -> &[LayerId] {
        self.layers.as_slice()
    }

    pub fn layers_count(&self) -> usize {
        self.layers.len()
    }

    pub fn contains_layer(&self, layer: LayerId) -> bool {
        self.layers.contains(layer)
    }

    // ========== 结构修改 ==========

    /// 添加层。层不属于本网络所在的图（相当于空层）或已存在时不做任何事并返回false。
    pub fn add_layer(&mut self, layer: LayerId) -> bool {
        if !self.graph.inner().has_layer(layer) {
            return false;
        }
        self.layers.insert(layer)
    }

    /// 批量添加层，重复的层被跳过
    pub fn add_layers(&mut self, layers: impl IntoIterator<Item = LayerId>) {
        for layer in layers {
            self.add_layer(layer);
        }
    }

    /// 添加连接 = 把连接的两端加入本网络（连接本身不在网络中登记）
    pub fn add_connection(&mut self, connection: ConnectionId) -> Result<(), GraphError> {
        let (input, output) = self.graph.connection_endpoints(connection)?;
        self.add_layer(input);
        self.add_layer(output);
        Ok(())
    }

    // ========== 拓扑推断 ==========

    /// `layer`在本网络视角下可见的连接：两端都属于本网络
    pub fn layer_connections(&self, layer: LayerId) -> Vec<ConnectionId> {
        let g = self.graph.inner();
        let Ok(all) = g.get_layer_connections(layer) else {
            return Vec::new();
        };
        all.iter()
            .copied()
            .filter(|&id| {
                g.get_connection(id).is_ok_and(|c| {
                    self.layers.contains(c.input_layer()) && self.layers.contains(c.output_layer())
                })
            })
            .collect()
    }

    /// 网络内的全部连接，每条只出现一次（按层的插入顺序、再按连接的创建顺序）
    pub fn connections(&self) -> Vec<ConnectionId> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for layer in self.layers.iter() {
            for connection in self.layer_connections(layer) {
                if seen.insert(connection) {
                    result.push(connection);
                }
            }
        }
        result
    }

    /// 输入层：按插入顺序第一个没有“真实”入边的层。
    /// 来自偏置层（或指向偏置层）的连接不算入边。找不到时返回None。
    pub fn input_layer(&self) -> Option<LayerId> {
        let g = self.graph.inner();
        self.layers.iter().find(|&layer| {
            !self.layer_connections(layer).into_iter().any(|id| {
                g.get_connection(id).is_ok_and(|c| {
                    c.output_layer() == layer
                        && !g.is_bias_layer(c.input_layer())
                        && !g.is_bias_layer(c.output_layer())
                })
            })
        })
    }

    /// 输出层：按插入顺序第一个没有任何出边的层。找不到时返回None。
    pub fn output_layer(&self) -> Option<LayerId> {
        let g = self.graph.inner();
        self.layers.iter().find(|&layer| {
            !self
                .layer_connections(layer)
                .into_iter()
                .any(|id| g.get_connection(id).is_ok_and(|c| c.input_layer() == layer))
        })
    }

    // ========== 描述 ==========

    pub fn summary(&self) {
        println!("{}", self.summary_string());
    }

    pub fn summary_string(&self) -> String {
        let mut out = String::new();
        let input = self.input_layer();
        let output = self.output_layer();
        let _ = writeln!(
            out,
            "网络{:?}（{}个层，{}个连接）",
            self.id,
            self.layers.len(),
            self.connections().len()
        );
        for layer in self.layers.iter() {
            let name = self
                .graph
                .layer_name(layer)
                .unwrap_or_else(|_| "?".to_string());
            let role = if Some(layer) == input {
                "输入"
            } else if Some(layer) == output {
                "输出"
            } else {
                ""
            };
            let _ = writeln!(out, "  {name:<16} {role}");
        }
        out
    }
}
