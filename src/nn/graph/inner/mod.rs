/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : GraphInner 网络结构图的底层实现
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 创建 + 层/连接的增查改
 * - describe.rs: summary
 */

mod core;
mod describe;

use super::types::{Connection, ConnectionId, LayerId, LayerNode};
use rand::rngs::StdRng;
use std::collections::HashMap;

/// 图的完整定义（核心实现）
///
/// 所有层与连接都归图所有（arena），网络只持有句柄。
/// 连接不会在网络层面登记，而是挂在两端的层上，由网络遍历层时按需收集。
pub struct GraphInner {
    pub(in crate::nn::graph) name: String,
    pub(in crate::nn::graph) layers: HashMap<LayerId, LayerNode>,
    pub(in crate::nn::graph) connections: HashMap<ConnectionId, Connection>,
    pub(in crate::nn::graph) next_layer_id: u64,
    pub(in crate::nn::graph) next_connection_id: u64,
    pub(in crate::nn::graph) next_network_id: u64,
    /// 图级别的随机数生成器（用于权重初始化、去噪自编码器的输入破坏等）
    /// None 表示使用默认的 thread_rng（非确定性）
    pub(in crate::nn::graph) rng: Option<StdRng>,
}

impl Default for GraphInner {
    fn default() -> Self {
        Self::new()
    }
}
