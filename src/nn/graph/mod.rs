/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : Graph 模块：网络结构图（层 + 连接）的核心实现
 *
 * 公开 API：
 * - `Graph`: 用户级句柄
 * - `GraphInner`: 底层实现
 * - `GraphError`: 错误类型
 */

mod error;
mod handle;
mod inner;
mod types;

pub use error::GraphError;
pub use handle::Graph;
pub use inner::GraphInner;
pub use types::{Connection, ConnectionId, Init, LayerId, LayerKind, LayerNode, NetworkId};
