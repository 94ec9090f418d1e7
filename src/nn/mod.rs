/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 负责神经网络结构（层、连接、网络及其堆叠）的构建与拓扑推断
 */

mod activation;
mod architecture;
mod graph;
mod network;

pub use activation::Activation;
pub use architecture::{
    Autoencoder, Dbn, LayerwiseStage, Rbm, StackedAutoencoder, StackedNetwork,
};
pub use graph::{
    Connection, ConnectionId, Graph, GraphError, GraphInner, Init, LayerId, LayerKind, LayerNode,
    NetworkId,
};
pub use network::{LayerSet, NeuralNetwork};
