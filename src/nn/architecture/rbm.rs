/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 受限玻尔兹曼机（RBM）：一条可见层 -> 隐藏层的主连接，外加可选的可见/隐藏偏置连接
 */

use super::LayerwiseStage;
use crate::nn::graph::{ConnectionId, Graph, GraphError, Init, LayerId};
use crate::nn::network::NeuralNetwork;

#[derive(Clone)]
pub struct Rbm {
    network: NeuralNetwork,
    visible: LayerId,
    hidden: LayerId,
    main: ConnectionId,
    visible_bias: Option<(LayerId, ConnectionId)>,
    hidden_bias: Option<(LayerId, ConnectionId)>,
}

impl Rbm {
    /// 在已有的两个层之间建立 RBM。主连接权重按`Init::default()`初始化，偏置为0。
    pub fn new(
        graph: &Graph,
        visible: LayerId,
        hidden: LayerId,
        add_visible_bias: bool,
        add_hidden_bias: bool,
    ) -> Result<Self, GraphError> {
        Self::with_init(
            graph,
            visible,
            hidden,
            add_visible_bias,
            add_hidden_bias,
            &Init::default(),
        )
    }

    /// 同`new`，但指定主连接的初始化方式
    pub fn with_init(
        graph: &Graph,
        visible: LayerId,
        hidden: LayerId,
        add_visible_bias: bool,
        add_hidden_bias: bool,
        init: &Init,
    ) -> Result<Self, GraphError> {
        let main = graph.new_connection(visible, hidden, init)?;
        let mut network = NeuralNetwork::new(graph);
        network.add_connection(main)?;

        let visible_bias = if add_visible_bias {
            let (layer, connection) = graph.new_bias_connection(visible, None)?;
            network.add_connection(connection)?;
            Some((layer, connection))
        } else {
            None
        };
        let hidden_bias = if add_hidden_bias {
            let (layer, connection) = graph.new_bias_connection(hidden, None)?;
            network.add_connection(connection)?;
            Some((layer, connection))
        } else {
            None
        };

        Ok(Self {
            network,
            visible,
            hidden,
            main,
            visible_bias,
            hidden_bias,
        })
    }

    /// 新建两个层并在其间建立 RBM
    pub fn with_sizes(
        graph: &Graph,
        visible_size: usize,
        hidden_size: usize,
        add_bias: bool,
    ) -> Result<Self, GraphError> {
        let visible = graph.new_layer(visible_size, None)?;
        let hidden = graph.new_layer(hidden_size, None)?;
        Self::new(graph, visible, hidden, add_bias, add_bias)
    }

    pub const fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    pub const fn visible_layer(&self) -> LayerId {
        self.visible
    }

    pub const fn hidden_layer(&self) -> LayerId {
        self.hidden
    }

    pub const fn main_connection(&self) -> ConnectionId {
        self.main
    }

    pub fn visible_bias_connection(&self) -> Option<ConnectionId> {
        self.visible_bias.map(|(_, c)| c)
    }

    pub fn hidden_bias_connection(&self) -> Option<ConnectionId> {
        self.hidden_bias.map(|(_, c)| c)
    }

    pub fn visible_bias_layer(&self) -> Option<LayerId> {
        self.visible_bias.map(|(l, _)| l)
    }

    pub fn hidden_bias_layer(&self) -> Option<LayerId> {
        self.hidden_bias.map(|(l, _)| l)
    }
}

impl LayerwiseStage for Rbm {
    fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    fn visible_layer(&self) -> LayerId {
        self.visible
    }

    fn hidden_layer(&self) -> LayerId {
        self.hidden
    }

    fn encoding_connection(&self) -> ConnectionId {
        self.main
    }

    fn hidden_bias_connection(&self) -> Option<ConnectionId> {
        Rbm::hidden_bias_connection(self)
    }
}
