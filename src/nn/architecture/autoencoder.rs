/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 自编码器：输入层 -> 隐藏层 -> 重构输出层（与输入层同尺寸）
 */

use super::LayerwiseStage;
use crate::nn::graph::{ConnectionId, Graph, GraphError, Init, LayerId};
use crate::nn::network::NeuralNetwork;

#[derive(Clone)]
pub struct Autoencoder {
    network: NeuralNetwork,
    input: LayerId,
    hidden: LayerId,
    output: LayerId,
    encoder: ConnectionId,
    decoder: ConnectionId,
    hidden_bias: Option<(LayerId, ConnectionId)>,
    output_bias: Option<(LayerId, ConnectionId)>,
}

impl Autoencoder {
    /// 在已有的输入层与隐藏层上建立自编码器，重构输出层自动新建
    pub fn new(
        graph: &Graph,
        input: LayerId,
        hidden: LayerId,
        add_bias: bool,
    ) -> Result<Self, GraphError> {
        Self::with_init(graph, input, hidden, add_bias, &Init::default())
    }

    pub fn with_init(
        graph: &Graph,
        input: LayerId,
        hidden: LayerId,
        add_bias: bool,
        init: &Init,
    ) -> Result<Self, GraphError> {
        let output = graph.new_layer(graph.layer_size(input)?, None)?;
        let encoder = graph.new_connection(input, hidden, init)?;
        let decoder = graph.new_connection(hidden, output, init)?;

        let mut network = NeuralNetwork::new(graph);
        network.add_connection(encoder)?;
        network.add_connection(decoder)?;

        let (hidden_bias, output_bias) = if add_bias {
            let hidden_bias = graph.new_bias_connection(hidden, None)?;
            network.add_connection(hidden_bias.1)?;
            let output_bias = graph.new_bias_connection(output, None)?;
            network.add_connection(output_bias.1)?;
            (Some(hidden_bias), Some(output_bias))
        } else {
            (None, None)
        };

        Ok(Self {
            network,
            input,
            hidden,
            output,
            encoder,
            decoder,
            hidden_bias,
            output_bias,
        })
    }

    /// 新建输入层与隐藏层并建立自编码器
    pub fn with_sizes(
        graph: &Graph,
        input_size: usize,
        hidden_size: usize,
        add_bias: bool,
    ) -> Result<Self, GraphError> {
        let input = graph.new_layer(input_size, None)?;
        let hidden = graph.new_layer(hidden_size, None)?;
        Self::new(graph, input, hidden, add_bias)
    }

    pub const fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    pub const fn input_layer(&self) -> LayerId {
        self.input
    }

    pub const fn hidden_layer(&self) -> LayerId {
        self.hidden
    }

    /// 重构输出层，不属于堆叠网络对外的层集合
    pub const fn output_layer(&self) -> LayerId {
        self.output
    }

    pub const fn encoder_connection(&self) -> ConnectionId {
        self.encoder
    }

    pub const fn decoder_connection(&self) -> ConnectionId {
        self.decoder
    }

    pub fn hidden_bias_connection(&self) -> Option<ConnectionId> {
        self.hidden_bias.map(|(_, c)| c)
    }

    pub fn output_bias_connection(&self) -> Option<ConnectionId> {
        self.output_bias.map(|(_, c)| c)
    }

    pub fn hidden_bias_layer(&self) -> Option<LayerId> {
        self.hidden_bias.map(|(l, _)| l)
    }

    pub fn output_bias_layer(&self) -> Option<LayerId> {
        self.output_bias.map(|(l, _)| l)
    }
}

impl LayerwiseStage for Autoencoder {
    fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    fn visible_layer(&self) -> LayerId {
        self.input
    }

    fn hidden_layer(&self) -> LayerId {
        self.hidden
    }

    fn encoding_connection(&self) -> ConnectionId {
        self.encoder
    }

    fn hidden_bias_connection(&self) -> Option<ConnectionId> {
        Autoencoder::hidden_bias_connection(self)
    }
}
