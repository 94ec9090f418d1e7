/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 堆叠自编码器：按顺序堆叠的自编码器
 */

use super::{Autoencoder, LayerwiseStage, StackedNetwork, check_seams, check_sizes};
use crate::nn::graph::{Graph, GraphError, Init};
use crate::nn::network::NeuralNetwork;

/// 堆叠自编码器
///
/// 对外的层集合由各自编码器的输入层、隐藏层与隐藏偏置层组成，
/// 重构输出层及其偏置层只属于各自的自编码器。
#[derive(Clone)]
pub struct StackedAutoencoder {
    network: NeuralNetwork,
    autoencoders: Vec<Autoencoder>,
}

impl StackedAutoencoder {
    pub fn new(graph: &Graph, autoencoders: Vec<Autoencoder>) -> Result<Self, GraphError> {
        check_seams(&autoencoders)?;
        let mut network = NeuralNetwork::new(graph);
        for ae in &autoencoders {
            network.add_layer(ae.input_layer());
            network.add_layer(ae.hidden_layer());
            if let Some(bias) = ae.hidden_bias_layer() {
                network.add_layer(bias);
            }
        }
        Ok(Self {
            network,
            autoencoders,
        })
    }

    /// 按层尺寸构建，如`[5, 4, 3]`得到2个自编码器
    pub fn from_sizes(graph: &Graph, sizes: &[usize], add_bias: bool) -> Result<Self, GraphError> {
        Self::from_sizes_with_init(graph, sizes, add_bias, &Init::default())
    }

    pub fn from_sizes_with_init(
        graph: &Graph,
        sizes: &[usize],
        add_bias: bool,
        init: &Init,
    ) -> Result<Self, GraphError> {
        check_sizes(sizes)?;
        let layers = sizes
            .iter()
            .map(|&size| graph.new_layer(size, None))
            .collect::<Result<Vec<_>, _>>()?;
        let autoencoders = layers
            .windows(2)
            .map(|pair| Autoencoder::with_init(graph, pair[0], pair[1], add_bias, init))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(graph, autoencoders)
    }

    pub fn autoencoders(&self) -> &[Autoencoder] {
        &self.autoencoders
    }
}

impl StackedNetwork for StackedAutoencoder {
    type Stage = Autoencoder;

    fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    fn stages(&self) -> &[Autoencoder] {
        &self.autoencoders
    }
}
