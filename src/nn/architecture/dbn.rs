/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 深度信念网络（DBN）：按顺序堆叠的 RBM
 */

use super::{LayerwiseStage, Rbm, StackedNetwork, check_seams, check_sizes};
use crate::nn::graph::{Graph, GraphError, Init};
use crate::nn::network::NeuralNetwork;

/// DBN
///
/// 对外的层集合由各 RBM 的可见层、隐藏层与隐藏偏置层组成；
/// 可见偏置层只在各自的 RBM 内部可见（它们只在无监督预训练时有意义）。
#[derive(Clone)]
pub struct Dbn {
    network: NeuralNetwork,
    rbms: Vec<Rbm>,
}

impl Dbn {
    /// 用已经首尾相接的 RBM 组成 DBN
    pub fn new(graph: &Graph, rbms: Vec<Rbm>) -> Result<Self, GraphError> {
        check_seams(&rbms)?;
        let mut network = NeuralNetwork::new(graph);
        for rbm in &rbms {
            network.add_layer(rbm.visible_layer());
            network.add_layer(rbm.hidden_layer());
            if let Some(bias) = rbm.hidden_bias_layer() {
                network.add_layer(bias);
            }
        }
        Ok(Self { network, rbms })
    }

    /// 按层尺寸构建 DBN，如`[784, 500, 200]`得到2个 RBM
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
        let rbms = layers
            .windows(2)
            .map(|pair| Rbm::with_init(graph, pair[0], pair[1], add_bias, add_bias, init))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(graph, rbms)
    }

    pub fn rbms(&self) -> &[Rbm] {
        &self.rbms
    }

    pub fn first_rbm(&self) -> Option<&Rbm> {
        self.rbms.first()
    }

    pub fn last_rbm(&self) -> Option<&Rbm> {
        self.rbms.last()
    }
}

impl StackedNetwork for Dbn {
    type Stage = Rbm;

    fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    fn stages(&self) -> &[Rbm] {
        &self.rbms
    }
}
