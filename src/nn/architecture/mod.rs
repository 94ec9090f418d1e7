/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 可逐层预训练的网络结构：RBM、自编码器，以及由它们堆叠而成的 DBN、堆叠自编码器。
 *
 * 堆叠网络的相邻两个子网络共享接缝处的同一个层（前者的隐藏层 = 后者的可见层/输入层），
 * 这些层归 Graph 所有，各子网络只持有句柄。
 */

mod autoencoder;
mod dbn;
mod rbm;
mod sae;

pub use autoencoder::Autoencoder;
pub use dbn::Dbn;
pub use rbm::Rbm;
pub use sae::StackedAutoencoder;

use super::activation::Activation;
use super::graph::{ConnectionId, GraphError, LayerId, NetworkId};
use super::network::NeuralNetwork;
use crate::matrix::Matrix;

/// 堆叠网络中的一个可单独训练的子网络
pub trait LayerwiseStage {
    /// 子网络自身的网络图
    fn network(&self) -> &NeuralNetwork;

    /// 可见层（输入层），与上一个子网络的隐藏层共享
    fn visible_layer(&self) -> LayerId;

    /// 隐藏层，与下一个子网络的可见层共享
    fn hidden_layer(&self) -> LayerId;

    /// 可见层 -> 隐藏层 的连接（前向传播用）
    fn encoding_connection(&self) -> ConnectionId;

    /// 隐藏层的偏置连接
    fn hidden_bias_connection(&self) -> Option<ConnectionId>;

    fn id(&self) -> NetworkId {
        self.network().id()
    }

    /// 将按列排放的样本`input`前向传播到隐藏层：f(W·x + b_h)
    fn encode(&self, input: &Matrix, activation: Activation) -> Result<Matrix, GraphError> {
        let g = self.network().graph().inner();
        let weights = g.get_weights(self.encoding_connection())?;
        if weights.cols() != input.rows() {
            return Err(GraphError::ShapeMismatch {
                expected: vec![weights.cols(), input.cols()],
                got: input.shape().to_vec(),
                message: "输入的行数必须等于可见层大小".to_string(),
            });
        }
        let mut hidden = weights.mat_mul(input);
        if let Some(bias) = self.hidden_bias_connection() {
            hidden = hidden.add_column(g.get_weights(bias)?);
        }
        activation.apply_inplace(&mut hidden);
        Ok(hidden)
    }
}

/// 由若干子网络按顺序堆叠而成的复合网络
pub trait StackedNetwork {
    type Stage: LayerwiseStage;

    /// 复合网络对外可见的网络图（不含各子网络内部专用的层）
    fn network(&self) -> &NeuralNetwork;

    /// 按堆叠顺序排列的子网络
    fn stages(&self) -> &[Self::Stage];

    fn first_stage(&self) -> Option<&Self::Stage> {
        self.stages().first()
    }

    fn last_stage(&self) -> Option<&Self::Stage> {
        self.stages().last()
    }

    fn input_layer(&self) -> Option<LayerId> {
        self.network().input_layer()
    }

    fn output_layer(&self) -> Option<LayerId> {
        self.network().output_layer()
    }

    /// 根据网络句柄找到子网络的序号
    fn stage_index(&self, id: NetworkId) -> Option<usize> {
        self.stages().iter().position(|s| s.id() == id)
    }

    /// 将样本依次穿过所有子网络，得到最顶层隐藏层的表示。所有子网络用同一个激活函数。
    fn encode(&self, input: &Matrix, activation: Activation) -> Result<Matrix, GraphError> {
        self.encode_with(input, &vec![activation; self.stages().len()])
    }

    /// 同`encode`，但第i个子网络用`activations[i]`
    fn encode_with(&self, input: &Matrix, activations: &[Activation]) -> Result<Matrix, GraphError> {
        if activations.len() != self.stages().len() {
            return Err(GraphError::InvalidOperation(format!(
                "激活函数有{}个，子网络却有{}个",
                activations.len(),
                self.stages().len()
            )));
        }
        let mut current = input.clone();
        for (stage, &activation) in self.stages().iter().zip(activations) {
            current = stage.encode(&current, activation)?;
        }
        Ok(current)
    }
}

/// 尺寸列表至少要有2项才能组成一个子网络
fn check_sizes(sizes: &[usize]) -> Result<(), GraphError> {
    if sizes.len() < 2 {
        return Err(GraphError::InvalidOperation(format!(
            "堆叠网络至少需要2个层的尺寸，实际为{sizes:?}"
        )));
    }
    Ok(())
}

/// 相邻子网络必须共享接缝处的层
fn check_seams<S: LayerwiseStage>(stages: &[S]) -> Result<(), GraphError> {
    if stages.is_empty() {
        return Err(GraphError::InvalidOperation(
            "堆叠网络至少需要1个子网络".to_string(),
        ));
    }
    for (i, pair) in stages.windows(2).enumerate() {
        if pair[0].hidden_layer() != pair[1].visible_layer() {
            return Err(GraphError::InvalidOperation(format!(
                "第{i}个子网络的隐藏层{:?}与第{}个子网络的可见层{:?}不是同一个层",
                pair[0].hidden_layer(),
                i + 1,
                pair[1].visible_layer()
            )));
        }
    }
    Ok(())
}
