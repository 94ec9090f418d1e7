/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 自编码器训练器：以平方重构误差做反向传播，可选去噪（掩码破坏）与权重绑定
 */

use super::TrainerConfig;
use super::base::{LayerTrainer, Velocity, check_finite};
use crate::errors::TrainingError;
use crate::matrix::Matrix;
use crate::nn::{Autoencoder, GraphError, Init, LayerwiseStage, NetworkId};

/// 自编码器训练器
///
/// 对一个批次x（每列一个样本）：
/// - x̃ = x ⊙ mask（`corruption_level`为0时x̃ = x）
/// - h = f_h(W1·x̃ + b1)，y = f_v(W2·h + b2)
/// - 损失为 ½‖y - x‖²，按批次平均后做一步梯度下降（含动量与权重衰减）
///
/// `tied_weights`为true时W2恒等于W1ᵀ，W1的梯度是编码、解码两部分之和。
pub struct AutoencoderTrainer {
    autoencoder: Autoencoder,
    config: TrainerConfig,
    encoder_velocity: Velocity,
    decoder_velocity: Velocity,
    hidden_bias_velocity: Velocity,
    output_bias_velocity: Velocity,
}

struct Parameters {
    encoder: Matrix,
    decoder: Matrix,
    hidden_bias: Option<Matrix>,
    output_bias: Option<Matrix>,
}

impl AutoencoderTrainer {
    pub fn new(autoencoder: Autoencoder, config: TrainerConfig) -> Self {
        Self {
            autoencoder,
            config,
            encoder_velocity: Velocity::default(),
            decoder_velocity: Velocity::default(),
            hidden_bias_velocity: Velocity::default(),
            output_bias_velocity: Velocity::default(),
        }
    }

    pub const fn autoencoder(&self) -> &Autoencoder {
        &self.autoencoder
    }

    fn snapshot(&self) -> Result<Parameters, GraphError> {
        let graph = self.autoencoder.network().graph();
        let encoder = graph.weights(self.autoencoder.encoder_connection())?;
        let decoder = if self.config.tied_weights {
            encoder.transpose()
        } else {
            graph.weights(self.autoencoder.decoder_connection())?
        };
        let hidden_bias = match self.autoencoder.hidden_bias_connection() {
            Some(c) => Some(graph.weights(c)?),
            None => None,
        };
        let output_bias = match self.autoencoder.output_bias_connection() {
            Some(c) => Some(graph.weights(c)?),
            None => None,
        };
        Ok(Parameters {
            encoder,
            decoder,
            hidden_bias,
            output_bias,
        })
    }

    fn check_parameters(p: &Parameters, stage: &str) -> Result<(), TrainingError> {
        check_finite(&p.encoder, &format!("{stage}编码权重"))?;
        check_finite(&p.decoder, &format!("{stage}解码权重"))?;
        if let Some(bias) = &p.hidden_bias {
            check_finite(bias, &format!("{stage}隐藏层偏置"))?;
        }
        if let Some(bias) = &p.output_bias {
            check_finite(bias, &format!("{stage}重构输出层偏置"))?;
        }
        Ok(())
    }

    /// 按`corruption_level`随机把部分输入置零
    fn corrupt(&self, input: &Matrix) -> Matrix {
        let level = self.config.corruption_level;
        if level <= 0.0 {
            return input.clone();
        }
        let mask = self
            .autoencoder
            .network()
            .graph()
            .random_matrix(
                &Init::Uniform { min: 0.0, max: 1.0 },
                input.rows(),
                input.cols(),
            )
            .map(|u| if u < level { 0.0 } else { 1.0 });
        input.hadamard(&mask)
    }
}

impl LayerTrainer for AutoencoderTrainer {
    fn network_id(&self) -> NetworkId {
        self.autoencoder.id()
    }

    fn config(&self) -> &TrainerConfig {
        &self.config
    }

    fn visible_size(&self) -> Result<usize, TrainingError> {
        Ok(self
            .autoencoder
            .network()
            .graph()
            .layer_size(self.autoencoder.input_layer())?)
    }

    fn train_batch(&mut self, batch: &Matrix) -> Result<f32, TrainingError> {
        let p = self.snapshot()?;
        if batch.rows() != p.encoder.cols() {
            return Err(TrainingError::InputShapeMismatch {
                expected: p.encoder.cols(),
                got: batch.shape(),
            });
        }
        Self::check_parameters(&p, "更新前的")?;
        let n = batch.cols();
        let hidden_fn = self.config.hidden_activation;
        let output_fn = self.config.visible_activation;

        // 前向
        let corrupted = self.corrupt(batch);
        let mut hidden = p.encoder.mat_mul(&corrupted);
        if let Some(bias) = &p.hidden_bias {
            hidden = hidden.add_column(bias);
        }
        hidden_fn.apply_inplace(&mut hidden);
        check_finite(&hidden, "隐藏层激活")?;

        let mut output = p.decoder.mat_mul(&hidden);
        if let Some(bias) = &p.output_bias {
            output = output.add_column(bias);
        }
        output_fn.apply_inplace(&mut output);
        check_finite(&output, "重构输出层激活")?;

        // 反向
        let output_error = (&output - batch).hadamard(&output_fn.derivative(&output));
        let hidden_error = p
            .decoder
            .t_mat_mul(&output_error)
            .hadamard(&hidden_fn.derivative(&hidden));

        let scale = -self.config.learning_rate / n as f32;
        let decoder_update = output_error.mat_mul_t(&hidden) * scale;
        let mut encoder_update = hidden_error.mat_mul_t(&corrupted) * scale;

        let config = &self.config;
        let (encoder_delta, decoder_delta) = if config.tied_weights {
            encoder_update += &decoder_update.transpose();
            let delta = self.encoder_velocity.step(encoder_update, &p.encoder, config);
            (delta, None)
        } else {
            let encoder_delta = self.encoder_velocity.step(encoder_update, &p.encoder, config);
            let decoder_delta = self.decoder_velocity.step(decoder_update, &p.decoder, config);
            (encoder_delta, Some(decoder_delta))
        };
        check_finite(&encoder_delta, "编码权重更新")?;
        if let Some(delta) = &decoder_delta {
            check_finite(delta, "解码权重更新")?;
        }

        let hidden_bias_delta = match &p.hidden_bias {
            Some(bias) => {
                let update = hidden_error.sum_columns() * scale;
                let delta = self.hidden_bias_velocity.step(update, bias, config);
                check_finite(&delta, "隐藏层偏置更新")?;
                Some(delta)
            }
            None => None,
        };
        let output_bias_delta = match &p.output_bias {
            Some(bias) => {
                let update = output_error.sum_columns() * scale;
                let delta = self.output_bias_velocity.step(update, bias, config);
                check_finite(&delta, "重构输出层偏置更新")?;
                Some(delta)
            }
            None => None,
        };

        let encoder = &p.encoder + &encoder_delta;
        let decoder = match &decoder_delta {
            Some(delta) => &p.decoder + delta,
            None => encoder.transpose(),
        };
        let updated = Parameters {
            encoder,
            decoder,
            hidden_bias: p.hidden_bias.zip(hidden_bias_delta).map(|(b, d)| b + d),
            output_bias: p.output_bias.zip(output_bias_delta).map(|(b, d)| b + d),
        };
        Self::check_parameters(&updated, "更新后的")?;

        // 写回
        let ae = &self.autoencoder;
        let graph = ae.network().graph();
        graph.set_weights(ae.encoder_connection(), &updated.encoder)?;
        graph.set_weights(ae.decoder_connection(), &updated.decoder)?;
        if let (Some(c), Some(bias)) = (ae.hidden_bias_connection(), &updated.hidden_bias) {
            graph.set_weights(c, bias)?;
        }
        if let (Some(c), Some(bias)) = (ae.output_bias_connection(), &updated.output_bias) {
            graph.set_weights(c, bias)?;
        }

        Ok(output.squared_error(batch))
    }

    fn reset_state(&mut self) {
        self.encoder_velocity.reset();
        self.decoder_velocity.reset();
        self.hidden_bias_velocity.reset();
        self.output_bias_velocity.reset();
    }
}
