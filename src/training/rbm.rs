/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : RBM 的对比散度训练器（CD-k / PCD）
 */

use super::TrainerConfig;
use super::base::{LayerTrainer, Velocity, check_finite};
use crate::errors::TrainingError;
use crate::matrix::Matrix;
use crate::nn::{GraphError, LayerwiseStage, NetworkId, Rbm};

/// 对比散度训练器
///
/// 对一个批次v0（每列一个样本，n个样本）：
/// - 正相：h0 = f_h(W·v0 + b_h)
/// - 负相：从h0（PCD 时为上一批次留下的链）出发做k步吉布斯采样得到v1、h1，
///   其中 v = f_v(Wᵀ·h + b_v)，h = f_h(W·v + b_h)
/// - ΔW = lr·(h0·v0ᵀ - h1·v1ᵀ)/n - decay·W + momentum·ΔW_prev
/// - Δb_v = lr·Σ(v0 - v1)/n ...，Δb_h = lr·Σ(h0 - h1)/n ...（动量与衰减同上）
///
/// 采样使用激活值本身（平均场），不做伯努利抽样，因此同样的输入总得到同样的结果。
pub struct CdTrainer {
    rbm: Rbm,
    config: TrainerConfig,
    weights_velocity: Velocity,
    visible_bias_velocity: Velocity,
    hidden_bias_velocity: Velocity,
    /// PCD 的持续链（隐藏层一侧）
    chain: Option<Matrix>,
}

/// 一次批次更新开始时的参数快照
struct Parameters {
    weights: Matrix,
    visible_bias: Option<Matrix>,
    hidden_bias: Option<Matrix>,
}

impl CdTrainer {
    pub fn new(rbm: Rbm, config: TrainerConfig) -> Self {
        Self {
            rbm,
            config,
            weights_velocity: Velocity::default(),
            visible_bias_velocity: Velocity::default(),
            hidden_bias_velocity: Velocity::default(),
            chain: None,
        }
    }

    pub const fn rbm(&self) -> &Rbm {
        &self.rbm
    }

    /// 当前的 PCD 链，未启用`persistent`或尚未训练时为`None`
    pub fn persistent_chain(&self) -> Option<&Matrix> {
        self.chain.as_ref()
    }

    fn snapshot(&self) -> Result<Parameters, GraphError> {
        let graph = self.rbm.network().graph();
        let weights = graph.weights(self.rbm.main_connection())?;
        let visible_bias = match self.rbm.visible_bias_connection() {
            Some(c) => Some(graph.weights(c)?),
            None => None,
        };
        let hidden_bias = match self.rbm.hidden_bias_connection() {
            Some(c) => Some(graph.weights(c)?),
            None => None,
        };
        Ok(Parameters {
            weights,
            visible_bias,
            hidden_bias,
        })
    }

    /// 参数中已有的∞经过 sigmoid 会变成有限的0/1，只查激活值发现不了
    fn check_parameters(p: &Parameters, stage: &str) -> Result<(), TrainingError> {
        check_finite(&p.weights, &format!("{stage}主连接权重"))?;
        if let Some(bias) = &p.visible_bias {
            check_finite(bias, &format!("{stage}可见层偏置"))?;
        }
        if let Some(bias) = &p.hidden_bias {
            check_finite(bias, &format!("{stage}隐藏层偏置"))?;
        }
        Ok(())
    }

    /// 可见层 -> 隐藏层
    fn propagate_up(&self, p: &Parameters, visible: &Matrix) -> Matrix {
        let mut hidden = p.weights.mat_mul(visible);
        if let Some(bias) = &p.hidden_bias {
            hidden = hidden.add_column(bias);
        }
        self.config.hidden_activation.apply_inplace(&mut hidden);
        hidden
    }

    /// 隐藏层 -> 可见层
    fn propagate_down(&self, p: &Parameters, hidden: &Matrix) -> Matrix {
        let mut visible = p.weights.t_mat_mul(hidden);
        if let Some(bias) = &p.visible_bias {
            visible = visible.add_column(bias);
        }
        self.config.visible_activation.apply_inplace(&mut visible);
        visible
    }
}

impl LayerTrainer for CdTrainer {
    fn network_id(&self) -> NetworkId {
        self.rbm.id()
    }

    fn config(&self) -> &TrainerConfig {
        &self.config
    }

    fn visible_size(&self) -> Result<usize, TrainingError> {
        Ok(self
            .rbm
            .network()
            .graph()
            .layer_size(self.rbm.visible_layer())?)
    }

    fn train_batch(&mut self, batch: &Matrix) -> Result<f32, TrainingError> {
        let p = self.snapshot()?;
        if batch.rows() != p.weights.cols() {
            return Err(TrainingError::InputShapeMismatch {
                expected: p.weights.cols(),
                got: batch.shape(),
            });
        }
        Self::check_parameters(&p, "更新前的")?;
        let n = batch.cols();

        // 正相
        let h0 = self.propagate_up(&p, batch);
        check_finite(&h0, "正相隐藏层激活")?;

        // 负相
        let start = match self.chain.take() {
            Some(chain) if self.config.persistent && chain.cols() == n => chain,
            _ => h0.clone(),
        };
        let mut v1 = self.propagate_down(&p, &start);
        let mut h1 = self.propagate_up(&p, &v1);
        for _ in 1..self.config.gibbs_steps {
            v1 = self.propagate_down(&p, &h1);
            h1 = self.propagate_up(&p, &v1);
        }
        check_finite(&v1, "负相可见层激活")?;
        check_finite(&h1, "负相隐藏层激活")?;

        // 先算出全部更新量并检查，再一次性写回
        let scale = self.config.learning_rate / n as f32;
        let weights_update = (h0.mat_mul_t(batch) - h1.mat_mul_t(&v1)) * scale;
        let weights_delta = self
            .weights_velocity
            .step(weights_update, &p.weights, &self.config);
        check_finite(&weights_delta, "主连接权重更新")?;

        let visible_bias_delta = match &p.visible_bias {
            Some(bias) => {
                let update = (batch - &v1).sum_columns() * scale;
                let delta = self.visible_bias_velocity.step(update, bias, &self.config);
                check_finite(&delta, "可见层偏置更新")?;
                Some(delta)
            }
            None => None,
        };
        let hidden_bias_delta = match &p.hidden_bias {
            Some(bias) => {
                let update = (&h0 - &h1).sum_columns() * scale;
                let delta = self.hidden_bias_velocity.step(update, bias, &self.config);
                check_finite(&delta, "隐藏层偏置更新")?;
                Some(delta)
            }
            None => None,
        };

        let updated = Parameters {
            weights: &p.weights + &weights_delta,
            visible_bias: p.visible_bias.zip(visible_bias_delta).map(|(b, d)| b + d),
            hidden_bias: p.hidden_bias.zip(hidden_bias_delta).map(|(b, d)| b + d),
        };
        Self::check_parameters(&updated, "更新后的")?;

        let graph = self.rbm.network().graph();
        graph.set_weights(self.rbm.main_connection(), &updated.weights)?;
        if let (Some(c), Some(bias)) = (self.rbm.visible_bias_connection(), &updated.visible_bias) {
            graph.set_weights(c, bias)?;
        }
        if let (Some(c), Some(bias)) = (self.rbm.hidden_bias_connection(), &updated.hidden_bias) {
            graph.set_weights(c, bias)?;
        }

        if self.config.persistent {
            self.chain = Some(h1);
        }
        Ok(batch.squared_error(&v1))
    }

    fn reset_state(&mut self) {
        self.weights_velocity.reset();
        self.visible_bias_velocity.reset();
        self.hidden_bias_velocity.reset();
        self.chain = None;
    }
}
