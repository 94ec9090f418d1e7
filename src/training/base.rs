/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 单个子网络训练器的公共部分：trait、训练统计、取批次、动量状态
 */

use super::{AutoencoderTrainer, CdTrainer, TrainerConfig};
use crate::data::{DataError, TrainingInputProvider};
use crate::errors::TrainingError;
use crate::matrix::Matrix;
use crate::nn::NetworkId;
use enum_dispatch::enum_dispatch;

/// 逐层训练中可用的各类训练器
#[enum_dispatch]
pub enum StageTrainer {
    Cd(CdTrainer),
    Autoencoder(AutoencoderTrainer),
}

/// 负责训练一个子网络（RBM 或自编码器）的训练器
#[enum_dispatch(StageTrainer)]
pub trait LayerTrainer {
    /// 被训练的子网络
    fn network_id(&self) -> NetworkId;

    fn config(&self) -> &TrainerConfig;

    /// 可见层（输入层）的大小，即每个样本的长度
    fn visible_size(&self) -> Result<usize, TrainingError>;

    /// 用一个批次（每列一个样本）更新一次参数，返回该批次的重构误差（平方误差之和）
    fn train_batch(&mut self, batch: &Matrix) -> Result<f32, TrainingError>;

    /// 清空动量、PCD 链等跨批次的状态
    fn reset_state(&mut self);

    /// 按配置跑完全部 epoch。每个 epoch 开始时`reset`提供器。
    /// 每次调用都从干净的动量与 PCD 链开始，不沿用上一次调用留下的状态。
    ///
    /// `should_stop`在每个批次之前被询问，返回true时提前结束，
    /// 此时返回的统计中`completed`为false。
    fn train(
        &mut self,
        provider: &mut dyn TrainingInputProvider,
        should_stop: &dyn Fn() -> bool,
    ) -> Result<TrainingStats, TrainingError> {
        let config = self.config().clone();
        config.validate()?;
        let visible_size = self.visible_size()?;
        self.reset_state();

        let mut stats = TrainingStats::default();
        for epoch in 0..config.epochs {
            provider.reset();
            let mut epoch_error = 0.0;
            let mut epoch_samples = 0;
            loop {
                if should_stop() {
                    return Ok(stats);
                }
                let Some(batch) = next_batch(provider, config.batch_size, visible_size)? else {
                    break;
                };
                epoch_error += self.train_batch(&batch)?;
                epoch_samples += batch.cols();
                stats.batches += 1;
            }
            if epoch_samples == 0 {
                return Err(DataError::EmptyDataset.into());
            }

            stats.samples += epoch_samples;
            stats.epochs_completed += 1;
            let mean_error = epoch_error / epoch_samples as f32;
            stats.reconstruction_errors.push(mean_error);
            if config.verbose {
                println!(
                    "[{:?}] epoch {}/{}：样本数 {}，平均重构误差 {:.6}",
                    self.network_id(),
                    epoch + 1,
                    config.epochs,
                    epoch_samples,
                    mean_error
                );
            }
        }
        stats.completed = true;
        Ok(stats)
    }
}

/// 一个子网络的训练统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingStats {
    pub epochs_completed: usize,
    pub batches: usize,
    /// 所有 epoch 累计处理过的样本数
    pub samples: usize,
    /// 每个 epoch 的平均（每样本）重构误差
    pub reconstruction_errors: Vec<f32>,
    /// 是否跑完了全部 epoch（被取消时为false）
    pub completed: bool,
}

impl TrainingStats {
    pub fn last_error(&self) -> Option<f32> {
        self.reconstruction_errors.last().copied()
    }
}

/// 从提供器取至多`batch_size`个样本，拼成形状为[visible_size, n]的矩阵。
/// 提供器已取完时返回`None`。
pub(crate) fn next_batch(
    provider: &mut dyn TrainingInputProvider,
    batch_size: usize,
    visible_size: usize,
) -> Result<Option<Matrix>, TrainingError> {
    let mut columns = Vec::with_capacity(batch_size);
    while columns.len() < batch_size {
        let Some(sample) = provider.next_input()? else {
            break;
        };
        let input = sample.input();
        if input.cols() != 1 || input.rows() != visible_size {
            return Err(TrainingError::InputShapeMismatch {
                expected: visible_size,
                got: input.shape(),
            });
        }
        columns.push(input.clone());
    }
    if columns.is_empty() {
        return Ok(None);
    }

    let mut batch = Matrix::zeros(visible_size, columns.len());
    for (c, column) in columns.iter().enumerate() {
        batch.set_column(c, column);
    }
    Ok(Some(batch))
}

/// 出现NaN/∞即报错
pub(crate) fn check_finite(matrix: &Matrix, location: &str) -> Result<(), TrainingError> {
    if matrix.is_finite() {
        Ok(())
    } else {
        Err(TrainingError::NumericInstability {
            location: location.to_string(),
        })
    }
}

/// 一个参数（权重矩阵或偏置列向量）的上一步更新量，用于动量项
#[derive(Debug, Clone, Default)]
pub(crate) struct Velocity {
    previous: Option<Matrix>,
}

impl Velocity {
    /// Δ = -lr·∇ - decay·θ + momentum·Δ_prev
    ///
    /// `update`即 -lr·∇（已按批次平均），返回本步的Δ并记下它
    pub(crate) fn step(
        &mut self,
        update: Matrix,
        current: &Matrix,
        config: &TrainerConfig,
    ) -> Matrix {
        let mut delta = update;
        if config.weight_decay != 0.0 {
            delta -= &(current * config.weight_decay);
        }
        if let Some(previous) = &self.previous {
            delta += &(previous * config.momentum);
        }
        self.previous = Some(delta.clone());
        delta
    }

    pub(crate) fn reset(&mut self) {
        self.previous = None;
    }
}
