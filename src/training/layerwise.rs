/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 逐层训练：按堆叠顺序依次训练各子网络，
 *                 后一个子网络的训练数据 = 原始数据穿过前面所有已训练子网络后的隐藏层表示
 */

use super::base::{LayerTrainer, StageTrainer, TrainingStats};
use crate::data::{DataError, TrainingInputData, TrainingInputProvider};
use crate::errors::TrainingError;
use crate::matrix::Matrix;
use crate::nn::{Activation, GraphError, LayerwiseStage, NetworkId, StackedNetwork};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 逐层训练的进度
///
/// `NotStarted → TrainingStage(0) → PropagatingToNext(0) → TrainingStage(1) → … → Done`，
/// 任一子网络出错或被取消则停在`Failed(i)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerwiseState {
    #[default]
    NotStarted,
    TrainingStage(usize),
    PropagatingToNext(usize),
    Done,
    Failed(usize),
}

/// 逐层训练器
///
/// # 使用示例
/// ```ignore
/// let graph = Graph::new_with_seed(42);
/// let dbn = Dbn::from_sizes(&graph, &[784, 500, 250], true)?;
/// let config = TrainerConfig::new(0.1).batch_size(10).epochs(5);
/// let mut trainer = LayerwiseTrainer::new(dbn.clone());
/// for rbm in dbn.rbms() {
///     trainer.add_trainer(CdTrainer::new(rbm.clone(), config.clone()))?;
/// }
/// let stats = trainer.train(&mut provider)?;
/// ```
pub struct LayerwiseTrainer<N: StackedNetwork> {
    network: N,
    trainers: HashMap<NetworkId, StageTrainer>,
    state: LayerwiseState,
    cancel: Arc<AtomicBool>,
    verbose: bool,
}

impl<N: StackedNetwork> LayerwiseTrainer<N> {
    pub fn new(network: N) -> Self {
        Self {
            network,
            trainers: HashMap::new(),
            state: LayerwiseState::NotStarted,
            cancel: Arc::new(AtomicBool::new(false)),
            verbose: false,
        }
    }

    /// 打印每个子网络的开始/结束
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 登记一个子网络训练器，按它所训练的子网络对号入座，返回该子网络的序号。
    /// 同一子网络重复登记时，后登记的替换先前的。
    pub fn add_trainer(&mut self, trainer: impl Into<StageTrainer>) -> Result<usize, TrainingError> {
        let trainer = trainer.into();
        let id = trainer.network_id();
        let Some(index) = self.network.stage_index(id) else {
            return Err(GraphError::InvalidOperation(format!(
                "训练器对应的网络{id:?}不是本堆叠网络的子网络"
            ))
            .into());
        };
        self.trainers.insert(id, trainer);
        Ok(index)
    }

    pub const fn network(&self) -> &N {
        &self.network
    }

    pub const fn state(&self) -> LayerwiseState {
        self.state
    }

    /// 第`stage`个子网络的训练器
    pub fn trainer(&self, stage: usize) -> Option<&StageTrainer> {
        let id = self.network.stages().get(stage)?.id();
        self.trainers.get(&id)
    }

    /// 取消句柄，可交给其他线程。置为true后，训练在下一个批次之前停止。
    ///
    /// 取消只作用于一次`train`：该次返回`Cancelled`时标志被清回false，之后可以再次训练。
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// 依次训练所有子网络，返回各自的训练统计
    ///
    /// 第i个子网络失败时返回`StageFailed { stage: i, .. }`（被取消时为`Cancelled { stage: i }`），
    /// 此前已训练完的子网络的权重保持不变，第i个子网络停在最后一次成功更新后的状态。
    pub fn train(
        &mut self,
        provider: &mut dyn TrainingInputProvider,
    ) -> Result<Vec<TrainingStats>, TrainingError> {
        let stages = self.network.stages();
        for (i, stage) in stages.iter().enumerate() {
            if !self.trainers.contains_key(&stage.id()) {
                self.state = LayerwiseState::Failed(i);
                return Err(TrainingError::MissingTrainer { stage: i });
            }
        }

        let cancel = &self.cancel;
        let should_stop = || cancel.load(Ordering::SeqCst);
        let mut encoders: Vec<(&N::Stage, Activation)> = Vec::with_capacity(stages.len());
        let mut all_stats = Vec::with_capacity(stages.len());

        for (i, stage) in stages.iter().enumerate() {
            self.state = LayerwiseState::TrainingStage(i);
            let Some(trainer) = self.trainers.get_mut(&stage.id()) else {
                self.state = LayerwiseState::Failed(i);
                return Err(TrainingError::MissingTrainer { stage: i });
            };
            if self.verbose {
                println!("开始训练第{i}层子网络（共{}层）", stages.len());
            }

            let result = {
                let mut stage_input = LayerInputProvider::new(&mut *provider, &encoders);
                trainer.train(&mut stage_input, &should_stop)
            };
            let stats = match result {
                Ok(stats) if stats.completed => stats,
                Ok(_) => {
                    self.state = LayerwiseState::Failed(i);
                    self.cancel.store(false, Ordering::SeqCst);
                    return Err(TrainingError::Cancelled { stage: i });
                }
                Err(source) => {
                    self.state = LayerwiseState::Failed(i);
                    return Err(TrainingError::StageFailed {
                        stage: i,
                        source: Box::new(source),
                    });
                }
            };
            if self.verbose {
                println!(
                    "第{i}层子网络训练完成：{}个epoch，最终重构误差 {:?}",
                    stats.epochs_completed,
                    stats.last_error()
                );
            }
            all_stats.push(stats);

            self.state = LayerwiseState::PropagatingToNext(i);
            encoders.push((stage, trainer.config().hidden_activation));
        }

        self.state = LayerwiseState::Done;
        Ok(all_stats)
    }

    /// 用各子网络训练时的隐藏层激活函数，把样本依次穿过所有子网络。
    /// 与训练时传给下一层的表示一致。
    pub fn encode(&self, input: &Matrix) -> Result<Matrix, TrainingError> {
        let activations = self
            .network
            .stages()
            .iter()
            .enumerate()
            .map(|(i, stage)| {
                self.trainers
                    .get(&stage.id())
                    .map(|trainer| trainer.config().hidden_activation)
                    .ok_or(TrainingError::MissingTrainer { stage: i })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.network.encode_with(input, &activations)?)
    }
}

/// 把基础提供器的每个样本依次穿过若干已训练的子网络，作为下一个子网络的输入。
/// 目标（若有）原样保留。传播是惰性的：取一个样本才算一个。
pub struct LayerInputProvider<'a, S: LayerwiseStage> {
    base: &'a mut dyn TrainingInputProvider,
    encoders: &'a [(&'a S, Activation)],
    current: Option<TrainingInputData>,
}

impl<'a, S: LayerwiseStage> LayerInputProvider<'a, S> {
    /// `encoders`为空时等同于`base`本身
    pub fn new(
        base: &'a mut dyn TrainingInputProvider,
        encoders: &'a [(&'a S, Activation)],
    ) -> Self {
        Self {
            base,
            encoders,
            current: None,
        }
    }
}

impl<S: LayerwiseStage> TrainingInputProvider for LayerInputProvider<'_, S> {
    fn next_input(&mut self) -> Result<Option<&TrainingInputData>, DataError> {
        if self.encoders.is_empty() {
            return self.base.next_input();
        }
        let Some(sample) = self.base.next_input()? else {
            return Ok(None);
        };
        let mut input = sample.input().clone();
        let target = sample.target().cloned();
        for (stage, activation) in self.encoders {
            input = stage.encode(&input, *activation)?;
        }
        self.current = Some(TrainingInputData::new(input, target));
        Ok(self.current.as_ref())
    }

    fn reset(&mut self) {
        self.base.reset();
    }

    fn input_size(&self) -> usize {
        self.base.input_size()
    }
}
