/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 逐层训练器的配置。所有参数都是具名字段并有显式默认值，可从 JSON 读取。
 */

use crate::errors::{ComparisonOperator, TrainingError};
use crate::nn::Activation;
use serde::{Deserialize, Serialize};

/// 训练器配置
///
/// # 使用示例
/// ```ignore
/// let config = TrainerConfig::new(0.1)
///     .momentum(0.5)
///     .weight_decay(0.0002)
///     .batch_size(10)
///     .epochs(20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// 隐藏层一侧的激活函数（可见层 -> 隐藏层时使用）
    pub hidden_activation: Activation,
    /// 可见层一侧的激活函数（重构可见层/输出层时使用）
    pub visible_activation: Activation,
    pub learning_rate: f32,
    pub momentum: f32,
    pub weight_decay: f32,
    pub batch_size: usize,
    pub epochs: usize,
    /// CD-k 中的 k
    pub gibbs_steps: usize,
    /// 是否使用持续对比散度（PCD）
    pub persistent: bool,
    /// 去噪自编码器中输入被置零的比例
    pub corruption_level: f32,
    /// 自编码器的解码权重是否与编码权重绑定（解码 = 编码ᵗ）
    pub tied_weights: bool,
    /// 打印训练进度
    pub verbose: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            hidden_activation: Activation::Sigmoid,
            visible_activation: Activation::Sigmoid,
            learning_rate: 0.1,
            momentum: 0.0,
            weight_decay: 0.0,
            batch_size: 1,
            epochs: 1,
            gibbs_steps: 1,
            persistent: false,
            corruption_level: 0.0,
            tied_weights: false,
            verbose: false,
        }
    }
}

impl TrainerConfig {
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            ..Self::default()
        }
    }

    /// 从 JSON 读取，缺省的字段取默认值
    pub fn from_json(json: &str) -> Result<Self, TrainingError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, TrainingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn hidden_activation(mut self, activation: Activation) -> Self {
        self.hidden_activation = activation;
        self
    }

    pub fn visible_activation(mut self, activation: Activation) -> Self {
        self.visible_activation = activation;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn momentum(mut self, momentum: f32) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn weight_decay(mut self, weight_decay: f32) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn gibbs_steps(mut self, gibbs_steps: usize) -> Self {
        self.gibbs_steps = gibbs_steps;
        self
    }

    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn corruption_level(mut self, corruption_level: f32) -> Self {
        self.corruption_level = corruption_level;
        self
    }

    pub fn tied_weights(mut self, tied_weights: bool) -> Self {
        self.tied_weights = tied_weights;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 检查各参数的取值范围
    pub fn validate(&self) -> Result<(), TrainingError> {
        use ComparisonOperator::*;

        let invalid = |name, operator, threshold| TrainingError::InvalidConfig {
            name,
            operator,
            threshold,
        };
        // 写成取反的形式，NaN 也会被拒绝
        if !(self.learning_rate > 0.0) {
            return Err(invalid("learning_rate", GreaterThan, 0.0));
        }
        if !self.learning_rate.is_finite() {
            return Err(invalid("learning_rate", LessThan, f32::INFINITY));
        }
        if !(self.momentum >= 0.0) {
            return Err(invalid("momentum", GreaterOrEqual, 0.0));
        }
        if !(self.momentum < 1.0) {
            return Err(invalid("momentum", LessThan, 1.0));
        }
        if !(self.weight_decay >= 0.0) {
            return Err(invalid("weight_decay", GreaterOrEqual, 0.0));
        }
        if !self.weight_decay.is_finite() {
            return Err(invalid("weight_decay", LessThan, f32::INFINITY));
        }
        if self.batch_size < 1 {
            return Err(invalid("batch_size", GreaterOrEqual, 1.0));
        }
        if self.gibbs_steps < 1 {
            return Err(invalid("gibbs_steps", GreaterOrEqual, 1.0));
        }
        if !(self.corruption_level >= 0.0) {
            return Err(invalid("corruption_level", GreaterOrEqual, 0.0));
        }
        if !(self.corruption_level < 1.0) {
            return Err(invalid("corruption_level", LessThan, 1.0));
        }
        Ok(())
    }
}
