/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 无监督逐层预训练：RBM 的对比散度、自编码器的重构误差下降，以及串起它们的逐层训练器
 */

mod autoencoder;
mod base;
mod config;
mod layerwise;
mod rbm;

pub use autoencoder::AutoencoderTrainer;
pub use base::{LayerTrainer, StageTrainer, TrainingStats};
pub use config::TrainerConfig;
pub use layerwise::{LayerInputProvider, LayerwiseState, LayerwiseTrainer};
pub use rbm::CdTrainer;

#[cfg(test)]
mod tests;
