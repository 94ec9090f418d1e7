//! # Layerwise
//!
//! 以“层 + 有向带权连接”构成的显式图来描述神经网络，
//! 网络的输入层、输出层与全部连接都由图的拓扑推断而来；
//! 在此之上以 RBM 堆叠成深度信念网络（DBN）、以自编码器堆叠成堆叠自编码器，
//! 并用逐层无监督预训练（对比散度 / 重构误差下降）依次训练各子网络。
//!

pub mod data;
pub mod errors;
pub mod matrix;
pub mod nn;
pub mod training;
pub mod utils;
