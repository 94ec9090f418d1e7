//! 训练数据模块
//!
//! 为逐层训练提供样本。
//!
//! # 主要组件
//!
//! - [`TrainingInputProvider`]: 可重置的样本提供器接口
//! - [`TrainingInputData`]: 一个（输入, 目标）样本
//! - [`SimpleInputProvider`]: 基于内存数据的提供器
//! - [`DataError`]: 数据错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use layerwise::data::{SimpleInputProvider, TrainingInputProvider};
//!
//! let mut provider = SimpleInputProvider::new(&[[0.0, 1.0], [1.0, 0.0]], None::<&[[f32; 1]]>)?;
//! while let Some(sample) = provider.next_input()? {
//!     // ...
//! }
//! provider.reset();
//! ```

pub mod error;
mod provider;

#[cfg(test)]
mod tests;

pub use error::DataError;
pub use provider::{SimpleInputProvider, TrainingInputData, TrainingInputProvider};
