/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 二维矩阵：网络中每条连接的权重图（connection graph）都由它承载。
 *                 行列约定：形状为[输出层大小, 输入层大小]；样本按列排放。
 */

use ndarray::Array2;
use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

mod ops {
    pub mod arith;
    pub mod mat_mul;
    pub mod others;
}

mod print;
mod property;

#[cfg(test)]
mod tests;

/// 二维矩阵，元素类型固定为`f32`。
/// 注：除非特别说明，新建的矩阵均为全零矩阵。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    data: Array2<f32>,
}

impl Matrix {
    /// 按行优先顺序用`data`创建一个`rows`行`cols`列的矩阵。
    /// `data`的长度必须等于`rows * cols`，否则会panic。
    pub fn new(data: &[f32], rows: usize, cols: usize) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "数据长度{}与形状[{rows}, {cols}]不符",
            data.len()
        );
        Self {
            data: Array2::from_shape_fn((rows, cols), |(r, c)| data[r * cols + c]),
        }
    }

    /// 逐行创建矩阵，各行长度必须一致
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Self {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut flat = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            assert_eq!(row.as_ref().len(), cols, "各行长度必须一致");
            flat.extend_from_slice(row.as_ref());
        }
        Self::new(&flat, rows.len(), cols)
    }

    /// 创建形状为[n, 1]的列向量（单个样本的标准形态）
    pub fn column(data: &[f32]) -> Self {
        Self::new(data, data.len(), 1)
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    pub fn from_elem(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// 用指定的随机数生成器创建一个值在[min, max]闭区间内均匀分布的随机矩阵
    pub fn random_with_rng<R: Rng + ?Sized>(
        min: f32,
        max: f32,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Self {
        let uniform = Uniform::from(min..=max);
        Self {
            data: Array2::from_shape_simple_fn((rows, cols), || uniform.sample(rng)),
        }
    }

    /// 用全局随机数生成器创建均匀分布的随机矩阵
    pub fn random(min: f32, max: f32, rows: usize, cols: usize) -> Self {
        Self::random_with_rng(min, max, rows, cols, &mut rand::thread_rng())
    }

    /// 用指定的随机数生成器创建一个服从正态分布的随机矩阵（Box-Muller变换）
    pub fn normal_with_rng<R: Rng + ?Sized>(
        mean: f32,
        std_dev: f32,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Self {
        let data_len = rows * cols;
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f32 = rng.gen_range(0.0..1.0);
            let u2: f32 = rng.gen_range(0.0..1.0);
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            // u1为0时ln发散，丢弃这一对
            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::new(&data, rows, cols)
    }

    pub(crate) const fn from_array(data: Array2<f32>) -> Self {
        Self { data }
    }
}
