use crate::matrix::Matrix;
use ndarray::{Axis, Zip};

impl Matrix {
    /// 转置
    pub fn transpose(&self) -> Self {
        Self::from_array(self.data.t().to_owned())
    }

    /// 逐元素映射，返回新矩阵
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Self {
        Self::from_array(self.data.mapv(f))
    }

    /// 逐元素就地映射
    pub fn map_inplace<F: Fn(f32) -> f32>(&mut self, f: F) {
        self.data.mapv_inplace(f);
    }

    /// 两个同形矩阵逐元素组合
    pub fn zip_map<F: Fn(f32, f32) -> f32>(&self, other: &Self, f: F) -> Self {
        assert!(
            self.is_same_shape(other),
            "形状不一致：{:?} 与 {:?}",
            self.shape(),
            other.shape()
        );
        let mut result = self.data.clone();
        Zip::from(&mut result)
            .and(&other.data)
            .for_each(|a, &b| *a = f(*a, b));
        Self::from_array(result)
    }

    /// 逐元素相乘（Hadamard积）
    pub fn hadamard(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| a * b)
    }

    /// 将形状为[rows, 1]的列向量加到每一列上（偏置的广播加法）
    pub fn add_column(&self, column: &Self) -> Self {
        assert!(
            column.cols() == 1 && column.rows() == self.rows(),
            "偏置形状{:?}无法广播到{:?}",
            column.shape(),
            self.shape()
        );
        Self::from_array(&self.data + &column.data)
    }

    /// 按行求和，得到形状为[rows, 1]的列向量
    pub fn sum_columns(&self) -> Self {
        Self::from_array(self.data.sum_axis(Axis(1)).insert_axis(Axis(1)))
    }

    /// 所有元素之和
    pub fn sum(&self) -> f32 {
        self.data.sum()
    }

    /// 与`other`之差的平方和
    pub fn squared_error(&self, other: &Self) -> f32 {
        self.zip_map(other, |a, b| (a - b) * (a - b)).sum()
    }
}
