/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 本文件仅包含矩阵的属性与元素读写方法，不包含运算
 */

use super::Matrix;
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

impl Matrix {
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// 形状：[行数, 列数]
    pub fn shape(&self) -> [usize; 2] {
        [self.rows(), self.cols()]
    }

    /// 元素总数
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    /// 读取(row, col)处的元素，越界会panic
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[[row, col]]
    }

    /// 写入(row, col)处的元素，越界会panic
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[[row, col]] = value;
    }

    /// 所有元素均为有限值（非NaN、非±∞）
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, f32> {
        self.data.view_mut()
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    /// 按行优先顺序导出所有元素
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }

    /// 第`col`列，作为新的列向量
    pub fn column_at(&self, col: usize) -> Self {
        Self::from_array(self.data.column(col).to_owned().insert_axis(ndarray::Axis(1)))
    }

    /// 用列向量`column`覆盖第`col`列
    pub fn set_column(&mut self, col: usize, column: &Self) {
        assert_eq!(column.rows(), self.rows(), "列向量长度与矩阵行数不符");
        self.data.column_mut(col).assign(&column.data.column(0));
    }
}
