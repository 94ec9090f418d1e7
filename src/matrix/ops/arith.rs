/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 矩阵的逐元素加减与数乘。两个矩阵参与运算时形状必须严格一致，否则panic。
 */

use crate::errors::{Operator, TensorError};
use crate::matrix::Matrix;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

fn assert_same_shape(a: &Matrix, b: &Matrix, operator: Operator) {
    assert!(
        a.is_same_shape(b),
        "{}",
        TensorError::OperatorError {
            operator,
            tensor1_shape: a.shape().to_vec(),
            tensor2_shape: b.shape().to_vec(),
        }
    );
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, other: &Matrix) -> Matrix {
        assert_same_shape(self, other, Operator::Add);
        Matrix::from_array(&self.data + &other.data)
    }
}

impl Add for Matrix {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, other: &Matrix) -> Matrix {
        assert_same_shape(self, other, Operator::Sub);
        Matrix::from_array(&self.data - &other.data)
    }
}

impl Sub for Matrix {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        &self - &other
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, other: &Matrix) {
        assert_same_shape(self, other, Operator::AddAssign);
        self.data += &other.data;
    }
}

impl SubAssign<&Matrix> for Matrix {
    fn sub_assign(&mut self, other: &Matrix) {
        assert_same_shape(self, other, Operator::SubAssign);
        self.data -= &other.data;
    }
}

impl Mul<f32> for &Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f32) -> Matrix {
        Matrix::from_array(&self.data * scalar)
    }
}

impl Mul<f32> for Matrix {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::from_array(self.data * scalar)
    }
}

impl Mul<&Matrix> for f32 {
    type Output = Matrix;

    fn mul(self, matrix: &Matrix) -> Matrix {
        matrix * self
    }
}

impl Mul<Matrix> for f32 {
    type Output = Matrix;

    fn mul(self, matrix: Matrix) -> Matrix {
        matrix * self
    }
}
