use crate::matrix::Matrix;

impl Matrix {
    /// 矩阵乘法。需要保证前一个矩阵的列数等于后一个矩阵的行数，否则会触发panic。
    pub fn mat_mul(&self, other: &Self) -> Self {
        assert!(
            self.cols() == other.rows(),
            "前一个矩阵的列数（{}）必须等于后一个矩阵的行数（{}）",
            self.cols(),
            other.rows()
        );
        Self::from_array(self.data.dot(&other.data))
    }

    /// `selfᵗ · other`，省去显式转置的拷贝
    pub fn t_mat_mul(&self, other: &Self) -> Self {
        assert!(
            self.rows() == other.rows(),
            "前一个矩阵的行数（{}）必须等于后一个矩阵的行数（{}）",
            self.rows(),
            other.rows()
        );
        Self::from_array(self.data.t().dot(&other.data))
    }

    /// `self · otherᵗ`：在批量样本上累加外积（如 h·vᵗ）
    pub fn mat_mul_t(&self, other: &Self) -> Self {
        assert!(
            self.cols() == other.cols(),
            "前一个矩阵的列数（{}）必须等于后一个矩阵的列数（{}）",
            self.cols(),
            other.cols()
        );
        Self::from_array(self.data.dot(&other.data.t()))
    }
}
