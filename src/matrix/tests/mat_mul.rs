use crate::matrix::Matrix;

#[test]
fn test_mat_mul() {
    let a = Matrix::new(&[1.0, 2.0, 3.0, 4.0], 2, 2);
    let b = Matrix::new(&[5.0, 6.0, 7.0, 8.0, 9.0, 10.0], 2, 3);
    let expected = Matrix::new(&[21.0, 24.0, 27.0, 47.0, 54.0, 61.0], 2, 3);
    assert_eq!(a.mat_mul(&b), expected);
}

#[test]
fn test_transposed_products_match_explicit_transpose() {
    let a = Matrix::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
    let b = Matrix::new(&[1.0, 0.0, -1.0, 2.0], 2, 2);
    assert_eq!(a.t_mat_mul(&b), a.transpose().mat_mul(&b));

    let h = Matrix::new(&[0.5, 0.25], 2, 1);
    let v = Matrix::new(&[1.0, 0.0, 1.0], 3, 1);
    let outer = h.mat_mul_t(&v);
    assert_eq!(outer.shape(), [2, 3]);
    assert_eq!(outer, h.mat_mul(&v.transpose()));
}

#[test]
#[should_panic(expected = "前一个矩阵的列数（3）必须等于后一个矩阵的行数（2）")]
fn test_mat_mul_panic_on_invalid_shape() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(2, 2);
    a.mat_mul(&b);
}
