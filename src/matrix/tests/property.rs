use crate::matrix::Matrix;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_new_is_row_major() {
    let m = Matrix::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
    assert_eq!(m.rows(), 2);
    assert_eq!(m.cols(), 3);
    assert_eq!(m.size(), 6);
    assert_eq!(m.get(0, 2), 3.0);
    assert_eq!(m.get(1, 0), 4.0);
    assert_eq!(m.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
#[should_panic(expected = "数据长度5与形状[2, 3]不符")]
fn test_new_panic_on_wrong_length() {
    Matrix::new(&[1.0, 2.0, 3.0, 4.0, 5.0], 2, 3);
}

#[test]
fn test_zeros_and_set() {
    let mut m = Matrix::zeros(3, 2);
    assert!(m.to_vec().iter().all(|&v| v == 0.0));
    m.set(2, 1, 7.5);
    assert_eq!(m.get(2, 1), 7.5);
}

#[test]
fn test_columns() {
    let mut m = Matrix::zeros(3, 2);
    m.set_column(1, &Matrix::column(&[1.0, 2.0, 3.0]));
    assert_eq!(m.column_at(1), Matrix::column(&[1.0, 2.0, 3.0]));
    assert_eq!(m.column_at(0), Matrix::zeros(3, 1));
}

#[test]
fn test_is_finite() {
    let mut m = Matrix::from_elem(2, 2, 1.0);
    assert!(m.is_finite());
    m.set(0, 1, f32::NAN);
    assert!(!m.is_finite());
    m.set(0, 1, f32::INFINITY);
    assert!(!m.is_finite());
}

#[test]
fn test_random_is_reproducible_and_bounded() {
    let a = Matrix::random_with_rng(-1.0, 1.0, 4, 5, &mut StdRng::seed_from_u64(7));
    let b = Matrix::random_with_rng(-1.0, 1.0, 4, 5, &mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
    assert!(a.to_vec().iter().all(|&v| (-1.0..=1.0).contains(&v)));

    let n = Matrix::normal_with_rng(0.0, 0.01, 10, 10, &mut StdRng::seed_from_u64(7));
    assert_eq!(n.shape(), [10, 10]);
    assert!(n.is_finite());
}
