mod cd_trainer;

use crate::matrix::Matrix;
use crate::nn::{Graph, Rbm};

/// 3个可见单元、2个隐藏单元、带偏置的 RBM，权重取固定值
fn reference_rbm(graph: &Graph) -> Rbm {
    let rbm = Rbm::with_sizes(graph, 3, 2, true).unwrap();
    graph
        .set_weights(
            rbm.main_connection(),
            &Matrix::new(&[0.2, 0.4, -0.5, -0.3, 0.1, 0.2], 2, 3),
        )
        .unwrap();
    graph
        .set_weights(rbm.hidden_bias_connection().unwrap(), &Matrix::column(&[-0.4, 0.2]))
        .unwrap();
    rbm
}

fn assert_matrix_eq(actual: &Matrix, expected: &[f32], epsilon: f32) {
    let actual = actual.to_vec();
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        approx::assert_abs_diff_eq!(a, e, epsilon = epsilon);
    }
}
