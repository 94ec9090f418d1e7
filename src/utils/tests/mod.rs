use crate::nn::GraphError;
use crate::{assert_err, assert_panic};

#[test]
fn test_assert_panic_macro() {
    assert_panic!(panic!("test panic"));
    assert_panic!(panic!("custom test panic msg"), "custom test panic msg");
}

#[test]
fn test_assert_err_macro() {
    let result: Result<(), GraphError> = Err(GraphError::InvalidOperation("层的大小必须大于0".to_string()));
    assert_err!(result);
    assert_err!(result, GraphError::InvalidOperation("层的大小必须大于0"));
    assert_err!(result, GraphError::InvalidOperation(msg) if msg.contains("大小"));

    let result: Result<(), GraphError> = Err(GraphError::ShapeMismatch {
        expected: vec![2, 3],
        got: vec![3, 2],
        message: "权重".to_string(),
    });
    assert_err!(result, GraphError::ShapeMismatch([2, 3], [3, 2], "权重"));
    assert_err!(result, GraphError::ShapeMismatch { .. });
}
