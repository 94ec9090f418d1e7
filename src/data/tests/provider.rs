use crate::assert_err;
use crate::data::{DataError, SimpleInputProvider, TrainingInputProvider};
use crate::matrix::Matrix;

/// XOR 的四个样本
const XOR_INPUTS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
const XOR_TARGETS: [[f32; 1]; 4] = [[0.0], [1.0], [1.0], [0.0]];

fn drain(provider: &mut dyn TrainingInputProvider) -> Vec<(Vec<f32>, Option<Vec<f32>>)> {
    let mut samples = Vec::new();
    while let Some(sample) = provider.next_input().unwrap() {
        samples.push((sample.input().to_vec(), sample.target().map(Matrix::to_vec)));
    }
    samples
}

#[test]
fn test_samples_are_column_vectors() {
    let mut provider = SimpleInputProvider::new(&XOR_INPUTS, Some(&XOR_TARGETS[..])).unwrap();
    assert_eq!(provider.len(), 4);
    assert_eq!(provider.input_size(), 4);

    let sample = provider.next_input().unwrap().unwrap();
    assert_eq!(sample.input().shape(), [2, 1]);
    assert_eq!(sample.target().unwrap().shape(), [1, 1]);
}

#[test]
fn test_exhaustion_is_not_an_error() {
    let mut provider = SimpleInputProvider::new(&XOR_INPUTS, None::<&[[f32; 1]]>).unwrap();
    assert_eq!(drain(&mut provider).len(), 4);
    assert!(provider.next_input().unwrap().is_none());
    assert!(provider.next_input().unwrap().is_none());
}

#[test]
fn test_reset_replays_the_same_sequence() {
    let mut provider = SimpleInputProvider::new(&XOR_INPUTS, Some(&XOR_TARGETS[..])).unwrap();
    let first = drain(&mut provider);
    provider.reset();
    let second = drain(&mut provider);
    assert_eq!(first, second);
    assert_eq!(first[1], (vec![0.0, 1.0], Some(vec![1.0])));
    assert_eq!(first[3], (vec![1.0, 1.0], Some(vec![0.0])));
}

#[test]
fn test_shuffled_order_is_stable_across_resets() {
    let mut provider = SimpleInputProvider::new(&XOR_INPUTS, Some(&XOR_TARGETS[..]))
        .unwrap()
        .shuffled(11);
    let first = drain(&mut provider);
    provider.reset();
    assert_eq!(first, drain(&mut provider));

    // 打乱不改变样本与目标的对应关系
    for (input, target) in &first {
        let xor = (input[0] != input[1]) as u8 as f32;
        assert_eq!(target.as_deref(), Some(&[xor][..]));
    }
    let mut inputs: Vec<_> = first.into_iter().map(|(i, _)| i).collect();
    inputs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(inputs, XOR_INPUTS.iter().map(|r| r.to_vec()).collect::<Vec<_>>());
}

#[test]
fn test_from_rows() {
    let features = Matrix::from_rows(&[[1.0, 0.0, 1.0], [0.0, 1.0, 0.0]]);
    let mut provider = SimpleInputProvider::from_rows(&features, None).unwrap();
    let samples = drain(&mut provider);
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].0, vec![1.0, 0.0, 1.0]);
    assert_eq!(samples[1].1, None);
}

#[test]
fn test_invalid_datasets() {
    let empty: [[f32; 2]; 0] = [];
    assert_err!(
        SimpleInputProvider::new(&empty, None::<&[[f32; 1]]>),
        DataError::EmptyDataset
    );
    assert_err!(
        SimpleInputProvider::new(&[vec![1.0, 2.0], vec![1.0]], None::<&[[f32; 1]]>),
        DataError::ShapeMismatch { index: 1, expected: 2, got: 1 }
    );
    assert_err!(
        SimpleInputProvider::new(&XOR_INPUTS, Some(&XOR_TARGETS[..3])),
        DataError::SampleCountMismatch { inputs: 4, targets: 3 }
    );
}
