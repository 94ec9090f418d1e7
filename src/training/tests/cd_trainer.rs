use super::{assert_matrix_eq, reference_rbm};
use crate::assert_err;
use crate::data::SimpleInputProvider;
use crate::errors::TrainingError;
use crate::matrix::Matrix;
use crate::nn::Graph;
use crate::training::{CdTrainer, LayerTrainer, TrainerConfig};
use std::cell::Cell;

fn one_step_config() -> TrainerConfig {
    TrainerConfig::new(1.0)
}

#[test]
fn test_single_update_matches_reference() {
    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    let mut trainer = CdTrainer::new(rbm.clone(), one_step_config());

    let v0 = Matrix::column(&[1.0, 0.0, 1.0]);
    trainer.train_batch(&v0).unwrap();

    assert_matrix_eq(
        &graph.weights(rbm.main_connection()).unwrap(),
        &[0.3320366, 0.1713649, -0.3711215, -0.0384119, -0.2014404, 0.4574244],
        1e-5,
    );
    assert_matrix_eq(
        &graph.weights(rbm.visible_bias_connection().unwrap()).unwrap(),
        &[0.5227671, -0.5461738, 0.5152229],
        1e-5,
    );
    assert_matrix_eq(
        &graph.weights(rbm.hidden_bias_connection().unwrap()).unwrap(),
        &[-0.4868001, 0.1730662],
        1e-5,
    );
}

#[test]
fn test_update_moves_towards_the_data() {
    // 正相减负相：数据中为1的可见单元，其偏置上升；为0的下降
    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    let mut trainer = CdTrainer::new(rbm.clone(), one_step_config());
    trainer.train_batch(&Matrix::column(&[1.0, 0.0, 1.0])).unwrap();

    let visible_bias = graph.weights(rbm.visible_bias_connection().unwrap()).unwrap();
    assert!(visible_bias.get(0, 0) > 0.0);
    assert!(visible_bias.get(1, 0) < 0.0);
    assert!(visible_bias.get(2, 0) > 0.0);
}

#[test]
fn test_momentum_and_weight_decay() {
    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    let config = TrainerConfig::new(1.0).momentum(0.5).weight_decay(0.1);
    let mut trainer = CdTrainer::new(rbm.clone(), config);

    let v0 = Matrix::column(&[1.0, 0.0, 1.0]);
    trainer.train_batch(&v0).unwrap();
    trainer.train_batch(&v0).unwrap();

    assert_matrix_eq(
        &graph.weights(rbm.main_connection()).unwrap(),
        &[0.4636868, -0.1546799, -0.0756829, 0.3937308, -0.5509029, 0.7635429],
        1e-5,
    );
    assert_matrix_eq(
        &graph.weights(rbm.visible_bias_connection().unwrap()).unwrap(),
        &[1.0774757, -1.1119593, 1.0595251],
        1e-5,
    );
    assert_matrix_eq(
        &graph.weights(rbm.hidden_bias_connection().unwrap()).unwrap(),
        &[-0.4365914, 0.1659251],
        1e-5,
    );
}

#[test]
fn test_batch_gradients_are_averaged() {
    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    let mut trainer = CdTrainer::new(rbm.clone(), TrainerConfig::new(0.5));

    let batch = Matrix::new(&[1.0, 0.0, 0.0, 1.0, 1.0, 1.0], 3, 2);
    trainer.train_batch(&batch).unwrap();

    assert_matrix_eq(
        &graph.weights(rbm.main_connection()).unwrap(),
        &[0.1835267, 0.3792674, -0.4241052, -0.2998185, 0.1038676, 0.3531376],
        1e-5,
    );
    assert_matrix_eq(
        &graph.weights(rbm.visible_bias_connection().unwrap()).unwrap(),
        &[0.0126365, -0.024822, 0.2578217],
        1e-5,
    );
}

#[test]
fn test_cd_k() {
    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    let mut trainer = CdTrainer::new(rbm.clone(), one_step_config().gibbs_steps(2));
    trainer.train_batch(&Matrix::column(&[1.0, 0.0, 1.0])).unwrap();

    assert_matrix_eq(
        &graph.weights(rbm.main_connection()).unwrap(),
        &[0.3300267, 0.1662848, -0.3681811, -0.0394922, -0.2063202, 0.4628568],
        1e-5,
    );
}

#[test]
fn test_persistent_chain_carries_over_batches() {
    let x = Matrix::column(&[1.0, 0.0, 1.0]);
    let y = Matrix::column(&[0.0, 1.0, 0.0]);

    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    let mut trainer = CdTrainer::new(rbm.clone(), one_step_config().persistent(true));
    assert!(trainer.persistent_chain().is_none());
    trainer.train_batch(&x).unwrap();
    assert_eq!(trainer.persistent_chain().unwrap().shape(), [2, 1]);
    trainer.train_batch(&y).unwrap();
    assert_matrix_eq(
        &graph.weights(rbm.main_connection()).unwrap(),
        &[0.0768541, 0.453794, -0.6238065, -0.4261413, 0.0797208, 0.0734897],
        1e-5,
    );

    // 普通 CD 每个批次都从当前样本重新开始
    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    let mut trainer = CdTrainer::new(rbm.clone(), one_step_config());
    trainer.train_batch(&x).unwrap();
    trainer.train_batch(&y).unwrap();
    assert!(trainer.persistent_chain().is_none());
    assert_matrix_eq(
        &graph.weights(rbm.main_connection()).unwrap(),
        &[0.0760732, 0.4524107, -0.6217724, -0.4260225, 0.0783367, 0.0778586],
        1e-5,
    );

    trainer.reset_state();
    assert!(trainer.persistent_chain().is_none());
}

#[test]
fn test_input_shape_mismatch() {
    let graph = Graph::new();
    let mut trainer = CdTrainer::new(reference_rbm(&graph), one_step_config());
    assert_err!(
        trainer.train_batch(&Matrix::column(&[1.0, 0.0])),
        TrainingError::InputShapeMismatch { expected: 3, got: [2, 1] }
    );
}

#[test]
fn test_non_finite_weights_are_fatal() {
    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    graph.set_weight(rbm.main_connection(), 0, 0, f32::NAN).unwrap();
    let before_bias = graph.weights(rbm.hidden_bias_connection().unwrap()).unwrap();

    let mut trainer = CdTrainer::new(rbm.clone(), one_step_config());
    assert_err!(
        trainer.train_batch(&Matrix::column(&[1.0, 0.0, 1.0])),
        TrainingError::NumericInstability { location } if location.contains("主连接权重")
    );
    // 出错的批次不写回任何参数
    assert_eq!(
        graph.weights(rbm.hidden_bias_connection().unwrap()).unwrap(),
        before_bias
    );
}

#[test]
fn test_infinite_weight_is_fatal() {
    // sigmoid把∞压成0或1，激活值与更新量都是有限的，只能靠检查参数本身发现
    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    graph.set_weight(rbm.main_connection(), 0, 0, f32::INFINITY).unwrap();
    let before_visible = graph.weights(rbm.visible_bias_connection().unwrap()).unwrap();
    let before_hidden = graph.weights(rbm.hidden_bias_connection().unwrap()).unwrap();

    let mut trainer = CdTrainer::new(rbm.clone(), one_step_config());
    assert_err!(
        trainer.train_batch(&Matrix::from_elem(3, 1, 1.0)),
        TrainingError::NumericInstability { location } if location.contains("主连接权重")
    );
    assert_eq!(
        graph.weights(rbm.visible_bias_connection().unwrap()).unwrap(),
        before_visible
    );
    assert_eq!(
        graph.weights(rbm.hidden_bias_connection().unwrap()).unwrap(),
        before_hidden
    );
    assert_eq!(graph.get_weight(rbm.main_connection(), 0, 0).unwrap(), f32::INFINITY);

    let mut trainer = CdTrainer::new(rbm.clone(), one_step_config());
    graph.set_weight(rbm.main_connection(), 0, 0, 0.2).unwrap();
    graph
        .set_weight(rbm.hidden_bias_connection().unwrap(), 1, 0, f32::NEG_INFINITY)
        .unwrap();
    assert_err!(
        trainer.train_batch(&Matrix::from_elem(3, 1, 1.0)),
        TrainingError::NumericInstability { location } if location.contains("隐藏层偏置")
    );
}

#[test]
fn test_each_train_call_starts_without_momentum() {
    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    let connections = [
        rbm.main_connection(),
        rbm.visible_bias_connection().unwrap(),
        rbm.hidden_bias_connection().unwrap(),
    ];
    let initial: Vec<Matrix> = connections.iter().map(|&c| graph.weights(c).unwrap()).collect();

    let config = TrainerConfig::new(1.0).momentum(0.5).persistent(true);
    let mut trainer = CdTrainer::new(rbm.clone(), config);
    let mut provider = SimpleInputProvider::new(&[[1.0, 0.0, 1.0]], None::<&[[f32; 1]]>).unwrap();

    trainer.train(&mut provider, &|| false).unwrap();
    let after_first = graph.weights(rbm.main_connection()).unwrap();

    // 恢复初始参数后再训练一次，结果应与第一次完全相同
    for (&c, w) in connections.iter().zip(&initial) {
        graph.set_weights(c, w).unwrap();
    }
    trainer.train(&mut provider, &|| false).unwrap();
    assert_eq!(graph.weights(rbm.main_connection()).unwrap(), after_first);
    assert_matrix_eq(
        &after_first,
        &[0.3320366, 0.1713649, -0.3711215, -0.0384119, -0.2014404, 0.4574244],
        1e-5,
    );
}

#[test]
fn test_train_runs_all_epochs() {
    let graph = Graph::new_with_seed(5);
    let rbm = reference_rbm(&graph);
    let config = TrainerConfig::new(0.1).batch_size(2).epochs(3);
    let mut trainer = CdTrainer::new(rbm, config);
    let mut provider = SimpleInputProvider::new(
        &[[1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
        None::<&[[f32; 1]]>,
    )
    .unwrap();

    let stats = trainer.train(&mut provider, &|| false).unwrap();
    assert!(stats.completed);
    assert_eq!(stats.epochs_completed, 3);
    // 每个 epoch 2个批次（2 + 1个样本）
    assert_eq!(stats.batches, 6);
    assert_eq!(stats.samples, 9);
    assert_eq!(stats.reconstruction_errors.len(), 3);
    assert!(stats.last_error().unwrap().is_finite());
}

#[test]
fn test_train_stops_when_asked() {
    let graph = Graph::new();
    let rbm = reference_rbm(&graph);
    let mut trainer = CdTrainer::new(rbm.clone(), TrainerConfig::new(0.1).epochs(10));
    let mut provider =
        SimpleInputProvider::new(&[[1.0, 0.0, 1.0], [0.0, 1.0, 0.0]], None::<&[[f32; 1]]>)
            .unwrap();

    // 第1个 epoch 询问3次（第3次时数据已取完），第2个 epoch 放行1个批次后停止
    let calls = Cell::new(0);
    let should_stop = || {
        calls.set(calls.get() + 1);
        calls.get() > 4
    };
    let stats = trainer.train(&mut provider, &should_stop).unwrap();
    assert!(!stats.completed);
    assert_eq!(stats.batches, 3);
    assert_eq!(stats.epochs_completed, 1);
}

#[test]
fn test_train_rejects_invalid_config() {
    let graph = Graph::new();
    let mut trainer = CdTrainer::new(reference_rbm(&graph), TrainerConfig::new(0.1).batch_size(0));
    let mut provider =
        SimpleInputProvider::new(&[[1.0, 0.0, 1.0]], None::<&[[f32; 1]]>).unwrap();
    assert_err!(
        trainer.train(&mut provider, &|| false),
        TrainingError::InvalidConfig { name: "batch_size", .. }
    );
}
