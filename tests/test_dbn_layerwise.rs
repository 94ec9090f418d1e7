/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : DBN 逐层预训练：一步 CD-1 更新的数值对照、致命错误的传播、重复训练的可复现性
 *                 网络结构：Visible(3) -> Hidden(2) -> Hidden(2)，各层带偏置
 */
use approx::assert_abs_diff_eq;
use layerwise::data::SimpleInputProvider;
use layerwise::errors::TrainingError;
use layerwise::matrix::Matrix;
use layerwise::nn::{Dbn, Graph, Init, StackedNetwork};
use layerwise::training::{CdTrainer, LayerwiseState, LayerwiseTrainer, TrainerConfig};

fn assert_close(actual: &Matrix, expected: &[f32]) {
    for (a, e) in actual.to_vec().iter().zip(expected) {
        assert_abs_diff_eq!(a, e, epsilon = 1e-5);
    }
}

fn layerwise_trainer(dbn: &Dbn, config: &TrainerConfig) -> LayerwiseTrainer<Dbn> {
    let mut trainer = LayerwiseTrainer::new(dbn.clone());
    for rbm in dbn.rbms() {
        trainer
            .add_trainer(CdTrainer::new(rbm.clone(), config.clone()))
            .unwrap();
    }
    trainer
}

#[test]
fn test_first_rbm_matches_reference_update() {
    let graph = Graph::new_with_seed(1);
    let dbn = Dbn::from_sizes(&graph, &[3, 2, 2], true).unwrap();
    let first = dbn.first_rbm().unwrap();
    graph
        .set_weights(
            first.main_connection(),
            &Matrix::new(&[0.2, 0.4, -0.5, -0.3, 0.1, 0.2], 2, 3),
        )
        .unwrap();
    graph
        .set_weights(first.hidden_bias_connection().unwrap(), &Matrix::column(&[-0.4, 0.2]))
        .unwrap();

    let config = TrainerConfig::new(1.0).batch_size(1).epochs(1);
    let mut trainer = layerwise_trainer(&dbn, &config);
    let mut provider = SimpleInputProvider::new(&[[1.0, 0.0, 1.0]], None::<&[[f32; 1]]>).unwrap();
    trainer.train(&mut provider).unwrap();
    assert_eq!(trainer.state(), LayerwiseState::Done);

    // ΔW = h0·v0ᵀ - h1·v1ᵀ，Δb_v = v0 - v1，Δb_h = h0 - h1
    assert_close(
        &graph.weights(first.main_connection()).unwrap(),
        &[0.3320366, 0.1713649, -0.3711215, -0.0384119, -0.2014404, 0.4574244],
    );
    assert_close(
        &graph.weights(first.visible_bias_connection().unwrap()).unwrap(),
        &[0.5227671, -0.5461738, 0.5152229],
    );
    assert_close(
        &graph.weights(first.hidden_bias_connection().unwrap()).unwrap(),
        &[-0.4868001, 0.1730662],
    );
}

/// 同一种子下构建 DBN，返回（图, DBN）
fn seeded_dbn() -> (Graph, Dbn) {
    let graph = Graph::new_with_seed(42);
    let dbn = Dbn::from_sizes_with_init(&graph, &[4, 3, 2], true, &Init::Uniform {
        min: -0.1,
        max: 0.1,
    })
    .unwrap();
    (graph, dbn)
}

fn dataset() -> SimpleInputProvider {
    SimpleInputProvider::new(
        &[
            [1.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 1.0],
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 1.0],
        ],
        None::<&[[f32; 1]]>,
    )
    .unwrap()
}

#[test]
fn test_failure_in_second_stage_keeps_first_stage_weights() {
    let config = TrainerConfig::new(0.1).momentum(0.5).batch_size(2).epochs(4);

    // 参照：完整跑一遍
    let (graph, dbn) = seeded_dbn();
    layerwise_trainer(&dbn, &config).train(&mut dataset()).unwrap();
    let first = dbn.first_rbm().unwrap();
    let reference_weights = graph.weights(first.main_connection()).unwrap();
    let reference_bias = graph.weights(first.hidden_bias_connection().unwrap()).unwrap();

    // 第二个 RBM 的权重中混入NaN
    let (graph, dbn) = seeded_dbn();
    let second = dbn.last_rbm().unwrap();
    graph.set_weight(second.main_connection(), 1, 2, f32::NAN).unwrap();

    let mut trainer = layerwise_trainer(&dbn, &config);
    let err = trainer.train(&mut dataset()).unwrap_err();
    assert_eq!(err.failed_stage(), Some(1));
    assert!(matches!(err, TrainingError::StageFailed { stage: 1, .. }));
    assert!(matches!(
        err.root_cause(),
        TrainingError::NumericInstability { .. }
    ));
    assert_eq!(trainer.state(), LayerwiseState::Failed(1));

    let first = dbn.first_rbm().unwrap();
    assert_eq!(graph.weights(first.main_connection()).unwrap(), reference_weights);
    assert_eq!(
        graph.weights(first.hidden_bias_connection().unwrap()).unwrap(),
        reference_bias
    );
}

#[test]
fn test_training_is_reproducible() {
    let config = TrainerConfig::new(0.1).batch_size(3).epochs(5);
    let run = || {
        let (graph, dbn) = seeded_dbn();
        let stats = layerwise_trainer(&dbn, &config).train(&mut dataset()).unwrap();
        let top = dbn
            .encode(
                &Matrix::column(&[1.0, 1.0, 0.0, 0.0]),
                config.hidden_activation,
            )
            .unwrap();
        let weights = graph.weights(dbn.last_rbm().unwrap().main_connection()).unwrap();
        (stats, top, weights)
    };
    let (stats_a, top_a, weights_a) = run();
    let (stats_b, top_b, weights_b) = run();
    assert_eq!(stats_a, stats_b);
    assert_eq!(top_a, top_b);
    assert_eq!(weights_a, weights_b);
    assert_eq!(stats_a.len(), 2);
    assert!(stats_a.iter().all(|s| s.epochs_completed == 5));
}
