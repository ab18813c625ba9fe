use tictac_nn::{FixedExample, Network, SquaredErrorLoss};

#[test]
fn test_two_hidden_layers_converge_on_single_example() {
    let mut network = Network::with_learning_rate(2, &[2, 3], 1, 0.001).unwrap();
    network.initialize_weights(123);

    let input = vec![0.5, 0.8];
    let target = vec![0.9];
    let mut source = FixedExample::new(input.clone(), target.clone());

    network.train(100_000, &mut source, None).unwrap();

    let predicted = network.feed_forward(&input).unwrap();
    assert_eq!(predicted.len(), 1);
    assert!((0.0..=1.0).contains(&predicted[0]));
    assert!((predicted[0] - target[0]).abs() < 0.1, "predicted {}", predicted[0]);
    assert_ne!(predicted[0], target[0]);
}

#[test]
fn test_error_shrinks_over_training() {
    let mut network = Network::with_learning_rate(2, &[2, 3], 2, 0.5).unwrap();
    network.initialize_weights(123);

    let input = vec![0.5, 0.8];
    let target = vec![0.9, 0.3];
    let before = SquaredErrorLoss::loss(&network.feed_forward(&input).unwrap(), &target);

    let mut errors = Vec::new();
    let mut record = |_: usize, error: f64| errors.push(error);
    network
        .train(2_000, &mut FixedExample::new(input.clone(), target.clone()), Some(&mut record))
        .unwrap();

    let after = SquaredErrorLoss::loss(&network.feed_forward(&input).unwrap(), &target);
    assert_eq!(errors.len(), 2_000);
    assert_eq!(errors[0], before);
    assert!(after < before / 10.0, "before {before}, after {after}");
}
