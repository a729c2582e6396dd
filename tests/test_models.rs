use stock_forecast::error::ForecastError;
use stock_forecast::models::RecurrentNet;

fn constant_dataset(samples: usize, window: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    let inputs = vec![vec![0.5; window]; samples];
    let targets = vec![0.5; samples];
    (inputs, targets)
}

#[test]
fn test_invalid_construction_parameters() {
    assert!(matches!(
        RecurrentNet::new(0, 8, 0.1),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        RecurrentNet::new(5, 0, 0.1),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        RecurrentNet::new(5, 8, -0.1),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_epoch_callback_fires_once_per_epoch_in_order() {
    let (inputs, targets) = constant_dataset(4, 3);
    let mut model = RecurrentNet::new(3, 4, 0.05).unwrap();

    let mut seen = Vec::new();
    model
        .fit(&inputs, &targets, 7, &mut |epoch| seen.push(epoch))
        .unwrap();

    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_training_reduces_loss_on_constant_target() {
    let (inputs, targets) = constant_dataset(20, 5);
    let model = RecurrentNet::new(5, 8, 0.1).unwrap();

    // Same initialization, different training budgets
    let mut short = model.clone();
    let mut long = model;
    let loss_short = short.fit(&inputs, &targets, 1, &mut |_| {}).unwrap();
    let loss_long = long.fit(&inputs, &targets, 60, &mut |_| {}).unwrap();

    assert!(loss_short.is_finite());
    assert!(loss_long.is_finite());
    assert!(loss_long < 0.01, "loss after 60 epochs was {}", loss_long);
    assert!(loss_long <= loss_short);
}

#[test]
fn test_prediction_is_deterministic() {
    let (inputs, targets) = constant_dataset(10, 4);
    let mut model = RecurrentNet::new(4, 6, 0.05).unwrap();
    model.fit(&inputs, &targets, 5, &mut |_| {}).unwrap();

    let window = vec![0.2, 0.4, 0.6, 0.8];
    let first = model.predict_one(&window).unwrap();
    let second = model.predict_one(&window).unwrap();

    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn test_wrong_window_length_rejected() {
    let model = RecurrentNet::new(4, 6, 0.05).unwrap();

    match model.predict_one(&[0.1, 0.2]) {
        Err(ForecastError::InsufficientHistory { required, actual }) => {
            assert_eq!(required, 4);
            assert_eq!(actual, 2);
        }
        other => panic!("Expected InsufficientHistory, got {:?}", other),
    }
}

#[test]
fn test_fit_validates_inputs() {
    let mut model = RecurrentNet::new(4, 6, 0.05).unwrap();

    // Empty training set
    assert!(matches!(
        model.fit(&[], &[], 3, &mut |_| {}),
        Err(ForecastError::InsufficientData { .. })
    ));

    // Zero epochs
    let (inputs, targets) = constant_dataset(3, 4);
    assert!(matches!(
        model.fit(&inputs, &targets, 0, &mut |_| {}),
        Err(ForecastError::InvalidParameter(_))
    ));

    // Window length mismatch
    let bad_inputs = vec![vec![0.5; 3]; 2];
    assert!(matches!(
        model.fit(&bad_inputs, &[0.5, 0.5], 3, &mut |_| {}),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_serde_round_trip_preserves_predictions() {
    let (inputs, targets) = constant_dataset(10, 4);
    let mut model = RecurrentNet::new(4, 6, 0.05).unwrap();
    model.fit(&inputs, &targets, 5, &mut |_| {}).unwrap();

    let json = serde_json::to_string(&model).unwrap();
    let restored: RecurrentNet = serde_json::from_str(&json).unwrap();

    let window = vec![0.9, 0.1, 0.5, 0.3];
    let before = model.predict_one(&window).unwrap();
    let after = restored.predict_one(&window).unwrap();
    assert_eq!(before.to_bits(), after.to_bits());
}
