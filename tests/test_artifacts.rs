use stock_forecast::artifacts::ArtifactStore;
use stock_forecast::error::ForecastError;
use stock_forecast::models::RecurrentNet;
use stock_forecast::scaling::MinMaxScaler;
use tempfile::tempdir;

fn trained_pair() -> (RecurrentNet, MinMaxScaler) {
    let mut model = RecurrentNet::new(3, 4, 0.05).unwrap();
    let inputs = vec![vec![0.1, 0.2, 0.3], vec![0.2, 0.3, 0.4]];
    let targets = vec![0.4, 0.5];
    model.fit(&inputs, &targets, 3, &mut |_| {}).unwrap();

    let scaler = MinMaxScaler::fit(&[100.0, 110.0, 120.0, 130.0]).unwrap();
    (model, scaler)
}

#[test]
fn test_save_then_load_reproduces_predictions() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path()).unwrap();
    let (model, scaler) = trained_pair();

    store.save("TSLA", &model, &scaler, "v1").unwrap();
    let (loaded_model, loaded_scaler) = store.load("TSLA").unwrap();

    let window = vec![0.25, 0.5, 0.75];
    let before = model.predict_one(&window).unwrap();
    let after = loaded_model.predict_one(&window).unwrap();
    assert_eq!(before.to_bits(), after.to_bits());

    assert_eq!(scaler, loaded_scaler);
}

#[test]
fn test_missing_symbol_is_artifact_missing() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path()).unwrap();

    match store.load("NEVER_TRAINED") {
        Err(ForecastError::ArtifactMissing { symbol }) => assert_eq!(symbol, "NEVER_TRAINED"),
        other => panic!("Expected ArtifactMissing, got {:?}", other),
    }
    assert!(!store.exists("NEVER_TRAINED"));
}

#[test]
fn test_partial_pair_counts_as_missing() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path()).unwrap();
    let (model, scaler) = trained_pair();

    let model_path = store.save("BYD", &model, &scaler, "v1").unwrap();
    assert!(store.exists("BYD"));

    // Remove one half of the pair; the artifact must now read as absent
    std::fs::remove_file(dir.path().join("BYD_scaler.json")).unwrap();
    assert!(model_path.exists());
    assert!(!store.exists("BYD"));
    assert!(matches!(
        store.load("BYD"),
        Err(ForecastError::ArtifactMissing { .. })
    ));
}

#[test]
fn test_save_overwrites_previous_artifact() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path()).unwrap();

    let (first_model, scaler) = trained_pair();
    store.save("TM", &first_model, &scaler, "v1").unwrap();

    let (second_model, _) = trained_pair();
    store.save("TM", &second_model, &scaler, "v2").unwrap();

    let (loaded, _) = store.load("TM").unwrap();
    let window = vec![0.3, 0.6, 0.9];
    assert_eq!(
        loaded.predict_one(&window).unwrap().to_bits(),
        second_model.predict_one(&window).unwrap().to_bits()
    );
}
