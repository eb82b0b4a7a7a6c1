mod support;

use predifix::features::{Feature, FeatureVector};
use predifix::health::HealthStatus;
use predifix::ml::{ArtifactError, CategoryEncoder, Classifier, sigmoid};
use predifix::pipeline::Artifacts;
use predifix::sensor::{ProductGrade, SensorReading};
use support::{ENCODER_JSON, MODEL_JSON, write_artifact};

fn nominal_m() -> SensorReading {
    SensorReading {
        grade: ProductGrade::M,
        air_temp_k: 300.0,
        process_temp_k: 310.0,
        rotational_speed_rpm: 1500.0,
        torque_nm: 40.0,
        tool_wear_min: 100.0,
    }
}

#[test]
fn nominal_reading_scores_end_to_end() {
    let artifacts = Artifacts::bundled().unwrap();
    let code_m = artifacts.encoder().encode(ProductGrade::M).unwrap();
    assert_eq!(code_m, 2);

    let assessment = artifacts.evaluate(&nominal_m()).unwrap();
    assert_eq!(
        assessment.features,
        FeatureVector::from_values([2.0, 300.0, 310.0, 1500.0, 40.0, 100.0, 10.0, 60000.0])
    );

    let p = assessment.prediction.probability;
    assert!((p - sigmoid(-4.9)).abs() < 1e-12, "p = {p}");
    assert_eq!(
        assessment.prediction.health_score,
        ((1.0 - p) * 100.0).round() as u8
    );
    assert_eq!(assessment.prediction.health_score, 99);
    assert_eq!(assessment.prediction.status, HealthStatus::Optimal);
    assert_eq!(assessment.energy_draw_kw(), 60.0);
}

#[test]
fn overloaded_worn_tool_is_critical() {
    let artifacts = Artifacts::bundled().unwrap();
    let reading = SensorReading {
        grade: ProductGrade::L,
        air_temp_k: 304.0,
        process_temp_k: 311.0,
        rotational_speed_rpm: 1200.0,
        torque_nm: 75.0,
        tool_wear_min: 220.0,
    };
    let assessment = artifacts.evaluate(&reading).unwrap();
    assert_eq!(assessment.features.get(Feature::TempDiff), 7.0);
    assert_eq!(assessment.features.get(Feature::Power), 90000.0);
    assert_eq!(assessment.prediction.status, HealthStatus::Critical);
    assert!(assessment.prediction.health_score < 50);
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    let artifacts = Artifacts::bundled().unwrap();
    let first = artifacts.evaluate(&nominal_m()).unwrap();
    for _ in 0..10 {
        let again = artifacts.evaluate(&nominal_m()).unwrap();
        assert_eq!(again, first);
        assert_eq!(
            again.prediction.probability.to_bits(),
            first.prediction.probability.to_bits()
        );
    }
}

#[test]
fn importance_chart_is_ascending() {
    let artifacts = Artifacts::bundled().unwrap();
    let chart = artifacts.importance_chart();
    assert_eq!(chart.len(), 8);
    assert!(chart.windows(2).all(|pair| pair[0].weight <= pair[1].weight));
    assert_eq!(chart.first().unwrap().label, "Type");
    assert_eq!(chart.last().unwrap().label, "Power");
    assert_eq!(
        artifacts.classifier().feature_importances().len(),
        chart.len()
    );
}

#[test]
fn artifacts_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_artifact(dir.path(), "champion_model.json", MODEL_JSON);
    let encoder = write_artifact(dir.path(), "label_encoder.json", ENCODER_JSON);
    let from_files = Artifacts::load(Some(&model), Some(&encoder)).unwrap();
    let bundled = Artifacts::bundled().unwrap();
    assert_eq!(
        from_files.evaluate(&nominal_m()).unwrap(),
        bundled.evaluate(&nominal_m()).unwrap()
    );
}

#[test]
fn corrupt_model_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_artifact(dir.path(), "champion_model.json", "{ not json");
    let err = Artifacts::load(Some(&model), None).unwrap_err();
    assert!(matches!(err, ArtifactError::ParseJson { .. }), "{err}");
}

#[test]
fn reordered_model_columns_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let swapped = MODEL_JSON.replacen(
        "\"air_temp_k\",\n    \"process_temp_k\"",
        "\"process_temp_k\",\n    \"air_temp_k\"",
        1,
    );
    assert_ne!(swapped, MODEL_JSON);
    let model = write_artifact(dir.path(), "champion_model.json", &swapped);
    let err = Artifacts::load(Some(&model), None).unwrap_err();
    assert!(matches!(err, ArtifactError::Invalid { .. }), "{err}");
    assert!(err.to_string().contains("column order"));
}

#[test]
fn missing_encoder_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("label_encoder.json");
    let err = Artifacts::load(None, Some(&missing)).unwrap_err();
    assert!(matches!(err, ArtifactError::Read { .. }), "{err}");
}
