use codice_fiscale::{
    normalize_input, validate, CheckKind, DatasetConfig, DatasetError, DatasetFormat, Diagnostic,
    FiscalCodeValidator, MunicipalityDataset, MunicipalityLookup, CHECK_FAILURES, VALIDATIONS,
};
use metrics::{Key, Label};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::CompositeKey;
use metrics_util::MetricKind::Counter;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn scanned_dataset() -> MunicipalityDataset {
    MunicipalityDataset::load(&DatasetConfig::new(fixture("italy_cities.json"))).unwrap()
}

#[test]
fn test_scan_fixture_dataset() {
    let dataset = scanned_dataset();

    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.place_name("H501"), Some("Roma"));
    assert_eq!(dataset.place_name("L219"), Some("Torino"));
    assert_eq!(dataset.place_name("D612"), Some("Firenze"));
}

#[test]
fn test_json_fixture_dataset() {
    let config = DatasetConfig::new(fixture("comuni_records.json")).format(DatasetFormat::Json);
    let dataset = MunicipalityDataset::load(&config).unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.place_name("L219"), Some("Torino"));
}

#[test]
fn test_missing_dataset_is_an_error() {
    let config = DatasetConfig::new(fixture("missing.json"));
    assert!(matches!(
        MunicipalityDataset::load(&config),
        Err(DatasetError::Io { .. })
    ));
}

#[test]
fn test_validate_user_input() {
    let dataset = scanned_dataset();
    let code = normalize_input("  bnclra90t45d612j ");

    let result = validate(&code, &dataset);
    assert!(result.valid);
    assert_eq!(
        result.messages().collect::<Vec<_>>(),
        vec![
            "format valid",
            "month valid: T -> 12",
            "day valid (female): 5",
            "municipality code found in dataset: raw=D612, normalized=D612, name=Firenze",
            "check character valid: J",
        ]
    );
}

#[test]
fn test_omocodic_code_resolves_municipality() {
    let result = validate("BNCLRA90T45D6MNJ", &scanned_dataset());

    assert!(result.valid);
    assert!(result.diagnostics.contains(&Diagnostic::MunicipalityFound {
        raw: "D6MN".to_string(),
        normalized: "D612".to_string(),
        name: "Firenze".to_string(),
    }));
}

#[test]
fn test_every_failure_is_reported() {
    // month, day and municipality are wrong, and so is the check character
    let result = validate("RSSMRA85X99H999Q", &scanned_dataset());

    assert!(!result.valid);
    assert_eq!(result.diagnostics.len(), 5);
    assert_eq!(
        result.failures().map(Diagnostic::check).collect::<Vec<_>>(),
        vec![
            CheckKind::Month,
            CheckKind::Day,
            CheckKind::Municipality,
            CheckKind::Checksum
        ]
    );
}

#[test]
fn test_json_report() {
    let result = validate("RSSMRA85M01H501Z", &scanned_dataset());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(
        json["messages"][4],
        "check character mismatch: expected Q but found Z"
    );
}

#[test]
fn test_shared_dataset_across_threads() {
    let validator = Arc::new(FiscalCodeValidator::new(Arc::new(scanned_dataset())));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let validator = validator.clone();
            std::thread::spawn(move || validator.validate("RSSMRA85M01H501Q").valid)
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn should_submit_validation_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let validator = FiscalCodeValidator::new(scanned_dataset());
        validator.validate("RSSMRA85M01H501Q");
        validator.validate("RSSMRA85M01H501Z");
        validator.validate("RSSMRA85M01H501");
    });

    let snapshot = snapshotter.snapshot().into_hashmap();

    let counter_value = |labels: Vec<Label>, name: &'static str| {
        match snapshot
            .get(&CompositeKey::new(Counter, Key::from_parts(name, labels)))
            .expect("metric not found")
        {
            (_, _, DebugValue::Counter(value)) => *value,
            _ => panic!("{name} is not a counter"),
        }
    };

    assert_eq!(
        counter_value(vec![Label::new("outcome", "valid")], VALIDATIONS),
        1
    );
    assert_eq!(
        counter_value(vec![Label::new("outcome", "invalid")], VALIDATIONS),
        2
    );
    assert_eq!(
        counter_value(vec![Label::new("check", "checksum")], CHECK_FAILURES),
        1
    );
    assert_eq!(
        counter_value(vec![Label::new("check", "length")], CHECK_FAILURES),
        1
    );
}
