use dgc_structs::config::{EvaluatorConfig, ExecutionMode};
use dgc_structs::core::{Fitness, PassReport, Plan, ScoringFailure};

#[test]
fn test_plan_serialization() {
    let plan = Plan {
        unit_index: 2,
        slice_size: 37,
    };
    let json = serde_json::to_string(&plan).unwrap();
    let deserialized: Plan = serde_json::from_str(&json).unwrap();
    assert_eq!(plan, deserialized);
}

#[test]
fn test_fitness_serialization() {
    let score = Fitness::Score(0.125);
    let json = serde_json::to_string(&score).unwrap();
    let deserialized: Fitness = serde_json::from_str(&json).unwrap();
    assert_eq!(score, deserialized);
    assert_eq!(deserialized.score(), Some(0.125));

    let error = Fitness::Error("malformed individual".to_string());
    let json = serde_json::to_string(&error).unwrap();
    let deserialized: Fitness = serde_json::from_str(&json).unwrap();
    assert!(deserialized.is_error());
    assert_eq!(deserialized.score(), None);
}

#[test]
fn test_execution_mode_serialization() {
    assert_eq!(
        serde_json::to_string(&ExecutionMode::ThreadPool).unwrap(),
        "\"thread_pool\""
    );
    assert_eq!(
        serde_json::from_str::<ExecutionMode>("\"accelerator_batch\"").unwrap(),
        ExecutionMode::AcceleratorBatch
    );
}

#[test]
fn test_evaluator_config_roundtrip() {
    let config = EvaluatorConfig::accelerator(8, 128);
    let json = serde_json::to_string(&config).unwrap();
    let deserialized: EvaluatorConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, deserialized);
}

#[test]
fn test_pass_report_partial_failure() {
    let mut report = PassReport {
        population_size: 10,
        num_scored: 10,
        failures: Vec::new(),
        elapsed_ms: 5,
    };
    assert!(!report.is_partial_failure());

    report.num_scored = 9;
    report.failures.push(ScoringFailure {
        index: 3,
        error: "scoring kernel error".to_string(),
    });
    assert!(report.is_partial_failure());
}
