//! Integration tests for Trendlens
//!
//! These tests verify the end-to-end behavior of the analytics engine:
//! every operation through the facade, structured failure handling, id-keyed
//! reply correlation under concurrency, and teardown semantics.

use std::time::Duration;
use trendlens::{
    AnalysisParams, AnalysisPayload, AnalysisResult, AnalyticsEngine, EngineError, MetricSeries,
    ReportOptions, build_report, generate_json_report,
};

/// Test that every recognized operation round-trips through the engine
#[test]
fn test_all_operations_round_trip() {
    let engine = AnalyticsEngine::spawn().unwrap();
    let series: Vec<f64> = (0..28).map(|i| 100.0 + i as f64).collect();
    let metrics = vec![
        MetricSeries::new("a", series.clone()),
        MetricSeries::new("b", series.iter().rev().cloned().collect::<Vec<f64>>()),
    ];

    match engine.analyze_trend(&series).wait().unwrap() {
        AnalysisResult::Trend(Some(fit)) => {
            assert!((fit.slope - 1.0).abs() < 1e-9);
            assert_eq!(fit.predictions.len(), series.len());
        }
        other => panic!("unexpected trend result: {other:?}"),
    }

    match engine.detect_anomalies(&series, None).wait().unwrap() {
        AnalysisResult::Anomalies(anomalies) => assert!(anomalies.is_empty()),
        other => panic!("unexpected anomaly result: {other:?}"),
    }

    match engine.seasonal_analysis(&series, Some(7)).wait().unwrap() {
        AnalysisResult::Seasonal(Some(parts)) => {
            assert_eq!(parts.seasonal.len(), 7);
            for i in 0..series.len() {
                let rebuilt = parts.trend[i] + parts.seasonal[i % 7] + parts.residual[i];
                assert!((rebuilt - series[i]).abs() < 1e-9);
            }
        }
        other => panic!("unexpected seasonal result: {other:?}"),
    }

    match engine.correlation_analysis(&metrics).wait().unwrap() {
        AnalysisResult::Correlations(pairs) => {
            // Exactly one unordered pair, perfectly anti-correlated
            assert_eq!(pairs.len(), 1);
            assert_eq!(pairs[0].first, "a");
            assert_eq!(pairs[0].second, "b");
            assert!((pairs[0].coefficient + 1.0).abs() < 1e-9);
        }
        other => panic!("unexpected correlation result: {other:?}"),
    }

    match engine.predictive_modeling(&series, Some(3)).wait().unwrap() {
        AnalysisResult::Forecast(Some(projection)) => {
            assert_eq!(projection.points.len(), 3);
            assert!((projection.points[0].value - 128.0).abs() < 1e-6);
        }
        other => panic!("unexpected forecast result: {other:?}"),
    }

    match engine.generate_insights(&metrics).wait().unwrap() {
        AnalysisResult::Insights(insights) => assert!(!insights.is_empty()),
        other => panic!("unexpected insight result: {other:?}"),
    }

    engine.shutdown();
}

/// Test that an unknown operation is a structured error, not a crash
#[test]
fn test_unknown_operation_replies_with_error() {
    let engine = AnalyticsEngine::spawn().unwrap();

    let outcome = engine
        .submit(
            "bogus",
            AnalysisPayload::Series(vec![1.0, 2.0, 3.0]),
            AnalysisParams::default(),
        )
        .wait();
    match outcome {
        Err(EngineError::Analysis(message)) => assert_eq!(message, "Unknown analysis type"),
        other => panic!("expected structured error, got {other:?}"),
    }

    // The worker survived and keeps serving
    assert!(engine.analyze_trend(&[1.0, 2.0, 3.0]).wait().is_ok());
    engine.shutdown();
}

/// Test id-keyed correlation: 50 concurrent requests resolved in reverse order
#[test]
fn test_fifty_concurrent_requests_resolve_by_id() {
    let engine = AnalyticsEngine::spawn().unwrap();

    // Request k carries a series with slope exactly k
    let mut pendings = Vec::new();
    for k in 1..=50u32 {
        let series: Vec<f64> = (0..4).map(|i| (i * k) as f64).collect();
        pendings.push((k, engine.analyze_trend(&series)));
    }

    // Wait in reverse issue order; each handle must carry its own result
    for (k, pending) in pendings.into_iter().rev() {
        match pending.wait().unwrap() {
            AnalysisResult::Trend(Some(fit)) => {
                assert!(
                    (fit.slope - k as f64).abs() < 1e-9,
                    "request {k} resolved with slope {}",
                    fit.slope
                );
            }
            other => panic!("unexpected result for request {k}: {other:?}"),
        }
    }

    engine.shutdown();
}

/// Test that undersized inputs complete with empty results, not errors
#[test]
fn test_undersized_inputs_complete_empty() {
    let engine = AnalyticsEngine::spawn().unwrap();

    assert_eq!(
        engine.analyze_trend(&[5.0]).wait().unwrap(),
        AnalysisResult::Trend(None)
    );
    assert_eq!(
        engine.detect_anomalies(&[1.0, 2.0], None).wait().unwrap(),
        AnalysisResult::Anomalies(Vec::new())
    );
    assert_eq!(
        engine.seasonal_analysis(&[1.0; 10], Some(7)).wait().unwrap(),
        AnalysisResult::Seasonal(None)
    );
    assert_eq!(
        engine.predictive_modeling(&[1.0, 2.0], None).wait().unwrap(),
        AnalysisResult::Forecast(None)
    );

    // A batch where every series is too short yields no insights
    let short = vec![
        MetricSeries::new("x", vec![1.0]),
        MetricSeries::new("y", vec![1.0, 2.0]),
    ];
    assert_eq!(
        engine.generate_insights(&short).wait().unwrap(),
        AnalysisResult::Insights(Vec::new())
    );
    assert_eq!(
        engine.generate_insights(&[]).wait().unwrap(),
        AnalysisResult::Insights(Vec::new())
    );

    engine.shutdown();
}

/// Test payload-shape mismatches surface as structured errors
#[test]
fn test_payload_mismatch_is_structured_error() {
    let engine = AnalyticsEngine::spawn().unwrap();

    let outcome = engine
        .submit(
            "generate_insights",
            AnalysisPayload::Series(vec![1.0, 2.0, 3.0]),
            AnalysisParams::default(),
        )
        .wait();
    assert!(matches!(outcome, Err(EngineError::Analysis(_))));

    engine.shutdown();
}

/// Test teardown abandons in-flight work without panics or hangs
#[test]
fn test_shutdown_abandons_in_flight_requests() {
    let engine = AnalyticsEngine::spawn().unwrap();

    let mut pendings = Vec::new();
    for _ in 0..20 {
        pendings.push(engine.detect_anomalies(&[1.0, 2.0, 3.0, 100.0, 2.0], None));
    }
    engine.shutdown();

    for pending in pendings {
        match pending.wait_timeout(Duration::from_millis(200)) {
            Ok(_) | Err(EngineError::Disconnected) => {}
            other => panic!("unexpected outcome after shutdown: {other:?}"),
        }
    }
}

/// Test a constant series produces clean results everywhere
#[test]
fn test_constant_series_has_no_artifacts() {
    let engine = AnalyticsEngine::spawn().unwrap();
    let flat = vec![5.0; 20];

    match engine.detect_anomalies(&flat, Some(0.1)).wait().unwrap() {
        AnalysisResult::Anomalies(anomalies) => assert!(anomalies.is_empty()),
        other => panic!("unexpected result: {other:?}"),
    }

    match engine.analyze_trend(&flat).wait().unwrap() {
        AnalysisResult::Trend(Some(fit)) => {
            assert!(fit.slope.abs() < 1e-12);
            assert!(fit.r_squared.is_finite());
            assert!(fit.std_error.is_finite());
        }
        other => panic!("unexpected result: {other:?}"),
    }

    engine.shutdown();
}

/// Test report assembly and JSON round trip
#[test]
fn test_report_json_round_trip() {
    let metrics = vec![
        MetricSeries::new(
            "revenue",
            (0..28).map(|i| 1000.0 + 12.5 * i as f64).collect::<Vec<f64>>(),
        ),
        MetricSeries::new(
            "orders",
            (0..28).map(|i| 50.0 + (i % 7) as f64).collect::<Vec<f64>>(),
        ),
    ];

    let report = build_report(&metrics, &ReportOptions::default());
    let json = generate_json_report(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["metrics"].as_array().unwrap().len(), 2);
    assert_eq!(value["correlations"].as_array().unwrap().len(), 1);
    assert!(value["insights"].as_array().unwrap().len() >= 2);
    assert_eq!(value["meta"]["schema_version"], 1);
}
