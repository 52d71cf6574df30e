//! Integration tests for BiasLens.

use std::io::Write;
use tempfile::NamedTempFile;

use biaslens::report::{render_pdf, render_text};
use biaslens::{
    AttributeKind, BiasLens, BiasLensError, BiasTier, ExplanationSource, MockProvider,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn test_gender_scenario() {
    let content = "id,gender\n1,M\n2,M\n3,F\n4,M\n";
    let file = create_test_file(content);

    let (result, _) = BiasLens::new()
        .analyze_file(file.path(), "gender")
        .expect("Analysis failed");

    assert_eq!(result.attribute_kind, AttributeKind::Categorical);
    assert_eq!(result.total_rows, 4);
    assert_eq!(result.distribution.len(), 2);
    assert_eq!(result.distribution["M"], 0.75);
    assert_eq!(result.distribution["F"], 0.25);
    assert_eq!(result.disparate_impact, 0.333);
    assert_eq!(result.statistical_parity_difference, 0.5);
    assert_eq!(result.bias_tier, BiasTier::High);
    assert!(result.explanation.contains("gender"));
}

#[test]
fn test_age_scenario() {
    let content = "age,outcome\n20,1\n35,0\n50,1\n50,0\n";
    let file = create_test_file(content);

    let (result, _) = BiasLens::new()
        .analyze_file(file.path(), "age")
        .expect("Analysis failed");

    assert_eq!(result.attribute_type, "numeric (bucketed)");
    assert_eq!(result.group_counts["18–30"], 1);
    assert_eq!(result.group_counts["31–45"], 1);
    assert_eq!(result.group_counts["46+"], 2);
    assert_eq!(result.distribution["46+"], 0.5);
    assert_eq!(result.distribution["18–30"], 0.25);
    assert_eq!(result.disparate_impact, 0.5);
    assert_eq!(result.statistical_parity_difference, 0.25);
    assert_eq!(result.bias_tier, BiasTier::High);
}

#[test]
fn test_balanced_dataset() {
    let content = "region\nnorth\nsouth\nnorth\nsouth\neast\neast\n";
    let file = create_test_file(content);

    let (result, _) = BiasLens::new()
        .analyze_file(file.path(), "region")
        .expect("Analysis failed");

    assert_eq!(result.disparate_impact, 1.0);
    assert_eq!(result.statistical_parity_difference, 0.0);
    assert_eq!(result.bias_tier, BiasTier::None);
    assert!(!result.bias_detected);
    assert_eq!(result.recommendations, vec!["No major bias detected.".to_string()]);
}

#[test]
fn test_potential_bias_tier() {
    // 9 vs 7 of 16 rows: DI 0.778, SPD 0.125
    let mut content = String::from("group\n");
    for _ in 0..9 {
        content.push_str("a\n");
    }
    for _ in 0..7 {
        content.push_str("b\n");
    }
    let file = create_test_file(&content);

    let (result, _) = BiasLens::new()
        .analyze_file(file.path(), "group")
        .expect("Analysis failed");

    assert_eq!(result.disparate_impact, 0.778);
    assert_eq!(result.statistical_parity_difference, 0.125);
    assert_eq!(result.bias_tier, BiasTier::Potential);
}

#[test]
fn test_tsv_with_missing_values() {
    let content = "id\tgender\n1\tF\n2\tNA\n3\tM\n4\t\n5\tF\n";
    let file = create_test_file(content);

    let (result, source) = BiasLens::new()
        .analyze_file(file.path(), "gender")
        .expect("Analysis failed");

    assert_eq!(source.format, "tsv");
    assert_eq!(result.total_rows, 5);
    assert_eq!(result.eligible_rows, 3);
    assert_eq!(result.excluded_rows, 2);
    let sum: f64 = result.distribution.values().sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn test_mixed_column_is_categorical() {
    let content = "age\n25\n40\nunknown\n25\n";
    let file = create_test_file(content);

    let (result, _) = BiasLens::new()
        .analyze_file(file.path(), "age")
        .expect("Analysis failed");

    assert_eq!(result.attribute_kind, AttributeKind::Categorical);
    assert_eq!(result.group_counts["25"], 2);
    assert_eq!(result.group_counts["unknown"], 1);
}

#[test]
fn test_blank_header_columns_are_named() {
    let (result, source) = BiasLens::new()
        .analyze_bytes("export.csv", b"gender,,\nM,,\nF,,\nM,,\n", "gender")
        .expect("Blank headers should not reject the file");

    assert_eq!(source.column_count, 3);
    assert_eq!(result.group_counts["M"], 2);
}

#[test]
fn test_numeric_codes_keep_their_spelling() {
    let (result, _) = BiasLens::new()
        .analyze_bytes("t.csv", b"code\n01\n1\n1.0\nX\n", "code")
        .unwrap();

    assert_eq!(result.group_counts.len(), 4);
    assert_eq!(result.group_counts["01"], 1);
    assert_eq!(result.group_counts["1.0"], 1);
}

#[test]
fn test_proxy_feature_flagged() {
    let content = "gender,zip,income\nM,10001,50\nM,10002,70\nF,20001,60\nM,10003,60\n";
    let (result, _) = BiasLens::new()
        .analyze_bytes("t.csv", content.as_bytes(), "gender")
        .unwrap();

    assert_eq!(result.main_bias_driver.as_deref(), Some("zip"));
    assert_eq!(result.feature_correlations["income"], 0.0);
    assert!(
        result
            .recommendations
            .iter()
            .any(|r| r.starts_with("Remove proxy feature: zip"))
    );
    assert!(render_text(&result).contains("Proxy Features"));
}

// =============================================================================
// Error Handling
// =============================================================================

#[test]
fn test_column_not_found() {
    let file = create_test_file("gender\nM\nF\n");
    let err = BiasLens::new()
        .analyze_file(file.path(), "Gender")
        .unwrap_err();

    assert!(matches!(err, BiasLensError::ColumnNotFound { ref column } if column == "Gender"));
    assert!(err.to_string().contains("Gender"));
}

#[test]
fn test_all_missing_is_empty_distribution() {
    let file = create_test_file("id,gender\n1,\n2,NA\n3,null\n");
    let err = BiasLens::new()
        .analyze_file(file.path(), "gender")
        .unwrap_err();

    assert!(matches!(err, BiasLensError::EmptyGroupDistribution { .. }));
}

#[test]
fn test_all_out_of_range_is_empty_distribution() {
    let file = create_test_file("age\n-3\n150\n1000\n");
    let err = BiasLens::new().analyze_file(file.path(), "age").unwrap_err();

    assert!(matches!(err, BiasLensError::EmptyGroupDistribution { .. }));
}

#[test]
fn test_empty_and_header_only_files() {
    let lens = BiasLens::new();

    let empty = create_test_file("");
    assert!(matches!(
        lens.analyze_file(empty.path(), "gender"),
        Err(BiasLensError::MalformedInput(_))
    ));

    let header_only = create_test_file("gender,age\n");
    assert!(matches!(
        lens.analyze_file(header_only.path(), "gender"),
        Err(BiasLensError::MalformedInput(_))
    ));
}

#[test]
fn test_invalid_utf8_is_malformed() {
    let lens = BiasLens::new();
    let err = lens
        .analyze_bytes("bad.csv", b"gender\n\xFF\xFE\n", "gender")
        .unwrap_err();
    assert!(matches!(err, BiasLensError::MalformedInput(_)));
}

// =============================================================================
// Explanation Generation
// =============================================================================

#[test]
fn test_generator_failure_keeps_metrics() {
    let lens = BiasLens::new().with_llm(MockProvider::failing("deadline exceeded"));
    let (result, _) = lens
        .analyze_bytes("t.csv", b"gender\nM\nM\nF\nM\n", "gender")
        .expect("Analysis should degrade, not fail");

    assert_eq!(result.explanation_source, ExplanationSource::Fallback);
    assert_eq!(result.disparate_impact, 0.333);
}

#[test]
fn test_generator_text_used() {
    let lens = BiasLens::new().with_llm(MockProvider::new());
    let (result, _) = lens
        .analyze_bytes("t.csv", b"gender\nM\nM\nF\nM\n", "gender")
        .expect("Analysis failed");

    assert_eq!(result.explanation_source, ExplanationSource::Generated);
    assert!(result.explanation.contains("'F'"));
}

// =============================================================================
// Determinism & Reports
// =============================================================================

#[test]
fn test_repeat_analysis_is_identical() {
    let file = create_test_file("gender,age\nM,20\nF,35\nX,50\nM,50\nF,\n");
    let lens = BiasLens::new();

    for column in ["gender", "age"] {
        let (a, _) = lens.analyze_file(file.path(), column).unwrap();
        let (b, _) = lens.analyze_file(file.path(), column).unwrap();
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
        assert_eq!(render_pdf(&a), render_pdf(&b));
    }
}

#[test]
fn test_reports_render() {
    let (result, _) = BiasLens::new()
        .analyze_bytes("t.csv", b"age\n20\n35\n50\n50\n", "age")
        .unwrap();

    let text = render_text(&result);
    assert!(text.contains("Disparate impact"));
    assert!(text.contains("0.500"));
    assert!(text.contains("18–30"));

    let pdf = render_pdf(&result);
    assert!(pdf.starts_with(b"%PDF-1.4"));
    let body = String::from_utf8_lossy(&pdf);
    assert!(body.contains("(18-30)"));
    assert!(body.contains("Page 1 of 1"));
}

#[test]
fn test_pdf_keeps_latin1_groups_apart() {
    let (result, _) = BiasLens::new()
        .analyze_bytes("t.csv", "city\nZürich\nZärich\nZürich\n".as_bytes(), "city")
        .unwrap();

    let pdf = render_pdf(&result);
    let body = String::from_utf8_lossy(&pdf);
    assert!(body.contains("(Z\\374rich)"));
    assert!(body.contains("(Z\\344rich)"));
    assert!(!body.contains("Z?rich"));
}

#[test]
fn test_pdf_paginates_many_groups() {
    let mut content = String::from("id\n");
    for i in 0..150 {
        content.push_str(&format!("group_{}\n", i));
    }
    let (result, _) = BiasLens::new()
        .analyze_bytes("t.csv", content.as_bytes(), "id")
        .unwrap();

    let pdf = render_pdf(&result);
    let body = String::from_utf8_lossy(&pdf);
    assert!(!body.contains("/Count 1 "));
    assert!(body.contains("Page 2 of"));
}
