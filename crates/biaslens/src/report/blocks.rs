//! Renderer-independent report content.

use crate::bias::AnalysisResult;

/// Report title.
pub const REPORT_TITLE: &str = "BiasLens Fairness Report";

/// One unit of report content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    /// Label/value pair.
    Field(String, String),
    Paragraph(String),
    /// Three-column table with a header row.
    Table {
        header: [String; 3],
        rows: Vec<[String; 3]>,
    },
    Bullets(Vec<String>),
}

/// Lay out an analysis as an ordered list of blocks.
pub fn blocks(result: &AnalysisResult) -> Vec<Block> {
    let mut out = vec![
        Block::Heading("Sensitive Attribute".to_string()),
        Block::Field("Attribute".to_string(), result.sensitive_attribute.clone()),
        Block::Field("Type".to_string(), result.attribute_type.clone()),
        Block::Field("Rows".to_string(), result.total_rows.to_string()),
        Block::Field("Eligible rows".to_string(), result.eligible_rows.to_string()),
        Block::Field("Excluded rows".to_string(), result.excluded_rows.to_string()),
        Block::Heading("Fairness Metrics".to_string()),
        Block::Field(
            "Disparate impact".to_string(),
            format!("{:.3}", result.disparate_impact),
        ),
        Block::Field(
            "Statistical parity difference".to_string(),
            format!("{:.3}", result.statistical_parity_difference),
        ),
        Block::Heading("Group Distribution".to_string()),
    ];

    let rows = result
        .distribution
        .iter()
        .map(|(group, share)| {
            let count = result.group_counts.get(group).copied().unwrap_or(0);
            [
                group.clone(),
                count.to_string(),
                format!("{:.2}%", share * 100.0),
            ]
        })
        .collect();
    out.push(Block::Table {
        header: ["Group".to_string(), "Count".to_string(), "Share".to_string()],
        rows,
    });

    out.push(Block::Heading("Bias Assessment".to_string()));
    out.push(Block::Field(
        "Assessment".to_string(),
        capitalize(result.bias_tier.label()),
    ));
    out.push(Block::Paragraph(result.explanation.clone()));

    if !result.feature_correlations.is_empty() {
        out.push(Block::Heading("Proxy Features".to_string()));
        let rows = result
            .feature_correlations
            .iter()
            .map(|(feature, r)| {
                let role = if result.main_bias_driver.as_deref() == Some(feature.as_str()) {
                    "main driver"
                } else {
                    ""
                };
                [feature.clone(), format!("{:.3}", r), role.to_string()]
            })
            .collect();
        out.push(Block::Table {
            header: [
                "Feature".to_string(),
                "Correlation".to_string(),
                "Role".to_string(),
            ],
            rows,
        });
    }

    out.push(Block::Heading("Recommendations".to_string()));
    out.push(Block::Bullets(result.recommendations.clone()));

    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
