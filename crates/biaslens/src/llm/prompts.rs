//! Prompt templates for explanation generation.

use super::provider::ExplanationContext;

/// System prompt shared by all explanation requests.
pub fn system_prompt() -> &'static str {
    "You are a data fairness analyst. You explain dataset bias metrics to \
     non-specialists in plain language. Be concise, factual and avoid jargon. \
     Never invent numbers that were not provided."
}

/// Build the user prompt for explaining one analysis.
pub fn explanation_prompt(context: &ExplanationContext) -> String {
    let distribution = if context.distribution.is_empty() {
        "  (no groups)".to_string()
    } else {
        context
            .distribution
            .iter()
            .map(|(group, share)| format!("  - {}: {:.1}%", group, share * 100.0))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"A dataset was analysed for representation bias.

## Sensitive Attribute
{}

## Group Distribution
{}

## Fairness Metrics
- Disparate impact: {:.3} (1.0 = perfectly even; below 0.8 is a common warning threshold)
- Statistical parity difference: {:.3} (0.0 = perfectly even)

## Task
In 3-4 sentences, explain whether the dataset appears biased with respect to
this attribute, which group is under-represented, and one practical step to
reduce the imbalance. Respond with plain text only."#,
        context.attribute,
        distribution,
        context.disparate_impact,
        context.statistical_parity_difference
    )
}
