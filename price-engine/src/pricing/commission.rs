//! Commission rate resolution

use shared::models::{CommissionRuleSet, Plan};

use crate::core::{EngineResult, PricingError};

/// Commission percent for `plan` under the rule named `rule_key`
///
/// A missing rule is a hard error. Falling back to 0% would understate
/// marketplace cost.
pub fn resolve(rule_key: &str, plan: Plan, rules: &CommissionRuleSet) -> EngineResult<f64> {
    let rule = rules.get(rule_key).ok_or_else(|| {
        tracing::warn!(rule_key, %plan, "Commission rule not found");
        PricingError::UnknownCommissionRule(rule_key.to_string())
    })?;

    let percent = rule.percent_for(plan);
    if !percent.is_finite() || percent < 0.0 {
        return Err(PricingError::invalid_input(
            "commission_percent",
            format!("rule '{}' has an invalid {} rate: {}", rule_key, plan, percent),
        ));
    }
    Ok(percent)
}
