//! Commission Rule Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listing plan (two pricing tiers for the same listing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Classico,
    Premium,
}

impl Plan {
    /// Both standard plans, in display order
    pub const ALL: [Plan; 2] = [Plan::Classico, Plan::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Classico => "classico",
            Plan::Premium => "premium",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a plan identifier is not one of the standard plans
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan: {0}")]
pub struct UnknownPlan(pub String);

impl FromStr for Plan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classico" | "clássico" => Ok(Plan::Classico),
            "premium" => Ok(Plan::Premium),
            _ => Err(UnknownPlan(s.to_string())),
        }
    }
}

/// Commission rule: one percentage per plan, selected by key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRule {
    pub key: String,
    /// Commission for the classico plan (16 = 16%)
    pub classico_percent: f64,
    /// Commission for the premium plan
    pub premium_percent: f64,
}

impl CommissionRule {
    pub fn percent_for(&self, plan: Plan) -> f64 {
        match plan {
            Plan::Classico => self.classico_percent,
            Plan::Premium => self.premium_percent,
        }
    }
}

/// Commission rules of a store, keyed by `CommissionRule::key`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommissionRuleSet {
    rules: Vec<CommissionRule>,
}

impl CommissionRuleSet {
    pub fn new(rules: Vec<CommissionRule>) -> Self {
        Self { rules }
    }

    /// Find a rule by key (first entry wins on duplicate keys)
    pub fn get(&self, key: &str) -> Option<&CommissionRule> {
        self.rules.iter().find(|r| r.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<CommissionRule>> for CommissionRuleSet {
    fn from(rules: Vec<CommissionRule>) -> Self {
        Self::new(rules)
    }
}
