//! Preset black-swan scenarios.
//!
//! Four rare, high-impact event templates with base probabilities that are
//! adjusted for the industry and the analysis horizon.

use std::collections::BTreeMap;

use super::analysis::{ScenarioAnalysis, ScenarioType};

/// Severity score attached to every black-swan outcome.
pub const BLACK_SWAN_SEVERITY: f64 = 0.8;

/// Impact score attached to every black-swan outcome.
pub const BLACK_SWAN_IMPACT_SCORE: f64 = 0.9;

const MITIGATION_STRATEGIES: [&str; 5] = [
    "Develop contingency plans",
    "Diversify risk exposure",
    "Build financial reserves",
    "Implement early warning systems",
    "Create crisis management protocols",
];

/// Black-swan event templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlackSwanEvent {
    /// Global pandemic.
    Pandemic,
    /// Capital-markets crisis.
    FinancialCrisis,
    /// Major security breach.
    CyberAttack,
    /// Sudden regulatory change.
    RegulatoryShock,
}

impl BlackSwanEvent {
    /// All templates, in reporting order.
    pub fn all() -> [Self; 4] {
        [
            Self::Pandemic,
            Self::FinancialCrisis,
            Self::CyberAttack,
            Self::RegulatoryShock,
        ]
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pandemic => "Pandemic",
            Self::FinancialCrisis => "Financial Crisis",
            Self::CyberAttack => "Cyber Attack",
            Self::RegulatoryShock => "Regulatory Shock",
        }
    }

    /// Get description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Pandemic => "Global pandemic disrupting business operations",
            Self::FinancialCrisis => "Major financial crisis affecting capital markets",
            Self::CyberAttack => "Major cyber security breach or attack",
            Self::RegulatoryShock => "Sudden major regulatory change",
        }
    }

    /// Unadjusted probability over the analysis horizon.
    pub fn base_probability(&self) -> f64 {
        match self {
            Self::Pandemic => 0.05,
            Self::FinancialCrisis => 0.10,
            Self::CyberAttack => 0.15,
            Self::RegulatoryShock => 0.20,
        }
    }

    /// Channels through which the event hits the business.
    pub fn impact_factors(&self) -> &'static [&'static str] {
        match self {
            Self::Pandemic => &[
                "supply_chain_disruption",
                "demand_shock",
                "workforce_disruption",
            ],
            Self::FinancialCrisis => &["credit_crunch", "market_volatility", "currency_fluctuation"],
            Self::CyberAttack => &["data_breach", "system_downtime", "reputation_damage"],
            Self::RegulatoryShock => &[
                "compliance_costs",
                "business_model_disruption",
                "market_access",
            ],
        }
    }

    /// Quantitative assumptions; recovery and adaptation times are in months.
    pub fn assumptions(&self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Pandemic => &[
                ("revenue_impact", -0.4),
                ("cost_increase", 0.2),
                ("recovery_time", 18.0),
            ],
            Self::FinancialCrisis => &[
                ("revenue_impact", -0.3),
                ("financing_cost_increase", 0.5),
                ("recovery_time", 24.0),
            ],
            Self::CyberAttack => &[
                ("revenue_impact", -0.2),
                ("recovery_cost", 1_000_000.0),
                ("recovery_time", 6.0),
            ],
            Self::RegulatoryShock => &[
                ("compliance_cost_increase", 0.3),
                ("revenue_impact", -0.15),
                ("adaptation_time", 12.0),
            ],
        }
    }

    /// Probability adjusted for industry and horizon, capped at 1.
    ///
    /// Industry (case-insensitive exact match): technology doubles cyber
    /// attacks; healthcare and financial raise pandemic and financial-crisis
    /// risk by half respectively. A horizon containing "long" scales by 1.5,
    /// one containing "short" by 0.5.
    pub fn adjusted_probability(&self, industry: &str, time_horizon: &str) -> f64 {
        let industry = industry.to_lowercase();
        let horizon = time_horizon.to_lowercase();

        let mut probability = self.base_probability();
        probability *= match (industry.as_str(), self) {
            ("technology", Self::CyberAttack) => 2.0,
            ("healthcare", Self::Pandemic) => 1.5,
            ("financial", Self::FinancialCrisis) => 1.5,
            _ => 1.0,
        };
        if horizon.contains("long") {
            probability *= 1.5;
        } else if horizon.contains("short") {
            probability *= 0.5;
        }
        probability.min(1.0)
    }

    /// Builds the scenario for this event.
    pub fn scenario(&self, industry: &str, time_horizon: &str) -> ScenarioAnalysis {
        let probability = self.adjusted_probability(industry, time_horizon);
        ScenarioAnalysis {
            scenario_name: format!("Black Swan: {}", self.name()),
            scenario_type: ScenarioType::BlackSwan,
            assumptions: self
                .assumptions()
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
            outcomes: BTreeMap::from([
                ("probability".to_string(), probability),
                ("severity".to_string(), BLACK_SWAN_SEVERITY),
                ("impact_score".to_string(), BLACK_SWAN_IMPACT_SCORE),
            ]),
            probability,
            impact_assessment: self.description().to_string(),
            risk_factors: self.impact_factors().iter().map(|f| f.to_string()).collect(),
            mitigation_strategies: MITIGATION_STRATEGIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Builds all black-swan scenarios for an industry and horizon.
///
/// # Examples
///
/// ```rust
/// use stratsim_risk::scenarios::black_swan_scenarios;
///
/// let scenarios = black_swan_scenarios("Technology", "medium term");
/// assert_eq!(scenarios.len(), 4);
/// assert_eq!(scenarios[2].scenario_name, "Black Swan: Cyber Attack");
/// assert!((scenarios[2].probability - 0.30).abs() < 1e-12);
/// ```
pub fn black_swan_scenarios(industry: &str, time_horizon: &str) -> Vec<ScenarioAnalysis> {
    BlackSwanEvent::all()
        .iter()
        .map(|event| event.scenario(industry, time_horizon))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_base_probabilities() {
        let scenarios = black_swan_scenarios("retail", "medium");
        let probs: Vec<f64> = scenarios.iter().map(|s| s.probability).collect();
        assert_eq!(probs, vec![0.05, 0.10, 0.15, 0.20]);
        assert!(scenarios.iter().all(|s| s.scenario_type == ScenarioType::BlackSwan));
        assert!(scenarios.iter().all(|s| s.mitigation_strategies.len() == 5));
    }

    #[test]
    fn test_industry_adjustments() {
        assert_relative_eq!(
            BlackSwanEvent::Pandemic.adjusted_probability("HEALTHCARE", "medium"),
            0.075,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            BlackSwanEvent::FinancialCrisis.adjusted_probability("financial", "medium"),
            0.15,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            BlackSwanEvent::Pandemic.adjusted_probability("technology", "medium"),
            0.05,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_horizon_adjustments() {
        assert_relative_eq!(
            BlackSwanEvent::RegulatoryShock.adjusted_probability("retail", "Long-term"),
            0.30,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            BlackSwanEvent::RegulatoryShock.adjusted_probability("retail", "short"),
            0.10,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_combined_adjustment() {
        // 0.15 * 2 * 1.5
        assert_relative_eq!(
            BlackSwanEvent::CyberAttack.adjusted_probability("technology", "long"),
            0.45,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_scenario_contents() {
        let s = BlackSwanEvent::CyberAttack.scenario("x", "y");
        assert_eq!(s.assumptions["recovery_cost"], 1_000_000.0);
        assert_eq!(s.outcomes["severity"], BLACK_SWAN_SEVERITY);
        assert_eq!(s.outcomes["probability"], s.probability);
        assert_eq!(s.risk_factors.len(), 3);
    }
}
