//! Overall risk aggregation across the six domains.

use crate::assessment::domain::RiskLevel;

/// Monotonic escalation rule over judged domain severities.
///
/// Applied in order: CRITICAL when any domain is CRITICAL or at least two
/// are SERIOUS; SERIOUS when any domain is SERIOUS or at least three are
/// MODERATE; MODERATE when any domain is MODERATE; LOW otherwise. The caller
/// only passes judged severities — a pending domain keeps the overall
/// suggestion pending and this function is never reached.
pub fn aggregate(risks: &[RiskLevel]) -> RiskLevel {
    let count = |level: RiskLevel| risks.iter().filter(|risk| **risk == level).count();

    let critical = count(RiskLevel::Critical);
    let serious = count(RiskLevel::Serious);
    let moderate = count(RiskLevel::Moderate);

    if critical > 0 || serious >= 2 {
        RiskLevel::Critical
    } else if serious > 0 || moderate >= 3 {
        RiskLevel::Serious
    } else if moderate > 0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}
