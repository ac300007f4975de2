//! Leakage status classification.
//!
//! Maps a zone's leakage rate onto a four-tier status with a fixed
//! recommended action. Tiers are half-open on the upper bound and checked
//! in ascending order, so each boundary value belongs to the higher tier:
//!
//!   rate < 10        excellent (A)  low
//!   10 <= rate < 15  good      (B)  low
//!   15 <= rate < 25  warning   (C)  medium
//!   rate >= 25       critical  (D)  high

use serde::{Deserialize, Serialize};

use crate::model::CRITICAL_LEAKAGE_RATE;

/// Lower bound (%) of the `Good` tier.
pub const GOOD_LEAKAGE_RATE: f64 = 10.0;

/// Lower bound (%) of the `Warning` tier.
pub const WARNING_LEAKAGE_RATE: f64 = 15.0;

/// Leakage status, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeakageStatus {
    Excellent,
    Good,
    Warning,
    Critical,
}

/// Letter grade shown in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeakageLevel {
    A,
    B,
    C,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Classification result for one leakage rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakageAssessment {
    pub status: LeakageStatus,
    pub level: LeakageLevel,
    pub level_label: String,
    pub recommended_action: String,
    pub urgency: Urgency,
}

impl LeakageStatus {
    pub fn level(self) -> LeakageLevel {
        match self {
            LeakageStatus::Excellent => LeakageLevel::A,
            LeakageStatus::Good => LeakageLevel::B,
            LeakageStatus::Warning => LeakageLevel::C,
            LeakageStatus::Critical => LeakageLevel::D,
        }
    }

    pub fn urgency(self) -> Urgency {
        match self {
            LeakageStatus::Excellent | LeakageStatus::Good => Urgency::Low,
            LeakageStatus::Warning => Urgency::Medium,
            LeakageStatus::Critical => Urgency::High,
        }
    }

    pub fn recommended_action(self) -> &'static str {
        match self {
            LeakageStatus::Excellent => "Maintain current operation with routine maintenance",
            LeakageStatus::Good => "Watch the leakage trend and step up patrol inspections",
            LeakageStatus::Warning => "Locate leak points and draw up a remediation plan",
            LeakageStatus::Critical => {
                "Start DMA step testing immediately and prioritise leak detection"
            }
        }
    }
}

impl std::fmt::Display for LeakageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeakageStatus::Excellent => write!(f, "excellent"),
            LeakageStatus::Good => write!(f, "good"),
            LeakageStatus::Warning => write!(f, "warning"),
            LeakageStatus::Critical => write!(f, "critical"),
        }
    }
}

impl std::fmt::Display for LeakageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeakageLevel::A => write!(f, "A"),
            LeakageLevel::B => write!(f, "B"),
            LeakageLevel::C => write!(f, "C"),
            LeakageLevel::D => write!(f, "D"),
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::High => write!(f, "high"),
        }
    }
}

/// Classifies a leakage rate (%). Total over all inputs; NaN falls through
/// every comparison and lands in `Critical`.
pub fn classify(leakage_rate: f64) -> LeakageAssessment {
    let status = if leakage_rate < GOOD_LEAKAGE_RATE {
        LeakageStatus::Excellent
    } else if leakage_rate < WARNING_LEAKAGE_RATE {
        LeakageStatus::Good
    } else if leakage_rate < CRITICAL_LEAKAGE_RATE {
        LeakageStatus::Warning
    } else {
        LeakageStatus::Critical
    };

    let level = status.level();
    let label = match status {
        LeakageStatus::Excellent => "Excellent",
        LeakageStatus::Good => "Good",
        LeakageStatus::Warning => "Needs attention",
        LeakageStatus::Critical => "Severe",
    };

    LeakageAssessment {
        status,
        level,
        level_label: format!("{}-{}", level, label),
        recommended_action: status.recommended_action().to_string(),
        urgency: status.urgency(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_belong_to_higher_tier() {
        let cases = [
            (9.9, LeakageStatus::Excellent, LeakageLevel::A),
            (10.0, LeakageStatus::Good, LeakageLevel::B),
            (14.999, LeakageStatus::Good, LeakageLevel::B),
            (15.0, LeakageStatus::Warning, LeakageLevel::C),
            (24.999, LeakageStatus::Warning, LeakageLevel::C),
            (25.0, LeakageStatus::Critical, LeakageLevel::D),
        ];
        for (rate, status, level) in cases {
            let assessment = classify(rate);
            assert_eq!(assessment.status, status, "rate {} classified wrongly", rate);
            assert_eq!(assessment.level, level, "rate {} has wrong level", rate);
        }
    }

    #[test]
    fn test_urgency_by_tier() {
        assert_eq!(classify(0.0).urgency, Urgency::Low);
        assert_eq!(classify(12.0).urgency, Urgency::Low);
        assert_eq!(classify(20.0).urgency, Urgency::Medium);
        assert_eq!(classify(60.0).urgency, Urgency::High);
    }

    #[test]
    fn test_negative_rate_is_excellent() {
        // Metering error can make the rate negative; it still classifies.
        assert_eq!(classify(-5.0).status, LeakageStatus::Excellent);
    }

    #[test]
    fn test_level_label_and_action_are_populated() {
        let assessment = classify(30.0);
        assert_eq!(assessment.level_label, "D-Severe");
        assert!(!assessment.recommended_action.is_empty());
        assert_ne!(
            classify(5.0).recommended_action,
            assessment.recommended_action,
            "each tier carries its own action"
        );
    }

    #[test]
    fn test_statuses_ordered_by_severity() {
        assert!(LeakageStatus::Excellent < LeakageStatus::Good);
        assert!(LeakageStatus::Good < LeakageStatus::Warning);
        assert!(LeakageStatus::Warning < LeakageStatus::Critical);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_value(classify(20.0)).unwrap();
        assert_eq!(json["status"], "warning");
        assert_eq!(json["urgency"], "medium");
        assert_eq!(json["level"], "C");
    }
}
