use serde::{Deserialize, Serialize};
use std::fmt;

/// Rate table applied to a member's performance.
///
/// `matching_bonus` and `leadership_bonus` are percentages; the other four are
/// flat amounts per unit of activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommissionStructure {
    pub matrix_bonus: f64,
    pub referral_bonus: f64,
    pub matching_bonus: f64,
    pub cycle_bonus: f64,
    pub fast_start_bonus: f64,
    pub leadership_bonus: f64,
}

impl Default for CommissionStructure {
    // 後台計算器的初始費率表
    fn default() -> Self {
        Self {
            matrix_bonus: 10.0,
            referral_bonus: 5.0,
            matching_bonus: 3.0,
            cycle_bonus: 50.0,
            fast_start_bonus: 25.0,
            leadership_bonus: 15.0,
        }
    }
}

/// Leadership tier. Ordered None < Bronze < ... < Diamond.
///
/// Labels that do not name a known tier are kept as `Unrecognized` instead of
/// being rejected, so a typo in a rank column still yields a result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeadershipRank {
    #[default]
    None,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Unrecognized(String),
}

impl LeadershipRank {
    pub const KNOWN: [LeadershipRank; 6] = [
        LeadershipRank::None,
        LeadershipRank::Bronze,
        LeadershipRank::Silver,
        LeadershipRank::Gold,
        LeadershipRank::Platinum,
        LeadershipRank::Diamond,
    ];

    /// Case-insensitive; never fails. A blank label means no rank.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "" | "none" => LeadershipRank::None,
            "bronze" => LeadershipRank::Bronze,
            "silver" => LeadershipRank::Silver,
            "gold" => LeadershipRank::Gold,
            "platinum" => LeadershipRank::Platinum,
            "diamond" => LeadershipRank::Diamond,
            _ => LeadershipRank::Unrecognized(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LeadershipRank::None => "None",
            LeadershipRank::Bronze => "Bronze",
            LeadershipRank::Silver => "Silver",
            LeadershipRank::Gold => "Gold",
            LeadershipRank::Platinum => "Platinum",
            LeadershipRank::Diamond => "Diamond",
            LeadershipRank::Unrecognized(label) => label,
        }
    }

    /// Multiplier used by the leadership bonus. Unrecognized ranks earn nothing.
    pub fn multiplier(&self) -> f64 {
        match self {
            LeadershipRank::None => 0.0,
            LeadershipRank::Bronze => 1.0,
            LeadershipRank::Silver => 2.0,
            LeadershipRank::Gold => 3.0,
            LeadershipRank::Platinum => 4.0,
            LeadershipRank::Diamond => 5.0,
            LeadershipRank::Unrecognized(_) => 0.0,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, LeadershipRank::Unrecognized(_))
    }
}

impl From<String> for LeadershipRank {
    fn from(label: String) -> Self {
        LeadershipRank::from_label(&label)
    }
}

impl From<&str> for LeadershipRank {
    fn from(label: &str) -> Self {
        LeadershipRank::from_label(label)
    }
}

impl From<LeadershipRank> for String {
    fn from(rank: LeadershipRank) -> Self {
        rank.label().to_string()
    }
}

impl fmt::Display for LeadershipRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of one member's activity for a period.
///
/// Counts are signed: negative values are passed through to the arithmetic
/// unless the caller opts into strict validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceInput {
    pub matrix_level: i64,
    pub direct_referrals: i64,
    pub team_size: i64,
    pub cycles_completed: i64,
    pub leadership_rank: LeadershipRank,
    pub fast_start_qualified: bool,
}

impl Default for PerformanceInput {
    fn default() -> Self {
        Self {
            matrix_level: 1,
            direct_referrals: 0,
            team_size: 0,
            cycles_completed: 0,
            leadership_rank: LeadershipRank::None,
            fast_start_qualified: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    pub matrix_bonus: f64,
    pub referral_bonus: f64,
    pub matching_bonus: f64,
    pub cycle_bonus: f64,
    pub fast_start_bonus: f64,
    pub leadership_bonus: f64,
}

impl EarningsBreakdown {
    pub fn total(&self) -> f64 {
        self.components().iter().map(|(_, value)| value).sum()
    }

    /// Components in display order, keyed by their field name.
    pub fn components(&self) -> [(&'static str, f64); 6] {
        [
            ("matrix_bonus", self.matrix_bonus),
            ("referral_bonus", self.referral_bonus),
            ("matching_bonus", self.matching_bonus),
            ("cycle_bonus", self.cycle_bonus),
            ("fast_start_bonus", self.fast_start_bonus),
            ("leadership_bonus", self.leadership_bonus),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Projections {
    pub monthly: f64,
    pub yearly: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total_earnings: f64,
    pub breakdown: EarningsBreakdown,
    pub projections: Projections,
}

/// One row of a batch input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberPerformance {
    pub member_id: String,
    pub performance: PerformanceInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEarnings {
    pub member_id: String,
    pub result: CalculationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub member_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchResult {
    pub earnings: Vec<MemberEarnings>,
    pub skipped: Vec<SkippedRow>,
}
