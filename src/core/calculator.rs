//! Commission and bonus arithmetic.
//!
//! [`compute`] is pure and accepts any numeric input, including negative counts
//! and unknown ranks. [`compute_checked`] runs the same arithmetic after
//! rejecting those inputs.

use crate::domain::model::{
    CalculationResult, CommissionStructure, EarningsBreakdown, PerformanceInput, Projections,
};
use crate::utils::error::{EarningsError, Result};
use crate::utils::validation::{
    validate_min_count, validate_non_negative_count, validate_rate, Validate,
};

/// Team size is counted in blocks of this many members for the matrix bonus.
pub const MATRIX_TEAM_DIVISOR: f64 = 10.0;

/// Projections treat the computed total as weekly earnings.
pub const MONTHLY_MULTIPLIER: f64 = 4.0;
pub const YEARLY_MULTIPLIER: f64 = 48.0;

pub fn compute(structure: &CommissionStructure, input: &PerformanceInput) -> CalculationResult {
    let matrix_bonus = input.matrix_level as f64
        * structure.matrix_bonus
        * (input.team_size as f64 / MATRIX_TEAM_DIVISOR);
    let referral_bonus = input.direct_referrals as f64 * structure.referral_bonus;
    let matching_bonus = referral_bonus * (structure.matching_bonus / 100.0);
    let cycle_bonus = input.cycles_completed as f64 * structure.cycle_bonus;
    let fast_start_bonus = if input.fast_start_qualified {
        structure.fast_start_bonus
    } else {
        0.0
    };
    let leadership_bonus = (input.team_size as f64
        * structure.leadership_bonus
        * input.leadership_rank.multiplier())
        / 100.0;

    let breakdown = EarningsBreakdown {
        matrix_bonus,
        referral_bonus,
        matching_bonus,
        cycle_bonus,
        fast_start_bonus,
        leadership_bonus,
    };
    let total_earnings = breakdown.total();

    tracing::trace!(
        total_earnings,
        rank = %input.leadership_rank,
        "computed earnings"
    );

    CalculationResult {
        total_earnings,
        breakdown,
        projections: Projections {
            monthly: total_earnings * MONTHLY_MULTIPLIER,
            yearly: total_earnings * YEARLY_MULTIPLIER,
        },
    }
}

pub fn compute_checked(
    structure: &CommissionStructure,
    input: &PerformanceInput,
) -> Result<CalculationResult> {
    structure.validate()?;
    input.validate()?;
    Ok(compute(structure, input))
}

impl Validate for CommissionStructure {
    fn validate(&self) -> Result<()> {
        validate_rate("matrix_bonus", self.matrix_bonus)?;
        validate_rate("referral_bonus", self.referral_bonus)?;
        validate_rate("matching_bonus", self.matching_bonus)?;
        validate_rate("cycle_bonus", self.cycle_bonus)?;
        validate_rate("fast_start_bonus", self.fast_start_bonus)?;
        validate_rate("leadership_bonus", self.leadership_bonus)?;
        Ok(())
    }
}

impl Validate for PerformanceInput {
    fn validate(&self) -> Result<()> {
        validate_min_count("matrix_level", self.matrix_level, 1)?;
        validate_non_negative_count("direct_referrals", self.direct_referrals)?;
        validate_non_negative_count("team_size", self.team_size)?;
        validate_non_negative_count("cycles_completed", self.cycles_completed)?;

        if !self.leadership_rank.is_recognized() {
            return Err(EarningsError::invalid_input(
                "leadership_rank",
                &self.leadership_rank,
                "Unknown rank. Valid ranks: None, Bronze, Silver, Gold, Platinum, Diamond",
            ));
        }

        Ok(())
    }
}
