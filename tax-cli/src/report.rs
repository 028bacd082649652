//! Plain-text rendering of engine output for the terminal.
//!
//! Each report is a thin wrapper implementing [`fmt::Display`], so callers
//! print with `println!("{}", ...)` and tests compare `to_string()`.

use std::fmt;

use rust_decimal::Decimal;
use tax_core::display::{format_rupees, slab_range_label};
use tax_core::{AgeGroup, Regime, RegimeComparison, SlabTable, Suggestion, TaxResult};

use crate::history::CalculationHistory;

const LABEL_WIDTH: usize = 22;
const AMOUNT_WIDTH: usize = 14;

fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    writeln!(
        f,
        "  {label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        format_rupees(amount)
    )
}

/// Full breakdown of one regime's result.
pub struct ResultReport<'a>(pub &'a TaxResult);

impl fmt::Display for ResultReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.0;
        writeln!(f, "{} ({})", r.regime.label(), r.age_group.label())?;
        line(f, "Gross salary", r.gross_salary)?;
        line(f, "Standard deduction", r.standard_deduction)?;
        line(f, "Other deductions", r.total_deductions)?;
        if !r.total_deductions.is_zero() {
            let d = &r.deductions;
            writeln!(
                f,
                "    80C {} | 80D {} | HRA {} | Home loan {}",
                format_rupees(d.section_80c),
                format_rupees(d.section_80d),
                format_rupees(d.hra_exemption),
                format_rupees(d.home_loan_interest),
            )?;
        }
        line(f, "Taxable income", r.taxable_income)?;

        if !r.slab_breakdown.is_empty() {
            writeln!(f, "  Slab breakdown")?;
            for slab in &r.slab_breakdown {
                writeln!(
                    f,
                    "    {:<24}{:>4}% on {:>12} = {:>10}",
                    slab.range,
                    slab.rate_percent.normalize(),
                    format_rupees(slab.taxable_amount),
                    format_rupees(slab.tax),
                )?;
            }
        }

        line(f, "Tax before rebate", r.tax_before_rebate)?;
        line(f, "Rebate u/s 87A", r.rebate)?;
        line(f, "Tax after rebate", r.tax_after_rebate)?;
        line(f, "Health & edu. cess", r.cess)?;
        line(f, "Final tax", r.final_tax)?;
        line(f, "Monthly take-home", r.monthly_take_home)?;
        writeln!(
            f,
            "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
            "Effective rate",
            format!("{}%", r.effective_rate_percent().round_dp(2))
        )
    }
}

/// Both regimes followed by the recommendation.
pub struct ComparisonReport<'a>(pub &'a RegimeComparison);

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let c = self.0;
        writeln!(f, "{}", ResultReport(&c.old))?;
        writeln!(f, "{}", ResultReport(&c.new))?;

        let best = c.recommended_result();
        if c.annual_savings.is_zero() {
            writeln!(
                f,
                "Both regimes cost {}; {} recommended.",
                format_rupees(best.final_tax),
                c.recommended.label()
            )
        } else {
            writeln!(
                f,
                "Recommended: {} at {}, saving {} a year ({} a month).",
                c.recommended.label(),
                format_rupees(best.final_tax),
                format_rupees(c.annual_savings),
                format_rupees(c.monthly_savings),
            )
        }
    }
}

pub struct SuggestionsReport<'a>(pub &'a [Suggestion]);

impl fmt::Display for SuggestionsReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "All deduction limits are fully used.");
        }
        writeln!(f, "Tax-saving suggestions")?;
        for s in self.0 {
            writeln!(f, "  - {}: {}", s.title, s.description)?;
        }
        Ok(())
    }
}

/// The bracket table for one age group and regime.
pub struct SlabTableReport<'a> {
    pub table: &'a SlabTable,
    pub age_group: AgeGroup,
    pub regime: Regime,
}

impl fmt::Display for SlabTableReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}, {}", self.regime.label(), self.age_group.label())?;
        for slab in self.table.slabs() {
            writeln!(
                f,
                "  {:<24}{:>4}%",
                slab_range_label(slab),
                slab.rate_percent.normalize()
            )?;
        }
        Ok(())
    }
}

/// One row per labelled profile.
pub struct BatchReport<'a>(pub &'a [(String, RegimeComparison)]);

impl fmt::Display for BatchReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:<20}{:>14}{:>14}{:>14}  {}",
            "Profile", "Salary", "Old regime", "New regime", "Recommended"
        )?;
        for (label, c) in self.0 {
            writeln!(
                f,
                "{:<20}{:>14}{:>14}{:>14}  {} (saves {})",
                label,
                format_rupees(c.old.gross_salary),
                format_rupees(c.old.final_tax),
                format_rupees(c.new.final_tax),
                c.recommended.as_str(),
                format_rupees(c.annual_savings),
            )?;
        }
        Ok(())
    }
}

pub struct HistoryReport<'a>(pub &'a CalculationHistory);

impl fmt::Display for HistoryReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No saved calculations.");
        }
        for entry in self.0.entries() {
            let recommended = if entry.new.final_tax < entry.old.final_tax {
                Regime::New
            } else {
                Regime::Old
            };
            writeln!(
                f,
                "{}  {:>12}  {:<8} old {:>10}  new {:>10}  -> {}",
                entry.timestamp.format("%Y-%m-%d %H:%M UTC"),
                format_rupees(entry.profile.annual_salary),
                entry.profile.age_group.as_str(),
                format_rupees(entry.old.final_tax),
                format_rupees(entry.new.final_tax),
                recommended.as_str(),
            )?;
        }
        Ok(())
    }
}
