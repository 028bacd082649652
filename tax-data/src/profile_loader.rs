//! CSV loader for batches of taxpayer profiles.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Amount
//! columns other than `annual_salary` may be left empty (or omitted) and
//! then count as 0.
//!
//! | Column               | Required | Notes                                   |
//! |----------------------|----------|-----------------------------------------|
//! | `label`              | no       | Free text shown in reports              |
//! | `annual_salary`      | yes      | Gross annual salary                     |
//! | `age_group`          | yes      | `below60`, `60-80` or `above80`         |
//! | `regime`             | no       | `old` (default) or `new`                |
//! | `section_80c`        | no       |                                         |
//! | `section_80d`        | no       |                                         |
//! | `home_loan_interest` | no       |                                         |
//! | `basic_salary`       | no       | Annual                                  |
//! | `hra_received`       | no       | Annual                                  |
//! | `rent_paid`          | no       | Annual                                  |
//! | `location`           | no       | `metro` (default) or `non-metro`        |
//!
//! ```csv
//! label,annual_salary,age_group,section_80c,basic_salary,hra_received,rent_paid,location
//! alice,1500000,below60,150000,600000,180000,300000,metro
//! bob,800000,60-80,,,,,
//! ```

use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{
    AgeGroup, Deductions, HraDetails, Location, Regime, TaxError, TaxpayerProfile,
};
use thiserror::Error;

/// A single row of the profile CSV, exactly as it appears in the file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProfileRecord {
    pub label: Option<String>,
    pub annual_salary: Decimal,
    pub age_group: String,
    pub regime: Option<String>,
    pub section_80c: Option<Decimal>,
    pub section_80d: Option<Decimal>,
    pub home_loan_interest: Option<Decimal>,
    pub basic_salary: Option<Decimal>,
    pub hra_received: Option<Decimal>,
    pub rent_paid: Option<Decimal>,
    pub location: Option<String>,
}

/// A validated profile plus the label it was given in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledProfile {
    /// The `label` cell, or `row <n>` when the cell is empty.
    pub label: String,
    pub profile: TaxpayerProfile,
}

/// Errors that can occur while loading profile CSV data.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based (header = row 0).
    #[error("unrecognised {field} '{value}' on row {row}")]
    InvalidCode {
        field: &'static str,
        value: String,
        row: usize,
    },

    #[error("invalid profile on row {row}: {source}")]
    InvalidProfile {
        row: usize,
        #[source]
        source: TaxError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn parse_code<T>(
    field: &'static str,
    value: &str,
    row: usize,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, ProfileLoadError> {
    parse(value).ok_or_else(|| ProfileLoadError::InvalidCode {
        field,
        value: value.to_string(),
        row,
    })
}

/// Treats an empty optional code cell the same as a missing one.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn convert_row(
    record: ProfileRecord,
    row: usize,
) -> Result<LabeledProfile, ProfileLoadError> {
    let age_group = parse_code("age group", &record.age_group, row, AgeGroup::parse)?;
    let regime = match non_empty(&record.regime) {
        Some(code) => parse_code("regime", code, row, Regime::parse)?,
        None => Regime::Old,
    };
    let location = match non_empty(&record.location) {
        Some(code) => parse_code("location", code, row, Location::parse)?,
        None => Location::Metro,
    };

    let profile = TaxpayerProfile {
        annual_salary: record.annual_salary,
        age_group,
        regime,
        deductions: Deductions {
            section_80c: record.section_80c.unwrap_or_default(),
            section_80d: record.section_80d.unwrap_or_default(),
            home_loan_interest: record.home_loan_interest.unwrap_or_default(),
        },
        hra_details: HraDetails {
            basic_salary: record.basic_salary.unwrap_or_default(),
            hra_received: record.hra_received.unwrap_or_default(),
            rent_paid: record.rent_paid.unwrap_or_default(),
            location,
        },
    };
    profile
        .validate()
        .map_err(|source| ProfileLoadError::InvalidProfile { row, source })?;

    let label = non_empty(&record.label)
        .map(str::to_string)
        .unwrap_or_else(|| format!("row {row}"));

    Ok(LabeledProfile { label, profile })
}

/// Loader for taxpayer profile CSV files.
pub struct ProfileLoader;

impl ProfileLoader {
    /// Parses raw records without interpreting the code columns.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ProfileRecord>, ProfileLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: ProfileRecord = result?;
            records.push(record);
        }
        Ok(records)
    }

    /// Parses and validates every row, returning profiles in file order.
    ///
    /// # Errors
    ///
    /// * [`ProfileLoadError::Parse`] when the CSV is malformed or a required
    ///   column is missing.
    /// * [`ProfileLoadError::InvalidCode`] for an unknown age group, regime or
    ///   location code.
    /// * [`ProfileLoadError::InvalidProfile`] when a salary or HRA amount is
    ///   negative.
    pub fn load<R: Read>(reader: R) -> Result<Vec<LabeledProfile>, ProfileLoadError> {
        let profiles = Self::parse(reader)?
            .into_iter()
            .enumerate()
            .map(|(idx, record)| convert_row(record, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = profiles.len(), "loaded taxpayer profiles");
        Ok(profiles)
    }

    /// Convenience wrapper: open a file and delegate to [`ProfileLoader::load`].
    pub fn load_from_file(path: &Path) -> Result<Vec<LabeledProfile>, ProfileLoadError> {
        let file = std::fs::File::open(path).map_err(|source| ProfileLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load(file)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
annual_salary,age_group
800000,below60
";

    const FULL_CSV: &str = "\
label,annual_salary,age_group,regime,section_80c,section_80d,home_loan_interest,basic_salary,hra_received,rent_paid,location
alice,1500000,below60,old,150000,25000,200000,600000,180000,300000,metro
bob,900000,60-80,new,,,,,,,non-metro
";

    // =========================================================================
    // load
    // =========================================================================

    #[test]
    fn test_minimal_csv_uses_defaults() {
        let profiles = ProfileLoader::load(MINIMAL_CSV.as_bytes()).expect("should parse");

        assert_eq!(profiles.len(), 1);
        assert_eq!(
            profiles[0],
            LabeledProfile {
                label: "row 1".to_string(),
                profile: TaxpayerProfile::new(dec!(800000), AgeGroup::Below60, Regime::Old),
            }
        );
    }

    #[test]
    fn test_full_csv_populates_every_field() {
        let profiles = ProfileLoader::load(FULL_CSV.as_bytes()).expect("should parse");

        assert_eq!(profiles.len(), 2);

        let alice = &profiles[0];
        assert_eq!(alice.label, "alice");
        assert_eq!(alice.profile.deductions.section_80c, dec!(150000));
        assert_eq!(alice.profile.deductions.section_80d, dec!(25000));
        assert_eq!(alice.profile.deductions.home_loan_interest, dec!(200000));
        assert_eq!(alice.profile.hra_details.basic_salary, dec!(600000));
        assert_eq!(alice.profile.hra_details.hra_received, dec!(180000));
        assert_eq!(alice.profile.hra_details.rent_paid, dec!(300000));
        assert_eq!(alice.profile.hra_details.location, Location::Metro);

        let bob = &profiles[1];
        assert_eq!(bob.profile.age_group, AgeGroup::Senior);
        assert_eq!(bob.profile.regime, Regime::New);
        assert_eq!(bob.profile.deductions, Deductions::default());
        assert_eq!(bob.profile.hra_details.location, Location::NonMetro);
    }

    #[test]
    fn test_whitespace_and_column_order_are_tolerated() {
        let csv = "\
age_group , annual_salary , regime
 above80 , 700000 , NEW
";
        let profiles = ProfileLoader::load(csv.as_bytes()).expect("should parse");

        assert_eq!(profiles[0].profile.age_group, AgeGroup::SuperSenior);
        assert_eq!(profiles[0].profile.regime, Regime::New);
        assert_eq!(profiles[0].profile.annual_salary, dec!(700000));
    }

    #[test]
    fn test_header_only_yields_no_profiles() {
        let profiles =
            ProfileLoader::load("annual_salary,age_group\n".as_bytes()).expect("should parse");

        assert!(profiles.is_empty());
    }

    #[test]
    fn test_negative_deduction_is_kept_for_the_engine_to_clamp() {
        let csv = "annual_salary,age_group,section_80c\n800000,below60,-5000\n";

        let profiles = ProfileLoader::load(csv.as_bytes()).expect("should parse");

        assert_eq!(profiles[0].profile.deductions.section_80c, dec!(-5000));
    }

    // =========================================================================
    // errors
    // =========================================================================

    #[test]
    fn test_unknown_age_group_reports_row() {
        let csv = "\
annual_salary,age_group
800000,below60
900000,ancient
";
        let err = ProfileLoader::load(csv.as_bytes()).expect_err("should reject");

        match err {
            ProfileLoadError::InvalidCode { field, value, row } => {
                assert_eq!(field, "age group");
                assert_eq!(value, "ancient");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidCode, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_regime_is_rejected() {
        let csv = "annual_salary,age_group,regime\n800000,below60,middle\n";

        let err = ProfileLoader::load(csv.as_bytes()).expect_err("should reject");

        assert!(matches!(
            err,
            ProfileLoadError::InvalidCode { field: "regime", row: 1, .. }
        ));
    }

    #[test]
    fn test_negative_salary_is_invalid_profile() {
        let csv = "annual_salary,age_group\n-1,below60\n";

        let err = ProfileLoader::load(csv.as_bytes()).expect_err("should reject");

        match err {
            ProfileLoadError::InvalidProfile { row, source } => {
                assert_eq!(row, 1);
                assert!(matches!(source, TaxError::InvalidInput(_)));
            }
            other => panic!("expected InvalidProfile, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_salary_column_is_parse_error() {
        let csv = "age_group\nbelow60\n";

        let err = ProfileLoader::load(csv.as_bytes()).expect_err("should reject");

        assert!(matches!(err, ProfileLoadError::Parse(_)));
    }

    #[test]
    fn test_non_numeric_amount_is_parse_error() {
        let csv = "annual_salary,age_group\nlots,below60\n";

        let err = ProfileLoader::load(csv.as_bytes()).expect_err("should reject");

        assert!(matches!(err, ProfileLoadError::Parse(_)));
    }
}
