use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{AgeGroup, Regime, RulesError, SlabSchedule, SlabTable, TaxSlab};
use thiserror::Error;

/// Errors that can occur when loading a slab schedule.
#[derive(Debug, Error)]
pub enum SlabLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unrecognised {field} '{value}' on row {row}")]
    InvalidCode {
        field: &'static str,
        value: String,
        row: usize,
    },

    #[error("no brackets given for {age_group} / {regime} regime")]
    MissingTable { age_group: AgeGroup, regime: Regime },

    #[error("invalid brackets for {age_group} / {regime} regime: {source}")]
    InvalidTable {
        age_group: AgeGroup,
        regime: Regime,
        #[source]
        source: RulesError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for SlabLoadError {
    fn from(err: csv::Error) -> Self {
        SlabLoadError::CsvParse(err.to_string())
    }
}

/// A single record from the slab schedule CSV file.
///
/// - `age_group`: `below60`, `60-80` or `above80`
/// - `regime`: `old` or `new`
/// - `min_income`: lower bound of the bracket
/// - `max_income`: upper bound (empty for the unbounded top bracket)
/// - `rate_percent`: marginal rate as a percentage (e.g. `5` for 5%)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SlabRecord {
    pub age_group: String,
    pub regime: String,
    pub min_income: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate_percent: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for slab schedule overrides.
///
/// The file must cover all six age group / regime combinations. Brackets of
/// one combination are taken in file order and must form a valid table.
pub struct SlabScheduleLoader;

impl SlabScheduleLoader {
    /// Parse slab records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SlabRecord>, SlabLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Assemble a complete schedule from parsed records.
    pub fn build(records: &[SlabRecord]) -> Result<SlabSchedule, SlabLoadError> {
        let mut groups: BTreeMap<(AgeGroup, Regime), Vec<TaxSlab>> = BTreeMap::new();

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;
            let age_group =
                AgeGroup::parse(&record.age_group).ok_or_else(|| SlabLoadError::InvalidCode {
                    field: "age group",
                    value: record.age_group.clone(),
                    row,
                })?;
            let regime =
                Regime::parse(&record.regime).ok_or_else(|| SlabLoadError::InvalidCode {
                    field: "regime",
                    value: record.regime.clone(),
                    row,
                })?;

            groups.entry((age_group, regime)).or_default().push(TaxSlab::new(
                record.min_income,
                record.max_income,
                record.rate_percent,
            ));
        }

        let mut schedule = SlabSchedule::default();
        for regime in Regime::ALL {
            for age_group in AgeGroup::ALL {
                let slabs = groups
                    .remove(&(age_group, regime))
                    .ok_or(SlabLoadError::MissingTable { age_group, regime })?;
                let table = SlabTable::new(slabs).map_err(|source| SlabLoadError::InvalidTable {
                    age_group,
                    regime,
                    source,
                })?;
                schedule.set_table(age_group, regime, table);
            }
        }

        tracing::debug!(brackets = records.len(), "loaded slab schedule");
        Ok(schedule)
    }

    /// Read, parse and assemble a schedule from a file on disk.
    pub fn load_from_file(path: &Path) -> Result<SlabSchedule, SlabLoadError> {
        let file = std::fs::File::open(path).map_err(|source| SlabLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let records = Self::parse(file)?;
        Self::build(&records)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const REFERENCE_CSV: &str = "\
age_group,regime,min_income,max_income,rate_percent
below60,old,0,250000,0
below60,old,250000,500000,5
below60,old,500000,1000000,20
below60,old,1000000,,30
60-80,old,0,300000,0
60-80,old,300000,500000,5
60-80,old,500000,1000000,20
60-80,old,1000000,,30
above80,old,0,500000,0
above80,old,500000,1000000,20
above80,old,1000000,,30
below60,new,0,300000,0
below60,new,300000,600000,5
below60,new,600000,900000,10
below60,new,900000,1200000,15
below60,new,1200000,1500000,20
below60,new,1500000,,30
60-80,new,0,300000,0
60-80,new,300000,600000,5
60-80,new,600000,900000,10
60-80,new,900000,1200000,15
60-80,new,1200000,1500000,20
60-80,new,1500000,,30
above80,new,0,300000,0
above80,new,300000,600000,5
above80,new,600000,900000,10
above80,new,900000,1200000,15
above80,new,1200000,1500000,20
above80,new,1500000,,30
";

    fn without_rows(skip: &str) -> String {
        REFERENCE_CSV
            .lines()
            .filter(|line| !line.starts_with(skip))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // =========================================================================
    // parse
    // =========================================================================

    #[test]
    fn test_parse_single_bracket() {
        let csv = "age_group,regime,min_income,max_income,rate_percent\nbelow60,old,0,250000,0";

        let records = SlabScheduleLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![SlabRecord {
                age_group: "below60".to_string(),
                regime: "old".to_string(),
                min_income: dec!(0),
                max_income: Some(dec!(250000)),
                rate_percent: dec!(0),
            }]
        );
    }

    #[test]
    fn test_parse_unbounded_max_income() {
        let csv = "age_group,regime,min_income,max_income,rate_percent\nbelow60,new,1500000,,30";

        let records = SlabScheduleLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].rate_percent, dec!(30));
    }

    #[test]
    fn test_parse_bad_decimal() {
        let csv = "age_group,regime,min_income,max_income,rate_percent\nbelow60,old,abc,1,0";

        let err = SlabScheduleLoader::parse(csv.as_bytes()).expect_err("should fail");

        assert!(matches!(err, SlabLoadError::CsvParse(_)));
    }

    // =========================================================================
    // build
    // =========================================================================

    #[test]
    fn test_build_reference_schedule_matches_builtin() {
        let records = SlabScheduleLoader::parse(REFERENCE_CSV.as_bytes()).unwrap();

        let schedule = SlabScheduleLoader::build(&records).expect("should build");

        assert_eq!(schedule, SlabSchedule::fy_2025_26());
    }

    #[test]
    fn test_build_missing_combination() {
        let csv = without_rows("above80,new");
        let records = SlabScheduleLoader::parse(csv.as_bytes()).unwrap();

        let err = SlabScheduleLoader::build(&records).expect_err("should fail");

        match err {
            SlabLoadError::MissingTable { age_group, regime } => {
                assert_eq!(age_group, AgeGroup::SuperSenior);
                assert_eq!(regime, Regime::New);
            }
            other => panic!("expected MissingTable, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_gap() {
        let csv = REFERENCE_CSV.replace("below60,old,500000,1000000,20", "below60,old,600000,1000000,20");
        let records = SlabScheduleLoader::parse(csv.as_bytes()).unwrap();

        let err = SlabScheduleLoader::build(&records).expect_err("should fail");

        match err {
            SlabLoadError::InvalidTable {
                age_group,
                regime,
                source,
            } => {
                assert_eq!(age_group, AgeGroup::Below60);
                assert_eq!(regime, Regime::Old);
                assert!(matches!(source, RulesError::NotContiguous { .. }));
            }
            other => panic!("expected InvalidTable, got {other:?}"),
        }
    }

    #[test]
    fn test_build_unknown_regime_reports_row() {
        let csv = format!("{REFERENCE_CSV}below60,mixed,0,,0\n");
        let records = SlabScheduleLoader::parse(csv.as_bytes()).unwrap();

        let err = SlabScheduleLoader::build(&records).expect_err("should fail");

        match err {
            SlabLoadError::InvalidCode { field, value, row } => {
                assert_eq!(field, "regime");
                assert_eq!(value, "mixed");
                assert_eq!(row, 30);
            }
            other => panic!("expected InvalidCode, got {other:?}"),
        }
    }
}
