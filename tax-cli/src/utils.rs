use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Parses a rupee amount as typed on the command line.
///
/// A leading `₹` and every comma or space are dropped, so Indian
/// (`"1,50,000"`), western (`"150,000"`) and spaced (`"₹ 8,00,000"`) forms
/// all read the same. Blank input is 0. Amounts with more precision than a
/// [`Decimal`] can hold are rejected rather than rounded.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let amount: String = s
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if amount.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str_exact(&amount).map_err(|source| {
        tracing::warn!(input = %s, %source, "rejected amount");
        ParseDecimalError {
            input: s.to_string(),
            source,
        }
    })
}
