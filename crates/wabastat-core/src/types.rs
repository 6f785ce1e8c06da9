//! Core domain types for wabastat
//!
//! A [`Row`] is one spreadsheet record with a fixed, enumerated set of
//! optional fields. Cells hold a [`CellValue`], which is whatever the decoder
//! found: text or a number. Counter cells are turned into integers by
//! [`coerce_int`], which never fails.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Country label used for rows without a country
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// A raw cell value as produced by an ingestion adapter
///
/// # Examples
/// ```
/// use wabastat_core::types::CellValue;
///
/// assert_eq!(CellValue::from("US").to_string(), "US");
/// assert_eq!(CellValue::from(42.0).to_string(), "42");
/// assert_eq!(CellValue::from(2.5).to_string(), "2.5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// String cell
    Text(String),
    /// Numeric cell
    Number(f64),
}

impl CellValue {
    /// Whether the value counts as present for "first truthy value" checks
    ///
    /// Empty text, zero and NaN are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
        }
    }

    /// Convert a JSON scalar into a cell value
    ///
    /// Booleans render as `TRUE`/`FALSE` the way spreadsheets display them.
    /// Null, arrays and objects have no cell representation.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Number(n) => n.as_f64().map(Self::Number),
            serde_json::Value::Bool(b) => Some(Self::Text(bool_label(*b).to_string())),
            _ => None,
        }
    }
}

/// Spreadsheet rendering of a boolean cell
pub fn bool_label(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) if is_integral(*n) => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            Self::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// The eight numeric delivery-status columns
///
/// Declaration order is the canonical column order used for totals and
/// table output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CounterField {
    Requested,
    Submitted,
    Sent,
    Delivered,
    Read,
    Failed,
    Pending,
    NotSent,
}

impl CounterField {
    /// Number of counter fields
    pub const COUNT: usize = 8;

    /// All counter fields in canonical order
    pub const ALL: [CounterField; Self::COUNT] = [
        Self::Requested,
        Self::Submitted,
        Self::Sent,
        Self::Delivered,
        Self::Read,
        Self::Failed,
        Self::Pending,
        Self::NotSent,
    ];

    /// Position in [`CounterField::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Normalized field name, e.g. `deliveredcount`
    pub fn key(self) -> &'static str {
        match self {
            Self::Requested => "requestedcount",
            Self::Submitted => "submittedcount",
            Self::Sent => "sentcount",
            Self::Delivered => "deliveredcount",
            Self::Read => "readcount",
            Self::Failed => "failedcount",
            Self::Pending => "pendingcount",
            Self::NotSent => "notsentcount",
        }
    }

    /// Column heading for display
    pub fn label(self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::Submitted => "Submitted",
            Self::Sent => "Sent",
            Self::Delivered => "Delivered",
            Self::Read => "Read",
            Self::Failed => "Failed",
            Self::Pending => "Pending",
            Self::NotSent => "Not Sent",
        }
    }
}

impl fmt::Display for CounterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CounterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Field::from_header(s) {
            Some(Field::Counter(counter)) => Ok(counter),
            _ => Err(format!("Unknown counter field: {s}")),
        }
    }
}

/// Every column a [`Row`] recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AccountId,
    WabaNumber,
    Country,
    Counter(CounterField),
    AsOfDate,
}

impl Field {
    /// All recognized fields in display order
    pub fn all() -> impl Iterator<Item = Field> {
        [Self::AccountId, Self::WabaNumber, Self::Country]
            .into_iter()
            .chain(CounterField::ALL.into_iter().map(Self::Counter))
            .chain(std::iter::once(Self::AsOfDate))
    }

    /// Normalized field name
    pub fn key(self) -> &'static str {
        match self {
            Self::AccountId => "accountid",
            Self::WabaNumber => "wabanumber",
            Self::Country => "country",
            Self::Counter(counter) => counter.key(),
            Self::AsOfDate => "as_of_date",
        }
    }

    /// Map a spreadsheet header to a field
    ///
    /// Headers are compared case-insensitively with whitespace, `_` and `-`
    /// removed, so `"Account ID"`, `"account_id"` and `"accountid"` are the
    /// same column.
    ///
    /// ```
    /// use wabastat_core::types::{CounterField, Field};
    ///
    /// assert_eq!(Field::from_header("Account ID"), Some(Field::AccountId));
    /// assert_eq!(Field::from_header("As Of Date"), Some(Field::AsOfDate));
    /// assert_eq!(
    ///     Field::from_header("not_sent_count"),
    ///     Some(Field::Counter(CounterField::NotSent))
    /// );
    /// assert_eq!(Field::from_header("template"), None);
    /// ```
    pub fn from_header(header: &str) -> Option<Field> {
        let compact = compact_header(header);
        if compact.is_empty() {
            return None;
        }
        Self::all().find(|field| compact_header(field.key()) == compact)
    }
}

fn compact_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// One parsed spreadsheet record
///
/// # Examples
/// ```
/// use wabastat_core::types::{CounterField, Field, Row};
///
/// let row = Row::new()
///     .with(Field::Country, "IN")
///     .with(Field::Counter(CounterField::Delivered), "12")
///     .with(Field::Counter(CounterField::Failed), 3.0);
///
/// assert_eq!(row.normalized_country(), "IN");
/// assert_eq!(row.counter_value(CounterField::Delivered), 12);
/// assert_eq!(row.counter_value(CounterField::Failed), 3);
/// assert_eq!(row.counter_value(CounterField::Read), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Business account identifier
    pub account_id: Option<CellValue>,
    /// Sender phone number
    pub waba_number: Option<CellValue>,
    /// Destination country
    pub country: Option<CellValue>,
    /// Report snapshot date
    pub as_of_date: Option<CellValue>,
    counters: [Option<CellValue>; CounterField::COUNT],
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(header, value)` pairs
    ///
    /// Headers are normalized with [`Field::from_header`]. Unrecognized
    /// headers are dropped; when two headers map to the same field the first
    /// one wins.
    pub fn from_cells<I, K>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, CellValue)>,
        K: AsRef<str>,
    {
        let mut row = Self::new();
        for (header, value) in cells {
            match Field::from_header(header.as_ref()) {
                Some(field) if row.get(field).is_none() => row.set(field, value),
                Some(_) => {}
                None => debug!("Ignoring unrecognized column '{}'", header.as_ref()),
            }
        }
        row
    }

    /// Builder-style setter
    pub fn with(mut self, field: Field, value: impl Into<CellValue>) -> Self {
        self.set(field, value.into());
        self
    }

    /// Get a field's raw value
    pub fn get(&self, field: Field) -> Option<&CellValue> {
        match field {
            Field::AccountId => self.account_id.as_ref(),
            Field::WabaNumber => self.waba_number.as_ref(),
            Field::Country => self.country.as_ref(),
            Field::Counter(counter) => self.counter(counter),
            Field::AsOfDate => self.as_of_date.as_ref(),
        }
    }

    /// Set a field's raw value
    pub fn set(&mut self, field: Field, value: CellValue) {
        let slot = match field {
            Field::AccountId => &mut self.account_id,
            Field::WabaNumber => &mut self.waba_number,
            Field::Country => &mut self.country,
            Field::Counter(counter) => &mut self.counters[counter.index()],
            Field::AsOfDate => &mut self.as_of_date,
        };
        *slot = Some(value);
    }

    /// Raw value of a counter field
    pub fn counter(&self, field: CounterField) -> Option<&CellValue> {
        self.counters[field.index()].as_ref()
    }

    /// Counter value coerced to an integer
    pub fn counter_value(&self, field: CounterField) -> u64 {
        coerce_int(self.counter(field))
    }

    /// Country name, with [`UNKNOWN_COUNTRY`] for absent or empty values
    ///
    /// Falsy cells (empty text, `0`, NaN) count as absent.
    pub fn normalized_country(&self) -> String {
        match &self.country {
            Some(value) if value.is_truthy() => value.to_string(),
            _ => UNKNOWN_COUNTRY.to_string(),
        }
    }

    /// Whether no recognized field is present
    pub fn is_blank(&self) -> bool {
        Field::all().all(|field| self.get(field).is_none())
    }

    /// Display text for a field, empty when absent
    pub fn display(&self, field: Field) -> String {
        self.get(field).map(ToString::to_string).unwrap_or_default()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present: Vec<(Field, &CellValue)> = Field::all()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
            .collect();
        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (field, value) in present {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}

/// Reads a record in document order so the first duplicate header wins
struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping column headers to cell values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Row, A::Error> {
        let mut cells = Vec::new();
        while let Some((header, value)) = map.next_entry::<String, serde_json::Value>()? {
            if let Some(cell) = CellValue::from_json(&value) {
                cells.push((header, cell));
            }
        }
        Ok(Row::from_cells(cells))
    }
}

/// Coerce a raw cell to a non-negative integer
///
/// This is total over every input:
/// - absent cells are 0
/// - text is read as a base-10 integer prefix after leading whitespace
///   (`"12abc"` is 12, `"5.9"` is 5, `"abc"` is 0)
/// - numbers are truncated toward zero, NaN and infinities are 0
/// - negative values clamp to 0 and oversized values saturate
///
/// ```
/// use wabastat_core::types::{CellValue, coerce_int};
///
/// assert_eq!(coerce_int(None), 0);
/// assert_eq!(coerce_int(Some(&CellValue::from(" 42 "))), 42);
/// assert_eq!(coerce_int(Some(&CellValue::from("abc"))), 0);
/// assert_eq!(coerce_int(Some(&CellValue::from(7.8))), 7);
/// assert_eq!(coerce_int(Some(&CellValue::from("-3"))), 0);
/// ```
pub fn coerce_int(value: Option<&CellValue>) -> u64 {
    match value {
        None => 0,
        Some(CellValue::Number(n)) => coerce_number(*n),
        Some(CellValue::Text(s)) => coerce_text(s),
    }
}

fn coerce_number(n: f64) -> u64 {
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    // float-to-int `as` saturates at u64::MAX
    n.trunc() as u64
}

fn coerce_text(text: &str) -> u64 {
    let text = text.trim_start();
    let (negative, rest) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if negative || digits.is_empty() {
        return 0;
    }

    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn test_coerce_text_prefixes() {
        assert_eq!(coerce_int(Some(&text("15"))), 15);
        assert_eq!(coerce_int(Some(&text("  15"))), 15);
        assert_eq!(coerce_int(Some(&text("15 messages"))), 15);
        assert_eq!(coerce_int(Some(&text("3.99"))), 3);
        assert_eq!(coerce_int(Some(&text("+8"))), 8);
        assert_eq!(coerce_int(Some(&text("1e3"))), 1);
        assert_eq!(coerce_int(Some(&text("007"))), 7);
    }

    #[test]
    fn test_coerce_text_garbage_is_zero() {
        assert_eq!(coerce_int(Some(&text(""))), 0);
        assert_eq!(coerce_int(Some(&text("abc"))), 0);
        assert_eq!(coerce_int(Some(&text("   "))), 0);
        assert_eq!(coerce_int(Some(&text("-"))), 0);
        assert_eq!(coerce_int(Some(&text("N/A"))), 0);
    }

    #[test]
    fn test_coerce_negative_clamps() {
        assert_eq!(coerce_int(Some(&text("-12"))), 0);
        assert_eq!(coerce_int(Some(&CellValue::Number(-4.0))), 0);
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce_int(Some(&CellValue::Number(12.0))), 12);
        assert_eq!(coerce_int(Some(&CellValue::Number(12.999))), 12);
        assert_eq!(coerce_int(Some(&CellValue::Number(0.5))), 0);
        assert_eq!(coerce_int(Some(&CellValue::Number(f64::NAN))), 0);
        assert_eq!(coerce_int(Some(&CellValue::Number(f64::INFINITY))), 0);
        assert_eq!(coerce_int(Some(&CellValue::Number(1e30))), u64::MAX);
    }

    #[test]
    fn test_coerce_saturates_long_digit_runs() {
        let huge = "9".repeat(40);
        assert_eq!(coerce_int(Some(&text(&huge))), u64::MAX);
    }

    #[test]
    fn test_header_normalization() {
        assert_eq!(Field::from_header("accountid"), Some(Field::AccountId));
        assert_eq!(Field::from_header("  WABA Number "), Some(Field::WabaNumber));
        assert_eq!(Field::from_header("Country"), Some(Field::Country));
        assert_eq!(Field::from_header("as_of_date"), Some(Field::AsOfDate));
        assert_eq!(
            Field::from_header("Delivered-Count"),
            Some(Field::Counter(CounterField::Delivered))
        );
        assert_eq!(Field::from_header(""), None);
        assert_eq!(Field::from_header("Delivered"), None);
    }

    #[test]
    fn test_counter_field_from_str() {
        assert_eq!(
            "pendingcount".parse::<CounterField>(),
            Ok(CounterField::Pending)
        );
        assert!("country".parse::<CounterField>().is_err());
    }

    #[test]
    fn test_counter_order_matches_index() {
        for (i, field) in CounterField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_row_from_cells_first_header_wins() {
        let row = Row::from_cells([
            ("Country", text("US")),
            ("country", text("DE")),
            ("template_name", text("welcome")),
        ]);
        assert_eq!(row.country, Some(text("US")));
        assert_eq!(row.normalized_country(), "US");
    }

    #[test]
    fn test_normalized_country() {
        assert_eq!(Row::new().normalized_country(), UNKNOWN_COUNTRY);
        assert_eq!(
            Row::new().with(Field::Country, "").normalized_country(),
            UNKNOWN_COUNTRY
        );
        assert_eq!(Row::new().with(Field::Country, 91.0).normalized_country(), "91");
    }

    #[test]
    fn test_falsy_country_is_unknown() {
        assert_eq!(
            Row::new().with(Field::Country, 0.0).normalized_country(),
            UNKNOWN_COUNTRY
        );
        assert_eq!(
            Row::new().with(Field::Country, f64::NAN).normalized_country(),
            UNKNOWN_COUNTRY
        );
        // "0" as text is truthy
        assert_eq!(Row::new().with(Field::Country, "0").normalized_country(), "0");
    }

    #[test]
    fn test_row_is_blank() {
        assert!(Row::new().is_blank());
        assert!(!Row::new().with(Field::AccountId, "acc-1").is_blank());
    }

    #[test]
    fn test_row_json_shape() {
        let row = Row::new()
            .with(Field::AccountId, "acc-1")
            .with(Field::Counter(CounterField::Sent), 10.0)
            .with(Field::Counter(CounterField::Read), 1.5);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["accountid"], "acc-1");
        assert_eq!(json["sentcount"], 10);
        assert_eq!(json["readcount"], 1.5);
        assert!(json.get("country").is_none());
    }

    #[test]
    fn test_row_deserialize_skips_unusable_values() {
        let row: Row = serde_json::from_str(
            r#"{"Country":"BR","deliveredcount":"4","failedcount":null,"meta":{"a":1},"Read Count":true}"#,
        )
        .unwrap();

        assert_eq!(row.normalized_country(), "BR");
        assert_eq!(row.counter_value(CounterField::Delivered), 4);
        assert!(row.counter(CounterField::Failed).is_none());
        assert_eq!(row.counter(CounterField::Read), Some(&text("TRUE")));
        assert_eq!(row.counter_value(CounterField::Read), 0);
    }

    #[test]
    fn test_row_deserialize_keeps_document_order() {
        let row: Row = serde_json::from_str(r#"{"country":"US","Country":"DE"}"#).unwrap();
        assert_eq!(row.normalized_country(), "US");

        let row: Row = serde_json::from_str(r#"{"Country":"DE","country":"US"}"#).unwrap();
        assert_eq!(row.normalized_country(), "DE");
    }

    #[test]
    fn test_row_deserialize_rejects_non_objects() {
        assert!(serde_json::from_str::<Row>(r#"["US", 4]"#).is_err());
    }

    #[test]
    fn test_truthiness() {
        assert!(text("2024-01-01").is_truthy());
        assert!(!text("").is_truthy());
        assert!(CellValue::Number(45292.0).is_truthy());
        assert!(!CellValue::Number(0.0).is_truthy());
    }
}
