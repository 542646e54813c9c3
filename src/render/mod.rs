//! Markdown rendering of Yandex API payloads.
//!
//! Renderers are lenient: missing fields print as `N/A` instead of failing,
//! because the remote field sets vary by account and campaign type.

pub mod direct;
pub mod metrika;

use serde_json::Value;

/// Direct expresses money as integer micros (units x 1 000 000).
const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Largest amount accepted in currency units; its micros still fit an `i64`.
pub const MAX_MONEY_UNITS: f64 = 9_000_000_000_000.0;

/// Convert currency units to micros. Tool schemas cap amounts at
/// [`MAX_MONEY_UNITS`], so the product stays within `i64`.
pub fn units_to_micros(amount: f64) -> i64 {
    (amount * MICROS_PER_UNIT).round() as i64
}

pub fn micros_to_units(micros: f64) -> f64 {
    micros / MICROS_PER_UNIT
}

/// Two decimals with `,` thousands separators, e.g. `1,234,567.89`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.bytes().any(|b| b != b'0' && b != b'.');
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Format a JSON metric value; non-numbers print as-is.
pub fn format_metric(value: &Value) -> String {
    match value.as_f64() {
        Some(n) => format_number(n),
        None => display(Some(value), "N/A"),
    }
}

/// Field of a JSON object as display text, `default` when absent or null.
pub fn field(object: &Value, key: &str, default: &str) -> String {
    display(object.get(key), default)
}

pub fn display(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Label of a report row: dimension names (or ids) joined by ` / `,
/// `Total` when the row has no dimensions.
pub fn dimensions_label(row: &Value) -> String {
    let dims = row
        .get("dimensions")
        .and_then(Value::as_array)
        .filter(|dims| !dims.is_empty());

    let Some(dims) = dims else {
        return "Total".to_string();
    };

    dims.iter()
        .map(|d| {
            if d.is_object() {
                display(d.get("name").filter(|n| !n.is_null()).or(d.get("id")), "N/A")
            } else {
                display(Some(d), "N/A")
            }
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

/// JSON truthiness as Metrika uses it (`true`, `1`, non-empty strings).
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::Null) | None => false,
    }
}
