use chrono::{DateTime, Utc};

use crate::core::AxisValue;

/// Text formatting for hover values, axis labels and axis tips.
///
/// Locale-aware formatting belongs to the host; implement this trait to
/// plug it in.
pub trait ValueFormatter {
    fn format_number(&self, value: f64) -> String;

    fn format_time(&self, time: DateTime<Utc>) -> String;

    fn format_axis_value(&self, value: AxisValue) -> String {
        match value {
            AxisValue::Number(number) => self.format_number(number),
            AxisValue::Time(time) => self.format_time(time),
        }
    }
}

/// Compact SI formatting (`950`, `1.5k`, `12M`) and minute-precision UTC timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

const SI_STEPS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "k")];

impl ValueFormatter for DefaultFormatter {
    fn format_number(&self, value: f64) -> String {
        if !value.is_finite() {
            return "-".to_owned();
        }
        let magnitude = value.abs();
        for (scale, suffix) in SI_STEPS {
            if magnitude >= scale {
                return format!("{}{suffix}", trim_decimals(value / scale, 1));
            }
        }
        trim_decimals(value, 2)
    }

    fn format_time(&self, time: DateTime<Utc>) -> String {
        time.format("%Y-%m-%d %H:%M").to_string()
    }
}

fn trim_decimals(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    if !text.contains('.') {
        return text;
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}
