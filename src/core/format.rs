use serde::{Deserialize, Serialize};

use crate::core::ticks::format_tick;

const SI_SYMBOLS: [&str; 7] = ["", "k", "M", "G", "T", "P", "E"];

/// Abbreviates `value` with an SI suffix and one decimal: `1500` -> `1.5k`.
///
/// Values below one thousand in magnitude are returned as `None` so callers
/// can keep their regular formatting.
#[must_use]
pub fn abbreviate_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let magnitude = value.abs();
    if magnitude < 1000.0 {
        return None;
    }
    let tier = ((magnitude.log10() / 3.0) as usize).min(SI_SYMBOLS.len() - 1);
    let scaled = value / 10f64.powi(3 * tier as i32);
    Some(format!("{scaled:.1}{}", SI_SYMBOLS[tier]))
}

/// Named tick-label formatters selectable through options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TickLabelFormatter {
    /// Fixed precision derived from the tick step.
    #[default]
    Plain,
    /// SI-suffixed values such as `2.0M`.
    AbbreviateNumber,
}

impl TickLabelFormatter {
    #[must_use]
    pub fn format(self, value: f64, step: f64) -> String {
        match self {
            Self::Plain => format_tick(value, step),
            Self::AbbreviateNumber => {
                abbreviate_number(value).unwrap_or_else(|| format_tick(value, step))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TickLabelFormatter, abbreviate_number};

    #[test]
    fn abbreviates_with_si_suffix() {
        assert_eq!(abbreviate_number(1500.0).as_deref(), Some("1.5k"));
        assert_eq!(abbreviate_number(2_000_000.0).as_deref(), Some("2.0M"));
        assert_eq!(abbreviate_number(-3_200.0).as_deref(), Some("-3.2k"));
        assert_eq!(abbreviate_number(999.0), None);
    }

    #[test]
    fn formatter_falls_back_to_plain_ticks() {
        assert_eq!(TickLabelFormatter::AbbreviateNumber.format(500.0, 100.0), "500");
        assert_eq!(TickLabelFormatter::AbbreviateNumber.format(5000.0, 1000.0), "5.0k");
        assert_eq!(TickLabelFormatter::Plain.format(0.5, 0.1), "0.5");
    }
}
