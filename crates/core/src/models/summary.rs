use serde::{Deserialize, Serialize};

/// Aggregate risk metrics for one session.
///
/// Values are exact floats. Rounding only happens in the `format_*` helpers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TradeSummary {
    /// Dollar loss if the stop-loss is hit (negative means a gain)
    pub total_loss: f64,

    /// Sum of all investments
    pub total_investment: f64,

    /// Investment-weighted average entry price
    pub average_entry_price: f64,

    /// Sum of implied shares
    pub total_shares: f64,
}

/// Two decimals with thousands separators, e.g. `1234567.891` -> `"1,234,567.89"`.
#[must_use]
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
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

    // "-0.00" reads as noise
    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// Dollar display with a leading minus when money would be lost and a
/// leading plus when the stop locks in a gain.
///
/// `50.0` -> `"-$50.00"`, `-20.0` (a gain) -> `"+$20.00"`, `0.0` -> `"$0.00"`.
#[must_use]
pub fn format_loss(total_loss: f64) -> String {
    let amount = format_amount(total_loss.abs());
    if amount == "0.00" {
        format!("${amount}")
    } else if total_loss > 0.0 {
        format!("-${amount}")
    } else {
        format!("+${amount}")
    }
}

/// Dollar display, e.g. `3200.0` -> `"$3,200.00"`.
#[must_use]
pub fn format_money(value: f64) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${amount}"),
    }
}

impl TradeSummary {
    /// Display strings in the order the summary panel shows them:
    /// potential loss, total investment, average entry price, total shares.
    #[must_use]
    pub fn display(&self) -> [String; 4] {
        [
            format_loss(self.total_loss),
            format_money(self.total_investment),
            format_money(self.average_entry_price),
            format_amount(self.total_shares),
        ]
    }
}
