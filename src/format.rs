//! Money formatting for notices and advisor snapshots.

/// Compact money string: `950`, `12,500`, `1.5M`, `2.25B`.
///
/// Amounts below one million are written in full with thousands separators.
pub fn format_money(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    if amount < 0.0 {
        return format!("-{}", format_money(-amount));
    }
    let n = amount.floor();
    if n >= 1e12 {
        compact(n / 1e12, "T")
    } else if n >= 1e9 {
        compact(n / 1e9, "B")
    } else if n >= 1e6 {
        compact(n / 1e6, "M")
    } else {
        format_with_commas(n as u64)
    }
}

fn compact(scaled: f64, suffix: &str) -> String {
    // Truncate to two decimals so 1.999M never reads as 2M.
    let hundredths = (scaled * 100.0).floor() as u64;
    let whole = hundredths / 100;
    let frac = hundredths % 100;
    if frac == 0 {
        format!("{whole}{suffix}")
    } else if frac % 10 == 0 {
        format!("{whole}.{}{suffix}", frac / 10)
    } else {
        format!("{whole}.{frac:02}{suffix}")
    }
}

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
