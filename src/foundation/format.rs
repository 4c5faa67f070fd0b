//! Display formatting for monetary and count figures.
//!
//! All monetary inputs are in millions of GBP.

/// Round half away from zero at one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `£{v/1000:.1}B` when `|v| >= 1000`, otherwise `£{v:.1}M`. The threshold is on magnitude and
/// the sign is preserved (`£-70.8B`).
pub fn format_millions(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("£{:.1}B", round1(value / 1000.0))
    } else {
        format!("£{:.1}M", round1(value))
    }
}

/// Integer with UK thousands grouping, e.g. `46,426`.
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fraction in `[0, 1]` rendered as a percentage with one decimal, e.g. `57.3%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", round1(fraction * 100.0))
}

/// Pounds per person, grouped, e.g. `£2,021`.
pub fn format_per_capita(pounds: f64) -> String {
    format!("£{}", format_number(pounds))
}

/// Head counts in millions with one decimal, e.g. `67.6M`.
pub fn format_compact_population(people: f64) -> String {
    format!("{:.1}M", round1(people / 1_000_000.0))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/format.rs"]
mod tests;
