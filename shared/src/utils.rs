// Number formatting shared by the console presenter and trend descriptions.

/// Formats `value` with a fixed number of decimals and an explicit sign:
/// `+` for positive values, `-` for negative ones, nothing for zero.
///
/// Values that round to zero at the requested precision are printed unsigned,
/// so `-0.001` becomes `0.00` rather than `-0.00`.
pub fn format_signed(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
    let rounds_to_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if rounds_to_zero {
        formatted
    } else if value > 0.0 {
        format!("+{}", formatted)
    } else {
        format!("-{}", formatted)
    }
}
