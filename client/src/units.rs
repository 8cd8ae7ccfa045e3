//! Amount Conversion
//!
//! Human-denominated decimal amounts convert losslessly to integer base
//! units before they touch the wire. Excess precision and overflow are
//! rejected rather than rounded.

use crate::error::ClientError;

/// Parse a decimal string into base units for a mint with `decimals`
/// fractional digits. `"0.5"` with 9 decimals becomes `500_000_000`.
pub fn to_base_units(text: &str, decimals: u8) -> Result<u64, ClientError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ClientError::InvalidAmount("empty amount".to_string()));
    }

    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(ClientError::InvalidAmount(text.to_string()));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(ClientError::InvalidAmount(text.to_string()));
    }
    if frac.len() > decimals as usize {
        return Err(ClientError::InvalidAmount(format!(
            "{} exceeds {} decimal places",
            text, decimals
        )));
    }

    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or_else(|| ClientError::InvalidAmount("unsupported decimals".to_string()))?;

    let whole_units: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| ClientError::InvalidAmount(text.to_string()))?
    };

    let frac_units: u64 = if frac.is_empty() {
        0
    } else {
        let padded: u64 = frac
            .parse()
            .map_err(|_| ClientError::InvalidAmount(text.to_string()))?;
        let shift = 10u64.pow((decimals as usize - frac.len()) as u32);
        padded
            .checked_mul(shift)
            .ok_or_else(|| ClientError::InvalidAmount(text.to_string()))?
    };

    whole_units
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac_units))
        .ok_or_else(|| ClientError::InvalidAmount(format!("{} overflows u64", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_whole_and_fractional() {
        assert_eq!(to_base_units("0.5", 9).unwrap(), 500_000_000);
        assert_eq!(to_base_units("0.5", 18).unwrap(), 500_000_000_000_000_000);
        assert_eq!(to_base_units("10", 6).unwrap(), 10_000_000);
        assert_eq!(to_base_units("0.01", 9).unwrap(), 10_000_000);
        assert_eq!(to_base_units("1.000000001", 9).unwrap(), 1_000_000_001);
        assert_eq!(to_base_units("0", 9).unwrap(), 0);
        assert_eq!(to_base_units(".25", 2).unwrap(), 25);
    }

    #[test]
    fn rejects_excess_precision() {
        assert!(to_base_units("0.1234567891", 9).is_err());
        assert!(to_base_units("0.001", 2).is_err());
    }

    #[test]
    fn rejects_garbage_and_overflow() {
        assert!(to_base_units("", 9).is_err());
        assert!(to_base_units(".", 9).is_err());
        assert!(to_base_units("1.2.3", 9).is_err());
        assert!(to_base_units("-1", 9).is_err());
        assert!(to_base_units("1e9", 9).is_err());
        assert!(to_base_units("99999999999999999999", 9).is_err());
    }
}
