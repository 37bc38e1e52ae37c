//! Module implementing the modulus 11 check used by NHS numbers

/// Number of digits of an NHS number, including the check digit
pub(crate) const NHS_NUMBER_LEN: usize = 10;

/// Computes the check digit for the first nine digits of an NHS number.
/// Returns `None` when the weighted sum leaves a check value of 10: no tenth digit makes such a prefix valid.
pub(crate) fn check_digit(digits: &[u8; 9]) -> Option<u8> {
    let sum: u32 = digits
        .iter()
        .zip((2..=10u32).rev())
        .map(|(&d, weight)| u32::from(d) * weight)
        .sum();

    match 11 - (sum % 11) {
        11 => Some(0),
        10 => None,
        check => Some(check as u8),
    }
}

/// Returns whether `candidate` is a valid NHS number: ten digits (inner spaces allowed) whose last digit is the
/// modulus 11 check digit of the first nine.
pub fn is_valid_nhs_number(candidate: &str) -> bool {
    let digits: Option<Vec<u8>> = candidate
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();

    let Some(digits) = digits else {
        return false;
    };
    if digits.len() != NHS_NUMBER_LEN {
        return false;
    }

    let mut prefix = [0u8; 9];
    prefix.copy_from_slice(&digits[..9]);
    check_digit(&prefix) == Some(digits[9])
}
