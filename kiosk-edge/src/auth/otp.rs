//! One-time code checks

use super::AuthError;

/// Number of digits in a one-time code
pub const OTP_LENGTH: usize = 4;

/// Code accepted when none is configured
pub const DEFAULT_OTP_CODE: &str = "1290";

/// Number of digits in a mobile number
pub const MOBILE_LENGTH: usize = 10;

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// A mobile number must be exactly ten digits
pub fn validate_mobile(mobile: &str) -> Result<(), AuthError> {
    if !is_digits(mobile, MOBILE_LENGTH) {
        return Err(AuthError::InvalidMobile(format!(
            "mobile number must be {MOBILE_LENGTH} digits"
        )));
    }
    Ok(())
}

/// Mask all but the last four digits, e.g. `******3210`
pub fn mask_mobile(mobile: &str) -> String {
    let keep = mobile.len().saturating_sub(4);
    mobile
        .chars()
        .enumerate()
        .map(|(i, c)| if i < keep { '*' } else { c })
        .collect()
}

/// Verifies entered codes against the configured one
#[derive(Debug, Clone)]
pub struct OtpVerifier {
    code: String,
}

impl OtpVerifier {
    /// `code` must itself be a well-formed OTP
    pub fn new(code: impl Into<String>) -> Result<Self, AuthError> {
        let code = code.into();
        if !is_digits(&code, OTP_LENGTH) {
            return Err(AuthError::InvalidFormat(format!(
                "configured code must be {OTP_LENGTH} digits"
            )));
        }
        Ok(Self { code })
    }

    pub fn verify(&self, entered: &str) -> Result<(), AuthError> {
        let entered = entered.trim();
        if !is_digits(entered, OTP_LENGTH) {
            return Err(AuthError::InvalidFormat(format!(
                "code must be {OTP_LENGTH} digits"
            )));
        }
        if entered != self.code {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(())
    }
}

impl Default for OtpVerifier {
    fn default() -> Self {
        Self {
            code: DEFAULT_OTP_CODE.to_string(),
        }
    }
}
