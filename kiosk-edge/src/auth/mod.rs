//! Kiosk login
//!
//! Mock OTP login: the customer enters a mobile number, then a four digit
//! code. A successful login sets the `auth` flag to `"true"` in a
//! [`FlagStore`]; the flag is read back on startup, and [`AuthService::guard`]
//! sends unauthenticated callers to the login screen.

pub mod flag_store;
pub mod otp;

pub use flag_store::{FileFlagStore, FlagStore, FlagStoreError, MemoryFlagStore};
pub use otp::{DEFAULT_OTP_CODE, OTP_LENGTH, OtpVerifier};

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Flag key holding the authentication state
pub const AUTH_FLAG_KEY: &str = "auth";

/// Value of [`AUTH_FLAG_KEY`] when logged in
const AUTH_FLAG_VALUE: &str = "true";

/// Where unauthenticated callers are sent
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid mobile number: {0}")]
    InvalidMobile(String),

    #[error("Invalid OTP")]
    InvalidCredentials,

    #[error("Not authenticated, redirect to {redirect_to}")]
    NotAuthenticated { redirect_to: String },

    #[error(transparent)]
    Storage(#[from] FlagStoreError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidFormat(msg) => AppError::with_message(ErrorCode::InvalidFormat, msg),
            AuthError::InvalidMobile(msg) => AppError::validation(msg),
            AuthError::InvalidCredentials => AppError::invalid_credentials(),
            AuthError::NotAuthenticated { redirect_to } => {
                AppError::not_authenticated().with_detail("redirect_to", redirect_to)
            }
            AuthError::Storage(e) => AppError::with_message(ErrorCode::StorageError, e.to_string()),
        }
    }
}

/// Login state backed by a flag store
#[derive(Debug)]
pub struct AuthService<S: FlagStore> {
    store: S,
    verifier: OtpVerifier,
    authenticated: bool,
    /// Mobile number the code was last requested for
    pending_mobile: Option<String>,
}

impl<S: FlagStore> AuthService<S> {
    /// Restore the login state from the store
    pub fn new(store: S, verifier: OtpVerifier) -> Self {
        let authenticated = store.get(AUTH_FLAG_KEY).as_deref() == Some(AUTH_FLAG_VALUE);
        tracing::debug!(authenticated, "Auth state restored");
        Self {
            store,
            verifier,
            authenticated,
            pending_mobile: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Record the mobile number a code is sent to
    ///
    /// Returns the masked number for display.
    pub fn request_otp(&mut self, mobile: &str) -> Result<String, AuthError> {
        otp::validate_mobile(mobile)?;
        let masked = otp::mask_mobile(mobile);
        tracing::info!(mobile = %masked, "OTP requested");
        self.pending_mobile = Some(mobile.to_string());
        Ok(masked)
    }

    /// Check the entered code and persist the login on success
    pub fn verify_otp(&mut self, entered: &str) -> Result<(), AuthError> {
        if let Err(e) = self.verifier.verify(entered) {
            tracing::warn!(error = %e, "OTP verification failed");
            return Err(e);
        }
        self.store.set(AUTH_FLAG_KEY, AUTH_FLAG_VALUE)?;
        self.authenticated = true;
        tracing::info!(
            mobile = ?self.pending_mobile.as_deref().map(otp::mask_mobile),
            "OTP verified, logged in"
        );
        Ok(())
    }

    /// Clear the login; safe to call when not logged in
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.store.remove(AUTH_FLAG_KEY)?;
        self.authenticated = false;
        self.pending_mobile = None;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Gate for protected screens
    pub fn guard(&self) -> Result<(), AuthError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated {
                redirect_to: LOGIN_ROUTE.to_string(),
            })
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService<MemoryFlagStore> {
        AuthService::new(MemoryFlagStore::new(), OtpVerifier::default())
    }

    #[test]
    fn test_guard_redirects_when_logged_out() {
        let auth = service();
        assert!(!auth.is_authenticated());
        match auth.guard() {
            Err(AuthError::NotAuthenticated { redirect_to }) => assert_eq!(redirect_to, "/login"),
            other => panic!("unexpected guard result: {other:?}"),
        }
    }

    #[test]
    fn test_login_sets_flag() {
        let mut auth = service();
        assert_eq!(auth.request_otp("9876543210").unwrap(), "******3210");
        auth.verify_otp("1290").unwrap();

        assert!(auth.is_authenticated());
        assert!(auth.guard().is_ok());
        assert_eq!(auth.store().get(AUTH_FLAG_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_failed_login_leaves_state() {
        let mut auth = service();
        assert!(matches!(auth.verify_otp("0000"), Err(AuthError::InvalidCredentials)));
        assert!(matches!(auth.verify_otp("12"), Err(AuthError::InvalidFormat(_))));
        assert!(!auth.is_authenticated());
        assert_eq!(auth.store().get(AUTH_FLAG_KEY), None);
        assert!(matches!(auth.request_otp("12345"), Err(AuthError::InvalidMobile(_))));
    }

    #[test]
    fn test_logout_removes_flag() {
        let mut auth = service();
        auth.verify_otp("1290").unwrap();
        auth.logout().unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.store().get(AUTH_FLAG_KEY), None);
        auth.logout().unwrap();
    }

    #[test]
    fn test_only_exact_true_restores_login() {
        let mut store = MemoryFlagStore::new();
        store.set(AUTH_FLAG_KEY, "TRUE").unwrap();
        assert!(!AuthService::new(store.clone(), OtpVerifier::default()).is_authenticated());

        store.set(AUTH_FLAG_KEY, "true").unwrap();
        assert!(AuthService::new(store, OtpVerifier::default()).is_authenticated());
    }

    #[test]
    fn test_login_survives_restart_with_file_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileFlagStore::open(dir.path()).unwrap();
            let mut auth = AuthService::new(store, OtpVerifier::default());
            auth.verify_otp("1290").unwrap();
        }
        let store = FileFlagStore::open(dir.path()).unwrap();
        assert!(AuthService::new(store, OtpVerifier::default()).is_authenticated());
    }

    #[test]
    fn test_auth_error_codes() {
        let err: AppError = AuthError::NotAuthenticated {
            redirect_to: LOGIN_ROUTE.to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
        assert_eq!(err.details.unwrap()["redirect_to"], "/login");

        let err: AppError = AuthError::InvalidFormat("x".to_string()).into();
        assert_eq!(err.code, ErrorCode::InvalidFormat);

        let err: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);

        let err: AppError = AuthError::InvalidMobile("short".to_string()).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
