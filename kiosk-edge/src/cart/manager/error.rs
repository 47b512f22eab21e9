use super::super::traits::CartError;
use shared::cart::{CommandError, CommandErrorCode};
use shared::error::{AppError, ErrorCode};

impl CartError {
    /// Wire-level code for this error
    pub fn command_code(&self) -> CommandErrorCode {
        match self {
            CartError::InvalidQuantity(_) => CommandErrorCode::InvalidQuantity,
            CartError::InvalidSelection(_) => CommandErrorCode::InvalidSelection,
            CartError::AmbiguousSelection { .. } => CommandErrorCode::AmbiguousSelection,
            CartError::ProductNotFound(_) => CommandErrorCode::ProductNotFound,
            CartError::VariantNotFound { .. } => CommandErrorCode::VariantNotFound,
            CartError::AddonNotFound { .. } => CommandErrorCode::AddonNotFound,
        }
    }
}

impl From<CartError> for CommandError {
    fn from(err: CartError) -> Self {
        CommandError::new(err.command_code(), err.to_string())
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        let code: ErrorCode = err.command_code().error_code();
        let app = AppError::with_message(code, err.to_string());
        match err {
            CartError::ProductNotFound(product_id) => app.with_detail("product_id", product_id),
            CartError::AmbiguousSelection {
                product_id,
                candidates,
            } => app
                .with_detail("product_id", product_id)
                .with_detail("candidates", candidates),
            CartError::VariantNotFound {
                product_id,
                variant_id,
            } => app
                .with_detail("product_id", product_id)
                .with_detail("variant_id", variant_id),
            CartError::AddonNotFound {
                product_id,
                addon_id,
            } => app
                .with_detail("product_id", product_id)
                .with_detail("addon_id", addon_id),
            CartError::InvalidQuantity(_) | CartError::InvalidSelection(_) => app,
        }
    }
}

pub type ManagerResult<T> = Result<T, CartError>;
