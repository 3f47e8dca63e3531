use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Every quiz read/write operation demands this before the store is touched.
pub fn require_admin(claims: &Claims) -> AppResult<()> {
    if !claims.is_admin() {
        return Err(AppError::Unauthorized(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}
