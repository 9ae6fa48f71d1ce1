use crate::application::errors::CommandError;
use crate::domain::entities::AdminIdentity;

/// Authorization predicate for admin commands
pub trait Authorizer: Send + Sync {
    fn authorize(&self, sender_id: &str, admin: &AdminIdentity) -> Result<(), CommandError>;
}

/// Exact identity check against the configured admin
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminIdentityCheck;

impl Authorizer for AdminIdentityCheck {
    fn authorize(&self, sender_id: &str, admin: &AdminIdentity) -> Result<(), CommandError> {
        if !admin.is_set() {
            return Err(CommandError::AdminUnset);
        }
        if !admin.matches(sender_id) {
            return Err(CommandError::PermissionDenied);
        }
        Ok(())
    }
}
