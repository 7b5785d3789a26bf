//! Profile access policy.

use crate::error::AppError;
use crate::models::{Profile, User, Visibility};

/// Decide whether `user` may start a conversation with `profile`.
///
/// Pure decision function: both records must already be resolved, and
/// nothing is read or written here. Public profiles are open to every
/// resolved user; private profiles only to their creator. The admin
/// role is deliberately not consulted — an admin with no ownership
/// relation is denied like anyone else.
pub fn authorize_profile_access(user: &User, profile: &Profile) -> Result<(), AppError> {
    if profile.visibility == Visibility::Private && profile.creator_id != user.id {
        return Err(AppError::AccessDenied(
            "profile is not publicly available".into(),
        ));
    }
    Ok(())
}
