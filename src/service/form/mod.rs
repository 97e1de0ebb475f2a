//! Token-gated signature form services.
//!
//! Each form follows the same redemption procedure: parse the token (format
//! errors reject before any lookup), load the subject and party rows, compare
//! the stored token byte-for-byte against the presented one, then enforce the
//! TTL on the embedded timestamp. Completed submissions clear the stored
//! token, so replays fail the equality check.

pub mod chaperone;
pub mod photo_release;
pub mod statement;

use chrono::{DateTime, Utc};

use crate::{error::form::FormError, model::token::InviteToken};

/// Shared match-then-expiry check applied on every redemption.
pub(crate) fn verify_invitation(
    stored: Option<&str>,
    presented_raw: &str,
    presented: &InviteToken,
    now: DateTime<Utc>,
) -> Result<(), FormError> {
    let stored = stored.ok_or(FormError::InvitationMismatch)?;

    if stored != presented_raw {
        return Err(FormError::InvitationMismatch);
    }

    if presented.is_expired(now) {
        return Err(FormError::InvitationExpired);
    }

    Ok(())
}
