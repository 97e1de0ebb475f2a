use chrono::{DateTime, Utc};
use rand::{distr::Alphanumeric, Rng};

use crate::error::form::FormError;

/// Days an invitation link stays redeemable after issuance.
pub const INVITE_TOKEN_TTL_DAYS: i64 = 30;

/// Length of the random suffix segment.
const SUFFIX_LEN: usize = 12;

/// Number of `_`-delimited segments in an encoded token.
const SEGMENT_COUNT: usize = 4;

/// What an invitation token authorizes its holder to sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvitePurpose {
    /// Statement of outside assistance, teacher party.
    Teacher,
    /// Statement of outside assistance, mentor party.
    Mentor,
    /// Statement of outside assistance, parent party.
    Parent,
    /// Photo release, primary parent party.
    PhotoRelease,
    /// Photo release, team-member's parent party.
    TeamMember,
    /// Chaperone confirmation on an advisor record.
    Chaperone,
}

impl InvitePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Mentor => "mentor",
            Self::Parent => "parent",
            Self::PhotoRelease => "photorelease",
            Self::TeamMember => "teammember",
            Self::Chaperone => "chaperone",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "teacher" => Some(Self::Teacher),
            "mentor" => Some(Self::Mentor),
            "parent" => Some(Self::Parent),
            "photorelease" => Some(Self::PhotoRelease),
            "teammember" => Some(Self::TeamMember),
            "chaperone" => Some(Self::Chaperone),
            _ => None,
        }
    }

    /// Whether this purpose addresses a party on the statement of outside
    /// assistance form.
    pub fn is_statement_party(&self) -> bool {
        matches!(self, Self::Teacher | Self::Mentor | Self::Parent)
    }

    /// Whether this purpose addresses a party on the photo release form.
    pub fn is_photo_release_party(&self) -> bool {
        matches!(self, Self::PhotoRelease | Self::TeamMember)
    }
}

/// An invitation token: `"{subjectId}_{purpose}_{timestamp}_{suffix}"`.
///
/// The subject is the owning student (statement, photo release) or advisor
/// (chaperone). The encoded form is what gets mailed and what is stored on
/// the party row; redemption compares the two byte-for-byte, so parsing here
/// only ever gates on format, never replaces the equality check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InviteToken {
    pub subject_id: i32,
    pub purpose: InvitePurpose,
    pub issued_at: i64,
    pub suffix: String,
}

impl InviteToken {
    /// Issues a fresh token for a subject at the given instant.
    pub fn issue(subject_id: i32, purpose: InvitePurpose, now: DateTime<Utc>) -> Self {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(char::from)
            .collect();

        Self {
            subject_id,
            purpose,
            issued_at: now.timestamp(),
            suffix,
        }
    }

    pub fn encode(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.subject_id,
            self.purpose.as_str(),
            self.issued_at,
            self.suffix
        )
    }

    /// Parses an encoded token without touching the data store.
    ///
    /// A wrong segment count is a malformed request; unparseable subject,
    /// purpose, or timestamp segments are treated the same way.
    pub fn parse(raw: &str) -> Result<Self, FormError> {
        let segments: Vec<&str> = raw.split('_').collect();
        if segments.len() != SEGMENT_COUNT {
            return Err(FormError::MalformedToken);
        }

        let subject_id = segments[0]
            .parse::<i32>()
            .map_err(|_| FormError::MalformedToken)?;
        let purpose = InvitePurpose::parse(segments[1]).ok_or(FormError::MalformedToken)?;
        let issued_at = segments[2]
            .parse::<i64>()
            .map_err(|_| FormError::MalformedToken)?;

        Ok(Self {
            subject_id,
            purpose,
            issued_at,
            suffix: segments[3].to_string(),
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() - self.issued_at > INVITE_TOKEN_TTL_DAYS * 24 * 60 * 60
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{InvitePurpose, InviteToken};
    use crate::error::form::FormError;

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn encode_parse_round_trip() {
        let token = InviteToken::issue(42, InvitePurpose::Teacher, fixed_now());

        let parsed = InviteToken::parse(&token.encode()).unwrap();

        assert_eq!(parsed, token);
    }

    #[test]
    fn issue_uses_twelve_character_alphanumeric_suffix() {
        let token = InviteToken::issue(7, InvitePurpose::Chaperone, fixed_now());

        assert_eq!(token.suffix.len(), 12);
        assert!(token.suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn parse_rejects_wrong_segment_count() {
        for raw in ["", "42", "42_teacher", "42_teacher_1700000000"] {
            assert!(matches!(
                InviteToken::parse(raw),
                Err(FormError::MalformedToken)
            ));
        }
    }

    #[test]
    fn parse_rejects_extra_segments() {
        assert!(matches!(
            InviteToken::parse("42_teacher_1700000000_abc_extra"),
            Err(FormError::MalformedToken)
        ));
    }

    #[test]
    fn parse_rejects_unknown_purpose() {
        assert!(matches!(
            InviteToken::parse("42_principal_1700000000_abcdefghijkl"),
            Err(FormError::MalformedToken)
        ));
    }

    #[test]
    fn parse_rejects_non_numeric_subject() {
        assert!(matches!(
            InviteToken::parse("abc_teacher_1700000000_abcdefghijkl"),
            Err(FormError::MalformedToken)
        ));
    }

    #[test]
    fn expiry_is_enforced_after_ttl() {
        let issued = fixed_now();
        let token = InviteToken::issue(1, InvitePurpose::Parent, issued);

        assert!(!token.is_expired(issued + Duration::days(29)));
        assert!(token.is_expired(issued + Duration::days(31)));
    }
}
