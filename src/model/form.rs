use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::token::InvitePurpose;

/// Query parameter carried by every token-gated form endpoint.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TokenQuery {
    pub token: String,
}

/// Third-party signers on the statement of outside assistance form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatementSigner {
    Teacher,
    Mentor,
    Parent,
}

impl StatementSigner {
    pub fn purpose(&self) -> InvitePurpose {
        match self {
            Self::Teacher => InvitePurpose::Teacher,
            Self::Mentor => InvitePurpose::Mentor,
            Self::Parent => InvitePurpose::Parent,
        }
    }
}

/// Signers on the photo release form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PhotoReleaseSigner {
    /// The student's own parent or guardian.
    Primary,
    /// A team member's parent, required only when their email is on file.
    TeamMember,
}

impl PhotoReleaseSigner {
    pub fn purpose(&self) -> InvitePurpose {
        match self {
            Self::Primary => InvitePurpose::PhotoRelease,
            Self::TeamMember => InvitePurpose::TeamMember,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct StatementInvitationDto {
    pub signer: StatementSigner,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct PhotoReleaseInvitationDto {
    pub signer: PhotoReleaseSigner,
    pub email: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ChaperoneInvitationDto {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Fields a statement-form signer sees when opening their link.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StatementFormView {
    pub student_name: String,
    pub project_title: String,
    pub party: String,
    pub party_name: String,
    pub party_email: String,
    pub comments: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PhotoReleaseFormView {
    pub student_name: String,
    pub project_title: String,
    pub party: String,
    pub party_email: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChaperoneFormView {
    pub advisor_name: String,
    pub school_name: String,
    pub chaperone_name: String,
    pub chaperone_email: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct StatementSignatureDto {
    pub signature: String,
    pub comments: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct PhotoReleaseSignatureDto {
    pub signature: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ChaperoneSignatureDto {
    pub signature: String,
}

/// The student's own signature on their statement form, collected while
/// logged in rather than through an invitation link.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct StudentStatementSignatureDto {
    pub signature: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatementPartyStateDto {
    pub party: String,
    pub name: String,
    pub email: String,
    pub invite_sent: bool,
    pub completed: bool,
    pub signature_date: Option<NaiveDateTime>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatementFormDto {
    pub student_completed: bool,
    pub completed: bool,
    pub parties: Vec<StatementPartyStateDto>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PhotoReleasePartyStateDto {
    pub party: String,
    pub email: String,
    pub invite_sent: bool,
    pub completed: bool,
    pub signature_date: Option<NaiveDateTime>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PhotoReleaseFormDto {
    pub completed: bool,
    pub team_member_parent_email: Option<String>,
    pub parties: Vec<PhotoReleasePartyStateDto>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChaperoneStateDto {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub invite_sent: bool,
    pub confirmed: bool,
}
