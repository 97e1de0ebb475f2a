use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{
    form::{ChaperoneStateDto, PhotoReleaseFormDto, StatementFormDto},
    role::Role,
    status::{ApprovalStatus, PaymentStatus, SrcReview},
};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub role: Role,
    pub email_verified: bool,
    /// Where the client should route a user of this role after login.
    pub dashboard_path: String,
}

impl UserDto {
    /// Builds the wire representation; `None` if the stored role tag is not
    /// one of the closed set.
    pub fn from_model(user: &entity::user::Model) -> Option<Self> {
        let role = Role::parse(&user.role)?;

        Some(Self {
            id: user.id,
            email: user.email.clone(),
            role,
            email_verified: user.email_verified,
            dashboard_path: role.dashboard_path().to_string(),
        })
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterAccountDto {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct VerifyEmailDto {
    pub code: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ChangeEmailDto {
    pub user_id: i32,
    pub new_email: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SchoolDto {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct NewSchoolDto {
    pub name: String,
    pub address: String,
}

/// Advisor profile registration: select an existing school or create one.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AdvisorRegistrationDto {
    pub name: String,
    pub school_id: Option<i32>,
    pub new_school: Option<NewSchoolDto>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct StudentRegistrationDto {
    pub name: String,
    pub school_id: i32,
    pub advisor_id: i32,
    pub grade: i32,
    pub project_title: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct JudgeRegistrationDto {
    pub name: String,
    pub occupation: String,
    pub employer: String,
    pub highest_degree: String,
    pub research_areas: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct StatusUpdateDto {
    pub status: ApprovalStatus,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SrcReviewDto {
    pub decision: SrcReview,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct PaymentUpdateDto {
    pub payment_status: PaymentStatus,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdvisorDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub school: SchoolDto,
    pub status: ApprovalStatus,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct JudgeDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub occupation: String,
    pub employer: String,
    pub highest_degree: String,
    pub research_areas: String,
    pub status: ApprovalStatus,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MaterialsDto {
    pub research_plan_url: Option<String>,
    pub abstract_url: Option<String>,
    pub slideshow_url: Option<String>,
    pub presentation_url: Option<String>,
    pub research_report_url: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentSummaryDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub grade: i32,
    pub project_title: String,
    pub status: ApprovalStatus,
    pub payment_status: PaymentStatus,
    pub src_review: SrcReview,
    pub materials: MaterialsDto,
    pub statement_completed: bool,
    pub photo_release_completed: bool,
    pub registered_at: NaiveDateTime,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AdvisorDashboardDto {
    pub advisor: AdvisorDto,
    pub chaperone: Option<ChaperoneStateDto>,
    pub students: Vec<StudentSummaryDto>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentDashboardDto {
    pub student: StudentSummaryDto,
    pub school: SchoolDto,
    pub advisor_name: String,
    pub statement: Option<StatementFormDto>,
    pub photo_release: Option<PhotoReleaseFormDto>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct JudgeDashboardDto {
    pub judge: JudgeDto,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminDashboardDto {
    pub pending_advisor_count: usize,
    pub pending_judge_count: usize,
    pub advisors: Vec<AdvisorDto>,
    pub judges: Vec<JudgeDto>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponseDto {
    pub url: String,
}
