use sea_orm::ConnectionTrait;

use crate::{
    data::{
        advisor::AdvisorRepository, chaperone::ChaperoneRepository, judge::JudgeRepository,
        photo_release::PhotoReleaseRepository, school::SchoolRepository,
        statement::StatementFormRepository, student::StudentRepository,
    },
    error::Error,
    model::{
        form::ChaperoneStateDto,
        registry::{
            AdminDashboardDto, AdvisorDashboardDto, AdvisorDto, JudgeDashboardDto, JudgeDto,
            MaterialsDto, SchoolDto, StudentDashboardDto, StudentSummaryDto,
        },
        status::{ApprovalStatus, PaymentStatus, SrcReview},
    },
    service::form::{photo_release::PhotoReleaseFormService, statement::StatementFormService},
};

/// Assembles the role-gated dashboard payloads.
pub struct DashboardService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DashboardService<'a, C> {
    /// Creates a new instance of [`DashboardService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// The advisor's profile, school, chaperone state, and students.
    pub async fn advisor_dashboard(
        &self,
        user: &entity::user::Model,
    ) -> Result<AdvisorDashboardDto, Error> {
        let advisor = AdvisorRepository::new(self.db)
            .get_by_user_id(user.id)
            .await?
            .ok_or(Error::NotFound("Advisor profile"))?;
        let school = SchoolRepository::new(self.db)
            .get(advisor.school_id)
            .await?
            .ok_or(Error::NotFound("School"))?;

        let chaperone = ChaperoneRepository::new(self.db)
            .get_by_advisor_id(advisor.id)
            .await?
            .map(|chaperone| ChaperoneStateDto {
                name: chaperone.name,
                email: chaperone.email,
                phone: chaperone.phone,
                invite_sent: chaperone.invite_sent,
                confirmed: chaperone.confirmed,
            });

        let mut students = Vec::new();
        for student in StudentRepository::new(self.db)
            .list_by_advisor_id(advisor.id)
            .await?
        {
            students.push(self.student_summary(student).await?);
        }

        Ok(AdvisorDashboardDto {
            advisor: advisor_dto(&advisor, &school)?,
            chaperone,
            students,
        })
    }

    /// The student's own registration, materials, and form state.
    pub async fn student_dashboard(
        &self,
        user: &entity::user::Model,
    ) -> Result<StudentDashboardDto, Error> {
        let student = StudentRepository::new(self.db)
            .get_by_user_id(user.id)
            .await?
            .ok_or(Error::NotFound("Student profile"))?;
        let school = SchoolRepository::new(self.db)
            .get(student.school_id)
            .await?
            .ok_or(Error::NotFound("School"))?;
        let advisor = AdvisorRepository::new(self.db)
            .get(student.advisor_id)
            .await?
            .ok_or(Error::NotFound("Advisor"))?;

        let statement = StatementFormService::new(self.db)
            .dto_for_student(student.id)
            .await?;
        let photo_release = PhotoReleaseFormService::new(self.db)
            .dto_for_student(student.id)
            .await?;

        Ok(StudentDashboardDto {
            student: self.student_summary(student).await?,
            school: school_dto(&school),
            advisor_name: advisor.name,
            statement,
            photo_release,
        })
    }

    pub async fn judge_dashboard(
        &self,
        user: &entity::user::Model,
    ) -> Result<JudgeDashboardDto, Error> {
        let judge = JudgeRepository::new(self.db)
            .get_by_user_id(user.id)
            .await?
            .ok_or(Error::NotFound("Judge profile"))?;

        Ok(JudgeDashboardDto {
            judge: judge_dto(&judge)?,
        })
    }

    /// Full advisor and judge listings with pending counts, for admins.
    pub async fn admin_dashboard(&self) -> Result<AdminDashboardDto, Error> {
        let mut advisors = Vec::new();
        for (advisor, school) in AdvisorRepository::new(self.db).list_with_schools().await? {
            let school = school.ok_or(Error::NotFound("School"))?;
            advisors.push(advisor_dto(&advisor, &school)?);
        }

        let mut judges = Vec::new();
        for judge in JudgeRepository::new(self.db).list().await? {
            judges.push(judge_dto(&judge)?);
        }

        Ok(AdminDashboardDto {
            pending_advisor_count: advisors
                .iter()
                .filter(|advisor| advisor.status == ApprovalStatus::Pending)
                .count(),
            pending_judge_count: judges
                .iter()
                .filter(|judge| judge.status == ApprovalStatus::Pending)
                .count(),
            advisors,
            judges,
        })
    }

    async fn student_summary(
        &self,
        student: entity::student::Model,
    ) -> Result<StudentSummaryDto, Error> {
        let statement_completed = StatementFormRepository::new(self.db)
            .get_by_student_id(student.id)
            .await?
            .map(|form| form.completed)
            .unwrap_or(false);
        let photo_release_completed = PhotoReleaseRepository::new(self.db)
            .get_by_student_id(student.id)
            .await?
            .map(|form| form.completed)
            .unwrap_or(false);

        Ok(StudentSummaryDto {
            id: student.id,
            name: student.name,
            email: student.email,
            grade: student.grade,
            project_title: student.project_title,
            status: parse_status(&student.status)?,
            payment_status: parse_payment(&student.payment_status)?,
            src_review: parse_src_review(&student.src_review)?,
            materials: MaterialsDto {
                research_plan_url: student.research_plan_url,
                abstract_url: student.abstract_url,
                slideshow_url: student.slideshow_url,
                presentation_url: student.presentation_url,
                research_report_url: student.research_report_url,
            },
            statement_completed,
            photo_release_completed,
            registered_at: student.created_at,
        })
    }
}

fn school_dto(school: &entity::school::Model) -> SchoolDto {
    SchoolDto {
        id: school.id,
        name: school.name.clone(),
        address: school.address.clone(),
    }
}

fn advisor_dto(
    advisor: &entity::advisor::Model,
    school: &entity::school::Model,
) -> Result<AdvisorDto, Error> {
    Ok(AdvisorDto {
        id: advisor.id,
        name: advisor.name.clone(),
        email: advisor.email.clone(),
        school: school_dto(school),
        status: parse_status(&advisor.status)?,
    })
}

fn judge_dto(judge: &entity::judge::Model) -> Result<JudgeDto, Error> {
    Ok(JudgeDto {
        id: judge.id,
        name: judge.name.clone(),
        email: judge.email.clone(),
        occupation: judge.occupation.clone(),
        employer: judge.employer.clone(),
        highest_degree: judge.highest_degree.clone(),
        research_areas: judge.research_areas.clone(),
        status: parse_status(&judge.status)?,
    })
}

fn parse_status(value: &str) -> Result<ApprovalStatus, Error> {
    ApprovalStatus::parse(value)
        .ok_or_else(|| Error::ParseError(format!("Unknown approval status {:?}", value)))
}

fn parse_payment(value: &str) -> Result<PaymentStatus, Error> {
    PaymentStatus::parse(value)
        .ok_or_else(|| Error::ParseError(format!("Unknown payment status {:?}", value)))
}

fn parse_src_review(value: &str) -> Result<SrcReview, Error> {
    SrcReview::parse(value)
        .ok_or_else(|| Error::ParseError(format!("Unknown committee decision {:?}", value)))
}
