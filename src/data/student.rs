use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

use crate::model::{
    material::MaterialKind,
    status::{ApprovalStatus, PaymentStatus, SrcReview},
};

pub struct StudentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    /// Creates a new instance of [`StudentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a student profile in pending state with no materials.
    pub async fn create(
        &self,
        user_id: i32,
        name: &str,
        email: &str,
        school_id: i32,
        advisor_id: i32,
        grade: i32,
        project_title: &str,
    ) -> Result<entity::student::Model, DbErr> {
        let student = entity::student::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            school_id: ActiveValue::Set(school_id),
            advisor_id: ActiveValue::Set(advisor_id),
            grade: ActiveValue::Set(grade),
            project_title: ActiveValue::Set(project_title.to_string()),
            status: ActiveValue::Set(ApprovalStatus::Pending.as_str().to_string()),
            payment_status: ActiveValue::Set(PaymentStatus::Unpaid.as_str().to_string()),
            src_review: ActiveValue::Set(SrcReview::Undecided.as_str().to_string()),
            research_plan_url: ActiveValue::Set(None),
            abstract_url: ActiveValue::Set(None),
            slideshow_url: ActiveValue::Set(None),
            presentation_url: ActiveValue::Set(None),
            research_report_url: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        student.insert(self.db).await
    }

    pub async fn get(&self, student_id: i32) -> Result<Option<entity::student::Model>, DbErr> {
        entity::prelude::Student::find_by_id(student_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        entity::prelude::Student::find()
            .filter(entity::student::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn list_by_advisor_id(
        &self,
        advisor_id: i32,
    ) -> Result<Vec<entity::student::Model>, DbErr> {
        entity::prelude::Student::find()
            .filter(entity::student::Column::AdvisorId.eq(advisor_id))
            .all(self.db)
            .await
    }

    /// Unconditional status overwrite.
    pub async fn update_status(
        &self,
        student_id: i32,
        status: ApprovalStatus,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        let student = match self.get(student_id).await? {
            Some(student) => student,
            None => return Ok(None),
        };

        let mut student_am = student.into_active_model();
        student_am.status = ActiveValue::Set(status.as_str().to_string());

        let student = student_am.update(self.db).await?;

        Ok(Some(student))
    }

    /// Special review committee decision, independent of the main status.
    pub async fn set_src_review(
        &self,
        student_id: i32,
        decision: SrcReview,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        let student = match self.get(student_id).await? {
            Some(student) => student,
            None => return Ok(None),
        };

        let mut student_am = student.into_active_model();
        student_am.src_review = ActiveValue::Set(decision.as_str().to_string());

        let student = student_am.update(self.db).await?;

        Ok(Some(student))
    }

    pub async fn set_payment_status(
        &self,
        student_id: i32,
        payment_status: PaymentStatus,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        let student = match self.get(student_id).await? {
            Some(student) => student,
            None => return Ok(None),
        };

        let mut student_am = student.into_active_model();
        student_am.payment_status = ActiveValue::Set(payment_status.as_str().to_string());

        let student = student_am.update(self.db).await?;

        Ok(Some(student))
    }

    /// Writes an uploaded artifact's location onto the student row.
    pub async fn set_material_url(
        &self,
        student_id: i32,
        kind: MaterialKind,
        url: &str,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        let student = match self.get(student_id).await? {
            Some(student) => student,
            None => return Ok(None),
        };

        let mut student_am = student.into_active_model();
        let value = ActiveValue::Set(Some(url.to_string()));
        match kind {
            MaterialKind::ResearchPlan => student_am.research_plan_url = value,
            MaterialKind::Abstract => student_am.abstract_url = value,
            MaterialKind::Slideshow => student_am.slideshow_url = value,
            MaterialKind::Presentation => student_am.presentation_url = value,
            MaterialKind::ResearchReport => student_am.research_report_url = value,
        }

        let student = student_am.update(self.db).await?;

        Ok(Some(student))
    }
}
