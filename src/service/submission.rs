use std::path::Path;

use sea_orm::ConnectionTrait;

use crate::{
    data::{statement::StatementFormRepository, student::StudentRepository},
    error::{upload::UploadError, Error},
    model::{event::DomainEvent, material::MaterialKind},
    service::event,
};

/// Stores uploaded student artifacts and records their locations.
///
/// Files are validated by extension and size ceiling per kind, written under
/// a directory namespaced by the owning student's id, and the resulting path
/// is written onto the student row.
pub struct SubmissionService<'a, C: ConnectionTrait> {
    db: &'a C,
    upload_dir: &'a Path,
}

impl<'a, C: ConnectionTrait> SubmissionService<'a, C> {
    /// Creates a new instance of [`SubmissionService`]
    pub fn new(db: &'a C, upload_dir: &'a Path) -> Self {
        Self { db, upload_dir }
    }

    /// Validates and stores one artifact, returning its recorded location.
    ///
    /// Re-uploading the research plan after signatures were collected raises
    /// [`DomainEvent::PlanReplaced`], which clears every statement-form
    /// signature before the new location is recorded.
    pub async fn store_material(
        &self,
        student: &entity::student::Model,
        kind: MaterialKind,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, Error> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_ascii_lowercase())
            .ok_or_else(|| UploadError::UnsupportedExtension(String::new()))?;

        if !kind.allowed_extensions().contains(&extension.as_str()) {
            return Err(UploadError::UnsupportedExtension(extension).into());
        }

        if bytes.len() > kind.max_bytes() {
            return Err(UploadError::TooLarge(kind.max_bytes()).into());
        }

        let student_dir = self.upload_dir.join(student.id.to_string());
        tokio::fs::create_dir_all(&student_dir).await?;

        let stored_name = format!("{}.{}", kind.as_str(), extension);
        tokio::fs::write(student_dir.join(&stored_name), bytes).await?;

        let url = format!("/uploads/{}/{}", student.id, stored_name);

        if kind == MaterialKind::ResearchPlan && self.has_statement_signatures(student.id).await? {
            event::dispatch(
                self.db,
                DomainEvent::PlanReplaced {
                    student_id: student.id,
                },
            )
            .await?;
        }

        StudentRepository::new(self.db)
            .set_material_url(student.id, kind, &url)
            .await?
            .ok_or(Error::NotFound("Student"))?;

        Ok(url)
    }

    async fn has_statement_signatures(&self, student_id: i32) -> Result<bool, Error> {
        let statement_repository = StatementFormRepository::new(self.db);

        let form = match statement_repository.get_by_student_id(student_id).await? {
            Some(form) => form,
            None => return Ok(false),
        };

        if form.student_completed {
            return Ok(true);
        }

        let parties = statement_repository.parties(form.id).await?;

        Ok(parties.iter().any(|party| party.completed))
    }
}
