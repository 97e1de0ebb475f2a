use sea_orm::ConnectionTrait;

use crate::{
    data::{
        advisor::AdvisorRepository, judge::JudgeRepository, school::SchoolRepository,
        student::StudentRepository,
    },
    error::{registration::RegistrationError, Error},
    model::registry::{AdvisorRegistrationDto, JudgeRegistrationDto, StudentRegistrationDto},
};

/// Role profile registration.
///
/// Accounts are created by [`crate::service::account::AccountService`]; this
/// service attaches the role-specific profile, which is what the approval
/// lifecycle applies to.
pub struct RegistrationService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RegistrationService<'a, C> {
    /// Creates a new instance of [`RegistrationService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Registers an advisor profile, selecting or creating their school.
    pub async fn register_advisor(
        &self,
        user: &entity::user::Model,
        registration: AdvisorRegistrationDto,
    ) -> Result<entity::advisor::Model, Error> {
        let advisor_repository = AdvisorRepository::new(self.db);
        let school_repository = SchoolRepository::new(self.db);

        if advisor_repository.get_by_user_id(user.id).await?.is_some() {
            return Err(RegistrationError::ProfileExists.into());
        }

        let school = match (registration.school_id, registration.new_school) {
            (Some(school_id), _) => school_repository
                .get(school_id)
                .await?
                .ok_or(RegistrationError::UnknownSchool)?,
            (None, Some(new_school)) => {
                school_repository
                    .create(&new_school.name, &new_school.address)
                    .await?
            }
            (None, None) => return Err(RegistrationError::MissingSchool.into()),
        };

        let advisor = advisor_repository
            .create(user.id, &registration.name, &user.email, school.id)
            .await?;

        Ok(advisor)
    }

    /// Registers a student profile under an advisor at a school.
    ///
    /// The selected advisor must exist and be registered at the selected
    /// school; a mismatched pairing is a validation failure.
    pub async fn register_student(
        &self,
        user: &entity::user::Model,
        registration: StudentRegistrationDto,
    ) -> Result<entity::student::Model, Error> {
        let student_repository = StudentRepository::new(self.db);
        let advisor_repository = AdvisorRepository::new(self.db);
        let school_repository = SchoolRepository::new(self.db);

        if student_repository.get_by_user_id(user.id).await?.is_some() {
            return Err(RegistrationError::ProfileExists.into());
        }

        if !(9..=12).contains(&registration.grade) {
            return Err(Error::Validation(format!(
                "Grade must be between 9 and 12, got {}",
                registration.grade
            )));
        }

        let school = school_repository
            .get(registration.school_id)
            .await?
            .ok_or(RegistrationError::UnknownSchool)?;

        let advisor = advisor_repository
            .get(registration.advisor_id)
            .await?
            .ok_or(RegistrationError::UnknownAdvisor)?;

        if advisor.school_id != school.id {
            return Err(RegistrationError::AdvisorSchoolMismatch.into());
        }

        let student = student_repository
            .create(
                user.id,
                &registration.name,
                &user.email,
                school.id,
                advisor.id,
                registration.grade,
                &registration.project_title,
            )
            .await?;

        Ok(student)
    }

    /// Registers a judge profile with their credentials.
    pub async fn register_judge(
        &self,
        user: &entity::user::Model,
        registration: JudgeRegistrationDto,
    ) -> Result<entity::judge::Model, Error> {
        let judge_repository = JudgeRepository::new(self.db);

        if judge_repository.get_by_user_id(user.id).await?.is_some() {
            return Err(RegistrationError::ProfileExists.into());
        }

        let judge = judge_repository
            .create(
                user.id,
                &registration.name,
                &user.email,
                &registration.occupation,
                &registration.employer,
                &registration.highest_degree,
                &registration.research_areas,
            )
            .await?;

        Ok(judge)
    }
}

#[cfg(test)]
mod tests {
    mod register_advisor {
        use symposium_test_utils::prelude::*;

        use crate::{
            error::{registration::RegistrationError, Error},
            model::registry::{AdvisorRegistrationDto, NewSchoolDto},
            service::registration::RegistrationService,
        };

        /// Expect a new school to be created when none is selected
        #[tokio::test]
        async fn creates_new_school() -> Result<(), TestError> {
            let test = test_setup_with_app_tables!()?;
            let user = fixtures::insert_user(&test.state.db, "a@example.org", "advisor").await?;

            let registration_service = RegistrationService::new(&test.state.db);

            let advisor = registration_service
                .register_advisor(
                    &user,
                    AdvisorRegistrationDto {
                        name: "Jane Doe".to_string(),
                        school_id: None,
                        new_school: Some(NewSchoolDto {
                            name: "Lincoln High".to_string(),
                            address: "1 Lincoln Way".to_string(),
                        }),
                    },
                )
                .await
                .unwrap();

            assert_eq!(advisor.status, "pending");

            let school_repo = crate::data::school::SchoolRepository::new(&test.state.db);
            assert_eq!(school_repo.list().await?.len(), 1);

            Ok(())
        }

        /// Expect failure when neither a school id nor a new school is given
        #[tokio::test]
        async fn requires_a_school() -> Result<(), TestError> {
            let test = test_setup_with_app_tables!()?;
            let user = fixtures::insert_user(&test.state.db, "a@example.org", "advisor").await?;

            let registration_service = RegistrationService::new(&test.state.db);

            let result = registration_service
                .register_advisor(
                    &user,
                    AdvisorRegistrationDto {
                        name: "Jane Doe".to_string(),
                        school_id: None,
                        new_school: None,
                    },
                )
                .await;

            assert!(matches!(
                result,
                Err(Error::RegistrationError(RegistrationError::MissingSchool))
            ));

            Ok(())
        }
    }

    mod register_student {
        use symposium_test_utils::prelude::*;

        use crate::{
            error::{registration::RegistrationError, Error},
            model::registry::StudentRegistrationDto,
            service::registration::RegistrationService,
        };

        fn registration(school_id: i32, advisor_id: i32) -> StudentRegistrationDto {
            StudentRegistrationDto {
                name: "A. Lee".to_string(),
                school_id,
                advisor_id,
                grade: 11,
                project_title: "Bioluminescent Algae".to_string(),
            }
        }

        /// Expect success for a valid advisor/school pairing
        #[tokio::test]
        async fn accepts_valid_pairing() -> Result<(), TestError> {
            let test = test_setup_with_app_tables!()?;
            let school = fixtures::insert_school(&test.state.db).await?;
            let advisor_user =
                fixtures::insert_user(&test.state.db, "a@example.org", "advisor").await?;
            let advisor =
                fixtures::insert_advisor(&test.state.db, advisor_user.id, school.id, "approved")
                    .await?;
            let user = fixtures::insert_user(&test.state.db, "s@example.org", "student").await?;

            let registration_service = RegistrationService::new(&test.state.db);

            let student = registration_service
                .register_student(&user, registration(school.id, advisor.id))
                .await
                .unwrap();

            assert_eq!(student.status, "pending");
            assert_eq!(student.advisor_id, advisor.id);

            Ok(())
        }

        /// Expect failure when the advisor is at a different school
        #[tokio::test]
        async fn rejects_advisor_school_mismatch() -> Result<(), TestError> {
            let test = test_setup_with_app_tables!()?;
            let school = fixtures::insert_school(&test.state.db).await?;
            let other_school = fixtures::insert_school(&test.state.db).await?;
            let advisor_user =
                fixtures::insert_user(&test.state.db, "a@example.org", "advisor").await?;
            let advisor = fixtures::insert_advisor(
                &test.state.db,
                advisor_user.id,
                other_school.id,
                "approved",
            )
            .await?;
            let user = fixtures::insert_user(&test.state.db, "s@example.org", "student").await?;

            let registration_service = RegistrationService::new(&test.state.db);

            let result = registration_service
                .register_student(&user, registration(school.id, advisor.id))
                .await;

            assert!(matches!(
                result,
                Err(Error::RegistrationError(
                    RegistrationError::AdvisorSchoolMismatch
                ))
            ));

            Ok(())
        }

        /// Expect failure when the advisor does not exist
        #[tokio::test]
        async fn rejects_unknown_advisor() -> Result<(), TestError> {
            let test = test_setup_with_app_tables!()?;
            let school = fixtures::insert_school(&test.state.db).await?;
            let user = fixtures::insert_user(&test.state.db, "s@example.org", "student").await?;

            let registration_service = RegistrationService::new(&test.state.db);

            let result = registration_service
                .register_student(&user, registration(school.id, 999))
                .await;

            assert!(matches!(
                result,
                Err(Error::RegistrationError(RegistrationError::UnknownAdvisor))
            ));

            Ok(())
        }
    }
}
