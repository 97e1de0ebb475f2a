pub use super::advisor::Entity as Advisor;
pub use super::chaperone::Entity as Chaperone;
pub use super::judge::Entity as Judge;
pub use super::photo_release_form::Entity as PhotoReleaseForm;
pub use super::photo_release_party::Entity as PhotoReleaseParty;
pub use super::school::Entity as School;
pub use super::statement_form::Entity as StatementForm;
pub use super::statement_party::Entity as StatementParty;
pub use super::student::Entity as Student;
pub use super::user::Entity as User;
