pub mod prelude;

pub mod advisor;
pub mod chaperone;
pub mod judge;
pub mod photo_release_form;
pub mod photo_release_party;
pub mod school;
pub mod statement_form;
pub mod statement_party;
pub mod student;
pub mod user;
