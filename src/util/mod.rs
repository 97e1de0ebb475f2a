//! Cross-cutting helpers used by services and controllers.

pub mod password;
