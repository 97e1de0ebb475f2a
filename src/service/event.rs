use sea_orm::ConnectionTrait;
use tracing::info;

use crate::{
    error::Error, model::event::DomainEvent, service::form::statement::StatementFormService,
};

/// Routes domain events to their single consumer.
///
/// Raisers call [`dispatch`] instead of reaching into another workflow's
/// tables directly.
pub async fn dispatch<C: ConnectionTrait>(db: &C, event: DomainEvent) -> Result<(), Error> {
    match event {
        DomainEvent::PlanReplaced { student_id } => {
            info!(
                student_id,
                "research plan replaced; invalidating statement signatures"
            );

            StatementFormService::new(db)
                .invalidate_signatures(student_id)
                .await
        }
    }
}
