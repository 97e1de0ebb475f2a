/// Domain events raised by one workflow and consumed by another.
///
/// The only cross-entity rule in the system: replacing a research plan
/// invalidates every third-party attestation previously collected about it.
/// Raising the event and reacting to it are kept in separate services so the
/// invalidation rule lives in exactly one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainEvent {
    PlanReplaced { student_id: i32 },
}
