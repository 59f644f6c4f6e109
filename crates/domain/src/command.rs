//! Command infrastructure.

use common::AggregateId;
use event_store::Version;

use crate::aggregate::Aggregate;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult<A: Aggregate> {
    /// The aggregate after the command was applied and saved.
    pub aggregate: A,

    /// The events that were generated and persisted. Empty for a no-op.
    pub events: Vec<A::Event>,

    /// The version of the aggregate after the command.
    pub new_version: Version,
}

impl<A: Aggregate> CommandResult<A> {
    /// Returns true if the command changed nothing.
    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }
}

/// Trait for commands that can be executed against an aggregate.
///
/// Commands represent an intention to perform an action. Unlike events they
/// may be rejected, in which case nothing is recorded.
pub trait Command: Send + Sync {
    /// The type of aggregate this command targets.
    type Aggregate: Aggregate;

    /// Returns the ID of the aggregate this command targets.
    fn aggregate_id(&self) -> &AggregateId;

    /// Returns the command name, used as a metrics label and in logs.
    fn name(&self) -> &'static str;
}
