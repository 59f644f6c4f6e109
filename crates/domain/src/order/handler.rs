//! Command handler routing order commands to the aggregate.

use common::AggregateId;
use event_store::EventStore;

use crate::aggregate::Aggregate;
use crate::command::{Command, CommandResult};
use crate::error::DomainError;
use crate::repository::Repository;

use super::{ActivateOrder, Order, OrderCommand, OrderLine, PlaceOrder};

/// Single entry point translating order commands into aggregate operations.
///
/// Each command is processed as load (or construct), operate, save. The
/// handler holds no state beyond its repository and validates nothing the
/// aggregate does not.
pub struct OrderCommandHandler<S: EventStore> {
    repository: Repository<S, Order>,
}

impl<S: EventStore + Clone> Clone for OrderCommandHandler<S> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<S: EventStore> OrderCommandHandler<S> {
    /// Creates a handler over an existing repository.
    pub fn new(repository: Repository<S, Order>) -> Self {
        Self { repository }
    }

    /// Creates a handler with a repository over the given event store.
    pub fn with_store(store: S) -> Self {
        Self::new(Repository::new(store))
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &Repository<S, Order> {
        &self.repository
    }

    /// Handles a command.
    ///
    /// Rejected commands are logged and returned as `DomainError::Order`; the
    /// store is left unchanged. A command that applies but changes nothing
    /// (activating an unplaced or already active order) succeeds with no events.
    #[tracing::instrument(
        skip_all,
        fields(command = command.name(), order_id = %command.aggregate_id())
    )]
    pub async fn handle(&self, command: OrderCommand) -> Result<CommandResult<Order>, DomainError> {
        metrics::counter!("commands_handled_total", "command" => command.name()).increment(1);

        match command {
            OrderCommand::Place(cmd) => self.place(cmd).await,
            OrderCommand::Activate(cmd) => self.activate(cmd).await,
        }
    }

    /// Places a new order.
    pub async fn place_order(
        &self,
        order_id: impl Into<AggregateId>,
        lines: Vec<OrderLine>,
    ) -> Result<CommandResult<Order>, DomainError> {
        self.handle(PlaceOrder::new(order_id, lines).into()).await
    }

    /// Activates an order.
    pub async fn activate_order(
        &self,
        order_id: impl Into<AggregateId>,
    ) -> Result<CommandResult<Order>, DomainError> {
        self.handle(ActivateOrder::new(order_id).into()).await
    }

    /// Loads an order by ID.
    ///
    /// Returns None if the order has no history.
    pub async fn get_order(&self, order_id: &AggregateId) -> Result<Option<Order>, DomainError> {
        self.repository.load_existing(order_id).await
    }

    async fn place(&self, cmd: PlaceOrder) -> Result<CommandResult<Order>, DomainError> {
        let mut order = Order::default();
        let placed = order.place(cmd.order_id, cmd.lines);

        if let Err(ref e) = placed {
            metrics::counter!("commands_rejected_total", "command" => "place_order").increment(1);
            tracing::warn!(error = %e, "place order rejected");
        }

        // A rejected placement recorded nothing, so this save is a no-op.
        let events = self.repository.save(&mut order).await?;
        placed?;

        Ok(CommandResult {
            new_version: order.version(),
            aggregate: order,
            events,
        })
    }

    async fn activate(&self, cmd: ActivateOrder) -> Result<CommandResult<Order>, DomainError> {
        let mut order = self.repository.load(&cmd.order_id).await?;
        order.activate();

        let events = self.repository.save(&mut order).await?;
        if events.is_empty() {
            tracing::debug!(status = %order.status(), "activation had no effect");
        }

        Ok(CommandResult {
            new_version: order.version(),
            aggregate: order,
            events,
        })
    }
}
