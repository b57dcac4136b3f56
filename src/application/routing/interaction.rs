//! Interaction router - slash command dispatch by declared name

use std::sync::Arc;

use crate::application::registry::HandlerRegistry;
use crate::application::routing::boundary::ErrorBoundary;
use crate::application::routing::message::RouteOutcome;
use crate::domain::entities::{IncomingInteraction, Invocation};
use crate::domain::traits::Gateway;

pub struct InteractionRouter {
    registry: Arc<HandlerRegistry>,
    boundary: Arc<ErrorBoundary>,
}

impl InteractionRouter {
    pub fn new(registry: Arc<HandlerRegistry>, boundary: Arc<ErrorBoundary>) -> Self {
        Self { registry, boundary }
    }

    pub async fn route(
        &self,
        interaction: IncomingInteraction,
        gateway: &dyn Gateway,
    ) -> RouteOutcome {
        let Some(name) = interaction.command_name().map(str::to_lowercase) else {
            // Component presses and other non-command kinds are not ours.
            return RouteOutcome::Ignored;
        };

        let Some(module) = self.registry.slash_command(&name).cloned() else {
            tracing::debug!("No slash command named '{}', dropping", name);
            return RouteOutcome::NoMatch;
        };

        let invocation = Invocation::from_interaction(interaction);
        tracing::debug!(invocation = %invocation.id, command = %name, "Dispatching slash command");
        match module.execute(&invocation, gateway).await {
            Ok(()) => RouteOutcome::Completed,
            Err(e) => {
                self.boundary.report(&invocation, &name, &e, gateway).await;
                RouteOutcome::Failed
            }
        }
    }
}
