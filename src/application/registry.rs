//! Handler registry - name-keyed lookup tables built once at startup
//!
//! `load` consumes every source in argument order; on duplicate names the
//! last-registered module wins (directory sources walk their trees in
//! lexicographic order, so the winner is reproducible). Any malformed record
//! is fatal: the dispatcher starts with a complete registry or not at all.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::errors::LoadError;
use crate::domain::entities::EventPayload;
use crate::domain::traits::{CommandModule, CommandSource, EventModule, EventSource, Gateway};

/// An event module plus its fired-once latch.
pub struct EventBinding {
    module: Arc<dyn EventModule>,
    fired: AtomicBool,
}

impl EventBinding {
    fn new(module: Arc<dyn EventModule>) -> Self {
        Self {
            module,
            fired: AtomicBool::new(false),
        }
    }

    /// True if the binding should run for this occurrence.
    fn claim(&self) -> bool {
        if self.module.once() {
            !self.fired.swap(true, Ordering::SeqCst)
        } else {
            true
        }
    }
}

/// Immutable snapshot of every loaded handler, shared by reference with the
/// routers.
pub struct HandlerRegistry {
    text: HashMap<String, Arc<dyn CommandModule>>,
    slash: HashMap<String, Arc<dyn CommandModule>>,
    events: Vec<EventBinding>,
}

impl HandlerRegistry {
    pub fn load(
        command_sources: &[&dyn CommandSource],
        event_sources: &[&dyn EventSource],
    ) -> Result<Self, LoadError> {
        let mut text: HashMap<String, Arc<dyn CommandModule>> = HashMap::new();
        let mut slash: HashMap<String, Arc<dyn CommandModule>> = HashMap::new();
        let mut events = Vec::new();

        for source in command_sources {
            for module in source.discover()? {
                let name = module.name().trim().to_lowercase();
                if name.is_empty() {
                    return Err(LoadError::MissingName(
                        "command module with an empty name".to_string(),
                    ));
                }

                if text.contains_key(&name) {
                    tracing::warn!("Duplicate command '{}', keeping the later module", name);
                }
                if module.slash_enabled() {
                    slash.insert(name.clone(), module.clone());
                } else {
                    // A later text-only module fully replaces an earlier
                    // slash-enabled one of the same name.
                    slash.remove(&name);
                }
                text.insert(name, module);
            }
        }

        for source in event_sources {
            for module in source.discover()? {
                if module.event().trim().is_empty() {
                    return Err(LoadError::MissingName(
                        "event module with an empty event name".to_string(),
                    ));
                }
                events.push(EventBinding::new(module));
            }
        }

        tracing::info!(
            "Registry loaded: {} commands ({} slash-enabled), {} event bindings",
            text.len(),
            slash.len(),
            events.len()
        );

        Ok(Self {
            text,
            slash,
            events,
        })
    }

    /// Exact-name lookup in the text command table.
    pub fn text_command(&self, name: &str) -> Option<&Arc<dyn CommandModule>> {
        self.text.get(name)
    }

    /// Exact-name lookup in the interaction command table.
    pub fn slash_command(&self, name: &str) -> Option<&Arc<dyn CommandModule>> {
        self.slash.get(name)
    }

    pub fn command_count(&self) -> usize {
        self.text.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Run every binding matching the payload's event name. Binding failures
    /// are logged and never propagate into the routing loop.
    pub async fn dispatch_event(&self, payload: &EventPayload, gateway: &dyn Gateway) {
        let name = payload.name();
        for binding in &self.events {
            if binding.module.event() != name || !binding.claim() {
                continue;
            }
            if let Err(e) = binding.module.handle(payload, gateway).await {
                tracing::error!("Event handler for '{}' failed: {}", name, e);
            }
        }
    }
}

/// An embedded table of modules: the discovery source for built-ins and for
/// tests.
#[derive(Default)]
pub struct ModuleTable {
    commands: Vec<Arc<dyn CommandModule>>,
    events: Vec<Arc<dyn EventModule>>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, module: Arc<dyn CommandModule>) -> Self {
        self.commands.push(module);
        self
    }

    pub fn with_event(mut self, module: Arc<dyn EventModule>) -> Self {
        self.events.push(module);
        self
    }
}

impl CommandSource for ModuleTable {
    fn discover(&self) -> Result<Vec<Arc<dyn CommandModule>>, LoadError> {
        Ok(self.commands.clone())
    }
}

impl EventSource for ModuleTable {
    fn discover(&self) -> Result<Vec<Arc<dyn EventModule>>, LoadError> {
        Ok(self.events.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::CommandError;
    use crate::application::testing::RecordingGateway;
    use crate::domain::entities::{Invocation, UserId};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    struct Stub {
        name: &'static str,
        slash: bool,
    }

    #[async_trait]
    impl CommandModule for Stub {
        fn name(&self) -> &str {
            self.name
        }

        fn slash_enabled(&self) -> bool {
            self.slash
        }

        async fn execute(
            &self,
            _invocation: &Invocation,
            _gateway: &dyn Gateway,
        ) -> Result<(), CommandError> {
            Ok(())
        }
    }

    struct CountingEvent {
        event: &'static str,
        once: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EventModule for CountingEvent {
        fn event(&self) -> &str {
            self.event
        }

        fn once(&self) -> bool {
            self.once
        }

        async fn handle(
            &self,
            _payload: &EventPayload,
            _gateway: &dyn Gateway,
        ) -> Result<(), CommandError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn stub(name: &'static str, slash: bool) -> Arc<dyn CommandModule> {
        Arc::new(Stub { name, slash })
    }

    #[test]
    fn slash_enabled_commands_land_in_both_tables() {
        let table = ModuleTable::new()
            .with_command(stub("ping", true))
            .with_command(stub("prefix", false));
        let registry = HandlerRegistry::load(&[&table], &[]).unwrap();

        assert!(registry.text_command("ping").is_some());
        assert!(registry.slash_command("ping").is_some());
        assert!(registry.text_command("prefix").is_some());
        assert!(registry.slash_command("prefix").is_none());
        assert!(registry.text_command("missing").is_none());
    }

    #[test]
    fn names_are_stored_case_folded() {
        let table = ModuleTable::new().with_command(stub("Ping", true));
        let registry = HandlerRegistry::load(&[&table], &[]).unwrap();

        assert!(registry.text_command("ping").is_some());
        assert!(registry.text_command("Ping").is_none());
    }

    #[test]
    fn last_registered_duplicate_wins() {
        let first = ModuleTable::new().with_command(stub("ping", true));
        let second = ModuleTable::new().with_command(stub("ping", false));
        let registry = HandlerRegistry::load(&[&first, &second], &[]).unwrap();

        assert_eq!(registry.command_count(), 1);
        // The later, text-only module replaced the slash-enabled one.
        assert!(registry.slash_command("ping").is_none());
        assert!(registry.text_command("ping").is_some());
    }

    #[test]
    fn empty_name_is_fatal() {
        let table = ModuleTable::new().with_command(stub("  ", false));

        assert!(matches!(
            HandlerRegistry::load(&[&table], &[]),
            Err(LoadError::MissingName(_))
        ));
    }

    #[tokio::test]
    async fn once_bindings_fire_a_single_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let repeated = Arc::new(AtomicUsize::new(0));
        let table = ModuleTable::new()
            .with_event(Arc::new(CountingEvent {
                event: "ready",
                once: true,
                calls: calls.clone(),
            }))
            .with_event(Arc::new(CountingEvent {
                event: "ready",
                once: false,
                calls: repeated.clone(),
            }));
        let registry = HandlerRegistry::load(&[], &[&table]).unwrap();
        let gateway = RecordingGateway::new(UserId(1));
        let payload = EventPayload::Ready {
            username: "bot".to_string(),
            guilds: vec![],
        };

        registry.dispatch_event(&payload, &gateway).await;
        registry.dispatch_event(&payload, &gateway).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(repeated.load(Ordering::SeqCst), 2);
    }
}
