//! Application context and the component-embedding helper.
//!
//! A [`UiContext`] owns the shared component registry and the epoch from
//! which event timestamps are measured. It is handed to components
//! explicitly at construction; there is no global instance to look up.
//!
//! [`ComponentBase`] is the helper struct embedded in every component type.
//! It registers the component on construction, unregisters it on drop, and
//! carries the component's outgoing event dispatchers.

use std::sync::{Arc, Weak};
use std::time::Instant;

use cairn_core::{
    ComponentEvents, ComponentId, ComponentResult, SharedComponentRegistry, Timestamp,
};

struct ContextInner {
    registry: SharedComponentRegistry,
    epoch: Instant,
}

/// Cheaply clonable handle to the application's shared state.
#[derive(Clone)]
pub struct UiContext {
    inner: Arc<ContextInner>,
}

impl UiContext {
    /// Create a fresh context with an empty registry. The epoch for event
    /// timestamps is the moment of creation.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ContextInner {
                registry: SharedComponentRegistry::new(),
                epoch: Instant::now(),
            }),
        }
    }

    /// The shared component registry.
    pub fn registry(&self) -> &SharedComponentRegistry {
        &self.inner.registry
    }

    /// The current timestamp, measured from context creation.
    pub fn now(&self) -> Timestamp {
        self.inner.epoch.elapsed()
    }

    /// Downgrade to a weak handle.
    ///
    /// Callbacks stored inside the registry must capture the context weakly
    /// or they would keep it alive through itself.
    pub fn downgrade(&self) -> WeakUiContext {
        WeakUiContext {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak counterpart of [`UiContext`].
#[derive(Clone)]
pub struct WeakUiContext {
    inner: Weak<ContextInner>,
}

impl WeakUiContext {
    /// Recover the context, if it is still alive.
    pub fn upgrade(&self) -> Option<UiContext> {
        self.inner.upgrade().map(|inner| UiContext { inner })
    }
}

/// Helper embedded in every component type.
///
/// Registers the component on construction and destroys its registry entry
/// on drop. Holds the component's outgoing [`ComponentEvents`].
pub struct ComponentBase {
    ctx: UiContext,
    id: ComponentId,
    events: ComponentEvents,
}

impl ComponentBase {
    /// Register a new component in the context's registry.
    pub fn new(ctx: &UiContext) -> Self {
        let id = ctx.registry().register();
        Self {
            ctx: ctx.clone(),
            id,
            events: ComponentEvents::new(),
        }
    }

    /// The component's registry handle.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The owning context.
    pub fn context(&self) -> &UiContext {
        &self.ctx
    }

    /// The component's outgoing event dispatchers.
    pub fn events(&self) -> &ComponentEvents {
        &self.events
    }

    /// The component's name, empty if unnamed.
    pub fn name(&self) -> String {
        self.ctx.registry().name(self.id).unwrap_or_default()
    }

    /// Set the component's name.
    pub fn set_name(&self, name: impl Into<String>) {
        let _ = self.ctx.registry().set_name(self.id, name.into());
    }

    /// The component's organizational parent.
    pub fn parent(&self) -> Option<ComponentId> {
        self.ctx.registry().parent(self.id).ok().flatten()
    }

    /// Set the component's organizational parent.
    pub fn set_parent(&self, parent: Option<ComponentId>) -> ComponentResult<()> {
        self.ctx.registry().set_parent(self.id, parent)
    }

    /// Ask every container currently holding this component actively to
    /// schedule a redisplay. A component with no containers is a no-op.
    pub fn request_redisplay(&self) {
        let _ = self.ctx.registry().request_redisplay(self.id);
    }
}

impl Drop for ComponentBase {
    fn drop(&mut self) {
        let _ = self.ctx.registry().destroy(self.id);
    }
}
