//! Component model.
//!
//! Every element of the UI (widgets, surfaces, windows) is a *component*
//! registered in a central arena. Components are addressed by
//! generation-checked [`ComponentId`] handles, so a handle held past its
//! component's destruction simply stops resolving instead of dangling.
//!
//! Two relationships are tracked here:
//!
//! - **Parentage** is a weak organizational tree for naming and diagnostics.
//!   It never transfers ownership: destroying a parent detaches its children,
//!   it does not destroy them. The value that owns a component controls its
//!   lifetime.
//! - **Containment** records which containers currently hold a part for
//!   display purposes. A containment is either active or suspended; redisplay
//!   requests from the part reach only containers that hold it actively.
//!
//! # Key Types
//!
//! - [`ComponentId`] - Arena handle for a component
//! - [`ComponentRegistry`] - The arena plus both relationship graphs
//! - [`SharedComponentRegistry`] - `RwLock` wrapper owned by the application
//!   context
//! - [`RedisplayHandler`] - Callback a container installs to receive
//!   redisplay requests from its parts

use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use crate::error::{ComponentError, ComponentResult};

new_key_type! {
    /// A unique identifier for a component in the registry.
    ///
    /// IDs are stable handles that stay valid as the tree changes and become
    /// invalid when the component is destroyed. A destroyed ID is never
    /// reused for a different component.
    pub struct ComponentId;
}

/// Callback invoked when a part held by a container requests redisplay.
///
/// Receives the ID of the part that made the request.
pub type RedisplayHandler = Arc<dyn Fn(ComponentId) + Send + Sync>;

/// One container's hold on a part.
#[derive(Clone, Copy)]
struct Containment {
    container: ComponentId,
    active: bool,
}

/// Internal per-component data.
struct ComponentData {
    /// Human-readable name for diagnostics and lookup.
    name: String,
    /// Weak organizational parent.
    parent: Option<ComponentId>,
    /// Weak organizational children.
    children: Vec<ComponentId>,
    /// Containers currently holding this component as a part.
    containers: Vec<Containment>,
    /// Redisplay sink, set when this component acts as a container.
    redisplay: Option<RedisplayHandler>,
}

impl ComponentData {
    fn new() -> Self {
        Self {
            name: String::new(),
            parent: None,
            children: Vec::new(),
            containers: Vec::new(),
            redisplay: None,
        }
    }

    fn containment_mut(&mut self, container: ComponentId) -> Option<&mut Containment> {
        self.containers.iter_mut().find(|c| c.container == container)
    }
}

/// The central arena of components and their relationships.
pub struct ComponentRegistry {
    components: SlotMap<ComponentId, ComponentData>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            components: SlotMap::with_key(),
        }
    }

    /// Register a new component and return its handle.
    pub fn register(&mut self) -> ComponentId {
        let id = self.components.insert(ComponentData::new());
        tracing::trace!(target: "cairn_core::component", ?id, "registered component");
        id
    }

    /// Remove a component from the registry.
    ///
    /// Children are detached, not destroyed: ownership of a component lives
    /// with the value that holds it, never with the registry. Containments
    /// naming the destroyed component as their container are pruned from
    /// every part, so `containers_of` never reports a dead id.
    pub fn destroy(&mut self, id: ComponentId) -> ComponentResult<()> {
        let data = self
            .components
            .remove(id)
            .ok_or(ComponentError::InvalidComponentId)?;
        tracing::trace!(
            target: "cairn_core::component",
            ?id,
            child_count = data.children.len(),
            "destroyed component"
        );

        if let Some(parent_id) = data.parent {
            if let Some(parent) = self.components.get_mut(parent_id) {
                parent.children.retain(|&child| child != id);
            }
        }
        for child_id in data.children {
            if let Some(child) = self.components.get_mut(child_id) {
                child.parent = None;
            }
        }
        for (_, part) in self.components.iter_mut() {
            part.containers.retain(|c| c.container != id);
        }
        Ok(())
    }

    /// Whether a handle still resolves to a live component.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// The number of live components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Get a component's name.
    pub fn name(&self, id: ComponentId) -> ComponentResult<&str> {
        self.components
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ComponentError::InvalidComponentId)
    }

    /// Set a component's name.
    pub fn set_name(&mut self, id: ComponentId, name: String) -> ComponentResult<()> {
        self.components
            .get_mut(id)
            .map(|d| d.name = name)
            .ok_or(ComponentError::InvalidComponentId)
    }

    /// Get a component's parent.
    pub fn parent(&self, id: ComponentId) -> ComponentResult<Option<ComponentId>> {
        self.components
            .get(id)
            .map(|d| d.parent)
            .ok_or(ComponentError::InvalidComponentId)
    }

    /// Get a component's children.
    pub fn children(&self, id: ComponentId) -> ComponentResult<&[ComponentId]> {
        self.components
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ComponentError::InvalidComponentId)
    }

    /// Set a component's parent, detaching it from any previous parent.
    ///
    /// `None` makes the component a root. Circular parentage is rejected.
    pub fn set_parent(
        &mut self,
        id: ComponentId,
        new_parent: Option<ComponentId>,
    ) -> ComponentResult<()> {
        if !self.components.contains_key(id) {
            return Err(ComponentError::InvalidComponentId);
        }
        if let Some(parent_id) = new_parent {
            if !self.components.contains_key(parent_id) {
                return Err(ComponentError::InvalidComponentId);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(ComponentError::CircularParentage);
            }
        }

        let old_parent = self.components.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent {
            if let Some(parent) = self.components.get_mut(old_parent_id) {
                parent.children.retain(|&child| child != id);
            }
        }
        if let Some(data) = self.components.get_mut(id) {
            data.parent = new_parent;
        }
        if let Some(parent_id) = new_parent {
            if let Some(parent) = self.components.get_mut(parent_id) {
                parent.children.push(id);
            }
        }
        Ok(())
    }

    fn is_ancestor_of(&self, potential_ancestor: ComponentId, id: ComponentId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.components.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    // =========================================================================
    // Containment protocol
    // =========================================================================

    /// Record that `container` now holds `part`. The containment starts
    /// active.
    ///
    /// Acquiring a part that the container already holds is a protocol
    /// violation: it logs a warning and changes nothing.
    pub fn acquire(&mut self, container: ComponentId, part: ComponentId) -> ComponentResult<()> {
        if !self.components.contains_key(container) {
            return Err(ComponentError::InvalidComponentId);
        }
        let data = self
            .components
            .get_mut(part)
            .ok_or(ComponentError::InvalidComponentId)?;
        if data.containment_mut(container).is_some() {
            tracing::warn!(
                target: "cairn_core::component",
                ?container, ?part,
                "part acquired by a container that already holds it"
            );
            return Ok(());
        }
        data.containers.push(Containment {
            container,
            active: true,
        });
        tracing::trace!(target: "cairn_core::component", ?container, ?part, "part acquired");
        Ok(())
    }

    /// Record that `container` no longer holds `part`.
    ///
    /// Releasing a part the container does not hold logs a warning and
    /// changes nothing.
    pub fn release(&mut self, container: ComponentId, part: ComponentId) -> ComponentResult<()> {
        let data = self
            .components
            .get_mut(part)
            .ok_or(ComponentError::InvalidComponentId)?;
        let before = data.containers.len();
        data.containers.retain(|c| c.container != container);
        if data.containers.len() == before {
            tracing::warn!(
                target: "cairn_core::component",
                ?container, ?part,
                "part released by a container that does not hold it"
            );
        } else {
            tracing::trace!(target: "cairn_core::component", ?container, ?part, "part released");
        }
        Ok(())
    }

    /// Mute the containment: the part stays held but stops receiving
    /// redisplay propagation through this container.
    ///
    /// Suspending an already-suspended or unheld containment logs a warning
    /// and changes nothing.
    pub fn suspend(&mut self, container: ComponentId, part: ComponentId) -> ComponentResult<()> {
        let data = self
            .components
            .get_mut(part)
            .ok_or(ComponentError::InvalidComponentId)?;
        match data.containment_mut(container) {
            Some(c) if c.active => {
                c.active = false;
                tracing::trace!(target: "cairn_core::component", ?container, ?part, "part suspended");
            }
            Some(_) => {
                tracing::warn!(
                    target: "cairn_core::component",
                    ?container, ?part,
                    "suspend of an already suspended part"
                );
            }
            None => {
                tracing::warn!(
                    target: "cairn_core::component",
                    ?container, ?part,
                    "suspend of a part the container does not hold"
                );
            }
        }
        Ok(())
    }

    /// Reactivate a suspended containment.
    ///
    /// Resuming an already-active or unheld containment logs a warning and
    /// changes nothing.
    pub fn resume(&mut self, container: ComponentId, part: ComponentId) -> ComponentResult<()> {
        let data = self
            .components
            .get_mut(part)
            .ok_or(ComponentError::InvalidComponentId)?;
        match data.containment_mut(container) {
            Some(c) if !c.active => {
                c.active = true;
                tracing::trace!(target: "cairn_core::component", ?container, ?part, "part resumed");
            }
            Some(_) => {
                tracing::warn!(
                    target: "cairn_core::component",
                    ?container, ?part,
                    "resume of a part that is already active"
                );
            }
            None => {
                tracing::warn!(
                    target: "cairn_core::component",
                    ?container, ?part,
                    "resume of a part the container does not hold"
                );
            }
        }
        Ok(())
    }

    /// The containers currently holding a part, active or suspended.
    pub fn containers_of(&self, part: ComponentId) -> ComponentResult<Vec<ComponentId>> {
        self.components
            .get(part)
            .map(|d| d.containers.iter().map(|c| c.container).collect())
            .ok_or(ComponentError::InvalidComponentId)
    }

    /// Whether `container` holds `part` with the containment active.
    pub fn is_active_in(&self, part: ComponentId, container: ComponentId) -> ComponentResult<bool> {
        self.components
            .get(part)
            .map(|d| {
                d.containers
                    .iter()
                    .any(|c| c.container == container && c.active)
            })
            .ok_or(ComponentError::InvalidComponentId)
    }

    // =========================================================================
    // Redisplay propagation
    // =========================================================================

    /// Install the redisplay sink for a container component.
    ///
    /// The handler is invoked by [`request_redisplay`](Self::request_redisplay)
    /// for every part the container holds actively.
    pub fn set_redisplay_handler(
        &mut self,
        container: ComponentId,
        handler: RedisplayHandler,
    ) -> ComponentResult<()> {
        self.components
            .get_mut(container)
            .map(|d| d.redisplay = Some(handler))
            .ok_or(ComponentError::InvalidComponentId)
    }

    /// Remove a container's redisplay sink.
    pub fn clear_redisplay_handler(&mut self, container: ComponentId) -> ComponentResult<()> {
        self.components
            .get_mut(container)
            .map(|d| d.redisplay = None)
            .ok_or(ComponentError::InvalidComponentId)
    }

    /// Propagate a part's redisplay request to its active containers.
    ///
    /// Containers that have been destroyed, are suspended, or have no
    /// handler installed are skipped silently. A part with no containers is
    /// a silent no-op. Returns the number of handlers invoked.
    pub fn request_redisplay(&self, part: ComponentId) -> ComponentResult<usize> {
        let data = self
            .components
            .get(part)
            .ok_or(ComponentError::InvalidComponentId)?;

        let mut notified = 0;
        for containment in &data.containers {
            if !containment.active {
                continue;
            }
            let Some(container) = self.components.get(containment.container) else {
                continue;
            };
            if let Some(handler) = &container.redisplay {
                handler(part);
                notified += 1;
            }
        }
        tracing::trace!(target: "cairn_core::component", ?part, notified, "redisplay requested");
        Ok(notified)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper around [`ComponentRegistry`].
///
/// Owned by the application context and handed to components explicitly;
/// there is no global instance.
pub struct SharedComponentRegistry {
    inner: RwLock<ComponentRegistry>,
}

impl SharedComponentRegistry {
    /// Create a shared registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ComponentRegistry::new()),
        }
    }

    /// Register a new component.
    pub fn register(&self) -> ComponentId {
        self.inner.write().register()
    }

    /// Destroy a component, detaching its children.
    pub fn destroy(&self, id: ComponentId) -> ComponentResult<()> {
        self.inner.write().destroy(id)
    }

    /// Whether a handle still resolves.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.inner.read().contains(id)
    }

    /// The number of live components.
    pub fn component_count(&self) -> usize {
        self.inner.read().component_count()
    }

    /// Get a component's name.
    pub fn name(&self, id: ComponentId) -> ComponentResult<String> {
        self.inner.read().name(id).map(|s| s.to_string())
    }

    /// Set a component's name.
    pub fn set_name(&self, id: ComponentId, name: String) -> ComponentResult<()> {
        self.inner.write().set_name(id, name)
    }

    /// Get a component's parent.
    pub fn parent(&self, id: ComponentId) -> ComponentResult<Option<ComponentId>> {
        self.inner.read().parent(id)
    }

    /// Get a component's children (owned for thread safety).
    pub fn children(&self, id: ComponentId) -> ComponentResult<Vec<ComponentId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    /// Set a component's parent.
    pub fn set_parent(&self, id: ComponentId, parent: Option<ComponentId>) -> ComponentResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// Record a containment.
    pub fn acquire(&self, container: ComponentId, part: ComponentId) -> ComponentResult<()> {
        self.inner.write().acquire(container, part)
    }

    /// Remove a containment.
    pub fn release(&self, container: ComponentId, part: ComponentId) -> ComponentResult<()> {
        self.inner.write().release(container, part)
    }

    /// Mute a containment.
    pub fn suspend(&self, container: ComponentId, part: ComponentId) -> ComponentResult<()> {
        self.inner.write().suspend(container, part)
    }

    /// Reactivate a containment.
    pub fn resume(&self, container: ComponentId, part: ComponentId) -> ComponentResult<()> {
        self.inner.write().resume(container, part)
    }

    /// The containers currently holding a part.
    pub fn containers_of(&self, part: ComponentId) -> ComponentResult<Vec<ComponentId>> {
        self.inner.read().containers_of(part)
    }

    /// Whether a containment is active.
    pub fn is_active_in(&self, part: ComponentId, container: ComponentId) -> ComponentResult<bool> {
        self.inner.read().is_active_in(part, container)
    }

    /// Install a container's redisplay sink.
    pub fn set_redisplay_handler(
        &self,
        container: ComponentId,
        handler: RedisplayHandler,
    ) -> ComponentResult<()> {
        self.inner.write().set_redisplay_handler(container, handler)
    }

    /// Remove a container's redisplay sink.
    pub fn clear_redisplay_handler(&self, container: ComponentId) -> ComponentResult<()> {
        self.inner.write().clear_redisplay_handler(container)
    }

    /// Propagate a part's redisplay request.
    ///
    /// Handlers may re-enter this method to forward the request up a
    /// container chain, so the read lock is taken recursively.
    pub fn request_redisplay(&self, part: ComponentId) -> ComponentResult<usize> {
        self.inner.read_recursive().request_redisplay(part)
    }

    /// Access the registry with a read lock for compound queries.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ComponentRegistry) -> R,
    {
        f(&self.inner.read())
    }

    /// Access the registry with a write lock for compound updates.
    pub fn with_write<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ComponentRegistry) -> R,
    {
        f(&mut self.inner.write())
    }
}

impl Default for SharedComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
