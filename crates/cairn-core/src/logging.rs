//! Logging and diagnostics.
//!
//! Cairn instruments itself with the `tracing` crate. To see logs, install a
//! subscriber in the host application, either your own or the default one:
//!
//! ```
//! cairn_core::logging::init();
//! ```
//!
//! The [`targets`] constants match the `target:` strings used throughout the
//! framework and can be fed to filter directives, e.g.
//! `RUST_LOG=cairn_core::component=trace`.

use std::fmt::Write as FmtWrite;

use tracing_subscriber::EnvFilter;

use crate::component::{ComponentId, ComponentRegistry};
use crate::error::ComponentResult;

/// Install the default log subscriber: formatted output on stderr,
/// filtered by `RUST_LOG` (warnings and up when unset).
///
/// A no-op when the host has already installed a subscriber, so tests and
/// embedding applications may call it unconditionally.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Target names for log filtering, one per subsystem.
pub mod targets {
    /// Everything in the core crate.
    pub const CORE: &str = "cairn_core";
    /// Component registry and containment protocol.
    pub const COMPONENT: &str = "cairn_core::component";
    /// Event dispatch.
    pub const DISPATCH: &str = "cairn_core::dispatch";
    /// Input translation.
    pub const INPUT: &str = "cairn_core::input";
}

/// Format the component tree rooted at `root` for debug output.
///
/// Each line shows the component's name (or `(unnamed)`), its ID, and how
/// many containers currently hold it.
pub fn format_component_tree(
    registry: &ComponentRegistry,
    root: ComponentId,
) -> ComponentResult<String> {
    let mut output = String::new();
    format_subtree(registry, root, 0, &mut output)?;
    Ok(output)
}

fn format_subtree(
    registry: &ComponentRegistry,
    id: ComponentId,
    depth: usize,
    output: &mut String,
) -> ComponentResult<()> {
    let name = registry.name(id)?.to_string();
    let container_count = registry.containers_of(id)?.len();
    let children: Vec<ComponentId> = registry.children(id)?.to_vec();

    let indent = "  ".repeat(depth);
    let display_name = if name.is_empty() { "(unnamed)" } else { &name };
    write!(output, "{indent}{display_name} [{id:?}]").expect("write to String");
    if container_count > 0 {
        write!(output, " held by {container_count}").expect("write to String");
    }
    output.push('\n');

    for child in children {
        format_subtree(registry, child, depth + 1, output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_lists_names_and_containment() {
        let mut registry = ComponentRegistry::new();
        let root = registry.register();
        let child = registry.register();
        let container = registry.register();

        registry.set_name(root, "window".to_string()).unwrap();
        registry.set_name(child, "viewport".to_string()).unwrap();
        registry.set_parent(child, Some(root)).unwrap();
        registry.acquire(container, child).unwrap();

        let output = format_component_tree(&registry, root).unwrap();
        assert!(output.contains("window"));
        assert!(output.contains("viewport"));
        assert!(output.contains("held by 1"));
    }

    #[test]
    fn unnamed_components_are_marked() {
        let mut registry = ComponentRegistry::new();
        let root = registry.register();
        let output = format_component_tree(&registry, root).unwrap();
        assert!(output.contains("(unnamed)"));
    }
}
