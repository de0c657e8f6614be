//! The application object.
//!
//! An [`Application`] owns the [`UiContext`] every component is created
//! in and the [`ApplicationPeer`] that drives the toolkit's event loop.
//! One per process is the expected shape, but nothing enforces it; tests
//! routinely run several against headless peers.

use cairn_core::LockKey;

use crate::context::UiContext;
use crate::error::UiResult;
use crate::peer::ApplicationPeer;

/// Process-level framework state and the event loop.
pub struct Application {
    ctx: UiContext,
    peer: Box<dyn ApplicationPeer>,
}

impl Application {
    /// Create an application with a fresh context over the given peer.
    pub fn new(peer: Box<dyn ApplicationPeer>) -> Self {
        Self {
            ctx: UiContext::new(),
            peer,
        }
    }

    /// The context components of this application are created in.
    pub fn context(&self) -> &UiContext {
        &self.ctx
    }

    /// Perform toolkit initialization with the program arguments.
    ///
    /// Installs the default log subscriber unless the host already set one,
    /// then hands the arguments to the peer.
    pub fn initialize(&mut self, args: &[String]) -> UiResult<()> {
        cairn_core::logging::init();
        tracing::debug!(target: "cairn::application", arg_count = args.len(), "initializing");
        self.peer.initialize(args)
    }

    /// Run the event loop to completion; returns the exit code.
    pub fn run(&mut self) -> UiResult<i32> {
        let code = self.peer.run()?;
        tracing::info!(target: "cairn::application", code, "event loop finished");
        Ok(code)
    }

    /// Ask the event loop to terminate with the given exit code.
    pub fn exit(&mut self, code: i32) -> UiResult<()> {
        self.peer.exit(code)
    }

    /// Read a keyboard lock-key state.
    pub fn lock_key_state(&self, key: LockKey) -> UiResult<bool> {
        self.peer.lock_key_state(key)
    }

    /// Set a keyboard lock-key state.
    pub fn set_lock_key_state(&mut self, key: LockKey, on: bool) -> UiResult<()> {
        self.peer.set_lock_key_state(key, on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peer::headless::HeadlessApplicationPeer;

    #[test]
    fn run_returns_the_requested_exit_code() {
        let mut app = Application::new(Box::new(HeadlessApplicationPeer::new()));
        app.initialize(&["demo".to_string()]).unwrap();
        app.exit(7).unwrap();
        assert_eq!(app.run().unwrap(), 7);
    }

    #[test]
    fn lock_keys_delegate_to_the_peer() {
        let mut app = Application::new(Box::new(HeadlessApplicationPeer::new()));
        app.set_lock_key_state(LockKey::ScrollLock, true).unwrap();
        assert!(app.lock_key_state(LockKey::ScrollLock).unwrap());
    }
}
