//! A retained-mode scene-viewing UI framework.
//!
//! `cairn` layers windows, drawable surfaces, and composable widgets over
//! the component protocol from [`cairn_core`]. The framework side is
//! toolkit-agnostic: everything that must touch a native windowing system
//! goes through the peer traits in [`peer`], and the crate ships headless
//! peers so the whole stack runs in tests and off-screen tools.
//!
//! The usual shape of a program:
//!
//! 1. Create an [`Application`] over a toolkit's application peer.
//! 2. Open a [`Window`] and fetch its [`RenderableSurface`].
//! 3. Install a widget tree on the surface, typically a
//!    [`CameraNavigationWidget`](widget::CameraNavigationWidget) around
//!    the scene content.
//! 4. Run the event loop; the peer feeds events to the surface's
//!    `dispatch_*` methods and schedules renders on redisplay requests.

#![warn(missing_docs)]

pub mod application;
pub mod camera;
pub mod context;
pub mod error;
pub mod peer;
pub mod render;
pub mod surface;
pub mod transform;
pub mod widget;
pub mod window;

pub use application::Application;
pub use camera::{Camera, DEFAULT_FAR_CLIP, DEFAULT_NEAR_CLIP, Projection};
pub use context::{ComponentBase, UiContext, WeakUiContext};
pub use error::{UiError, UiResult};
pub use peer::{
    ApplicationPeer, RenderableSurfacePeer, SharedSurfacePeer, WindowPeer,
};
pub use render::{MatrixStack, RenderContext, Renderer, SharedRenderer, ViewMatrices};
pub use surface::{CLICK_DURATION, RenderableSurface};
pub use transform::Transform;
pub use widget::{
    CameraNavigationWidget, Control, MultiplexorWidget, PassThruControl, PassThruView,
    PassThruWidget, PointerFollowMode, SurfaceLink, View, Widget, WidgetBase, WidgetPart,
};
pub use window::Window;
