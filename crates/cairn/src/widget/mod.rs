//! Widgets: the composable contents of a renderable surface.

pub mod camera_nav;
pub mod multiplexor;
pub mod passthru;
pub mod traits;


pub use camera_nav::{BOUNDARY_WARP_DISTANCE, CameraNavigationWidget, PointerFollowMode};
pub use multiplexor::MultiplexorWidget;
pub use passthru::{PassThruControl, PassThruView, PassThruWidget};
pub use traits::{Control, SurfaceLink, View, Widget, WidgetBase, WidgetPart, attach_part};
