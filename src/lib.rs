//! Viewfinder frustum capture
//!
//! Engine-agnostic core for a first-person "viewfinder" mechanic: the
//! player frames a view, presses a key, and everything inside the
//! camera's frustum is sliced along the six frustum planes and
//! collected under a capture container.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **geometry** - AABBs, CPU meshes, debug hull/wireframe builders
//! 2. **camera** - camera pose, projections, frustum corners
//! 3. **frustum** - frustum planes and intersection tests
//! 4. **clip** - plane/mesh clipping with cross-section capping
//! 5. **scene** - hecs-backed scene graph: spawn, query, duplicate, reparent
//! 6. **capture** - the capture pipeline and its configuration
//! 7. **control** - first-person movement, mouse look, capture trigger
//! 8. **session** - per-frame orchestration for one player
//!
//! Rendering, physics simulation, input devices, and asset management
//! belong to the host engine; this crate only reads a camera, slices
//! meshes, and mutates the scene graph through its own `Scene` type.

pub mod camera;
pub mod capture;
pub mod clip;
pub mod control;
pub mod frustum;
pub mod geometry;
pub mod scene;
pub mod session;

// Re-export commonly used types
pub use camera::{Camera, Projection};
pub use capture::{CaptureConfig, CaptureError, CaptureReport, Capturer};
pub use clip::{clip_by_plane, clip_to_frustum};
pub use control::{InputState, PlayerControl, Pose};
pub use frustum::{Frustum, Intersection, Plane};
pub use geometry::{frustum_hull, wireframe_box, Aabb, MaterialId, MeshData};
pub use scene::{
    Candidate, Children, Layer, LayerMask, MeshComponent, Name, Parent, Scene, Transform,
};
pub use session::{Session, SessionConfig};

// Re-export glam for convenience
pub use glam;
