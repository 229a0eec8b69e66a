//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization and the depth target used by
//! the mesh pass.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth render target sized to the surface.
pub mod texture;
