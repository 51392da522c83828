//! WebGL2 backend
//!
//! wgpu restricted to its GL backend, so the surface is a WebGL2 context on
//! the page's canvas. Validation errors from wgpu-core are collected through
//! the device's uncaptured-error hook; on the GL backend they arrive
//! synchronously, which lets compile and link report failures as results.
//!
//! ## Design
//!
//! - Full-screen triangle rendered via vertex shader (no geometry needed)
//! - One 32-byte uniform buffer shared by every program
//! - Each program is one render pipeline

mod init;
mod render;
mod surface;

pub use surface::WgpuSurface;
