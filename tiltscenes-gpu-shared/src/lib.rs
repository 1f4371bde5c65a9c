//! Types shared between the tiltscenes runtime and its renderer: instance
//! records, per-frame uniforms, camera math, colours and the WGSL source.

pub mod math;
pub mod palette;
pub mod shaders;
pub mod uniforms;
