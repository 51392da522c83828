mod raymarch;
mod rings;
mod vertex;

pub use raymarch::SHADER_RAYMARCH;
pub use rings::SHADER_RINGS;
pub use vertex::VERTEX_SHADER;
