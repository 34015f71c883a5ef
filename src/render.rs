pub(crate) mod geometry;
pub(crate) mod grid;
pub(crate) mod pipeline;
pub(crate) mod signature;
pub(crate) mod surface;
pub(crate) mod text;
