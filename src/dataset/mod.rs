pub mod reconstructor;
pub mod resolver;
