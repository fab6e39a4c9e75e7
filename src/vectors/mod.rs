pub mod sparse;

pub use sparse::SparseVector;
