mod accumulator;
pub mod builder;
pub mod model;
pub mod scorer;

pub use accumulator::IdMeanAccumulator;
pub use builder::BiasModelBuilder;
pub use model::BiasModel;
pub use scorer::{ItemScorer, UserItemBiasItemScorer};
