pub mod catalog;
pub mod localization;
pub mod random;
pub mod sampler;
pub mod selector;
pub mod tile_classifier;
