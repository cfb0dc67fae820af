pub mod ljcut;

pub use ljcut::{LJCut, LJCutCoeff, PairForces};
