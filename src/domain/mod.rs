// Domain layer - Core naming and classification logic

pub mod keywords;
pub mod language;
pub mod model;
pub mod naming;
pub mod tags;
