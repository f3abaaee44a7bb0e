// Application layer - Use case interactors

pub mod container;
pub mod process_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use process_interactor::{ProcessInteractor, ProcessReport, ProcessRequest};
