pub mod category;
pub mod chart;
pub mod entry;
pub mod settings;
pub mod snapshot;
pub mod state;
