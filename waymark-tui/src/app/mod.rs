// Declare the modules within the app directory
pub mod input;
pub mod map;
pub mod modals;
pub mod state;

// Re-export the main App struct and the types the ui modules consume
pub use state::{ActiveModal, App, MetricRow, WorkoutField};
