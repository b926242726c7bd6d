// Service module exports
// Headless scheduling engine: geometry, drag state machine, layout and week shell

pub mod drag;
pub mod geometry;
pub mod layout;
pub mod settings;
pub mod week;
