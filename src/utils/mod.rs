// Utility module exports
// Pure helpers shared by the scheduling engine and the egui views

pub mod time;
