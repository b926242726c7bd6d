// Clinic Calendar Library
// Headless scheduling engine plus the egui week view

pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;
