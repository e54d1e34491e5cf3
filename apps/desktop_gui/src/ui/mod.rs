//! UI layer: the eframe application and render fault containment.

pub mod app;
pub mod fault_boundary;
