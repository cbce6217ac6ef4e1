pub mod generator;

pub use generator::{render_history, render_status, write_report};
