pub mod command_input;
pub mod progress;
pub mod response_toast;
pub mod ring;
pub mod status_bar;
