pub mod header;
pub mod upload_area;
pub mod name_picker;
pub mod generate_button;
pub mod progress_bar;
pub mod report_view;
