pub mod chart_view;
pub mod notices;
pub mod selection_summary;
pub mod status_bar;
pub mod toolbar;
pub mod tooth_menu;
