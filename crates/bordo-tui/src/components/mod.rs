pub mod gps_panel;
pub mod menu_overlay;
pub mod music_player;
pub mod rings_panel;
pub mod video_overlay;
pub mod visualizer;
