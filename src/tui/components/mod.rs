// Components module - UI building blocks, one per screen region
//
// Each component exposes `render(f, area, app)` and reads what it needs
// from App; only the toast is drawn as an overlay.

pub mod input_box;
pub mod logs_panel;
pub mod result_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
