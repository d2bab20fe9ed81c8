//! TUI pane rendering modules
//!
//! Every pane is a stateless `render_*` function over borrowed data, plus a
//! small scroll-state struct where the pane needs one.
//!
//! - [`code`]: pseudocode listing with the current line highlighted
//! - [`state`]: payload visualisation (bars, boards, JSON fallback)
//! - [`narration`]: step kind and description
//! - [`status`]: status bar with keybindings and playback badge

pub mod code;
pub mod narration;
pub mod state;
pub mod status;

pub use code::{render_code_pane, CodeScrollState};
pub use narration::render_narration_pane;
pub use state::{payload_lines, render_state_pane};
pub use status::{render_status_bar, Badge};
