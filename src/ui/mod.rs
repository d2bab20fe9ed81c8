//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: single-trace player (step, autoplay, jump to start/end)
//! - **[`battle`]**: two runners replayed side by side on a timer
//! - **[`panes`]**: stateless render functions shared by both screens
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! Both screens own their data and expose `run` to start the event loop on a
//! caller-provided terminal.

pub mod app;
pub mod battle;
pub mod panes;
pub mod theme;

pub use app::App;
pub use battle::BattleApp;
