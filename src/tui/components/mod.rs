//! # TUI Components
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar: mode + running action)
//! ├── action_list.rs   (The panel buttons)
//! └── output_panel.rs  (Latest outcome + history)
//! ```
//!
//! Components receive external data as props, never by reaching into
//! global state. Stateful widgets borrow their persistent state from
//! `TuiState` for the duration of one frame.

mod action_list;
mod output_panel;
mod title_bar;

pub use action_list::ActionList;
pub use output_panel::OutputPanel;
pub use title_bar::TitleBar;
