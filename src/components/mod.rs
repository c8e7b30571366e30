//! UI Components
//!
//! Reusable Leptos components.

mod char_counter;
mod controls_bar;
mod delete_confirm_button;
mod diff_view;
mod edit_controls;
mod log_panel;
mod tweet_card;
mod tweet_list;
mod version_dropdown;

pub use char_counter::CharCounter;
pub use controls_bar::ControlsBar;
pub use delete_confirm_button::DeleteConfirmButton;
pub use diff_view::DiffView;
pub use edit_controls::EditControls;
pub use log_panel::LogPanel;
pub use tweet_card::TweetCard;
pub use tweet_list::TweetList;
pub use version_dropdown::VersionDropdown;
