//! Thread Drafter Frontend Entry Point

mod app;
mod components;
mod context;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger("ThreadDrafter", 500) {
        web_sys::console::warn_1(&format!("logger not installed: {}", e).into());
    }
    mount_to_body(App);
}
