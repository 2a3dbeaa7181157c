//! DevLog browser client
//!
//! Leptos CSR front end over `devlog-app`. Everything stateful lives in
//! the workbench; this crate only binds browser APIs and renders.

use devlog_core::ClientConfig;
use leptos::*;

mod api;
mod components;
mod pages;
mod state;

pub use api::*;
pub use components::*;
pub use pages::*;
pub use state::*;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(ClientConfig::default());
    provide_context(ctx.clone());

    // Pick up where a restored session left off.
    ctx.spawn(|wb| async move { wb.start().await });

    view! {
        <div class="app-container">
            <Header/>
            <div class="layout">
                <Sidebar/>
                <MainContent/>
            </div>
            <Footer/>
        </div>
    }
}

/// Application entry point for WASM
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    mount_to_body(App);
}
