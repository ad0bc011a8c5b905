//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame and timer callbacks (`requestAnimationFrame`/`setInterval` on web)
//! - The presentation surface (DOM elements on web, a recorder natively)

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserScheduler;
#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;
pub use headless::HeadlessSurface;
