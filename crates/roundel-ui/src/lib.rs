//! Roundel UI: application builder and the debug panel.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use roundel_ui::Application;
//! use roundel_engine::scene::RenderState;
//!
//! Application::new()
//!     .state(RenderState::default())
//!     .debug_panel(true)
//!     .run()?;
//! ```
//!
//! The panel is a column of [`Slider`](widgets::slider::Slider)s that write
//! straight into the application's `RenderState`; there is no retained
//! widget tree.

pub mod app;
pub mod event;
pub mod panel;
pub mod widgets;

pub use app::Application;
pub use panel::{DebugPanel, PanelLayout, SliderTarget};
