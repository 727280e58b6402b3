//! Interaction core of a sliding photo picker panel.
//!
//! A bottom sheet hosting the photo grid rests over a media preview. The user drags it between
//! an expanded and a partial position, or far enough down to dismiss the picker, and scrolling
//! the grid can raise or lower it. This crate turns gesture samples, scroll frames and layout
//! changes into panel positions, state transitions and preview effects. Rendering and animation
//! are left to the host.

pub mod input;
pub mod panel;
pub mod session;

pub use panel::{PanelEvent, PanelOptions, PanelState, PanelStateMachine};
pub use session::PanelSession;
