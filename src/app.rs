//! Application layer of dualpane.
//!
//! - [state]: [AppState], the controller owning both panels, the prompt and the viewer.
//! - [handlers]: what every key and action does.
//! - [keymap]: config key names to actions.
//! - [panel], [prompt], [viewer]: the state of each screen element.

pub mod handlers;
pub mod keymap;
pub mod panel;
pub mod prompt;
pub mod state;
pub mod viewer;

pub(crate) use panel::Panel;
pub(crate) use prompt::Prompt;
pub(crate) use state::{AppState, KeypressResult};
pub(crate) use viewer::{Viewer, ViewerContent};
