//! Terminal UI for dualpane.
//!
//! - [render]: the frame entry point called by the event loop.
//! - [panes]: the two file panels.
//! - [viewer]: the text viewer and the hex dump page.
//! - [widgets]: bars, prompts and clipped line drawing.
//! - [icons]: file type icons.

pub mod icons;
pub mod panes;
pub mod render;
pub mod viewer;
pub mod widgets;

pub(crate) use render::render;
