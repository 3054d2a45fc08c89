//! Changelog engine: commit walking, PR resolution, backport linking and rendering.

mod category;
mod classify;
mod generate;
pub mod notes;
mod render;
mod resolver;
mod walker;

pub use category::{RELEASE_NOTE_PREFIX, ReleaseCategory};
pub use classify::{PrClass, classify, standalone_entry, upstream_entry};
pub use generate::{Changelog, generate};
pub use render::{RenderedChangelog, render};
pub use resolver::{ResolutionReport, ResolutionWarning, Resolver};
pub use walker::{WindowStep, next_window, walk_commit_range};
