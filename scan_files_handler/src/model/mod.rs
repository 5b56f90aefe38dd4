mod event;
mod scan;
mod tag;

pub use event::*;
pub use scan::*;
pub use tag::*;
