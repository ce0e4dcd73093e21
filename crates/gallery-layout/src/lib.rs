// ABOUTME: Justified gallery layout.
// ABOUTME: Packs images into full-width rows and tracks responsive relayout and lightbox state.

mod justified;
mod lightbox;
mod relayout;

pub use gallery_core::DEFAULT_GAP;
pub use justified::{layout_height, pack, Aspect, PackError, PackParams, PlacedItem, Row};
pub use lightbox::{Lightbox, LightboxAction, LightboxKey};
pub use relayout::{Gallery, WidthObserver};
