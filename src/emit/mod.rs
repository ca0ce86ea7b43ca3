//! Drawing emission: primitive stream, icons, assembly and AutoLISP output.

pub mod drawing;
pub mod icons;
pub mod lisp;
pub mod primitives;

pub use drawing::build_drawing;
pub use icons::DeviceIcon;
pub use lisp::render_lisp;
pub use primitives::{Drawing, Primitive};
