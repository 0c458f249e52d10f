#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use linemorph_image as image;

#[doc(inline)]
pub use linemorph_imgproc as imgproc;
