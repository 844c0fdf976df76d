// Display module - frame sink capability, frame buffer, and the NES palette

mod framebuffer;
mod palette;

pub use framebuffer::{FrameBuffer, FrameSink, NullSink};
pub use palette::{palette_rgb, palette_to_rgb, NES_PALETTE};
