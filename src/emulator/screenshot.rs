// Screenshot functionality
//
// Encodes the current frame buffer contents as a PNG file.

use super::config::ScreenshotConfig;
use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save the frame buffer as a PNG file
///
/// Screenshots land in a per-ROM subdirectory of the configured base
/// directory, named by timestamp when enabled.
///
/// # Arguments
///
/// * `rgb_data` - RGB888 pixel data, 256x240x3 bytes
/// * `rom_path` - Path of the loaded ROM, used for the subdirectory name
/// * `config` - Screenshot settings
///
/// # Returns
///
/// The path of the written file
pub fn save_screenshot(
    rgb_data: &[u8],
    rom_path: Option<&Path>,
    config: &ScreenshotConfig,
) -> Result<PathBuf, ScreenshotError> {
    let dir = screenshot_directory(rom_path, config);
    fs::create_dir_all(&dir)?;

    let filename = if config.include_timestamp {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("screenshot_{}.png", timestamp)
    } else {
        "screenshot.png".to_string()
    };
    let file_path = dir.join(filename);

    save_png(&file_path, rgb_data, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)?;

    Ok(file_path)
}

/// Pick the output directory for the current ROM
fn screenshot_directory(rom_path: Option<&Path>, config: &ScreenshotConfig) -> PathBuf {
    if let Some(rom_path) = rom_path {
        if let Some(rom_name) = rom_path.file_stem() {
            return config.directory.join(rom_name);
        }
    }
    config.directory.join("default")
}

/// Encode RGB888 data as a PNG file
fn save_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;

    Ok(())
}
