//! App icon generation for iOS and Android

pub mod android;
pub mod canvas;
pub mod constants;
pub mod inspect;
pub mod ios;
pub mod label;
pub mod logo;
pub mod whistle;

use crate::exceptions::Result;
use image::{ImageBuffer, ImageFormat, Pixel, PixelWithColorType};
use log::trace;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub use ios::AppStoreStyle;

/// A written icon and its square size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconFile {
    pub path: PathBuf,
    pub size: u32,
}

/// Save as PNG keeping the buffer's channel layout
pub fn save_png<P>(image: &ImageBuffer<P, Vec<u8>>, path: &Path) -> Result<()>
where
    P: Pixel<Subpixel = u8> + PixelWithColorType,
{
    trace!("Saving {}x{} PNG to {}", image.width(), image.height(), path.display());
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
