//! ICNS icon file creation for macOS applications.

use crate::bundler::error::{Error, Result};
use crate::bundler::resources::icons::{CanonicalIconSize, IconArtifact, ImageCodec};
use icns::{IconFamily, IconType, Image as IconsImage, PixelFormat};
use image::imageops::FilterType;
use std::{fs, io, path::Path};

/// Default [`ImageCodec`] backed by the `image` and `icns` crates.
///
/// Resampling uses Lanczos3, which keeps edges sharp in both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcnsCodec;

impl IcnsCodec {
    /// ICNS element type used to store an icon of the given canonical size.
    pub fn icon_type(size: CanonicalIconSize) -> IconType {
        match size {
            CanonicalIconSize::Size16 => IconType::RGBA32_16x16,
            CanonicalIconSize::Size32 => IconType::RGBA32_32x32,
            CanonicalIconSize::Size48 => IconType::RGB24_48x48,
            CanonicalIconSize::Size128 => IconType::RGBA32_128x128,
            CanonicalIconSize::Size256 => IconType::RGBA32_256x256,
            CanonicalIconSize::Size512 => IconType::RGBA32_512x512,
            CanonicalIconSize::Size1024 => IconType::RGBA32_512x512_2x,
        }
    }
}

impl ImageCodec for IcnsCodec {
    fn decode(&self, bytes: &[u8]) -> Result<IconArtifact> {
        let image = image::load_from_memory(bytes)?;
        Ok(IconArtifact::new(image))
    }

    fn resize(&self, icon: IconArtifact, width: u32, height: u32) -> IconArtifact {
        let resized = icon
            .into_image()
            .resize_exact(width, height, FilterType::Lanczos3);
        IconArtifact::new(resized)
    }

    fn encode_icon_container(&self, icon: IconArtifact) -> Result<Vec<u8>> {
        let (width, height) = (icon.width(), icon.height());
        let size = icon.canonical_size().ok_or_else(|| {
            Error::encode(
                format!("creating ICNS image for {width}x{height}"),
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "no ICNS icon type has these dimensions",
                ),
            )
        })?;

        let rgba = icon.into_image().into_rgba8();
        let icns_img = IconsImage::from_data(PixelFormat::RGBA, width, height, rgba.into_raw())
            .map_err(|e| Error::encode(format!("creating ICNS image for {size}"), e))?;

        let mut family = IconFamily::new();
        family
            .add_icon_with_type(&icns_img, Self::icon_type(size))
            .map_err(|e| Error::encode(format!("adding {size} to icon family"), e))?;

        let mut bytes = Vec::new();
        family
            .write(&mut bytes)
            .map_err(|e| Error::encode("writing ICNS data", e))?;
        Ok(bytes)
    }
}

/// Decodes the icon at `source`, brings it to a canonical size and writes it as
/// an ICNS file at `output`.
///
/// Icons that are already square at a canonical size are embedded without
/// resampling; everything else is resized to
/// [`CanonicalIconSize::DEFAULT_TARGET`]. Returns the size that was encoded.
pub fn normalize_icon<C>(codec: &C, source: &Path, output: &Path) -> Result<CanonicalIconSize>
where
    C: ImageCodec + ?Sized,
{
    let bytes = fs::read(source).map_err(image::ImageError::IoError)?;
    let mut icon = codec.decode(&bytes)?;
    log::debug!(
        "Decoded icon {} ({}x{}, {:?})",
        source.display(),
        icon.width(),
        icon.height(),
        icon.color()
    );

    let size = match icon.canonical_size() {
        Some(size) => size,
        None => {
            let target = CanonicalIconSize::DEFAULT_TARGET;
            log::info!(
                "Resizing icon from {}x{} to {}",
                icon.width(),
                icon.height(),
                target
            );
            icon = codec.resize(icon, target.pixels(), target.pixels());
            target
        }
    };

    let data = codec.encode_icon_container(icon)?;
    fs::write(output, data)
        .map_err(|e| Error::encode(format!("writing ICNS file {}", output.display()), e))?;

    log::info!("Created ICNS file: {} ({})", output.display(), size);
    Ok(size)
}
