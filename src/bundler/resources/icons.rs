//! Icon sizes, decoded icon buffers and the codec seam.
//!
//! The ICNS container only stores a handful of square resolutions. An icon
//! whose dimensions already match one of them is embedded as-is; anything else
//! is resampled to [`CanonicalIconSize::DEFAULT_TARGET`] first.
//!
//! | Size | ICNS type |
//! |------|-----------|
//! | 16 | `ic04` |
//! | 32 | `ic05` |
//! | 48 | `ih32` + `h8mk` |
//! | 128 | `ic07` |
//! | 256 | `ic08` |
//! | 512 | `ic09` |
//! | 1024 | `ic10` |
//!
//! Decoding, resampling and container encoding all go through [`ImageCodec`]
//! so the imaging backend can be swapped without touching the bundling logic.

use crate::bundler::error::Result;
use image::{ColorType, DynamicImage};
use std::fmt;

/// Square pixel sizes accepted by the icon container without resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalIconSize {
    /// 16×16
    Size16,
    /// 32×32
    Size32,
    /// 48×48
    Size48,
    /// 128×128
    Size128,
    /// 256×256
    Size256,
    /// 512×512
    Size512,
    /// 1024×1024
    Size1024,
}

impl CanonicalIconSize {
    /// All canonical sizes, smallest first.
    pub const ALL: [CanonicalIconSize; 7] = [
        CanonicalIconSize::Size16,
        CanonicalIconSize::Size32,
        CanonicalIconSize::Size48,
        CanonicalIconSize::Size128,
        CanonicalIconSize::Size256,
        CanonicalIconSize::Size512,
        CanonicalIconSize::Size1024,
    ];

    /// Size that non-canonical icons are resampled to.
    pub const DEFAULT_TARGET: CanonicalIconSize = CanonicalIconSize::Size256;

    /// Edge length in pixels.
    pub const fn pixels(self) -> u32 {
        match self {
            CanonicalIconSize::Size16 => 16,
            CanonicalIconSize::Size32 => 32,
            CanonicalIconSize::Size48 => 48,
            CanonicalIconSize::Size128 => 128,
            CanonicalIconSize::Size256 => 256,
            CanonicalIconSize::Size512 => 512,
            CanonicalIconSize::Size1024 => 1024,
        }
    }

    /// Returns the canonical size for `width`×`height`, or `None` when the image
    /// is not square or its edge is not one of the canonical sizes.
    pub fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        if width != height {
            return None;
        }
        Self::ALL.into_iter().find(|size| size.pixels() == width)
    }
}

impl fmt::Display for CanonicalIconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.pixels())
    }
}

/// A decoded icon held in memory between decode and encode.
///
/// Never written back to the source file.
#[derive(Debug, Clone)]
pub struct IconArtifact {
    image: DynamicImage,
}

impl IconArtifact {
    /// Wraps a decoded image.
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel layout of the decoded buffer.
    pub fn color(&self) -> ColorType {
        self.image.color()
    }

    /// Canonical size of this buffer, if it already has one.
    pub fn canonical_size(&self) -> Option<CanonicalIconSize> {
        CanonicalIconSize::from_dimensions(self.width(), self.height())
    }

    /// Consumes the artifact, returning the underlying image.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

/// Imaging backend used by the icon normalizer.
pub trait ImageCodec {
    /// Decodes an encoded raster image (PNG, JPEG, ...) into a pixel buffer.
    ///
    /// Fails with [`Error::ImageDecode`](crate::bundler::Error::ImageDecode).
    fn decode(&self, bytes: &[u8]) -> Result<IconArtifact>;

    /// Resamples `icon` to exactly `width`×`height` with a high-quality filter,
    /// keeping the alpha channel.
    fn resize(&self, icon: IconArtifact, width: u32, height: u32) -> IconArtifact;

    /// Encodes `icon` as a complete icon container file.
    ///
    /// Fails with [`Error::ImageEncode`](crate::bundler::Error::ImageEncode)
    /// when the buffer's dimensions have no container representation.
    fn encode_icon_container(&self, icon: IconArtifact) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_canonical_sizes_accepted() {
        for px in [16, 32, 48, 128, 256, 512, 1024] {
            let size = CanonicalIconSize::from_dimensions(px, px).unwrap();
            assert_eq!(size.pixels(), px);
        }
    }

    #[test]
    fn test_non_canonical_sizes_rejected() {
        assert_eq!(CanonicalIconSize::from_dimensions(64, 64), None);
        assert_eq!(CanonicalIconSize::from_dimensions(64, 40), None);
        assert_eq!(CanonicalIconSize::from_dimensions(256, 128), None);
        assert_eq!(CanonicalIconSize::from_dimensions(0, 0), None);
        assert_eq!(CanonicalIconSize::from_dimensions(2048, 2048), None);
    }

    #[test]
    fn test_default_target_is_256() {
        assert_eq!(CanonicalIconSize::DEFAULT_TARGET.pixels(), 256);
        assert_eq!(CanonicalIconSize::DEFAULT_TARGET.to_string(), "256x256");
    }

    #[test]
    fn test_artifact_reports_dimensions() {
        let icon = IconArtifact::new(DynamicImage::ImageRgba8(RgbaImage::new(48, 48)));
        assert_eq!((icon.width(), icon.height()), (48, 48));
        assert_eq!(icon.color(), ColorType::Rgba8);
        assert_eq!(icon.canonical_size(), Some(CanonicalIconSize::Size48));
    }
}
