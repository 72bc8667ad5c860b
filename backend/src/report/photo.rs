//! # Photo embedding
//!
//! Places a student photo (or the institution logo) into the document at a
//! fixed display size. Source images are decoded, scaled down to the display
//! box at [`IMAGE_DPI`], flattened over white and re-encoded as RGB PNG, so
//! every embedded picture has the same predictable format whatever was
//! uploaded.
//!
//! A photo never fails a report. Each failure maps to one of three visible
//! outcomes, see [`PhotoOutcome`].

use crate::photos::{PhotoError, PhotoResolver};
use crate::report::document::{inches_to_emu, Document, InlineImage, Media};
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView};
use log::warn;
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};

pub const IMAGE_DPI: f64 = 150.0;

/// Eligibility proforma photo box: 1 x 1.3 inches.
pub const PROFORMA_PHOTO: DisplaySize = DisplaySize {
    width_in: 1.0,
    height_in: Some(1.3),
};

/// Letterhead logo on certificates: 1.5 inches wide, height from the image.
pub const CERTIFICATE_LOGO: DisplaySize = DisplaySize {
    width_in: 1.5,
    height_in: None,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width_in: f64,
    /// `None` keeps the source aspect ratio.
    pub height_in: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoOutcome {
    Embedded(InlineImage),
    /// The record has no photo reference.
    NoPhoto,
    /// A reference is stored but no storage holds the asset.
    NotFound,
    /// The asset exists but could not be read or decoded.
    EmbedFailed,
}

impl PhotoOutcome {
    /// Text shown in place of the picture, if it was not embedded.
    pub fn fallback_text(&self) -> Option<&'static str> {
        match self {
            PhotoOutcome::Embedded(_) => None,
            PhotoOutcome::NoPhoto => Some("No Photo"),
            PhotoOutcome::NotFound => Some("Photo Not Found"),
            PhotoOutcome::EmbedFailed => Some("Photo Available"),
        }
    }
}

/// Resolves `photo_ref` and adds it to `doc`'s media.
pub fn embed_photo(
    doc: &mut Document,
    resolver: &dyn PhotoResolver,
    photo_ref: Option<&str>,
    size: DisplaySize,
) -> PhotoOutcome {
    let photo_ref = match photo_ref.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => r,
        None => return PhotoOutcome::NoPhoto,
    };

    let bytes = match resolver.resolve(photo_ref) {
        Ok(bytes) => bytes,
        Err(PhotoError::NotFound(_)) => {
            warn!("Photo {} is referenced but missing from storage", photo_ref);
            return PhotoOutcome::NotFound;
        }
        Err(e) => {
            warn!("Photo {} could not be read: {}", photo_ref, e);
            return PhotoOutcome::EmbedFailed;
        }
    };

    match embed_image_bytes(doc, &bytes, size) {
        Ok(image) => PhotoOutcome::Embedded(image),
        Err(e) => {
            warn!("Photo {} could not be embedded: {}", photo_ref, e);
            PhotoOutcome::EmbedFailed
        }
    }
}

/// Normalizes raw image bytes and registers them as document media.
pub fn embed_image_bytes(
    doc: &mut Document,
    bytes: &[u8],
    size: DisplaySize,
) -> Result<InlineImage, PhotoError> {
    let img = load_from_memory(bytes)?;
    let (orig_w, orig_h) = img.dimensions();
    let height_in = size
        .height_in
        .unwrap_or(size.width_in * orig_h as f64 / orig_w as f64);

    let (png_bytes, pixel_size) = encode_png(img, size.width_in, height_in)?;
    let media = doc.add_media(Media {
        bytes: png_bytes,
        extension: "png",
        content_type: "image/png",
        pixel_size,
    });

    Ok(InlineImage {
        media,
        width_emu: inches_to_emu(size.width_in),
        height_emu: inches_to_emu(height_in),
    })
}

/// Scales `img` to fit the display box (never up), flattens alpha over
/// white and encodes an 8-bit RGB PNG.
fn encode_png(
    img: DynamicImage,
    width_in: f64,
    height_in: f64,
) -> Result<(Vec<u8>, (u32, u32)), PhotoError> {
    let (orig_w, orig_h) = img.dimensions();
    let orig_w_f = orig_w as f64;
    let orig_h_f = orig_h as f64;

    let scale_by_w = (width_in * IMAGE_DPI / orig_w_f).min(1.0);
    let scale_by_h = (height_in * IMAGE_DPI / orig_h_f).min(1.0);
    let scale = scale_by_w.min(scale_by_h);

    let resized: DynamicImage = if scale >= 1.0 {
        img
    } else {
        let new_w = (orig_w_f * scale).max(1.0).round() as u32;
        let new_h = (orig_h_f * scale).max(1.0).round() as u32;
        img.resize(new_w, new_h, FilterType::Lanczos3)
    };

    let rgba = resized.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let raw = DynamicImage::ImageRgba8(background).to_rgb8().into_raw();

    let mut out = Vec::new();
    {
        let mut encoder = PngEncoder::new(&mut out, w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raw)?;
    }
    Ok((out, (w, h)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct FixedResolver(Result<Vec<u8>, &'static str>);

    impl PhotoResolver for FixedResolver {
        fn resolve(&self, photo_ref: &str) -> Result<Vec<u8>, PhotoError> {
            match &self.0 {
                Ok(bytes) => Ok(bytes.clone()),
                Err("missing") => Err(PhotoError::NotFound(photo_ref.to_string())),
                Err(_) => Err(PhotoError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "denied",
                ))),
            }
        }
        fn cloud_available(&self) -> bool {
            false
        }
        fn display_url(&self, photo_ref: &str) -> String {
            photo_ref.to_string()
        }
    }

    fn sample_png(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 128]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn missing_reference_is_no_photo() {
        let mut doc = Document::new();
        let resolver = FixedResolver(Ok(sample_png(4, 4)));
        for photo_ref in [None, Some(""), Some("  ")] {
            let outcome = embed_photo(&mut doc, &resolver, photo_ref, PROFORMA_PHOTO);
            assert_eq!(outcome, PhotoOutcome::NoPhoto);
        }
        assert!(doc.media.is_empty());
    }

    #[test]
    fn absent_asset_is_not_found() {
        let mut doc = Document::new();
        let outcome = embed_photo(
            &mut doc,
            &FixedResolver(Err("missing")),
            Some("gone.jpg"),
            PROFORMA_PHOTO,
        );
        assert_eq!(outcome, PhotoOutcome::NotFound);
        assert_ne!(outcome.fallback_text(), PhotoOutcome::NoPhoto.fallback_text());
    }

    #[test]
    fn unreadable_or_corrupt_asset_is_embed_failed() {
        let mut doc = Document::new();
        let unreadable = embed_photo(
            &mut doc,
            &FixedResolver(Err("io")),
            Some("locked.jpg"),
            PROFORMA_PHOTO,
        );
        let corrupt = embed_photo(
            &mut doc,
            &FixedResolver(Ok(b"not an image".to_vec())),
            Some("broken.jpg"),
            PROFORMA_PHOTO,
        );
        assert_eq!(unreadable, PhotoOutcome::EmbedFailed);
        assert_eq!(corrupt, PhotoOutcome::EmbedFailed);
        assert_eq!(corrupt.fallback_text(), Some("Photo Available"));
        assert!(doc.media.is_empty());
    }

    #[test]
    fn large_photo_is_scaled_into_the_box() {
        let mut doc = Document::new();
        let resolver = FixedResolver(Ok(sample_png(600, 600)));
        let outcome = embed_photo(&mut doc, &resolver, Some("big.png"), PROFORMA_PHOTO);

        let image = match outcome {
            PhotoOutcome::Embedded(image) => image,
            other => panic!("expected embedded photo, got {:?}", other),
        };
        assert_eq!(image.width_emu, 914_400);
        assert_eq!(image.height_emu, 1_188_720);
        let media = &doc.media[image.media.0];
        assert_eq!(media.pixel_size, (150, 150));
        assert_eq!(&media.bytes[..4], b"\x89PNG");
    }

    #[test]
    fn logo_keeps_aspect_ratio() {
        let mut doc = Document::new();
        let image = embed_image_bytes(&mut doc, &sample_png(300, 100), CERTIFICATE_LOGO).unwrap();
        assert_eq!(image.width_emu, inches_to_emu(1.5));
        assert_eq!(image.height_emu, inches_to_emu(0.5));
        assert_eq!(doc.media[0].pixel_size, (225, 75));
    }
}
