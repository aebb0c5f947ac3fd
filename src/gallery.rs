//! Gallery lookups: placeholder resolution, courtesy lines, leftovers.
//!
//! Authors reference gallery images by **1-based** position: `[[img:1]]` is
//! the first image. Storage is a plain 0-based slice, so the conversion lives
//! here and nowhere else.
//!
//! ## Courtesy
//!
//! CMS captions double as attribution. Editors are inconsistent about the
//! prefix, so `"Courtesy: Jane Doe"`, `"courtesy:Jane Doe"` and `"Jane Doe"`
//! all produce the courtesy text `"Jane Doe"`. The renderer adds its own label,
//! which is why the prefix is stripped once here.
//!
//! ## Leftovers
//!
//! Images that no placeholder resolved to are still shown, after the body, in
//! gallery order. [`leftover_images`] computes that list from the used set.

use crate::types::GalleryImage;
use std::collections::BTreeSet;

const COURTESY_PREFIX: &str = "courtesy:";

/// Look up a 1-based gallery position. Zero and out-of-range positions yield `None`.
pub fn image_at(gallery: &[GalleryImage], index: usize) -> Option<&GalleryImage> {
    index.checked_sub(1).and_then(|i| gallery.get(i))
}

/// Attribution text for an image caption.
///
/// Trims the caption and removes one case-insensitive leading `Courtesy:`
/// together with the whitespace after it. Never fails; an empty caption gives
/// an empty string.
pub fn courtesy_text(caption: &str) -> String {
    let caption = caption.trim();
    match caption.get(..COURTESY_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(COURTESY_PREFIX) => {
            caption[COURTESY_PREFIX.len()..].trim_start().to_string()
        }
        _ => caption.to_string(),
    }
}

/// A gallery image that no placeholder referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leftover<'a> {
    /// 1-based gallery position.
    pub position: usize,
    pub image: &'a GalleryImage,
}

/// Gallery images whose 1-based position is not in `used`, in gallery order.
pub fn leftover_images<'a>(
    gallery: &'a [GalleryImage],
    used: &BTreeSet<usize>,
) -> Vec<Leftover<'a>> {
    gallery
        .iter()
        .enumerate()
        .map(|(i, image)| Leftover {
            position: i + 1,
            image,
        })
        .filter(|leftover| !used.contains(&leftover.position))
        .collect()
}
