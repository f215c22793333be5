// src/placeholder.rs
//! Deterministic inline placeholder images.
//!
//! Everything here renders without a network fetch: a labeled SVG rectangle
//! is base64-encoded into a `data:` URI that browsers display directly. Same
//! inputs always produce the same output, so mock payloads stay stable.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::Lazy;

/// Shared avatar used wherever a poster has no profile image.
static AVATAR_PLACEHOLDER: Lazy<String> =
    Lazy::new(|| placeholder_image("avatar", 50, 50, "#64748b", "#f1f5f9"));

pub fn avatar_placeholder() -> &'static str {
    &AVATAR_PLACEHOLDER
}

/// Standard 400x200 stand-in for a post whose media could not be resolved.
pub fn post_image_placeholder() -> String {
    placeholder_image("No image available", 400, 200, "#1d9bf0", "#ffffff")
}

/// Standard 400x200 stand-in for an article without a usable image URL.
pub fn article_image_placeholder() -> String {
    placeholder_image("No image available", 400, 200, "#475569", "#f8fafc")
}

/// Render a labeled rectangle as a self-contained `data:image/svg+xml` URI.
pub fn placeholder_image(
    label: &str,
    width: u32,
    height: u32,
    background: &str,
    text_color: &str,
) -> String {
    // Keep the font readable across the avatar (50px) and banner (200px) sizes.
    let font_size = (height / 8).max(12);
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><rect width="100%" height="100%" fill="{background}"/><text x="50%" y="50%" fill="{text_color}" font-family="sans-serif" font-size="{font_size}" dominant-baseline="middle" text-anchor="middle">{label}</text></svg>"##,
        label = escape_xml(label),
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// Escape the five XML special characters so labels cannot break the markup.
fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
