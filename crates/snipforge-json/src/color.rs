//! Color-format detection and normalization.
//!
//! Recognizes `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` hex forms and
//! `rgb(r,g,b)` / `rgba(r,g,b,a)` functional forms. Channels are matched by
//! digit shape only, not range-checked; alpha is a decimal in `[0,1]`.

use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color regex")
});

static RGBA_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(rgba?)\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(0?\.\d+|1(?:\.0+)?|[01])\s*)?\)$")
        .expect("rgba color regex")
});

/// Match the functional forms, requiring the channel count to agree with
/// the `rgb`/`rgba` prefix: `rgb(r,g,b,a)` and `rgba(r,g,b)` are rejected.
fn rgba_captures(s: &str) -> Option<regex::Captures<'_>> {
    let caps = RGBA_COLOR_RE.captures(s)?;
    let wants_alpha = caps.get(1).map_or(false, |m| m.as_str() == "rgba");
    if wants_alpha != caps.get(5).is_some() {
        return None;
    }
    Some(caps)
}

/// Check if a string is a hex color (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`).
pub fn is_hex_color(s: &str) -> bool {
    HEX_COLOR_RE.is_match(s)
}

/// Check if a string is an `rgb(r,g,b)` / `rgba(r,g,b,a)` color.
pub fn is_rgba_color(s: &str) -> bool {
    rgba_captures(s).is_some()
}

/// Check if a recognized color carries an alpha channel.
///
/// True for 4- and 8-digit hex forms, and for `rgba(...)` with a fourth
/// channel present.
pub fn has_alpha(s: &str) -> bool {
    if is_hex_color(s) {
        return s.len() == 5 || s.len() == 9;
    }
    if let Some(caps) = rgba_captures(s) {
        return caps.get(5).is_some();
    }
    false
}

/// Normalize a recognized color to hex form.
///
/// `rgb(...)` becomes 6-digit hex, `rgba(...)` becomes 8-digit hex with the
/// alpha scaled from `[0,1]` to `00`–`ff`. Hex input passes through
/// unchanged, as does anything unrecognized.
///
/// # Example
///
/// ```
/// use snipforge_json::to_hex;
///
/// assert_eq!(to_hex("rgb(255, 0, 0)"), "#ff0000");
/// assert_eq!(to_hex("rgba(255,0,0,0.5)"), "#ff000080");
/// assert_eq!(to_hex("#AABBCC"), "#AABBCC");
/// assert_eq!(to_hex("not-a-color"), "not-a-color");
/// ```
pub fn to_hex(color: &str) -> String {
    if is_hex_color(color) {
        return color.to_string();
    }
    if let Some(caps) = rgba_captures(color) {
        let channel = |i: usize| -> u32 {
            caps.get(i)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };
        let (r, g, b) = (channel(2), channel(3), channel(4));
        if let Some(alpha) = caps.get(5) {
            let a: f64 = alpha.as_str().parse().unwrap_or(0.0);
            let a = (a * 255.0).round() as u32;
            return format!("#{r:02x}{g:02x}{b:02x}{a:02x}");
        }
        return format!("#{r:02x}{g:02x}{b:02x}");
    }
    color.to_string()
}
