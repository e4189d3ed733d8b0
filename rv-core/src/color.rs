//! Sequential colour scales used to shade marks by metric value.
//!
//! Each scheme is a nine-step ramp; values inside the scale domain are mapped
//! onto the ramp with piecewise-linear RGB interpolation.

use serde::{Deserialize, Serialize};

/// Colour ramp of a sequential scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Blues,
    Greens,
    Oranges,
    Purples,
}

const BLUES: [u32; 9] = [
    0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
];
const GREENS: [u32; 9] = [
    0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
];
const ORANGES: [u32; 9] = [
    0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603, 0x7f2704,
];
const PURPLES: [u32; 9] = [
    0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f, 0x3f007d,
];

impl ColorScheme {
    fn ramp(self) -> &'static [u32; 9] {
        match self {
            ColorScheme::Blues => &BLUES,
            ColorScheme::Greens => &GREENS,
            ColorScheme::Oranges => &ORANGES,
            ColorScheme::Purples => &PURPLES,
        }
    }

    /// Colour at position `t` in `[0, 1]` along the ramp.
    pub fn interpolate(self, t: f64) -> String {
        let ramp = self.ramp();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let segments = (ramp.len() - 1) as f64;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(ramp.len() - 2);
        let frac = pos - i as f64;
        let (r0, g0, b0) = split(ramp[i]);
        let (r1, g1, b1) = split(ramp[i + 1]);
        format!(
            "#{:02x}{:02x}{:02x}",
            lerp(r0, r1, frac),
            lerp(g0, g1, frac),
            lerp(b0, b1, frac)
        )
    }
}

fn split(rgb: u32) -> (u8, u8, u8) {
    ((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Sequential scale from a numeric domain onto a colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorScale {
    pub scheme: ColorScheme,
    pub domain: (f64, f64),
}

impl ColorScale {
    /// Metric scores are percentages, so scales default to `[0, 100]`.
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            domain: (0.0, 100.0),
        }
    }

    /// Map a value to a `#rrggbb` colour. Values outside the domain clamp.
    pub fn color(&self, value: f64) -> String {
        let (lo, hi) = self.domain;
        let span = hi - lo;
        let t = if span.abs() < f64::EPSILON {
            0.0
        } else {
            (value - lo) / span
        };
        self.scheme.interpolate(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_ramp() {
        let scale = ColorScale::new(ColorScheme::Blues);
        assert_eq!(scale.color(0.0), "#f7fbff");
        assert_eq!(scale.color(100.0), "#08306b");
    }

    #[test]
    fn values_clamp_to_domain() {
        let scale = ColorScale::new(ColorScheme::Greens);
        assert_eq!(scale.color(-20.0), scale.color(0.0));
        assert_eq!(scale.color(250.0), scale.color(100.0));
        assert_eq!(scale.color(f64::NAN), scale.color(0.0));
    }

    #[test]
    fn midpoint_hits_middle_stop() {
        // 9 stops -> the fifth stop sits exactly at t = 0.5
        assert_eq!(ColorScheme::Greens.interpolate(0.5), "#74c476");
    }
}
