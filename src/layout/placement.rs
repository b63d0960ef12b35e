//! Default spawn geometry and the content-kind sizing table.

use std::collections::BTreeMap;

use super::{DeviceClass, Point, Size, ViewportSize, sanitize_zoom};
use crate::constants::{CASCADE_MAX_FRACTION, CASCADE_STEP, NAVBAR_HEIGHT};

/// A length that is either fixed or derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    Fixed(f64),
    /// `min(cap, available - margin)`.
    Fit { cap: f64, margin: f64 },
}

impl Extent {
    pub fn resolve(self, available: f64) -> f64 {
        let value = match self {
            Extent::Fixed(v) => v,
            Extent::Fit { cap, margin } => cap.min(available - margin),
        };
        value.max(1.0)
    }
}

/// One value per device class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands<T> {
    pub mobile: T,
    pub small: T,
    pub medium: T,
    pub large: T,
}

impl<T: Copy> Bands<T> {
    pub fn pick(&self, class: DeviceClass) -> T {
        match class {
            DeviceClass::Mobile => self.mobile,
            DeviceClass::SmallDesktop => self.small,
            DeviceClass::MediumDesktop => self.medium,
            DeviceClass::LargeDesktop => self.large,
        }
    }
}

/// How a kind of content chooses its window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingPolicy {
    /// Width and height looked up per device class.
    Bands {
        widths: Bands<Extent>,
        heights: Bands<Extent>,
    },
    /// Width per device class, height from the image aspect ratio plus the
    /// title bar.
    AspectRatio {
        widths: Bands<Extent>,
        aspect: f64,
        chrome: f64,
    },
    /// Width per device class, 16:9 height on desktops.
    Widescreen {
        widths: Bands<Extent>,
        mobile_height: Extent,
    },
}

impl SizingPolicy {
    /// The policy used when the caller supplies no size.
    pub fn viewport_default() -> Self {
        SizingPolicy::Bands {
            widths: Bands {
                mobile: Extent::Fit {
                    cap: 320.0,
                    margin: 20.0,
                },
                small: Extent::Fixed(320.0),
                medium: Extent::Fixed(600.0),
                large: Extent::Fixed(740.0),
            },
            heights: Bands {
                mobile: Extent::Fit {
                    cap: 400.0,
                    margin: 140.0,
                },
                small: Extent::Fixed(260.0),
                medium: Extent::Fixed(480.0),
                large: Extent::Fixed(540.0),
            },
        }
    }

    pub fn resolve(&self, viewport: ViewportSize, class: DeviceClass) -> Size {
        let viewport = viewport.sanitized();
        match *self {
            SizingPolicy::Bands { widths, heights } => Size::new(
                widths.pick(class).resolve(viewport.width),
                heights.pick(class).resolve(viewport.height),
            ),
            SizingPolicy::AspectRatio {
                widths,
                aspect,
                chrome,
            } => {
                let width = widths.pick(class).resolve(viewport.width).round();
                let aspect = if aspect.is_finite() && aspect > 0.0 {
                    aspect
                } else {
                    1.0
                };
                Size::new(width, (width / aspect + chrome).round().max(1.0))
            }
            SizingPolicy::Widescreen {
                widths,
                mobile_height,
            } => {
                let width = widths.pick(class).resolve(viewport.width);
                let height = if class.is_mobile() {
                    mobile_height.resolve(viewport.height)
                } else {
                    (width * 9.0 / 16.0).round()
                };
                Size::new(width, height)
            }
        }
    }
}

/// Default window size for a device class.
pub fn default_size(viewport: ViewportSize, class: DeviceClass) -> Size {
    SizingPolicy::viewport_default().resolve(viewport, class)
}

/// Where a new window spawns.
///
/// The default-sized window is centred in the area above the navbar. On
/// desktop classes each already-registered window pushes the spawn point
/// down and right by a cascade step, capped so repeated opens stagger
/// without wandering off screen. The result is divided by `zoom` and never
/// negative.
pub fn default_position(
    viewport: ViewportSize,
    window_count: usize,
    class: DeviceClass,
    zoom: f64,
) -> Point {
    let viewport = viewport.sanitized();
    let zoom = sanitize_zoom(zoom);
    let size = default_size(viewport, class);
    let available_height = viewport.height - NAVBAR_HEIGHT;
    let center_x = viewport.width / 2.0 - size.width / 2.0;
    let center_y = available_height / 2.0 - size.height / 2.0;

    if class.is_mobile() {
        return Point::new((center_x / zoom).max(0.0), (center_y / zoom).max(0.0));
    }

    let offset = window_count as f64 * CASCADE_STEP;
    let max_offset = (viewport.width.min(available_height) * CASCADE_MAX_FRACTION).max(0.0);
    let limited = offset.min(max_offset);
    Point::new(
        ((center_x + limited) / zoom).max(0.0),
        ((center_y + limited) / zoom).max(0.0),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingEntry {
    pub policy: SizingPolicy,
    pub no_scroll: bool,
}

/// Content-kind tag to sizing policy.
#[derive(Debug, Clone, Default)]
pub struct SizingTable {
    entries: BTreeMap<String, SizingEntry>,
}

pub const KIND_DEFAULT: &str = "default";

impl SizingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sizes the portfolio desktop uses for each of its icons.
    pub fn builtin() -> Self {
        let phone = |cap: f64, margin: f64| Extent::Fit { cap, margin };
        let fixed = Extent::Fixed;
        let mut table = Self::new();
        table.insert(
            "gallery",
            SizingPolicy::Bands {
                widths: Bands {
                    mobile: phone(320.0, 20.0),
                    small: fixed(320.0),
                    medium: fixed(500.0),
                    large: fixed(740.0),
                },
                heights: Bands {
                    mobile: phone(400.0, 140.0),
                    small: fixed(260.0),
                    medium: fixed(400.0),
                    large: fixed(540.0),
                },
            },
            false,
        );
        table.insert(
            "paint",
            SizingPolicy::AspectRatio {
                widths: Bands {
                    mobile: phone(350.0, 20.0),
                    small: fixed(280.0),
                    medium: fixed(500.0),
                    large: fixed(500.0),
                },
                aspect: 1654.0 / 1486.0,
                chrome: 30.0,
            },
            true,
        );
        table.insert(
            "pix",
            SizingPolicy::AspectRatio {
                widths: Bands {
                    mobile: phone(350.0, 20.0),
                    small: fixed(180.0),
                    medium: fixed(280.0),
                    large: fixed(350.0),
                },
                aspect: 3028.0 / 4961.0,
                chrome: 30.0,
            },
            true,
        );
        table.insert(
            "error",
            SizingPolicy::AspectRatio {
                widths: Bands {
                    mobile: phone(350.0, 20.0),
                    small: fixed(200.0),
                    medium: fixed(300.0),
                    large: fixed(300.0),
                },
                aspect: 2970.0 / 3776.0,
                chrome: 30.0,
            },
            true,
        );
        table.insert(
            "contact",
            SizingPolicy::Bands {
                widths: Bands {
                    mobile: phone(320.0, 20.0),
                    small: fixed(260.0),
                    medium: fixed(380.0),
                    large: fixed(400.0),
                },
                heights: Bands {
                    mobile: fixed(200.0),
                    small: fixed(140.0),
                    medium: fixed(190.0),
                    large: fixed(200.0),
                },
            },
            true,
        );
        table.insert(
            "computer",
            SizingPolicy::Widescreen {
                widths: Bands {
                    mobile: phone(360.0, 20.0),
                    small: fixed(380.0),
                    medium: fixed(600.0),
                    large: fixed(800.0),
                },
                mobile_height: phone(500.0, 100.0),
            },
            false,
        );
        table.insert(
            KIND_DEFAULT,
            SizingPolicy::Bands {
                widths: Bands {
                    mobile: phone(280.0, 30.0),
                    small: fixed(320.0),
                    medium: fixed(600.0),
                    large: fixed(740.0),
                },
                heights: Bands {
                    mobile: phone(300.0, 140.0),
                    small: fixed(260.0),
                    medium: fixed(480.0),
                    large: fixed(540.0),
                },
            },
            false,
        );
        table
    }

    pub fn insert(&mut self, kind: impl Into<String>, policy: SizingPolicy, no_scroll: bool) {
        self.entries
            .insert(kind.into(), SizingEntry { policy, no_scroll });
    }

    pub fn get(&self, kind: &str) -> Option<&SizingEntry> {
        self.entries.get(kind)
    }

    /// Look up `kind`, falling back to the `default` entry when present.
    pub fn entry_or_default(&self, kind: &str) -> Option<&SizingEntry> {
        self.get(kind).or_else(|| self.get(KIND_DEFAULT))
    }

    pub fn resolve(&self, kind: &str, viewport: ViewportSize, class: DeviceClass) -> Option<Size> {
        self.entry_or_default(kind)
            .map(|entry| entry.policy.resolve(viewport, class))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Window id derived from a display name: lowercase, whitespace runs become
/// single dashes.
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LARGE: ViewportSize = ViewportSize {
        width: 1600.0,
        height: 900.0,
    };

    #[test]
    fn default_size_per_class() {
        assert_eq!(
            default_size(LARGE, DeviceClass::LargeDesktop),
            Size::new(740.0, 540.0)
        );
        assert_eq!(
            default_size(LARGE, DeviceClass::MediumDesktop),
            Size::new(600.0, 480.0)
        );
        assert_eq!(
            default_size(LARGE, DeviceClass::SmallDesktop),
            Size::new(320.0, 260.0)
        );
        let phone = ViewportSize::new(300.0, 500.0);
        assert_eq!(
            default_size(phone, DeviceClass::Mobile),
            Size::new(280.0, 360.0)
        );
    }

    #[test]
    fn default_size_never_collapses() {
        let tiny = ViewportSize::new(5.0, 5.0);
        let size = default_size(tiny, DeviceClass::Mobile);
        assert_eq!(size, Size::new(1.0, 1.0));
    }

    #[test]
    fn first_desktop_window_is_centred() {
        let p = default_position(LARGE, 0, DeviceClass::LargeDesktop, 1.0);
        assert_eq!(p, Point::new(430.0, 160.0));
    }

    #[test]
    fn desktop_windows_cascade_up_to_cap() {
        let first = default_position(LARGE, 0, DeviceClass::LargeDesktop, 1.0);
        let second = default_position(LARGE, 1, DeviceClass::LargeDesktop, 1.0);
        assert_eq!(second.x - first.x, 30.0);
        assert_eq!(second.y - first.y, 30.0);
        // cap: 0.15 * min(1600, 860) = 129
        let far = default_position(LARGE, 50, DeviceClass::LargeDesktop, 1.0);
        assert!((far.x - first.x - 129.0).abs() < 1e-9);
    }

    #[test]
    fn mobile_windows_do_not_cascade() {
        let phone = ViewportSize::new(400.0, 800.0);
        let a = default_position(phone, 0, DeviceClass::Mobile, 1.0);
        let b = default_position(phone, 5, DeviceClass::Mobile, 1.0);
        assert_eq!(a, b);
        assert_eq!(a, Point::new(40.0, 180.0));
    }

    #[test]
    fn position_is_divided_by_zoom_and_non_negative() {
        let p = default_position(LARGE, 0, DeviceClass::LargeDesktop, 2.0);
        assert_eq!(p, Point::new(215.0, 80.0));
        let cramped = ViewportSize::new(800.0, 300.0);
        let p = default_position(cramped, 0, DeviceClass::LargeDesktop, 1.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn builtin_table_matches_portfolio_sizes() {
        let table = SizingTable::builtin();
        let medium = ViewportSize::new(1200.0, 800.0);
        assert_eq!(
            table.resolve("contact", medium, DeviceClass::MediumDesktop),
            Some(Size::new(380.0, 190.0))
        );
        assert_eq!(
            table.resolve("computer", LARGE, DeviceClass::LargeDesktop),
            Some(Size::new(800.0, 450.0))
        );
        // 500 / (1654 / 1486) + 30 = 479.2 -> 479
        assert_eq!(
            table.resolve("paint", LARGE, DeviceClass::LargeDesktop),
            Some(Size::new(500.0, 479.0))
        );
        assert!(table.get("paint").unwrap().no_scroll);
        assert_eq!(
            table.resolve("unknown-kind", LARGE, DeviceClass::LargeDesktop),
            table.resolve(KIND_DEFAULT, LARGE, DeviceClass::LargeDesktop)
        );
    }

    #[test]
    fn builtin_table_lists_every_kind() {
        let table = SizingTable::builtin();
        assert_eq!(
            table.kinds().collect::<Vec<_>>(),
            ["computer", "contact", "default", "error", "gallery", "paint", "pix"]
        );
    }

    #[test]
    fn empty_table_resolves_nothing() {
        let table = SizingTable::new();
        assert_eq!(table.resolve("gallery", LARGE, DeviceClass::LargeDesktop), None);
        assert_eq!(table.kinds().count(), 0);
    }

    #[test]
    fn slugify_lowercases_and_dashes() {
        assert_eq!(slugify("Album Covers"), "album-covers");
        assert_eq!(slugify("  Pelo   mundo "), "pelo-mundo");
        assert_eq!(slugify("Computer"), "computer");
    }
}
