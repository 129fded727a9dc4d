// Reference design and output tables for app icons

/// Side length of the reference design all coordinates are given in
pub const REFERENCE_SIZE: u32 = 1024;

/// App Store marketing icon size
pub const APP_STORE_SIZE: u32 = 1024;

// Detail thresholds: smaller icons skip the element
pub const RING_MIN_SIZE: u32 = 40;
pub const SOUND_LINES_MIN_SIZE: u32 = 60;
pub const BORDER_MIN_SIZE: u32 = 60;
pub const SOUND_HOLES_MIN_SIZE: u32 = 64;

// Label drawn by the App Store whistle design
pub const LABEL_Y: f32 = 600.0;
pub const LABEL_FONT_PX: f32 = 60.0;
pub const LABEL_OUTLINE_RADIUS: i32 = 2;

// Tried in order when the configured label font cannot be loaded
pub const FALLBACK_FONTS: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

// Logo-based App Store icons
pub const LOGO_FIT_SIZE: u32 = 800;
pub const LOGO_SOLID_SIZE: u32 = 900;
pub const PLACEHOLDER_SIZE: u32 = 512;
pub const BADGE_CIRCLE_SIZE: u32 = 800;
pub const BADGE_LOGO_SIZE: u32 = 600;
pub const BADGE_MASK_SIZE: u32 = 300;
pub const BADGE_BORDER_SIZE: u32 = 820;
pub const BADGE_BORDER_WIDTH: f32 = 8.0;

pub const WHITE: [u8; 3] = [255, 255, 255];

/// One image of the iOS AppIcon set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IosIcon {
    pub pixels: u32,
    pub filename: &'static str,
    pub idiom: &'static str,
    /// Point size as written in Contents.json ("20x20", "83.5x83.5")
    pub points: &'static str,
    pub scale: &'static str,
}

const fn ios(
    pixels: u32,
    filename: &'static str,
    idiom: &'static str,
    points: &'static str,
    scale: &'static str,
) -> IosIcon {
    IosIcon {
        pixels,
        filename,
        idiom,
        points,
        scale,
    }
}

pub const IOS_ICONS: [IosIcon; 15] = [
    ios(20, "Icon-20.png", "ipad", "20x20", "1x"),
    ios(40, "Icon-20@2x.png", "iphone", "20x20", "2x"),
    ios(60, "Icon-20@3x.png", "iphone", "20x20", "3x"),
    ios(29, "Icon-29.png", "ipad", "29x29", "1x"),
    ios(58, "Icon-29@2x.png", "iphone", "29x29", "2x"),
    ios(87, "Icon-29@3x.png", "iphone", "29x29", "3x"),
    ios(40, "Icon-40.png", "ipad", "40x40", "1x"),
    ios(80, "Icon-40@2x.png", "iphone", "40x40", "2x"),
    ios(120, "Icon-40@3x.png", "iphone", "40x40", "3x"),
    ios(120, "Icon-60@2x.png", "iphone", "60x60", "2x"),
    ios(180, "Icon-60@3x.png", "iphone", "60x60", "3x"),
    ios(76, "Icon-76.png", "ipad", "76x76", "1x"),
    ios(152, "Icon-76@2x.png", "ipad", "76x76", "2x"),
    ios(167, "Icon-83.5@2x.png", "ipad", "83.5x83.5", "2x"),
    ios(1024, "Icon-1024.png", "ios-marketing", "1024x1024", "1x"),
];

pub const APP_STORE_FILENAME: &str = "Icon-1024.png";

/// Android launcher densities and their icon sizes
pub const ANDROID_DENSITIES: [(&str, u32); 5] = [
    ("mdpi", 48),
    ("hdpi", 72),
    ("xhdpi", 96),
    ("xxhdpi", 144),
    ("xxxhdpi", 192),
];

pub const ANDROID_LAUNCHER: &str = "ic_launcher.png";
pub const ANDROID_LAUNCHER_ROUND: &str = "ic_launcher_round.png";
pub const ANDROID_LAUNCHER_FOREGROUND: &str = "ic_launcher_foreground.png";

/// Transparent padding of the adaptive foreground, as a divisor of the size
pub const FOREGROUND_PADDING_DIVISOR: u32 = 4;
