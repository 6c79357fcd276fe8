//! Rendered text width estimation for the default worksheet font
//!
//! Widths come from Calibri advance widths (font units per 2048 em) scaled
//! to 11pt at 96 DPI, so the result does not depend on the host platform.

/// Font units per em for Calibri
const UNITS_PER_EM: f64 = 2048.0;

/// 11pt at 96 DPI
const FONT_SIZE_PX: f64 = 11.0 * 96.0 / 72.0;

/// Advance width for characters missing from the table (digit width)
const DEFAULT_ADVANCE: u16 = 1038;

/// Advance width for wide East Asian characters (full em)
const WIDE_ADVANCE: u16 = 2048;

/// Calibri advance widths for printable ASCII, starting at ' ' (0x20)
const ASCII_ADVANCES: [u16; 95] = [
    463, 544, 821, 1038, 1038, 1464, 1397, 452, 621, 621, 1038, 1038, 511, 627, 517, 795, // ' '..'/'
    1038, 1038, 1038, 1038, 1038, 1038, 1038, 1038, 1038, 1038, // '0'..'9'
    548, 548, 1038, 1038, 1038, 943, 1823, // ':'..'@'
    1185, 1114, 1092, 1260, 1000, 941, 1292, 1276, 516, 653, 1064, 861, 1751, // 'A'..'M'
    1322, 1356, 1058, 1378, 1112, 941, 998, 1314, 1162, 1822, 1063, 998, 959, // 'N'..'Z'
    627, 795, 627, 1038, 1019, 596, // '['..'`'
    981, 1076, 866, 1076, 1019, 625, 964, 1076, 470, 490, 931, 470, 1636, // 'a'..'m'
    1076, 1080, 1076, 1076, 714, 801, 686, 1076, 925, 1464, 887, 927, 809, // 'n'..'z'
    714, 943, 714, 1038, // '{'..'~'
];

fn advance(c: char) -> u16 {
    match c {
        ' '..='~' => ASCII_ADVANCES[c as usize - 0x20],
        '\u{1100}'..='\u{115F}'
        | '\u{2E80}'..='\u{A4CF}'
        | '\u{AC00}'..='\u{D7A3}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FF00}'..='\u{FF60}' => WIDE_ADVANCE,
        c if c.is_control() => 0,
        _ => DEFAULT_ADVANCE,
    }
}

/// Width of `text` in pixels when rendered in the default font
pub fn text_width_px(text: &str) -> f64 {
    let units: u32 = text.chars().map(|c| advance(c) as u32).sum();
    units as f64 / UNITS_PER_EM * FONT_SIZE_PX
}
