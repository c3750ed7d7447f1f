//! Synthetic fixtures shared by the integration tests: a tiny pixel font,
//! two flags and seven-segment digits drawn to match `DigitLayout::default()`.

#![allow(dead_code)]

use scoreboard_ocr::core::{RgbaImage, BLACK, WHITE};
use scoreboard_ocr::digits::DIGIT_PATTERNS;
use scoreboard_ocr::flags::{FlagCatalogFile, FlagEntry, RgbBitmap};
use scoreboard_ocr::text::{GlyphCatalogFile, GlyphEntry, RunLengthBitmap};
use scoreboard_ocr::{FlagCatalog, GlyphCatalog};

pub const GLYPH_A: [&str; 5] = [
    ".###.", //
    "#...#", //
    "#...#", //
    "#####", //
    "#...#",
];

pub const GLYPH_T: [&str; 5] = [
    "#####", //
    "..#..", //
    "..#..", //
    "..#..", //
    "..#..",
];

pub const FR: [[u8; 3]; 3] = [[0, 35, 149], [255, 255, 255], [237, 41, 57]];
pub const IT: [[u8; 3]; 3] = [[0, 140, 69], [244, 249, 255], [205, 33, 42]];
pub const FLAG_W: usize = 6;
pub const FLAG_H: usize = 4;

pub fn bitmap(rows: &[&str]) -> RgbaImage {
    let mut img = RgbaImage::filled(rows[0].len(), rows.len(), BLACK);
    draw_rows(&mut img, 0, 0, rows);
    img
}

/// Draw `#` cells of `rows` in white with the top-left corner at `(x, y)`.
pub fn draw_rows(img: &mut RgbaImage, x: i32, y: i32, rows: &[&str]) {
    for (dy, row) in rows.iter().enumerate() {
        for (dx, c) in row.chars().enumerate() {
            if c == '#' {
                img.put_pixel(x + dx as i32, y + dy as i32, WHITE);
            }
        }
    }
}

/// Draw glyphs left to right; `gaps[i]` blank columns precede glyph `i`.
/// Returns the column after the last glyph.
pub fn draw_text(img: &mut RgbaImage, x: i32, y: i32, glyphs: &[&[&str]], gaps: &[i32]) -> i32 {
    let mut pen = x;
    for (rows, gap) in glyphs.iter().zip(gaps) {
        pen += gap;
        draw_rows(img, pen, y, rows);
        pen += rows[0].len() as i32;
    }
    pen
}

pub fn glyph_catalog_file() -> GlyphCatalogFile {
    let entry = |label: &str, rows: &[&str]| GlyphEntry {
        label: label.to_owned(),
        bitmap: RunLengthBitmap::from_image(&bitmap(rows)),
        excluded: false,
    };
    GlyphCatalogFile {
        glyphs: vec![entry("A", &GLYPH_A), entry("T", &GLYPH_T)],
    }
}

pub fn glyph_catalog() -> GlyphCatalog {
    GlyphCatalog::from_entries(&glyph_catalog_file().glyphs).expect("glyph catalog")
}

pub fn flag_image(bands: [[u8; 3]; 3]) -> RgbaImage {
    let mut img = RgbaImage::filled(FLAG_W, FLAG_H, BLACK);
    for y in 0..FLAG_H as i32 {
        for x in 0..FLAG_W as i32 {
            let [r, g, b] = bands[x as usize / 2];
            img.put_pixel(x, y, [r, g, b, 255]);
        }
    }
    img
}

pub fn flag_catalog_file() -> FlagCatalogFile {
    let entry = |code: &str, bands| FlagEntry {
        code: code.to_owned(),
        bitmap: RgbBitmap::from_image(&flag_image(bands)),
    };
    FlagCatalogFile {
        flags: vec![entry("fr", FR), entry("it", IT)],
    }
}

pub fn flag_catalog() -> FlagCatalog {
    FlagCatalog::from_entries(&flag_catalog_file().flags).expect("flag catalog")
}

fn fill(img: &mut RgbaImage, x0: i32, x1: i32, y0: i32, y1: i32) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            img.put_pixel(x, y, WHITE);
        }
    }
}

/// Seven-segment `digit` in the 18-column slot whose top-left is `(x, y)`.
pub fn draw_digit(img: &mut RgbaImage, x: i32, y: i32, digit: u8) {
    let strokes: [(i32, i32, i32, i32); 8] = [
        (1, 16, 6, 8),
        (1, 3, 6, 17),
        (14, 16, 6, 17),
        (1, 16, 16, 18),
        (1, 3, 16, 27),
        (14, 16, 16, 27),
        (1, 16, 25, 27),
        (9, 11, 6, 27),
    ];
    for (lit, (x0, x1, y0, y1)) in DIGIT_PATTERNS[digit as usize].iter().zip(strokes) {
        if *lit {
            fill(img, x + x0, x + x1, y + y0, y + y1);
        }
    }
}

/// Right-aligned number in `slots` 18-column slots, 30 rows tall.
pub fn draw_number(img: &mut RgbaImage, x: i32, y: i32, slots: usize, value: u64) {
    let digits: Vec<u8> = value.to_string().bytes().map(|b| b - b'0').collect();
    let first = slots - digits.len();
    for (i, d) in digits.into_iter().enumerate() {
        draw_digit(img, x + 18 * (first + i) as i32, y, d);
    }
}

pub fn number_image(slots: usize, value: u64) -> RgbaImage {
    let mut img = RgbaImage::filled(18 * slots, 30, BLACK);
    draw_number(&mut img, 0, 0, slots, value);
    img
}
