mod common;

use common::*;
use scoreboard_ocr::core::{PixelRect, RgbaImage, BLACK};
use scoreboard_ocr::{
    normalize_screen, scan_screen, PlayerRecord, Recognizer, RecognizerParams, RowLayout,
    ScreenLayout,
};

fn first_row() -> RowLayout {
    RowLayout {
        name: PixelRect::new(100, 100, 40, 5),
        flag: Some(PixelRect::new(40, 100, FLAG_W, FLAG_H)),
        score: Some(PixelRect::new(300, 90, 72, 30)),
    }
}

/// A 1280x720 results screen with two rows, 100 px apart.
fn screenshot() -> RgbaImage {
    let mut img = RgbaImage::filled(1280, 720, BLACK);

    draw_text(&mut img, 100, 100, &[&GLYPH_T, &GLYPH_A], &[3, 2]);
    let flag = flag_image(FR);
    for y in 0..FLAG_H as i32 {
        for x in 0..FLAG_W as i32 {
            img.put_pixel(40 + x, 100 + y, flag.pixel_or_clear(x, y));
        }
    }
    draw_number(&mut img, 300, 90, 4, 95);

    draw_text(&mut img, 100, 200, &[&GLYPH_A, &GLYPH_T], &[3, 9]);
    draw_number(&mut img, 300, 190, 4, 1207);
    img
}

#[test]
fn scans_every_configured_row() {
    let rec = Recognizer::new(glyph_catalog(), flag_catalog(), RecognizerParams::default());
    let layout = ScreenLayout::evenly_spaced(first_row(), 100, 2);
    let players = scan_screen(&rec, &screenshot(), &layout).expect("scan");

    let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["TA", "A T"]);
    assert_eq!(players[0].flag, "fr");
    assert_eq!(players[1].flag, "");
    assert_eq!(players[0].score, 95);
    assert_eq!(players[1].score, 1207);
    assert!(players.iter().all(|p| p.confidence > 0.0));
}

#[test]
fn rows_without_flag_or_score_regions() {
    let rec = Recognizer::new(glyph_catalog(), flag_catalog(), RecognizerParams::default());
    let layout = ScreenLayout {
        stretch: None,
        rows: vec![RowLayout {
            flag: None,
            score: None,
            ..first_row()
        }],
    };
    let players = scan_screen(&rec, &screenshot(), &layout).expect("scan");
    assert_eq!(
        players,
        [PlayerRecord {
            name: "TA".into(),
            flag: String::new(),
            score: 0,
            confidence: players[0].confidence,
        }]
    );
}

#[test]
fn screenshots_are_stretched_to_the_canonical_size() {
    let layout = ScreenLayout::evenly_spaced(first_row(), 100, 1);
    let small = RgbaImage::filled(640, 360, BLACK);
    let normalized = normalize_screen(&small, &layout);
    assert_eq!((normalized.width(), normalized.height()), (1280, 720));

    let exact = screenshot();
    assert_eq!(normalize_screen(&exact, &layout), exact);
}
