//! Whole-screen scanning: normalise the screenshot, crop every configured
//! row and read its name, flag and score.

use crate::config::{PlayerRecord, RowLayout, ScreenLayout};
use crate::recognizer::{RecognizeError, Recognizer};
use scoreboard_ocr_core::RgbaImage;

/// Stretch `screen` to the layout's canonical size, if one is set and the
/// screenshot differs from it.
pub fn normalize_screen(screen: &RgbaImage, layout: &ScreenLayout) -> RgbaImage {
    match layout.stretch {
        Some([w, h]) if (screen.width(), screen.height()) != (w, h) => {
            log::debug!(
                "stretching {}x{} screenshot to {}x{}",
                screen.width(),
                screen.height(),
                w,
                h
            );
            screen.stretch_to(w, h)
        }
        _ => screen.clone(),
    }
}

/// Read one row of an already normalised screen. A row without a flag or
/// score region reports `""` / `0` for it.
pub fn scan_row(
    recognizer: &Recognizer,
    screen: &RgbaImage,
    row: &RowLayout,
) -> Result<PlayerRecord, RecognizeError> {
    let name = recognizer.recognize_line(&screen.crop(row.name))?;
    let flag = match row.flag {
        Some(rect) => recognizer.recognize_flag(&screen.crop(rect))?,
        None => String::new(),
    };
    let score = match row.score {
        Some(rect) => recognizer.recognize_digits(&screen.crop(rect))?,
        None => 0,
    };
    Ok(PlayerRecord {
        name: name.text,
        flag,
        score,
        confidence: name.confidence,
    })
}

/// Read every row of `layout` from a raw screenshot, top to bottom.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "info",
        skip_all,
        fields(width = screen.width(), height = screen.height(), rows = layout.rows.len())
    )
)]
pub fn scan_screen(
    recognizer: &Recognizer,
    screen: &RgbaImage,
    layout: &ScreenLayout,
) -> Result<Vec<PlayerRecord>, RecognizeError> {
    let screen = normalize_screen(screen, layout);
    let players = layout
        .rows
        .iter()
        .map(|row| scan_row(recognizer, &screen, row))
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("scanned {} rows", players.len());
    Ok(players)
}
