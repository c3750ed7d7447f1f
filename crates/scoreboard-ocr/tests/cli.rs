#![cfg(feature = "cli")]

mod common;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;
use scoreboard_ocr::convert::save_image;
use scoreboard_ocr::core::{RgbaImage, BLACK};
use scoreboard_ocr::ScanReport;
use std::path::{Path, PathBuf};

fn bin() -> Command {
    Command::cargo_bin("scoreboard-ocr").expect("binary")
}

fn write_catalogs(dir: &Path) -> (PathBuf, PathBuf) {
    let glyphs = dir.join("glyphs.json");
    let flags = dir.join("flags.json");
    std::fs::write(
        &glyphs,
        serde_json::to_string(&glyph_catalog_file()).expect("glyph json"),
    )
    .expect("write glyphs");
    std::fs::write(
        &flags,
        serde_json::to_string(&flag_catalog_file()).expect("flag json"),
    )
    .expect("write flags");
    (glyphs, flags)
}

fn write_png(dir: &Path, name: &str, img: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    save_image(img, &path).expect("png");
    path
}

#[test]
fn line_prints_text_and_confidence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (glyphs, _) = write_catalogs(dir.path());
    let mut region = RgbaImage::filled(20, 5, BLACK);
    draw_text(&mut region, 0, 0, &[&GLYPH_A, &GLYPH_T], &[2, 2]);
    let image = write_png(dir.path(), "line.png", &region);
    let overlay = dir.path().join("overlay.png");

    bin()
        .arg("line")
        .arg(&image)
        .arg("--catalog")
        .arg(&glyphs)
        .arg("--overlay")
        .arg(&overlay)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""text":"AT""#))
        .stdout(predicate::str::contains("confidence"));
    assert!(overlay.exists());
}

#[test]
fn digits_prints_the_score() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = write_png(dir.path(), "score.png", &number_image(4, 1207));
    bin()
        .arg("digits")
        .arg(&image)
        .assert()
        .success()
        .stdout("1207\n");
}

#[test]
fn flag_prints_the_code() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_, flags) = write_catalogs(dir.path());
    let image = write_png(dir.path(), "flag.png", &flag_image(IT));
    bin()
        .arg("flag")
        .arg(&image)
        .arg("--catalog")
        .arg(&flags)
        .assert()
        .success()
        .stdout("it\n");
}

#[test]
fn scan_writes_a_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalogs(dir.path());

    let mut screen = RgbaImage::filled(400, 200, BLACK);
    draw_text(&mut screen, 10, 20, &[&GLYPH_T, &GLYPH_A], &[3, 2]);
    draw_number(&mut screen, 200, 10, 3, 42);
    let image = write_png(dir.path(), "screen.png", &screen);

    let config = dir.path().join("screen.json");
    std::fs::write(
        &config,
        r#"{
            "glyph_catalog": "glyphs.json",
            "flag_catalog": "flags.json",
            "output_path": "report.json",
            "stretch": null,
            "rows": [
                { "name": { "x": 10, "y": 20, "width": 40, "height": 5 },
                  "score": { "x": 200, "y": 10, "width": 54, "height": 30 } }
            ]
        }"#,
    )
    .expect("config");

    bin()
        .arg("scan")
        .arg(&image)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "TA""#));

    let report = ScanReport::load_json(dir.path().join("report.json")).expect("report");
    assert_eq!(report.players.len(), 1);
    assert_eq!(report.players[0].name, "TA");
    assert_eq!(report.players[0].score, 42);
    assert_eq!(report.players[0].flag, "");
}

#[test]
fn missing_catalog_fails_with_a_message() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = write_png(dir.path(), "line.png", &RgbaImage::filled(8, 5, BLACK));
    bin()
        .arg("line")
        .arg(&image)
        .arg("--catalog")
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn encode_glyph_prints_a_catalog_entry() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = write_png(dir.path(), "a.png", &bitmap(&GLYPH_A));
    bin()
        .arg("encode-glyph")
        .arg(&image)
        .arg("--label")
        .arg("A")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""label":"A""#))
        .stdout(predicate::str::contains(r#""runs":[1,3,1,1,3"#));
}
