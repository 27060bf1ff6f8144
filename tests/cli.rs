use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sketchpad_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sketchpad").expect("binary exists");
    // Keep the user's real config out of the picture
    cmd.args(["--config"])
        .arg(temp.path().join("missing-config.toml"));
    cmd
}

#[test]
fn sketchpad_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    sketchpad_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand drawing surface with PNG export and image recognition",
        ));
}

#[test]
fn no_subcommand_lists_script_events() {
    let temp = TempDir::new().unwrap();
    sketchpad_cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("pointer_down"));
}

#[test]
fn replay_save_writes_drawing_png() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("events.jsonl");
    std::fs::write(
        &script,
        r##"{"type": "color", "value": "#ff0000"}
{"type": "width", "value": 8}
{"type": "pointer_down", "x": 10, "y": 10}
{"type": "pointer_move", "x": 200, "y": 150}
{"type": "pointer_up"}
{"type": "save"}
"##,
    )
    .unwrap();
    let out_dir = temp.path().join("out");

    sketchpad_cmd(&temp)
        .arg("replay")
        .arg(&script)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let png = std::fs::read(out_dir.join("drawing.png")).unwrap();
    assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    // IHDR width/height of the default 800x600 canvas
    assert_eq!(u32::from_be_bytes(png[16..20].try_into().unwrap()), 800);
    assert_eq!(u32::from_be_bytes(png[20..24].try_into().unwrap()), 600);
}

#[test]
fn replay_reads_script_from_stdin() {
    let temp = TempDir::new().unwrap();
    sketchpad_cmd(&temp)
        .args(["replay", "-", "--out-dir"])
        .arg(temp.path())
        .write_stdin("{\"type\": \"text\", \"value\": \"hello\"}\n{\"type\": \"save\"}\n")
        .assert()
        .success();

    assert!(temp.path().join("drawing.png").exists());
}

#[test]
fn replay_rejects_unknown_event() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("bad.jsonl");
    std::fs::write(&script, "{\"type\": \"teleport\"}\n").unwrap();

    sketchpad_cmd(&temp)
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid event script"));
}

#[test]
fn render_text_writes_png() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("text.png");

    sketchpad_cmd(&temp)
        .args(["render-text", "Hello", "--width", "12", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let png = std::fs::read(&out).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn render_text_rejects_bad_color() {
    let temp = TempDir::new().unwrap();
    sketchpad_cmd(&temp)
        .args(["render-text", "Hi", "--color", "not-a-color", "--out"])
        .arg(temp.path().join("x.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized color"));
}
