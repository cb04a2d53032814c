use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use tm_core::{CellKind, GeneratorConfig, NullSink, SnapshotRecorder, TowerGenerator, TowerRng};
use tm_tui::png::{PngFrameSink, render_grid, save_png};
use tm_tui::widgets::{CellStyle, MazeWidget};
use tm_tui::{ReplayApp, Theme};

fn small_config() -> GeneratorConfig {
    GeneratorConfig {
        grid_size: 21,
        pillar_spacing: 8,
        seed: Some(42),
        ..GeneratorConfig::default()
    }
}

#[test]
fn test_widget_shows_generated_pin() {
    let result = TowerGenerator::new(small_config()).generate_default();
    let theme = Theme::dark();
    let area = Rect::new(0, 0, 23, 23);
    let mut buf = Buffer::empty(area);
    MazeWidget::new(&result.grid, &theme)
        .cell_style(CellStyle::Glyph)
        .render(area, &mut buf);

    // grid (10, 10) sits inside the border at (11, 11)
    assert_eq!(buf[(11, 11)].symbol(), "@");
    assert_eq!(buf[(11, 11)].fg, theme.cell_color(CellKind::Pin));
}

#[test]
fn test_png_matches_grid() {
    let result = TowerGenerator::new(small_config()).generate_default();
    let img = render_grid(&result.grid, 3);
    assert_eq!(img.dimensions(), (63, 63));
    for (x, y, kind) in result.grid.iter() {
        let [r, g, b] = kind.rgb();
        let px = img.get_pixel(x as u32 * 3 + 1, y as u32 * 3 + 1);
        assert_eq!(px.0, [r, g, b, 255], "cell ({x}, {y})");
    }
}

#[test]
fn test_save_png_round_trip() {
    let result = TowerGenerator::new(small_config()).generate_default();
    let path = std::env::temp_dir().join(format!("tower-maze-{}.png", std::process::id()));
    save_png(&result.grid, 2, &path).unwrap();
    let loaded = image::open(&path).unwrap().to_rgba8();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, render_grid(&result.grid, 2));
}

#[test]
fn test_frame_sink_writes_every_snapshot() {
    let dir = std::env::temp_dir().join(format!("tower-maze-frames-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let generator = TowerGenerator::new(small_config());
    let mut recorder = SnapshotRecorder::new();
    generator.generate(&mut TowerRng::new(42), &mut recorder);

    let mut sink = PngFrameSink::new(&dir);
    generator.generate(&mut TowerRng::new(42), &mut sink);
    let written = sink.finish().unwrap();
    assert_eq!(written, recorder.frames().len());
    assert!(dir.join("frame_00000.png").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_replay_renders_last_frame() {
    let mut recorder = SnapshotRecorder::new();
    let result = TowerGenerator::new(small_config()).generate(&mut TowerRng::new(42), &mut recorder);

    let mut app = ReplayApp::new(recorder.into_frames(), 42, Theme::dark());
    while app.tick() {}
    assert_eq!(app.current().map(|f| &f.grid), Some(&result.grid));

    let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let status: String = (0..40).map(|x| buffer[(x, 18)].symbol()).collect();
    assert!(status.starts_with("complete"), "status line was {status:?}");
}

#[test]
fn test_null_sink_generation_is_unaffected_by_recording() {
    let generator = TowerGenerator::new(small_config());
    let quiet = generator.generate(&mut TowerRng::new(7), &mut NullSink);
    let mut recorder = SnapshotRecorder::new();
    let watched = generator.generate(&mut TowerRng::new(7), &mut recorder);
    assert_eq!(quiet.grid, watched.grid);
}
