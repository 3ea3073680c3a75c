use std::f64::consts::TAU;
use std::path::PathBuf;

use anyhow::Context;
use charge_lab::{scene, DrawCmd, InputEvent, Key, Lab, LabConfig, Tint};
use clap::Parser;
use cushy::{
    context::GraphicsContext,
    kludgine::{
        app::winit::{event::MouseButton, keyboard::KeyCode},
        figures::{units::Px, FloatConversion, Point, Px2D, Rect, Size},
        shapes::{Path, PathBuilder, Shape},
        text::Text,
        Color, DrawableExt,
    },
    widgets::Canvas,
    Run, Tick,
};
use log::info;

#[derive(Parser, Debug)]
struct Args {
    /// JSON file with canvas size and timing.
    #[arg(short, long, default_value = "lab.json")]
    config: PathBuf,
}

/// Latches a held key or button so it fires once per press.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct GuardedBool {
    guard: bool,
}
impl GuardedBool {
    fn rising(&mut self, pressed: bool) -> bool {
        let fire = pressed && !self.guard;
        self.guard = pressed;
        fire
    }
}

struct Frontend {
    lab: Lab,
    keyboard: [(Key, GuardedBool, KeyCode); 39],
    click_guard: GuardedBool,
    last_cursor: Option<[f64; 2]>,
}

// Input
//
impl Frontend {
    fn new(lab: Lab) -> Self {
        Self {
            lab,
            keyboard: [
                (Key::Char('a'), Default::default(), KeyCode::KeyA),
                (Key::Char('b'), Default::default(), KeyCode::KeyB),
                (Key::Char('c'), Default::default(), KeyCode::KeyC),
                (Key::Char('d'), Default::default(), KeyCode::KeyD),
                (Key::Char('e'), Default::default(), KeyCode::KeyE),
                (Key::Char('f'), Default::default(), KeyCode::KeyF),
                (Key::Char('g'), Default::default(), KeyCode::KeyG),
                (Key::Char('h'), Default::default(), KeyCode::KeyH),
                (Key::Char('i'), Default::default(), KeyCode::KeyI),
                (Key::Char('j'), Default::default(), KeyCode::KeyJ),
                (Key::Char('k'), Default::default(), KeyCode::KeyK),
                (Key::Char('l'), Default::default(), KeyCode::KeyL),
                (Key::Char('m'), Default::default(), KeyCode::KeyM),
                (Key::Char('n'), Default::default(), KeyCode::KeyN),
                (Key::Char('o'), Default::default(), KeyCode::KeyO),
                (Key::Char('p'), Default::default(), KeyCode::KeyP),
                (Key::Char('q'), Default::default(), KeyCode::KeyQ),
                (Key::Char('r'), Default::default(), KeyCode::KeyR),
                (Key::Char('s'), Default::default(), KeyCode::KeyS),
                (Key::Char('t'), Default::default(), KeyCode::KeyT),
                (Key::Char('u'), Default::default(), KeyCode::KeyU),
                (Key::Char('v'), Default::default(), KeyCode::KeyV),
                (Key::Char('w'), Default::default(), KeyCode::KeyW),
                (Key::Char('x'), Default::default(), KeyCode::KeyX),
                (Key::Char('y'), Default::default(), KeyCode::KeyY),
                (Key::Char('z'), Default::default(), KeyCode::KeyZ),
                (Key::Char('0'), Default::default(), KeyCode::Digit0),
                (Key::Char('1'), Default::default(), KeyCode::Digit1),
                (Key::Char('2'), Default::default(), KeyCode::Digit2),
                (Key::Char('3'), Default::default(), KeyCode::Digit3),
                (Key::Char('4'), Default::default(), KeyCode::Digit4),
                (Key::Char('5'), Default::default(), KeyCode::Digit5),
                (Key::Char('6'), Default::default(), KeyCode::Digit6),
                (Key::Char('7'), Default::default(), KeyCode::Digit7),
                (Key::Char('8'), Default::default(), KeyCode::Digit8),
                (Key::Char('9'), Default::default(), KeyCode::Digit9),
                (Key::Backspace, Default::default(), KeyCode::Backspace),
                (Key::Enter, Default::default(), KeyCode::Enter),
                (Key::Char(' '), Default::default(), KeyCode::Space),
            ],
            click_guard: Default::default(),
            last_cursor: None,
        }
    }
    /// Window pixels per canvas pixel, per axis.
    fn scale(&self, cx: &mut GraphicsContext) -> [f64; 2] {
        let width = cx.gfx.size().width.into_float() as f64;
        let height = cx.gfx.size().height.into_float() as f64;
        [
            width / self.lab.config.canvas_width,
            height / self.lab.config.canvas_height,
        ]
    }
    fn poll_input(&mut self, cx: &mut GraphicsContext) {
        let [sx, sy] = self.scale(cx);
        if let Some(mouse_pos) = cx.cursor_position() {
            let pos = [
                mouse_pos.x.into_float() as f64 / sx,
                mouse_pos.y.into_float() as f64 / sy,
            ];
            if self.last_cursor != Some(pos) {
                self.last_cursor = Some(pos);
                self.lab.handle(InputEvent::PointerMoved(pos));
            }
            if self
                .click_guard
                .rising(cx.mouse_button_pressed(MouseButton::Left))
            {
                self.lab.handle(InputEvent::PointerPressed(pos));
            }
        }
        for (key, guard, code) in &mut self.keyboard {
            if guard.rising(cx.key_pressed(*code)) {
                self.lab.handle(InputEvent::KeyPressed(*key));
            }
        }
    }
}

fn color(tint: Tint) -> Color {
    match tint {
        Tint::Black => Color::BLACK,
        Tint::White => Color::WHITE,
        Tint::Red => Color::RED,
        Tint::Blue => Color::BLUE,
        Tint::Green => Color::GREEN,
        Tint::Yellow => Color::YELLOW,
        Tint::Orange => Color::ORANGE,
        Tint::Brown => Color::BROWN,
        Tint::DarkRed => Color::DARKRED,
    }
}
fn path(pts: Vec<Point<Px>>) -> Path<Px, false> {
    let mut path = PathBuilder::new(pts[0]);
    for p in &pts[1..] {
        path = path.line_to(*p);
    }
    path.build()
}
fn closed(mut pts: Vec<Point<Px>>) -> Path<Px, false> {
    if let Some(first) = pts.first().copied() {
        pts.push(first);
    }
    path(pts)
}

// Drawing routines
//
impl Frontend {
    fn draw(&self, cx: &mut GraphicsContext) {
        let [sx, sy] = self.scale(cx);
        let to_px = move |[x, y]: [f64; 2]| Point::px((x * sx) as f32, (y * sy) as f32);
        let radius_scale = sx.min(sy) as f32;

        for cmd in scene::draw(&self.lab) {
            match cmd {
                DrawCmd::Circle {
                    center,
                    radius,
                    fill,
                } => {
                    cx.gfx.draw_shape(
                        Shape::filled_circle(
                            Px::from_float(radius as f32 * radius_scale),
                            color(fill),
                            cushy::kludgine::Origin::Center,
                        )
                        .translate_by(to_px(center)),
                    );
                }
                DrawCmd::Ring {
                    center,
                    radius,
                    stroke,
                } => {
                    let [x, y] = center;
                    let pts = (0..24)
                        .map(|i| {
                            let ang = i as f64 / 24.0 * TAU;
                            to_px([x + radius * ang.cos(), y + radius * ang.sin()])
                        })
                        .collect();
                    cx.gfx.draw_shape(&closed(pts).stroke(color(stroke)));
                }
                DrawCmd::Polygon { points, fill } => {
                    if points.len() < 2 {
                        continue;
                    }
                    let pts = points.into_iter().map(to_px).collect();
                    cx.gfx.draw_shape(&closed(pts).fill(color(fill)));
                }
                DrawCmd::Rect { rect, fill } => {
                    let [left, top, right, bottom] = rect;
                    cx.gfx.draw_shape(
                        Shape::filled_rect(
                            Rect::new(
                                to_px([left, top]),
                                Size::px(
                                    ((right - left) * sx) as f32,
                                    ((bottom - top) * sy) as f32,
                                ),
                            ),
                            color(fill),
                        )
                        .translate_by(Point::px(0, 0)),
                    );
                }
                DrawCmd::Line { from, to, stroke } => {
                    cx.gfx.draw_shape(
                        &path(vec![to_px(from), to_px(to)]).stroke(color(stroke)),
                    );
                }
                DrawCmd::Text { pos, text, color: tint } => {
                    let dims = cx.gfx.measure_text::<Px>(&text);
                    let w = dims.size.width.into_float();
                    let h = dims.size.height.into_float();
                    let at = to_px(pos);
                    cx.gfx.draw_text(Text::new(&text, color(tint)).translate_by(
                        Point::px(
                            at.x.into_float() - w / 2.0,
                            at.y.into_float() - h / 2.0,
                        ),
                    ));
                }
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = LabConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    info!(
        "charge lab on a {}x{} canvas at {} ticks/s",
        config.canvas_width, config.canvas_height, config.ticks_per_second
    );

    let ticks = config.ticks_per_second;
    let mut frontend = Frontend::new(Lab::new(config));

    Canvas::new(move |cx| {
        frontend.poll_input(cx);
        frontend.lab.tick();
        frontend.draw(cx);
    })
    .tick(Tick::redraws_per_second(ticks))
    .run()
    .map_err(|e| anyhow::anyhow!("lab window failed: {e:?}"))
}
