extern crate tokio;
use anyhow::Result;
use clap::Parser;
use common::trace::{self, Output};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    ExecutableCommand,
};
use futures::StreamExt;
use log::info;
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as Segment, Points},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    DefaultTerminal, Frame,
};
use solarscope::{
    camera::{Camera, Projection},
    config::SceneConfig,
    focus::FocusState,
    game::{celestial_body, repr::Vector3},
    instance::Instance,
    picking::{self, Viewport},
    protocol::{BodyInfo, ViewAction},
};
use std::{
    f64::consts::TAU,
    fs::File,
    time::{Duration, Instant},
};

#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "CONFIG_PATH")]
    config: Option<String>,

    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, value_name = "FACTOR")]
    speed_factor: Option<f64>,

    #[arg(long, value_name = "LOG_PATH")]
    log_file: Option<String>,

    #[arg(long, default_value = "(solarscope.*)", value_name = "REGEX")]
    trace_filter: String,

    #[arg(
        long,
        default_value = "INFO",
        value_name = "TRACE|DEBUG|INFO|WARN|ERROR"
    )]
    trace_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        trace::init_with(
            Some(args.trace_filter.clone()),
            Some(args.trace_level.as_str()),
            Output::File(File::create(log_file)?),
        );
    }

    let mut config = match &args.config {
        Some(path) => SceneConfig::from_path(path)?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(speed_factor) = args.speed_factor {
        config.animation.speed_factor = speed_factor;
    }

    let instance = Instance::new(config)?;

    info!("Running app");
    let terminal = ratatui::init();
    let app_result = App::new(instance).run(terminal).await;
    ratatui::restore();
    app_result
}

struct App {
    instance: Instance,
    should_quit: bool,
    cursor: Option<(u16, u16)>,
    press: Option<(u16, u16)>,
    dragged: bool,
    hud_area: Rect,
    draw_area: Rect,
    modal_area: Option<Rect>,
    close_area: Option<Rect>,
}

impl App {
    const FRAMES_PER_SECOND: f32 = 60.0;
    // virtual pixels per terminal cell
    const CELL_WIDTH: f64 = 8.;
    const CELL_HEIGHT: f64 = 16.;
    const ORBIT_SEGMENTS: usize = 64;

    fn new(instance: Instance) -> App {
        App {
            instance,
            should_quit: false,
            cursor: None,
            press: None,
            dragged: false,
            hud_area: Rect::default(),
            draw_area: Rect::default(),
            modal_area: None,
            close_area: None,
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let period = Duration::from_secs_f32(1.0 / Self::FRAMES_PER_SECOND);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();
        let mut last_frame = Instant::now();
        std::io::stdout().execute(EnableMouseCapture)?;

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    let now = Instant::now();
                    self.instance.update((now - last_frame).as_secs_f64());
                    last_frame = now;
                    terminal.draw(|frame| self.draw(frame))?;
                    self.sync_viewport()?;
                },
                Some(Ok(event)) = events.next() => {
                    self.handle_event(&event)?;
                }
            }
        }

        std::io::stdout().execute(DisableMouseCapture)?;
        Ok(())
    }

    fn to_pixels(rect: Rect) -> picking::Rect {
        picking::Rect::new(
            rect.x as f64 * Self::CELL_WIDTH,
            rect.y as f64 * Self::CELL_HEIGHT,
            rect.width as f64 * Self::CELL_WIDTH,
            rect.height as f64 * Self::CELL_HEIGHT,
        )
    }

    fn cell_center(column: u16, row: u16) -> (f64, f64) {
        (
            (column as f64 + 0.5) * Self::CELL_WIDTH,
            (row as f64 + 0.5) * Self::CELL_HEIGHT,
        )
    }

    fn sync_viewport(&mut self) -> Result<()> {
        let mut overlays = vec![Self::to_pixels(self.hud_area)];
        if let Some(modal) = self.modal_area {
            overlays.push(Self::to_pixels(modal));
        }
        let viewport = Viewport::new(Self::to_pixels(self.draw_area), 1.).with_overlays(overlays);
        if &viewport != self.instance.borrow_viewport() {
            self.instance.handle(ViewAction::Resize(viewport))?;
        }
        Ok(())
    }

    fn status_line(&self) -> String {
        let name = |id| {
            self.instance
                .borrow_system()
                .borrow_body(id)
                .map(|b| b.get_name().to_string())
                .unwrap_or_default()
        };
        match self.instance.focus_state() {
            FocusState::Idle => "Orbiting".to_string(),
            FocusState::Focusing(id) => format!("Flying to {}", name(id)),
            FocusState::Focused(id) => format!("Focused on {}", name(id)),
            FocusState::Resetting => "Returning to overview".to_string(),
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(f.area());

        self.hud_area = chunks[0];
        self.draw_area = chunks[1].inner(Margin {
            vertical: 1,
            horizontal: 1,
        });

        let hud = Paragraph::new(Line::from(vec![
            Span::styled(
                self.status_line(),
                Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  click a planet · drag to orbit · scroll to zoom · r reset · q quit"),
        ]))
        .block(Block::default().title("Solar system").borders(Borders::ALL));
        f.render_widget(hud, self.hud_area);

        let aspect = self.instance.borrow_camera().aspect;
        let instance = &self.instance;
        let system_canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL))
            .marker(Marker::Braille)
            .x_bounds([-aspect, aspect])
            .y_bounds([-1., 1.])
            .paint(move |ctx| {
                paint_particles(ctx, instance, aspect);
                ctx.layer();
                paint_stars(ctx, instance, aspect);
                ctx.layer();
                paint_orbits(ctx, instance, aspect);
                ctx.layer();
                paint_bodies(ctx, instance, aspect);
            });
        f.render_widget(system_canvas, chunks[1]);

        self.draw_modal(f, chunks[1]);
    }

    fn draw_modal(&mut self, f: &mut Frame, area: Rect) {
        let card = match self.instance.borrow_overlay().borrow_card() {
            Some(card) => card.clone(),
            None => {
                self.modal_area = None;
                self.close_area = None;
                return;
            }
        };

        let width = 48.min(area.width.saturating_sub(2));
        let height = 14.min(area.height.saturating_sub(2));
        let modal = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + 1,
            width,
            height,
        );

        let label = Style::new().fg(Color::DarkGray);
        let text = vec![
            Line::from(vec![Span::styled("Type           ", label), Span::raw(card.category)]),
            Line::from(vec![
                Span::styled("Radius         ", label),
                Span::raw(format!("{} km", card.radius_km)),
            ]),
            Line::from(vec![
                Span::styled("Orbital period ", label),
                Span::raw(format!("{} days", card.period_days)),
            ]),
            Line::default(),
            Line::from(card.description),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                card.name,
                Style::new().add_modifier(Modifier::BOLD),
            ))
            .title_top(Line::from("[x]").right_aligned());

        f.render_widget(Clear, modal);
        f.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            modal,
        );

        self.modal_area = Some(modal);
        self.close_area = Some(Rect::new(
            modal.x + modal.width.saturating_sub(4),
            modal.y,
            3,
            1,
        ));
    }

    fn click(&mut self, column: u16, row: u16) -> Result<()> {
        let on_close = self
            .close_area
            .map(|area| area.contains(Position::new(column, row)))
            .unwrap_or(false);

        if on_close {
            return self.instance.handle(ViewAction::Close).map_err(Into::into);
        }

        let (x, y) = Self::cell_center(column, row);
        self.instance
            .handle(ViewAction::Click { x, y })
            .map_err(Into::into)
    }

    fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                match key_event.code {
                    KeyCode::Char('q') => {
                        self.should_quit = true;
                    }
                    KeyCode::Esc => {
                        if self.instance.borrow_overlay().is_visible() {
                            self.instance.handle(ViewAction::Close)?;
                        }
                    }
                    KeyCode::Char('r') => {
                        self.instance.handle(ViewAction::Close)?;
                    }
                    _ => {}
                }
            }

            Event::Mouse(event) => match event.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.press = Some((event.column, event.row));
                    self.cursor = Some((event.column, event.row));
                    self.dragged = false;
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    if let Some((column, row)) = self.cursor {
                        self.instance.handle(ViewAction::Drag {
                            dx: (event.column as f64 - column as f64) * Self::CELL_WIDTH,
                            dy: (event.row as f64 - row as f64) * Self::CELL_HEIGHT,
                        })?;
                    }
                    self.dragged = true;
                    self.cursor = Some((event.column, event.row));
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    if let Some((column, row)) = self.press.take() {
                        if !self.dragged {
                            self.click(column, row)?;
                        }
                    }
                    self.dragged = false;
                }
                MouseEventKind::Moved => {
                    self.cursor = Some((event.column, event.row));
                    let hover = if self
                        .draw_area
                        .contains(Position::new(event.column, event.row))
                    {
                        Some(Self::cell_center(event.column, event.row))
                    } else {
                        None
                    };
                    self.instance.handle(ViewAction::Hover(hover))?;
                }
                MouseEventKind::ScrollUp => {
                    if self
                        .draw_area
                        .contains(Position::new(event.column, event.row))
                    {
                        self.instance.handle(ViewAction::Zoom(-1.))?;
                    }
                }
                MouseEventKind::ScrollDown => {
                    if self
                        .draw_area
                        .contains(Position::new(event.column, event.row))
                    {
                        self.instance.handle(ViewAction::Zoom(1.))?;
                    }
                }
                _ => {}
            },
            _ => {}
        }
        Ok(())
    }
}

fn gray(opacity: f64) -> Color {
    let level = (opacity.clamp(0., 1.) * 255.) as u8;
    Color::Rgb(level, level, level)
}

fn rgb(color: u32) -> Color {
    let (r, g, b) = celestial_body::rgb(color);
    Color::Rgb(r, g, b)
}

/// Canvas coordinates keep both axes in vertical NDC units.
fn to_canvas(ndc: (f64, f64), aspect: f64) -> (f64, f64) {
    (ndc.0 * aspect, ndc.1)
}

fn paint_particles(ctx: &mut Context, instance: &Instance, aspect: f64) {
    let particles = instance.borrow_particles();
    let (width, height) = particles.get_size();
    if width <= 0. || height <= 0. {
        return;
    }
    let local = |(x, y): (f64, f64)| to_canvas((x / width * 2. - 1., 1. - y / height * 2.), aspect);

    let mut links = particles.links();
    if let Some(cursor) = instance.get_hover() {
        links.extend(particles.grab_links(cursor));
    }
    for link in links {
        let (x1, y1) = local(link.from);
        let (x2, y2) = local(link.to);
        ctx.draw(&Segment {
            x1,
            y1,
            x2,
            y2,
            color: gray(link.opacity),
        });
    }

    for particle in particles.borrow_particles() {
        let coords = [local((particle.x, particle.y))];
        ctx.draw(&Points {
            coords: &coords,
            color: gray(particle.opacity),
        });
    }
}

fn paint_stars(ctx: &mut Context, instance: &Instance, aspect: f64) {
    let camera = instance.borrow_camera();
    let coords: Vec<(f64, f64)> = instance
        .borrow_starfield()
        .borrow_stars()
        .iter()
        .filter_map(|star| camera.project(*star))
        .filter(|p| p.x.abs() <= 1. && p.y.abs() <= 1.)
        .map(|p| to_canvas((p.x, p.y), aspect))
        .collect();
    ctx.draw(&Points {
        coords: &coords,
        color: Color::Gray,
    });
}

fn paint_loop(
    ctx: &mut Context,
    camera: &Camera,
    center: Vector3,
    radius: f64,
    color: Color,
    aspect: f64,
) {
    let mut previous = None;
    for i in 0..=App::ORBIT_SEGMENTS {
        let angle = TAU * i as f64 / App::ORBIT_SEGMENTS as f64;
        let point = center + Vector3::new(radius * angle.cos(), 0., radius * angle.sin());
        let current = camera
            .project(point)
            .map(|p| to_canvas((p.x, p.y), aspect));
        if let (Some((x1, y1)), Some((x2, y2))) = (previous, current) {
            ctx.draw(&Segment {
                x1,
                y1,
                x2,
                y2,
                color,
            });
        }
        previous = current;
    }
}

fn paint_orbits(ctx: &mut Context, instance: &Instance, aspect: f64) {
    let camera = instance.borrow_camera();
    for body in instance.borrow_system().borrow_bodies() {
        if body.is_sun() {
            continue;
        }
        paint_loop(
            ctx,
            camera,
            Vector3::zeros(),
            body.get_orbit_distance(),
            gray(0.2),
            aspect,
        );
    }
}

fn paint_bodies(ctx: &mut Context, instance: &Instance, aspect: f64) {
    let camera = instance.borrow_camera();
    let mut visible: Vec<(BodyInfo, Projection)> = instance
        .body_infos()
        .into_iter()
        .filter_map(|info| {
            camera
                .project(Vector3::from(info.coords))
                .map(|projection| (info, projection))
        })
        .collect();
    // far bodies first so near ones cover them
    visible.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

    for (info, projection) in visible {
        let center = Vector3::from(info.coords);
        let (x, y) = to_canvas((projection.x, projection.y), aspect);
        let radius = camera.projected_radius(info.display_radius, projection.depth);

        if let Some(glow) = info.glow {
            ctx.draw(&Circle {
                x,
                y,
                radius: radius * glow,
                color: Color::Rgb(120, 70, 0),
            });
        }

        ctx.draw(&Circle {
            x,
            y,
            radius,
            color: rgb(info.color),
        });

        if let Some(ring) = info.ring {
            for scale in [ring.inner, ring.outer] {
                paint_loop(
                    ctx,
                    camera,
                    center,
                    info.display_radius * scale,
                    rgb(ring.color),
                    aspect,
                );
            }
        }

        let marker = center
            + Vector3::new(
                info.display_radius * info.spin.cos(),
                0.,
                -info.display_radius * info.spin.sin(),
            );
        if let Some(p) = camera.project(marker) {
            let coords = [to_canvas((p.x, p.y), aspect)];
            ctx.draw(&Points {
                coords: &coords,
                color: Color::White,
            });
        }

        let label_style = if info.focused {
            Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(Color::DarkGray)
        };
        ctx.print(x, y + radius, Span::styled(info.name.clone(), label_style));
    }
}
