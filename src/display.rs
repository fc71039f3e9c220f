/// Rendering layer: all terminal I/O lives here.
///
/// The world hands its live entities to a `SpriteBuffer`; the functions in
/// this module turn the buffer, the status line and any prompt into terminal
/// commands. No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_inflators::entities::{FIELD_HEIGHT, FIELD_WIDTH, TOP_ROW};
use space_inflators::{EntityKind, RenderHook, Sprite, World};

// ── Layout ────────────────────────────────────────────────────────────────────

/// Row 0 holds the status line, row 1 the top border.
const FIELD_TOP: u16 = 2;
/// Column 0 holds the left border.
const FIELD_LEFT: u16 = 1;
const BOTTOM_BORDER: u16 = FIELD_TOP + FIELD_HEIGHT as u16;
const HINT_ROW: u16 = BOTTOM_BORDER + 1;

/// Terminal rows needed to show the whole field.
pub const REQUIRED_ROWS: u16 = HINT_ROW + 1;
pub const REQUIRED_COLUMNS: u16 = FIELD_WIDTH as u16 + 2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_STAR: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_NACHLING: Color = Color::Green;
const C_WEALTHY: Color = Color::Yellow;
const C_SMALLBOT: Color = Color::Red;
const C_BULLET: Color = Color::Cyan;
const C_TORPEDO: Color = Color::Magenta;

/// Collects sprites so they can be drawn with I/O error propagation.
#[derive(Debug, Default)]
pub struct SpriteBuffer {
    sprites: Vec<Sprite>,
}

impl RenderHook for SpriteBuffer {
    fn draw(&mut self, sprite: &Sprite) {
        self.sprites.push(*sprite);
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World, status: &str) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out)?;
    draw_hud(out, status)?;

    let mut buffer = SpriteBuffer::default();
    world.render(&mut buffer);
    for sprite in &buffer.sprites {
        draw_sprite(out, sprite)?;
    }

    draw_controls_hint(out)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, HINT_ROW))?;
    out.flush()?;
    Ok(())
}

/// Boxed message centred on the field, drawn over whatever is there.
pub fn draw_prompt<W: Write>(out: &mut W, lines: &[&str], color: Color) -> std::io::Result<()> {
    let inner = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        + 2;
    let top = format!("╔{}╗", "═".repeat(inner));
    let bottom = format!("╚{}╝", "═".repeat(inner));
    let body = lines.iter().map(|line| format!("║ {line:<width$} ║", width = inner - 2));
    let rows: Vec<String> = std::iter::once(top)
        .chain(body)
        .chain(std::iter::once(bottom))
        .collect();

    let cx = FIELD_LEFT + FIELD_WIDTH as u16 / 2;
    let start_row = (FIELD_TOP + FIELD_HEIGHT as u16 / 2).saturating_sub(rows.len() as u16 / 2);

    out.queue(style::SetForegroundColor(color))?;
    for (i, row) in rows.iter().enumerate() {
        let col = cx.saturating_sub(row.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(row))?;
    }
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let w = FIELD_WIDTH as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, FIELD_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, BOTTOM_BORDER))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in FIELD_TOP..BOTTOM_BORDER {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(FIELD_LEFT + FIELD_WIDTH as u16, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, status: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(status))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, sprite: &Sprite) -> std::io::Result<()> {
    // Field row 0 is the bottom; terminal rows grow downward.
    let col = FIELD_LEFT + sprite.cell.x as u16;
    let row = FIELD_TOP + (TOP_ROW - sprite.cell.y) as u16;
    let (glyph, color) = appearance(sprite.kind, sprite.brightness);

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Pickups dim to the dark shade of their colour as they run out of time.
fn appearance(kind: EntityKind, brightness: f32) -> (char, Color) {
    let faded = brightness < 0.6;
    match kind {
        EntityKind::Star => ('.', C_STAR),
        EntityKind::PlayerShip => ('▲', C_PLAYER),
        EntityKind::Nachling => ('▼', C_NACHLING),
        EntityKind::WealthyNachling => ('◆', C_WEALTHY),
        EntityKind::Smallbot => ('◎', C_SMALLBOT),
        EntityKind::Bullet => ('│', C_BULLET),
        EntityKind::Torpedo => ('║', C_TORPEDO),
        EntityKind::FreeShipGoodie => ('♥', shade(Color::Magenta, Color::DarkMagenta, faded)),
        EntityKind::EnergyGoodie => ('+', shade(Color::Green, Color::DarkGreen, faded)),
        EntityKind::TorpedoGoodie => ('T', shade(Color::Yellow, Color::DarkYellow, faded)),
    }
}

fn shade(bright: Color, dark: Color, faded: bool) -> Color {
    if faded {
        dark
    } else {
        bright
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, HINT_ROW))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Arrows/WASD move  SPACE fire  TAB torpedo  Q quit"))?;
    Ok(())
}
