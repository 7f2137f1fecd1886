/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only translates state
/// into terminal commands.  World coordinates are scaled onto whatever grid
/// the terminal currently offers, so resizing mid-game just works.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::config::GameConfig;
use crate::entities::{Entity, EntityKind, GameSession, GameStatus};
use crate::phase::{clamp_index, PhaseTable};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkYellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_PHASE: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_PROJECTILE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// One colour per enemy variant; variants past the end reuse the last.
const ENEMY_COLORS: [Color; 5] = [
    Color::Red,
    Color::Magenta,
    Color::DarkRed,
    Color::Yellow,
    Color::DarkMagenta,
];

/// Background "art".  Slot 0 is the menu, slot `p + 1` is phase `p`.
pub const BACKGROUNDS: [Color; 6] = [
    Color::Black,
    Color::DarkGreen,
    Color::DarkCyan,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkGrey,
];

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Terminal grid size in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

/// Cell rectangle, end-exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn current() -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self { cols, rows })
    }

    /// Playfield interior: inside the border, below the HUD, above the hint.
    pub fn field(&self) -> CellRect {
        CellRect {
            col: 1,
            row: 2,
            cols: self.cols.saturating_sub(2),
            rows: self.rows.saturating_sub(4),
        }
    }

    /// Cells covered by `entity`, clipped to the interior.  `None` when the
    /// entity is entirely outside it.
    pub fn project(&self, entity: &Entity, cfg: &GameConfig) -> Option<CellRect> {
        let field = self.field();
        if field.cols == 0 || field.rows == 0 {
            return None;
        }
        let sx = field.cols as f32 / cfg.playfield.width;
        let sy = field.rows as f32 / cfg.playfield.height;
        let x0 = (entity.left() * sx).floor();
        let y0 = (entity.pos.y * sy).floor();
        // Every entity covers at least one cell.
        let x1 = (entity.right() * sx).ceil().max(x0 + 1.0);
        let y1 = ((entity.pos.y + entity.size.y) * sy).ceil().max(y0 + 1.0);

        let cx0 = x0.max(0.0);
        let cy0 = y0.max(0.0);
        let cx1 = x1.min(field.cols as f32);
        let cy1 = y1.min(field.rows as f32);
        if cx0 >= cx1 || cy0 >= cy1 {
            return None;
        }
        Some(CellRect {
            col: field.col + cx0 as u16,
            row: field.row + cy0 as u16,
            cols: (cx1 - cx0) as u16,
            rows: (cy1 - cy0) as u16,
        })
    }
}

/// Background slot for the current screen, clamped to the palette.
pub fn background_slot(status: GameStatus, phase: usize, slots: usize) -> usize {
    match status {
        GameStatus::Menu => 0,
        _ => clamp_index(phase + 1, slots),
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    session: &GameSession,
    cfg: &GameConfig,
    view: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if session.status == GameStatus::Menu {
        draw_menu(out, view)?;
    } else {
        let bg = BACKGROUNDS[background_slot(session.status, session.phase, BACKGROUNDS.len())];
        draw_background(out, view, bg)?;
        draw_border(out, view)?;
        draw_hud(out, session, cfg, view)?;

        out.queue(style::SetBackgroundColor(bg))?;
        for entity in session.live_entities() {
            draw_entity(out, entity, cfg, view)?;
        }
        out.queue(style::ResetColor)?;

        draw_controls_hint(out, view)?;

        match session.status {
            GameStatus::Victory => draw_banner(out, session, view, "  V I C T O R Y  ", Color::Green)?,
            GameStatus::Defeat => draw_banner(out, session, view, "  GAME  OVER  ", Color::Red)?,
            _ => {}
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let cy = view.rows / 2;
    print_centered(out, view, cy.saturating_sub(3), "★  PAMPAS  HERO  ★", Color::Cyan)?;
    print_centered(out, view, cy, "Press ENTER to start", Color::White)?;
    print_centered(
        out,
        view,
        cy + 2,
        "↑ ↓ / W S : Move   SPACE : Shoot   Q : Quit",
        C_HINT,
    )?;
    Ok(())
}

// ── Background & border ───────────────────────────────────────────────────────

fn draw_background<W: Write>(out: &mut W, view: Viewport, bg: Color) -> std::io::Result<()> {
    let field = view.field();
    let blank = " ".repeat(field.cols as usize);
    out.queue(style::SetBackgroundColor(bg))?;
    for row in field.row..field.row + field.rows {
        out.queue(cursor::MoveTo(field.col, row))?;
        out.queue(Print(&blank))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    session: &GameSession,
    cfg: &GameConfig,
    view: Viewport,
) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5}", session.score)))?;

    // Health
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!("  Health:{:>3}", session.player.health)))?;

    // Elapsed play time, right
    let secs = session.frame / u64::from(cfg.tick_rate_hz.max(1));
    let time = format!("Time:{:>5}s", secs);
    let col = view.cols.saturating_sub(time.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&time))?;

    // Phase label, centred; hidden once the game is over
    if session.status == GameStatus::Playing {
        let table = PhaseTable::new(&cfg.phases);
        let label = format!("[ {} ]", table.label(session.phase));
        print_centered(out, view, 0, &label, C_HUD_PHASE)?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn glyph_for(kind: EntityKind) -> (&'static str, Color) {
    match kind {
        EntityKind::Player => ("█", C_PLAYER),
        EntityKind::Enemy { variant } => (
            "▓",
            ENEMY_COLORS[clamp_index(variant as usize, ENEMY_COLORS.len())],
        ),
        EntityKind::Projectile => ("●", C_PROJECTILE),
    }
}

fn draw_entity<W: Write>(
    out: &mut W,
    entity: &Entity,
    cfg: &GameConfig,
    view: Viewport,
) -> std::io::Result<()> {
    let Some(cells) = view.project(entity, cfg) else {
        return Ok(());
    };
    let (glyph, color) = glyph_for(entity.kind);
    let line = glyph.repeat(cells.cols as usize);
    out.queue(style::SetForegroundColor(color))?;
    for row in cells.row..cells.row + cells.rows {
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ / W S : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Victory / defeat overlay ──────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: Viewport,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let inner = title.chars().count();
    let top = format!("╔{}╗", "═".repeat(inner));
    let mid = format!("║{}║", title);
    let bottom = format!("╚{}╝", "═".repeat(inner));
    let score_line = format!("Final Score: {:>5}", session.score);

    let start_row = (view.rows / 2).saturating_sub(2);
    for (i, line) in [&top, &mid, &bottom].iter().enumerate() {
        print_centered(out, view, start_row + i as u16, line, color)?;
    }
    print_centered(out, view, start_row + 3, &score_line, Color::Yellow)?;
    Ok(())
}
