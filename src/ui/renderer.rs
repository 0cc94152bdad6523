/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// A grid cell is `CELL_W` terminal columns by one row. Grid (x, y) lands at
/// terminal `(origin_x + x * CELL_W, MAP_ROW + y)`, with the map centered
/// horizontally.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::tile::Tile;
use crate::sim::frame::RenderHook;
use crate::sim::world::WorldState;

// ── Palette ──

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

const FLUX: Color = rgb(0xcc, 0xff, 0xcc);
const WALL: Color = rgb(0x99, 0x99, 0x99);
const STONE: Color = rgb(0x00, 0x00, 0xcc);
const BOX: Color = rgb(0x8b, 0x45, 0x13);
const GATE1: Color = rgb(0xff, 0xcc, 0x00);
const GATE2: Color = rgb(0x00, 0xcc, 0xff);
const PLAYER: Color = rgb(0xff, 0x00, 0x00);

/// Fill color for a tile. Air is not drawn.
pub fn tile_color(tile: Tile) -> Option<Color> {
    match tile {
        Tile::Air => None,
        Tile::Flux => Some(FLUX),
        Tile::Unbreakable => Some(WALL),
        Tile::Stone | Tile::FallingStone => Some(STONE),
        Tile::Box | Tile::FallingBox => Some(BOX),
        Tile::Key1 | Tile::Lock1 => Some(GATE1),
        Tile::Key2 | Tile::Lock2 => Some(GATE2),
        // Drawn separately, on top of whatever is underneath.
        Tile::Player => None,
    }
}

/// Keys and locks share a color, so they differ by glyph.
fn tile_glyphs(tile: Tile) -> [char; 2] {
    match tile {
        Tile::Stone | Tile::FallingStone => ['(', ')'],
        Tile::Box | Tile::FallingBox => ['[', ']'],
        Tile::Key1 | Tile::Key2 => ['o', '-'],
        Tile::Lock1 | Tile::Lock2 => ['#', '#'],
        _ => [' ', ' '],
    }
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BASE_BG: Color = rgb(22, 22, 35);

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel used to invalidate the back buffer so every cell repaints.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i, y, Cell { ch, fg, bg });
        }
    }
}

// ── Renderer ──

/// Terminal columns per grid cell.
pub const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw as usize, th as usize);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.front.resize(w, h);
        self.back.resize(w, h);
        self.back.cells.fill(Cell::INVALID);
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, w: &WorldState) {
        let buf_w = self.front.width;
        let hud_bg = rgb(20, 20, 60);

        // ── HUD row ──
        let locks = w.tiles.iter().flatten().filter(|t| t.is_lock()).count();
        let hud = format!(
            " Level {} - {}   Gates left: {}   Tick {} ",
            w.level_index + 1, w.level_name, locks, w.tick,
        );
        for x in 0..buf_w {
            self.front.set(x, HUD_ROW, Cell { ch: ' ', fg: Color::White, bg: hud_bg });
        }
        self.front.put_str(0, HUD_ROW, &hud, Color::White, hud_bg);

        // ── Map ──
        let origin_x = buf_w.saturating_sub(w.width * CELL_W) / 2;
        for gy in 0..w.height {
            for gx in 0..w.width {
                let tile = w.tiles[gy][gx];
                let Some(bg) = tile_color(tile) else { continue };
                let glyphs = tile_glyphs(tile);
                for (i, ch) in glyphs.iter().enumerate() {
                    self.front.set(
                        origin_x + gx * CELL_W + i,
                        MAP_ROW + gy,
                        Cell { ch: *ch, fg: Color::Black, bg },
                    );
                }
            }
        }

        // Player last, regardless of the tile under it.
        let p = w.player;
        for i in 0..CELL_W {
            self.front.set(
                origin_x + p.x * CELL_W + i,
                MAP_ROW + p.y,
                Cell { ch: ' ', fg: Color::White, bg: PLAYER },
            );
        }

        // ── Help bar ──
        let help_row = MAP_ROW + w.height + 1;
        let help = " Arrows/WASD: move   R: restart   Q/Esc: quit";
        self.front.put_str(0, help_row, help, Color::DarkGrey, Cell::BASE_BG);
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }

                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }
}

impl RenderHook for Renderer {
    fn render(&mut self, world: &WorldState) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.front.width || th as usize != self.front.height {
            self.resize(tw as usize, th as usize);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        self.compose_game(world);
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }
}
