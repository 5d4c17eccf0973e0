use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::{Game, Status};
use crate::grid::Pos;

pub const CELL_W: usize = 2;

const HELP: &str = "arrows/hjkl move, r restart, q quit";
const RESTART_HINT: &str = "Press 'R' to Restart or 'Q' to Quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Player,
    Goal,
    Wall,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: Color,
}

pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Open,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        game: &Game,
        term: (u16, u16),
    ) -> io::Result<()> {
        let (term_w, term_h) = term;
        let cols = game.width().saturating_mul(CELL_W);
        let rows = game.height().saturating_add(2);

        out.queue(MoveTo(0, 0))?;
        let fits = |need: usize, have: u16| u16::try_from(need).ok().filter(|n| *n <= have);
        let (Some(needed_w), Some(needed_h)) = (fits(cols, term_w), fits(rows, term_h)) else {
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                cols, rows, term_w, term_h
            )))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        };

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.last.len() != game.width() * game.height() {
            *self = Self {
                origin_x,
                origin_y,
                ..Self::new(game.width(), game.height())
            };
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = format!("Moves: {}  ({})", game.state().moves(), HELP);
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..game.height() {
            for x in 0..game.width() {
                let cell = cell_for(game, Pos::new(x, y));
                let idx = y * game.width() + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(out, x, y, cell)?;
                }
            }
        }
        self.needs_full = false;

        if let Some((message, color)) = banner(game.state().status()) {
            let mid = self.origin_y.saturating_add(needed_h / 2 - 1);
            self.draw_centered(out, needed_w, mid, message, color)?;
            let hint_row = mid.saturating_add(1);
            self.draw_centered(out, needed_w, hint_row, RESTART_HINT, Color::White)?;
        }

        out.flush()
    }

    fn draw_cell<W: Write>(&self, out: &mut W, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "●",
            Glyph::Goal => "■",
            Glyph::Wall => "██",
            Glyph::Open => "  ",
        };
        let col = u16::try_from(x * CELL_W).unwrap_or(u16::MAX);
        let row = u16::try_from(y).unwrap_or(u16::MAX);
        let x_pos = self.origin_x.saturating_add(col);
        let y_pos = self.origin_y.saturating_add(row);
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            out.queue(Print(' '))?;
        }
        out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_centered<W: Write>(
        &self,
        out: &mut W,
        span: u16,
        row: u16,
        text: &str,
        color: Color,
    ) -> io::Result<()> {
        let w = UnicodeWidthStr::width(text) as u16;
        let x = self.origin_x.saturating_add(span.saturating_sub(w) / 2);
        out.queue(MoveTo(x, row))?;
        out.queue(SetForegroundColor(color))?;
        out.queue(Print(text))?;
        out.queue(ResetColor)?;
        Ok(())
    }
}

pub fn cell_for(game: &Game, pos: Pos) -> Cell {
    let state = game.state();
    if pos == state.player() {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Red,
        };
    }
    if pos == state.goal() {
        return Cell {
            glyph: Glyph::Goal,
            color: Color::Yellow,
        };
    }
    if game.grid().is_open(pos) {
        Cell {
            glyph: Glyph::Open,
            color: Color::Reset,
        }
    } else {
        Cell {
            glyph: Glyph::Wall,
            color: Color::DarkBlue,
        }
    }
}

fn banner(status: Status) -> Option<(&'static str, Color)> {
    match status {
        Status::Playing => None,
        Status::Won => Some(("YOU WIN!", Color::Green)),
        Status::Lost => Some(("GAME OVER!", Color::Red)),
    }
}
