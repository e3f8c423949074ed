// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::frame::{Frame, Glyph};

/// Raw-mode alternate screen; restored on drop.
pub struct Terminal {
    stdout: Stdout,
    last_size: Option<(u16, u16)>,
    run_buf: String,
}

struct Pen {
    fg: Option<Color>,
    bg: Option<Color>,
}

impl Pen {
    fn apply(&mut self, out: &mut Stdout, glyph: &Glyph) -> Result<()> {
        if glyph.fg != self.fg {
            out.queue(SetForegroundColor(glyph.fg.unwrap_or(Color::Reset)))?;
            self.fg = glyph.fg;
        }
        if glyph.bg != self.bg {
            out.queue(SetBackgroundColor(glyph.bg.unwrap_or(Color::Reset)))?;
            self.bg = glyph.bg;
        }
        Ok(())
    }
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last_size: None,
            run_buf: String::with_capacity(64),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let size = (frame.width, frame.height);
        let mut pen = Pen { fg: None, bg: None };
        self.stdout.queue(ResetColor)?;

        if self.last_size != Some(size) || frame.is_dirty_all() {
            self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..frame.height {
                self.stdout.queue(cursor::MoveTo(0, y))?;
                for x in 0..frame.width {
                    let Some(idx) = frame.index(x, y) else {
                        continue;
                    };
                    let glyph = frame.cell_at_index(idx);
                    pen.apply(&mut self.stdout, &glyph)?;
                    self.stdout.queue(Print(glyph.ch))?;
                }
            }
            self.last_size = Some(size);
        } else {
            let mut dirty = frame.dirty_indices().to_vec();
            dirty.sort_unstable();
            let width = frame.width as usize;

            // Coalesce horizontally adjacent cells with the same colors.
            let mut i = 0usize;
            while i < dirty.len() {
                let idx0 = dirty[i];
                let glyph0 = frame.cell_at_index(idx0);
                self.run_buf.clear();
                self.run_buf.push(glyph0.ch);

                let mut j = i + 1;
                while j < dirty.len() {
                    let idx1 = dirty[j];
                    if idx1 != dirty[j - 1] + 1 || idx1 % width == 0 {
                        break;
                    }
                    let glyph1 = frame.cell_at_index(idx1);
                    if glyph1.fg != glyph0.fg || glyph1.bg != glyph0.bg {
                        break;
                    }
                    self.run_buf.push(glyph1.ch);
                    j += 1;
                }

                let x0 = (idx0 % width) as u16;
                let y0 = (idx0 / width) as u16;
                self.stdout.queue(cursor::MoveTo(x0, y0))?;
                pen.apply(&mut self.stdout, &glyph0)?;
                self.stdout.queue(Print(self.run_buf.as_str()))?;
                i = j;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
