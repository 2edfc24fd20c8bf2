//! Host event loop.
//!
//! Reads input script lines, feeds them through the calculator one input at
//! a time, and renders the display after every line and every flash reset.
//! Everything runs on one task; the flash timer is the only other source of
//! events.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::config::CalciConfig;
use crate::controller::{Calculator, FlashTicket, Outcome};
use crate::flash::FlashTimer;
use crate::input::{Input, parse_script_line};

pub struct Session<W: Write> {
    calculator: Calculator,
    timer: FlashTimer,
    expired: mpsc::UnboundedReceiver<FlashTicket>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(config: &CalciConfig, out: W) -> Self {
        let (timer, expired) = FlashTimer::new(config.flash_delay());
        Self {
            calculator: Calculator::with_error_marker(config.error_marker.clone()),
            timer,
            expired,
            out,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Normalize and apply one input event.
    pub fn handle_input(&mut self, input: &Input) -> Outcome {
        let Some(token) = input.token() else {
            tracing::trace!(%input, "ignoring input with no calculator meaning");
            return Outcome::Unchanged;
        };

        let outcome = self.calculator.apply(&token);
        match outcome {
            Outcome::Flash(ticket) => self.timer.schedule(ticket),
            _ if !self.calculator.is_flashing() => self.timer.cancel(),
            _ => {}
        }
        outcome
    }

    /// Apply every input on a script line, then render.
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        for input in parse_script_line(line) {
            self.handle_input(&input);
        }
        self.render()
    }

    fn handle_expired(&mut self, ticket: FlashTicket) -> Result<()> {
        if self.calculator.expire_flash(ticket) == Outcome::Changed {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        writeln!(self.out, "{}", self.calculator.display()).context("Failed to write display")?;
        self.out.flush().context("Failed to flush display")
    }

    /// Run until `reader` is exhausted.
    ///
    /// A flash still pending at end of input is allowed to finish so the
    /// final render reflects the cleared display.
    pub async fn run<R>(&mut self, reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line.context("Failed to read input")? {
                        Some(line) => self.handle_line(&line)?,
                        None => break,
                    }
                }
                Some(ticket) = self.expired.recv() => self.handle_expired(ticket)?,
            }
        }

        if self.calculator.is_flashing() {
            tracing::debug!("input closed, waiting for pending flash reset");
        }
        while self.calculator.is_flashing() {
            match self.expired.recv().await {
                Some(ticket) => self.handle_expired(ticket)?,
                None => break,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncWriteExt, BufReader};

    use super::*;

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_renders_each_line() {
        let mut session = Session::new(&CalciConfig::default(), Vec::new());
        let script = "1+2\n{Enter}\n[C]\n";
        session.run(BufReader::new(script.as_bytes())).await.unwrap();
        assert_eq!(output(session), "1+2\n3\n\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyboard_and_buttons_mix() {
        let mut session = Session::new(&CalciConfig::default(), Vec::new());
        let script = "[5][*]-{Backspace}[-]3[=]\n";
        session.run(BufReader::new(script.as_bytes())).await.unwrap();
        assert_eq!(output(session), "-15\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_flash_clears_after_delay() {
        let mut session = Session::new(&CalciConfig::default(), Vec::new());
        session
            .run(BufReader::new("5/0{Enter}\n".as_bytes()))
            .await
            .unwrap();
        assert_eq!(output(session), "Error\n\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_during_flash_is_kept() {
        let (mut writer, reader) = tokio::io::duplex(64);
        tokio::spawn(async move {
            writer.write_all(b"5*0/0=\n").await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
            writer.write_all(b"7\n").await.unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
        });

        let mut session = Session::new(&CalciConfig::default(), Vec::new());
        session.run(BufReader::new(reader)).await.unwrap();
        assert_eq!(session.calculator().display(), "7");
        assert_eq!(output(session), "Error\n7\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_marker() {
        let config = CalciConfig {
            flash_delay_ms: 10,
            error_marker: "Err".to_string(),
        };
        let mut session = Session::new(&config, Vec::new());
        session.handle_line("5*/").unwrap();
        session.handle_line("{Enter}").unwrap();
        assert_eq!(session.calculator().display(), "Err");

        session.run(BufReader::new(&b""[..])).await.unwrap();
        assert_eq!(session.calculator().display(), "");
        assert_eq!(output(session), "5/\nErr\n\n");
    }
}
