//! Terminal display and UI rendering
//!
//! Features:
//! - Current note, target string and countdown bar
//! - Answer reveal and response prompt
//! - Settings line (difficulty, strings, sound)
//! - Per-string accuracy breakdown and end-of-game summary

use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};

use crate::fretboard::StringId;
use crate::session::{Challenge, Score, SessionSnapshot};

/// Width of the countdown bar in cells
const BAR_WIDTH: usize = 24;

/// Shown under the ready prompt, between the header and the settings rule
const PRACTICE_TIPS: [&str; 5] = [
    "Start with beginner mode to learn note positions",
    "Focus on one or two strings at first",
    "Use a metronome while practicing",
    "Try to visualize the fretboard in your mind",
    "Practice regularly for better muscle memory",
];

/// Format whole seconds as m:ss
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Filled/empty countdown bar for an elapsed share 0.0..=1.0
pub fn countdown_bar(progress: f32) -> String {
    let filled = ((1.0 - progress.clamp(0.0, 1.0)) * BAR_WIDTH as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn accuracy_color(accuracy: u32) -> Color {
    if accuracy >= 90 {
        Color::Green
    } else if accuracy >= 75 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Terminal display manager
pub struct Display {
    /// Whether we're using alternate screen
    use_alternate_screen: bool,
}

impl Display {
    /// Take over the whole terminal with the alternate screen
    pub fn fullscreen() -> Result<Self, Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(Display {
            use_alternate_screen: true,
        })
    }

    /// Clear screen
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Title and running score
    pub fn show_header(&self, snapshot: &SessionSnapshot) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Cyan),
            Print("🎸 Fretboard Trainer"),
            ResetColor,
            Print(format!(
                "   Score: {}/{} ",
                snapshot.correct, snapshot.total
            )),
            SetForegroundColor(accuracy_color(snapshot.accuracy)),
            Print(format!("({}%)", snapshot.accuracy)),
            ResetColor,
            Print("\n")
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Prompt shown before the first challenge
    pub fn show_ready(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            SetForegroundColor(Color::DarkGrey),
            Print("Ready to practice? Press SPACE to start.\n"),
            ResetColor,
            cursor::MoveTo(0, 3),
            SetForegroundColor(Color::Yellow),
            Print("💡 Practice Tips\n"),
            ResetColor
        )?;

        for (row, tip) in (4u16..).zip(PRACTICE_TIPS) {
            execute!(stdout, cursor::MoveTo(0, row), Print(format!("• {}\n", tip)))?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Target note, string and countdown
    pub fn show_challenge(&self, challenge: &Challenge) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        let remaining = 1.0 - challenge.progress();
        let bar_color = if remaining > 0.5 {
            Color::Green
        } else if remaining > 0.25 {
            Color::Yellow
        } else {
            Color::Red
        };

        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            Print("Note: "),
            SetForegroundColor(Color::Magenta),
            Print(format!("{}\n", challenge.pitch)),
            ResetColor,
            cursor::MoveTo(0, 3),
            Print(format!("Play on {}\n", challenge.string.display_name())),
            cursor::MoveTo(0, 4),
            SetForegroundColor(bar_color),
            Print(countdown_bar(challenge.progress())),
            ResetColor,
            Print(format!(" {}s\n", challenge.countdown)),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Where the note was
    pub fn show_answer(&self, challenge: &Challenge) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 6),
            SetForegroundColor(Color::Yellow),
            Print("Answer: "),
            ResetColor,
            Print(challenge.answer_text()),
            Print(if challenge.fret == 0 {
                " (Open string)\n"
            } else {
                "\n"
            }),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Self-assessment keys, shown while a response is awaited
    pub fn show_response_prompt(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 7),
            SetForegroundColor(Color::Green),
            Print("[y] Got it!"),
            ResetColor,
            Print("   "),
            SetForegroundColor(Color::Red),
            Print("[n] Missed it\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Difficulty, selected strings and sound
    pub fn show_settings(
        &self,
        snapshot: &SessionSnapshot,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 9),
            SetForegroundColor(Color::Blue),
            Print("─".repeat(50)),
            Print("\n"),
            ResetColor,
            cursor::MoveTo(0, 10),
            Print(format!(
                "Difficulty: {}   Sound: {}\n",
                snapshot.difficulty.label(),
                if snapshot.audio_enabled { "on" } else { "off" }
            )),
            cursor::MoveTo(0, 11),
            Print("Strings: ")
        )?;

        for string in StringId::ALL {
            let selected = snapshot.selected_strings.contains(&string);
            execute!(
                stdout,
                SetForegroundColor(if selected {
                    Color::Cyan
                } else {
                    Color::DarkGrey
                }),
                Print(format!(
                    "[{}] {}  ",
                    if selected { 'x' } else { ' ' },
                    string.number()
                )),
                ResetColor
            )?;
        }

        execute!(stdout, Print("\n"))?;
        stdout.flush()?;
        Ok(())
    }

    /// Show per-string accuracy breakdown (6 strings)
    pub fn show_string_stats(&self, score: &Score) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 12),
            SetForegroundColor(Color::Magenta),
            Print("Per-String Accuracy: "),
            ResetColor
        )?;

        for string in StringId::ALL {
            match score.string_accuracy(string) {
                Some(acc) => execute!(
                    stdout,
                    Print(format!("{}: ", string.number())),
                    SetForegroundColor(accuracy_color(acc)),
                    Print(format!("{}% ", acc)),
                    ResetColor
                )?,
                None => execute!(
                    stdout,
                    SetForegroundColor(Color::DarkGrey),
                    Print(format!("{}: - ", string.number())),
                    ResetColor
                )?,
            }
        }

        execute!(stdout, Print("\n"))?;
        stdout.flush()?;
        Ok(())
    }

    /// Inline notice for rejected actions
    pub fn show_notice(&self, notice: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 14),
            SetForegroundColor(Color::Red),
            Print(format!("⚠ {}\n", notice)),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// End-of-game summary
    pub fn show_summary(
        &self,
        score: &Score,
        duration_secs: u64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            SetForegroundColor(Color::Cyan),
            Print("🎉 Game Complete!\n"),
            ResetColor,
            cursor::MoveTo(0, 3),
            Print(format!(
                "Correct: {}  |  Total: {}  |  Accuracy: ",
                score.correct(),
                score.total()
            )),
            SetForegroundColor(accuracy_color(score.accuracy())),
            Print(format!("{}%", score.accuracy())),
            ResetColor,
            Print(format!("  |  Duration: {}\n", format_time(duration_secs))),
            cursor::MoveTo(0, 4),
            Print(format!("{}\n", score.feedback())),
        )?;

        let weak = score.weak_strings();
        if !weak.is_empty() {
            let names: Vec<&str> = weak.iter().map(|s| s.display_name()).collect();
            execute!(
                stdout,
                cursor::MoveTo(0, 5),
                SetForegroundColor(Color::Yellow),
                Print(format!("Weak strings: {}\n", names.join(", "))),
                ResetColor
            )?;
        }

        let problems = score.problem_notes();
        if !problems.is_empty() {
            let notes: Vec<String> = problems
                .iter()
                .map(|((string, pitch), misses)| {
                    format!("{} on {} (x{})", pitch, string.number(), misses)
                })
                .collect();
            execute!(
                stdout,
                cursor::MoveTo(0, 6),
                SetForegroundColor(Color::Red),
                Print(format!("Problem notes: {}\n", notes.join(", "))),
                ResetColor
            )?;
        }

        execute!(
            stdout,
            cursor::MoveTo(0, 7),
            SetForegroundColor(Color::DarkGrey),
            Print("Press ENTER or G to start a new game\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Show help text
    pub fn show_help(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 16),
            SetForegroundColor(Color::DarkGrey),
            Print("SPACE next  |  a answer  |  y/n got it/missed  |  1-6 strings  |  0 all\n"),
            cursor::MoveTo(0, 17),
            Print("d difficulty  |  s sound  |  r replay  |  x reset score  |  e end  |  Esc quit\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        if self.use_alternate_screen {
            execute!(stdout, LeaveAlternateScreen, cursor::Show,)?;
        }

        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
