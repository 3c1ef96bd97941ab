//! Human-friendly terminal output.

use std::io::{self, Write};

use colored::{Color, ColoredString, Colorize};
use weather_core::{ColorToken, DisplayParams, Units, WeatherRecord};

/// Renders a [`WeatherRecord`] as one colored line.
#[derive(Debug, Clone)]
pub struct Presenter {
    padding: usize,
}

impl Presenter {
    /// Prepares the terminal for ANSI output. Call once, before printing.
    pub fn new(padding: usize) -> Self {
        enable_ansi();
        Self { padding }
    }

    /// City name centered in reverse video.
    pub fn city(&self, record: &WeatherRecord) -> ColoredString {
        let width = self.padding;
        format!("{:^width$}", record.city_name).reversed()
    }

    /// Symbol and capitalized description in the category color.
    pub fn condition(&self, record: &WeatherRecord, display: DisplayParams) -> ColoredString {
        let width = self.padding;
        format!(
            "{} {:^width$}",
            display.symbol,
            capitalize(&record.condition_description)
        )
        .color(color_for(display.color))
    }

    /// `<city>\t<symbol> <Description> (<temp>°C)`. The temperature keeps
    /// one decimal at least, so `22.0` stays `22.0`.
    pub fn render(&self, record: &WeatherRecord, units: Units, display: DisplayParams) -> String {
        format!(
            "{}\t{} ({:?}°{})",
            self.city(record),
            self.condition(record, display),
            record.temperature,
            units.temperature_symbol()
        )
    }

    pub fn present(
        &self,
        out: &mut impl Write,
        record: &WeatherRecord,
        units: Units,
        display: DisplayParams,
    ) -> io::Result<()> {
        writeln!(out, "{}", self.render(record, units, display))
    }
}

#[cfg(windows)]
fn enable_ansi() {
    let _ = colored::control::set_virtual_terminal(true);
}

#[cfg(not(windows))]
fn enable_ansi() {}

fn color_for(token: ColorToken) -> Color {
    match token {
        ColorToken::Red => Color::Red,
        ColorToken::Cyan => Color::Cyan,
        ColorToken::Blue => Color::Blue,
        ColorToken::DarkGray => Color::BrightBlack,
        ColorToken::Green => Color::Green,
        ColorToken::Yellow => Color::Yellow,
        ColorToken::White => Color::White,
        ColorToken::Magenta => Color::Magenta,
    }
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
