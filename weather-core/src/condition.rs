//! Maps OpenWeather condition codes to a display category.
//!
//! See <https://openweathermap.org/weather-conditions#Weather-Condition-Codes-2>.

/// Fixed palette the presenter knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    Red,
    Cyan,
    Blue,
    DarkGray,
    Green,
    Yellow,
    White,
    Magenta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Cloudy,
    /// Codes the table does not know, e.g. ones added upstream later.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayParams {
    pub condition: Condition,
    pub symbol: &'static str,
    pub color: ColorToken,
}

const fn params(condition: Condition, symbol: &'static str, color: ColorToken) -> DisplayParams {
    DisplayParams { condition, symbol, color }
}

/// `(lower inclusive, upper exclusive, params)`, scanned in order.
const CONDITION_TABLE: [(i64, i64, DisplayParams); 7] = [
    (200, 300, params(Condition::Thunderstorm, "💥", ColorToken::Red)),
    (300, 400, params(Condition::Drizzle, "💧", ColorToken::Cyan)),
    (500, 600, params(Condition::Rain, "💦", ColorToken::Blue)),
    (600, 700, params(Condition::Snow, "⛄️", ColorToken::DarkGray)),
    (700, 800, params(Condition::Atmosphere, "🌀", ColorToken::Green)),
    (800, 801, params(Condition::Clear, "🔆", ColorToken::Yellow)),
    (801, 900, params(Condition::Cloudy, "💨", ColorToken::White)),
];

const FALLBACK: DisplayParams = params(Condition::Unknown, "🌈", ColorToken::Magenta);

/// Total over all integers; anything outside the table gets [`FALLBACK`].
pub fn classify(code: i64) -> DisplayParams {
    CONDITION_TABLE
        .iter()
        .find(|(lo, hi, _)| (*lo..*hi).contains(&code))
        .map_or(FALLBACK, |(_, _, params)| *params)
}
