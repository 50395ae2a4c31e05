use once_cell::sync::Lazy;
use regex::Regex;

static HHMM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{2}:\d{2}").unwrap());

/// Work schedule extracted from the free-text "Horário" column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub clock_in: String,
    pub lunch_out: String,
    pub lunch_in: String,
    pub clock_out: String,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            clock_in: "08:00".to_string(),
            lunch_out: "12:00".to_string(),
            lunch_in: "13:00".to_string(),
            clock_out: "18:00".to_string(),
        }
    }
}

impl Schedule {
    /// The lunch break rendered the way timesheets display it.
    pub fn break_window(&self) -> String {
        format!("{} às {}", self.lunch_out, self.lunch_in)
    }
}

/// Pulls the first four HH:MM tokens out of a free-text schedule, in order:
/// clock-in, lunch-out, lunch-in, clock-out. Anything short of four tokens
/// falls back to the standard 08:00/12:00/13:00/18:00 shift.
pub fn parse(text: &str) -> Schedule {
    let times: Vec<&str> = HHMM.find_iter(text).map(|m| m.as_str()).collect();
    if times.len() >= 4 {
        Schedule {
            clock_in: times[0].to_string(),
            lunch_out: times[1].to_string(),
            lunch_in: times[2].to_string(),
            clock_out: times[3].to_string(),
        }
    } else {
        Schedule::default()
    }
}
