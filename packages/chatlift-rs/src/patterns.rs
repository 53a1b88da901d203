//! Precompiled date and time grammars shared by the lookahead matchers.
use regex::Regex;
use std::sync::OnceLock;

const DAY: &str = r"(?:0?[1-9]|[12][0-9]|3[01])";
const YEAR: &str = r"(?:19|20)\d{2}";
const MONTH: &str = r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec|January|February|March|April|May|June|July|August|September|October|November|December)";
const TIME_CORE: &str = r"(?:0?[1-9]|1[0-2])[:.][0-5]\d";
const MERIDIEM: &str = r"[AaPp][Mm]";

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Anchored patterns; every field matches a whole token or nothing.
#[derive(Debug, Clone)]
pub struct Patterns {
    pub day: Regex,
    pub year: Regex,
    pub month: Regex,
    pub full_date: Regex,
    pub day_month: Regex,
    pub month_year: Regex,
    pub time_full: Regex,
    pub time_core: Regex,
    pub meridiem: Regex,
    time_split: Regex,
}

impl Patterns {
    pub fn compile() -> Result<Self, regex::Error> {
        let anchored = |body: String| Regex::new(&format!("^{}$", body));
        Ok(Self {
            day: anchored(DAY.to_string())?,
            year: anchored(YEAR.to_string())?,
            month: anchored(MONTH.to_string())?,
            full_date: anchored(format!(r"{}\s+{}\s+{}", DAY, MONTH, YEAR))?,
            day_month: anchored(format!(r"{}\s+{}", DAY, MONTH))?,
            month_year: anchored(format!(r"{}\s+{}", MONTH, YEAR))?,
            time_full: anchored(format!(r"{}\s*{}", TIME_CORE, MERIDIEM))?,
            time_core: anchored(TIME_CORE.to_string())?,
            meridiem: anchored(MERIDIEM.to_string())?,
            time_split: anchored(format!(r"(.+?)({})?", MERIDIEM))?,
        })
    }

    /// Process-wide instance, compiled on first use.
    pub fn get() -> &'static Patterns {
        PATTERNS.get_or_init(|| Self::compile().expect("built-in date/time patterns are valid"))
    }

    /// `"3:45pm"` -> `"3:45 PM"`, `"9:30"` -> `"9:30"`. Expects spaces already stripped.
    pub fn normalize_time(&self, compact: &str) -> String {
        match self.time_split.captures(compact) {
            Some(caps) => {
                let core = caps.get(1).map_or("", |m| m.as_str());
                match caps.get(2) {
                    Some(suffix) => format!("{} {}", core, suffix.as_str().to_uppercase()),
                    None => core.to_string(),
                }
            }
            None => compact.to_string(),
        }
    }
}
