use url::Url;

pub const DEFAULT_TRUNCATE_LENGTH: usize = 100;
const ELLIPSIS: &str = "...";

const CREDIBLE_THRESHOLD: f64 = 0.7;
const SOMEWHAT_CREDIBLE_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Credible,
    SomewhatCredible,
    NotCredible,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Credible => "Credible",
            Category::SomewhatCredible => "Somewhat Credible",
            Category::NotCredible => "Not Credible",
        }
    }
}

/// Three-way classification of a score, shared by every presentation facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    /// Bands are inclusive on their lower bound. NaN lands in `Low`.
    pub fn of(score: f64) -> Self {
        if score >= CREDIBLE_THRESHOLD {
            ScoreBand::High
        } else if score >= SOMEWHAT_CREDIBLE_THRESHOLD {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn category(self) -> Category {
        match self {
            ScoreBand::High => Category::Credible,
            ScoreBand::Medium => Category::SomewhatCredible,
            ScoreBand::Low => Category::NotCredible,
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            ScoreBand::High => "text-green-400",
            ScoreBand::Medium => "text-yellow-400",
            ScoreBand::Low => "text-red-400",
        }
    }

    pub fn background_class(self) -> &'static str {
        match self {
            ScoreBand::High => "bg-green-500/20",
            ScoreBand::Medium => "bg-yellow-500/20",
            ScoreBand::Low => "bg-red-500/20",
        }
    }

    pub fn gradient_class(self) -> &'static str {
        match self {
            ScoreBand::High => "from-green-500 to-green-400",
            ScoreBand::Medium => "from-yellow-500 to-yellow-400",
            ScoreBand::Low => "from-red-500 to-red-400",
        }
    }
}

/// Integer percentage, e.g. `0.931` -> `"93%"`.
pub fn format_score(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

pub fn category_of(score: f64) -> Category {
    ScoreBand::of(score).category()
}

pub fn color_class_of(score: f64) -> &'static str {
    ScoreBand::of(score).color_class()
}

pub fn background_class_of(score: f64) -> &'static str {
    ScoreBand::of(score).background_class()
}

pub fn gradient_class_of(score: f64) -> &'static str {
    ScoreBand::of(score).gradient_class()
}

/// True when `url` parses as an absolute URL with an authority part.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.has_host(),
        Err(_) => false,
    }
}

/// Keeps the first `max_length` characters and appends an ellipsis when cut.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}
