pub const BAR_WIDTH: usize = 30;
pub const BAR_FILLED: char = '█';
pub const BAR_EMPTY: char = '░';

pub const ANSI_GREEN: &str = "\x1b[32m";
pub const ANSI_YELLOW: &str = "\x1b[33m";
pub const ANSI_RED: &str = "\x1b[31m";
pub const ANSI_DIM: &str = "\x1b[2m";
pub const ANSI_RESET: &str = "\x1b[0m";

pub const NO_ISSUES_TITLE: &str = "No Issues Detected";
pub const NO_ISSUES_MESSAGE: &str = "Our analysis didn't find any potentially misleading content.";
pub const SEGMENT_TITLE: &str = "Potentially Misleading";
