//! The five command patterns, tried in a fixed order. `end` is checked
//! before plain identifier substitution on purpose: `$(end)` would
//! otherwise also satisfy the substitution pattern as a variable literally
//! named `end`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref END: Regex = Regex::new(r"^end\)").unwrap();
    pub static ref SUBSTITUTE: Regex = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\)").unwrap();
    pub static ref IF: Regex = Regex::new(r"^if\s+([A-Za-z_][A-Za-z0-9_]*)\)").unwrap();
    pub static ref FOR: Regex =
        Regex::new(r"^for\s+([A-Za-z_][A-Za-z0-9_]*)\s+in\s+([A-Za-z_][A-Za-z0-9_]*)\)").unwrap();
    pub static ref INCLUDE: Regex = Regex::new(r"^include ([^)]+)\)").unwrap();
}
