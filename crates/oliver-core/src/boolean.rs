use std::fmt;

/// A fuzzy boolean: a weighted term. The weight is the certainty threshold
/// at or above which the term counts as true. Both components are bound to
/// [0, 1]; the undefined form carries NaN in both.
#[derive(Debug, Clone, Copy)]
pub struct Boolean {
    term: f64,
    weight: f64,
}

impl Boolean {
    pub fn new(truth: bool) -> Boolean {
        Boolean {
            term: if truth { 1.0 } else { 0.0 },
            weight: 1.0,
        }
    }

    /// A weighted term. Components outside [0, 1] become NaN.
    pub fn weighted(term: f64, weight: f64) -> Boolean {
        let clamp = |x: f64| if (0.0..=1.0).contains(&x) { x } else { f64::NAN };
        Boolean {
            term: clamp(term),
            weight: clamp(weight),
        }
    }

    pub fn undefined() -> Boolean {
        Boolean {
            term: f64::NAN,
            weight: f64::NAN,
        }
    }

    /// Recognise a boolean literal word, case-insensitively.
    pub fn from_word(word: &str) -> Option<Boolean> {
        match word.to_ascii_uppercase().as_str() {
            "TRUE" | "1" => Some(Boolean::new(true)),
            "FALSE" | "0" => Some(Boolean::new(false)),
            "UNDEF" | "UNDEFINED" => Some(Boolean::undefined()),
            _ => None,
        }
    }

    pub fn term(&self) -> f64 {
        self.term
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Truthy iff the term meets its weight. NaN components compare false.
    pub fn is_true(&self) -> bool {
        self.term >= self.weight
    }

    pub fn is_undefined(&self) -> bool {
        self.term.is_nan()
    }

    /// Compare by truth value: 0 equal, ±1 ordered false < true.
    pub fn compare(&self, other: &Boolean) -> f64 {
        let p = self.is_true();
        let q = other.is_true();
        if p == q {
            0.0
        } else if p {
            1.0
        } else {
            -1.0
        }
    }
}

impl Default for Boolean {
    fn default() -> Boolean {
        Boolean::new(false)
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            write!(f, "undefined")
        } else if self.is_true() {
            write!(f, "true")
        } else {
            write!(f, "false")
        }
    }
}
