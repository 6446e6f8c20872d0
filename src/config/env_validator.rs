//! Environment variable validation with helpful error messages
//!
//! Invalid values produce a warning (with a typo suggestion when the variable
//! takes one of a fixed set of values) and fall back to the current setting.

use std::io::Write;

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    /// Validator for a variable restricted to `valid_values`
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Validator for a free-form integer variable
    pub fn integer(var_name: &'a str) -> Self {
        Self::new(var_name, &[])
    }

    /// Parse a value, returning `fallback` if invalid (warning on stderr)
    pub fn parse<T, F>(&self, value: &str, parser: F, fallback: T) -> T
    where
        F: Fn(&str) -> Option<T>,
    {
        self.parse_with_writer(value, parser, fallback, &mut std::io::stderr())
    }

    /// Parse with a custom writer (for testing)
    pub fn parse_with_writer<T, F, W>(
        &self,
        value: &str,
        parser: F,
        fallback: T,
        writer: &mut W,
    ) -> T
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        match parser(value) {
            Some(parsed) => parsed,
            None => {
                let _ = writeln!(
                    writer,
                    "Warning: Invalid {} value '{}'{}",
                    self.var_name,
                    value,
                    self.suggest(value)
                );
                if self.valid_values.is_empty() {
                    let _ = writeln!(writer, "Expected an integer");
                } else {
                    let _ = writeln!(writer, "Valid values: {}", self.valid_values.join(", "));
                }
                fallback
            }
        }
    }

    fn suggest(&self, value: &str) -> String {
        match closest(&value.to_lowercase(), self.valid_values) {
            Some(suggested) => format!(". Did you mean '{}'?", suggested),
            None => String::new(),
        }
    }
}

/// Closest candidate within two edits, excluding exact matches.
pub fn closest<'c>(input: &str, candidates: &[&'c str]) -> Option<&'c str> {
    let mut best: Option<(&str, usize)> = None;
    for &candidate in candidates {
        let dist = levenshtein(input, candidate);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((candidate, dist)),
        }
    }

    match best {
        Some((candidate, dist)) if dist <= 2 && dist > 0 => Some(candidate),
        _ => None,
    }
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b.len() + 1];

    for (i, a_char) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Parse a boolean-ish flag value (`1`, `true`, `yes`, `on`, and their negations).
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
