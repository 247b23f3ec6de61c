//! Grok-style format compilation for free-text operational messages.
//!
//! A format's pattern contains `{NAME}` placeholders drawn from a closed
//! base-pattern table; expansion is one-pass and the resulting regexes
//! are compiled once behind the format set's `LazyLock`. Matching walks
//! the formats in declaration order — the order encodes specificity and
//! is behaviourally significant.

use std::collections::BTreeMap;

use regex::Regex;

use crate::registry::FormatTrace;

/// The base sub-pattern table. Names are replaced wherever `{NAME}`
/// appears in a format pattern; regex repetition braces survive because
/// they never spell a known name.
pub const BASE_PATTERNS: &[(&str, &str)] = &[
    ("ICAO", r"[A-Z]{4}"),
    ("IATA", r"[A-Z]{3}"),
    ("FLIGHT", r"[A-Z]{2,3}[0-9]{1,4}[A-Z]?"),
    ("SQUAWK", r"[0-7]{4}"),
    ("RUNWAY", r"[0-9]{2}[LRC]?"),
    ("ALTITUDE", r"[0-9]{3,5}"),
    ("FREQ", r"1[0-9]{2}\.[0-9]{1,3}"),
    ("AIRCRAFT", r"[A-Z][A-Z0-9]{2,3}"),
    ("SID", r"[A-Z]{2,6}[0-9][A-Z]?"),
    ("TIME4", r"[0-2][0-9][0-5][0-9]"),
    ("DATE", r"[0-9]{1,2}[A-Z]{3}[0-9]{2}"),
    ("PDCNUM", r"[0-9]{6}"),
    ("REGISTRATION", r"[A-Z0-9]{1,3}-[A-Z0-9]{1,5}|N[0-9]{1,5}[A-Z]{0,2}"),
];

/// Expand every `{NAME}` in `pattern` from [`BASE_PATTERNS`].
///
/// Single-pass: replacement text is emitted verbatim, never re-scanned,
/// so base patterns may safely contain braces of their own. Unknown
/// names (including repetition counts like `{2,3}`) pass through
/// untouched.
pub fn expand(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match BASE_PATTERNS.iter().find(|(n, _)| *n == name) {
                    Some((_, replacement)) => out.push_str(replacement),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

/// Weight unit tag for loadsheet formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    /// Integer kilograms.
    Kg,
    /// Metric tonnes (float, ×1000).
    Tonnes,
    /// Pounds (float, ×0.453592).
    Lb,
}

impl WeightUnit {
    /// Normalise a raw captured weight to integer kilograms.
    pub fn to_kg(self, raw: f64) -> i64 {
        match self {
            WeightUnit::Kg => raw.round() as i64,
            WeightUnit::Tonnes => (raw * 1000.0).round() as i64,
            WeightUnit::Lb => (raw * 0.453_592).round() as i64,
        }
    }
}

/// A format declaration: name, grok pattern, expected capture fields,
/// and (for loadsheets) the labels and weight unit it applies to.
pub struct FormatDef {
    /// The format name surfaced in results.
    pub name: &'static str,
    /// The unexpanded grok pattern.
    pub pattern: &'static str,
    /// The named capture groups the pattern binds.
    pub fields: &'static [&'static str],
    /// ACARS labels the format applies to; empty means any.
    pub labels: &'static [&'static str],
    /// Weight unit for loadsheet formats.
    pub unit: Option<WeightUnit>,
}

/// A compiled format, cached for the process lifetime.
pub struct CompiledFormat {
    /// The format name.
    pub name: &'static str,
    /// The expanded, compiled regex.
    pub regex: Regex,
    /// The declared capture fields.
    pub fields: &'static [&'static str],
    /// Label gate.
    pub labels: &'static [&'static str],
    /// Weight unit tag.
    pub unit: Option<WeightUnit>,
}

impl CompiledFormat {
    /// `true` when the format applies to the given ACARS label.
    pub fn applies_to_label(&self, label: &str) -> bool {
        self.labels.is_empty() || self.labels.contains(&label)
    }
}

/// Compile a format set. Called once from each format family's
/// `LazyLock` initialiser; compilation is pure, so test isolation holds.
pub fn compile(defs: &'static [FormatDef]) -> Vec<CompiledFormat> {
    defs.iter()
        .map(|def| {
            let expanded = expand(def.pattern);
            let regex = Regex::new(&expanded)
                .unwrap_or_else(|e| panic!("format {} failed to compile: {e}", def.name));
            CompiledFormat {
                name: def.name,
                regex,
                fields: def.fields,
                labels: def.labels,
                unit: def.unit,
            }
        })
        .collect()
}

/// A successful format match.
pub struct GrokMatch<'f> {
    /// The format that matched.
    pub format: &'f CompiledFormat,
    /// Named captures, keyed by group name.
    pub captures: BTreeMap<String, String>,
}

fn capture_map(format: &CompiledFormat, caps: &regex::Captures<'_>) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for name in format.regex.capture_names().flatten() {
        if let Some(value) = caps.name(name) {
            map.insert(name.to_string(), value.as_str().to_string());
        }
    }
    map
}

/// Walk `formats` in declaration order and return the first match.
pub fn match_text<'f>(formats: &'f [CompiledFormat], text: &str) -> Option<GrokMatch<'f>> {
    formats.iter().find_map(|format| {
        format.regex.captures(text).map(|caps| GrokMatch {
            format,
            captures: capture_map(format, &caps),
        })
    })
}

/// Like [`match_text`] but records one trace entry per attempted format.
pub fn match_text_traced<'f>(
    formats: &'f [CompiledFormat],
    text: &str,
) -> (Option<GrokMatch<'f>>, Vec<FormatTrace>) {
    let mut traces = Vec::with_capacity(formats.len());
    let mut matched = None;
    for format in formats {
        if matched.is_some() {
            break;
        }
        match format.regex.captures(text) {
            Some(caps) => {
                let captures = capture_map(format, &caps);
                traces.push(FormatTrace {
                    format: format.name.to_string(),
                    pattern: Some(format.regex.as_str().to_string()),
                    matched: true,
                    captures: captures
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                });
                matched = Some(GrokMatch { format, captures });
            }
            None => traces.push(FormatTrace {
                format: format.name.to_string(),
                pattern: Some(format.regex.as_str().to_string()),
                matched: false,
                captures: Vec::new(),
            }),
        }
    }
    (matched, traces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_replaces_known_names() {
        assert_eq!(expand("{SQUAWK}"), "[0-7]{4}");
        assert_eq!(
            expand(r"SQUAWK (?P<squawk>{SQUAWK})"),
            r"SQUAWK (?P<squawk>[0-7]{4})"
        );
    }

    #[test]
    fn expansion_leaves_repetition_braces() {
        assert_eq!(expand(r"[A-Z]{2,3}"), r"[A-Z]{2,3}");
        assert_eq!(expand(r"{UNKNOWN}"), r"{UNKNOWN}");
        assert_eq!(expand(r"dangling {brace"), r"dangling {brace");
    }

    #[test]
    fn expansion_is_single_pass() {
        // The ICAO replacement contains `{4}`, which must not be
        // re-scanned for names.
        let expanded = expand(r"(?P<origin>{ICAO})");
        assert_eq!(expanded, r"(?P<origin>[A-Z]{4})");
    }

    #[test]
    fn weight_conversions() {
        assert_eq!(WeightUnit::Kg.to_kg(39_754.0), 39_754);
        assert_eq!(WeightUnit::Tonnes.to_kg(39.754), 39_754);
        assert_eq!(WeightUnit::Lb.to_kg(1000.0), 454);
    }

    #[test]
    fn declaration_order_wins() {
        static DEFS: &[FormatDef] = &[
            FormatDef {
                name: "specific",
                pattern: r"^A (?P<x>[0-9]+) B$",
                fields: &["x"],
                labels: &[],
                unit: None,
            },
            FormatDef {
                name: "generic",
                pattern: r"A (?P<x>[0-9]+)",
                fields: &["x"],
                labels: &[],
                unit: None,
            },
        ];
        let compiled = compile(DEFS);
        let matched = match_text(&compiled, "A 42 B").unwrap();
        assert_eq!(matched.format.name, "specific");
        assert_eq!(matched.captures["x"], "42");

        let matched = match_text(&compiled, "A 42 C").unwrap();
        assert_eq!(matched.format.name, "generic");
    }

    #[test]
    fn traced_match_records_attempts() {
        static DEFS: &[FormatDef] = &[
            FormatDef {
                name: "never",
                pattern: r"^ZZZ$",
                fields: &[],
                labels: &[],
                unit: None,
            },
            FormatDef {
                name: "hit",
                pattern: r"(?P<flight>{FLIGHT})",
                fields: &["flight"],
                labels: &[],
                unit: None,
            },
        ];
        let compiled = compile(DEFS);
        let (matched, traces) = match_text_traced(&compiled, "JST501");
        assert!(matched.is_some());
        assert_eq!(traces.len(), 2);
        assert!(!traces[0].matched);
        assert!(traces[1].matched);
        assert_eq!(traces[1].captures[0], ("flight".into(), "JST501".into()));
    }
}
