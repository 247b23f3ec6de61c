//! The parser registry and dispatch engine.
//!
//! Parsers are indexed by ACARS label, with content-based parsers in a
//! global list and last-resort parsers in a catch-all list. Dispatch
//! runs each candidate's cheap [`MessageParser::quick_check`] before the
//! expensive parse and collects every non-empty result, so one message
//! can yield several results of different types.

use std::collections::HashMap;
use std::sync::Arc;

use flightwire_models::{AcarsMessage, ParserResult};
use tracing::debug;

// ---------------------------------------------------------------------------
// MessageParser
// ---------------------------------------------------------------------------

/// One attempted format within a traced parse.
#[derive(Debug, Clone)]
pub struct FormatTrace {
    /// The format or sub-pattern that was attempted.
    pub format: String,
    /// The compiled pattern text, when the parser is regex-based.
    pub pattern: Option<String>,
    /// Whether it matched.
    pub matched: bool,
    /// Captured fields on a match.
    pub captures: Vec<(String, String)>,
}

/// The contract every parser implements.
///
/// `parse` must never panic; a parser that cannot handle a message
/// returns `None` and dispatch moves on.
pub trait MessageParser: Send + Sync {
    /// Stable parser name, used in stats and traces.
    fn name(&self) -> &'static str;

    /// ACARS labels this parser serves. Empty means content-based — the
    /// parser is offered every message.
    fn labels(&self) -> &'static [&'static str] {
        &[]
    }

    /// Dispatch priority; smaller runs earlier.
    fn priority(&self) -> i32;

    /// Cheap pre-check using only substring tests.
    fn quick_check(&self, text: &str) -> bool;

    /// The expensive parse.
    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult>;

    /// Traced parse for debugging: which sub-patterns fired.
    ///
    /// The default implementation runs the plain parse with no trace
    /// records.
    fn parse_with_trace(&self, msg: &AcarsMessage) -> (Option<ParserResult>, Vec<FormatTrace>) {
        (self.parse(msg), Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

type ParserRef = Arc<dyn MessageParser>;

/// Label- and content-indexed parser set.
#[derive(Default)]
pub struct Registry {
    by_label: HashMap<String, Vec<ParserRef>>,
    global: Vec<ParserRef>,
    catch_all: Vec<ParserRef>,
    sorted: bool,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parser under its labels, or globally when it declares
    /// none.
    pub fn register(&mut self, parser: ParserRef) {
        let labels = parser.labels();
        if labels.is_empty() {
            self.global.push(parser);
        } else {
            for label in labels {
                self.by_label
                    .entry((*label).to_string())
                    .or_default()
                    .push(Arc::clone(&parser));
            }
        }
        self.sorted = false;
    }

    /// Register a last-resort parser, run only when nothing else matched.
    pub fn register_catch_all(&mut self, parser: ParserRef) {
        self.catch_all.push(parser);
        self.sorted = false;
    }

    /// Sort every list by ascending priority, keeping registration order
    /// for equal priorities. Idempotent; dispatch calls it lazily.
    pub fn sort(&mut self) {
        if self.sorted {
            return;
        }
        for parsers in self.by_label.values_mut() {
            parsers.sort_by_key(|p| p.priority());
        }
        self.global.sort_by_key(|p| p.priority());
        self.catch_all.sort_by_key(|p| p.priority());
        self.sorted = true;
    }

    /// Run every matching parser over `msg` and collect the results in
    /// encounter order.
    pub fn dispatch(&mut self, msg: &AcarsMessage) -> Vec<ParserResult> {
        self.sort();
        let mut results = Vec::new();

        if let Some(parsers) = self.by_label.get(&msg.label) {
            run_parsers(parsers, msg, &mut results, false);
        }
        run_parsers(&self.global, msg, &mut results, false);

        if results.is_empty() {
            run_parsers(&self.catch_all, msg, &mut results, true);
        }
        results
    }

    /// Like [`dispatch`](Self::dispatch) but short-circuits after the
    /// first non-empty result.
    pub fn dispatch_first(&mut self, msg: &AcarsMessage) -> Option<ParserResult> {
        self.sort();

        let label_parsers = self.by_label.get(&msg.label).map(Vec::as_slice);
        let candidates = label_parsers
            .unwrap_or(&[])
            .iter()
            .chain(self.global.iter());
        for parser in candidates {
            if !parser.quick_check(&msg.text) {
                continue;
            }
            if let Some(result) = parser.parse(msg) {
                return Some(result);
            }
        }
        self.catch_all.iter().find_map(|parser| parser.parse(msg))
    }

    /// Number of registered parsers, catch-alls included.
    pub fn len(&self) -> usize {
        let labelled: usize = self.by_label.values().map(Vec::len).sum();
        labelled + self.global.len() + self.catch_all.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn run_parsers(
    parsers: &[ParserRef],
    msg: &AcarsMessage,
    results: &mut Vec<ParserResult>,
    bypass_quick_check: bool,
) {
    for parser in parsers {
        if !bypass_quick_check && !parser.quick_check(&msg.text) {
            continue;
        }
        if let Some(result) = parser.parse(msg) {
            debug!(parser = parser.name(), kind = result.kind(), id = msg.id, "parser matched");
            results.push(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightwire_models::{DispatcherResult, PaxBagResult};

    struct FakeParser {
        name: &'static str,
        labels: &'static [&'static str],
        priority: i32,
        needle: &'static str,
    }

    impl MessageParser for FakeParser {
        fn name(&self) -> &'static str {
            self.name
        }
        fn labels(&self) -> &'static [&'static str] {
            self.labels
        }
        fn priority(&self) -> i32 {
            self.priority
        }
        fn quick_check(&self, text: &str) -> bool {
            text.contains(self.needle)
        }
        fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
            Some(ParserResult::Dispatcher(DispatcherResult {
                message_id: msg.id,
                from: Some(self.name.to_string()),
                text: msg.text.clone(),
            }))
        }
    }

    struct CatchAll;

    impl MessageParser for CatchAll {
        fn name(&self) -> &'static str {
            "catch_all"
        }
        fn priority(&self) -> i32 {
            1000
        }
        fn quick_check(&self, _text: &str) -> bool {
            false // catch-alls bypass the quick check entirely
        }
        fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
            Some(ParserResult::PaxBag(PaxBagResult {
                message_id: msg.id,
                ..PaxBagResult::default()
            }))
        }
    }

    fn sender(name: &'static str) -> Option<String> {
        Some(name.to_string())
    }

    #[test]
    fn multi_match_in_priority_order() {
        let mut registry = Registry::new();
        registry.register(Arc::new(FakeParser {
            name: "second",
            labels: &["RA"],
            priority: 60,
            needle: "LOADSHEET",
        }));
        registry.register(Arc::new(FakeParser {
            name: "first",
            labels: &["RA"],
            priority: 50,
            needle: "METAR",
        }));

        let msg = AcarsMessage::new(1, "RA", "LOADSHEET AND METAR");
        let results = registry.dispatch(&msg);
        assert_eq!(results.len(), 2);
        match (&results[0], &results[1]) {
            (ParserResult::Dispatcher(a), ParserResult::Dispatcher(b)) => {
                assert_eq!(a.from, sender("first"));
                assert_eq!(b.from, sender("second"));
            }
            other => panic!("unexpected results: {other:?}"),
        }
    }

    #[test]
    fn quick_check_gates_parse() {
        let mut registry = Registry::new();
        registry.register(Arc::new(FakeParser {
            name: "loadsheet",
            labels: &["RA"],
            priority: 60,
            needle: "LOADSHEET",
        }));
        let msg = AcarsMessage::new(2, "RA", "nothing relevant");
        assert!(registry.dispatch(&msg).is_empty());
    }

    #[test]
    fn catch_all_runs_only_when_nothing_matched() {
        let mut registry = Registry::new();
        registry.register(Arc::new(FakeParser {
            name: "loadsheet",
            labels: &["RA"],
            priority: 60,
            needle: "LOADSHEET",
        }));
        registry.register_catch_all(Arc::new(CatchAll));

        let unmatched = AcarsMessage::new(3, "H1", "anything");
        let results = registry.dispatch(&unmatched);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind(), "pax_bag");

        let matched = AcarsMessage::new(4, "RA", "LOADSHEET");
        let results = registry.dispatch(&matched);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind(), "dispatcher");
    }

    #[test]
    fn global_parsers_see_every_label() {
        let mut registry = Registry::new();
        registry.register(Arc::new(FakeParser {
            name: "global",
            labels: &[],
            priority: 10,
            needle: "NEEDLE",
        }));
        let msg = AcarsMessage::new(5, "ZZ", "HAS NEEDLE");
        assert_eq!(registry.dispatch(&msg).len(), 1);
    }

    #[test]
    fn dispatch_first_short_circuits() {
        let mut registry = Registry::new();
        registry.register(Arc::new(FakeParser {
            name: "first",
            labels: &["RA"],
            priority: 50,
            needle: "METAR",
        }));
        registry.register(Arc::new(FakeParser {
            name: "second",
            labels: &["RA"],
            priority: 60,
            needle: "METAR",
        }));
        let msg = AcarsMessage::new(6, "RA", "METAR YSSY");
        let result = registry.dispatch_first(&msg).unwrap();
        match result {
            ParserResult::Dispatcher(r) => assert_eq!(r.from, sender("first")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn sort_is_idempotent_and_stable() {
        let mut registry = Registry::new();
        registry.register(Arc::new(FakeParser {
            name: "a",
            labels: &["RA"],
            priority: 50,
            needle: "X",
        }));
        registry.register(Arc::new(FakeParser {
            name: "b",
            labels: &["RA"],
            priority: 50,
            needle: "X",
        }));
        registry.sort();
        registry.sort();
        let msg = AcarsMessage::new(7, "RA", "X");
        let results = registry.dispatch(&msg);
        match (&results[0], &results[1]) {
            (ParserResult::Dispatcher(a), ParserResult::Dispatcher(b)) => {
                assert_eq!(a.from, sender("a"));
                assert_eq!(b.from, sender("b"));
            }
            other => panic!("unexpected results: {other:?}"),
        }
    }
}
