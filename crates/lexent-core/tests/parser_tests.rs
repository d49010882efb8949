use std::sync::{Arc, Mutex};

use lexent_core::engine::EngineBinding;
use lexent_core::output::NumberValue;
use lexent_core::{EntityParser, Error, Kind, Match, MatchValue, Span};

/// Binding double that records every engine call and returns a canned match.
#[derive(Clone, Default, Debug)]
struct RecordingBinding {
    calls: Arc<Mutex<Vec<(String, Vec<Kind>)>>>,
}

impl RecordingBinding {
    fn calls(&self) -> Vec<(String, Vec<Kind>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl EngineBinding for RecordingBinding {
    type Handle = ();

    fn create_handle(&self, _language: &str) -> Result<(), Error> {
        Ok(())
    }

    fn run_parse(&self, _handle: &(), query: &str, kinds: &[Kind]) -> Result<Vec<Match>, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), kinds.to_vec()));
        Ok(vec![canned_match()])
    }
}

/// Binding double that rejects every language at handle creation.
#[derive(Debug)]
struct RejectingBinding;

impl EngineBinding for RejectingBinding {
    type Handle = ();

    fn create_handle(&self, language: &str) -> Result<(), Error> {
        Err(Error::EngineUnavailable(format!(
            "engine rejected language {language:?}"
        )))
    }

    fn run_parse(&self, _handle: &(), _query: &str, _kinds: &[Kind]) -> Result<Vec<Match>, Error> {
        panic!("run_parse on a binding that never issues handles");
    }
}

/// Binding double whose engine fails mid-extraction.
#[derive(Debug)]
struct FailingBinding;

impl EngineBinding for FailingBinding {
    type Handle = ();

    fn create_handle(&self, _language: &str) -> Result<(), Error> {
        Ok(())
    }

    fn run_parse(&self, _handle: &(), _query: &str, _kinds: &[Kind]) -> Result<Vec<Match>, Error> {
        Err(Error::EngineParse("rule engine panicked".to_string()))
    }
}

fn canned_match() -> Match {
    Match {
        kind: Kind::Number,
        span: Span { start: 0, end: 13 },
        value: MatchValue::Number(NumberValue { value: 42.0 }),
    }
}

fn parser_with_recorder() -> (EntityParser<RecordingBinding>, RecordingBinding) {
    let binding = RecordingBinding::default();
    let parser = EntityParser::with_binding(binding.clone(), "FR").unwrap();
    (parser, binding)
}

mod validation {
    use super::*;

    #[test]
    fn test_unknown_kind_fails_without_engine_call() {
        let (parser, binding) = parser_with_recorder();

        let err = parser.parse("quarante deux", &["Banana"]).unwrap_err();
        assert!(matches!(err, Error::UnknownKind(label) if label == "Banana"));
        assert!(binding.calls().is_empty());
    }

    #[test]
    fn test_mixed_request_fails_fast_on_first_unknown() {
        let (parser, binding) = parser_with_recorder();

        let err = parser
            .parse("quarante deux", &["Number", "Banana", "Duration"])
            .unwrap_err();
        assert!(matches!(err, Error::UnknownKind(label) if label == "Banana"));
        assert!(binding.calls().is_empty());
    }

    #[test]
    fn test_validation_is_case_sensitive() {
        let (parser, binding) = parser_with_recorder();

        let err = parser.parse("quarante deux", &["number"]).unwrap_err();
        assert!(matches!(err, Error::UnknownKind(label) if label == "number"));
        assert!(binding.calls().is_empty());
    }
}

mod dispatch {
    use super::*;

    #[test]
    fn test_forwards_query_and_kinds_exactly() {
        let (parser, binding) = parser_with_recorder();

        parser
            .parse("quarante deux", &["Number", "Duration"])
            .unwrap();

        assert_eq!(
            binding.calls(),
            vec![(
                "quarante deux".to_string(),
                vec![Kind::Number, Kind::Duration]
            )]
        );
    }

    #[test]
    fn test_request_order_and_duplicates_survive() {
        let (parser, binding) = parser_with_recorder();

        parser
            .parse("demain midi", &["Duration", "Number", "Number"])
            .unwrap();

        assert_eq!(
            binding.calls()[0].1,
            vec![Kind::Duration, Kind::Number, Kind::Number]
        );
    }

    #[test]
    fn test_empty_filter_forwarded_empty_not_expanded() {
        let (parser, binding) = parser_with_recorder();

        parser.parse("quarante deux", &[]).unwrap();

        let calls = binding.calls();
        assert_eq!(calls.len(), 1);
        // Unrestricted means an empty filter at the engine boundary, never
        // the full registry.
        assert!(calls[0].1.is_empty());
    }

    #[test]
    fn test_engine_result_forwarded_unchanged() {
        let (parser, _binding) = parser_with_recorder();

        let matches = parser.parse("quarante deux", &["Number"]).unwrap();
        assert_eq!(matches, vec![canned_match()]);
    }

    #[test]
    fn test_engine_parse_error_propagates() {
        let parser = EntityParser::with_binding(FailingBinding, "FR").unwrap();

        let err = parser.parse("quarante deux", &["Number"]).unwrap_err();
        assert!(matches!(err, Error::EngineParse(_)));
    }
}

mod construction {
    use super::*;

    #[test]
    fn test_rejected_language_fails_construction() {
        let result = EntityParser::with_binding(RejectingBinding, "XX");
        assert!(matches!(result, Err(Error::EngineUnavailable(_))));
    }

    #[test]
    fn test_parser_reports_its_language() {
        let (parser, _binding) = parser_with_recorder();
        assert_eq!(parser.language(), "FR");
    }
}

mod convenience {
    use super::*;

    type Shorthand<B> = fn(&EntityParser<B>, &str) -> Result<Vec<Match>, Error>;

    fn shorthands<B: EngineBinding>() -> [(&'static str, Shorthand<B>); 11] {
        [
            ("Number", |p, q| p.parse_number(q)),
            ("Ordinal", |p, q| p.parse_ordinal(q)),
            ("Datetime", |p, q| p.parse_datetime(q)),
            ("Date", |p, q| p.parse_date(q)),
            ("Time", |p, q| p.parse_time(q)),
            ("DatePeriod", |p, q| p.parse_date_period(q)),
            ("TimePeriod", |p, q| p.parse_time_period(q)),
            ("AmountOfMoney", |p, q| p.parse_amount_of_money(q)),
            ("Temperature", |p, q| p.parse_temperature(q)),
            ("Duration", |p, q| p.parse_duration(q)),
            ("Percentage", |p, q| p.parse_percentage(q)),
        ]
    }

    #[test]
    fn test_every_kind_has_an_equivalent_shorthand() {
        for (label, shorthand) in shorthands::<RecordingBinding>() {
            let (via_method, method_binding) = parser_with_recorder();
            let (via_generic, generic_binding) = parser_with_recorder();

            let lhs = shorthand(&via_method, "quarante deux").unwrap();
            let rhs = via_generic.parse("quarante deux", &[label]).unwrap();

            assert_eq!(lhs, rhs, "results diverge for {label}");
            assert_eq!(
                method_binding.calls(),
                generic_binding.calls(),
                "engine observes different requests for {label}"
            );
        }
    }

    #[test]
    fn test_shorthands_share_the_failure_path() {
        let parser = EntityParser::with_binding(FailingBinding, "FR").unwrap();

        for (label, shorthand) in shorthands::<FailingBinding>() {
            let via_method = shorthand(&parser, "quarante deux").unwrap_err();
            let via_generic = parser.parse("quarante deux", &[label]).unwrap_err();

            assert_eq!(
                via_method.to_string(),
                via_generic.to_string(),
                "failure paths diverge for {label}"
            );
        }
    }
}
