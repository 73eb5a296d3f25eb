use mortgage_calculator::sanitizer::{format_for_display, strip_grouping_separators};
use mortgage_calculator::{
    calculate_interest, calculate_repay, Event, Field, MagnitudeGuard, PaymentMethod, Session,
    SessionState, SubmitFailure,
};

/// Feeds `text` one character at a time, building each candidate from the
/// currently displayed value like the terminal front end does.
fn type_into(mut session: Session, field: Field, text: &str) -> Session {
    for c in text.chars() {
        let mut candidate = session.display_value(field);
        candidate.push(c);
        session = session.apply(text_event(field, candidate));
    }
    session
}

fn backspace(session: Session, field: Field) -> Session {
    let mut candidate = session.display_value(field);
    candidate.pop();
    session.apply(text_event(field, candidate))
}

fn text_event(field: Field, raw: String) -> Event {
    match field {
        Field::Amount => Event::Amount(raw),
        Field::Term => Event::Term(raw),
        Field::Rate => Event::Rate(raw),
        Field::Method => panic!("method is not a text field"),
    }
}

#[test]
fn typing_amount_keeps_canonical_value_and_grouped_display() {
    let session = type_into(Session::default(), Field::Amount, "1250000");
    assert_eq!(session.inputs.amount, "1250000");
    assert_eq!(session.display_value(Field::Amount), "1,250,000");

    let session = backspace(session, Field::Amount);
    assert_eq!(session.inputs.amount, "125000");
    assert_eq!(session.display_value(Field::Amount), "125,000");
}

#[test]
fn stray_characters_never_reach_state() {
    let session = type_into(Session::default(), Field::Rate, "5a.-2x5");
    assert_eq!(session.inputs.rate, "5.25");

    let session = type_into(Session::default(), Field::Amount, "0");
    assert_eq!(session.inputs.amount, "");

    let session = type_into(Session::default(), Field::Term, "12345");
    assert_eq!(session.inputs.term, "123");
}

#[test]
fn full_repayment_round_trip() {
    let mut session = Session::default();
    session = type_into(session, Field::Amount, "200000");
    session = type_into(session, Field::Term, "25");
    session = type_into(session, Field::Rate, "5.25");
    session = session.apply(Event::Method(PaymentMethod::Repayment));
    session = session.apply(Event::Submit);

    assert_eq!(session.state, SessionState::SubmittedValid);
    let result = session.result.expect("result present");
    assert!((result.monthly_payment - calculate_repay(200_000.0, 25.0, 5.25)).abs() < 1e-9);
    assert!((result.total_repaid - result.monthly_payment * 300.0).abs() < 1e-6);
    assert_eq!(
        session.formatted_result(),
        Some(("1,198".to_string(), "359,549".to_string()))
    );
}

#[test]
fn switching_method_and_resubmitting_replaces_both_figures() {
    let mut session = Session::default();
    session = type_into(session, Field::Amount, "200000");
    session = type_into(session, Field::Term, "25");
    session = type_into(session, Field::Rate, "5.25");
    session = session
        .apply(Event::Method(PaymentMethod::Repayment))
        .apply(Event::Submit)
        .apply(Event::Method(PaymentMethod::InterestOnly));

    assert_eq!(session.state, SessionState::Editing);
    let stale = session.result.expect("stale result stays visible");
    assert!(stale.monthly_payment > 1_000.0);

    let session = session.apply(Event::Submit);
    let fresh = session.result.expect("result present");
    assert!((fresh.monthly_payment - calculate_interest(200_000.0, 5.25)).abs() < 1e-9);
    assert_eq!(
        session.formatted_result(),
        Some(("875".to_string(), "262,500".to_string()))
    );
}

#[test]
fn submit_without_method_reports_missing_input_only() {
    let mut session = Session::default();
    session = type_into(session, Field::Amount, "200000");
    session = type_into(session, Field::Term, "25");
    session = type_into(session, Field::Rate, "5.25");
    session = session.apply(Event::Submit);

    assert_eq!(session.state, SessionState::SubmittedInvalid);
    assert_eq!(session.failure, Some(SubmitFailure::MissingInput));
    assert_eq!(session.errors.missing_fields(), vec![Field::Method]);
    assert!(session.result.is_none());

    let session = session.apply(Event::Method(PaymentMethod::InterestOnly));
    assert!(!session.errors.any());
    assert!(session.failure.is_none());
}

#[test]
fn clear_from_every_state_returns_initial_session() {
    let initial = Session::new(MagnitudeGuard::default());

    let editing = type_into(initial.clone(), Field::Term, "30");
    let invalid = editing.clone().apply(Event::Submit);
    let valid = {
        let s = type_into(editing.clone(), Field::Amount, "100000");
        let s = type_into(s, Field::Rate, "4");
        s.apply(Event::Method(PaymentMethod::Repayment)).apply(Event::Submit)
    };
    assert_eq!(valid.state, SessionState::SubmittedValid);

    for session in [initial.clone(), editing, invalid, valid] {
        let cleared = session.apply(Event::Clear);
        assert_eq!(cleared, initial);
        assert_eq!(cleared.state, SessionState::Empty);
    }
}

#[test]
fn display_round_trip_for_typed_values() {
    for value in ["1", "12", "123", "1234", "12345.6", "1000000.", "0.125"] {
        assert_eq!(strip_grouping_separators(&format_for_display(value)), value);
    }
}
