//! Property-based tests for the turn machine and response cleanup

use super::postprocess::{finalize_response, FALLBACK_RESPONSE};
use super::transition::transition;
use super::{Effect, Event, TurnState};
use proptest::prelude::*;

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        any::<String>().prop_map(|text| Event::UserInput { text }),
        Just(Event::StreamOpened),
        any::<String>().prop_map(|text| Event::FragmentReceived { text }),
        Just(Event::StreamEnded),
        Just(Event::Finalize),
    ]
}

/// Position of a state along the one-way turn lifecycle.
fn rank(state: &TurnState) -> u8 {
    match state {
        TurnState::Idle => 0,
        TurnState::Dispatched { .. } => 1,
        TurnState::Collecting { .. } => 2,
        TurnState::PostProcessing { .. } => 3,
        TurnState::Done { .. } => 4,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn prop_final_response_never_contains_newline(raw in any::<String>()) {
        prop_assert!(!finalize_response(&raw).contains('\n'));
    }

    #[test]
    fn prop_final_response_is_never_empty(raw in any::<String>()) {
        prop_assert!(!finalize_response(&raw).is_empty());
    }

    #[test]
    fn prop_cleanup_is_deterministic(raw in any::<String>()) {
        prop_assert_eq!(finalize_response(&raw), finalize_response(&raw));
    }

    #[test]
    fn prop_lines_after_the_first_never_matter(raw in any::<String>(), tail in any::<String>()) {
        // Appending more lines to a buffer that already has one cannot
        // change the result
        let with_tail = format!("{raw}\n{tail}");
        prop_assert_eq!(finalize_response(&raw), finalize_response(&with_tail));
    }

    #[test]
    fn prop_filler_free_single_lines_pass_through(line in "[a-zA-Z0-9 .,?']{0,60}") {
        prop_assume!(!line.contains("That's correct! "));
        prop_assume!(!line.contains("indeed"));

        let expected = line.trim();
        let result = finalize_response(&line);
        if expected.is_empty() {
            prop_assert_eq!(result, FALLBACK_RESPONSE);
        } else {
            prop_assert_eq!(result, expected);
        }
    }

    #[test]
    fn prop_whitespace_input_is_always_rejected(text in "[ \t\r\n]{0,10}") {
        let result = transition(&TurnState::Idle, Event::UserInput { text });
        prop_assert!(result.is_err());
    }

    #[test]
    fn prop_accepted_input_records_the_trimmed_text(text in "[ ]{0,3}[a-z][a-z ?]{0,20}[ ]{0,3}") {
        prop_assume!(!text.trim().is_empty());

        let result = transition(
            &TurnState::Idle,
            Event::UserInput { text: text.clone() },
        ).unwrap();

        prop_assert_eq!(
            &result.effects[0],
            &Effect::append_user(text.trim())
        );
        prop_assert_eq!(&result.effects[1], &Effect::OpenStream);
    }

    #[test]
    fn prop_turn_state_only_moves_forward(
        events in proptest::collection::vec(arb_event(), 0..12)
    ) {
        let mut state = TurnState::Idle;
        for event in events {
            let before = rank(&state);
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
                prop_assert!(rank(&state) >= before);
            }
        }
    }

    #[test]
    fn prop_fragments_collect_in_order(
        texts in proptest::collection::vec(any::<String>(), 0..8)
    ) {
        let mut state = TurnState::Collecting { lines: vec![] };
        for text in &texts {
            state = transition(&state, Event::FragmentReceived { text: text.clone() })
                .unwrap()
                .new_state;
        }

        let expected: Vec<String> = texts
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        prop_assert_eq!(state, TurnState::Collecting { lines: expected });
    }

    #[test]
    fn prop_done_is_terminal(event in arb_event()) {
        let done = TurnState::Done { response: "over".to_string() };
        prop_assert!(transition(&done, event).is_err());
    }
}
