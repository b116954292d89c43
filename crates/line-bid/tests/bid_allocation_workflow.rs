use line_bid::bidding::{
    allocate_lines, parse_bid_text, parse_bids, process_bid_text, BidLayout, BidParseError,
    BidRecord, ParseErrorKind, LINES_UNAVAILABLE_MESSAGE, NO_PREFERENCES_MESSAGE,
};
use std::collections::HashSet;

fn crew_batch() -> Vec<BidRecord> {
    vec![
        BidRecord::new(4, "E400", ["L3", "L1", "L2"]),
        BidRecord::new(1, "E100", ["L1", "L2"]),
        BidRecord::new(3, "E300", ["L1", "L2"]),
        BidRecord::new(2, "E200", ["L1", "L3", "L4"]),
        BidRecord::new(5, "E500", Vec::<String>::new()),
        BidRecord::new(6, "E600", ["L4", "L9"]),
    ]
}

#[test]
fn scenario_second_choice_when_first_is_claimed() {
    let bids = vec![
        BidRecord::new(1, "E1", ["L10", "L20"]),
        BidRecord::new(2, "E2", ["L10", "L30"]),
    ];
    let results = allocate_lines(&bids);

    assert_eq!(results[0].employee_id, "E1");
    assert_eq!(results[0].awarded_line.as_deref(), Some("L10"));
    assert_eq!(results[0].choice_position, Some(1));
    assert_eq!(results[1].employee_id, "E2");
    assert_eq!(results[1].awarded_line.as_deref(), Some("L30"));
    assert_eq!(results[1].choice_position, Some(2));
}

#[test]
fn scenario_no_award_when_only_line_is_claimed() {
    let bids = vec![
        BidRecord::new(1, "E1", ["L10"]),
        BidRecord::new(2, "E2", ["L10"]),
    ];
    let results = allocate_lines(&bids);

    assert_eq!(results[0].awarded_line.as_deref(), Some("L10"));
    assert!(results[1].awarded_line.is_none());
    assert!(results[1].choice_position.is_none());
    assert_eq!(results[1].message, LINES_UNAVAILABLE_MESSAGE);
}

#[test]
fn scenario_empty_preferences_get_no_award() {
    let bids = vec![BidRecord::new(1, "E1", Vec::<String>::new())];
    let results = allocate_lines(&bids);

    assert_eq!(results.len(), 1);
    assert!(results[0].awarded_line.is_none());
    assert!(results[0].message.contains("no preferred lines available"));
    assert_eq!(results[0].message, NO_PREFERENCES_MESSAGE);
}

#[test]
fn scenario_unrecognised_text_fails_without_results() {
    let error = process_bid_text("Please find my bid attached.\nThanks!")
        .expect_err("format error expected");
    assert_eq!(error, BidParseError::UnrecognizedLayout);
    assert_eq!(error.kind(), ParseErrorKind::Format);
}

#[test]
fn no_line_is_awarded_twice() {
    let results = allocate_lines(&crew_batch());
    let mut seen = HashSet::new();
    for line in results.iter().filter_map(|result| result.awarded_line.as_deref()) {
        assert!(seen.insert(line), "line {line} awarded twice");
    }
}

#[test]
fn results_are_sorted_by_seniority_and_conserved() {
    let bids = crew_batch();
    let results = allocate_lines(&bids);

    assert_eq!(results.len(), bids.len());
    assert!(results
        .windows(2)
        .all(|pair| pair[0].seniority_position < pair[1].seniority_position));
}

#[test]
fn choice_position_points_at_awarded_preference() {
    let bids = crew_batch();
    for result in allocate_lines(&bids) {
        let bid = bids
            .iter()
            .find(|bid| bid.employee_id == result.employee_id)
            .expect("matching bid");
        match (&result.awarded_line, result.choice_position) {
            (Some(line), Some(choice)) => assert_eq!(&bid.preferences[choice - 1], line),
            (None, None) => {}
            other => panic!("inconsistent award for {}: {other:?}", result.employee_id),
        }
    }
}

#[test]
fn crew_batch_awards_expected_lines() {
    let results = allocate_lines(&crew_batch());
    let awards: Vec<(&str, Option<&str>)> = results
        .iter()
        .map(|result| (result.employee_id.as_str(), result.awarded_line.as_deref()))
        .collect();

    assert_eq!(
        awards,
        vec![
            ("E100", Some("L1")),
            ("E200", Some("L3")),
            ("E300", Some("L2")),
            ("E400", None),
            ("E500", None),
            ("E600", Some("L4")),
        ]
    );
}

#[test]
fn identical_text_gives_identical_output() {
    let text = "Schedule Bid Summary\n3 E3 L1 L2\n1 E1 L2\n2 E2 L2 L1 L3\n";
    let first = process_bid_text(text).expect("first run");
    let second = process_bid_text(text).expect("second run");
    assert_eq!(first.results, second.results);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn both_layouts_yield_the_same_awards() {
    let schedule = "Schedule Bid Summary\n\
Seniority\tEmployee\tName\tPreferences\n\
1\tE100\tAna Ruiz\tL10, L20\n\
2\tE200\tLee Chan\tL10, L30\n";
    let view = "View Bid Summary\n\
Seniority: 1\n\
Employee ID: E100\n\
Name: Ana Ruiz\n\
Preferences:\n\
1. L10\n\
2. L20\n\
\n\
Seniority: 2\n\
Employee ID: E200\n\
Name: Lee Chan\n\
Preferences:\n\
1. L10\n\
2. L30\n";

    let schedule_bids = parse_bid_text(schedule).expect("schedule parses");
    let view_bids = parse_bid_text(view).expect("view parses");
    assert_eq!(schedule_bids.layout, BidLayout::ScheduleSummary);
    assert_eq!(view_bids.layout, BidLayout::ViewSummary);
    assert_eq!(schedule_bids.records, view_bids.records);

    let results = allocate_lines(&view_bids.records);
    assert_eq!(results[1].awarded_line.as_deref(), Some("L30"));
    assert_eq!(results[1].employee_name.as_deref(), Some("Lee Chan"));
}

#[test]
fn validation_failure_rejects_whole_batch() {
    let text = "1 E1 L1\n2 E2 L2\n3\n4 E4 L4\n";
    let error = parse_bids(text).expect_err("validation error");
    assert_eq!(error.kind(), ParseErrorKind::Validation);
    assert_eq!(error.to_string(), "missing employee id on line 3");
}

#[test]
fn original_numeric_paste_is_accepted() {
    let text = "1 10234 101 102 103\n2 10987 101 104\n3 11001\n";
    let run = process_bid_text(text).expect("run succeeds");

    assert_eq!(run.results[0].awarded_line.as_deref(), Some("101"));
    assert_eq!(run.results[1].awarded_line.as_deref(), Some("104"));
    assert!(run.results[2].awarded_line.is_none());
    assert_eq!(run.results[2].message, NO_PREFERENCES_MESSAGE);
}

#[test]
fn portal_schedule_export_allocates_every_employee() {
    let text = include_str!("fixtures/schedule_bid_summary.txt");
    let run = process_bid_text(text).expect("schedule export processes");

    assert_eq!(run.layout, BidLayout::ScheduleSummary);
    let awards: Vec<(u32, Option<&str>, Option<usize>)> = run
        .results
        .iter()
        .map(|r| (r.seniority_position, r.awarded_line.as_deref(), r.choice_position))
        .collect();
    assert_eq!(
        awards,
        vec![
            (1, Some("101"), Some(1)),
            (2, Some("112"), Some(2)),
            (3, None, None),
            (4, Some("104"), Some(1)),
            (5, Some("120"), Some(4)),
        ]
    );
    assert_eq!(run.results[0].employee_name.as_deref(), Some("Ruiz, Ana"));
    assert_eq!(run.results[2].message, NO_PREFERENCES_MESSAGE);
}

#[test]
fn portal_view_export_allocates_in_seniority_order() {
    let text = include_str!("fixtures/view_bid_summary.txt");
    let run = process_bid_text(text).expect("view export processes");

    assert_eq!(run.layout, BidLayout::ViewSummary);
    let ids: Vec<&str> = run.results.iter().map(|r| r.employee_id.as_str()).collect();
    assert_eq!(ids, vec!["10234", "10987", "11001"]);
    assert_eq!(run.results[0].awarded_line.as_deref(), Some("101"));
    assert_eq!(run.results[1].awarded_line.as_deref(), Some("112"));
    assert_eq!(run.results[1].choice_position, Some(2));
    assert!(run.results[2].awarded_line.is_none());
    assert_eq!(run.summary.first_choice, 1);
}

#[test]
fn printed_view_export_ignores_report_footer() {
    let text = include_str!("fixtures/view_bid_summary_printed.txt");
    let run = process_bid_text(text).expect("printed export processes");

    assert_eq!(run.layout, BidLayout::ViewSummary);
    assert_eq!(run.results.len(), 3);
    let names: Vec<Option<&str>> = run
        .results
        .iter()
        .map(|r| r.employee_name.as_deref())
        .collect();
    assert_eq!(
        names,
        vec![Some("Ruiz, Ana"), Some("Chan, Lee"), Some("Okafor, Dee")]
    );
    assert_eq!(run.results[1].awarded_line.as_deref(), Some("112"));
    assert!(run.results[2].awarded_line.is_none());
    assert_eq!(run.results[2].message, NO_PREFERENCES_MESSAGE);
    assert_eq!(run.summary.awarded, 2);
}

#[test]
fn out_of_range_first_row_is_rejected_not_dropped() {
    for text in ["0 E0 L5\n1 E1 L5\n", "-1 E9 L5\n2 E2 L6\n"] {
        let error = parse_bids(text).expect_err("first row rejected");
        assert_eq!(error.kind(), ParseErrorKind::Validation);
        assert!(error.to_string().starts_with("invalid seniority position"));
    }
}
