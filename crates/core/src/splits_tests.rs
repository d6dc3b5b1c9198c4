use super::*;
use proptest::prelude::*;

fn split(order: u32, number: u64) -> SplitSuggestion {
    SplitSuggestion {
        order,
        number,
        title: format!("Part {}", order),
    }
}

#[test]
fn test_order_splits_sorts_by_order() {
    let splits = vec![split(3, 30), split(1, 10), split(2, 20)];

    let ordered = order_splits(&splits);

    let numbers: Vec<u64> = ordered.iter().map(|o| o.split.number).collect();
    assert_eq!(numbers, vec![10, 20, 30]);
}

#[test]
fn test_order_splits_positions() {
    let splits = vec![split(4, 40), split(2, 20), split(1, 10), split(3, 30)];

    let positions: Vec<ReviewPosition> = order_splits(&splits)
        .into_iter()
        .map(|o| o.position)
        .collect();

    assert_eq!(
        positions,
        vec![
            ReviewPosition::First,
            ReviewPosition::Nth(2),
            ReviewPosition::Nth(3),
            ReviewPosition::Last,
        ]
    );
}

#[test]
fn test_single_split_is_first() {
    let ordered = order_splits(&[split(1, 5)]);

    assert_eq!(ordered.len(), 1);
    assert_eq!(ordered[0].position, ReviewPosition::First);
}

#[test]
fn test_empty_split_list() {
    let ordered = order_splits(&[]);

    assert!(ordered.is_empty());
    assert_eq!(review_order_line(&ordered), "");
}

#[test]
fn test_order_splits_does_not_modify_input() {
    let splits = vec![split(2, 20), split(1, 10)];

    let _ = order_splits(&splits);

    assert_eq!(splits[0].number, 20);
}

#[test]
fn test_duplicate_orders_keep_input_order() {
    let splits = vec![split(2, 21), split(1, 10), split(2, 22)];

    let numbers: Vec<u64> = order_splits(&splits)
        .iter()
        .map(|o| o.split.number)
        .collect();

    assert_eq!(numbers, vec![10, 21, 22]);
}

#[test]
fn test_review_position_display() {
    assert_eq!(ReviewPosition::First.to_string(), "first");
    assert_eq!(ReviewPosition::Last.to_string(), "last");
    assert_eq!(ReviewPosition::Nth(3).to_string(), "#3");
}

#[test]
fn test_review_order_line() {
    let ordered = order_splits(&[split(2, 102), split(1, 101), split(3, 103)]);

    assert_eq!(review_order_line(&ordered), "#101 → #102 → #103");
}

#[test]
fn test_split_suggestion_deserializes() {
    let json = r#"[{"order": 1, "number": 12, "title": "Extract parser"}]"#;

    let splits: Vec<SplitSuggestion> = serde_json::from_str(json).unwrap();

    assert_eq!(splits, vec![SplitSuggestion {
        order: 1,
        number: 12,
        title: "Extract parser".to_string(),
    }]);
}

proptest! {
    #[test]
    fn prop_ordering_ignores_input_permutation(
        numbers in prop::collection::vec(1u64..10_000, 1..10),
        seed in any::<u64>(),
    ) {
        let splits: Vec<SplitSuggestion> = numbers
            .iter()
            .enumerate()
            .map(|(i, n)| split(i as u32 + 1, *n))
            .collect();

        // Rotate the input by a seed-dependent amount
        let mut shuffled = splits.clone();
        shuffled.rotate_left((seed % splits.len() as u64) as usize);

        prop_assert_eq!(order_splits(&splits), order_splits(&shuffled));
    }

    #[test]
    fn prop_first_and_last_bracket_the_order(count in 2u32..20) {
        let splits: Vec<SplitSuggestion> = (1..=count).rev().map(|o| split(o, o as u64)).collect();

        let ordered = order_splits(&splits);

        prop_assert_eq!(ordered[0].position, ReviewPosition::First);
        prop_assert_eq!(ordered[ordered.len() - 1].position, ReviewPosition::Last);
        for o in &ordered[1..ordered.len() - 1] {
            prop_assert_eq!(o.position, ReviewPosition::Nth(o.split.order));
        }
    }
}
