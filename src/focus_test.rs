use super::*;

fn ids(n: u32) -> Vec<ElementId> {
    (0..n).map(ElementId).collect()
}

#[test]
fn tab_on_last_wraps_to_first() {
    let set = ids(3);
    assert_eq!(next_in_trap(&set, Some(ElementId(2)), TabDirection::Forward), Some(ElementId(0)));
}

#[test]
fn shift_tab_on_first_wraps_to_last() {
    let set = ids(3);
    assert_eq!(next_in_trap(&set, Some(ElementId(0)), TabDirection::Backward), Some(ElementId(2)));
}

#[test]
fn tab_in_middle_advances() {
    let set = ids(3);
    assert_eq!(next_in_trap(&set, Some(ElementId(0)), TabDirection::Forward), Some(ElementId(1)));
    assert_eq!(next_in_trap(&set, Some(ElementId(2)), TabDirection::Backward), Some(ElementId(1)));
}

#[test]
fn focus_outside_enters_at_edges() {
    let set = ids(3);
    assert_eq!(next_in_trap(&set, Some(ElementId(99)), TabDirection::Forward), Some(ElementId(0)));
    assert_eq!(next_in_trap(&set, None, TabDirection::Backward), Some(ElementId(2)));
}

#[test]
fn empty_set_yields_none() {
    assert_eq!(next_in_trap(&[], Some(ElementId(1)), TabDirection::Forward), None);
}

#[test]
fn single_element_keeps_focus() {
    let set = ids(1);
    assert_eq!(next_in_trap(&set, Some(ElementId(0)), TabDirection::Forward), Some(ElementId(0)));
    assert_eq!(next_in_trap(&set, Some(ElementId(0)), TabDirection::Backward), Some(ElementId(0)));
}

#[test]
fn cycling_never_leaves_the_set() {
    for n in 1..=6 {
        let set = ids(n);
        let starts = [None, Some(ElementId(500))].into_iter().chain(set.iter().copied().map(Some));
        for start in starts {
            for direction in [TabDirection::Forward, TabDirection::Backward] {
                let mut active = start;
                for _ in 0..(2 * n) {
                    let next = next_in_trap(&set, active, direction);
                    assert!(next.is_some_and(|id| set.contains(&id)), "n={n} start={start:?}");
                    active = next;
                }
            }
        }
    }
}

#[test]
fn full_forward_cycle_visits_every_element() {
    let set = ids(4);
    let mut active = Some(ElementId(0));
    let mut seen = Vec::new();
    for _ in 0..4 {
        active = next_in_trap(&set, active, TabDirection::Forward);
        seen.extend(active);
    }
    seen.sort();
    assert_eq!(seen, set);
}

#[test]
fn direction_from_shift() {
    assert_eq!(TabDirection::from_shift(true), TabDirection::Backward);
    assert_eq!(TabDirection::from_shift(false), TabDirection::Forward);
}
