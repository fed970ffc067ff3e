use pulseboard::{
    page_count, paginate, parse_instant, Event, PageOverflowPolicy, PageWindow,
};

fn events(total: usize) -> Vec<Event> {
    (0..total)
        .map(|index| {
            Event::new(
                "/home",
                parse_instant("2023-10-06T00:00:00.000Z").unwrap(),
                index as u64,
            )
        })
        .collect()
}

#[test]
fn pages_never_exceed_the_page_size() {
    let filtered = events(9);
    for page in 1..=4 {
        let slice = paginate(&filtered, &PageWindow::new(page, 4));
        assert!(slice.len() <= 4);
    }
}

#[test]
fn pages_partition_the_filtered_set_exactly() {
    let filtered = events(9);
    let mut rebuilt = Vec::new();
    for page in 1..=page_count(filtered.len(), 4) {
        rebuilt.extend_from_slice(paginate(&filtered, &PageWindow::new(page, 4)));
    }
    assert_eq!(rebuilt, filtered);
}

#[test]
fn page_two_of_nine_items_at_size_ten_is_empty() {
    let filtered = events(9);
    let slice = paginate(&filtered, &PageWindow::new(2, 10));
    assert!(slice.is_empty());
}

#[test]
fn page_numbers_below_one_clamp_to_one() {
    let window = PageWindow::new(0, 5);
    assert_eq!(window.page_number(), 1);
    let filtered = events(3);
    assert_eq!(paginate(&filtered, &window).len(), 3);
}

#[test]
fn prev_saturates_at_the_first_page_and_next_is_unbounded() {
    let window = PageWindow::first(10);
    assert_eq!(window.prev().page_number(), 1);
    let advanced = window.next().next().next();
    assert_eq!(advanced.page_number(), 4);
    assert_eq!(advanced.prev().page_number(), 3);
}

#[test]
fn page_count_rounds_up() {
    assert_eq!(page_count(0, 10), 0);
    assert_eq!(page_count(9, 10), 1);
    assert_eq!(page_count(9, 4), 3);
    assert_eq!(page_count(8, 4), 2);
}

#[test]
fn allow_beyond_end_keeps_the_requested_page() {
    let window = PageWindow::new(5, 4);
    let applied = PageOverflowPolicy::AllowBeyondEnd.apply(window, 9);
    assert_eq!(applied.page_number(), 5);
    assert!(paginate(&events(9), &applied).is_empty());
}

#[test]
fn clamp_to_last_page_snaps_an_overflowing_window() {
    let window = PageWindow::new(5, 4);
    let applied = PageOverflowPolicy::ClampToLastPage.apply(window, 9);
    assert_eq!(applied.page_number(), 3);
    assert_eq!(paginate(&events(9), &applied).len(), 1);
}

#[test]
fn clamp_on_an_empty_set_lands_on_page_one() {
    let window = PageWindow::new(7, 4);
    let applied = PageOverflowPolicy::ClampToLastPage.apply(window, 0);
    assert_eq!(applied.page_number(), 1);
    assert!(paginate(&[], &applied).is_empty());
}

#[test]
fn in_range_windows_pass_through_the_clamp() {
    let window = PageWindow::new(2, 4);
    let applied = PageOverflowPolicy::ClampToLastPage.apply(window, 9);
    assert_eq!(applied, window);
}
