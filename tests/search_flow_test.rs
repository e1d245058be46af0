use std::sync::Arc;
use std::time::{Duration, Instant};

use pagelight::test_utils::{fragment, FakeTextSource};
use pagelight::{SearchEvent, SearchService};

/// Pump the service until it produces events or the deadline passes
fn wait_for_events(service: &mut SearchService) -> Vec<SearchEvent> {
    let start = Instant::now();
    loop {
        let events = service.poll_events();
        if !events.is_empty() {
            return events;
        }
        if start.elapsed() > Duration::from_secs(5) {
            panic!("timed out waiting for search events");
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn invoice_source() -> Arc<FakeTextSource> {
    Arc::new(
        FakeTextSource::new(792.0)
            .page(vec![fragment("cover page", 1, 20.0, 750.0, 100.0, 14.0)])
            .page(vec![
                fragment("invoice total", 2, 10.0, 700.0, 80.0, 12.0),
                fragment("due in 30 days", 2, 10.0, 680.0, 90.0, 12.0),
            ])
            .page(vec![fragment("terms and conditions", 3, 20.0, 750.0, 140.0, 12.0)]),
    )
}

#[test]
fn search_locates_and_projects_a_match() {
    let source = invoice_source();
    let mut service = SearchService::new(source.clone());

    let id = service.request_search("Total");
    let events = wait_for_events(&mut service);

    match &events[0] {
        SearchEvent::ResultsReady { id: ready, total } => {
            assert_eq!(*ready, id);
            assert_eq!(*total, 1);
        }
        other => panic!("expected results, got {other:?}"),
    }

    let active = service.active_match().expect("one match should be active");
    assert_eq!(active.page_number, 2);
    assert_eq!(active.text, "invoice total");
    assert_eq!(service.match_position(), Some((1, 1)));

    let highlights = service.highlights_for_page(2);
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].rect.top, 80.0);
    assert_eq!(highlights[0].rect.left, 10.0);
    assert_eq!(highlights[0].rect.width, 80.0);
    assert_eq!(highlights[0].rect.height, 12.0);
    assert!(highlights[0].is_active);

    assert!(service.highlights_for_page(1).is_empty());
    assert!(service.highlights_for_page(3).is_empty());

    service.shutdown();
}

#[test]
fn empty_query_commits_empty_results_without_extraction() {
    let source = invoice_source();
    let mut service = SearchService::new(source.clone());

    service.request_search("");

    assert!(!service.is_search_pending());
    assert!(service.results().is_empty());
    assert!(service.active_match().is_none());
    assert_eq!(source.extraction_count(), 0);

    service.shutdown();
}

#[test]
fn zoom_reprojects_without_touching_the_source() {
    let source = invoice_source();
    let mut service = SearchService::new(source.clone());

    service.request_search("total");
    wait_for_events(&mut service);
    let extractions = source.extraction_count();

    let base = service.highlights_for_page(2);
    service.zoom_in();
    let zoomed = service.highlights_for_page(2);

    assert!((zoomed[0].rect.top - base[0].rect.top * 1.2).abs() < 0.001);
    assert!((zoomed[0].rect.width - base[0].rect.width * 1.2).abs() < 0.001);
    assert_eq!(source.extraction_count(), extractions);

    service.shutdown();
}

#[test]
fn repeat_search_is_served_from_the_fragment_cache() {
    let source = invoice_source();
    let mut service = SearchService::new(source.clone());

    service.request_search("total");
    wait_for_events(&mut service);
    assert_eq!(source.extracted_pages(), vec![1, 2, 3]);

    service.request_search("terms");
    let events = wait_for_events(&mut service);
    assert!(matches!(
        events[0],
        SearchEvent::ResultsReady { total: 1, .. }
    ));
    assert_eq!(source.extraction_count(), 3);

    service.shutdown();
}

#[test]
fn unreadable_page_is_skipped_by_the_service() {
    let source = Arc::new(
        FakeTextSource::new(792.0)
            .page(vec![fragment("report part one", 1, 0.0, 700.0, 90.0, 12.0)])
            .failing_page("corrupt content stream")
            .page(vec![fragment("report part two", 3, 0.0, 700.0, 90.0, 12.0)]),
    );
    let mut service = SearchService::new(source);

    service.request_search("report");
    let events = wait_for_events(&mut service);

    assert!(matches!(
        events[0],
        SearchEvent::ResultsReady { total: 2, .. }
    ));
    let pages: Vec<usize> = service.results().iter().map(|m| m.page_number).collect();
    assert_eq!(pages, vec![1, 3]);

    service.shutdown();
}

#[test]
fn unreadable_document_fails_the_search_and_clears_results() {
    let source = invoice_source();
    let mut service = SearchService::new(source);

    service.request_search("total");
    wait_for_events(&mut service);
    assert_eq!(service.results().len(), 1);

    let broken = Arc::new(
        FakeTextSource::new(792.0)
            .page(vec![fragment("anything", 1, 0.0, 700.0, 50.0, 12.0)])
            .broken_document("truncated xref table"),
    );
    service.set_document(broken);

    service.request_search("anything");
    let events = wait_for_events(&mut service);

    assert!(matches!(events[0], SearchEvent::SearchFailed { .. }));
    assert!(service.results().is_empty());
    assert_eq!(service.match_position(), None);

    service.shutdown();
}

#[test]
fn cursor_navigation_wraps_both_ways() {
    let source = Arc::new(
        FakeTextSource::new(792.0).page(
            (0..5)
                .map(|i| {
                    fragment(
                        &format!("item {i}"),
                        1,
                        10.0,
                        700.0 - 20.0 * i as f32,
                        50.0,
                        12.0,
                    )
                })
                .collect(),
        ),
    );
    let mut service = SearchService::new(source);

    service.request_search("item");
    wait_for_events(&mut service);
    assert_eq!(service.match_position(), Some((1, 5)));

    for _ in 0..4 {
        service.next_match();
    }
    assert_eq!(service.match_position(), Some((5, 5)));

    let wrapped = service.next_match().expect("wrap keeps a match active");
    assert_eq!(wrapped.text, "item 0");
    assert_eq!(service.match_position(), Some((1, 5)));

    service.previous_match();
    assert_eq!(service.match_position(), Some((5, 5)));

    service.shutdown();
}

#[test]
fn clearing_the_search_keeps_zoom() {
    let source = invoice_source();
    let mut service = SearchService::new(source);

    service.request_search("total");
    wait_for_events(&mut service);
    service.zoom_in();
    let factor = service.zoom_factor();

    service.clear_search();

    assert!(service.results().is_empty());
    assert_eq!(service.match_position(), None);
    assert!(service.highlights_for_page(2).is_empty());
    assert_eq!(service.zoom_factor(), factor);

    service.shutdown();
}

#[test]
fn document_swap_clears_results_cursor_and_zoom() {
    let source = invoice_source();
    let mut service = SearchService::new(source);

    service.request_search("total");
    wait_for_events(&mut service);
    service.zoom_in();
    assert_eq!(service.results().len(), 1);

    let replacement = Arc::new(
        FakeTextSource::new(612.0).page(vec![fragment("fresh start", 1, 0.0, 500.0, 70.0, 12.0)]),
    );
    service.set_document(replacement.clone());

    assert!(service.results().is_empty());
    assert_eq!(service.match_position(), None);
    assert_eq!(service.zoom_factor(), 1.0);
    assert_eq!(replacement.extraction_count(), 0);

    service.request_search("fresh");
    let events = wait_for_events(&mut service);
    assert!(matches!(
        events[0],
        SearchEvent::ResultsReady { total: 1, .. }
    ));

    service.shutdown();
}
