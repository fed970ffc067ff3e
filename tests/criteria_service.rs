use pulseboard::{parse_instant, CriteriaService, CriteriaUpdate, InvalidCriteriaError};

#[test]
fn applies_field_updates_and_bumps_version() {
    let mut service = CriteriaService::new();
    assert_eq!(service.version(), 1);

    let version = service
        .apply(CriteriaUpdate::StartTime("2023-10-07T00:00:00.000Z".to_string()))
        .unwrap();
    assert_eq!(version, 2);
    assert_eq!(
        service.current().start_time,
        parse_instant("2023-10-07T00:00:00.000Z")
    );

    let version = service
        .apply(CriteriaUpdate::MinCount("250".to_string()))
        .unwrap();
    assert_eq!(version, 3);
    assert_eq!(service.current().min_count, 250);

    let version = service
        .apply(CriteriaUpdate::Endpoints(vec![
            "/home".to_string(),
            "/contact".to_string(),
        ]))
        .unwrap();
    assert_eq!(version, 4);
    assert!(service.current().endpoints.contains("/home"));
    assert!(service.current().endpoints.contains("/contact"));
    assert_eq!(service.telemetry().applied_updates_total, 3);
}

#[test]
fn rejects_unparsable_bound_and_retains_previous_criteria() {
    let mut service = CriteriaService::new();
    service
        .apply(CriteriaUpdate::StartTime("2023-10-06T00:00:00.000Z".to_string()))
        .unwrap();

    let err = service
        .apply(CriteriaUpdate::StartTime("yesterday".to_string()))
        .unwrap_err();
    match err {
        InvalidCriteriaError::Bound { field, raw } => {
            assert_eq!(field, "start_time");
            assert_eq!(raw, "yesterday");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(
        service.current().start_time,
        parse_instant("2023-10-06T00:00:00.000Z")
    );
    assert_eq!(service.version(), 2);
    assert_eq!(service.telemetry().rejected_updates_total, 1);
}

#[test]
fn rejects_non_numeric_and_negative_min_count() {
    let mut service = CriteriaService::new();
    let err = service
        .apply(CriteriaUpdate::MinCount("many".to_string()))
        .unwrap_err();
    match err {
        InvalidCriteriaError::MinCount { raw } => assert_eq!(raw, "many"),
        other => panic!("unexpected error: {:?}", other),
    }
    service
        .apply(CriteriaUpdate::MinCount("-40".to_string()))
        .unwrap_err();
    assert_eq!(service.current().min_count, 0);
    assert_eq!(service.version(), 1);
    assert_eq!(service.telemetry().rejected_updates_total, 2);
}

#[test]
fn blank_fields_clear_bounds_and_zero_the_minimum() {
    let mut service = CriteriaService::new();
    service
        .apply(CriteriaUpdate::StartTime("2023-10-06T00:00:00.000Z".to_string()))
        .unwrap();
    service
        .apply(CriteriaUpdate::EndTime("2023-10-08T00:00:00.000Z".to_string()))
        .unwrap();
    service
        .apply(CriteriaUpdate::MinCount("3000".to_string()))
        .unwrap();

    service
        .apply(CriteriaUpdate::StartTime(String::new()))
        .unwrap();
    service
        .apply(CriteriaUpdate::EndTime("  ".to_string()))
        .unwrap();
    service.apply(CriteriaUpdate::MinCount(String::new())).unwrap();

    assert_eq!(service.current().start_time, None);
    assert_eq!(service.current().end_time, None);
    assert_eq!(service.current().min_count, 0);
}

#[test]
fn min_count_input_is_trimmed() {
    let mut service = CriteriaService::new();
    service
        .apply(CriteriaUpdate::MinCount(" 3000 ".to_string()))
        .unwrap();
    assert_eq!(service.current().min_count, 3000);
}

#[test]
fn no_change_update_keeps_the_version() {
    let mut service = CriteriaService::new();
    let version = service
        .apply(CriteriaUpdate::MinCount("0".to_string()))
        .unwrap();
    assert_eq!(version, 1);
    assert_eq!(service.version(), 1);
    assert_eq!(service.telemetry().applied_updates_total, 0);
}
