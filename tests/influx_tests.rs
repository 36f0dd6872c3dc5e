use influx_trace_dump::influx::query::{first_sample, series_pattern, show_tag_values, trace_series};
use influx_trace_dump::influx::{QueryResponse, RawSeriesRow, TagSelector};
use influx_trace_dump::utils::{ConfigError, QueryError};
use pretty_assertions::assert_eq;

fn parse(body: &str) -> QueryResponse {
    serde_json::from_str(body).unwrap()
}

#[test]
fn test_tag_mapping_zips_prefix_components() {
    let selector = TagSelector::from_mapping("statsd.billing.web01", Some("SKIP.service.host")).unwrap();

    assert_eq!(selector.len(), 2);
    assert_eq!(selector.get("service"), Some("billing"));
    assert_eq!(selector.get("host"), Some("web01"));
    assert_eq!(selector.get("SKIP"), None);
}

#[test]
fn test_tag_mapping_defaults_to_prefix_tag() {
    let selector = TagSelector::from_mapping("statsd.billing", None).unwrap();
    assert_eq!(selector.get("prefix"), Some("statsd.billing"));
    assert_eq!(selector.len(), 1);
}

#[test]
fn test_tag_mapping_length_mismatch() {
    let result = TagSelector::from_mapping("a.b.c", Some("x.y"));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidTagMapping { tags: 2, components: 3, .. })
    ));
}

#[test]
fn test_query_statements() {
    let selector = TagSelector::new()
        .with_tag("service", "billing")
        .with_tag("jvmName", "1234@web01");

    assert_eq!(
        show_tag_values("cpu.stats.size", "jvmName"),
        r#"SHOW TAG VALUES FROM "cpu.stats.size" WITH KEY = "jvmName""#
    );
    assert_eq!(
        first_sample("cpu.stats.size", &selector),
        r#"SELECT value FROM "cpu.stats.size" WHERE "jvmName" = '1234@web01' AND "service" = 'billing' LIMIT 1"#
    );
    assert_eq!(
        trace_series("cpu.trace.", &selector),
        r#"SELECT value FROM /^cpu\.trace\..*/ WHERE "jvmName" = '1234@web01' AND "service" = 'billing'"#
    );
}

#[test]
fn test_series_pattern_escapes_slash() {
    assert_eq!(series_pattern("a/b"), r"/^a\/b.*/");
}

#[test]
fn test_trace_rows_from_response() {
    let response = parse(
        r#"{"results":[{"statement_id":0,"series":[
            {"name":"cpu.trace.Main-main-1","columns":["time","value"],
             "values":[["2016-03-01T00:00:00Z",2],["2016-03-01T00:00:10Z",null],["2016-03-01T00:00:20Z",3.5]]},
            {"name":"cpu.trace.7","columns":["time","value"],"values":[["2016-03-01T00:00:00Z",7]]}
        ]}]}"#,
    );

    let rows: Vec<RawSeriesRow> = response
        .into_series()
        .unwrap()
        .into_iter()
        .map(|s| s.into_trace_row().unwrap())
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "cpu.trace.Main-main-1");
    assert_eq!(rows[0].values.len(), 2);
    assert_eq!(rows[0].total(), 5.5);
    assert_eq!(rows[1].total(), 7.0);
}

#[test]
fn test_missing_series_is_empty() {
    let response = parse(r#"{"results":[{"statement_id":0}]}"#);
    assert!(response.into_series().unwrap().is_empty());
}

#[test]
fn test_statement_error_is_reported() {
    let response = parse(r#"{"results":[{"statement_id":0,"error":"database not found: profiler"}]}"#);
    assert!(matches!(response.into_series(), Err(QueryError::Server(msg)) if msg.contains("profiler")));
}

#[test]
fn test_top_level_error_is_reported() {
    let response = parse(r#"{"error":"authorization failed"}"#);
    assert!(matches!(response.into_series(), Err(QueryError::Server(_))));
}

#[test]
fn test_non_numeric_sample_rejected() {
    let response = parse(
        r#"{"results":[{"series":[{"name":"cpu.trace.a-1","columns":["time","value"],"values":[["t","lots"]]}]}]}"#,
    );
    let series = response.into_series().unwrap().remove(0);
    assert!(matches!(series.into_trace_row(), Err(QueryError::InvalidResponse(_))));
}

#[test]
fn test_first_time_and_tag_values() {
    let mut series = parse(
        r#"{"results":[{"series":[
            {"name":"cpu.stats.size","columns":["time","value"],"values":[["2016-03-01T10:20:30.5Z",12]]},
            {"name":"cpu.stats.size","columns":["key","value"],"values":[["jvmName","1@a"],["jvmName","2@b"]]}
        ]}]}"#,
    )
    .into_series()
    .unwrap();

    let tags = series.pop().unwrap();
    let first = series.pop().unwrap();

    assert_eq!(first.first_time(), Some("2016-03-01T10:20:30.5Z".to_string()));
    assert_eq!(tags.tag_values(), vec!["1@a".to_string(), "2@b".to_string()]);
}

#[test]
fn test_epoch_timestamps_are_stringified() {
    let series = parse(
        r#"{"results":[{"series":[{"name":"cpu.stats.size","columns":["time","value"],"values":[[1456827630,12]]}]}]}"#,
    )
    .into_series()
    .unwrap();

    assert_eq!(series[0].first_time(), Some("1456827630".to_string()));
}
