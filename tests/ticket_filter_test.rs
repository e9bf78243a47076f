use anyhow::Result;
use serde_json::json;
use ticket_filter::core::{FilterList, ToolSet};
use ticket_filter::{CollectionManifest, CollectionReport, ManifestSession, TicketError, TicketPlugin};

/// Runs one collection of `manifest` the way the CLI does.
fn collect(
    manifest: serde_json::Value,
    tools: &str,
    tickets: &[&str],
) -> ticket_filter::Result<CollectionReport> {
    let manifest = CollectionManifest::from_json_str(&manifest.to_string())?;
    let items = manifest.collect_items()?;

    let mut session = ManifestSession::new(false);
    let mut plugin = TicketPlugin::configure(
        ToolSet::from_comma_separated(tools),
        FilterList::new(tickets.iter().copied()),
        &mut session,
    );
    session.run(&mut plugin, items)
}

fn selected_ids(report: &CollectionReport) -> Vec<&str> {
    report.selected.iter().map(|entry| entry.id.as_str()).collect()
}

fn ticket(name: &str, kwargs: serde_json::Value) -> serde_json::Value {
    json!({"name": name, "markers": [{"name": "ticket", "kwargs": kwargs}]})
}

fn module(children: Vec<serde_json::Value>) -> serde_json::Value {
    json!({"nodes": [{"name": "test_module.py", "children": children}]})
}

#[test]
fn test_unknown_tracker_aborts_collection() -> Result<()> {
    let manifest = module(vec![ticket("test_ticket", json!({"tracker": 1234}))]);

    let err = collect(manifest, "", &[]).unwrap_err();
    assert!(matches!(err, TicketError::UnknownTool { .. }));
    assert!(err
        .to_string()
        .contains("Ticket tool \"tracker\" is not among configured tools"));
    Ok(())
}

#[test]
fn test_known_tracker_accepts_int_string_and_list() -> Result<()> {
    let manifest = module(vec![
        ticket("test_1", json!({"tracker": 1234})),
        ticket("test_2", json!({"tracker": "1234"})),
        ticket("test_3", json!({"tracker": [1234]})),
    ]);

    let report = collect(manifest, "tracker", &[])?;
    assert_eq!(selected_ids(&report).len(), 3);
    for entry in &report.selected {
        assert_eq!(entry.tickets, ["tracker#1234"]);
    }
    Ok(())
}

#[test]
fn test_filter_single_value() -> Result<()> {
    let manifest = module(vec![ticket("test_1", json!({"tracker": 1234}))]);

    let report = collect(manifest.clone(), "tracker", &[])?;
    assert_eq!(selected_ids(&report), ["test_module.py::test_1"]);

    let report = collect(manifest.clone(), "tracker", &["tracker#1234"])?;
    assert_eq!(selected_ids(&report), ["test_module.py::test_1"]);

    let report = collect(manifest, "tracker", &["tracker#4321"])?;
    assert!(report.selected.is_empty());
    assert_eq!(report.deselected, ["test_module.py::test_1"]);
    Ok(())
}

#[test]
fn test_filter_multiple_values() -> Result<()> {
    let manifest = module(vec![
        ticket("test_1", json!({"tracker": 1234})),
        ticket("test_2", json!({"tracker": 4321})),
        ticket("test_3", json!({"tracker": 1111})),
    ]);

    let report = collect(manifest.clone(), "tracker", &["tracker#1234", "tracker#4321"])?;
    assert_eq!(
        selected_ids(&report),
        ["test_module.py::test_1", "test_module.py::test_2"]
    );
    assert_eq!(report.deselected, ["test_module.py::test_3"]);

    let report = collect(manifest, "tracker", &["tracker#1111"])?;
    assert_eq!(selected_ids(&report), ["test_module.py::test_3"]);
    assert_eq!(report.deselected.len(), 2);
    Ok(())
}

#[test]
fn test_filter_multiple_values_list() -> Result<()> {
    for values in [json!([1234, 4321]), json!(["1234", "4321"])] {
        let manifest = module(vec![
            ticket("test_1", json!({ "tracker": values })),
            ticket("test_2", json!({"tracker": "4321"})),
            ticket("test_3", json!({"tracker": 1111})),
        ]);

        let report = collect(manifest.clone(), "tracker", &["tracker#4321"])?;
        assert_eq!(
            selected_ids(&report),
            ["test_module.py::test_1", "test_module.py::test_2"]
        );
        assert_eq!(report.deselected, ["test_module.py::test_3"]);

        let report = collect(manifest, "tracker", &["tracker#1111"])?;
        assert_eq!(selected_ids(&report), ["test_module.py::test_3"]);
    }
    Ok(())
}

#[test]
fn test_filter_multiple_trackers() -> Result<()> {
    let manifest = module(vec![
        ticket("test_1", json!({"bz": 1111, "gh": 2111})),
        ticket("test_2", json!({"bz": 1112, "gh": 2112})),
        ticket("test_3", json!({"bz": "1113"})),
    ]);

    let report = collect(manifest.clone(), "bz,gh", &["bz#1111"])?;
    assert_eq!(selected_ids(&report), ["test_module.py::test_1"]);

    let report = collect(manifest.clone(), "bz,gh", &["gh#2111"])?;
    assert_eq!(selected_ids(&report), ["test_module.py::test_1"]);

    let report = collect(manifest.clone(), "bz,gh", &["bz#1111", "gh#2112"])?;
    assert_eq!(
        selected_ids(&report),
        ["test_module.py::test_1", "test_module.py::test_2"]
    );

    let report = collect(manifest, "bz,gh", &["bz#1113"])?;
    assert_eq!(selected_ids(&report), ["test_module.py::test_3"]);
    assert_eq!(
        report.deselected,
        ["test_module.py::test_1", "test_module.py::test_2"]
    );
    Ok(())
}

#[test]
fn test_class_markers_are_inherited() -> Result<()> {
    let manifest = module(vec![json!({
        "name": "TestMark",
        "markers": [{"name": "ticket", "kwargs": {"tracker": 1111}}],
        "children": [
            {"name": "test_1", "markers": [{"name": "ticket", "kwargs": {"tracker": 1112}}]},
            {"name": "test_2"}
        ]
    })]);

    let report = collect(manifest.clone(), "tracker", &["tracker#1111"])?;
    assert_eq!(
        selected_ids(&report),
        [
            "test_module.py::TestMark::test_1",
            "test_module.py::TestMark::test_2"
        ]
    );
    assert_eq!(report.selected[0].tickets, ["tracker#1111", "tracker#1112"]);

    let report = collect(manifest, "tracker", &["tracker#1112"])?;
    assert_eq!(selected_ids(&report), ["test_module.py::TestMark::test_1"]);
    assert_eq!(report.deselected, ["test_module.py::TestMark::test_2"]);
    Ok(())
}

#[test]
fn test_unmarked_items_only_survive_without_filter() -> Result<()> {
    let manifest = module(vec![
        json!({"name": "test_plain", "markers": [{"name": "skip"}]}),
        ticket("test_marked", json!({"gh": 7})),
    ]);

    let report = collect(manifest.clone(), "gh", &[])?;
    assert_eq!(report.selected.len(), 2);
    assert!(report.selected[0].tickets.is_empty());

    let report = collect(manifest, "gh", &["gh#7"])?;
    assert_eq!(selected_ids(&report), ["test_module.py::test_marked"]);
    assert_eq!(report.deselected, ["test_module.py::test_plain"]);
    Ok(())
}

#[test]
fn test_text_output_lists_selected_items_with_tickets() -> Result<()> {
    let manifest = module(vec![
        ticket("test_1", json!({"tracker": [1112, 1111], "gh": 1113})),
        json!({"name": "test_2"}),
    ]);

    let report = collect(manifest, "tracker, gh", &[])?;
    assert_eq!(
        report.to_text(),
        "test_module.py::test_1 [gh#1113, tracker#1111, tracker#1112]\ntest_module.py::test_2\n"
    );
    Ok(())
}

#[test]
fn test_ids_above_i64_match_exactly() -> Result<()> {
    let manifest = module(vec![
        ticket("test_large", json!({"gh": 9223372036854775809u64})),
        ticket("test_neighbour", json!({"gh": 9223372036854775808u64})),
    ]);

    let report = collect(manifest, "gh", &["gh#9223372036854775809"])?;

    assert_eq!(selected_ids(&report), ["test_module.py::test_large"]);
    assert_eq!(report.deselected, ["test_module.py::test_neighbour"]);
    Ok(())
}

#[test]
fn test_duplicate_node_ids_are_rejected() -> Result<()> {
    let manifest = module(vec![
        ticket("test_1", json!({"gh": 1})),
        ticket("test_1", json!({"gh": 2})),
    ]);

    let err = collect(manifest, "gh", &["gh#1"]).unwrap_err();

    assert!(matches!(err, TicketError::ManifestError { .. }));
    assert!(err.to_string().contains("test_module.py::test_1"));
    Ok(())
}
