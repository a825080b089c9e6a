use confedit::Document;

fn to_lines(source: &str) -> Vec<String> {
    source.lines().map(String::from).collect()
}

fn banner() -> String {
    format!("    |{}", "-".repeat(74))
}

fn fixture() -> Vec<String> {
    let mut lines = to_lines(
        "<?php

return [
",
    );
    lines.push("    /*".to_string());
    lines.push(banner());
    lines.push("    | Application Name".to_string());
    lines.push(banner());
    lines.push("    |".to_string());
    lines.push("    | This value is the name of your application. It is used when the".to_string());
    lines.push("    | framework needs to place the application's name in a notification.".to_string());
    lines.push("    |".to_string());
    lines.push("    */".to_string());
    lines.extend(to_lines(
        "
    'name' => env('APP_NAME', 'Laravel'),
    'debug' => false,

    'database' => [
        'host' => env('DB_HOST', 'localhost'),
        'port' => 3306,
        // failover is resolved at runtime
        'failover' => null,
    ],

    'providers' => [
        'one',
        'two',
        'three',
        'four',
        'five'
    ],

];",
    ));
    lines
}

#[test]
fn test_unmodified_document_renders_back_exactly() {
    let lines = fixture();
    let doc = Document::parse(&lines).unwrap();
    assert_eq!(doc.to_lines(), lines);
}

#[test]
fn test_untouched_nodes_are_clean() {
    let lines = fixture();
    let doc = Document::parse(&lines).unwrap();

    for path in [
        "name",
        "debug",
        "database",
        "database.host",
        "database.port",
        "database.failover",
        "providers",
    ] {
        let id = doc.find(path).unwrap();
        assert!(!doc.is_dirty(id), "node '{}' should be clean", path);
        assert!(!doc.is_new(id));
    }
    assert!(!doc.is_dirty(doc.root()));
}

#[test]
fn test_rich_comment_survives_round_trip() {
    let lines = fixture();
    let doc = Document::parse(&lines).unwrap();

    let comment = doc.children(doc.root())[0];
    assert_eq!(doc.comment_label(comment), Some("Application Name"));
    assert!(!doc.is_dirty(comment));
    assert_eq!(doc.render_content(comment).len(), 9);
}

#[test]
fn test_line_comment_survives_round_trip() {
    let lines = fixture();
    let doc = Document::parse(&lines).unwrap();

    let failover = doc.find("database.failover").unwrap();
    let comment = doc.bound_comment(failover).unwrap();
    assert_eq!(
        doc.comment_label(comment),
        Some("failover is resolved at runtime")
    );
    assert!(!doc.is_dirty(comment));
}

#[test]
fn test_multi_line_array_round_trip() {
    let lines = fixture();
    let doc = Document::parse(&lines).unwrap();

    let providers = doc.find("providers").unwrap();
    assert_eq!(
        doc.payload(providers),
        Some("['one', 'two', 'three', 'four', 'five']")
    );
    assert!(!doc.is_dirty(providers));
    assert_eq!(doc.render_content(providers).len(), 7);
}

#[test]
fn test_reflow_is_idempotent() {
    let lines = fixture();
    let mut doc = Document::parse(&lines).unwrap();

    doc.reflow();
    let first: Vec<(usize, usize)> = walk_ranges(&doc);
    doc.reflow();
    let second: Vec<(usize, usize)> = walk_ranges(&doc);
    assert_eq!(first, second);
}

#[test]
fn test_reflow_keeps_block_anchor() {
    let lines = fixture();
    let mut doc = Document::parse(&lines).unwrap();

    let anchor = doc.node(doc.root()).start;
    doc.reflow();
    assert_eq!(doc.node(doc.root()).start, anchor);

    // prolog and epilog still pass through after a layout change
    let output = doc.to_lines();
    assert_eq!(output[0], "<?php");
    assert_eq!(output[anchor], "return [");
}

#[test]
fn test_render_after_reflow_is_internally_consistent() {
    let lines = fixture();
    let mut doc = Document::parse(&lines).unwrap();
    doc.reflow();

    // every node's render output fits its assigned range
    for path in ["name", "database", "database.port", "providers"] {
        let id = doc.find(path).unwrap();
        let node = doc.node(id);
        let rendered = doc.render(id);
        for line in rendered.keys() {
            assert!(
                (node.start..=node.end).contains(line),
                "line {} of '{}' escapes range {}..={}",
                line,
                path,
                node.start,
                node.end
            );
        }
    }
}

#[test]
fn test_reparse_of_reflowed_output_is_stable() {
    let lines = fixture();
    let mut doc = Document::parse(&lines).unwrap();
    doc.reflow();

    let output = doc.to_lines();
    let second = Document::parse(&output).unwrap();
    assert_eq!(second.to_lines(), output);

    let port = second.find("database.port").unwrap();
    assert_eq!(second.payload(port), Some("3306"));
}

fn walk_ranges(doc: &Document) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut pending = vec![doc.root()];
    while let Some(id) = pending.pop() {
        let node = doc.node(id);
        ranges.push((node.start, node.end));
        pending.extend(doc.children(id).iter().copied());
    }
    ranges
}
