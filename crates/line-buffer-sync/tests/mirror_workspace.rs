use line_buffer::{
    BufferOptions, ContractViolation, EndOfLine, Position, VerifyLevel, WordDefinition,
};
use line_buffer_sync::{
    MirrorWorkspace, ModelChangedEvent, ModelContentChange, RawModelData, SyncError, WireRange,
};
use pretty_assertions::assert_eq;

const URL: &str = "inmemory://model/1";

fn open(workspace: &mut MirrorWorkspace, lines: &[&str], eol: &str, version: u64) {
    workspace
        .accept_new_model(RawModelData {
            url: URL.to_string(),
            version_id: version,
            lines: lines.iter().map(|s| s.to_string()).collect(),
            eol: eol.to_string(),
        })
        .unwrap();
}

fn change(range: WireRange, text: &str) -> ModelContentChange {
    ModelContentChange {
        range,
        text: text.to_string(),
    }
}

#[test]
fn test_decode_new_model_from_json() {
    let data: RawModelData = serde_json::from_str(
        r#"{ "url": "file:///x.rs", "versionId": 3, "lines": ["fn main() {", "}"], "EOL": "\r\n" }"#,
    )
    .unwrap();

    let mut workspace = MirrorWorkspace::new();
    workspace.accept_new_model(data).unwrap();

    let model = workspace.model("file:///x.rs").unwrap();
    assert_eq!(model.version(), 3);
    assert_eq!(model.eol(), EndOfLine::CrLf);
    assert_eq!(model.get_text(), "fn main() {\r\n}");
}

#[test]
fn test_decode_change_event_from_json() {
    let mut workspace = MirrorWorkspace::new();
    open(&mut workspace, &["ab", "cd", "ef"], "\n", 1);

    let event: ModelChangedEvent = serde_json::from_str(
        r#"{
            "changes": [
                {
                    "range": { "startLineNumber": 1, "startColumn": 3, "endLineNumber": 2, "endColumn": 3 },
                    "rangeOffset": 2,
                    "rangeLength": 3,
                    "text": "X"
                }
            ],
            "eol": "\n",
            "versionId": 2,
            "isUndoing": false,
            "isRedoing": false
        }"#,
    )
    .unwrap();
    workspace.accept_model_changed(URL, &event).unwrap();

    let model = workspace.model(URL).unwrap();
    assert_eq!(model.lines(), &["abX", "ef"]);
    assert_eq!(model.version(), 2);
}

#[test]
fn test_changes_apply_in_order() {
    let mut workspace = MirrorWorkspace::with_options(
        BufferOptions::default().with_verify(VerifyLevel::Full),
    );
    open(&mut workspace, &["hello"], "\n", 1);
    workspace.model_mut(URL).unwrap().reader();

    let event = ModelChangedEvent {
        changes: vec![
            change(WireRange::new(1, 4, 1, 4), "\nworld"),
            change(WireRange::new(2, 8, 2, 8), "!"),
        ],
        eol: None,
        version_id: 2,
    };
    workspace.accept_model_changed(URL, &event).unwrap();

    let model = workspace.model_mut(URL).unwrap();
    assert_eq!(model.lines(), &["hel", "worldlo!"]);
    assert_eq!(model.offset_at(Position::new(2, 7)).unwrap(), 11);
    assert!(model.verify().is_ok());
}

#[test]
fn test_stale_event_is_rejected() {
    let mut workspace = MirrorWorkspace::new();
    open(&mut workspace, &["abc"], "\n", 5);

    let event = ModelChangedEvent {
        changes: vec![change(WireRange::new(1, 1, 1, 1), "x")],
        eol: None,
        version_id: 4,
    };
    assert_eq!(
        workspace.accept_model_changed(URL, &event),
        Err(SyncError::StaleVersion {
            url: URL.to_string(),
            event_version: 4,
            model_version: 5,
        })
    );
    assert_eq!(workspace.model(URL).unwrap().get_text(), "abc");
}

#[test]
fn test_equal_version_is_accepted() {
    let mut workspace = MirrorWorkspace::new();
    open(&mut workspace, &["abc"], "\n", 5);

    let event = ModelChangedEvent {
        changes: vec![change(WireRange::new(1, 4, 1, 4), "d")],
        eol: None,
        version_id: 5,
    };
    workspace.accept_model_changed(URL, &event).unwrap();
    assert_eq!(workspace.model(URL).unwrap().get_text(), "abcd");
}

#[test]
fn test_unknown_model() {
    let mut workspace = MirrorWorkspace::new();
    let event = ModelChangedEvent {
        changes: Vec::new(),
        eol: None,
        version_id: 1,
    };
    assert_eq!(
        workspace.accept_model_changed("file:///missing", &event),
        Err(SyncError::UnknownModel("file:///missing".to_string()))
    );
}

#[test]
fn test_out_of_range_change_leaves_mirror_untouched() {
    let mut workspace = MirrorWorkspace::new();
    open(&mut workspace, &["one", "two"], "\n", 1);

    let event = ModelChangedEvent {
        changes: vec![
            change(WireRange::new(1, 1, 1, 1), "0"),
            change(WireRange::new(2, 1, 2, 9), ""),
        ],
        eol: Some("\r\n".to_string()),
        version_id: 2,
    };
    let err = workspace.accept_model_changed(URL, &event).unwrap_err();
    assert!(matches!(
        err,
        SyncError::Buffer(ContractViolation::ColumnOutOfRange { .. })
    ));

    let model = workspace.model(URL).unwrap();
    assert_eq!(model.get_text(), "one\ntwo");
    assert_eq!(model.version(), 1);
    assert_eq!(model.eol(), EndOfLine::Lf);
}

#[test]
fn test_eol_change_event() {
    let mut workspace = MirrorWorkspace::new();
    open(&mut workspace, &["a", "b"], "\n", 1);
    workspace.model_mut(URL).unwrap().reader();

    let event = ModelChangedEvent {
        changes: Vec::new(),
        eol: Some("\r\n".to_string()),
        version_id: 2,
    };
    workspace.accept_model_changed(URL, &event).unwrap();

    let model = workspace.model_mut(URL).unwrap();
    assert!(!model.is_index_built());
    assert_eq!(model.position_at(3).unwrap(), Position::new(2, 0));
}

#[test]
fn test_invalid_initial_eol() {
    let mut workspace = MirrorWorkspace::new();
    let err = workspace
        .accept_new_model(RawModelData {
            url: URL.to_string(),
            version_id: 1,
            lines: vec!["x".to_string()],
            eol: "\n\n".to_string(),
        })
        .unwrap_err();
    assert_eq!(
        err,
        SyncError::Buffer(ContractViolation::InvalidEol("\n\n".to_string()))
    );
    assert!(workspace.is_empty());
}

#[test]
fn test_remove_and_clear() {
    let mut workspace = MirrorWorkspace::new();
    open(&mut workspace, &["x"], "\n", 1);
    workspace
        .accept_new_model(RawModelData {
            url: "inmemory://model/2".to_string(),
            version_id: 1,
            lines: vec!["y".to_string()],
            eol: "\n".to_string(),
        })
        .unwrap();
    assert_eq!(workspace.len(), 2);

    assert!(workspace.accept_removed_model(URL));
    assert!(!workspace.accept_removed_model(URL));
    assert!(workspace.model(URL).is_none());

    let urls: Vec<&str> = workspace.models().map(|(url, _)| url).collect();
    assert_eq!(urls, vec!["inmemory://model/2"]);

    workspace.clear();
    assert!(workspace.is_empty());
}

#[test]
fn test_word_queries_on_mirror() {
    let mut workspace = MirrorWorkspace::new();
    open(&mut workspace, &["let total = price * qty;"], "\n", 1);

    let model = workspace.model(URL).unwrap();
    let definition = WordDefinition::default();
    let words: Vec<&str> = model.words(&definition).collect();
    assert_eq!(words, vec!["let", "total", "price", "qty"]);
}
