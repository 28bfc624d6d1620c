//! Batch builder integration tests.
//!
//! Each case builds a body, checks it byte for byte, then flushes and checks
//! the builder renders `{}` again.

use docdelta_core::{BatchBuilder, BatchConfig, Document, FieldAllowList};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn doc(id: &str, int1: i64, str1: &str) -> Document {
    Document::new(id).with_field("int1", int1).with_field("str1", str1)
}

fn config(allowed: Option<&[&str]>, in_place: &[&str]) -> BatchConfig {
    let allowed = match allowed {
        Some(keys) => FieldAllowList::only(keys.iter().copied()),
        None => FieldAllowList::all(),
    };
    BatchConfig::new()
        .with_allowed_fields(allowed)
        .with_in_place_fields(in_place.iter().copied())
}

fn assert_build_then_flush(mut builder: BatchBuilder, expected: &str) {
    let got = builder.build().unwrap();
    assert_eq!(got, expected);

    builder.flush();
    assert_eq!(builder.build().unwrap(), "{}");
}

// ---------------------------------------------------------------------------
// Full adds and deletes
// ---------------------------------------------------------------------------

#[test]
fn test_nothing_renders_empty_object() {
    assert_build_then_flush(BatchBuilder::new(BatchConfig::new()), "{}");
}

#[test]
fn test_single_document() {
    let mut builder = BatchBuilder::new(BatchConfig::new());
    builder.add(doc("1", 10, "string"));

    assert_build_then_flush(
        builder,
        r#"{"add":{"doc":{"id":"1","int1":10,"str1":"string"}}}"#,
    );
}

#[test]
fn test_two_documents_and_deletes() {
    let mut builder = BatchBuilder::new(BatchConfig::new());
    builder.add_all([doc("2", 20, "string2"), doc("1", 10, "string1")]);
    builder.delete_all(["12", "11"]);

    assert_build_then_flush(
        builder,
        concat!(
            r#"{"add":{"doc":{"id":"1","int1":10,"str1":"string1"}}"#,
            r#","add":{"doc":{"id":"2","int1":20,"str1":"string2"}}"#,
            r#","delete":["11","12"]}"#,
        ),
    );
}

#[test]
fn test_only_deletes() {
    let mut builder = BatchBuilder::new(BatchConfig::new());
    builder.delete("b");
    builder.delete("a");
    builder.delete("a");

    assert_build_then_flush(builder, r#"{"delete":["a","b"]}"#);
}

#[test]
fn test_documents_with_allowed_fields() {
    let mut builder = BatchBuilder::new(config(Some(&["int1", "str1"]), &[]));
    builder.add(doc("1", 10, "string1").with_field("int2", 10).with_field("str2", "x"));
    builder.add(doc("2", 20, "string2").with_field("int2", 10).with_field("str2", "x"));
    builder.delete_all(["11", "12"]);

    assert_build_then_flush(
        builder,
        concat!(
            r#"{"add":{"doc":{"id":"1","int1":10,"str1":"string1"}}"#,
            r#","add":{"doc":{"id":"2","int1":20,"str1":"string2"}}"#,
            r#","delete":["11","12"]}"#,
        ),
    );
}

#[test]
fn test_later_add_replaces_earlier_one() {
    let mut builder = BatchBuilder::new(BatchConfig::new());
    builder.add(doc("1", 1, "first"));
    builder.add(doc("1", 2, "second"));

    assert_build_then_flush(
        builder,
        r#"{"add":{"doc":{"id":"1","int1":2,"str1":"second"}}}"#,
    );
}

// ---------------------------------------------------------------------------
// In-place updates
// ---------------------------------------------------------------------------

#[test]
fn test_new_document_is_never_in_place() {
    // Scenario: no old version exists even though every field is in-place eligible
    let mut builder = BatchBuilder::new(config(Some(&["int1", "str1"]), &["int1", "str1"]));
    builder.add(doc("1", 10, "string"));

    assert_build_then_flush(
        builder,
        r#"{"add":{"doc":{"id":"1","int1":10,"str1":"string"}}}"#,
    );
}

#[test]
fn test_changed_in_place_field_sent_as_set() {
    let mut builder = BatchBuilder::new(config(Some(&["int1", "str1"]), &["int1", "str1"]));
    builder.update(doc("1", 10, "string"), doc("1", 5, "string"));

    assert_build_then_flush(builder, r#"{"add":{"doc":{"id":"1","int1":{"set":10}}}}"#);
}

#[test]
fn test_in_place_without_allow_list() {
    let mut builder = BatchBuilder::new(config(None, &["int1"]));
    builder.update(doc("1", 10, "x"), doc("1", 5, "x"));

    assert_build_then_flush(builder, r#"{"add":{"doc":{"id":"1","int1":{"set":10}}}}"#);
}

#[test]
fn test_new_document_filtered_by_allow_list() {
    let mut builder = BatchBuilder::new(config(Some(&["int1", "str1"]), &["int1"]));
    builder.add(doc("1", 10, "string").with_field("other", "other"));

    assert_build_then_flush(
        builder,
        r#"{"add":{"doc":{"id":"1","int1":10,"str1":"string"}}}"#,
    );
}

#[test]
fn test_disallowed_change_does_not_block_in_place() {
    let mut builder = BatchBuilder::new(config(Some(&["int1", "str1"]), &["int1"]));
    builder.update(
        doc("1", 20, "string").with_field("other", "changed"),
        doc("1", 10, "string").with_field("other", "other"),
    );

    assert_build_then_flush(builder, r#"{"add":{"doc":{"id":"1","int1":{"set":20}}}}"#);
}

#[test]
fn test_non_in_place_change_forces_full_add() {
    let mut builder = BatchBuilder::new(config(Some(&["int1", "str1"]), &["int1"]));
    builder.update(
        doc("1", 1, "changed").with_field("other", "other"),
        doc("1", 1, "string").with_field("other", "other"),
    );

    assert_build_then_flush(
        builder,
        r#"{"add":{"doc":{"id":"1","int1":1,"str1":"changed"}}}"#,
    );
}

#[test]
fn test_all_allowed_fields_changed_forces_full_add() {
    let mut builder = BatchBuilder::new(config(Some(&["int1", "str1"]), &["int1"]));
    builder.update(
        doc("1", 10, "changed").with_field("other", "other"),
        doc("1", 1, "string").with_field("other", "other"),
    );

    assert_build_then_flush(
        builder,
        r#"{"add":{"doc":{"id":"1","int1":10,"str1":"changed"}}}"#,
    );
}

#[test]
fn test_only_disallowed_field_changed_is_skipped() {
    let mut builder = BatchBuilder::new(config(Some(&["int1", "str1"]), &["int1"]));
    builder.update(
        doc("1", 1, "string").with_field("other", "changed"),
        doc("1", 1, "string").with_field("other", "other"),
    );

    assert_build_then_flush(builder, "{}");
}

#[test]
fn test_removed_allowed_field_forces_full_add() {
    let mut builder = BatchBuilder::new(config(Some(&["int1", "str1"]), &["int1"]));
    builder.update(
        Document::new("1").with_field("int1", 1).with_field("other", "other"),
        doc("1", 1, "string").with_field("other", "other"),
    );

    assert_build_then_flush(builder, r#"{"add":{"doc":{"id":"1","int1":1}}}"#);
}

#[test]
fn test_removed_in_place_field_forces_full_add() {
    // Scenario: the removed field is itself in-place eligible; removal still
    // cannot be expressed as a partial update
    let mut builder = BatchBuilder::new(config(Some(&["int1", "str1"]), &["int1"]));
    builder.update(
        Document::new("1")
            .with_field("str1", "string")
            .with_field("other", "other"),
        doc("1", 1, "string").with_field("other", "other"),
    );

    assert_build_then_flush(builder, r#"{"add":{"doc":{"id":"1","str1":"string"}}}"#);
}

#[test]
fn test_removal_with_other_in_place_changes_forces_full_add() {
    let mut builder = BatchBuilder::new(config(None, &["int1", "str1", "int2"]));
    builder.update(
        Document::new("1").with_field("int1", 2).with_field("str1", "y"),
        Document::new("1")
            .with_field("int1", 1)
            .with_field("int2", 5)
            .with_field("str1", "x"),
    );

    assert_build_then_flush(builder, r#"{"add":{"doc":{"id":"1","int1":2,"str1":"y"}}}"#);
}

#[test]
fn test_mixed_batch_orders_adds_by_id() {
    let mut builder = BatchBuilder::new(config(None, &["int1"]));
    builder.update(doc("3", 30, "same"), doc("3", 3, "same"));
    builder.add(doc("1", 10, "new"));
    builder.update(doc("2", 2, "same"), doc("2", 2, "same"));
    builder.add_old(doc("0", 0, "gone"));
    builder.delete("9");

    assert_build_then_flush(
        builder,
        concat!(
            r#"{"add":{"doc":{"id":"1","int1":10,"str1":"new"}}"#,
            r#","add":{"doc":{"id":"3","int1":{"set":30}}}"#,
            r#","delete":["9"]}"#,
        ),
    );
}

#[test]
fn test_type_change_is_a_change() {
    let mut builder = BatchBuilder::new(config(None, &["n"]));
    builder.update(
        Document::new("1").with_field("n", "10"),
        Document::new("1").with_field("n", 10),
    );

    assert_build_then_flush(builder, r#"{"add":{"doc":{"id":"1","n":{"set":"10"}}}}"#);
}

// ---------------------------------------------------------------------------
// Determinism and failure
// ---------------------------------------------------------------------------

#[test]
fn test_build_is_idempotent() {
    let mut builder = BatchBuilder::new(config(None, &["int1"]));
    builder.update(doc("1", 2, "a"), doc("1", 1, "a"));
    builder.add(doc("2", 1, "b"));
    builder.delete("3");

    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unsupported_value_aborts_whole_build() {
    let mut builder = BatchBuilder::new(BatchConfig::new());
    builder.add(doc("1", 1, "fine"));
    builder.add(Document::new("2").with_field("flag", true));
    builder.delete("3");

    let err = builder.build().unwrap_err();
    let ex: docdelta_core::ExError = err.into();
    assert_eq!(ex.kind(), docdelta_core::ExErrorKind::UnsupportedFieldType);
    assert_eq!(ex.document_id(), Some("2"));
    assert_eq!(ex.field_key(), Some("flag"));
}

#[test]
fn test_flush_keeps_configuration() {
    let mut builder = BatchBuilder::new(config(Some(&["int1"]), &["int1"]));
    builder.add(doc("1", 1, "x"));
    builder.flush();

    builder.update(doc("1", 2, "y"), doc("1", 1, "x"));
    assert_eq!(
        builder.build().unwrap(),
        r#"{"add":{"doc":{"id":"1","int1":{"set":2}}}}"#
    );
}

#[test]
fn test_in_place_add_only_checks_emitted_fields() {
    let mut builder = BatchBuilder::new(config(None, &["a"]));
    builder.update(
        Document::new("1").with_field("a", 2).with_field("b", true),
        Document::new("1").with_field("a", 1).with_field("b", true),
    );

    assert_eq!(
        builder.build().unwrap(),
        r#"{"add":{"doc":{"id":"1","a":{"set":2}}}}"#
    );
}

#[test]
fn test_full_add_checks_every_allowed_field() {
    let mut builder = BatchBuilder::new(config(None, &[]));
    builder.update(
        Document::new("1").with_field("a", 2).with_field("b", true),
        Document::new("1").with_field("a", 1).with_field("b", true),
    );

    assert!(builder.build().is_err());
}
