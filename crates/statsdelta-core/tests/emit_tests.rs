//! Delta table rendering.

mod common;

use common::{deltas, fields};
use statsdelta_core::emit_deltas;

fn render(from: &str, to: &str, key_field: &str, output_fields: &[&str]) -> String {
    let set = deltas(from, to, key_field, output_fields);
    let mut out = Vec::new();
    emit_deltas(&set, key_field, &fields(output_fields), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_renders_all_four_statuses_sorted_by_key() {
    let out = render(
        "id,score\n4,9\n2,5\n1,10\n",
        "id,score\n3,7\n1,12.5\n4,9\n",
        "id",
        &["score"],
    );
    assert_eq!(
        out,
        "id,diff status,from_score,to_score,delta_score\n\
         1,changed,10,12.5,-2.50\n\
         2,deleted,5,,-5\n\
         3,added,,7,+7\n\
         4,not changed,9,9,0.00\n"
    );
}

#[test]
fn test_keys_sort_bytewise_not_numerically() {
    let out = render("id,v\n10,1\n9,1\nB,1\na,1\n", "id,v\n", "id", &["v"]);
    let keys: Vec<&str> = out
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(keys, vec!["10", "9", "B", "a"]);
}

#[test]
fn test_values_quoted_only_when_needed() {
    let out = render(
        "id,label\n1,\"a,b\"\n2,\"say \"\"hi\"\"\"\n3,plain\n",
        "id,label\n",
        "id",
        &["label"],
    );
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[1], "1,deleted,\"a,b\",,\"-a,b\"");
    assert_eq!(lines[2], "2,deleted,\"say \"\"hi\"\"\",,\"-say \"\"hi\"\"\"");
    assert_eq!(lines[3], "3,deleted,plain,,-plain");
}

#[test]
fn test_multiple_fields_keep_requested_order() {
    let out = render(
        "id,a,b\nk,1,5\n",
        "id,a,b\nk,2,5\n",
        "id",
        &["b", "a"],
    );
    assert_eq!(
        out,
        "id,diff status,from_b,to_b,delta_b,from_a,to_a,delta_a\n\
         k,changed,5,5,0.00,1,2,-1.00\n"
    );
}

#[test]
fn test_key_column_uses_trimmed_key() {
    let out = render("id,v\n  7  ,1\n", "id,v\n7,1\n", "id", &["v"]);
    assert_eq!(out.lines().nth(1), Some("7,not changed,1,1,0.00"));
}
