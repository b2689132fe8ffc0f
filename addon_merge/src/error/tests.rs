//! Unit tests for error construction and classification.

use std::io;

use rstest::rstest;

use super::AddonError;
use crate::SectionName;

fn parse_error() -> AddonError {
    let source = serde_yaml_ng::from_str::<serde_yaml_ng::Value>("key: [")
        .expect_err("unterminated sequence should not parse");
    AddonError::Parse {
        fragment: "broken.yml".into(),
        source,
    }
}

#[test]
fn collision_message_names_section_key_and_both_fragments() {
    let err = AddonError::collision(SectionName::Outputs, "QueueArn", "b.yml", "a.yml");
    assert_eq!(
        err.to_string(),
        "Outputs key 'QueueArn' in addon b.yml is already defined by addon a.yml"
    );
    assert!(err.is_collision());
}

#[test]
fn passthrough_collision_reads_as_top_level() {
    let err = AddonError::collision(SectionName::Passthrough, "Description", "b.yml", "a.yml");
    assert!(err.to_string().starts_with("top-level key 'Description'"));
}

#[test]
fn read_error_names_fragment_and_workload() {
    let err = AddonError::Read {
        fragment: "db.yml".into(),
        workload: "api".into(),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert_eq!(err.to_string(), "read addon db.yml under api: denied");
}

#[test]
fn parse_error_keeps_underlying_cause() {
    let err = parse_error();
    assert!(err.to_string().starts_with("parse addon broken.yml: "));
    assert!(std::error::Error::source(&err).is_some());
}

#[rstest]
#[case::structure(AddonError::structure("a.yml", "bad"), Some("a.yml"))]
#[case::collision(
    AddonError::collision(SectionName::Resources, "Bucket", "b.yml", "a.yml"),
    Some("b.yml")
)]
#[case::parse(parse_error(), Some("broken.yml"))]
#[case::listing(
    AddonError::Listing {
        workload: "api".into(),
        source: io::Error::other("boom"),
    },
    None
)]
fn attributes_errors_to_fragments(#[case] err: AddonError, #[case] expected: Option<&str>) {
    assert_eq!(err.fragment(), expected);
}

#[test]
fn only_collisions_classify_as_collisions() {
    assert!(!AddonError::structure("a.yml", "bad").is_collision());
    assert!(!parse_error().is_collision());
}
