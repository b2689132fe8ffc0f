//! Merge engine behaviour: unions, collisions, ordering and atomicity.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};

use super::{TemplateMerger, merge_templates};
use crate::{AddonError, SectionName, Template};

fn template(name: &str, contents: &str) -> Result<Template> {
    Template::parse(name, contents.as_bytes()).map_err(|err| anyhow!(err.to_string()))
}

fn merge_all(fragments: Vec<Template>) -> Result<Template> {
    merge_templates(fragments).map_err(|err| anyhow!(err.to_string()))
}

fn keys(template: &Template, section: SectionName) -> Vec<String> {
    template.section(section).keys().cloned().collect()
}

#[fixture]
fn bucket() -> Template {
    Template::parse(
        "a.yaml",
        b"Parameters:\n  App: {Type: String}\nResources:\n  Bucket:\n    Type: AWS::S3::Bucket\nOutputs:\n  BucketName:\n    Value: !Ref Bucket\n",
    )
    .expect("bucket fixture parses")
}

#[fixture]
fn queue() -> Template {
    Template::parse(
        "b.yaml",
        b"Parameters:\n  Env: {Type: String}\nResources:\n  Queue:\n    Type: AWS::SQS::Queue\nOutputs:\n  QueueUrl:\n    Value: !Ref Queue\n",
    )
    .expect("queue fixture parses")
}

#[rstest]
fn disjoint_fragments_union_in_processing_order(bucket: Template, queue: Template) -> Result<()> {
    let merged = merge_all(vec![bucket, queue])?;
    ensure!(merged.name() == "merged");
    ensure!(keys(&merged, SectionName::Parameters) == ["App", "Env"]);
    ensure!(keys(&merged, SectionName::Resources) == ["Bucket", "Queue"]);
    ensure!(keys(&merged, SectionName::Outputs) == ["BucketName", "QueueUrl"]);
    Ok(())
}

#[rstest]
fn merge_preserves_definitions(bucket: Template, queue: Template) -> Result<()> {
    let expected = bucket
        .get(SectionName::Resources, "Bucket")
        .cloned()
        .ok_or_else(|| anyhow!("fixture lacks Bucket"))?;
    let merged = merge_all(vec![bucket, queue])?;
    ensure!(merged.get(SectionName::Resources, "Bucket") == Some(&expected));
    Ok(())
}

#[rstest]
#[case::resources(SectionName::Resources, "Resources:\n  Bucket: {Type: AWS::S3::Bucket}\n", "Bucket")]
#[case::parameters(SectionName::Parameters, "Parameters:\n  App: {Type: String}\n", "App")]
#[case::outputs(SectionName::Outputs, "Outputs:\n  BucketName: {Value: x}\n", "BucketName")]
#[case::conditions(SectionName::Conditions, "Conditions:\n  IsProd: !Equals [a, b]\n", "IsProd")]
#[case::mappings(SectionName::Mappings, "Mappings:\n  Sizes: {prod: {n: 1}}\n", "Sizes")]
#[case::metadata(SectionName::Metadata, "Metadata:\n  Owner: team\n", "Owner")]
#[case::passthrough(SectionName::Passthrough, "Description: x\n", "Description")]
fn duplicate_keys_collide_in_every_section(
    #[case] section: SectionName,
    #[case] contents: &str,
    #[case] key: &str,
) -> Result<()> {
    let first = template("a.yaml", contents)?;
    let second = template("b.yaml", contents)?;
    match merge_templates(vec![first, second]) {
        Err(AddonError::Collision {
            section: found_section,
            key: found_key,
            fragment,
            first_declared_in,
        }) => {
            ensure!(found_section == section, "section {found_section} != {section}");
            ensure!(found_key == key);
            ensure!(fragment == "b.yaml");
            ensure!(first_declared_in == "a.yaml");
            Ok(())
        }
        other => Err(anyhow!("expected collision, got {other:?}")),
    }
}

#[rstest]
fn collisions_do_not_depend_on_processing_order(bucket: Template) -> Result<()> {
    let other = template("z.yaml", "Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n")?;
    for fragments in [vec![bucket.clone(), other.clone()], vec![other, bucket]] {
        let err = merge_templates(fragments)
            .err()
            .ok_or_else(|| anyhow!("expected a collision"))?;
        ensure!(err.is_collision(), "got {err}");
    }
    Ok(())
}

#[rstest]
fn same_key_in_different_sections_is_not_a_collision() -> Result<()> {
    let resource = template("a.yaml", "Resources:\n  Queue:\n    Type: AWS::SQS::Queue\n")?;
    let output = template("b.yaml", "Outputs:\n  Queue:\n    Value: !Ref Queue\n")?;
    let merged = merge_all(vec![resource, output])?;
    ensure!(keys(&merged, SectionName::Resources) == ["Queue"]);
    ensure!(keys(&merged, SectionName::Outputs) == ["Queue"]);
    Ok(())
}

#[rstest]
fn rejected_fragment_leaves_accumulator_unchanged(bucket: Template) -> Result<()> {
    let mut merger = TemplateMerger::new();
    merger
        .merge_fragment(bucket)
        .map_err(|err| anyhow!(err.to_string()))?;
    let before = merger.merged().clone();

    let clashing = template(
        "b.yaml",
        "Parameters:\n  Fresh: {Type: String}\nResources:\n  Extra: {Type: A}\nOutputs:\n  BucketName: {Value: y}\n",
    )?;
    let err = merger
        .merge_fragment(clashing)
        .err()
        .ok_or_else(|| anyhow!("expected collision on BucketName"))?;
    ensure!(err.is_collision());
    ensure!(merger.merged() == &before, "accumulator mutated by a rejected fragment");
    ensure!(merger.fragment_count() == 1);
    ensure!(merger.declared_by(SectionName::Parameters, "Fresh").is_none());
    Ok(())
}

#[rstest]
fn reports_first_collision_in_canonical_section_order() -> Result<()> {
    let first = template("a.yaml", "Description: x\nResources:\n  Bucket: {Type: A}\n")?;
    let second = template("b.yaml", "Resources:\n  Bucket: {Type: A}\nDescription: y\n")?;
    match merge_templates(vec![first, second]) {
        Err(AddonError::Collision { section, key, .. }) => {
            ensure!(section == SectionName::Passthrough);
            ensure!(key == "Description");
            Ok(())
        }
        other => Err(anyhow!("expected collision, got {other:?}")),
    }
}

#[rstest]
fn tracks_which_fragment_declared_each_key(bucket: Template, queue: Template) -> Result<()> {
    let mut merger = TemplateMerger::default();
    for fragment in [bucket, queue] {
        merger
            .merge_fragment(fragment)
            .map_err(|err| anyhow!(err.to_string()))?;
    }
    ensure!(merger.declared_by(SectionName::Resources, "Bucket") == Some("a.yaml"));
    ensure!(merger.declared_by(SectionName::Resources, "Queue") == Some("b.yaml"));
    ensure!(merger.declared_by(SectionName::Outputs, "Bucket").is_none());
    ensure!(merger.fragment_count() == 2);
    Ok(())
}

#[rstest]
fn collision_names_the_fragment_that_declared_the_key(
    bucket: Template,
    queue: Template,
) -> Result<()> {
    let clashing = template("c.yaml", "Resources:\n  Queue:\n    Type: AWS::SQS::Queue\n")?;
    match merge_templates(vec![bucket, queue, clashing]) {
        Err(err @ AddonError::Collision { .. }) => {
            ensure!(
                err.to_string()
                    == "Resources key 'Queue' in addon c.yaml is already defined by addon b.yaml",
                "got {err}"
            );
            Ok(())
        }
        other => Err(anyhow!("expected collision, got {other:?}")),
    }
}

#[test]
fn no_fragments_merge_to_an_empty_template() -> Result<()> {
    let merged = merge_all(Vec::new())?;
    ensure!(merged.is_empty());
    for (section, entries) in merged.sections() {
        ensure!(entries.is_empty(), "{section} should be empty");
    }
    Ok(())
}

#[rstest]
fn merged_output_is_byte_identical_across_runs(bucket: Template, queue: Template) -> Result<()> {
    let render = |fragments: Vec<Template>| -> Result<String> {
        merge_all(fragments)?
            .to_yaml()
            .map_err(|err| anyhow!(err.to_string()))
    };
    let first = render(vec![bucket.clone(), queue.clone()])?;
    let second = render(vec![bucket, queue])?;
    ensure!(first == second);
    Ok(())
}
