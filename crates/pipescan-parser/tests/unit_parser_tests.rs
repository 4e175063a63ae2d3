//! Unit tests for the parameter and stage extractors
//!
//! Exercises the accepted YAML subset, type coercion, block boundaries and
//! the lenient handling of constructs outside the subset.

use pipescan_core::{DefaultValue, ParameterDeclaration, ParameterType, StageNode};
use pipescan_parser::*;

// =============================================================================
// Parameter Extraction Tests
// =============================================================================

#[test]
fn test_parameter_with_values() {
    let yaml = r#"
parameters:
- name: environment
  type: string
  default: 'staging'
  values:
  - staging
  - production
"#;

    let params = extract_parameters(yaml);
    assert_eq!(
        params,
        vec![ParameterDeclaration::new("environment")
            .with_default("staging")
            .with_values(["staging", "production"])]
    );
}

#[test]
fn test_boolean_parameter() {
    let yaml = r#"
parameters:
- name: runTests
  type: boolean
  default: true
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "runTests");
    assert_eq!(params[0].parameter_type, ParameterType::Boolean);
    assert_eq!(params[0].default, Some(DefaultValue::Boolean(true)));
    assert!(params[0].values.is_none());
    assert!(params[0].display_name.is_none());
}

#[test]
fn test_boolean_coercion() {
    let yaml = r#"
parameters:
- name: upper
  type: boolean
  default: 'TRUE'
- name: other
  type: boolean
  default: 'no'
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params[0].default, Some(DefaultValue::Boolean(true)));
    assert_eq!(params[1].default, Some(DefaultValue::Boolean(false)));
}

#[test]
fn test_number_coercion() {
    let yaml = r#"
parameters:
- name: ratio
  type: number
  default: '3.5'
- name: broken
  type: number
  default: 'abc'
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params[0].default, Some(DefaultValue::Number(3.5)));
    assert_eq!(params[1].default, Some(DefaultValue::Number(0.0)));
}

#[test]
fn test_unrecognized_type_defaults_to_string() {
    let yaml = r#"
parameters:
- name: weird
  type: frobnicate
  default: 42
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params[0].parameter_type, ParameterType::String);
    assert_eq!(params[0].default, Some(DefaultValue::String("42".to_string())));
}

#[test]
fn test_missing_type_defaults_to_string() {
    let params = extract_parameters("parameters:\n- name: plain\n");
    assert_eq!(params, vec![ParameterDeclaration::new("plain")]);
}

#[test]
fn test_display_name_and_quotes() {
    let yaml = r#"
parameters:
- name: "region"
  displayName: "Deployment region"
- name: label
  displayName: 'Unbalanced
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params[0].name, "region");
    assert_eq!(params[0].display_name.as_deref(), Some("Deployment region"));
    assert_eq!(params[1].display_name.as_deref(), Some("'Unbalanced"));
}

#[test]
fn test_values_and_default_are_independent() {
    let yaml = r#"
parameters:
- name: size
  type: number
  default: 2
  values:
  - 1
  - 2
  - 4
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params[0].default, Some(DefaultValue::Number(2.0)));
    assert_eq!(
        params[0].values,
        Some(vec!["1".to_string(), "2".to_string(), "4".to_string()])
    );
}

#[test]
fn test_values_list_closed_by_property() {
    let yaml = r#"
parameters:
- name: env
  values:
  - 'dev'
  - "prod"
  default: dev
  displayName: Environment
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params[0].values, Some(vec!["dev".to_string(), "prod".to_string()]));
    assert_eq!(params[0].default, Some(DefaultValue::String("dev".to_string())));
    assert_eq!(params[0].display_name.as_deref(), Some("Environment"));
}

#[test]
fn test_values_list_followed_by_next_parameter() {
    let yaml = r#"
parameters:
- name: env
  values:
  - dev
  - prod
- name: verbose
  type: boolean
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].values, Some(vec!["dev".to_string(), "prod".to_string()]));
    assert_eq!(params[1].name, "verbose");
    assert_eq!(params[1].parameter_type, ParameterType::Boolean);
}

#[test]
fn test_inline_values_list() {
    let yaml = "parameters:\n- name: pool\n  values: [linux, 'windows']\n";
    let params = extract_parameters(yaml);
    assert_eq!(
        params[0].values,
        Some(vec!["linux".to_string(), "windows".to_string()])
    );
}

#[test]
fn test_parameters_block_exits_at_top_level_key() {
    let yaml = r#"
parameters:
- name: first
  default: one
trigger:
- main
- name: notAParameter
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params, vec![ParameterDeclaration::new("first").with_default("one")]);
}

#[test]
fn test_only_first_parameters_block_is_read() {
    let yaml = r#"
parameters:
- name: outer
stages:
- stage: Build
  jobs:
  - template: build.yml
    parameters:
    - name: inner
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "outer");
}

#[test]
fn test_indented_parameters_block() {
    let yaml = r#"
parameters:
  - name: target
    type: string
    default: "linux"
  - name: retries
    type: number
    default: 3
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].default, Some(DefaultValue::String("linux".to_string())));
    assert_eq!(params[1].default, Some(DefaultValue::Number(3.0)));
}

#[test]
fn test_comments_and_blank_lines_are_skipped() {
    let yaml = r#"
# Pipeline inputs
parameters: # runtime
# the environment

- name: env   # target
  # choose one
  type: string

  default: dev # default env
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params, vec![ParameterDeclaration::new("env").with_default("dev")]);
}

#[test]
fn test_bullet_without_name_is_dropped() {
    let yaml = r#"
parameters:
- name: kept
  type: number
- type: boolean
  default: true
- name: after
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "kept");
    assert_eq!(params[0].parameter_type, ParameterType::Number);
    assert!(params[0].default.is_none());
    assert_eq!(params[1].name, "after");
}

#[test]
fn test_structured_default_keeps_scalar_head_only() {
    let yaml = r#"
parameters:
- name: steps
  type: stepList
  default: []
- name: config
  type: object
  default:
    type: nested
    retries: 3
- name: last
  type: boolean
"#;

    let params = extract_parameters(yaml);
    assert_eq!(params.len(), 3);
    assert_eq!(params[0].parameter_type, ParameterType::StepList);
    assert_eq!(params[0].default, Some(DefaultValue::String("[]".to_string())));
    assert_eq!(params[1].parameter_type, ParameterType::Object);
    assert!(params[1].default.is_none());
    assert_eq!(params[2].parameter_type, ParameterType::Boolean);
}

#[test]
fn test_last_scalar_occurrence_wins() {
    let yaml = "parameters:\n- name: x\n  default: a\n  default: b\n";
    let params = extract_parameters(yaml);
    assert_eq!(params[0].default, Some(DefaultValue::String("b".to_string())));
}

#[test]
fn test_crlf_line_endings() {
    let yaml = "parameters:\r\n- name: flag\r\n  type: boolean\r\n  default: true\r\n";
    let params = extract_parameters(yaml);
    assert_eq!(params[0].name, "flag");
    assert_eq!(params[0].default, Some(DefaultValue::Boolean(true)));
}

// =============================================================================
// Stage Extraction Tests
// =============================================================================

#[test]
fn test_stage_topology() {
    let yaml = r#"
stages:
- stage: Build
- stage: Test
  dependsOn: Build
- stage: Deploy
  dependsOn: [Build, Test]
"#;

    let stages = extract_stages(yaml);
    assert_eq!(
        stages,
        vec![
            StageNode::new("Build"),
            StageNode::new("Test").with_depends_on(["Build"]),
            StageNode::new("Deploy").with_depends_on(["Build", "Test"]),
        ]
    );
}

#[test]
fn test_inline_and_block_depends_on_are_equivalent() {
    let inline = r#"
stages:
- stage: Deploy
  dependsOn: [A, B]
  jobs:
  - job: Ship
"#;
    let block = r#"
stages:
- stage: Deploy
  dependsOn:
  - A
  - B
  jobs:
  - job: Ship
"#;

    let from_inline = extract_stages(inline);
    let from_block = extract_stages(block);
    assert_eq!(from_inline, from_block);
    assert_eq!(
        from_block[0].depends_on,
        Some(vec!["A".to_string(), "B".to_string()])
    );
}

#[test]
fn test_null_and_empty_depends_on_read_as_unspecified() {
    let yaml = r#"
stages:
- stage: Omitted
- stage: Null
  dependsOn: null
- stage: Upper
  dependsOn: NULL
- stage: Empty
  dependsOn: []
"#;

    let stages = extract_stages(yaml);
    assert_eq!(stages.len(), 4);
    for stage in &stages {
        assert!(stage.depends_on.is_none(), "{} should be unspecified", stage.name);
    }
}

#[test]
fn test_stage_name_quotes_and_comments() {
    let yaml = r#"
stages:
- stage: 'Deploy_Prod' # production
  dependsOn: "Build" # after build
- stage: Plain   # trailing
"#;

    let stages = extract_stages(yaml);
    assert_eq!(stages[0].name, "Deploy_Prod");
    assert_eq!(stages[0].depends_on, Some(vec!["Build".to_string()]));
    assert_eq!(stages[1].name, "Plain");
}

#[test]
fn test_quoted_inline_list_items() {
    let yaml = "stages:\n- stage: C\n  dependsOn: ['A', \"B\", ]\n";
    let stages = extract_stages(yaml);
    assert_eq!(stages[0].depends_on, Some(vec!["A".to_string(), "B".to_string()]));
}

#[test]
fn test_later_depends_on_overwrites_earlier() {
    let yaml = r#"
stages:
- stage: X
  dependsOn: A
  dependsOn:
  - B
  - C
- stage: Y
  dependsOn:
  - B
  dependsOn: null
"#;

    let stages = extract_stages(yaml);
    assert_eq!(stages[0].depends_on, Some(vec!["B".to_string(), "C".to_string()]));
    assert!(stages[1].depends_on.is_none());
}

#[test]
fn test_stages_nested_under_extends() {
    let yaml = r#"
extends:
  template: pipeline.yml
  parameters:
    stages:
    - stage: Build
    - stage: Ship
      dependsOn:
      - 'Build'
"#;

    let stages = extract_stages(yaml);
    assert_eq!(
        stages,
        vec![
            StageNode::new("Build"),
            StageNode::new("Ship").with_depends_on(["Build"]),
        ]
    );
}

#[test]
fn test_dangling_dependency_is_passed_through() {
    let yaml = "stages:\n- stage: Only\n  dependsOn: Missing\n";
    let stages = extract_stages(yaml);
    assert_eq!(stages[0].depends_on, Some(vec!["Missing".to_string()]));
}

#[test]
fn test_block_depends_on_ends_at_next_stage() {
    let yaml = r#"
stages:
- stage: A
- stage: B
  dependsOn:
  - A
- stage: C
"#;

    let stages = extract_stages(yaml);
    assert_eq!(stages.len(), 3);
    assert_eq!(stages[1].depends_on, Some(vec!["A".to_string()]));
    assert!(stages[2].depends_on.is_none());
}

#[test]
fn test_block_depends_on_ends_at_template_item() {
    let yaml = r#"
stages:
- stage: A
- stage: B
  dependsOn:
  - A
- template: stages/deploy.yml
  parameters:
    env: prod
"#;

    let stages = extract_stages(yaml);
    assert_eq!(
        stages,
        vec![
            StageNode::new("A"),
            StageNode::new("B").with_depends_on(["A"]),
        ]
    );
}

#[test]
fn test_sibling_item_closes_stage() {
    let yaml = r#"
stages:
- stage: A
- template: stages/deploy.yml
  dependsOn: A
"#;

    let stages = extract_stages(yaml);
    assert_eq!(stages, vec![StageNode::new("A")]);
}

#[test]
fn test_conditional_depends_on_is_a_stage_edge() {
    let yaml = r#"
stages:
- stage: Build
- stage: Deploy
  ${{ if eq(parameters.x, true) }}:
    dependsOn: Build
  jobs:
  - job: Ship
"#;

    let stages = extract_stages(yaml);
    assert_eq!(stages[1], StageNode::new("Deploy").with_depends_on(["Build"]));
}

#[test]
fn test_depends_on_after_jobs_block_is_a_stage_edge() {
    let yaml = r#"
stages:
- stage: Build
- stage: Test
  jobs:
  - job: Unit
  - job: Integration
    dependsOn: Unit
  dependsOn: Build
"#;

    let stages = extract_stages(yaml);
    assert_eq!(stages[1], StageNode::new("Test").with_depends_on(["Build"]));
}

#[test]
fn test_deployment_depends_on_is_not_a_stage_edge() {
    let yaml = r#"
stages:
- stage: Release
  ${{ if true }}:
    jobs:
    - deployment: Rollout
      dependsOn: Approve
"#;

    let stages = extract_stages(yaml);
    assert_eq!(stages, vec![StageNode::new("Release")]);
}

// =============================================================================
// Combined Document Tests
// =============================================================================

const FULL_PIPELINE: &str = r#"
trigger:
- main

parameters:
- name: environment
  displayName: Environment
  type: string
  default: staging
  values:
  - staging
  - production
- name: runTests
  type: boolean
  default: false

variables:
  buildConfiguration: Release

stages:
- stage: Build
  jobs:
  - job: Compile
    steps:
    - script: cargo build
- stage: Test
  dependsOn: Build
  condition: eq('${{ parameters.runTests }}', 'true')
- stage: Deploy
  dependsOn:
  - Build
  - Test
"#;

#[test]
fn test_full_pipeline_parameters() {
    let params = extract_parameters(FULL_PIPELINE);
    assert_eq!(
        params,
        vec![
            ParameterDeclaration::new("environment")
                .with_display_name("Environment")
                .with_default("staging")
                .with_values(["staging", "production"]),
            ParameterDeclaration::new("runTests")
                .with_type(ParameterType::Boolean)
                .with_default(false),
        ]
    );
}

#[test]
fn test_full_pipeline_stages() {
    let stages = extract_stages(FULL_PIPELINE);
    let names: Vec<&str> = stages.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Build", "Test", "Deploy"]);
    assert!(stages[0].depends_on.is_none());
    assert_eq!(stages[2].depends_on, Some(vec!["Build".to_string(), "Test".to_string()]));
}

#[test]
fn test_extraction_is_idempotent() {
    assert_eq!(extract_parameters(FULL_PIPELINE), extract_parameters(FULL_PIPELINE));
    assert_eq!(extract_stages(FULL_PIPELINE), extract_stages(FULL_PIPELINE));
}

// =============================================================================
// Totality Tests
// =============================================================================

#[test]
fn test_unstructured_text_yields_nothing() {
    let text = "just some text\nno structure here";
    assert!(extract_parameters(text).is_empty());
    assert!(extract_stages(text).is_empty());
}

#[test]
fn test_empty_input_yields_nothing() {
    assert!(extract_parameters("").is_empty());
    assert!(extract_stages("").is_empty());
}

#[test]
fn test_garbage_input_yields_nothing() {
    let bytes: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
    let text = String::from_utf8_lossy(&bytes);
    assert!(extract_parameters(&text).is_empty());
    assert!(extract_stages(&text).is_empty());
}

#[test]
fn test_odd_fragments_do_not_panic() {
    let fragments = [
        "parameters:",
        "parameters:\n-",
        "parameters:\n- name:",
        "parameters:\n- name: x\n  values:\n  -\n  - ''",
        "- stage:",
        "- stage: 'a\n  dependsOn: [",
        "stages:\n- stage: é\n  dependsOn:\n  -\n\t- ü",
        "\u{3000}parameters:\n\u{3000}- name: wide",
    ];

    for fragment in fragments {
        let _ = extract_parameters(fragment);
        let _ = extract_stages(fragment);
    }
}
