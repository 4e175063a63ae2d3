//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use std::collections::HashMap;

/// A multi-stage pipeline with runtime parameters
pub const RELEASE_PIPELINE: &str = r#"
trigger:
- main

parameters:
- name: environment
  displayName: Target environment
  type: string
  default: staging
  values:
  - staging
  - production
- name: runTests
  displayName: Run tests
  type: boolean
  default: true
- name: replicas
  type: number
  default: 2
- name: releaseNotes
  type: string

stages:
- stage: Build
  jobs:
  - job: Compile
    steps:
    - script: cargo build --release
- stage: Test
  jobs:
  - job: Unit
  - job: Integration
    dependsOn: Unit
- stage: Package
  dependsOn: Build
- stage: Deploy
  dependsOn:
  - Test
  - Package
  condition: succeeded()
"#;

/// Build a supplied-values map from pairs
pub fn supplied(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

