//! Stage parser
//!
//! Recovers stage names and their `dependsOn` edges from a pipeline
//! definition. `- stage:` items are picked up wherever they appear, so
//! stage lists nested under `extends:` or template parameters are found
//! as well as a top-level `stages:` list.

use crate::line::{self, Line};
use pipescan_core::StageNode;

/// Stage parser
pub struct StageParser;

impl StageParser {
    /// Extract every `- stage:` item, in source order
    pub fn parse(yaml_str: &str) -> Vec<StageNode> {
        let mut scanner = StageScanner::new();
        for line in line::significant_lines(yaml_str) {
            scanner.feed(line);
        }
        scanner.finish()
    }
}

enum State {
    /// No stage open
    Scanning,
    /// Reading the properties of a stage
    InStage(PendingStage),
    /// Reading the items of a block-form `dependsOn:` list
    InDependsOn(PendingStage),
}

struct PendingStage {
    name: String,
    /// Column of the `- stage:` bullet; a bullet at or left of it is a sibling
    bullet_indent: usize,
    /// Column of the `stage` key; the stage's own properties line up here
    key_column: usize,
    depends_on: Option<Vec<String>>,
    /// Indent of the open `jobs:` key or `- job:` item, whose lines are skipped
    jobs_indent: Option<usize>,
}

impl PendingStage {
    fn finish(self) -> StageNode {
        // `[]`, `null` and an empty block list all read as unspecified.
        let depends_on = self.depends_on.filter(|deps| !deps.is_empty());
        StageNode {
            name: self.name,
            depends_on,
        }
    }

    /// Whether `line` is a later item of the list holding this stage
    fn is_sibling(&self, line: &Line<'_>) -> bool {
        line.is_bullet() && line.indent <= self.bullet_indent
    }

    /// Track `jobs:` scopes, returning true while `line` lies inside one
    fn in_jobs(&mut self, line: &Line<'_>) -> bool {
        if let Some(indent) = self.jobs_indent {
            // Job items may sit at the `jobs:` key's own column.
            if line.indent > indent || (line.is_bullet() && line.indent == indent) {
                return true;
            }
            self.jobs_indent = None;
        }

        if opens_jobs(line) {
            self.jobs_indent = Some(line.indent);
            return true;
        }
        false
    }

    /// Apply a `dependsOn:` value, returning true when it opens a block list
    fn apply_depends_on(&mut self, value: &str) -> bool {
        let value = line::strip_trailing_comment(value);
        if value.is_empty() {
            self.depends_on = Some(Vec::new());
            return true;
        }

        self.depends_on = if value.starts_with('[') {
            Some(line::parse_flow_list(value))
        } else if value.eq_ignore_ascii_case("null") || value == "~" {
            None
        } else {
            Some(vec![line::strip_quotes(value).to_string()])
        };
        false
    }
}

/// What a `- stage:` bullet names
enum StageBullet<'a> {
    Named(&'a str),
    Unnamed,
}

fn stage_bullet<'a>(line: &Line<'a>) -> Option<StageBullet<'a>> {
    let (key, value) = line.bullet_key_value()?;
    if !key.eq_ignore_ascii_case("stage") {
        return None;
    }
    let name = line::scalar(value);
    if name.is_empty() {
        Some(StageBullet::Unnamed)
    } else {
        Some(StageBullet::Named(name))
    }
}

/// `jobs:` or a `- job:` / `- deployment:` item
fn opens_jobs(line: &Line<'_>) -> bool {
    if line.is_bullet() {
        matches!(line.bullet_key_value(), Some(("job" | "deployment", _)))
    } else {
        matches!(line.key_value(), Some(("jobs", _)))
    }
}

struct StageScanner {
    state: State,
    saw_stages_key: bool,
    stages: Vec<StageNode>,
}

impl StageScanner {
    fn new() -> Self {
        Self {
            state: State::Scanning,
            saw_stages_key: false,
            stages: Vec::new(),
        }
    }

    fn feed(&mut self, line: Line<'_>) {
        if line.indent == 0 && line.text == "stages:" {
            self.saw_stages_key = true;
        }

        let state = std::mem::replace(&mut self.state, State::Scanning);

        if let Some(bullet) = stage_bullet(&line) {
            if let State::InStage(stage) | State::InDependsOn(stage) = state {
                self.stages.push(stage.finish());
            }
            self.state = match bullet {
                StageBullet::Named(name) => State::InStage(PendingStage {
                    name: name.to_string(),
                    bullet_indent: line.indent,
                    key_column: line.bullet_content_column(),
                    depends_on: None,
                    jobs_indent: None,
                }),
                StageBullet::Unnamed => {
                    log::debug!("Line {}: skipping stage without a name", line.number);
                    State::Scanning
                }
            };
            return;
        }

        self.state = match state {
            State::Scanning => State::Scanning,
            State::InStage(stage) | State::InDependsOn(stage) if stage.is_sibling(&line) => {
                log::trace!(
                    "Line {}: stage '{}' ends at a sibling item",
                    line.number,
                    stage.name
                );
                self.stages.push(stage.finish());
                State::Scanning
            }
            State::InStage(stage) => Self::stage_line(stage, &line),
            State::InDependsOn(mut stage) => {
                if let Some(item) = line.bullet_body() {
                    let item = line::scalar(item);
                    if !item.is_empty() {
                        stage.depends_on.get_or_insert_with(Vec::new).push(item.to_string());
                    }
                    State::InDependsOn(stage)
                } else if line.is_key_line() {
                    Self::stage_line(stage, &line)
                } else {
                    State::InDependsOn(stage)
                }
            }
        };
    }

    fn stage_line(mut stage: PendingStage, line: &Line<'_>) -> State {
        // `dependsOn:` keys under `jobs:` are job edges, not stage edges.
        if stage.in_jobs(line) || line.is_bullet() {
            return State::InStage(stage);
        }

        match line.key_value() {
            Some(("dependsOn", value)) => {
                if stage.apply_depends_on(value) {
                    State::InDependsOn(stage)
                } else {
                    State::InStage(stage)
                }
            }
            _ => State::InStage(stage),
        }
    }

    fn finish(mut self) -> Vec<StageNode> {
        if let State::InStage(stage) | State::InDependsOn(stage) =
            std::mem::replace(&mut self.state, State::Scanning)
        {
            self.stages.push(stage.finish());
        }
        if !self.saw_stages_key && !self.stages.is_empty() {
            log::debug!(
                "Found {} stage(s) outside a top-level 'stages:' key",
                self.stages.len()
            );
        }
        self.stages
    }
}
