//! Parameter parser
//!
//! Recovers runtime parameter declarations from the first `parameters:`
//! block of a pipeline definition without a general YAML parser.
//!
//! Accepted shape:
//!
//! ```yaml
//! parameters:
//! - name: environment
//!   displayName: Target environment
//!   type: string
//!   default: 'staging'
//!   values:
//!   - staging
//!   - production
//! ```
//!
//! Anything outside this subset is skipped rather than rejected.

use crate::line::{self, Line};
use pipescan_core::{DefaultValue, ParameterDeclaration, ParameterType};

/// Parameter parser
pub struct ParameterParser;

impl ParameterParser {
    /// Extract the declarations of the first `parameters:` block, in source order
    pub fn parse(yaml_str: &str) -> Vec<ParameterDeclaration> {
        let mut scanner = ParameterScanner::new();
        for line in line::significant_lines(yaml_str) {
            scanner.feed(line);
            if scanner.is_finished() {
                break;
            }
        }
        scanner.finish()
    }
}

/// Scanner state
enum State {
    /// Looking for the `parameters:` key
    Seeking,
    /// Inside the block, no declaration open
    InBlock { base_indent: usize },
    /// Collecting properties of a declaration
    InEntry {
        base_indent: usize,
        entry: PendingParameter,
    },
    /// Collecting the items of a `values:` list
    InValues {
        base_indent: usize,
        entry: PendingParameter,
    },
    /// The block has ended; later `parameters:` keys are not merged
    Exited,
}

/// A declaration whose lines are still being read
struct PendingParameter {
    /// Column of the `- name:` bullet
    bullet_indent: usize,
    /// Column of the `name` key, where sibling properties line up
    key_column: usize,
    name: String,
    parameter_type: ParameterType,
    display_name: Option<String>,
    raw_default: Option<String>,
    values: Vec<String>,
}

impl PendingParameter {
    fn start(line: &Line<'_>, name: &str) -> Self {
        Self {
            bullet_indent: line.indent,
            key_column: line.bullet_content_column(),
            name: line::scalar(name).to_string(),
            parameter_type: ParameterType::String,
            display_name: None,
            raw_default: None,
            values: Vec::new(),
        }
    }

    fn finish(self) -> Option<ParameterDeclaration> {
        if self.name.is_empty() {
            log::debug!("Dropping parameter entry without a name");
            return None;
        }

        // Coerced against the final type so `default:` may precede `type:`.
        let default = self
            .raw_default
            .map(|raw| DefaultValue::coerce(&raw, self.parameter_type));
        let values = if self.values.is_empty() {
            None
        } else {
            Some(self.values)
        };

        Some(ParameterDeclaration {
            name: self.name,
            parameter_type: self.parameter_type,
            display_name: self.display_name,
            default,
            values,
        })
    }

    /// Apply a `key: value` property line, returning true when it opens a `values:` list
    fn apply_property(&mut self, line: &Line<'_>, key: &str, value: &str) -> bool {
        match key {
            "type" => {
                let keyword = line::scalar(value);
                self.parameter_type = ParameterType::parse_or_default(keyword);
                if self.parameter_type.as_str() != keyword {
                    log::debug!(
                        "Line {}: unrecognized type '{}' for parameter '{}', using string",
                        line.number,
                        keyword,
                        self.name
                    );
                }
            }
            "displayName" => {
                self.display_name = Some(line::scalar(value).to_string());
            }
            "default" => {
                if value.is_empty() {
                    log::trace!(
                        "Line {}: structured default for '{}' is not captured",
                        line.number,
                        self.name
                    );
                } else {
                    self.raw_default = Some(line::scalar(value).to_string());
                }
            }
            "values" => {
                let value = line::strip_trailing_comment(value);
                if value.is_empty() {
                    self.values.clear();
                    return true;
                }
                if value.starts_with('[') {
                    self.values = line::parse_flow_list(value);
                }
            }
            _ => {}
        }
        false
    }
}

/// Returns the `name` value when the line is a `- name: <value>` bullet
fn name_bullet<'a>(line: &Line<'a>) -> Option<&'a str> {
    match line.bullet_key_value() {
        Some(("name", value)) => Some(value),
        _ => None,
    }
}

struct ParameterScanner {
    state: State,
    parameters: Vec<ParameterDeclaration>,
}

impl ParameterScanner {
    fn new() -> Self {
        Self {
            state: State::Seeking,
            parameters: Vec::new(),
        }
    }

    fn is_finished(&self) -> bool {
        matches!(self.state, State::Exited)
    }

    fn feed(&mut self, line: Line<'_>) {
        let state = std::mem::replace(&mut self.state, State::Exited);
        self.state = match state {
            State::Seeking => {
                if line.text.starts_with("parameters:") {
                    log::trace!("Line {}: parameters block starts", line.number);
                    State::InBlock {
                        base_indent: line.indent,
                    }
                } else {
                    State::Seeking
                }
            }
            State::Exited => State::Exited,
            State::InBlock { base_indent } => self.block_line(base_indent, None, &line),
            State::InEntry { base_indent, entry } => {
                self.block_line(base_indent, Some(entry), &line)
            }
            State::InValues { base_indent, entry } => {
                self.values_line(base_indent, entry, &line)
            }
        };
    }

    fn finish(mut self) -> Vec<ParameterDeclaration> {
        match std::mem::replace(&mut self.state, State::Exited) {
            State::InEntry { entry, .. } | State::InValues { entry, .. } => self.flush(entry),
            _ => {}
        }
        self.parameters
    }

    fn flush(&mut self, entry: PendingParameter) {
        if let Some(parameter) = entry.finish() {
            self.parameters.push(parameter);
        }
    }

    /// Whether the line leaves the parameters block
    fn exits_block(base_indent: usize, line: &Line<'_>) -> bool {
        line.indent <= base_indent && !line.is_bullet()
    }

    fn exit(&mut self, entry: Option<PendingParameter>, line: &Line<'_>) -> State {
        if let Some(entry) = entry {
            self.flush(entry);
        }
        log::trace!("Line {}: parameters block ends", line.number);
        State::Exited
    }

    fn block_line(
        &mut self,
        base_indent: usize,
        entry: Option<PendingParameter>,
        line: &Line<'_>,
    ) -> State {
        if Self::exits_block(base_indent, line) {
            return self.exit(entry, line);
        }

        if let Some(name) = name_bullet(line) {
            match entry {
                // A deeper `- name:` belongs to a structured default, not the list
                Some(entry) if line.indent > entry.bullet_indent => {
                    return State::InEntry { base_indent, entry };
                }
                Some(entry) => self.flush(entry),
                None => {}
            }
            return State::InEntry {
                base_indent,
                entry: PendingParameter::start(line, name),
            };
        }

        let Some(mut entry) = entry else {
            return State::InBlock { base_indent };
        };

        if line.is_bullet() {
            if line.indent <= entry.bullet_indent {
                log::debug!(
                    "Line {}: skipping list item without '- name:'",
                    line.number
                );
                self.flush(entry);
                return State::InBlock { base_indent };
            }
            return State::InEntry { base_indent, entry };
        }

        if line.indent > entry.key_column {
            return State::InEntry { base_indent, entry };
        }

        if let Some((key, value)) = line.key_value() {
            if entry.apply_property(line, key, value) {
                return State::InValues { base_indent, entry };
            }
        }
        State::InEntry { base_indent, entry }
    }

    fn values_line(
        &mut self,
        base_indent: usize,
        mut entry: PendingParameter,
        line: &Line<'_>,
    ) -> State {
        if Self::exits_block(base_indent, line) {
            return self.exit(Some(entry), line);
        }

        // A bullet at the declaration's own column is the next list entry.
        if line.is_bullet() && line.indent <= entry.bullet_indent {
            return self.block_line(base_indent, Some(entry), line);
        }

        if let Some(item) = line.bullet_body() {
            let item = line::scalar(item);
            if !item.is_empty() {
                entry.values.push(item.to_string());
            }
            return State::InValues { base_indent, entry };
        }

        if line.text.contains(':') {
            // Closes the list; the line is read as an ordinary property.
            return self.block_line(base_indent, Some(entry), line);
        }

        State::InValues { base_indent, entry }
    }
}
