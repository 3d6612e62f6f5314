//! Loading and compiling rule sources into an immutable [`PolicySet`].

use crate::error::PolicyError;
use crate::source::{ConditionSpec, FieldOpSpec, PolicyFile, PredicateSpec, RuleSpec};
use crate::template::Template;
use camino::Utf8Path;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// Only files with this extension are compiled from a rule-source directory.
pub const SOURCE_EXTENSION: &str = "policy";

/// A compiled, immutable rule set. Built once per run and shared read-only
/// across every document evaluation.
#[derive(Debug, Default)]
pub struct PolicySet {
    pub(crate) modules: Vec<Module>,
}

/// One compiled source file, keyed by file name.
#[derive(Debug)]
pub(crate) struct Module {
    pub(crate) file: String,
    pub(crate) namespace: String,
    pub(crate) rules: Vec<Rule>,
}

#[derive(Debug)]
pub(crate) struct Rule {
    pub(crate) name: String,
    pub(crate) when: Condition,
    pub(crate) message: Template,
}

#[derive(Debug)]
pub(crate) enum Condition {
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

#[derive(Debug)]
pub(crate) enum Predicate {
    Field { path: Vec<String>, ops: Vec<FieldOp> },
    Nested(Box<Condition>),
}

#[derive(Debug)]
pub(crate) enum FieldOp {
    Eq(Value),
    Ne(Value),
    Gt(f64),
    Lt(f64),
    Gte(f64),
    Lte(f64),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    Matches(Regex),
    Exists(bool),
}

impl PolicySet {
    /// Load rule sources from a single file or a directory.
    ///
    /// For a directory, only `.policy` entries are read; they are ordered
    /// lexicographically by file name so module order (and therefore rule
    /// classification order) is stable across runs.
    pub fn load(path: &Utf8Path) -> Result<Self, PolicyError> {
        let metadata = std::fs::metadata(path).map_err(|source| PolicyError::Read {
            path: path.to_owned(),
            source,
        })?;

        let mut files = Vec::new();
        if metadata.is_dir() {
            let entries = path.read_dir_utf8().map_err(|source| PolicyError::Read {
                path: path.to_owned(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| PolicyError::Read {
                    path: path.to_owned(),
                    source,
                })?;
                let entry_path = entry.path();
                if entry_path.extension() == Some(SOURCE_EXTENSION) {
                    files.push(entry_path.to_owned());
                }
            }
            files.sort();
        } else {
            files.push(path.to_owned());
        }

        let mut sources = Vec::new();
        for file in files {
            let content = std::fs::read_to_string(&file).map_err(|source| PolicyError::Read {
                path: file.clone(),
                source,
            })?;
            let name = file.file_name().unwrap_or(file.as_str()).to_string();
            sources.push((name, content));
        }

        Self::compile(sources)
    }

    /// Compile `(file name, content)` pairs, in the given order, into one
    /// rule set. Any parse or validation error aborts the whole build.
    pub fn compile(sources: Vec<(String, String)>) -> Result<Self, PolicyError> {
        let mut modules = Vec::new();
        let mut seen: HashMap<String, String> = HashMap::new();

        for (file, content) in sources {
            let spec: PolicyFile =
                serde_yaml_ng::from_str(&content).map_err(|err| PolicyError::Parse {
                    file: file.clone(),
                    message: err.to_string(),
                })?;

            let mut rules = Vec::new();
            for rule in spec.rules {
                if !rule.enabled {
                    tracing::debug!(rule = %rule.name, file = %file, "skipping disabled rule");
                    continue;
                }
                let qualified = format!("{}.{}", spec.namespace, rule.name);
                if let Some(first) = seen.insert(qualified.clone(), file.clone()) {
                    return Err(PolicyError::DuplicateRule {
                        name: qualified,
                        first,
                        second: file,
                    });
                }
                rules.push(compile_rule(&file, rule)?);
            }

            modules.push(Module {
                file,
                namespace: spec.namespace,
                rules,
            });
        }

        let rule_count: usize = modules.iter().map(|m| m.rules.len()).sum();
        tracing::debug!(modules = modules.len(), rules = rule_count, "compiled rule set");

        Ok(Self { modules })
    }

    pub(crate) fn find(&self, namespace: &str, rule: &str) -> Option<&Rule> {
        self.modules
            .iter()
            .filter(|module| module.namespace == namespace)
            .flat_map(|module| module.rules.iter())
            .find(|candidate| candidate.name == rule)
    }
}

fn compile_rule(file: &str, spec: RuleSpec) -> Result<Rule, PolicyError> {
    let RuleSpec {
        name,
        when,
        message,
        ..
    } = spec;

    if name.is_empty() {
        return Err(PolicyError::Rule {
            file: file.to_string(),
            name: "<unnamed>".to_string(),
            message: "rule name must not be empty".to_string(),
        });
    }

    let invalid = |message: String| PolicyError::Rule {
        file: file.to_string(),
        name: name.clone(),
        message,
    };

    let when = compile_condition(when).map_err(&invalid)?;
    let message = Template::compile(&message).map_err(&invalid)?;

    Ok(Rule { name, when, message })
}

fn compile_condition(spec: ConditionSpec) -> Result<Condition, String> {
    match spec {
        ConditionSpec::All { all } => Ok(Condition::All(compile_predicates(all)?)),
        ConditionSpec::Any { any } => Ok(Condition::Any(compile_predicates(any)?)),
        ConditionSpec::Single(predicate) => {
            Ok(Condition::All(vec![compile_predicate(*predicate)?]))
        }
    }
}

fn compile_predicates(specs: Vec<PredicateSpec>) -> Result<Vec<Predicate>, String> {
    specs.into_iter().map(compile_predicate).collect()
}

fn compile_predicate(spec: PredicateSpec) -> Result<Predicate, String> {
    match spec {
        PredicateSpec::Nested(condition) => {
            Ok(Predicate::Nested(Box::new(compile_condition(*condition)?)))
        }
        PredicateSpec::FieldCheck { field, op } => {
            let path = crate::path::parse_path(&field)?;
            let ops = compile_ops(&field, op)?;
            Ok(Predicate::Field { path, ops })
        }
    }
}

fn compile_ops(field: &str, spec: FieldOpSpec) -> Result<Vec<FieldOp>, String> {
    let mut ops = Vec::new();

    if let Some(want) = spec.eq {
        ops.push(FieldOp::Eq(want));
    }
    if let Some(want) = spec.ne {
        ops.push(FieldOp::Ne(want));
    }
    if let Some(want) = spec.gt {
        ops.push(FieldOp::Gt(number_operand("gt", field, &want)?));
    }
    if let Some(want) = spec.lt {
        ops.push(FieldOp::Lt(number_operand("lt", field, &want)?));
    }
    if let Some(want) = spec.gte {
        ops.push(FieldOp::Gte(number_operand("gte", field, &want)?));
    }
    if let Some(want) = spec.lte {
        ops.push(FieldOp::Lte(number_operand("lte", field, &want)?));
    }
    if let Some(needle) = spec.contains {
        ops.push(FieldOp::Contains(needle));
    }
    if let Some(prefix) = spec.starts_with {
        ops.push(FieldOp::StartsWith(prefix));
    }
    if let Some(suffix) = spec.ends_with {
        ops.push(FieldOp::EndsWith(suffix));
    }
    if let Some(pattern) = spec.matches {
        let compiled = Regex::new(&pattern)
            .map_err(|err| format!("invalid regex for field '{field}': {err}"))?;
        ops.push(FieldOp::Matches(compiled));
    }
    if let Some(expected) = spec.exists {
        ops.push(FieldOp::Exists(expected));
    }

    if ops.is_empty() {
        return Err(format!("predicate on field '{field}' has no operator"));
    }
    Ok(ops)
}

fn number_operand(op: &str, field: &str, value: &Value) -> Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| format!("{op} on field '{field}' requires a number operand, got {value}"))
}
