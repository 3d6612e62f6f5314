use regex::Regex;
use std::sync::LazyLock;

static FAILURE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^deny(_[a-zA-Z]+)*$").expect("failure-rule pattern compiles"));
static WARNING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^warn(_[a-zA-Z]+)*$").expect("warning-rule pattern compiles"));

/// Partition of a rule set's names into failure and warning rules.
///
/// Derived once per rule set and kept as plain data; the two sequences are
/// disjoint by construction and preserve the engine's rule ordering. Names
/// matching neither family are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub failures: Vec<String>,
    pub warnings: Vec<String>,
}

/// Classify rule names by naming convention: `deny` / `deny_<segments>` are
/// failure rules, `warn` / `warn_<segments>` are warning rules, where each
/// segment is non-empty and alphabetic.
pub fn classify(rule_names: &[String]) -> Classification {
    let mut classification = Classification::default();
    for name in rule_names {
        if FAILURE_NAME.is_match(name) {
            classification.failures.push(name.clone());
        } else if WARNING_NAME.is_match(name) {
            classification.warnings.push(name.clone());
        }
    }
    classification
}
