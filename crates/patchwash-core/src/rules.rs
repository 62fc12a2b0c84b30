//! Line-level redaction rules

use std::collections::BTreeMap;

use regex::Regex;

/// Substitution counts keyed by rule label, accumulated over one scan
pub(crate) type Counts = BTreeMap<&'static str, usize>;

/// One redaction rule: every match is overwritten with a fixed token
struct Rule {
    label: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

/// The compiled rules, split into the two per-line passes
pub(crate) struct RuleSet {
    identifier_rules: Vec<Rule>,
    code_rules: Vec<Rule>,
}

impl RuleSet {
    pub(crate) fn new() -> Self {
        // Order matters - earlier rules can rewrite text later rules would match
        let identifier_rules = vec![
            Rule {
                label: "repo_path",
                pattern: Regex::new(r"\b[\w-]+(?:/[\w-]+)+\b").unwrap(),
                replacement: "",
            },
            Rule {
                label: "commit_hash",
                pattern: Regex::new(r"\b[0-9a-fA-F]{40}\b").unwrap(),
                replacement: "REMOVED_HASH",
            },
            Rule {
                label: "email",
                pattern: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap(),
                replacement: "REMOVED_EMAIL",
            },
            Rule {
                label: "fs_path",
                // Drive-letter or rooted path, greedy up to the next whitespace
                pattern: Regex::new(r"([a-zA-Z]:\\|/)\S*").unwrap(),
                replacement: "REMOVED_PATH",
            },
            Rule {
                label: "from_header",
                pattern: Regex::new(r"^From:\s+.+").unwrap(),
                replacement: "From: REMOVED_COMMITTER",
            },
        ];

        let code_rules = vec![
            Rule {
                label: "sql_ddl",
                pattern: Regex::new(r"(?i)\b(CREATE|DROP|INSERT|DELETE|ALTER)\s+TABLE\b").unwrap(),
                replacement: "REMOVED_SQL_OPERATION",
            },
            Rule {
                label: "column_definition",
                pattern: Regex::new(r"(?i)`\w+`\s+(VARCHAR|TEXT|INT|BIGINT|BOOLEAN|TIMESTAMP)")
                    .unwrap(),
                replacement: "REMOVED_COLUMN_DEFINITION",
            },
            Rule {
                label: "import",
                pattern: Regex::new(r"(?i)import\s+\(.*\)").unwrap(),
                replacement: "REMOVED_IMPORT",
            },
            Rule {
                label: "import",
                pattern: Regex::new(r#"(?i)import\s+".*""#).unwrap(),
                replacement: "REMOVED_IMPORT",
            },
            Rule {
                label: "env_lookup",
                pattern: Regex::new(r#"(?i)os\.Getenv\(".*"\)"#).unwrap(),
                replacement: "REMOVED_ENV",
            },
            Rule {
                label: "quoted_secret",
                pattern: Regex::new(r#""[A-Za-z0-9_-]{20,}""#).unwrap(),
                replacement: "REMOVED_SECRET",
            },
            Rule {
                label: "creator",
                pattern: Regex::new(r"(?i)//\s*Created by\s+.+").unwrap(),
                replacement: "// REMOVED_CREATOR",
            },
            Rule {
                label: "creator",
                pattern: Regex::new(r"(?i)@Author\(.*\)").unwrap(),
                replacement: "@REMOVED_CREATOR",
            },
        ];

        Self {
            identifier_rules,
            code_rules,
        }
    }

    /// First pass: repository paths, commit hashes, emails, filesystem
    /// paths and the committer header. Runs on every line.
    pub(crate) fn scrub_identifiers(&self, line: &str, counts: &mut Counts) -> String {
        apply(&self.identifier_rules, line, counts)
    }

    /// Second pass: SQL statements, column definitions, imports, env
    /// lookups, long quoted literals and authorship markers. Skipped for
    /// lines inside a suppressed commit-message block.
    pub(crate) fn scrub_code(&self, line: &str, counts: &mut Counts) -> String {
        apply(&self.code_rules, line, counts)
    }
}

fn apply(rules: &[Rule], line: &str, counts: &mut Counts) -> String {
    let mut result = line.to_string();

    for rule in rules {
        let count = rule.pattern.find_iter(&result).count();
        if count > 0 {
            result = rule
                .pattern
                .replace_all(&result, rule.replacement)
                .into_owned();
            *counts.entry(rule.label).or_insert(0) += count;
        }
    }

    result
}
