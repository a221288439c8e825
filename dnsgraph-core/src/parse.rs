// Record normalization: turns raw rows into graph edges

use crate::record::{Record, RecordType};
use serde::Serialize;

/// Placeholder target for SPF records that include nothing
pub const SPF_PLACEHOLDER: &str = "SPF";

/// A normalized edge derived from one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub record_type: RecordType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// Outcome of matching a TXT value against the known conventions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxtDisposition {
    /// SPF record: one edge per included host (or the placeholder), emitted
    /// as-is without trailing-dot normalization
    Includes(Vec<String>),
    /// Target rewritten, value kept as the annotation
    Redirect { target: String, annotation: String },
    /// Nothing recognized; the raw target is used
    Generic,
}

/// True for dotted-quad IPv4 literals with every octet in 0..=255
pub fn is_ip(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 4
        && parts
            .iter()
            .all(|p| matches!(p.parse::<i64>(), Ok(n) if (0..=255).contains(&n)))
}

/// Trim, drop one layer of surrounding double quotes, trim again
pub fn unquote(value: &str) -> &str {
    let value = value.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.trim()
}

/// Strip exactly one trailing dot from hostnames; IP literals are untouched
pub fn strip_trailing_dot(target: &str) -> &str {
    if is_ip(target) {
        target
    } else {
        target.strip_suffix('.').unwrap_or(target)
    }
}

/// Split an MX target of the form `<priority> <host>`.
///
/// Returns `None` when the target carries no priority prefix.
pub fn split_mx(target: &str) -> Option<(String, String)> {
    if !target.contains(' ') {
        return None;
    }
    let (priority, host) = target.split_once(char::is_whitespace)?;
    Some((priority.trim().to_string(), host.trim().to_lowercase()))
}

/// Classify a TXT value. Rules are checked in order and the first match wins.
pub fn classify_txt(domain: &str, value: &str) -> TxtDisposition {
    let lower = value.to_lowercase();

    if lower.starts_with("v=spf1") {
        let includes: Vec<String> = value
            .split_whitespace()
            .filter_map(|part| part.strip_prefix("include:"))
            .map(|host| host.trim().to_string())
            .collect();
        if includes.is_empty() {
            return TxtDisposition::Includes(vec![SPF_PLACEHOLDER.to_string()]);
        }
        return TxtDisposition::Includes(includes);
    }

    if lower.contains("v=dmarc1") {
        return TxtDisposition::Redirect {
            target: format!("_dmarc.{}", domain),
            annotation: value.to_string(),
        };
    }

    if lower.contains("v=dkim1") || domain.to_lowercase().contains("_domainkey") {
        return TxtDisposition::Redirect {
            target: domain.to_string(),
            annotation: value.to_string(),
        };
    }

    if let Some((key, rest)) = value.split_once('=') {
        return TxtDisposition::Redirect {
            target: unquote(key).to_string(),
            annotation: unquote(rest).to_string(),
        };
    }

    if lower.starts_with("zoom_verify_") {
        let parts: Vec<&str> = value.splitn(3, '_').collect();
        if let [first, second, token] = parts.as_slice() {
            return TxtDisposition::Redirect {
                target: format!("{}_{}", first, second),
                annotation: unquote(token).to_string(),
            };
        }
    }

    TxtDisposition::Generic
}

/// Normalize one record into zero or more edges
pub fn normalize(record: &Record) -> Vec<Edge> {
    let domain = record.domain.trim();
    let kind = record.kind();
    let mut target = record.target.trim().to_string();
    let mut priority = None;
    let mut annotation = None;

    match kind {
        RecordType::Mx => {
            if let Some((prio, host)) = split_mx(&target) {
                priority = Some(prio);
                target = host;
            }
        }
        RecordType::Txt => {
            let value = unquote(&target).to_string();
            match classify_txt(domain, &value) {
                TxtDisposition::Includes(hosts) => {
                    // Early exit: SPF edges skip the trailing-dot step below
                    return hosts
                        .into_iter()
                        .map(|host| Edge {
                            source: domain.to_string(),
                            target: host,
                            record_type: kind.clone(),
                            priority: None,
                            annotation: Some(value.clone()),
                        })
                        .collect();
                }
                TxtDisposition::Redirect {
                    target: redirected,
                    annotation: note,
                } => {
                    target = redirected;
                    annotation = Some(note);
                }
                TxtDisposition::Generic => {}
            }
        }
        _ => {}
    }

    let target = strip_trailing_dot(&target).to_string();

    vec![Edge {
        source: domain.to_string(),
        target,
        record_type: kind,
        priority,
        annotation,
    }]
}

/// Normalize a batch of records, keeping input order
pub fn normalize_records(records: &[Record]) -> Vec<Edge> {
    records.iter().flat_map(normalize).collect()
}
