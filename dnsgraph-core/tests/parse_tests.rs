// Tests for record reading and normalization

use dnsgraph_core::parse::{
    SPF_PLACEHOLDER, TxtDisposition, classify_txt, is_ip, normalize, normalize_records,
    split_mx, strip_trailing_dot, unquote,
};
use dnsgraph_core::record::{Record, RecordType, read_records};
use dnsgraph_core::GraphError;

fn txt(domain: &str, target: &str) -> Record {
    Record::new(domain, "TXT", target)
}

// ============================================================================
// IPv4 Detection Tests
// ============================================================================

#[test]
fn test_is_ip_valid_addresses() {
    assert!(is_ip("192.168.1.1"));
    assert!(is_ip("0.0.0.0"));
    assert!(is_ip("255.255.255.255"));
    assert!(is_ip("8.8.8.8"));
}

#[test]
fn test_is_ip_wrong_segment_count() {
    assert!(!is_ip("1.2.3"));
    assert!(!is_ip("1.2.3.4.5"));
    assert!(!is_ip("1.2.3.4."));
    assert!(!is_ip(""));
}

#[test]
fn test_is_ip_out_of_range() {
    assert!(!is_ip("256.1.1.1"));
    assert!(!is_ip("1.1.1.300"));
    assert!(!is_ip("-1.1.1.1"));
}

#[test]
fn test_is_ip_non_numeric() {
    assert!(!is_ip("a.b.c.d"));
    assert!(!is_ip("mail.example.co.uk"));
    assert!(!is_ip("1.2.3.x"));
    assert!(!is_ip("1..2.3"));
}

#[test]
fn test_is_ip_rejects_inner_whitespace() {
    assert!(!is_ip("1.2.3. 4"));
    assert!(!is_ip(" 1.2.3.4"));
    assert!(is_ip("1.2.3.4"));
}

// ============================================================================
// Helper Tests
// ============================================================================

#[test]
fn test_unquote_strips_one_layer() {
    assert_eq!(unquote("  \"v=spf1 ~all\"  "), "v=spf1 ~all");
    assert_eq!(unquote("\"\"nested\"\""), "\"nested\"");
    assert_eq!(unquote("plain"), "plain");
}

#[test]
fn test_strip_trailing_dot_once() {
    assert_eq!(strip_trailing_dot("ns1.example.com."), "ns1.example.com");
    assert_eq!(strip_trailing_dot("ns1.example.com.."), "ns1.example.com.");
    assert_eq!(strip_trailing_dot("ns1.example.com"), "ns1.example.com");
}

#[test]
fn test_strip_trailing_dot_leaves_ips() {
    assert_eq!(strip_trailing_dot("10.0.0.1"), "10.0.0.1");
}

#[test]
fn test_split_mx_with_priority() {
    assert_eq!(
        split_mx("10 MAIL.Example.com"),
        Some(("10".to_string(), "mail.example.com".to_string()))
    );
}

#[test]
fn test_split_mx_without_priority() {
    assert_eq!(split_mx("mail.example.com"), None);
}

// ============================================================================
// MX Record Tests
// ============================================================================

#[test]
fn test_normalize_mx_priority() {
    let edges = normalize(&Record::new("example.com", "mx", "10 mail.example.com"));
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].priority.as_deref(), Some("10"));
    assert_eq!(edges[0].target, "mail.example.com");
    assert_eq!(edges[0].record_type, RecordType::Mx);
}

#[test]
fn test_normalize_mx_trailing_dot() {
    let edges = normalize(&Record::new("example.com", "MX", "20 Mail.Example.com."));
    assert_eq!(edges[0].priority.as_deref(), Some("20"));
    assert_eq!(edges[0].target, "mail.example.com");
}

#[test]
fn test_normalize_mx_without_priority_keeps_case() {
    let edges = normalize(&Record::new("example.com", "mx", "Mail.Example.com"));
    assert_eq!(edges[0].priority, None);
    assert_eq!(edges[0].target, "Mail.Example.com");
}

// ============================================================================
// TXT Record Tests
// ============================================================================

#[test]
fn test_normalize_spf_includes() {
    let value = "v=spf1 include:_spf.google.com include:sendgrid.net ~all";
    let edges = normalize(&txt("example.com", value));

    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|e| e.record_type == RecordType::Txt));
    assert_eq!(edges[0].target, "_spf.google.com");
    assert_eq!(edges[1].target, "sendgrid.net");
    assert_eq!(edges[0].annotation.as_deref(), Some(value));
}

#[test]
fn test_normalize_spf_quoted_value() {
    let edges = normalize(&txt("example.com", "\"v=spf1 include:mailgun.org ~all\""));
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].target, "mailgun.org");
    assert_eq!(edges[0].annotation.as_deref(), Some("v=spf1 include:mailgun.org ~all"));
}

#[test]
fn test_normalize_spf_without_includes() {
    let edges = normalize(&txt("example.com", "v=spf1 ~all"));
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].target, SPF_PLACEHOLDER);
    assert_eq!(edges[0].target, "SPF");
}

#[test]
fn test_normalize_spf_case_insensitive_prefix() {
    let edges = normalize(&txt("example.com", "V=SPF1 include:spf.protection.outlook.com -all"));
    assert_eq!(edges[0].target, "spf.protection.outlook.com");
}

#[test]
fn test_normalize_spf_skips_trailing_dot_step() {
    let edges = normalize(&txt("example.com", "v=spf1 include:_spf.example.net. ~all"));
    assert_eq!(edges[0].target, "_spf.example.net.");
}

#[test]
fn test_normalize_dmarc() {
    let value = "v=DMARC1; p=reject";
    let edges = normalize(&txt("example.com", value));
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].target, "_dmarc.example.com");
    assert_eq!(edges[0].annotation.as_deref(), Some(value));
}

#[test]
fn test_normalize_dkim_value() {
    let edges = normalize(&txt("sel._domainkey.example.com", "v=DKIM1; k=rsa; p=MIGf"));
    assert_eq!(edges[0].target, "sel._domainkey.example.com");
    assert_eq!(edges[0].annotation.as_deref(), Some("v=DKIM1; k=rsa; p=MIGf"));
}

#[test]
fn test_normalize_dkim_by_domain_name() {
    let edges = normalize(&txt("s1._DomainKey.example.com", "k=rsa; p=abc"));
    assert_eq!(edges[0].target, "s1._DomainKey.example.com");
    assert_eq!(edges[0].annotation.as_deref(), Some("k=rsa; p=abc"));
}

#[test]
fn test_normalize_key_value() {
    let edges = normalize(&txt(
        "example.com",
        "\"google-site-verification=abc123\"",
    ));
    assert_eq!(edges[0].target, "google-site-verification");
    assert_eq!(edges[0].annotation.as_deref(), Some("abc123"));
}

#[test]
fn test_normalize_key_value_splits_once() {
    let edges = normalize(&txt("example.com", "MS=ms12345=extra"));
    assert_eq!(edges[0].target, "MS");
    assert_eq!(edges[0].annotation.as_deref(), Some("ms12345=extra"));
}

#[test]
fn test_normalize_zoom_verify() {
    let edges = normalize(&txt("example.com", "ZOOM_verify_AbCdEf_123"));
    assert_eq!(edges[0].target, "ZOOM_verify");
    assert_eq!(edges[0].annotation.as_deref(), Some("AbCdEf_123"));
}

#[test]
fn test_normalize_generic_txt_keeps_raw_target() {
    let edges = normalize(&txt("example.com", "\"some opaque token.\""));
    assert_eq!(edges[0].target, "\"some opaque token.\"");
    assert_eq!(edges[0].annotation, None);
}

#[test]
fn test_classify_txt_order_spf_before_key_value() {
    // Contains '=' but the SPF rule wins
    assert!(matches!(
        classify_txt("example.com", "v=spf1 -all"),
        TxtDisposition::Includes(_)
    ));
}

#[test]
fn test_classify_txt_dmarc_before_dkim() {
    let disposition = classify_txt("x._domainkey.example.com", "v=DMARC1; p=none");
    assert_eq!(
        disposition,
        TxtDisposition::Redirect {
            target: "_dmarc.x._domainkey.example.com".to_string(),
            annotation: "v=DMARC1; p=none".to_string(),
        }
    );
}

#[test]
fn test_classify_txt_generic() {
    assert_eq!(classify_txt("example.com", "hello world"), TxtDisposition::Generic);
}

// ============================================================================
// Generic Record Tests
// ============================================================================

#[test]
fn test_normalize_ns_trailing_dot() {
    let edges = normalize(&Record::new("example.com", "NS", "ns1.example.com."));
    assert_eq!(edges[0].target, "ns1.example.com");
    assert_eq!(edges[0].record_type, RecordType::Ns);
}

#[test]
fn test_normalize_a_record_ip_untouched() {
    let edges = normalize(&Record::new(" example.com ", " A ", " 93.184.216.34 "));
    assert_eq!(edges[0].source, "example.com");
    assert_eq!(edges[0].target, "93.184.216.34");
    assert_eq!(edges[0].record_type, RecordType::A);
}

#[test]
fn test_normalize_unrecognized_type() {
    let edges = normalize(&Record::new("example.com", "SRV", "sip.example.com."));
    assert_eq!(edges[0].record_type, RecordType::Other("srv".to_string()));
    assert_eq!(edges[0].target, "sip.example.com");
}

#[test]
fn test_normalize_records_preserves_order() {
    let records = vec![
        Record::new("example.com", "ns", "ns1.example.com."),
        txt("example.com", "v=spf1 include:a.net include:b.net ~all"),
        Record::new("example.com", "a", "1.2.3.4"),
    ];
    let targets: Vec<String> = normalize_records(&records)
        .into_iter()
        .map(|e| e.target)
        .collect();
    assert_eq!(targets, vec!["ns1.example.com", "a.net", "b.net", "1.2.3.4"]);
}

// ============================================================================
// CSV Reading Tests
// ============================================================================

#[test]
fn test_read_records_basic() {
    let csv = "domain,record_type,target\nexample.com,A,1.2.3.4\nexample.com,MX,10 mail.example.com\n";
    let records = read_records(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1], Record::new("example.com", "MX", "10 mail.example.com"));
}

#[test]
fn test_read_records_ignores_extra_columns() {
    let csv = "ttl,domain,record_type,target,source\n300,example.com,ns,ns1.example.com.,dig\n";
    let records = read_records(csv.as_bytes()).unwrap();
    assert_eq!(records, vec![Record::new("example.com", "ns", "ns1.example.com.")]);
}

#[test]
fn test_read_records_quoted_txt() {
    let csv = "domain,record_type,target\nexample.com,TXT,\"\"\"v=spf1 include:a.net ~all\"\"\"\n";
    let records = read_records(csv.as_bytes()).unwrap();
    assert_eq!(records[0].target, "\"v=spf1 include:a.net ~all\"");
}

#[test]
fn test_read_records_missing_column() {
    let csv = "domain,target\nexample.com,1.2.3.4\n";
    let result = read_records(csv.as_bytes());
    assert!(matches!(result, Err(GraphError::MissingColumn("record_type"))));
}

#[test]
fn test_read_records_empty_input() {
    let result = read_records("".as_bytes());
    assert!(matches!(result, Err(GraphError::MissingColumn("domain"))));
}

#[test]
fn test_read_records_short_row_fails() {
    let csv = "domain,record_type,target\nexample.com,A\n";
    let result = read_records(csv.as_bytes());
    assert!(matches!(result, Err(GraphError::Csv(_))));
}

#[test]
fn test_record_type_from_str() {
    assert_eq!(RecordType::from_str("CNAME"), RecordType::Cname);
    assert_eq!(RecordType::from_str(" txt "), RecordType::Txt);
    assert_eq!(RecordType::from_str("AAAA"), RecordType::Other("aaaa".to_string()));
    assert!(!RecordType::from_str("aaaa").is_known());
}
