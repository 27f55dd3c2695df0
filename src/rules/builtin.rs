//! Built-in default rule set.
//!
//! Used whenever no rule file is supplied, the file is unreadable, or no
//! entry in it survives validation.

use super::{compile_pattern, Rule, Severity};

/// The five default detection rules.
pub fn default_rules() -> Vec<Rule> {
    vec![
        rule(
            "RCE_SUSPECT",
            "Possible remote code execution attempt (dangerous commands)",
            Severity::Critical,
            r"\b(wget|curl|nc|netcat|bash|sh|powershell)\b.*(http|https|\|\||;|&&)",
            "Block the source IP, review WAF/IDS coverage, patch input validation.",
        ),
        rule(
            "AUTH_FAILURE_BURST",
            "Repeated authentication failures",
            Severity::High,
            r"(failed password|authentication failure|invalid credentials)",
            "Enable temporary lockout, 2FA and brute-force alerting.",
        ),
        rule(
            "PERMISSION_DENIED",
            "Permission error (access denied)",
            Severity::Medium,
            r"(permission denied|access denied|unauthorized|forbidden|403)",
            "Review file permissions/ACLs and least-privilege policies.",
        ),
        rule(
            "MALWARE_IOC",
            "Generic malware/IOC indicator",
            Severity::High,
            r"(trojan|backdoor|malware|ransomware|c2|beacon)",
            "Isolate the host, run AV/EDR and hunt for persistence.",
        ),
        rule(
            "SQLI",
            "Possible SQL injection",
            Severity::High,
            r"(union select|or 1=1|sleep\(\d+\)|xp_cmdshell)",
            "Sanitize inputs, use parameterized queries and a WAF.",
        ),
    ]
}

fn rule(
    id: &str,
    description: &str,
    severity: Severity,
    pattern: &str,
    recommendation: &str,
) -> Rule {
    Rule {
        id: id.to_string(),
        description: description.to_string(),
        severity,
        // Patterns are static and known-valid.
        pattern: compile_pattern(pattern).expect("built-in pattern must compile"),
        recommendation: recommendation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_rules_with_unique_ids() {
        let rules = default_rules();
        assert_eq!(rules.len(), 5);
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn patterns_match_case_insensitively() {
        let rules = default_rules();
        let auth = rules.iter().find(|r| r.id == "AUTH_FAILURE_BURST").unwrap();
        assert!(auth.pattern.is_match("FAILED PASSWORD for root"));
    }
}
