use super::*;
use std::str::FromStr;

fn id(s: &str) -> ComponentId {
    s.parse().unwrap()
}

fn cycle_issue() -> ComponentIssue {
    ComponentIssue::CircularDependencies {
        components: vec![id("s/a@1.0.0"), id("s/b@1.0.0")],
        cycle: vec![id("s/a@1.0.0"), id("s/b@1.0.0"), id("s/a@1.0.0")],
    }
}

#[test]
fn test_issue_kind_parses_both_spellings() {
    assert_eq!(
        IssueKind::from_str("CircularDependencies").unwrap(),
        IssueKind::CircularDependencies
    );
    assert_eq!(
        IssueKind::from_str("circular-dependencies").unwrap(),
        IssueKind::CircularDependencies
    );
    assert_eq!(
        IssueKind::from_str("self-reference").unwrap(),
        IssueKind::SelfReference
    );
    assert!(IssueKind::from_str("nope").is_err());
}

#[test]
fn test_issue_display() {
    assert_eq!(
        cycle_issue().to_string(),
        "circular dependencies: s/a@1.0.0 -> s/b@1.0.0 -> s/a@1.0.0"
    );
    let self_ref = ComponentIssue::SelfReference {
        component: id("s/a@1.0.0"),
    };
    assert_eq!(self_ref.to_string(), "s/a@1.0.0 depends on itself");
}

#[test]
fn test_check_blocks_unsuppressed_issues() {
    let mut issues = ComponentIssues::new();
    issues.push(cycle_issue());

    let err = issues.check(&IssueSuppressions::none()).unwrap_err();
    assert_eq!(err.issues.len(), 1);
    assert!(err.to_string().starts_with("issues found: circular dependencies"));

    let suppressions = IssueSuppressions::none().suppress(IssueKind::CircularDependencies);
    assert!(issues.check(&suppressions).is_ok());
}

#[test]
fn test_suppressing_one_kind_keeps_the_other_blocking() {
    let mut issues = ComponentIssues::new();
    issues.push(cycle_issue());
    issues.push(ComponentIssue::SelfReference {
        component: id("s/c@1.0.0"),
    });

    let suppressions: IssueSuppressions = [IssueKind::CircularDependencies].into_iter().collect();
    let err = issues.check(&suppressions).unwrap_err();
    assert_eq!(err.issues.len(), 1);
    assert_eq!(err.issues[0].kind(), IssueKind::SelfReference);
}

#[test]
fn test_issues_per_component() {
    let mut issues = ComponentIssues::new();
    issues.push(cycle_issue());

    assert_eq!(issues.for_component(&id("s/a@1.0.0")).count(), 1);
    assert_eq!(issues.for_component(&id("s/z@1.0.0")).count(), 0);
    assert_eq!(issues.of_kind(IssueKind::SelfReference).count(), 0);
}

#[test]
fn test_issue_serializes_with_kind_tag() {
    let json = serde_json::to_value(cycle_issue()).unwrap();
    assert_eq!(json["kind"], "CircularDependencies");
    assert_eq!(json["cycle"].as_array().unwrap().len(), 3);
}
