use super::*;

#[test]
fn exact_rule_matches_name_and_kind() {
    let rule = FilterRule::exact(RuleAction::Include, DeclKind::Function, "mc_init");
    assert!(rule.matches("mc_init", DeclKind::Function));
    assert!(!rule.matches("mc_init", DeclKind::Struct));
    assert!(!rule.matches("mc_init2", DeclKind::Function));
}

#[test]
fn pattern_rule_is_anchored_at_the_head() {
    let rule = FilterRule::pattern(RuleAction::Include, DeclKind::Function, "mc_").unwrap();
    assert!(rule.matches("mc_init", DeclKind::Function));
    assert!(rule.matches("mc_", DeclKind::Function));
    assert!(
        !rule.matches("x_mc_init", DeclKind::Function),
        "an interior match must not count"
    );
}

#[test]
fn pattern_rule_does_not_require_a_full_match() {
    let rule = FilterRule::pattern(RuleAction::Include, DeclKind::Function, "alloc").unwrap();
    assert!(rule.matches("alloc_page", DeclKind::Function));
}

#[test]
fn pattern_alternation_still_anchors() {
    let rule = FilterRule::pattern(RuleAction::Exclude, DeclKind::Function, "a|b").unwrap();
    assert!(rule.matches("bar", DeclKind::Function));
    assert!(!rule.matches("xb", DeclKind::Function));
}

#[test]
fn invalid_pattern_is_rejected_up_front() {
    let err = FilterRule::pattern(RuleAction::Include, DeclKind::Function, "(unclosed").unwrap_err();
    assert!(matches!(err, DocpatchError::InvalidRule { .. }));
}

#[test]
fn empty_rule_set_accepts_everything() {
    let rules = RuleSet::new();
    assert!(rules.accepts("anything", DeclKind::Typedef));
    assert!(rules.accepts("", DeclKind::Function));
}

#[test]
fn include_and_exclude_compose() {
    let mut rules = RuleSet::new();
    rules.push(FilterRule::pattern(RuleAction::Include, DeclKind::Function, "mc_").unwrap());
    rules.push(FilterRule::exact(RuleAction::Exclude, DeclKind::Function, "mc_internal"));

    assert!(rules.accepts("mc_init", DeclKind::Function));
    assert!(!rules.accepts("mc_internal", DeclKind::Function), "exclude beats include");
    assert!(!rules.accepts("other", DeclKind::Function), "no include match means rejected");
    assert!(!rules.accepts("mc_init", DeclKind::Struct), "kinds must line up with the include rule");
}

#[test]
fn exclude_only_set_rejects_unmatched_names_too() {
    // With no include rule there is nothing to opt a name in.
    let mut rules = RuleSet::new();
    rules.push(FilterRule::exact(RuleAction::Exclude, DeclKind::Function, "legacy"));
    assert!(!rules.accepts("fresh", DeclKind::Function));
}
