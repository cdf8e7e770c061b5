use proptest::prelude::*;

use promptcheck::resolve::resolve;
use promptcheck::schema::{validate, IssueKind};
use promptcheck::score::{score, Category, ScoreWeights};
use promptcheck::wire::{FieldValue, Values, Variable};
use promptcheck::wizard::{AuthorStep, Wizard};

fn values(pairs: &[(&str, &str)]) -> Values {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
        .collect()
}

#[test]
fn formal_email_scenario() {
    let template = "Write a {tone} email about {topic}.";
    let variables = vec![
        Variable::select("tone", &["formal", "casual"], true),
        Variable::text("topic", true),
    ];
    let supplied = values(&[("tone", "formal")]);

    let validation = validate(&variables, &supplied);
    assert!(!validation.valid);
    assert_eq!(validation.errors.len(), 1);
    assert_eq!(validation.errors["topic"].kind, IssueKind::MissingRequired);

    let resolution = resolve(template, &supplied);
    assert_eq!(resolution.text, "Write a formal email about [topic].");
}

#[test]
fn a_validation_failure_never_blocks_resolution_or_scoring() {
    let variables = vec![Variable::number("count", true)];
    let supplied = values(&[("count", "three")]);

    let validation = validate(&variables, &supplied);
    assert_eq!(validation.errors["count"].kind, IssueKind::InvalidType);

    // The stages are independent; a bad value still substitutes literally.
    let resolution = resolve("give me {count} ideas", &supplied);
    assert_eq!(resolution.text, "give me three ideas");

    let quality = score("give me {count} ideas", &ScoreWeights::default());
    assert!(quality.score <= 100);
}

#[test]
fn authoring_flow_can_skip_the_starter_gallery() {
    let mut wizard = Wizard::new(AuthorStep::all()).unwrap();
    assert_eq!(wizard.current(), &AuthorStep::Intent);

    // Typed intent text jumps straight past the template gallery.
    let basic_info = wizard
        .steps()
        .iter()
        .position(|s| *s == AuthorStep::BasicInfo)
        .unwrap();
    assert!(wizard.skip_to(basic_info).moved);
    assert_eq!(wizard.current(), &AuthorStep::BasicInfo);

    // Walk forward to the end; commit saves and resets.
    while !wizard.is_terminal() {
        assert!(wizard.next().moved);
    }
    assert_eq!(wizard.current(), &AuthorStep::Marketplace);
    let committed = wizard.commit(|| Ok(()));
    assert!(committed.moved);
    assert_eq!(wizard.current(), &AuthorStep::Intent);
}

#[test]
fn richer_prompts_never_score_below_their_bare_form() {
    let weights = ScoreWeights::default();
    let bare = score("Explain quantum computing", &weights);
    let rich = score(
        "Act as a teacher. Explain quantum computing for beginners in bullet points, \
         providing a thorough, detailed walkthrough exceeding 100 characters in total \
         length for the learner.",
        &weights,
    );
    assert!(rich.score >= bare.score);
    assert_eq!(rich.category, Category::Excellent);
}

proptest! {
    #[test]
    fn resolver_leaves_token_free_text_alone(
        template in "[^{}]{0,200}",
        vals in prop::collection::btree_map("[a-z_]{1,8}", "[a-zA-Z0-9 ]{0,12}", 0..5),
    ) {
        let vals: Values = vals
            .into_iter()
            .map(|(k, v)| (k, FieldValue::Text(v)))
            .collect();
        let r = resolve(&template, &vals);
        prop_assert_eq!(r.text, template);
        prop_assert!(r.substituted.is_empty());
        prop_assert!(r.missing.is_empty());
    }

    #[test]
    fn resolver_is_total(
        template in ".{0,200}",
        vals in prop::collection::btree_map("[a-z_]{1,8}", "[a-zA-Z0-9 ]{0,12}", 0..5),
    ) {
        let vals: Values = vals
            .into_iter()
            .map(|(k, v)| (k, FieldValue::Text(v)))
            .collect();
        let r = resolve(&template, &vals);
        // Every unresolved token renders as its bracketed marker.
        for name in &r.missing {
            prop_assert!(!vals.contains_key(name));
            let marker = format!("[{}]", name);
            prop_assert!(r.text.contains(&marker));
        }
        for name in &r.substituted {
            prop_assert!(vals.contains_key(name));
        }
    }

    #[test]
    fn scorer_is_deterministic(prompt in ".{0,300}") {
        let weights = ScoreWeights::default();
        prop_assert_eq!(score(&prompt, &weights), score(&prompt, &weights));
    }

    #[test]
    fn scores_stay_within_bounds(prompt in ".{0,300}") {
        let q = score(&prompt, &ScoreWeights::default());
        prop_assert!(q.score <= 100);
        prop_assert_eq!(q.category, Category::from_score(q.score));
    }
}
