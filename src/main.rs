use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use std::path::Path;
use uuid::Uuid;

use promptcheck::cli::{self, Args, OutputKind};
use promptcheck::config::Config;
use promptcheck::log;
use promptcheck::resolve;
use promptcheck::schema;
use promptcheck::score;
use promptcheck::ux;
use promptcheck::wire::{EvaluationReport, PromptBundle, Variable};
use promptcheck::wizard::{AuthorStep, Wizard};

fn starter_templates() -> &'static [(&'static str, &'static str)] {
    &[
        (
            "Email",
            "Act as a communications coach. Write a {tone} email about {topic} for {audience}.",
        ),
        (
            "Explainer",
            "You are a patient teacher. Explain {topic} for {audience} in bullet points.",
        ),
        (
            "Review",
            "Act as a senior {discipline} reviewer. Analyze the following draft for clarity and structure: {draft}",
        ),
    ]
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref().map(Path::new))?
        .with_root_override(args.root.as_deref());
    if args.no_save {
        cfg.save_reports = false;
    }

    let run_id = Uuid::new_v4();
    if args.debug {
        println!("debug: flag enabled");
        log::print_planned_paths(&cfg, run_id);
    }

    let bundle = if args.wizard {
        match run_wizard(&cfg)? {
            Some(b) => b,
            None => {
                println!("Aborted by user.");
                return Ok(());
            }
        }
    } else {
        load_bundle(&args)?
    };

    evaluate(bundle, run_id, &args, &cfg)
}

fn load_bundle(args: &Args) -> Result<PromptBundle> {
    if let Some(path) = &args.bundle {
        return Ok(PromptBundle::from_path(Path::new(path))?);
    }
    if let Some(template) = &args.template {
        let values = cli::parse_value_flags(&args.set)?;
        return Ok(PromptBundle { template: template.clone(), values, ..Default::default() });
    }
    bail!("provide --bundle <file>, --template <text>, or --wizard");
}

fn evaluate(bundle: PromptBundle, run_id: Uuid, args: &Args, cfg: &Config) -> Result<()> {
    let warnings = schema::check_definitions(&bundle.variables);
    let report = EvaluationReport {
        schema_version: "v1".into(),
        id: run_id,
        timestamp: Utc::now(),
        title: bundle.title.clone(),
        validation: schema::validate(&bundle.variables, &bundle.values),
        resolution: resolve::resolve_with_defaults(
            &bundle.template,
            &bundle.values,
            &bundle.variables,
        ),
        score: score::score(&bundle.template, &cfg.weights),
    };

    match args.format {
        OutputKind::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputKind::Text => {
            ux::show_definition_warnings(&warnings);
            ux::show_validation(&report.validation);
            ux::show_resolution(&report.resolution);
            ux::show_score(&report.score);
        }
    }

    if cfg.save_reports && !args.dry_run {
        let saved = log::save_run(&bundle, &report, cfg)?;
        if args.debug {
            log::print_saved_paths(&saved);
        }
    }

    Ok(())
}

/// Interactive authoring flow. Returns the authored bundle once committed,
/// or None when the user backs out.
fn run_wizard(cfg: &Config) -> Result<Option<PromptBundle>> {
    let mut wizard = Wizard::new(AuthorStep::all())?;
    let mut bundle = PromptBundle::default();
    let total = wizard.steps().len();

    loop {
        let step = *wizard.current();
        ux::show_step_banner(wizard.current_index(), total, step.title());

        match step {
            AuthorStep::Intent => {
                let intent =
                    ux::prompt_line("Draft your prompt (blank to browse starter templates)");
                if intent.is_empty() {
                    wizard.next();
                } else {
                    // Typed text replaces the starter gallery.
                    bundle.template = intent;
                    let basic_info = wizard
                        .steps()
                        .iter()
                        .position(|s| *s == AuthorStep::BasicInfo)
                        .unwrap_or(0);
                    wizard.skip_to(basic_info);
                }
            }
            AuthorStep::Template => {
                for (i, (name, text)) in starter_templates().iter().enumerate() {
                    println!("  {}. {} — {}", i + 1, name, text);
                }
                let choice = ux::prompt_line("Starter number (blank for none)");
                if let Some(idx) = choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                    if let Some((_, text)) = starter_templates().get(idx) {
                        bundle.template = text.to_string();
                    }
                }
                wizard.next();
            }
            AuthorStep::BasicInfo => {
                let title = ux::prompt_line("Title");
                if !title.is_empty() {
                    bundle.title = Some(title);
                }
                let has_title = bundle.title.is_some();
                let t = wizard.next_guarded(|_| {
                    if has_title {
                        Ok(())
                    } else {
                        Err("a title is required".into())
                    }
                });
                if let Some(reason) = &t.reason {
                    ux::warn(reason);
                }
            }
            AuthorStep::Content => {
                if !bundle.template.is_empty() {
                    println!("Current template:\n  {}", bundle.template);
                }
                let text = ux::prompt_line("Template text (blank to keep current)");
                if !text.is_empty() {
                    bundle.template = text;
                }
                // Declare a variable for every token that has none yet.
                let probe = resolve::resolve(&bundle.template, &bundle.values);
                for name in probe.missing {
                    if !bundle.variables.iter().any(|v| v.name == name) {
                        bundle.variables.push(Variable::text(&name, true));
                    }
                }
                let has_template = !bundle.template.is_empty();
                let t = wizard.next_guarded(|_| {
                    if has_template {
                        Ok(())
                    } else {
                        Err("the template cannot be empty".into())
                    }
                });
                if let Some(reason) = &t.reason {
                    ux::warn(reason);
                }
            }
            AuthorStep::Advanced => {
                for var in &mut bundle.variables {
                    let default =
                        ux::prompt_line(&format!("Default for {{{}}} (blank to skip)", var.name));
                    if !default.is_empty() {
                        var.default_value = Some(default);
                    }
                }
                wizard.next();
            }
            AuthorStep::Marketplace => {
                let preview = resolve::resolve_with_defaults(
                    &bundle.template,
                    &bundle.values,
                    &bundle.variables,
                );
                ux::show_resolution(&preview);
                ux::show_score(&score::score(&bundle.template, &cfg.weights));

                if cfg.auto_approve || ux::confirm("Save this bundle?") {
                    let id = Uuid::new_v4();
                    let to_save = bundle.clone();
                    let t = wizard.commit(|| {
                        log::save_bundle(&to_save, cfg, id)
                            .map(|_| ())
                            .map_err(|e| e.to_string())
                    });
                    if t.moved {
                        return Ok(Some(bundle));
                    }
                    if let Some(reason) = &t.reason {
                        ux::warn(reason);
                    }
                    return Ok(None);
                } else if ux::confirm("Go back and edit?") {
                    wizard.previous();
                } else {
                    return Ok(None);
                }
            }
        }
    }
}
