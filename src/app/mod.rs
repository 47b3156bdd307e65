//! Application glue
//!
//! Wires the CLI to the engine: onboarding, the dashboard, the play loop
//! with its countdown, report rendering, certificate display, and the CSV
//! export. Rendering only; every decision is made by the engine.

pub mod display;
pub mod export;

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::io::{self, Write as _};
use std::path::PathBuf;

use crate::catalog::{Catalog, ReadingText};
use crate::cli::{Args, Commands, PlayMode};
use crate::config::AppConfig;
use crate::engine::{CompletionOutcome, Engine};
use crate::quiz::{Countdown, QuizMode, QuizSession, QuizSummary};
use crate::store::{JsonFileStore, Profile, StateStore, StoreConfig};

/// Run the selected subcommand
pub async fn run(args: Args) -> Result<()> {
    let store_config = match &args.state_dir {
        Some(dir) => StoreConfig {
            state_dir: dir.clone(),
        },
        None => StoreConfig::default(),
    };
    let store = JsonFileStore::new(store_config).context("could not open the state directory")?;
    let mut engine = Engine::new(store);

    let config_path = args.config.clone().unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load(&config_path);
    let catalog = Catalog::load(&args.data_dir);

    match args.command {
        None | Some(Commands::Dashboard) => dashboard(&mut engine, &catalog).await,
        Some(Commands::Play { mode, text }) => {
            play(&mut engine, &catalog, &config, mode, text).await
        }
        Some(Commands::Stats) => stats(&mut engine).await,
        Some(Commands::Certificate) => certificate(&mut engine, &config).await,
        Some(Commands::Verify { code }) => {
            verify(&engine, &code);
            Ok(())
        }
        Some(Commands::Export { output }) => export_report(&engine, output),
        Some(Commands::Reset { yes }) => reset(&mut engine, yes).await,
    }
}

/// Read one trimmed line from stdin, `None` on EOF
async fn prompt_line(prompt: &str) -> Result<Option<String>> {
    let prompt = prompt.to_string();
    let line = tokio::task::spawn_blocking(move || {
        print!("{prompt}");
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim().to_string()),
            Err(_) => None,
        }
    })
    .await?;
    Ok(line)
}

/// Load the profile, running onboarding on first use
async fn ensure_profile(engine: &mut Engine<JsonFileStore>) -> Result<Profile> {
    if let Some(profile) = engine.store().load_profile() {
        return Ok(profile);
    }

    println!("{}", display::heading("Welcome to ReadHero!"));
    println!("Let's set up your reading journey.\n");

    let name = loop {
        match prompt_line("Your name: ").await? {
            Some(name) if !name.is_empty() => break name,
            Some(_) => println!("{}", "Please enter your name first.".yellow()),
            None => anyhow::bail!("onboarding cancelled"),
        }
    };
    let class_name = match prompt_line("Your class (optional): ").await? {
        Some(class) if !class.is_empty() => class,
        _ => "unspecified".to_string(),
    };

    let profile = Profile { name, class_name };
    engine
        .store_mut()
        .save_profile(&profile)
        .context("could not save profile")?;
    println!("\nAll set, {}! 🎉\n", profile.name.bold());

    Ok(profile)
}

async fn dashboard(engine: &mut Engine<JsonFileStore>, catalog: &Catalog) -> Result<()> {
    let profile = ensure_profile(engine).await?;
    let progress = engine.store().load_progress();
    let skills = engine.store().load_skills();
    let daily = engine.store().load_daily();
    let completed = engine.store().load_completed();

    println!("{}", display::heading(&format!("Hi {} 👋", profile.name)));
    println!(
        "{} texts completed | {} XP | level {}",
        progress.texts_completed, progress.xp, progress.level
    );
    if daily.streak > 0 {
        println!("🔥 {} day streak", daily.streak);
    }

    println!("\n{}", display::heading("Skills"));
    for (id, record) in skills.iter() {
        println!(
            "  {:>2} {} {}",
            id,
            display::bar(record.mastery, 20),
            display::mastery_value(record.mastery)
        );
    }

    // Highlight the weakest skills once the student has started answering
    if progress.total_answered > 0 {
        let weakest = skills.weakest(3);
        let labels: Vec<String> = weakest
            .iter()
            .map(|(id, mastery)| format!("skill {id} ({mastery}%)"))
            .collect();
        println!("\nNeeds practice: {}", labels.join(", ").yellow());
    }

    let badges = engine.store().load_badges();
    println!("\n{}", display::heading("Badges"));
    for badge in crate::engine::BADGES {
        let mark = if badges.iter().any(|b| b == badge.id) {
            badge.icon
        } else {
            "🔒"
        };
        println!("  {mark} {}", badge.name);
    }

    if catalog.is_empty() {
        println!("\n{}", "No texts available - check the data directory.".red());
        return Ok(());
    }

    println!("\n{}", display::heading("Texts"));
    for text in catalog.texts() {
        let best = completed.iter().find(|c| c.id == text.id);
        let status = match best {
            Some(c) => format!("best {}", display::score_value(c.score)),
            None => "new".dimmed().to_string(),
        };
        println!(
            "  [{:>3}] {} ({}, {}) - {status}",
            text.id, text.title, text.difficulty, text.genre
        );
    }
    println!("\nPlay with: readhero play [--mode practice|daily|exam] [--text ID]");

    Ok(())
}

async fn play(
    engine: &mut Engine<JsonFileStore>,
    catalog: &Catalog,
    config: &AppConfig,
    mode: PlayMode,
    text_id: Option<u32>,
) -> Result<()> {
    ensure_profile(engine).await?;

    if catalog.is_empty() {
        println!("{}", "No texts available - check the data directory.".red());
        return Ok(());
    }

    let today = Local::now().date_naive();
    let text: Option<&ReadingText> = match mode {
        PlayMode::Daily => engine.select_daily_text(catalog, today)?,
        PlayMode::Practice | PlayMode::Exam => text_id
            .and_then(|id| catalog.find(id))
            .or_else(|| engine.select_next_text(catalog, &mut rand::thread_rng())),
    };
    let Some(text) = text else {
        println!("{}", "Nothing to play right now.".yellow());
        return Ok(());
    };

    let quiz_mode = match mode {
        PlayMode::Practice => QuizMode::Practice,
        PlayMode::Daily => QuizMode::Daily,
        PlayMode::Exam => QuizMode::Exam,
    };
    let mut session = QuizSession::new(quiz_mode, text.clone(), &mut rand::thread_rng());

    println!("\n{}", display::heading(&session.text().title));
    println!("{}\n", session.text().body);

    // The countdown lives for the whole session; dropping it on any exit
    // path kills the timer task.
    let mut countdown = match quiz_mode {
        QuizMode::Exam => Some(Countdown::start(config.exam_seconds())),
        _ => None,
    };

    let summary = run_question_loop(engine, config, &mut session, &mut countdown).await?;
    drop(countdown);

    let Some(summary) = summary else {
        return Ok(());
    };

    let outcome = engine.complete_text(summary.text_id, summary.score_percent, config)?;
    if quiz_mode == QuizMode::Daily {
        engine.mark_daily_done()?;
    }

    report(&session, &summary, &outcome);
    Ok(())
}

/// Ask questions until the session is complete, time runs out, or input
/// ends. Returns the summary, or `None` when the session never finished.
async fn run_question_loop(
    engine: &mut Engine<JsonFileStore>,
    config: &AppConfig,
    session: &mut QuizSession,
    countdown: &mut Option<Countdown>,
) -> Result<Option<QuizSummary>> {
    loop {
        if session.is_complete() {
            return Ok(session.finish());
        }
        let Some(question) = session.current_question().cloned() else {
            return Ok(session.finish());
        };

        println!(
            "{} {}/{}{}",
            "Question".bold(),
            session.question_number(),
            session.total_questions(),
            match countdown {
                Some(cd) => format!("  ⏱ {}", cd.display()),
                None => String::new(),
            }
        );
        if session.mode() == QuizMode::Practice {
            println!("{}", format!("Skill {}", question.skill_id).dimmed());
        }
        println!("{}", question.stem);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {option}", display::option_letter(i));
        }

        let line = match countdown {
            Some(cd) => {
                tokio::select! {
                    line = prompt_line("> ") => line?,
                    _ = cd.expired() => {
                        println!("\n{}", "Time is up!".red().bold());
                        return Ok(session.finish());
                    }
                }
            }
            None => prompt_line("> ").await?,
        };
        let Some(line) = line else {
            // Input ended mid-session; abandon without completing the text
            return Ok(None);
        };

        let Some(choice) = parse_choice(&line, question.options.len()) else {
            println!("{}", "Answer with A, B, C or D.".yellow());
            continue;
        };

        let Some(feedback) = session.submit_answer(choice) else {
            return Ok(session.finish());
        };
        engine.record_answer(question.skill_id, feedback.is_correct, config)?;

        if session.mode() == QuizMode::Practice {
            if feedback.is_correct {
                println!(
                    "{} {}",
                    "✅ Correct!".green().bold(),
                    format!("+{} XP", config.xp_per_correct).yellow()
                );
            } else {
                println!(
                    "{} The answer was {}.",
                    "❌ Not quite.".red().bold(),
                    display::option_letter(feedback.correct_index)
                );
            }
            if !feedback.explanation.is_empty() {
                println!("{}", feedback.explanation.dimmed());
            }
        }
        println!();

        session.advance();
    }
}

/// Map a typed answer (letter or number) to an option index
fn parse_choice(input: &str, option_count: usize) -> Option<usize> {
    let input = input.trim();
    if input.len() != 1 {
        return None;
    }

    let ch = input.chars().next()?;
    let index = match ch {
        'a'..='z' => (ch as u8 - b'a') as usize,
        'A'..='Z' => (ch as u8 - b'A') as usize,
        '1'..='9' => (ch as u8 - b'1') as usize,
        _ => return None,
    };
    (index < option_count).then_some(index)
}

fn report(session: &QuizSession, summary: &QuizSummary, outcome: &CompletionOutcome) {
    println!("{}", display::heading("Result"));
    println!(
        "{} of {} correct - {} (grade: {})",
        summary.correct,
        summary.total,
        display::score_value(summary.score_percent),
        crate::engine::certificate::grade_for_percent(summary.score_percent)
    );
    println!(
        "Level {} | {} XP total",
        outcome.progress.level, outcome.progress.xp
    );

    for answer in &summary.answers {
        let mark = if answer.is_correct { "✅" } else { "❌" };
        println!("  {mark} skill {}", answer.skill_id);
    }

    // Exam mode gets the full review, practice already saw feedback inline
    if session.mode() == QuizMode::Exam {
        println!("\n{}", display::heading("Review"));
        for (question, answer) in session.questions().iter().zip(summary.answers.iter()) {
            println!("{}", question.stem);
            if answer.is_correct {
                println!("  {}", "✅ correct".green());
            } else {
                println!(
                    "  {} correct answer: {}",
                    "❌".red(),
                    question.options[answer.correct_index]
                );
            }
            if !question.explanation.is_empty() {
                println!("  {}", question.explanation.dimmed());
            }
        }
    }

    for badge in &outcome.new_badges {
        println!(
            "\n🏆 {} {}",
            "New badge:".yellow().bold(),
            format!("{} {}", badge.icon, badge.name)
        );
    }
}

async fn stats(engine: &mut Engine<JsonFileStore>) -> Result<()> {
    let profile = ensure_profile(engine).await?;
    let progress = engine.store().load_progress();
    let skills = engine.store().load_skills();
    let completed = engine.store().load_completed();

    println!("{}", display::heading(&profile.name));
    println!("{}", profile.class_name.dimmed());
    println!(
        "⭐ {} XP | 📖 {} texts | 📊 {} average | 🏅 level {}",
        progress.xp,
        progress.texts_completed,
        display::score_value(progress.accuracy_percent()),
        progress.level
    );

    println!("\n{}", display::heading("Skill mastery"));
    for (id, record) in skills.iter() {
        println!(
            "  {:>2} {} {}  ({} attempts)",
            id,
            display::bar(record.mastery, 20),
            display::mastery_value(record.mastery),
            record.attempts.len()
        );
    }

    let badges = engine.store().load_badges();
    println!("\n{}", display::heading("Badges"));
    for badge in crate::engine::BADGES {
        if badges.iter().any(|b| b == badge.id) {
            println!("  {} {}", badge.icon, badge.name);
        } else {
            println!("  🔒 {}", badge.name.dimmed());
        }
    }

    if !completed.is_empty() {
        println!("\n{}", display::heading("Completed texts"));
        for text in &completed {
            println!(
                "  [{:>3}] best {} over {} attempt(s), last {}",
                text.id,
                display::score_value(text.score),
                text.attempts,
                display::format_date(&text.last_date)
            );
        }
    }

    Ok(())
}

async fn certificate(engine: &mut Engine<JsonFileStore>, config: &AppConfig) -> Result<()> {
    ensure_profile(engine).await?;

    let report = engine.certificate_eligibility(config);
    if !report.eligible {
        println!("{}", display::heading("🎓 Completion certificate"));
        println!("Finish these requirements to earn your certificate:\n");

        let checks = [
            (
                report.all_mastered,
                format!("Master every skill ({}% each)", report.mastery_threshold),
            ),
            (
                report.enough_texts,
                format!(
                    "Complete at least {} texts (currently: {})",
                    report.min_texts, report.texts_completed
                ),
            ),
            (
                report.good_average,
                format!(
                    "Overall average ≥ {}% (currently: {}%)",
                    report.min_avg_percent, report.avg_percent
                ),
            ),
        ];
        for (done, label) in checks {
            println!("  {} {label}", if done { "✅" } else { "⬜" });
        }
        println!("\nKeep training!");
        return Ok(());
    }

    let cert = engine.issue_certificate(config, &mut rand::thread_rng())?;
    println!("{}", display::heading("🎓 Certificate of Achievement"));
    println!(
        "\nAwarded to {} ({}) for completing the ReadHero challenge",
        cert.name.bold(),
        cert.class_name
    );
    println!(
        "with a grade of {} and an average of {}%.",
        cert.grade.bold(),
        cert.avg_percent
    );
    println!("\nDate: {}", display::format_date(&cert.date));
    println!("Texts completed: {}", cert.texts_completed);
    println!("XP: {}", cert.xp);
    println!("Verification code: {}", cert.verification_id.bold().yellow());

    Ok(())
}

fn verify(engine: &Engine<JsonFileStore>, code: &str) {
    match engine.verify_certificate(code.trim()) {
        Some(cert) => {
            println!("{}", "✅ Valid certificate".green().bold());
            println!("Name: {}", cert.name);
            println!("Date: {}", display::format_date(&cert.date));
            println!("Average: {}%", cert.avg_percent);
        }
        None => println!("{}", "❌ Unknown verification code".red().bold()),
    }
}

fn export_report(engine: &Engine<JsonFileStore>, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from("readhero_report.csv"));
    export::write_report(
        &path,
        engine.store().load_profile().as_ref(),
        &engine.store().load_progress(),
        &engine.store().load_skills(),
        Local::now().date_naive(),
    )
    .context("could not write the report")?;
    println!("Report written to {}", path.display());
    Ok(())
}

async fn reset(engine: &mut Engine<JsonFileStore>, yes: bool) -> Result<()> {
    if !yes {
        let answer = prompt_line("Erase ALL student data? This cannot be undone. [y/N] ").await?;
        if !matches!(answer.as_deref(), Some("y") | Some("Y") | Some("yes")) {
            println!("Nothing erased.");
            return Ok(());
        }
    }

    engine.reset().context("could not clear the store")?;
    println!("{}", "All data erased.".green());
    Ok(())
}
