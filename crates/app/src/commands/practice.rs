use std::time::Duration;

use pilot_core::model::{Category, Problem, SessionStats};
use pilot_core::random::RngSampler;
use services::{
    AnswerFeedback, Clock, PracticeLoopService, SessionLength, SessionOutcome, SessionProgress,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use crate::config::AppConfig;

enum Input<'a> {
    Skip,
    Quit,
    Hint,
    Pause,
    Answer(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    match line.trim() {
        "" => Input::Skip,
        "q" | "quit" => Input::Quit,
        "?" => Input::Hint,
        "p" | "pause" => Input::Pause,
        answer => Input::Answer(answer),
    }
}

pub async fn execute(
    config: &AppConfig,
    length: SessionLength,
    category: Option<Category>,
) -> anyhow::Result<()> {
    let storage = config.storage().await;
    let loop_svc = PracticeLoopService::new(Clock::default_clock(), storage);
    let mut sampler = RngSampler::thread();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut session = loop_svc.start_session(length, category).await;
    println!(
        "{length} session{}. Type an answer, ? for a hint, p to pause, q to finish.",
        category.map(|c| format!(" on {c}")).unwrap_or_default()
    );
    let progress = session.progress();
    show_problem(loop_svc.next_problem(&mut session, &mut sampler)?, &progress);

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;
    let mut warned = false;

    let outcome = loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(outcome) = loop_svc.tick(&mut session).await? {
                    println!("\nTime's up.");
                    break outcome;
                }
                if session.is_warning() && !warned {
                    warned = true;
                    println!("\nUnder a minute left.");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break loop_svc.end_session(&mut session).await?;
                };
                match classify(&line) {
                    Input::Skip => {}
                    Input::Quit => break loop_svc.end_session(&mut session).await?,
                    Input::Hint => match session.current_problem().and_then(Problem::hint) {
                        Some(hint) => println!("Hint: {hint}"),
                        None => println!("No hint for this one."),
                    },
                    Input::Pause => {
                        if session.is_paused() {
                            loop_svc.resume(&mut session);
                            println!("Resumed.");
                        } else {
                            loop_svc.pause(&mut session);
                            println!("Paused. Enter p to resume.");
                        }
                    }
                    Input::Answer(raw) => {
                        if session.is_paused() {
                            println!("Paused. Enter p to resume.");
                            continue;
                        }
                        match loop_svc.submit_answer(&mut session, raw).await? {
                            None => println!("Enter a number."),
                            Some(feedback) => {
                                show_feedback(&feedback);
                                let progress = session.progress();
                                show_problem(
                                    loop_svc.next_problem(&mut session, &mut sampler)?,
                                    &progress,
                                );
                            }
                        }
                    }
                }
            }
        }
    };

    show_summary(&outcome);
    Ok(())
}

fn show_problem(problem: &Problem, progress: &SessionProgress) {
    println!(
        "\n[{} | {}/{} correct] {}",
        clock(progress.remaining_seconds),
        progress.correct,
        progress.answered,
        problem.question()
    );
    if !problem.unit().is_empty() {
        println!("({})", problem.unit());
    }
}

fn show_feedback(feedback: &AnswerFeedback) {
    let problem = &feedback.problem;
    if feedback.is_correct() {
        println!("Correct. {}s", feedback.result.time_spent);
    } else {
        println!(
            "Incorrect. The answer is {} {}.",
            problem.correct_answer(),
            problem.unit()
        );
    }
    if !problem.explanation().is_empty() {
        println!("  {}", problem.explanation());
    }
}

fn show_summary(outcome: &SessionOutcome) {
    let Some(stats) = &outcome.stats else {
        println!("No problems answered; nothing recorded.");
        return;
    };
    print!("{}", summary_text(stats));
    if !outcome.saved {
        println!("The summary could not be saved; see the log for details.");
    }
}

fn summary_text(stats: &SessionStats) -> String {
    let mut out = format!(
        "Session: {} answered, {} correct ({}%), {}s average, {} elapsed\n",
        stats.problems_attempted(),
        stats.problems_correct(),
        stats.accuracy(),
        stats.average_time(),
        clock(stats.duration())
    );
    for (category, tally) in stats.category_breakdown() {
        out.push_str(&format!(
            "  {category:<22} {}/{}\n",
            tally.correct, tally.attempted
        ));
    }
    out
}

fn clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pilot_core::model::{ProblemDraft, ProblemId, ProblemResult, SessionId};
    use pilot_core::time::fixed_now;

    #[test]
    fn input_commands_are_recognized() {
        assert!(matches!(classify("  "), Input::Skip));
        assert!(matches!(classify("q"), Input::Quit));
        assert!(matches!(classify("?"), Input::Hint));
        assert!(matches!(classify("p"), Input::Pause));
        assert!(matches!(classify(" 181 "), Input::Answer("181")));
    }

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(clock(900), "15:00");
        assert_eq!(clock(59), "0:59");
    }

    #[test]
    fn summary_lists_each_category() {
        let problem = Problem::from_draft(
            ProblemId::generate(),
            Category::Crosswind,
            ProblemDraft::new("Q", 10.0, 2.0, "knots"),
        );
        let results = [
            ProblemResult::new(&problem, Some(10.0), true, 4, 1),
            ProblemResult::new(&problem, Some(13.0), false, 6, 2),
        ];
        let stats = SessionStats::from_results(SessionId::generate(), fixed_now(), 95, &results)
            .unwrap();

        let text = summary_text(&stats);

        assert!(text.starts_with("Session: 2 answered, 1 correct (50%), 5s average, 1:35"));
        assert!(text.contains("crosswind"));
        assert!(text.contains("1/2"));
    }
}
