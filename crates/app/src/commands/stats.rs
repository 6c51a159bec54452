use std::fmt::Write as _;

use services::{Clock, Dashboard, ProgressService};

use crate::config::AppConfig;

pub async fn execute(config: &AppConfig, days: u32) -> anyhow::Result<()> {
    let storage = config.storage().await;
    let dashboard = ProgressService::new(Clock::default_clock(), storage)
        .dashboard(days)
        .await?;
    print!("{}", render(&dashboard));
    Ok(())
}

fn render(d: &Dashboard) -> String {
    let mut out = String::new();
    let o = &d.overall;
    let _ = writeln!(
        out,
        "Overall: {} problems, {} correct ({}%), {}s average",
        o.total_problems, o.total_correct, o.accuracy, o.avg_time
    );
    let _ = writeln!(
        out,
        "Streak: {} day(s), longest {}; {} day(s) practiced",
        d.streak.current_streak, d.streak.longest_streak, d.days_practiced
    );
    let _ = writeln!(
        out,
        "Active on {} of the last {} days",
        d.active_days(),
        d.calendar.len()
    );

    if o.total_problems == 0 {
        out.push_str("No attempts yet. Run `pilot-math practice` to start.\n");
        return out;
    }

    out.push_str("\nBy category:\n");
    for c in &d.categories {
        let _ = writeln!(
            out,
            "  {:<22} {:>4}/{:<4} {:>3}s avg",
            c.category, c.correct, c.attempted, c.avg_time
        );
    }

    out.push_str("\nTiming (most practiced first):\n");
    for t in &d.timing {
        let _ = writeln!(
            out,
            "  {:<22} avg {:>3}s  fastest {:>3}s  slowest {:>3}s",
            t.category, t.avg_time, t.fastest, t.slowest
        );
    }

    if !d.weak.is_empty() {
        out.push_str("\nNeeds work:\n");
        for w in &d.weak {
            let _ = writeln!(
                out,
                "  {:<22} {}% over {} attempts",
                w.category, w.accuracy, w.attempted
            );
        }
    }

    if !d.miss_rates.is_empty() {
        out.push_str("\nMost missed:\n");
        for m in &d.miss_rates {
            let _ = writeln!(
                out,
                "  {:<22} {}% ({}/{})",
                m.category, m.rate, m.missed, m.total
            );
        }
    }

    if !d.recent_sessions.is_empty() {
        out.push_str("\nRecent sessions:\n");
        for s in &d.recent_sessions {
            let _ = writeln!(
                out,
                "  {}  {}/{} ({}%) in {} min",
                s.date().format("%Y-%m-%d %H:%M"),
                s.problems_correct(),
                s.problems_attempted(),
                s.accuracy(),
                s.duration() / 60
            );
        }
    }
    out
}
