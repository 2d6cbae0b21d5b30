//! Track command: collects inputs, runs a session and writes its report.
//!
//! Values missing from the command line are asked for on the console in the
//! same order as the interactive dialogue: rate, names, mode, then either the
//! start and end time or the target hours.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use ct_core::{
    Clock, Engagement, HourlyRate, Mode, PhaseEvent, Session, SessionInputs, Suspend, SystemClock,
    TIMESTAMP_FORMAT, ThreadSuspend, TimerController,
};
use tracing::debug;

use crate::cli::TrackArgs;
use crate::commands::util::{parse_hours, parse_name, parse_rate, parse_timestamp};
use crate::config::{Config, ReportFormat};
use crate::prompt::Prompter;
use crate::report::FileReportSink;
use crate::stop::StopSignal;

/// A finished session and where its report went.
#[derive(Debug)]
pub struct Outcome {
    pub session: Session,
    pub report_path: PathBuf,
}

/// Runs the track command against the real clock.
///
/// During an automatic run, SIGINT or SIGTERM stops the timer at the next
/// phase boundary and the completed work is still reported.
pub fn run<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &Config,
    args: &TrackArgs,
) -> Result<Outcome> {
    let stop = StopSignal::from_signals();
    run_with(prompter, config, args, &SystemClock, &ThreadSuspend, &stop)
}

/// Runs the track command with an injected clock, suspend and stop signal.
pub fn run_with<R, W, C, S>(
    prompter: &mut Prompter<R, W>,
    config: &Config,
    args: &TrackArgs,
    clock: &C,
    suspend: &S,
    stop: &StopSignal,
) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
    C: Clock,
    S: Suspend,
{
    let pomodoro = config.pomodoro().context("invalid interval lengths in config")?;
    let rate = resolve_rate(prompter, config, args)?;

    let contractor = match &args.contractor {
        Some(name) => parse_name(name).context("invalid --contractor")?,
        None => prompter.ask_until("Enter the contractor name:", parse_name)?,
    };
    let project = match &args.project {
        Some(name) => parse_name(name).context("invalid --project")?,
        None => prompter.ask_until("Enter the project name:", parse_name)?,
    };
    let engagement = Engagement::new(contractor, project)?;

    let selector = match &args.mode {
        Some(mode) => mode.clone(),
        None => {
            prompter.say("Choose timer mode:")?;
            prompter.say("1. Manual")?;
            prompter.say("2. Automatic")?;
            prompter.ask("Enter your choice (1 or 2):")?
        }
    };

    // An unrecognized selector collects nothing here; the controller rejects it.
    let inputs = match selector.parse::<Mode>() {
        Ok(Mode::Manual) => {
            let start = resolve_timestamp(prompter, args.start.as_deref(), "start")?;
            let end = resolve_timestamp(prompter, args.end.as_deref(), "end")?;
            SessionInputs::manual(engagement, start, end)
        }
        Ok(Mode::Automatic) => {
            let hours = match &args.hours {
                Some(hours) => parse_hours(hours).context("invalid --hours")?,
                None => prompter.ask_until(
                    "Enter the desired duration of automatic time tracking (in hours):",
                    parse_hours,
                )?,
            };
            stop.arm().context("failed to install interrupt handlers")?;
            prompter.say("Press Ctrl-C to stop after the current interval.")?;
            SessionInputs::automatic(engagement, hours)
        }
        Err(_) => SessionInputs {
            engagement,
            window: None,
            target_hours: None,
        },
    };

    let format = if args.json {
        ReportFormat::Json
    } else {
        config.format
    };
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    debug!(?format, output_dir = %output_dir.display(), "report destination");
    let mut sink =
        FileReportSink::new(output_dir, format, config.currency.clone()).with_clock(clock);

    let controller =
        TimerController::new(rate, pomodoro, clock, suspend).with_cancellation(stop.flag());
    let target_hours = inputs.target_hours;
    let mut announced = false;
    let mut progress = Ok(());
    let result = controller.run_observed(&selector, inputs, &mut sink, |event| {
        if progress.is_err() {
            return;
        }
        let output = prompter.output_mut();
        if let (false, Some(hours)) = (announced, target_hours) {
            announced = true;
            progress = writeln!(output, "Automatic timer started for {hours} hours from now.");
        }
        if progress.is_ok() {
            progress = write_progress(output, event);
        }
    });
    let session = result?;
    progress.context("failed to write to console")?;

    let currency = &config.currency;
    prompter.say(format_args!(
        "Total duration: {:.2} hours",
        session.worked_hours()
    ))?;
    prompter.say(format_args!("Total cost: {currency} {}", session.total_cost()))?;

    let report_path = sink
        .written()
        .context("report was not written")?
        .to_path_buf();
    prompter.say(format_args!("Report written to {}", report_path.display()))?;

    Ok(Outcome {
        session,
        report_path,
    })
}

fn resolve_rate<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &Config,
    args: &TrackArgs,
) -> Result<HourlyRate> {
    if let Some(rate) = args.rate {
        return HourlyRate::new(rate).context("invalid --rate");
    }
    if let Some(rate) = config.hourly_rate {
        return HourlyRate::new(rate).context("invalid hourly_rate in config");
    }
    prompter.ask_until("Enter your cost per hour per project:", parse_rate)
}

fn resolve_timestamp<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    flag: Option<&str>,
    which: &str,
) -> Result<NaiveDateTime> {
    match flag {
        Some(value) => parse_timestamp(value).with_context(|| format!("invalid --{which}")),
        None => prompter.ask_until(
            &format!("Enter the {which} time (format: yyyy-MM-dd HH:mm:ss):"),
            parse_timestamp,
        ),
    }
}

fn write_progress<W: Write>(output: &mut W, event: &PhaseEvent) -> std::io::Result<()> {
    let fmt = |t: &NaiveDateTime| t.format(TIMESTAMP_FORMAT).to_string();
    match event {
        PhaseEvent::WorkStarted { from, until } => {
            writeln!(output, "Work session: {} - {}", fmt(from), fmt(until))
        }
        PhaseEvent::BreakStarted { from, until } => {
            writeln!(output, "Break: {} - {}", fmt(from), fmt(until))
        }
        PhaseEvent::Finished {
            worked,
            work_intervals,
            cancelled,
        } => {
            let verb = if *cancelled { "cancelled" } else { "stopped" };
            writeln!(
                output,
                "Automatic timer {verb} after {work_intervals} work interval(s), {} minutes worked.",
                worked.num_minutes()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use chrono::TimeDelta;
    use ct_core::TimerError;
    use ct_core::clock::SimulatedClock;

    type TestPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

    fn prompter(input: &str) -> TestPrompter {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn config(dir: &std::path::Path) -> Config {
        Config {
            output_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    fn track(
        p: &mut TestPrompter,
        config: &Config,
        args: &TrackArgs,
        clock: &SimulatedClock,
    ) -> Result<Outcome> {
        run_with(p, config, args, clock, clock, &StopSignal::detached())
    }

    fn output(p: TestPrompter) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_interactive_manual_session() {
        let temp = tempfile::tempdir().unwrap();
        let clock = SimulatedClock::at("2024-01-01 11:31:00");
        let mut p = prompter(
            "ten\n10\nAsha\nWebsite\n1\n2024-01-01 09:00:00\nsoon\n2024-01-01 11:30:00\n",
        );

        let outcome = track(&mut p, &config(temp.path()), &TrackArgs::default(), &clock)
        .unwrap();

        assert_eq!(outcome.session.total_cost().to_string(), "25.00");
        assert_eq!(outcome.session.contractor_name(), "Asha");
        assert_eq!(
            outcome.report_path,
            temp.path().join("CostReport 11h.31m.0s.txt")
        );
        assert!(outcome.report_path.exists());

        let out = output(p);
        assert!(out.contains("Choose timer mode:\n1. Manual\n2. Automatic\n"));
        assert_eq!(out.matches("Enter your cost per hour per project:").count(), 2);
        assert_eq!(out.matches("Enter the end time").count(), 2);
        assert!(out.contains("Total duration: 2.50 hours\n"));
        assert!(out.contains("Total cost: NRS 25.00\n"));
        assert!(out.contains("Report written to "));
    }

    #[test]
    fn test_flags_skip_prompts() {
        let temp = tempfile::tempdir().unwrap();
        let clock = SimulatedClock::at("2024-01-01 12:00:00");
        let mut p = prompter("");
        let args = TrackArgs {
            contractor: Some("Asha".to_string()),
            project: Some("Website".to_string()),
            rate: Some(20.0),
            mode: Some("1".to_string()),
            start: Some("2024-01-01 09:00:00".to_string()),
            end: Some("2024-01-01 09:00:00".to_string()),
            json: true,
            ..TrackArgs::default()
        };

        let outcome = track(&mut p, &config(temp.path()), &args, &clock).unwrap();

        assert_eq!(outcome.session.worked_duration(), TimeDelta::zero());
        assert_eq!(outcome.session.total_cost().to_string(), "0.00");
        assert_eq!(outcome.report_path.extension().unwrap(), "json");
        assert!(!output(p).contains("Enter"));
    }

    #[test]
    fn test_automatic_session_prints_phases() {
        let temp = tempfile::tempdir().unwrap();
        let clock = SimulatedClock::at("2024-01-01 09:00:00");
        let mut p = prompter("1\n");
        let args = TrackArgs {
            contractor: Some("Asha".to_string()),
            project: Some("Website".to_string()),
            rate: Some(20.0),
            mode: Some("2".to_string()),
            ..TrackArgs::default()
        };

        let outcome = track(&mut p, &config(temp.path()), &args, &clock).unwrap();

        assert_eq!(outcome.session.worked_duration(), TimeDelta::minutes(45));
        assert_eq!(clock.suspends().len(), 2);

        let out = output(p);
        assert!(out.contains("Automatic timer started for 1 hours from now.\n"));
        assert!(out.contains("Work session: 2024-01-01 09:00:00 - 2024-01-01 09:45:00\n"));
        assert!(out.contains("Break: 2024-01-01 09:45:00 - 2024-01-01 10:00:00\n"));
        assert!(out.contains("Automatic timer stopped after 1 work interval(s), 45 minutes worked.\n"));
        assert!(out.contains("Total duration: 0.75 hours\n"));
        assert!(out.contains("Total cost: NRS 15.00\n"));
    }

    #[test]
    fn test_stop_before_first_interval_reports_no_work() {
        let temp = tempfile::tempdir().unwrap();
        let clock = SimulatedClock::at("2024-01-01 09:00:00");
        let mut p = prompter("");
        let args = TrackArgs {
            contractor: Some("Asha".to_string()),
            project: Some("Website".to_string()),
            rate: Some(20.0),
            mode: Some("2".to_string()),
            hours: Some("8".to_string()),
            ..TrackArgs::default()
        };
        let stop = StopSignal::detached();
        stop.request();

        let outcome = run_with(
            &mut p,
            &config(temp.path()),
            &args,
            &clock,
            &clock,
            &stop,
        )
        .unwrap();

        assert_eq!(outcome.session.worked_duration(), TimeDelta::zero());
        assert_eq!(outcome.session.total_cost().to_string(), "0.00");
        assert_eq!(
            outcome.session.end_time().format(TIMESTAMP_FORMAT).to_string(),
            "2024-01-01 09:00:00"
        );
        assert!(clock.suspends().is_empty());

        let report = std::fs::read_to_string(&outcome.report_path).unwrap();
        assert!(report.contains("Total Duration: 0.00 hours"));
        assert!(report.contains("Total Cost:     NRS 0.00"));

        let out = output(p);
        assert!(out.contains("Press Ctrl-C to stop after the current interval.\n"));
        assert!(out.contains("Automatic timer cancelled after 0 work interval(s), 0 minutes worked.\n"));
    }

    #[test]
    fn test_config_intervals_and_rate_are_used() {
        let temp = tempfile::tempdir().unwrap();
        let clock = SimulatedClock::at("2024-01-01 09:00:00");
        let mut p = prompter("Asha\nWebsite\n2\n1\n");
        let config = Config {
            hourly_rate: Some(60.0),
            work_minutes: 25,
            break_minutes: 5,
            currency: "USD".to_string(),
            ..config(temp.path())
        };

        let outcome = track(&mut p, &config, &TrackArgs::default(), &clock).unwrap();

        assert_eq!(outcome.session.worked_duration(), TimeDelta::minutes(50));
        let out = output(p);
        assert!(!out.contains("cost per hour"));
        assert!(out.contains("Total cost: USD 50.00\n"));
    }

    #[test]
    fn test_invalid_mode_writes_no_report() {
        let temp = tempfile::tempdir().unwrap();
        let clock = SimulatedClock::at("2024-01-01 09:00:00");
        let mut p = prompter("15\nAsha\nWebsite\n3\n");

        let err = track(&mut p, &config(temp.path()), &TrackArgs::default(), &clock)
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TimerError>(),
            Some(TimerError::InvalidMode(_))
        ));
        assert!(clock.suspends().is_empty());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_end_before_start_writes_no_report() {
        let temp = tempfile::tempdir().unwrap();
        let clock = SimulatedClock::at("2024-01-01 09:00:00");
        let mut p = prompter("");
        let args = TrackArgs {
            contractor: Some("Asha".to_string()),
            project: Some("Website".to_string()),
            rate: Some(15.0),
            mode: Some("manual".to_string()),
            start: Some("2024-01-01 09:00:00".to_string()),
            end: Some("2024-01-01 08:00:00".to_string()),
            ..TrackArgs::default()
        };

        let err = track(&mut p, &config(temp.path()), &args, &clock).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TimerError>(),
            Some(TimerError::InvalidRange { .. })
        ));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let clock = SimulatedClock::at("2024-01-01 09:00:00");
        let base = TrackArgs {
            contractor: Some("Asha".to_string()),
            project: Some("Website".to_string()),
            rate: Some(15.0),
            mode: Some("1".to_string()),
            start: Some("yesterday".to_string()),
            end: Some("2024-01-01 08:00:00".to_string()),
            ..TrackArgs::default()
        };

        let err = track(&mut prompter(""), &config(temp.path()), &base, &clock)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid --start");

        let negative = TrackArgs {
            rate: Some(-1.0),
            ..base
        };
        let err = track(&mut prompter(""), &config(temp.path()), &negative, &clock)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid --rate");
    }

    #[test]
    fn test_non_positive_hours_reach_the_timer() {
        let temp = tempfile::tempdir().unwrap();
        let clock = SimulatedClock::at("2024-01-01 09:00:00");
        let args = TrackArgs {
            contractor: Some("Asha".to_string()),
            project: Some("Website".to_string()),
            rate: Some(15.0),
            mode: Some("2".to_string()),
            hours: Some("0".to_string()),
            ..TrackArgs::default()
        };

        let err = track(&mut prompter(""), &config(temp.path()), &args, &clock)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TimerError>(),
            Some(TimerError::InvalidDuration { .. })
        ));
    }
}
