use chrono::Local;
use clap::Args;
use line_bid::bidding::{process_bid_text, write_results_csv, BidRun};
use line_bid::error::AppError;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub(crate) struct AllocateArgs {
    /// Pasted bid summary to read (defaults to stdin)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Also write the awards as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print the run as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_allocation(args: AllocateArgs) -> Result<(), AppError> {
    let AllocateArgs { input, csv, json } = args;

    let text = read_bid_text(input.as_deref())?;
    let run = process_bid_text(&text)?;

    if json {
        let rendered = serde_json::to_string_pretty(&run).map_err(io::Error::other)?;
        println!("{rendered}");
    } else {
        print!("{}", render_run(&run));
    }

    if let Some(path) = csv {
        let file = File::create(&path)?;
        write_results_csv(file, &run.results)?;
        if !json {
            println!("\nCSV written to {}", path.display());
        }
    }

    Ok(())
}

fn read_bid_text(input: Option<&Path>) -> Result<String, AppError> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(text)
}

fn render_run(run: &BidRun) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Line bid awards ({}, generated {})\n",
        run.layout,
        Local::now().format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!(
        "{} employees | {} awarded | {} unawarded | {} first choice\n\n",
        run.summary.total, run.summary.awarded, run.summary.unawarded, run.summary.first_choice
    ));
    out.push_str(&format!(
        "{:>5}  {:<12} {:<24} {:<10} {:>6}  {}\n",
        "Pos", "Employee", "Name", "Line", "Choice", "Message"
    ));

    for result in &run.results {
        out.push_str(&format!(
            "{:>5}  {:<12} {:<24} {:<10} {:>6}  {}\n",
            result.seniority_position,
            result.employee_id,
            result.employee_name.as_deref().unwrap_or("-"),
            result.awarded_line.as_deref().unwrap_or("-"),
            result
                .choice_position
                .map(|choice| choice.to_string())
                .unwrap_or_else(|| "-".to_string()),
            result.message
        ));
    }

    out
}
