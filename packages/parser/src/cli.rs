//! Command-line interface for the parser.

use std::path::{Path, PathBuf};

use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{ParserConfig, TEXT_WRAP_WIDTH};
use crate::document::{Input, ParseReport, Parser, TextEncoding};
use crate::error::Result;
use crate::policy;
use crate::types::Activity;

/// IATI Parser - Extract typed activities from IATI XML documents.
#[derive(ClapParser)]
#[command(name = "iati-parser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse documents and print their activities.
    Inspect {
        /// IATI XML files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,

        /// Character encoding override (utf-8, utf-16le, utf-16be, latin1)
        #[arg(short, long)]
        encoding: Option<String>,

        /// Maximum document size in bytes
        #[arg(long)]
        max_size: Option<u64>,

        /// Currency for activities and documents that declare none
        #[arg(long)]
        default_currency: Option<String>,
    },

    /// Print the per-field inclusion policy.
    Policy,
}

/// How `inspect` prints activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable overview
    Summary,
    /// One JSON object per activity per line
    Json,
    /// One YAML list per document
    Yaml,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            files,
            format,
            encoding,
            max_size,
            default_currency,
        } => {
            let mut config = ParserConfig::new();
            if let Some(name) = encoding {
                config = config.with_encoding(name.parse::<TextEncoding>()?);
            }
            if let Some(limit) = max_size {
                config = config.with_max_document_size(limit);
            }
            if let Some(currency) = default_currency {
                config = config.with_default_currency(currency);
            }
            inspect_command(&files, format, config)
        }
        Commands::Policy => {
            print!("{}", render_policy());
            Ok(())
        }
    }
}

/// Execute the inspect command.
fn inspect_command(files: &[PathBuf], format: OutputFormat, config: ParserConfig) -> Result<()> {
    let parser = Parser::new(config);

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    for (index, path) in files.iter().enumerate() {
        pb.set_message(format!("Parsing {}...", path.display()));

        let (activities, report) = match parse_file(&parser, path) {
            Ok(parsed) => parsed,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        let output = match format {
            OutputFormat::Summary => render_summary(path, &activities, report),
            OutputFormat::Json => render_json(&activities)?,
            OutputFormat::Yaml => {
                let yaml = serde_yaml_ng::to_string(&activities)?;
                if index == 0 {
                    yaml
                } else {
                    format!("---\n{yaml}")
                }
            }
        };

        pb.suspend(|| print!("{output}"));
    }

    pb.finish_and_clear();
    Ok(())
}

fn parse_file(parser: &Parser<'_>, path: &Path) -> Result<(Vec<Activity>, ParseReport)> {
    parser.with_document(Input::Path(path), |mut activities| {
        let collected: Vec<Activity> = activities.by_ref().collect();
        (collected, activities.report())
    })
}

fn render_json(activities: &[Activity]) -> Result<String> {
    let mut out = String::new();
    for activity in activities {
        out.push_str(&serde_json::to_string(activity)?);
        out.push('\n');
    }
    Ok(out)
}

fn render_summary(path: &Path, activities: &[Activity], report: ParseReport) -> String {
    let mut out = format!("{}\n", style(path.display()).bold());
    out.push_str(&format!(
        "  Activities: {} of {}",
        style(report.admitted).green(),
        report.seen
    ));
    if report.skipped > 0 {
        out.push_str(&format!(" ({} skipped)", style(report.skipped).yellow().bold()));
    }
    out.push_str("\n\n");

    for activity in activities {
        out.push_str(&format!("  {}\n", style(&activity.iati_identifier).cyan()));
        if let Some(title) = &activity.title {
            let options = textwrap::Options::new(TEXT_WRAP_WIDTH)
                .initial_indent("    ")
                .subsequent_indent("    ");
            out.push_str(&textwrap::fill(title, options));
            out.push('\n');
        }
        if let Some(org) = activity.reporting_org.as_ref().and_then(|o| o.text.as_deref()) {
            out.push_str(&format!("    Reporting org: {org}\n"));
        }
        out.push_str(&format!(
            "    Transactions: {}  Budgets: {}  Participants: {}  Sectors: {}\n",
            activity.transactions.len(),
            activity.budgets.len(),
            activity.participating_orgs.len(),
            activity.sector_percentages.len()
        ));
        if let Some(currency) = &activity.default_currency {
            // unresolved codes print as published
            let label = currency
                .member
                .map_or_else(|| currency.raw.clone(), |member| member.to_string());
            out.push_str(&format!("    Default currency: {label}\n"));
        }
    }
    out.push('\n');
    out
}

fn render_policy() -> String {
    let header = format!(
        "{:<24} {:<32} {:<12} {:<12}\n",
        style("FIELD").bold(),
        style("PATH").bold(),
        style("MISSING").bold(),
        style("INVALID").bold()
    );
    policy::table().fold(header, |mut out, entry| {
        out.push_str(&format!(
            "{:<24} {:<32} {:<12} {:<12}\n",
            format!("{:?}", entry.field),
            entry.field.path(),
            format!("{:?}", entry.on_missing),
            format!("{:?}", entry.on_invalid)
        ));
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::collect_activities;

    const DOC: &str = r#"<iati-activities>
        <iati-activity default-currency="USD">
            <iati-identifier>47045-ARM-202-G05-H-00</iati-identifier>
            <title>Support to the National Program on the Response to HIV Epicemic in the Republic of Armenia</title>
            <reporting-org ref="47045" type="40">The Global Fund to Fight AIDS, Tuberculosis and Malaria</reporting-org>
            <transaction><transaction-type code="C"/><value>3991675</value></transaction>
        </iati-activity>
        <iati-activity><title>No identifier</title></iati-activity>
    </iati-activities>"#;

    #[test]
    fn test_cli_parse_inspect() {
        let cli = Cli::parse_from(["iati-parser", "inspect", "a.xml", "b.xml"]);

        let Commands::Inspect {
            files,
            format,
            encoding,
            max_size,
            default_currency,
        } = cli.command
        else {
            panic!("expected inspect");
        };
        assert_eq!(files, vec![PathBuf::from("a.xml"), PathBuf::from("b.xml")]);
        assert_eq!(format, OutputFormat::Summary);
        assert!(encoding.is_none());
        assert!(max_size.is_none());
        assert!(default_currency.is_none());
    }

    #[test]
    fn test_cli_parse_inspect_with_options() {
        let cli = Cli::parse_from([
            "iati-parser",
            "inspect",
            "a.xml",
            "--format",
            "json",
            "--encoding",
            "latin1",
            "--max-size",
            "1024",
        ]);

        let Commands::Inspect {
            format,
            encoding,
            max_size,
            ..
        } = cli.command
        else {
            panic!("expected inspect");
        };
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(encoding.as_deref(), Some("latin1"));
        assert_eq!(max_size, Some(1024));
    }

    #[test]
    fn test_cli_requires_files() {
        assert!(Cli::try_parse_from(["iati-parser", "inspect"]).is_err());
    }

    #[test]
    fn test_render_summary() {
        let activities = collect_activities(Input::Text(DOC)).unwrap();
        let report = ParseReport {
            seen: 2,
            admitted: 1,
            skipped: 1,
        };
        let summary = render_summary(Path::new("grant.xml"), &activities, report);

        assert!(summary.contains("grant.xml"));
        assert!(summary.contains("47045-ARM-202-G05-H-00"));
        assert!(summary.contains("skipped"));
        assert!(summary.contains("Transactions: 1"));
        assert!(summary.contains("Default currency: US Dollar"));
        assert!(summary.lines().all(|line| console::measure_text_width(line) <= TEXT_WRAP_WIDTH));
    }

    #[test]
    fn test_render_json_one_line_per_activity() {
        let activities = collect_activities(Input::Text(DOC)).unwrap();
        let json = render_json(&activities).unwrap();

        assert_eq!(json.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(json.trim()).unwrap();
        assert_eq!(value["iati_identifier"], "47045-ARM-202-G05-H-00");
        assert_eq!(value["transactions"][0]["value"]["currency"]["raw"], "USD");
    }

    #[test]
    fn test_render_policy_lists_every_field() {
        let table = render_policy();
        assert_eq!(table.lines().count(), policy::Field::ALL.len() + 1);
        assert!(table.contains("transaction-type/@code"));
    }

    #[test]
    fn test_render_summary_unknown_currency() {
        let xml = r#"<iati-activities>
            <iati-activity default-currency="PHP"><iati-identifier>PH-1</iati-identifier></iati-activity>
        </iati-activities>"#;
        let activities = collect_activities(Input::Text(xml)).unwrap();
        let summary = render_summary(Path::new("ph.xml"), &activities, ParseReport::default());

        assert!(summary.contains("Default currency: PHP"));
    }
}
