//! Process command - extract invoice data and compute the tenant's share.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use fakt_core::invoice::RegionParser;
use fakt_core::models::config::{ExtractionConfig, RegionsFile};
use fakt_core::models::record::InvoiceRecord;
use fakt_core::pdf::{PdfExtractor, PdfTextSource};
use fakt_core::summary::SummaryTemplate;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input invoice PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Tenant usage for the billing period, in kWh
    #[arg(short, long)]
    usage: f64,

    /// Region definitions file
    #[arg(short, long, default_value = "regions.json")]
    regions: PathBuf,

    /// Summary template; the summary document is skipped when absent
    #[arg(short, long, default_value = "user.json")]
    template: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let config = if let Some(path) = config_path {
        ExtractionConfig::from_file(Path::new(path))?
    } else {
        ExtractionConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let regions_file = RegionsFile::from_file(&args.regions)?;

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    let regions = extractor.extract_regions(&regions_file.regions)?;

    let parser = RegionParser::new(config);
    let report = parser.parse(&regions);

    for failure in &report.failures {
        eprintln!(
            "{} region {}: {}",
            style("!").yellow(),
            failure.region,
            failure.error
        );
    }

    let mut record = report.record;
    record.calculate_user_data(args.usage)?;

    // Write the record
    let output = format_record(&record, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    // Write the tenant summary document
    if args.template.exists() {
        let template = SummaryTemplate::from_file(&args.template)?;
        let file_name = template.file_name(&record);
        fs::write(&file_name, template.render(&record))?;
        println!("{} Summary written to {}", style("✓").green(), file_name);
    } else {
        warn!(
            "template {} not found, skipping summary",
            args.template.display()
        );
    }

    Ok(())
}

fn format_record(record: &InvoiceRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &InvoiceRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "street",
        "total_usage_kwh",
        "total_cost",
        "user_usage_kwh",
        "user_percent",
        "user_cost",
        "invoice_deadline",
        "invoice_months",
    ])?;

    let opt_num = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    wtr.write_record([
        record.street.clone().unwrap_or_default(),
        opt_num(record.total_usage),
        opt_num(record.total_cost),
        opt_num(record.user_usage),
        opt_num(record.user_percent),
        opt_num(record.user_cost),
        record
            .invoice_deadline
            .map(|d| d.to_string())
            .unwrap_or_default(),
        record.invoice_month_str.clone().unwrap_or_default(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    if let Some(street) = &record.street {
        output.push_str(&format!("Address: {}\n", street));
    }
    if let Some(months) = &record.invoice_month_str {
        output.push_str(&format!("Billing period: {}\n", months));
    }
    if let Some(deadline) = record.invoice_deadline {
        output.push_str(&format!("Payment due: {}\n", deadline));
    }
    output.push('\n');

    output.push_str("Totals:\n");
    if let Some(usage) = record.total_usage {
        output.push_str(&format!("  Usage: {} kWh\n", usage));
    }
    if let Some(cost) = record.total_cost {
        output.push_str(&format!("  Cost:  {:.2} kr\n", cost));
    }
    output.push('\n');

    output.push_str("Tenant share:\n");
    if let Some(usage) = record.user_usage {
        output.push_str(&format!("  Usage: {} kWh\n", usage));
    }
    if let Some(percent) = record.user_percent {
        output.push_str(&format!("  Share: {:.2}%\n", percent));
    }
    if let Some(cost) = record.user_cost {
        output.push_str(&format!("  Cost:  {:.2} kr\n", cost));
    }

    output
}
