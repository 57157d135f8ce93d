use anyhow::Context;
use clap::Parser;
use mxmc_export::core::sites::{
    DEFAULT_ID_COLUMN, DEFAULT_ID_KEY, DEFAULT_SITE_TYPE, DEFAULT_TYPE_COLUMN,
};
use mxmc_export::utils::logger;
use mxmc_export::{LocalStorage, SiteConfigPipeline, SiteOptions};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-configs")]
#[command(about = "Write one logger config.json per site listed in a CSV file")]
struct Args {
    /// CSV file listing the field sites
    sites_csv: PathBuf,

    /// Default config every site file is based on
    #[arg(long, default_value = "cryologger_config.json")]
    default_config: PathBuf,

    /// Directory the per-site folders are created in
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Only keep rows whose type column has this value
    #[arg(long, default_value = DEFAULT_SITE_TYPE, conflicts_with = "all_sites")]
    site_type: String,

    /// Keep every row regardless of site type
    #[arg(long)]
    all_sites: bool,

    /// Column holding the site type
    #[arg(long, default_value = DEFAULT_TYPE_COLUMN)]
    type_column: String,

    /// Column holding the site identifier
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    id_column: String,

    /// Config key that receives the site identifier
    #[arg(long, default_value = DEFAULT_ID_KEY)]
    id_key: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Generating site configs from {}", args.sites_csv.display());

    let template = std::fs::read_to_string(&args.default_config).with_context(|| {
        format!(
            "Failed to read default config '{}'",
            args.default_config.display()
        )
    })?;
    let sites = File::open(&args.sites_csv)
        .with_context(|| format!("Failed to open sites CSV '{}'", args.sites_csv.display()))?;

    let options = SiteOptions {
        site_type: (!args.all_sites).then(|| args.site_type.clone()),
        type_column: args.type_column.clone(),
        id_column: args.id_column.clone(),
        id_key: args.id_key.clone(),
    };

    let storage = LocalStorage::new(args.output_dir.clone());
    let pipeline = SiteConfigPipeline::from_template_str(storage, &template, options)
        .context("Invalid default config")?;

    let written = pipeline
        .run(sites)
        .await
        .context("Site config generation failed")?;

    for path in &written {
        println!("📁 {}", args.output_dir.join(path).display());
    }
    tracing::info!("✅ Wrote {} site config(s)", written.len());

    Ok(())
}
