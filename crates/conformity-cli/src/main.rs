//! Conformity — cloud compliance reporting CLI
//!
//! The `conformity` command drives a conformance-test run against an
//! OpenStack-style deployment.
//!
//! ## Commands
//!
//! - `discover`: probe the identity endpoint, list tenants and services
//! - `report`: run the conformance suite and render the compliance summary

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};

use conformity_core::{
    render_report_md, smallest_flavor, smallest_image, write_report_md, DescriptorTable,
    ReleaseTable,
};
use conformity_discovery::{ComputeClient, IdentityClient, ImageClient};
use conformity_runner::{CompliancePipeline, ComplianceSpec, RunnerConfig, TestExecutor};

#[derive(Parser)]
#[command(name = "conformity")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compliance reporting for OpenStack-style clouds", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe an identity endpoint and list tenants and services
    Discover {
        /// Identity endpoint URL
        #[arg(long, env = "OS_AUTH_URL")]
        endpoint: String,

        /// Username
        #[arg(long, env = "OS_USERNAME")]
        user: String,

        /// Password
        #[arg(long, env = "OS_PASSWORD")]
        password: String,
    },

    /// Run the conformance suite and render the compliance summary
    Report {
        /// Identity endpoint URL
        #[arg(long, env = "OS_AUTH_URL")]
        endpoint: String,

        /// Username
        #[arg(long, env = "OS_USERNAME")]
        user: String,

        /// Password
        #[arg(long, env = "OS_PASSWORD")]
        password: String,

        /// Tenant to scope to (default: first enabled tenant)
        #[arg(long, env = "OS_TENANT_NAME")]
        tenant: Option<String>,

        /// External test runner binary
        #[arg(long, default_value = conformity_runner::DEFAULT_RUNNER_BINARY)]
        runner: String,

        /// Execution log path
        #[arg(long, default_value = "conformity.log")]
        log: PathBuf,

        /// Runner configuration output path
        #[arg(long, default_value = "runner.conf")]
        conf: PathBuf,

        /// Descriptor table JSON file (default: built-in suite)
        #[arg(long)]
        descriptors: Option<PathBuf>,

        /// Release table JSON file (default: built-in platform series)
        #[arg(long)]
        releases: Option<PathBuf>,

        /// Write the rendered report to this file as well as stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    conformity_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Discover {
            endpoint,
            user,
            password,
        } => cmd_discover(&endpoint, &user, &password).await,
        Commands::Report {
            endpoint,
            user,
            password,
            tenant,
            runner,
            log,
            conf,
            descriptors,
            releases,
            output,
        } => {
            cmd_report(
                &endpoint,
                &user,
                &password,
                tenant.as_deref(),
                &runner,
                &log,
                &conf,
                descriptors.as_deref(),
                releases.as_deref(),
                output.as_deref(),
            )
            .await
        }
    }
}

/// Probe an identity endpoint and list tenants and services
async fn cmd_discover(endpoint: &str, user: &str, password: &str) -> Result<()> {
    let client = IdentityClient::new(endpoint);

    let version = client
        .discover()
        .await
        .context("Failed to probe identity endpoint")?;
    println!("Identity API version: v{}", version.major());

    let (tenants, unscoped) = client
        .get_tenants(user, password)
        .await
        .context("Failed to authenticate")?;
    println!("Tenants:");
    for tenant in &tenants {
        let suffix = if tenant.enabled { "" } else { " (disabled)" };
        println!("  {}{}", tenant.name, suffix);
    }

    let tenant = tenants
        .iter()
        .find(|tenant| tenant.enabled)
        .ok_or_else(|| anyhow!("No enabled tenant visible to '{}'", user))?;

    let (services, _scoped) = client
        .get_services(&tenant.name, &unscoped.id)
        .await
        .context("Failed to read service catalog")?;
    println!("\nServices (tenant '{}'):", tenant.name);
    for (service_type, url) in &services {
        println!("  {} -> {}", service_type, url);
    }

    Ok(())
}

/// Run the conformance suite and render the compliance summary
#[allow(clippy::too_many_arguments)]
async fn cmd_report(
    endpoint: &str,
    user: &str,
    password: &str,
    tenant: Option<&str>,
    runner: &str,
    log: &Path,
    conf: &Path,
    descriptors: Option<&Path>,
    releases: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let descriptors = load_descriptors(descriptors)?;
    let releases = load_releases(releases)?;

    let client = IdentityClient::new(endpoint);
    let version = client
        .discover()
        .await
        .context("Failed to probe identity endpoint")?;
    info!(version = version.major(), "identity endpoint probed");

    let (tenants, unscoped) = client
        .get_tenants(user, password)
        .await
        .context("Failed to authenticate")?;
    let tenant_name = match tenant {
        Some(name) => name.to_string(),
        None => tenants
            .iter()
            .find(|tenant| tenant.enabled)
            .map(|tenant| tenant.name.clone())
            .ok_or_else(|| anyhow!("No enabled tenant visible to '{}'", user))?,
    };

    let (services, scoped) = client
        .get_services(&tenant_name, &unscoped.id)
        .await
        .context("Failed to read service catalog")?;

    check_resources(&services, &scoped.id).await?;

    RunnerConfig {
        tenant_name: tenant_name.clone(),
        admin_user: user.to_string(),
        admin_password: password.to_string(),
        identity_url: endpoint.to_string(),
    }
    .write_to(conf)
    .context("Failed to write runner configuration")?;
    info!(path = %conf.display(), "runner configuration written");

    let tests: Vec<String> = descriptors.test_ids().map(str::to_string).collect();
    let spec = ComplianceSpec::new(endpoint, &tenant_name, &tests);
    info!(digest = %spec.tests_digest, tests = tests.len(), "compliance run specified");

    let executor = TestExecutor::new(runner);
    let run = CompliancePipeline::execute(&executor, &tests, log).await?;

    let summaries = run.summarize(&descriptors, &releases);
    println!("{}", render_report_md(&summaries));

    if let Some(path) = output {
        write_report_md(path, &summaries)?;
        info!(path = %path.display(), "report written");
    }

    if !run.success() {
        bail!("{} of {} tests failed", run.failed_count(), tests.len());
    }
    Ok(())
}

/// Verify the deployment offers usable minimal resources before running.
///
/// Selection failures surface unrecovered; a catalog without the service
/// only skips that selection.
async fn check_resources(services: &BTreeMap<String, String>, token_id: &str) -> Result<()> {
    match services.get("compute") {
        Some(url) => {
            let compute = ComputeClient::from_catalog_url(url, token_id);
            let flavors = compute
                .list_flavors()
                .await
                .context("Failed to list flavors")?;
            let flavor = smallest_flavor(&flavors)?;
            info!(disk = flavor.disk, ram = flavor.ram, "smallest flavor selected");
        }
        None => warn!("catalog offers no compute service, skipping flavor selection"),
    }

    match services.get("image") {
        Some(url) => {
            let image = ImageClient::from_catalog_url(url, token_id);
            let images = image.list_images().await.context("Failed to list images")?;
            let selected = smallest_image(&images)?;
            info!(size = selected.size, "smallest image selected");
        }
        None => warn!("catalog offers no image service, skipping image selection"),
    }

    Ok(())
}

/// Load the descriptor table from a file, or fall back to the built-in suite.
fn load_descriptors(path: Option<&Path>) -> Result<DescriptorTable> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read descriptor table {:?}", path))?;
            DescriptorTable::from_json_str(&raw)
                .with_context(|| format!("Failed to parse descriptor table {:?}", path))
        }
        None => Ok(DescriptorTable::builtin()),
    }
}

/// Load the release table from a file, or fall back to the platform series.
fn load_releases(path: Option<&Path>) -> Result<ReleaseTable> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read release table {:?}", path))?;
            ReleaseTable::from_json_str(&raw)
                .with_context(|| format!("Failed to parse release table {:?}", path))
        }
        None => Ok(ReleaseTable::openstack()),
    }
}
