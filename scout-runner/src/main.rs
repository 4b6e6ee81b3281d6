//! Scout Runner
//!
//! Automated candidate sourcing against a recruiting platform.
//!
//! Architecture:
//! - Configuration: command-line flags with environment fallbacks
//! - Credential: cookie file published through a watch channel, hot reloaded
//! - Scheduler: per-job collection windows, ranked outreach, resume retries
//! - Alerts: operator notification when the session is rejected
//!
//! For each job the runner polls the platform's recommendations for a fixed
//! window, ranks what it saw, greets the best candidates within the daily
//! quota, and keeps asking greeted candidates for a resume until they reply.

mod alert;
mod config;
mod context;
mod credential;
mod greeting;
mod ledger;
mod scheduler;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scout_client::{PlatformClient, RecruitingPlatform};
use scout_core::reference::{self, ReferenceLists};
use scout_core::scoring::Scorer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::alert::{Alerter, LogAlerter, WebhookAlerter};
use crate::config::{Config, DEFAULT_GREETING_TEMPLATE};
use crate::context::{RunContext, Timing};
use crate::credential::CredentialWatcher;
use crate::scheduler::{Orchestrator, ResumeOutcome};

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "Automated candidate sourcing and outreach", long_about = None)]
struct Cli {
    /// Job requisitions file (`<jobId> // <jobName>` per line)
    #[arg(long, env = "SCOUT_JOBS_FILE", default_value = "jobs.txt")]
    jobs_file: PathBuf,

    /// 985 school allow-list
    #[arg(long, env = "SCOUT_985_FILE", default_value = "985.txt")]
    school_985_file: PathBuf,

    /// 211 school allow-list
    #[arg(long, env = "SCOUT_211_FILE", default_value = "211.txt")]
    school_211_file: PathBuf,

    /// Good-company allow-list
    #[arg(long, env = "SCOUT_COMPANY_FILE", default_value = "company.txt")]
    company_file: PathBuf,

    /// Session cookie file, reloaded when it changes
    #[arg(long, env = "SCOUT_COOKIE_FILE", default_value = "cookie.txt")]
    cookie_file: PathBuf,

    /// Platform base URL
    #[arg(long, env = "SCOUT_PLATFORM_URL", default_value = "https://www.zhipin.com")]
    platform_url: String,

    /// Collection window per job, seconds
    #[arg(long, env = "SCOUT_COLLECTION_WINDOW", default_value_t = 180)]
    collection_window: u64,

    /// Recommendation poll interval, seconds
    #[arg(long, env = "SCOUT_POLL_INTERVAL", default_value_t = 5)]
    poll_interval: u64,

    /// Pause between greetings, seconds
    #[arg(long, env = "SCOUT_PACING_DELAY", default_value_t = 5)]
    pacing_delay: u64,

    /// Resume request interval, seconds
    #[arg(long, env = "SCOUT_RESUME_RETRY_INTERVAL", default_value_t = 60)]
    resume_retry_interval: u64,

    /// Cookie file check interval, seconds
    #[arg(long, env = "SCOUT_CREDENTIAL_CHECK_INTERVAL", default_value_t = 2)]
    credential_check_interval: u64,

    /// Upper bound on one platform request, seconds
    #[arg(long, env = "SCOUT_REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    /// Webhook receiving operator alerts
    #[arg(long, env = "SCOUT_ALERT_WEBHOOK")]
    alert_webhook: Option<String>,

    /// Greeting for jobs without one; `{job}` is replaced with the job name
    #[arg(long, env = "SCOUT_GREETING_TEMPLATE", default_value = DEFAULT_GREETING_TEMPLATE)]
    greeting_template: String,

    /// Leave the account's greeting settings untouched
    #[arg(long, env = "SCOUT_SKIP_GREETING_SETUP")]
    skip_greeting_setup: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Source candidates for every job (default)
    Run,

    /// Accept a resume a candidate offered in chat
    AcceptResume {
        /// Chat message carrying the offer
        #[arg(long)]
        message_id: String,

        /// Candidate security token
        #[arg(long)]
        security_token: String,
    },
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new(self.platform_url.clone());
        config.jobs_file = self.jobs_file.clone();
        config.school_985_file = self.school_985_file.clone();
        config.school_211_file = self.school_211_file.clone();
        config.company_file = self.company_file.clone();
        config.cookie_file = self.cookie_file.clone();
        config.collection_window = Duration::from_secs(self.collection_window);
        config.poll_interval = Duration::from_secs(self.poll_interval);
        config.pacing_delay = Duration::from_secs(self.pacing_delay);
        config.resume_retry_interval = Duration::from_secs(self.resume_retry_interval);
        config.credential_check_interval = Duration::from_secs(self.credential_check_interval);
        config.request_timeout = Duration::from_secs(self.request_timeout);
        config.alert_webhook = self.alert_webhook.clone();
        config.greeting_template = self.greeting_template.clone();
        config.configure_greetings = !self.skip_greeting_setup;
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scout_runner=info,scout_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;

    info!("Starting Scout Runner against {}", config.platform_url);

    let (watcher, credential) =
        CredentialWatcher::load(&config.cookie_file, config.credential_check_interval).await?;
    let _watcher_handle = watcher.spawn();
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;
    let client = Arc::new(PlatformClient::with_client(
        config.platform_url.clone(),
        http,
        credential,
    ));

    match cli.command {
        Some(Command::AcceptResume {
            message_id,
            security_token,
        }) => {
            client
                .accept_resume(&message_id, &security_token)
                .await
                .context("Failed to accept resume")?;
            info!("Resume accepted");
            Ok(())
        }
        Some(Command::Run) | None => run(&config, client).await,
    }
}

/// Runs one sourcing pass and keeps the process up for pending retriers
async fn run(config: &Config, client: Arc<PlatformClient>) -> Result<()> {
    let jobs = reference::load_jobs(&config.jobs_file)?;
    let lists = ReferenceLists {
        schools_985: reference::load_allow_list(&config.school_985_file)?,
        schools_211: reference::load_allow_list(&config.school_211_file)?,
        good_companies: reference::load_allow_list(&config.company_file)?,
    };
    info!(
        "Loaded {} job(s), {} 985 schools, {} 211 schools, {} companies",
        jobs.len(),
        lists.schools_985.len(),
        lists.schools_211.len(),
        lists.good_companies.len()
    );

    if config.configure_greetings {
        let setup = greeting::configure_greetings(client.as_ref(), &config.greeting_template).await;
        info!(
            "Greeting setup: auto greeting {}, {} saved, {} kept, {} failed",
            if setup.auto_greeting_enabled { "on" } else { "unchanged" },
            setup.saved,
            setup.kept,
            setup.failed
        );
    }

    let alerter: Arc<dyn Alerter> = match &config.alert_webhook {
        Some(url) => Arc::new(WebhookAlerter::new(url.clone())),
        None => Arc::new(LogAlerter),
    };

    let platform: Arc<dyn RecruitingPlatform> = client;
    let ctx = RunContext::new(platform, Scorer::new(lists), Timing::from(config));
    let summary = Orchestrator::new(ctx, alerter).run(jobs).await;

    info!(
        "Run {} greeted {} candidate(s); {} job(s) failed",
        summary.run_id,
        summary.greeted(),
        summary.failed_jobs()
    );

    let all_jobs_failed = summary.all_jobs_failed();
    wait_for_retriers(summary.retriers).await;

    if all_jobs_failed {
        anyhow::bail!("every job failed");
    }
    Ok(())
}

/// Waits for resume retriers to settle, or for Ctrl-C
async fn wait_for_retriers(retriers: Vec<tokio::task::JoinHandle<ResumeOutcome>>) {
    if retriers.is_empty() {
        return;
    }
    let pending = retriers.len();
    info!("Waiting on {} resume request(s); Ctrl-C to stop", pending);

    let settle = async {
        let (mut requested, mut abandoned) = (0, 0);
        for handle in retriers {
            match handle.await {
                Ok(ResumeOutcome::Requested { .. }) => requested += 1,
                Ok(ResumeOutcome::Abandoned { .. }) => abandoned += 1,
                Err(e) => error!("Resume retrier task failed: {}", e),
            }
        }
        (requested, abandoned)
    };

    tokio::select! {
        (requested, abandoned) = settle => {
            info!("Resume requests settled: {} requested, {} abandoned", requested, abandoned);
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; abandoning pending resume requests");
        }
    }
}
