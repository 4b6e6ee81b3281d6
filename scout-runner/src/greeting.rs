//! Greeting setup
//!
//! Outreach relies on the platform's automatic greeting: starting a chat
//! sends whatever greeting the job has configured. Before a run we switch
//! the feature on and give every job without a greeting one rendered from
//! the configured template. Nothing here is fatal.

use scout_client::{GreetingJob, GreetingTemplates};
use tracing::{info, warn};

/// Placeholder replaced with the job name
pub const JOB_PLACEHOLDER: &str = "{job}";

/// Counts from one setup pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GreetingSetup {
    pub auto_greeting_enabled: bool,
    pub saved: usize,
    pub kept: usize,
    pub failed: usize,
}

pub fn render_greeting(template: &str, job_name: &str) -> String {
    template.replace(JOB_PLACEHOLDER, job_name)
}

/// Enables automatic greetings and fills in missing job greetings
pub async fn configure_greetings(
    templates: &dyn GreetingTemplates,
    template: &str,
) -> GreetingSetup {
    let mut setup = GreetingSetup::default();

    match templates.enable_auto_greeting().await {
        Ok(()) => {
            info!("Automatic greeting enabled");
            setup.auto_greeting_enabled = true;
        }
        Err(e) => warn!("Failed to enable automatic greeting: {}", e),
    }

    let jobs: Vec<GreetingJob> = match templates.list_greeting_jobs().await {
        Ok(jobs) => jobs,
        Err(e) => {
            warn!("Failed to list job greetings: {}", e);
            return setup;
        }
    };

    for job in &jobs {
        if job.has_greeting() {
            setup.kept += 1;
            continue;
        }

        let content = render_greeting(template, &job.job_name);
        match templates.save_greeting(job, &content).await {
            Ok(()) => {
                info!("Greeting saved for job {}", job.job_name);
                setup.saved += 1;
            }
            Err(e) => {
                warn!("Failed to save greeting for job {}: {}", job.job_name, e);
                setup.failed += 1;
            }
        }
    }

    setup
}
