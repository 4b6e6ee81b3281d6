//! Runner configuration
//!
//! Defines all configurable parameters for a sourcing run: where the
//! reference files and credential live, how to reach the platform, and
//! the pacing of polling, outreach and resume requests.

use std::path::PathBuf;
use std::time::Duration;

/// Default greeting; `{job}` is replaced with the job name
pub const DEFAULT_GREETING_TEMPLATE: &str =
    "你好，我们目前正在大力扩招{job}，如果您有兴趣的话，方便发一份简历给我吗？期待你的加入～";

/// Runner configuration
///
/// All intervals are configurable; the defaults are paced to stay below
/// the platform's anti-automation thresholds.
#[derive(Debug, Clone)]
pub struct Config {
    /// Job requisitions, one `<jobId> // <jobName>` per line
    pub jobs_file: PathBuf,

    /// 985 school allow-list
    pub school_985_file: PathBuf,

    /// 211 school allow-list
    pub school_211_file: PathBuf,

    /// Good-company allow-list
    pub company_file: PathBuf,

    /// Session cookie, watched for changes
    pub cookie_file: PathBuf,

    /// Platform base URL (e.g., "https://www.zhipin.com")
    pub platform_url: String,

    /// How long each job collects recommendations before outreach starts
    pub collection_window: Duration,

    /// How often each job polls for recommendations
    pub poll_interval: Duration,

    /// Pause between successive greetings within a job
    pub pacing_delay: Duration,

    /// How often a contacted candidate is asked for their resume
    pub resume_retry_interval: Duration,

    /// How often the cookie file is checked for changes
    pub credential_check_interval: Duration,

    /// Upper bound on a single platform request
    pub request_timeout: Duration,

    /// Webhook for operator alerts; alerts are only logged when unset
    pub alert_webhook: Option<String>,

    /// Greeting saved for jobs that have none
    pub greeting_template: String,

    /// Whether to set up automatic greetings before the run
    pub configure_greetings: bool,
}

impl Config {
    /// Creates a configuration with default pacing and file names
    pub fn new(platform_url: String) -> Self {
        Self {
            jobs_file: PathBuf::from("jobs.txt"),
            school_985_file: PathBuf::from("985.txt"),
            school_211_file: PathBuf::from("211.txt"),
            company_file: PathBuf::from("company.txt"),
            cookie_file: PathBuf::from("cookie.txt"),
            platform_url,
            collection_window: Duration::from_secs(180), // 3 minutes
            poll_interval: Duration::from_secs(5),
            pacing_delay: Duration::from_secs(5),
            resume_retry_interval: Duration::from_secs(60),
            credential_check_interval: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
            alert_webhook: None,
            greeting_template: DEFAULT_GREETING_TEMPLATE.to_string(),
            configure_greetings: true,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, path) in [
            ("jobs_file", &self.jobs_file),
            ("school_985_file", &self.school_985_file),
            ("school_211_file", &self.school_211_file),
            ("company_file", &self.company_file),
            ("cookie_file", &self.cookie_file),
        ] {
            if path.as_os_str().is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }
        }

        if !is_http_url(&self.platform_url) {
            anyhow::bail!("platform_url must start with http:// or https://");
        }

        if let Some(webhook) = &self.alert_webhook {
            if !is_http_url(webhook) {
                anyhow::bail!("alert_webhook must start with http:// or https://");
            }
        }

        for (name, value) in [
            ("collection_window", self.collection_window),
            ("poll_interval", self.poll_interval),
            ("pacing_delay", self.pacing_delay),
            ("resume_retry_interval", self.resume_retry_interval),
            ("credential_check_interval", self.credential_check_interval),
            ("request_timeout", self.request_timeout),
        ] {
            if value.is_zero() {
                anyhow::bail!("{} must be greater than 0", name);
            }
        }

        if self.poll_interval > self.collection_window {
            anyhow::bail!("poll_interval must not exceed collection_window");
        }

        if self.configure_greetings && !self.greeting_template.contains("{job}") {
            anyhow::bail!("greeting_template must contain a {{job}} placeholder");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("https://www.zhipin.com".to_string())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
