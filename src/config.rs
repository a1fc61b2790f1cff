//! Demo Configuration
//!
//! Every command, URL and piece of closing text the demo uses lives in
//! [`DemoConfig`]. The defaults reproduce the StudySync demo; a YAML file
//! can override any subset of fields.
//!
//! # Example YAML Format
//!
//! ```yaml
//! title: STUDYSYNC DEVOPS PLATFORM DEMO
//! health_url: http://localhost:5000/api/health
//! registration_url: http://localhost:5000/api/auth/register
//! prerequisites:
//!   - tool: Docker
//!     command: docker --version
//! readiness:
//!   max_attempts: 5
//!   initial_delay_ms: 250
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{DemoError, Result};
use crate::execution::readiness::ReadinessPolicy;

/// A required external tool and the command that proves it is installed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prerequisite {
    /// Display name (e.g., "Docker Compose")
    pub tool: String,
    /// Version-check command
    pub command: String,
    /// A missing optional tool is reported but does not abort the demo
    #[serde(default)]
    pub optional: bool,
}

impl Prerequisite {
    pub fn new(tool: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            command: command.into(),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Commands that drive the container stack.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServiceCommands {
    pub start: String,
    pub status: String,
    pub stats: String,
    pub stop: String,
}

impl Default for ServiceCommands {
    fn default() -> Self {
        Self {
            start: "docker compose up -d".to_string(),
            status: "docker compose ps".to_string(),
            stats: "docker stats --no-stream".to_string(),
            stop: "docker compose down".to_string(),
        }
    }
}

/// A labelled URL printed for the audience.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Complete demo configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Banner printed at the start of the run
    pub title: String,

    /// Version checks run before anything else; the first failure aborts
    pub prerequisites: Vec<Prerequisite>,

    pub services: ServiceCommands,

    /// Stop the demo if the start command fails
    pub halt_on_start_failure: bool,

    /// Fixed pause before the health checks, 0 for none
    pub settle_delay_ms: u64,

    /// Endpoint polled for readiness and probed once services are up
    pub health_url: String,

    /// Endpoint receiving the registration payloads
    pub registration_url: String,

    pub readiness: ReadinessPolicy,

    /// Locally running applications
    pub applications: Vec<Link>,

    /// CI/CD and hosted deployment links
    pub pipeline: Vec<Link>,

    /// Bullet points printed in the closing summary
    pub highlights: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "STUDYSYNC DEVOPS PLATFORM DEMO".to_string(),
            prerequisites: vec![
                Prerequisite::new("Docker", "docker --version"),
                Prerequisite::new("Docker Compose", "docker compose version"),
                Prerequisite::new("Git", "git --version"),
                Prerequisite::new("Node.js", "node --version"),
            ],
            services: ServiceCommands::default(),
            halt_on_start_failure: false,
            settle_delay_ms: 0,
            health_url: "http://localhost:5000/api/health".to_string(),
            registration_url: "http://localhost:5000/api/auth/register".to_string(),
            readiness: ReadinessPolicy::default(),
            applications: vec![
                Link::new("Frontend", "http://localhost:3000"),
                Link::new("Backend API", "http://localhost:5000"),
                Link::new("Grafana", "http://localhost:3001"),
            ],
            pipeline: vec![
                Link::new(
                    "GitHub Actions",
                    "https://github.com/DevDhruvX/DevOps-Project/actions",
                ),
                Link::new(
                    "Live Frontend",
                    "https://studysync-frontend-v7wk.onrender.com",
                ),
                Link::new(
                    "Live Backend",
                    "https://studysync-backend-0qov.onrender.com",
                ),
            ],
            highlights: vec![
                "Containerized microservices architecture".to_string(),
                "Automated CI/CD pipeline with GitHub Actions".to_string(),
                "Health monitoring and logging".to_string(),
                "Cloud deployment with zero downtime".to_string(),
                "Database integration and caching".to_string(),
            ],
        }
    }
}

impl DemoConfig {
    /// Loads a configuration from a YAML file and validates it.
    ///
    /// Fields missing from the file keep their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        info!("Loaded demo configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: DemoConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.prerequisites.is_empty() {
            return Err(DemoError::Config(
                "at least one prerequisite is required".to_string(),
            ));
        }

        for prerequisite in &self.prerequisites {
            if prerequisite.command.trim().is_empty() {
                return Err(DemoError::Config(format!(
                    "prerequisite '{}' has an empty command",
                    prerequisite.tool
                )));
            }
        }

        let services = [
            ("services.start", &self.services.start),
            ("services.status", &self.services.status),
            ("services.stats", &self.services.stats),
            ("services.stop", &self.services.stop),
        ];
        for (name, command) in services {
            if command.trim().is_empty() {
                return Err(DemoError::Config(format!("{} must not be empty", name)));
            }
        }

        for (name, url) in [
            ("health_url", &self.health_url),
            ("registration_url", &self.registration_url),
        ] {
            if !is_http_url(url) {
                return Err(DemoError::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if self.readiness.max_attempts == 0 {
            return Err(DemoError::Config(
                "readiness.max_attempts must be at least 1".to_string(),
            ));
        }

        if self.readiness.multiplier < 1.0 {
            return Err(DemoError::Config(
                "readiness.multiplier must be at least 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
