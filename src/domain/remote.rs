//! Registry classification
//!
//! Every remote is exactly one of the registry kinds we know how to log into.

use std::fmt;

const AZURE_MARKER: &str = "azurecr.io";
const AWS_MARKER: &str = "amazonaws.com";

/// A registry endpoint, classified by the hostname it contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remote {
    /// Azure Container Registry (`*.azurecr.io`)
    Azure(String),
    /// AWS Elastic Container Registry (`*.amazonaws.com`)
    Aws(String),
    /// Anything else is treated as Dockerhub
    Dockerhub(String),
}

impl Remote {
    /// Classify by substring; Azure wins over AWS when both match
    pub fn classify(remote: &str) -> Self {
        let remote = remote.to_string();
        if remote.contains(AZURE_MARKER) {
            Self::Azure(remote)
        } else if remote.contains(AWS_MARKER) {
            Self::Aws(remote)
        } else {
            Self::Dockerhub(remote)
        }
    }

    /// The remote as given on the command line
    pub fn url(&self) -> &str {
        match self {
            Self::Azure(url) | Self::Aws(url) | Self::Dockerhub(url) => url,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Azure(_) => "Azure ACR",
            Self::Aws(_) => "AWS ECR",
            Self::Dockerhub(_) => "Dockerhub",
        }
    }

    pub fn is_aws(&self) -> bool {
        matches!(self, Self::Aws(_))
    }

    /// Region encoded in an ECR hostname (`<account>.dkr.ecr.<region>.amazonaws.com`)
    pub fn ecr_region(&self) -> Option<&str> {
        let Self::Aws(url) = self else {
            return None;
        };
        let host = url
            .trim_start_matches("https://")
            .split('/')
            .next()
            .unwrap_or_default();
        let labels: Vec<&str> = host.split('.').collect();
        labels
            .windows(3)
            .find(|w| w[0] == "ecr" && w[2] == "amazonaws")
            .map(|w| w[1])
    }
}

impl fmt::Display for Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.url(), self.kind())
    }
}
