//! Request parameters and the spot price history query built from them

use crate::error::{Result, SpotPriceError};
use crate::logging::LogLevel;
use crate::validation::{validate_instance_type, validate_zone};
use crate::window::{resolve_window, LookbackDuration, TimeWindow};
use std::fmt;
use std::str::FromStr;

/// Product description EC2 uses for Linux spot instances in a VPC
pub const LINUX_PRODUCT_DESCRIPTION: &str = "Linux/UNIX (Amazon VPC)";
/// Product description EC2 uses for Windows spot instances in a VPC
pub const WINDOWS_PRODUCT_DESCRIPTION: &str = "Windows (Amazon VPC)";

/// Operating system family to price
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OsFamily {
    #[default]
    Linux,
    Windows,
}

impl OsFamily {
    /// Exact product description string the EC2 API expects
    pub fn product_description(&self) -> &'static str {
        match self {
            OsFamily::Linux => LINUX_PRODUCT_DESCRIPTION,
            OsFamily::Windows => WINDOWS_PRODUCT_DESCRIPTION,
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Linux => write!(f, "linux"),
            OsFamily::Windows => write!(f, "windows"),
        }
    }
}

impl FromStr for OsFamily {
    type Err = SpotPriceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linux" => Ok(OsFamily::Linux),
            "windows" => Ok(OsFamily::Windows),
            other => Err(SpotPriceError::validation(
                "os",
                format!("OS must be 'linux' or 'windows', got: {}", other),
            )),
        }
    }
}

/// Normalized input to a price lookup, independent of how it was invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    pub instance_type: String,
    pub os_family: OsFamily,
    /// Availability zones to filter by; empty means every zone
    pub zones: Vec<String>,
    pub duration: LookbackDuration,
    pub want_minimum: bool,
    pub log_level: Option<LogLevel>,
}

impl RequestParameters {
    pub fn new(instance_type: impl Into<String>) -> Self {
        Self {
            instance_type: instance_type.into(),
            os_family: OsFamily::default(),
            zones: Vec::new(),
            duration: LookbackDuration::default(),
            want_minimum: false,
            log_level: None,
        }
    }
}

/// Validated DescribeSpotPriceHistory query
///
/// Built once per invocation and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    window: TimeWindow,
    instance_type: String,
    product_description: &'static str,
    zone_filter: Option<Vec<String>>,
}

impl QueryDescriptor {
    /// Build a query over an already-resolved window
    pub fn build_with_window(params: &RequestParameters, window: TimeWindow) -> Result<Self> {
        let instance_type = params.instance_type.trim();
        validate_instance_type(instance_type)?;

        for zone in &params.zones {
            validate_zone(zone)?;
        }

        // An empty filter list is rejected upstream, so omit the filter instead
        let zone_filter = if params.zones.is_empty() {
            None
        } else {
            Some(params.zones.clone())
        };

        Ok(Self {
            window,
            instance_type: instance_type.to_string(),
            product_description: params.os_family.product_description(),
            zone_filter,
        })
    }

    /// Build a query whose window ends now
    pub fn build(params: &RequestParameters) -> Result<Self> {
        Self::build_with_window(params, resolve_window(&params.duration))
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn instance_type(&self) -> &str {
        &self.instance_type
    }

    pub fn product_description(&self) -> &str {
        self.product_description
    }

    pub fn zone_filter(&self) -> Option<&[String]> {
        self.zone_filter.as_deref()
    }
}
