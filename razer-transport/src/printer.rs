//! PrinterTransport middleware for monitoring transport traffic
//!
//! Wraps any Transport implementation and prints every request and response
//! passing through it to stderr.
//!
//! # Example
//!
//! ```ignore
//! use razer_transport::{HidDiscovery, PrinterTransport, PrinterConfig};
//!
//! let transport = HidDiscovery::new().open_first(None)?;
//! let monitored = PrinterTransport::wrap(transport, PrinterConfig::default().with_hex(true));
//! ```

use std::str::FromStr;
use std::sync::Arc;

use crossterm::style::Stylize;
use serde_json::json;

use crate::protocol::cmd;
use crate::report::Report;
use crate::{Transport, TransportDeviceInfo, TransportError, WaitWindow};

/// Output format for the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Packet filter for selective display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PacketFilter {
    #[default]
    All,
    /// Only reports of this command class
    Class(u8),
    /// Only reports with this command ID (either class)
    Cmd(u8),
}

fn parse_hex_byte(s: &str) -> Result<u8, String> {
    let hex_str = s.strip_prefix("0x").unwrap_or(s);
    u8::from_str_radix(hex_str, 16).map_err(|e| format!("Invalid byte '{}': {}", s, e))
}

impl FromStr for PacketFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "standard" | "std" => Ok(Self::Class(crate::protocol::class::STANDARD)),
            "matrix" => Ok(Self::Class(crate::protocol::class::EXTENDED_MATRIX)),
            s if s.starts_with("class=") => parse_hex_byte(&s[6..]).map(Self::Class),
            s if s.starts_with("cmd=") => parse_hex_byte(&s[4..]).map(Self::Cmd),
            s if s.starts_with("0x") => parse_hex_byte(s).map(Self::Cmd),
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

impl PacketFilter {
    pub fn matches(&self, report: &Report) -> bool {
        match self {
            Self::All => true,
            Self::Class(c) => report.command_class == *c,
            Self::Cmd(c) => report.command_id == *c,
        }
    }
}

/// Configuration for the PrinterTransport
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Show raw hex dump alongside decoded output
    pub show_hex: bool,
    /// Filter for selective display
    pub filter: PacketFilter,
    /// Output format
    pub format: OutputFormat,
}

impl PrinterConfig {
    /// Create config with hex output setting
    pub fn with_hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }

    /// Create config with filter
    pub fn with_filter(mut self, filter: PacketFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Direction of a printed packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Request,
    Response,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }

    fn arrow(self) -> String {
        match self {
            Self::Request => ">>>".cyan().to_string(),
            Self::Response => "<<<".green().to_string(),
        }
    }
}

/// Transport middleware that prints all requests and responses
pub struct PrinterTransport {
    inner: Arc<dyn Transport>,
    config: PrinterConfig,
}

impl PrinterTransport {
    /// Wrap a transport with printing middleware
    pub fn wrap(transport: Arc<dyn Transport>, config: PrinterConfig) -> Arc<dyn Transport> {
        Arc::new(Self {
            inner: transport,
            config,
        })
    }

    fn render_json(&self, dir: Direction, report: &Report) -> String {
        let mut value = json!({
            "dir": dir.as_str(),
            "name": cmd::name(report.command_class, report.command_id),
            "class": report.command_class,
            "id": report.command_id,
            "transaction_id": report.transaction_id,
            "status": report.status,
            "data_size": report.data_size,
            "payload": report.payload(),
        });
        if self.config.show_hex {
            value["hex"] = json!(report
                .to_bytes()
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<String>());
        }
        value.to_string()
    }

    /// Line for a buffer that does not decode as a report
    fn render_undecodable(&self, dir: Direction, bytes: &[u8]) -> String {
        match self.config.format {
            OutputFormat::Json => json!({
                "dir": dir.as_str(),
                "error": "undecodable",
                "len": bytes.len(),
                "bytes": bytes,
            })
            .to_string(),
            OutputFormat::Text => format!(
                "{} {}  {} bytes {:02x?}",
                dir.arrow(),
                "BAD".red().bold(),
                bytes.len(),
                bytes
            ),
        }
    }

    /// Line for an exchange that failed below this layer
    fn render_failure(&self, request: &[u8], err: &TransportError) -> String {
        let name = Report::from_bytes(request)
            .map(|r| cmd::name(r.command_class, r.command_id))
            .unwrap_or("UNKNOWN");
        match self.config.format {
            OutputFormat::Json => json!({
                "dir": Direction::Response.as_str(),
                "name": name,
                "error": err.to_string(),
            })
            .to_string(),
            OutputFormat::Text => format!(
                "{} {}  {} {}",
                "<<<".red(),
                "ERR".red().bold(),
                name.yellow(),
                err
            ),
        }
    }

    fn print(&self, dir: Direction, bytes: &[u8]) {
        let Ok(report) = Report::from_bytes(bytes) else {
            eprintln!("{}", self.render_undecodable(dir, bytes));
            return;
        };
        if !self.config.filter.matches(&report) {
            return;
        }

        if self.config.format == OutputFormat::Json {
            eprintln!("{}", self.render_json(dir, &report));
            return;
        }

        let name = cmd::name(report.command_class, report.command_id);
        match dir {
            Direction::Request => eprintln!(
                "{} {}  {} {:02x?}",
                dir.arrow(),
                "REQ".cyan().bold(),
                name.yellow(),
                report.payload()
            ),
            Direction::Response => {
                let status = match report.status() {
                    Some(s) => s.name().green().to_string(),
                    None => format!("0x{:02x}", report.status).red().to_string(),
                };
                eprintln!(
                    "{} {}  {} {} {:02x?}",
                    dir.arrow(),
                    "RSP".green().bold(),
                    name.yellow(),
                    status,
                    report.payload()
                );
            }
        }

        if self.config.show_hex {
            eprintln!("    {}  {}", "HEX".dim(), report.hex_summary());
        }
    }
}

impl Transport for PrinterTransport {
    fn exchange(&self, request: &[u8], wait: WaitWindow) -> Result<Vec<u8>, TransportError> {
        self.print(Direction::Request, request);
        match self.inner.exchange(request, wait) {
            Ok(result) => {
                self.print(Direction::Response, &result);
                Ok(result)
            }
            Err(e) => {
                eprintln!("{}", self.render_failure(request, &e));
                Err(e)
            }
        }
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        self.inner.device_info()
    }

    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }
}
