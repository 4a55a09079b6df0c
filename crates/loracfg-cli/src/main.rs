use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use loracfg_core::{
    Access, CodecError, ConfigError, Configurator, DeviceConfig, ErrorCategory, ExchangeOptions,
    Family, Persistence, RegisterBlock, SerialConnector, SerialOptions, Snapshot, ToolInfo,
    TransportError, hex_dump, validate, validate_config,
};
use log::info;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LORACFG_BUILD_COMMIT"),
    " ",
    env!("LORACFG_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "loracfg")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Read and write the configuration registers of EBYTE E22/E32 LoRa modules.",
    long_about = None,
    after_help = "Examples:\n  loracfg read --family e32 --device /dev/ttyUSB0\n  loracfg read --family e22 --device '/dev/ttyUSB*' -o module.json\n  loracfg set --family e32 --device /dev/ttyUSB0 Channel=433 Power=27\n  loracfg write --device /dev/ttyUSB0 --config module.json"
)]
struct Cli {
    /// Only log warnings and errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log phase transitions and other debug detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the fields of a module family with their legal values.
    Fields {
        #[arg(short, long)]
        family: Family,
    },
    /// Validate FIELD=VALUE assignments without touching a device.
    Check {
        #[arg(short, long)]
        family: Family,

        /// Assignments such as UARTRate=9600 or TransmissionMode="Fixed point"
        #[arg(required = true, value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
    },
    /// Encode a configuration file into its register block (hex).
    Encode {
        /// Module family (defaults to the family recorded in the file)
        #[arg(short, long)]
        family: Option<Family>,

        /// Configuration or snapshot JSON
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Decode a register block (hex) into a configuration.
    Decode {
        #[arg(short, long)]
        family: Family,

        /// Register bytes, e.g. "c0 00 00 1a 17 44"
        hex: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Read the configuration of a connected module.
    #[command(
        after_help = "Examples:\n  loracfg read --family e32 --device /dev/ttyUSB0\n  loracfg read --family e22 --device /dev/ttyUSB0 --stdout --pretty"
    )]
    Read {
        #[arg(short, long)]
        family: Family,

        #[command(flatten)]
        port: PortArgs,

        /// Write a JSON snapshot to this path
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Write a JSON snapshot to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Write a configuration file to a connected module.
    Write {
        /// Module family (defaults to the family recorded in the file)
        #[arg(short, long)]
        family: Option<Family>,

        #[command(flatten)]
        port: PortArgs,

        /// Configuration or snapshot JSON
        #[arg(short, long)]
        config: PathBuf,

        /// Keep the configuration only until the next power cycle
        #[arg(long)]
        temporary: bool,
    },
    /// Read a module's configuration, change some fields and write it back.
    Set {
        #[arg(short, long)]
        family: Family,

        #[command(flatten)]
        port: PortArgs,

        /// Keep the configuration only until the next power cycle
        #[arg(long)]
        temporary: bool,

        #[arg(required = true, value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
    },
    /// Read the product information block (E22).
    Info {
        #[arg(short, long, default_value = "e22")]
        family: Family,

        #[command(flatten)]
        port: PortArgs,
    },
    /// Read the module model and firmware version (E32).
    Version {
        #[arg(short, long, default_value = "e32")]
        family: Family,

        #[command(flatten)]
        port: PortArgs,
    },
    /// Restore the factory default configuration (E32).
    Reset {
        #[arg(short, long, default_value = "e32")]
        family: Family,

        #[command(flatten)]
        port: PortArgs,
    },
}

#[derive(Args, Debug)]
struct PortArgs {
    /// Serial device path or glob matching exactly one device
    #[arg(short, long)]
    device: PathBuf,

    /// Serial baud rate
    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// Exchange timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    /// Delay between command and reply read in milliseconds
    #[arg(long, default_value_t = 500)]
    settle_ms: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    let quiet = cli.quiet;

    let result = match cli.command {
        Commands::Fields { family } => cmd_fields(family),
        Commands::Check {
            family,
            assignments,
        } => cmd_check(family, &assignments, quiet),
        Commands::Encode { family, config } => cmd_encode(family, &config),
        Commands::Decode {
            family,
            hex,
            pretty,
        } => cmd_decode(family, &hex, pretty),
        Commands::Read {
            family,
            port,
            output,
            stdout,
            pretty,
        } => cmd_read(family, &port, output, stdout, pretty, quiet),
        Commands::Write {
            family,
            port,
            config,
            temporary,
        } => cmd_write(family, &port, &config, temporary, quiet),
        Commands::Set {
            family,
            port,
            temporary,
            assignments,
        } => cmd_set(family, &port, &assignments, temporary, quiet),
        Commands::Info { family, port } => cmd_info(family, &port),
        Commands::Version { family, port } => cmd_version(family, &port),
        Commands::Reset { family, port } => cmd_reset(family, &port, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn codec_error(family: Family, err: CodecError) -> CliError {
    let hint = match &err {
        CodecError::InvalidHex(_) => {
            "pass the register bytes as hex, e.g. \"c0 00 00 1a 17 44\"".to_string()
        }
        CodecError::FamilyMismatch { actual, .. } => {
            format!("pass --family {}", family_arg(*actual))
        }
        _ => format!(
            "run `loracfg fields --family {}` to list legal values",
            family_arg(family)
        ),
    };
    CliError::new(err.to_string(), Some(hint))
}

fn config_error(family: Family, err: ConfigError) -> CliError {
    let hint = match (&err, err.category()) {
        (ConfigError::Transport(TransportError::PortOpenFailed { .. }), _) => {
            "check the device path and that no other program holds the port".to_string()
        }
        (ConfigError::Transport(TransportError::NoResponse { .. }), _) => {
            "check wiring and that the module is in configuration mode (M0 and M1 high)"
                .to_string()
        }
        (ConfigError::Unsupported { operation, .. }, _) => {
            format!("{operation} is only available for {}", other_family(family))
        }
        (_, ErrorCategory::Port) => "check the serial connection and retry".to_string(),
        (_, ErrorCategory::Device) => {
            format!("the module answered with unexpected data; is it an {family} module?")
        }
        (_, ErrorCategory::Input) => {
            format!("run `loracfg fields --family {}` to list legal values", family_arg(family))
        }
    };
    CliError::new(err.to_string(), Some(hint))
}

fn family_arg(family: Family) -> String {
    family.to_string().to_ascii_lowercase()
}

fn other_family(family: Family) -> Family {
    match family {
        Family::E22 => Family::E32,
        Family::E32 => Family::E22,
    }
}

fn cmd_fields(family: Family) -> Result<(), CliError> {
    println!("{family} fields:");
    for spec in family.layout().fields {
        let access = match spec.access {
            Access::ReadWrite => String::new(),
            Access::WriteOnly => format!(" ({})", spec.access.as_str()),
        };
        println!(
            "  {:<18} {:<9} {}{}",
            spec.name,
            spec.group.as_str(),
            spec.description,
            access
        );
        println!("  {:<18} {:<9} {}", "", "", spec.legal_values().join(", "));
    }
    Ok(())
}

fn cmd_check(family: Family, assignments: &[String], quiet: bool) -> Result<(), CliError> {
    for assignment in assignments {
        let (field, value) = parse_assignment(assignment)?;
        validate(family, field, value).map_err(|err| codec_error(family, err))?;
    }
    if !quiet {
        eprintln!("OK: {} value(s) valid for {family}", assignments.len());
    }
    Ok(())
}

fn cmd_encode(family: Option<Family>, config: &Path) -> Result<(), CliError> {
    let cfg = load_config(config, family)?;
    validate_config(&cfg).map_err(|err| codec_error(cfg.family, err))?;
    let block = cfg
        .family
        .encode_for_write(&cfg)
        .map_err(|err| codec_error(cfg.family, err))?;
    println!("{block}");
    Ok(())
}

fn cmd_decode(family: Family, hex: &str, pretty: bool) -> Result<(), CliError> {
    let block = RegisterBlock::from_hex(hex).map_err(|err| codec_error(family, err))?;
    let cfg = family
        .decode(&block)
        .map_err(|err| codec_error(family, err))?;
    println!("{}", serialize_json(&cfg, pretty)?);
    Ok(())
}

fn cmd_read(
    family: Family,
    port: &PortArgs,
    output: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let device = resolve_device(&port.device)?;
    let cfg = configurator(port)
        .read_config(family, &device)
        .map_err(|err| config_error(family, err))?;

    if !stdout && output.is_none() {
        print_config(&device, &cfg);
        return Ok(());
    }

    let snapshot = Snapshot {
        tool: ToolInfo {
            name: "loracfg".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: build_commit(),
        },
        read_at: now_rfc3339()?,
        device: device.clone(),
        config: cfg,
    };
    let json = serialize_json(&snapshot, pretty)?;

    let Some(output) = output else {
        println!("{json}");
        return Ok(());
    };
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output, json)
        .with_context(|| format!("Failed to write snapshot: {}", output.display()))?;
    if !quiet {
        eprintln!("OK: snapshot written -> {}", output.display());
    }
    Ok(())
}

fn cmd_write(
    family: Option<Family>,
    port: &PortArgs,
    config: &Path,
    temporary: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let cfg = load_config(config, family)?;
    let device = resolve_device(&port.device)?;
    configurator(port)
        .write_config(cfg.family, &device, &cfg, persistence(temporary))
        .map_err(|err| config_error(cfg.family, err))?;
    if !quiet {
        eprintln!("OK: {} configuration written to {device}", cfg.family);
    }
    Ok(())
}

fn cmd_set(
    family: Family,
    port: &PortArgs,
    assignments: &[String],
    temporary: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let edits = assignments
        .iter()
        .map(|assignment| parse_assignment(assignment))
        .collect::<Result<Vec<_>, _>>()?;
    for (field, value) in &edits {
        validate(family, field, value).map_err(|err| codec_error(family, err))?;
    }

    let device = resolve_device(&port.device)?;
    let configurator = configurator(port);
    let mut cfg = configurator
        .read_config(family, &device)
        .map_err(|err| config_error(family, err))?;
    for (field, value) in &edits {
        let before = cfg.get(field).map(ToString::to_string);
        cfg.set_text(field, value)
            .map_err(|err| codec_error(family, err))?;
        if let (Some(before), Some(after)) = (before, cfg.get(field)) {
            info!("{field}: {before} -> {after}");
        }
    }

    configurator
        .write_config(family, &device, &cfg, persistence(temporary))
        .map_err(|err| config_error(family, err))?;
    if !quiet {
        eprintln!("OK: {} field(s) updated on {device}", edits.len());
    }
    Ok(())
}

fn cmd_info(family: Family, port: &PortArgs) -> Result<(), CliError> {
    let device = resolve_device(&port.device)?;
    let info = configurator(port)
        .product_info_for(family, &device)
        .map_err(|err| config_error(family, err))?;
    println!("{}", hex_dump(&info));
    Ok(())
}

fn cmd_version(family: Family, port: &PortArgs) -> Result<(), CliError> {
    let device = resolve_device(&port.device)?;
    let version = configurator(port)
        .module_version_for(family, &device)
        .map_err(|err| config_error(family, err))?;
    println!(
        "model 0x{:02x} version 0x{:02x} features 0x{:02x}",
        version.model, version.version, version.features
    );
    Ok(())
}

fn cmd_reset(family: Family, port: &PortArgs, quiet: bool) -> Result<(), CliError> {
    let device = resolve_device(&port.device)?;
    configurator(port)
        .factory_reset_for(family, &device)
        .map_err(|err| config_error(family, err))?;
    if !quiet {
        eprintln!("OK: factory defaults restored on {device}");
    }
    Ok(())
}

fn configurator(port: &PortArgs) -> Configurator<SerialConnector> {
    let options = SerialOptions {
        baud_rate: port.baud,
        exchange: ExchangeOptions {
            timeout: Duration::from_millis(port.timeout_ms),
            settle_delay: Duration::from_millis(port.settle_ms),
            ..ExchangeOptions::default()
        },
    };
    Configurator::new(SerialConnector::new(options))
}

fn build_commit() -> Option<String> {
    let commit = env!("LORACFG_BUILD_COMMIT");
    (commit != "unknown").then(|| commit.to_string())
}

fn persistence(temporary: bool) -> Persistence {
    if temporary {
        Persistence::Temporary
    } else {
        Persistence::Saved
    }
}

fn print_config(device: &str, cfg: &DeviceConfig) {
    println!("{} configuration on {device}:", cfg.family);
    for spec in cfg.family.layout().fields {
        let value = match (spec.access, cfg.get(spec.name)) {
            (Access::WriteOnly, _) => "(write-only)".to_string(),
            (_, Some(value)) => value.to_string(),
            (_, None) => "-".to_string(),
        };
        println!("  {:<18} {:<14} {}", spec.name, value, spec.description);
    }
}

fn parse_assignment(text: &str) -> Result<(&str, &str), CliError> {
    text.split_once('=')
        .map(|(field, value)| (field.trim(), value.trim()))
        .filter(|(field, _)| !field.is_empty())
        .ok_or_else(|| {
            CliError::new(
                format!("invalid assignment '{text}'"),
                Some("use FIELD=VALUE, e.g. Channel=433".to_string()),
            )
        })
}

/// Loads a configuration or a snapshot written by `read -o`.
fn load_config(path: &Path, family: Option<Family>) -> Result<DeviceConfig, CliError> {
    if !path.exists() {
        return Err(CliError::new(
            format!("config file not found: {}", path.display()),
            Some("write one with `loracfg read ... -o FILE`".to_string()),
        ));
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let cfg = match serde_json::from_str::<Snapshot>(&text) {
        Ok(snapshot) => snapshot.config,
        Err(_) => serde_json::from_str::<DeviceConfig>(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
    };
    if let Some(family) = family {
        if family != cfg.family {
            return Err(CliError::new(
                format!(
                    "{} holds an {} configuration, not {family}",
                    path.display(),
                    cfg.family
                ),
                Some(format!("pass --family {} or omit it", family_arg(cfg.family))),
            ));
        }
    }
    Ok(cfg)
}

fn serialize_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn now_rfc3339() -> Result<String, CliError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("Failed to format timestamp")
        .map_err(Into::into)
}

fn resolve_device(device: &Path) -> Result<String, CliError> {
    let pattern = device.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(pattern.into_owned());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid device pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid device pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.exists() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no devices match pattern '{}'", pattern),
            Some("check that the module is plugged in, or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple devices match pattern '{}' ({} matches); matches: {listed}{more}",
                pattern,
                matches.len()
            ),
            Some("pass a single device path".to_string()),
        ));
    }

    Ok(matches.remove(0).display().to_string())
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
