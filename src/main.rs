use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::{Parser, Subcommand};
use gsh01_rs::gsh01::time::{local_utc_offset_quarter_hours, quarter_hours_from_offset_str};
use gsh01_rs::util::{crc16_xmodem, decode_hex, encode_hex_upper};
use gsh01_rs::{
    decode_frame, encode, init_logger, log_error, log_info, ApplicationMode, Command, CommandKind,
    StatusWord, UserIdStatus, UserIdType,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "gsh01-cli")]
#[command(about = "CLI tool for the GSH01 power meter application layer")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a request frame and print it as hex
    Encode {
        #[command(subcommand)]
        request: Request,
    },
    /// Decode a status word given in decimal or 0x-prefixed hex
    StatusWord { value: String },
    /// Decode a frame given as hex
    Decode { hex: String },
}

#[derive(Subcommand)]
enum Request {
    /// Header-only request of any kind that has one
    Simple { kind: CommandKind },
    StartTransaction {
        user_id: String,
        #[arg(long, value_enum, default_value = "assigned")]
        status: UserIdStatus,
        #[arg(long, value_enum, default_value = "iso14443")]
        id_type: UserIdType,
        /// Offset as +hhmm, defaults to the host timezone
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<String>,
        /// Unix seconds, defaults to now
        #[arg(long)]
        epoch: Option<i64>,
    },
    SetTime {
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<String>,
        #[arg(long)]
        epoch: Option<i64>,
    },
    SetBusAddress { address: u8 },
    GetOcmf { id: u32 },
    GetLogEntry { id: u32 },
    GetLogEntryReverse { id: u32 },
    SetChargePointId {
        id: String,
        #[arg(long, value_enum, default_value = "evseid")]
        id_type: UserIdType,
    },
    SetApplicationMode {
        #[arg(value_enum)]
        mode: ApplicationMode,
    },
    SetLineLossImpedance { impedance: u16 },
}

#[derive(Serialize)]
struct EncodedFrame {
    command: String,
    declared_length: u16,
    hex: String,
    link_crc16: String,
}

#[derive(Serialize)]
struct StatusReport {
    raw: String,
    conditions: Vec<&'static str>,
    unknown_bits: String,
    has_errors: bool,
}

#[derive(Serialize)]
struct FrameReport {
    command_type: String,
    kind: Option<String>,
    declared_length: u16,
    status: u8,
    payload: String,
    status_word: Option<StatusReport>,
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        log_error(&format!("{err:#}"));
        return Err(err);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode { request } => {
            let command = build_request(request)?;
            let frame = encode(&command);
            log_info(&format!("Encoded {} ({} bytes)", command.kind(), frame.len()));
            let report = EncodedFrame {
                command: command.kind().to_string(),
                declared_length: command.declared_length(),
                hex: encode_hex_upper(&frame),
                link_crc16: format!("0x{:04X}", crc16_xmodem(&frame)),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} {}", report.command, report.hex);
                println!("declared length: {}", report.declared_length);
                println!("link crc16: {}", report.link_crc16);
            }
        }
        Commands::StatusWord { value } => {
            let report = status_report(StatusWord::new(parse_word(&value)?));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_status(&report);
            }
        }
        Commands::Decode { hex } => {
            let bytes = decode_hex(&hex).map_err(|e| anyhow!("invalid hex: {e}"))?;
            let frame = decode_frame(&bytes).context("decoding frame")?;
            let kind = frame.kind();
            let status_word = match kind {
                Some(CommandKind::StatusWord) => frame.status_word().ok().map(status_report),
                _ => None,
            };
            let report = FrameReport {
                command_type: format!("0x{:04X}", frame.command_type),
                kind: kind.map(|k| k.to_string()),
                declared_length: frame.declared_length,
                status: frame.status.code(),
                payload: encode_hex_upper(&frame.payload),
                status_word,
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} ({}) length {} status 0x{:02X}",
                    report.kind.as_deref().unwrap_or("UNKNOWN"),
                    report.command_type,
                    report.declared_length,
                    report.status
                );
                println!("payload: {}", report.payload);
                if let Some(status) = &report.status_word {
                    print_status(status);
                }
            }
        }
    }

    Ok(())
}

fn build_request(request: Request) -> Result<Command> {
    let command = match request {
        Request::Simple { kind } => Command::simple(kind)
            .ok_or_else(|| anyhow!("{kind} has no header-only request"))?,
        Request::StartTransaction {
            user_id,
            status,
            id_type,
            utc_offset,
            epoch,
        } => Command::start_transaction(
            &timepoint(epoch)?,
            utc_offset_or_local(utc_offset.as_deref())?,
            status,
            id_type,
            &user_id,
        ),
        Request::SetTime { utc_offset, epoch } => Command::set_time(
            &timepoint(epoch)?,
            utc_offset_or_local(utc_offset.as_deref())?,
        ),
        Request::SetBusAddress { address } => Command::set_bus_address(address),
        Request::GetOcmf { id } => Command::get_ocmf(id),
        Request::GetLogEntry { id } => Command::get_log_entry(id),
        Request::GetLogEntryReverse { id } => Command::get_log_entry_reverse(id),
        Request::SetChargePointId { id, id_type } => Command::set_charge_point_id(id_type, &id),
        Request::SetApplicationMode { mode } => Command::set_application_mode(mode),
        Request::SetLineLossImpedance { impedance } => Command::set_line_loss_impedance(impedance),
    };
    Ok(command)
}

fn timepoint(epoch: Option<i64>) -> Result<DateTime<Utc>> {
    match epoch {
        Some(seconds) => Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| anyhow!("epoch {seconds} out of range")),
        None => Ok(Local::now().with_timezone(&Utc)),
    }
}

fn utc_offset_or_local(offset: Option<&str>) -> Result<i8> {
    match offset {
        Some(text) => Ok(quarter_hours_from_offset_str(text)?),
        None => Ok(local_utc_offset_quarter_hours()),
    }
}

fn parse_word(value: &str) -> Result<u64> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => value.replace('_', "").parse::<u64>(),
    };
    parsed.with_context(|| format!("invalid status word {value:?}"))
}

fn status_report(word: StatusWord) -> StatusReport {
    StatusReport {
        raw: format!("0x{:016X}", word.raw()),
        conditions: word.descriptions(),
        unknown_bits: format!("0x{:016X}", word.unknown_bits()),
        has_errors: word.has_errors(),
    }
}

fn print_status(report: &StatusReport) {
    println!("status word {}", report.raw);
    if report.conditions.is_empty() {
        println!("  (no known conditions set)");
    }
    for condition in &report.conditions {
        println!("  --> {condition}");
    }
}
