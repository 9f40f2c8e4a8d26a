//! Command line interface for the `subnet` binary.
//!
//! Parsing is done with clap derive; [`run`] dispatches a parsed [`Cli`] and
//! writes the result to any [`Write`] sink so the commands can be tested
//! without a terminal.

use crate::error::{Result, SubnetError};
use crate::models::{parse_address, Ipv4Subnet, Ipv6Subnet};
use crate::output::{write_lines, write_table, DivideRow, Ipv4Report, Ipv6Report};
use crate::taxonomy::{random_of_kind, Ipv6Kind};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rand::Rng;
use serde::Serialize;
use std::io::Write;
use std::net::{IpAddr, Ipv6Addr};

#[derive(Debug, Parser)]
#[command(name = "subnet")]
#[command(author, version)]
#[command(about = "Describe, enumerate and divide IPv4 and IPv6 subnets", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = Format::Text)]
    pub format: Format,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct PrefixArgs {
    /// IPv4 or IPv6 address
    #[arg(long)]
    pub ip: String,

    /// Prefix length
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=128))]
    pub bits: u8,
}

#[derive(Debug, Clone, Args)]
pub struct DivideArgs {
    #[command(flatten)]
    pub prefix: PrefixArgs,

    /// Prefix length of the child subnets
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=128))]
    pub secondary_bits: Option<u8>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the attributes of a subnet
    Describe {
        #[command(flatten)]
        prefix: PrefixArgs,

        /// Display name for the subnet
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the address range of a subnet, or of each child subnet
    Ranges(DivideArgs),
    /// Print each child subnet with its range and usable host count
    Divide(DivideArgs),
    /// Print random example IPv6 addresses of a kind
    Random {
        #[arg(long, value_enum)]
        kind: Ipv6Kind,

        #[arg(long, default_value_t = 1)]
        count: u32,
    },
}

/// Run a parsed command line, writing the output to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    log::info!("#Start run() {:?}", cli.command);
    if cli.no_color {
        colored::control::set_override(false);
    }
    match &cli.command {
        Command::Describe { prefix, name } => describe(prefix, name.as_deref(), cli.format, out),
        Command::Ranges(args) => ranges(args, cli.format, out),
        Command::Divide(args) => divide(args, cli.format, out),
        Command::Random { kind, count } => {
            random(*kind, *count, cli.format, out, &mut rand::rng())
        }
    }
}

/// Write a failed run's message to `err` once and return its exit code.
pub fn report_error<W: Write>(error: &SubnetError, err: &mut W) -> u8 {
    let _ = writeln!(err, "subnet: {error}");
    error.exit_code()
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn v4_subnet(ip: &str, bits: u8, name: Option<&str>) -> Result<Ipv4Subnet> {
    match name {
        Some(name) => Ipv4Subnet::named(ip, bits, name),
        None => Ipv4Subnet::new(ip, bits),
    }
}

fn v6_subnet(ip: &str, bits: u8, name: Option<&str>) -> Result<Ipv6Subnet> {
    match name {
        Some(name) => Ipv6Subnet::named(ip, bits, name),
        None => Ipv6Subnet::new(ip, bits),
    }
}

fn describe<W: Write>(
    prefix: &PrefixArgs,
    name: Option<&str>,
    format: Format,
    out: &mut W,
) -> Result<()> {
    log::info!("#Start describe() {}/{}", prefix.ip, prefix.bits);
    match parse_address(&prefix.ip)? {
        IpAddr::V4(addr) => {
            let subnet = v4_subnet(&prefix.ip, prefix.bits, name)?;
            let report = Ipv4Report::new(addr, &subnet);
            match format {
                Format::Text => write_table(out, &report.rows())?,
                Format::Json => write_json(out, &report)?,
            }
        }
        IpAddr::V6(addr) => {
            let subnet = v6_subnet(&prefix.ip, prefix.bits, name)?;
            let report = Ipv6Report::new(addr, &subnet);
            match format {
                Format::Text => write_table(out, &report.rows())?,
                Format::Json => write_json(out, &report)?,
            }
        }
    }
    Ok(())
}

/// Child prefix length when it differs from the parent's.
fn child_bits(args: &DivideArgs) -> Option<u8> {
    args.secondary_bits.filter(|bits| *bits != args.prefix.bits)
}

fn ranges<W: Write>(args: &DivideArgs, format: Format, out: &mut W) -> Result<()> {
    log::info!("#Start ranges() {:?}", args);
    let prefix = &args.prefix;
    match parse_address(&prefix.ip)? {
        IpAddr::V4(_) => {
            let subnet = Ipv4Subnet::new(&prefix.ip, prefix.bits)?;
            let Some(bits) = child_bits(args) else {
                return match format {
                    Format::Text => Ok(write_lines(out, [subnet.range()])?),
                    Format::Json => write_json(out, &[subnet.range()]),
                };
            };
            let child = Ipv4Subnet::from_parts(subnet.addr(), bits)?;
            match format {
                Format::Text => {
                    for c in subnet.children(&child)? {
                        writeln!(out, "{}", c?.range())?;
                    }
                    Ok(())
                }
                Format::Json => write_json(out, &subnet.split_ranges(&child)?),
            }
        }
        IpAddr::V6(_) => {
            let subnet = Ipv6Subnet::new(&prefix.ip, prefix.bits)?;
            if child_bits(args).is_some() {
                return Err(SubnetError::Unsupported(
                    "IPv6 subnets cannot be divided".to_string(),
                ));
            }
            match format {
                Format::Text => Ok(write_lines(out, [subnet.range()])?),
                Format::Json => write_json(out, &[subnet.range()]),
            }
        }
    }
}

fn divide<W: Write>(args: &DivideArgs, format: Format, out: &mut W) -> Result<()> {
    log::info!("#Start divide() {:?}", args);
    let prefix = &args.prefix;
    let subnet = match parse_address(&prefix.ip)? {
        IpAddr::V4(_) => Ipv4Subnet::new(&prefix.ip, prefix.bits)?,
        IpAddr::V6(_) => {
            return Err(SubnetError::Unsupported(
                "IPv6 subnets cannot be divided".to_string(),
            ))
        }
    };
    let Some(bits) = child_bits(args) else {
        let row = DivideRow::new(subnet);
        return match format {
            Format::Text => Ok(write_lines(out, [row])?),
            Format::Json => write_json(out, &[row]),
        };
    };
    let child = Ipv4Subnet::from_parts(subnet.addr(), bits)?;
    match format {
        Format::Text => {
            for c in subnet.children(&child)? {
                writeln!(out, "{}", DivideRow::new(c?))?;
            }
            Ok(())
        }
        Format::Json => {
            let rows: Vec<DivideRow> = subnet
                .split(&child)?
                .into_iter()
                .map(DivideRow::new)
                .collect();
            write_json(out, &rows)
        }
    }
}

fn random<W: Write, R: Rng + ?Sized>(
    kind: Ipv6Kind,
    count: u32,
    format: Format,
    out: &mut W,
    rng: &mut R,
) -> Result<()> {
    log::info!("#Start random() {count} x {kind}");
    let addrs = (0..count)
        .map(|_| {
            random_of_kind(kind, &mut *rng)
                .ok_or_else(|| SubnetError::Unsupported(format!("no {kind} addresses")))
        })
        .collect::<Result<Vec<Ipv6Addr>>>()?;
    match format {
        Format::Text => write_lines(out, &addrs)?,
        Format::Json => write_json(out, &addrs)?,
    }
    Ok(())
}
