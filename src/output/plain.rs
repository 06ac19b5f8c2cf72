//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use super::Report;
use console::style;
use std::io::{self, Write};

/// Print a report in human-readable plain text format.
pub fn print_plain(report: &Report) -> io::Result<()> {
    let stdout = io::stdout();
    write_plain(report, &mut stdout.lock())
}

/// Write a report as plain text to any writer.
pub fn write_plain<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    match report {
        Report::Devices(scan) => {
            if scan.devices.is_empty() {
                writeln!(out, "{}", style("No devices found.").dim())?;
                return Ok(());
            }
            writeln!(
                out,
                "{} {} device(s) via {}",
                style("Found").bold(),
                style(scan.devices.len()).green().bold(),
                scan.transport
            )?;
            for device in &scan.devices {
                match device.to_u8() {
                    Some(_) => writeln!(out, "  {}", style(device).green())?,
                    None => writeln!(
                        out,
                        "  {} {}",
                        style(device).yellow(),
                        style("(in use by a driver)").dim()
                    )?,
                }
            }
        }
        Report::Registers(rows) => {
            writeln!(
                out,
                "  {:<9} {:<8} {:<5} {}",
                style("NAME").bold(),
                style("ADDRESS").bold(),
                style("PORT").bold(),
                style("DESCRIPTION").bold()
            )?;
            writeln!(out, "  {}", style("─".repeat(60)).dim())?;
            for row in rows {
                writeln!(
                    out,
                    "  {:<9} {:<8} {:<5} {}",
                    row.name, row.address, row.port, row.description
                )?;
            }
        }
        Report::Reading(reading) => {
            let label = reading
                .register
                .map(|name| format!("{} ({})", name, reading.address))
                .unwrap_or_else(|| reading.address.to_string());
            writeln!(
                out,
                "{} {}: {} {}",
                style(&reading.device).dim(),
                style(label).bold(),
                style(reading.value).cyan(),
                reading.binary
            )?;
        }
        Report::Ports(ports) => {
            for port in ports {
                writeln!(
                    out,
                    "{} port {}: {}",
                    style(&port.device).dim(),
                    style(port.port).bold(),
                    style(&port.state).cyan()
                )?;
                write_fields(out, &port.fields)?;
            }
        }
        Report::Pin(pin) => {
            let level = if pin.high {
                style("high").green().bold()
            } else {
                style("low").dim()
            };
            writeln!(
                out,
                "{} {}: {}",
                style(&pin.device).dim(),
                style(pin.pin_name()).bold(),
                level
            )?;
        }
        Report::Decoded(decoded) => {
            writeln!(
                out,
                "{} -> {}",
                style(&decoded.hex).bold(),
                style(&decoded.binary).cyan()
            )?;
            write_fields(out, &decoded.fields)?;
        }
    }

    Ok(())
}

fn write_fields<W: Write>(out: &mut W, fields: &[char]) -> io::Result<()> {
    for (index, field) in fields.iter().enumerate() {
        let value = if *field == '1' {
            style(field).green().bold()
        } else {
            style(field).dim()
        };
        writeln!(out, "  field {}: {}", index, value)?;
    }
    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Decoded, DeviceReport, PinReport, PortReport};
    use crate::port_state::PortState;
    use crate::types::{DeviceAddress, Port};
    use chrono::Utc;

    fn render(report: &Report) -> String {
        console::set_colors_enabled(false);
        let mut buf = Vec::new();
        write_plain(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_devices() {
        let report = Report::Devices(DeviceReport {
            transport: "simulated".to_string(),
            devices: vec![
                "0x20".parse().unwrap(),
                DeviceAddress::from_scan_cell("UU"),
            ],
            scanned_at: Utc::now(),
        });
        let text = render(&report);
        assert!(text.contains("Found 2 device(s) via simulated"));
        assert!(text.contains("  0x20\n"));
        assert!(text.contains("0xUU (in use by a driver)"));
    }

    #[test]
    fn test_empty_scan() {
        let report = Report::Devices(DeviceReport {
            transport: "i2c-tools".to_string(),
            devices: Vec::new(),
            scanned_at: Utc::now(),
        });
        assert_eq!(render(&report), "No devices found.\n");
    }

    #[test]
    fn test_decoded() {
        let report = Report::Decoded(Decoded {
            hex: "A".to_string(),
            binary: "00001010".to_string(),
            fields: "00001010".chars().collect(),
        });
        let text = render(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "A -> 00001010");
        assert_eq!(lines[1], "  field 0: 0");
        assert_eq!(lines[5], "  field 4: 1");
        assert_eq!(lines[8], "  field 7: 0");
    }

    #[test]
    fn test_both_ports() {
        let device = DeviceAddress::default();
        let a = PortState::new(Port::A, "10000000").unwrap();
        let b = PortState::new(Port::B, "00000001").unwrap();
        let report = Report::Ports(vec![
            PortReport::new(device.clone(), &a),
            PortReport::new(device, &b),
        ]);
        let text = render(&report);
        assert_eq!(text.lines().count(), 18);
        assert!(text.starts_with("0x20 port A: 10000000\n  field 0: 1\n"));
        assert!(text.contains("0x20 port B: 00000001\n"));
    }

    #[test]
    fn test_pin_level() {
        let report = Report::Pin(PinReport::new(DeviceAddress::default(), Port::A, 3, false));
        assert_eq!(render(&report), "0x20 GPA3: low\n");
    }
}
