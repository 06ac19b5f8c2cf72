//! CSV output formatting.

use super::Report;
use std::io;

/// Print a report in CSV format.
pub fn print_csv(report: &Report) -> io::Result<()> {
    let stdout = io::stdout();
    write_csv(report, stdout.lock())
}

/// Write a report as CSV to any writer.
pub fn write_csv<W: io::Write>(report: &Report, writer: W) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    match report {
        Report::Devices(scan) => {
            wtr.write_record(["device", "transport", "scanned_at"])?;
            for device in &scan.devices {
                wtr.write_record([
                    device.as_str(),
                    scan.transport.as_str(),
                    scan.scanned_at.to_rfc3339().as_str(),
                ])?;
            }
        }
        Report::Registers(rows) => {
            wtr.write_record(["name", "address", "port", "description"])?;
            for row in rows {
                wtr.write_record([
                    row.name,
                    row.address.to_string().as_str(),
                    row.port.to_string().as_str(),
                    row.description,
                ])?;
            }
        }
        Report::Reading(reading) => {
            wtr.write_record(["device", "register", "address", "value", "binary", "at"])?;
            wtr.write_record([
                reading.device.as_str(),
                reading.register.unwrap_or(""),
                reading.address.to_string().as_str(),
                reading.value.to_string().as_str(),
                reading.binary.as_str(),
                reading.at.to_rfc3339().as_str(),
            ])?;
        }
        Report::Ports(ports) => {
            wtr.write_record(["device", "port", "field", "value"])?;
            for port in ports {
                for (index, field) in port.fields.iter().enumerate() {
                    wtr.write_record([
                        port.device.as_str(),
                        port.port.to_string().as_str(),
                        index.to_string().as_str(),
                        field.to_string().as_str(),
                    ])?;
                }
            }
        }
        Report::Pin(pin) => {
            wtr.write_record(["device", "port", "pin", "high", "read_at"])?;
            wtr.write_record([
                pin.device.as_str(),
                pin.port.to_string().as_str(),
                pin.pin.to_string().as_str(),
                if pin.high { "1" } else { "0" },
                pin.read_at.to_rfc3339().as_str(),
            ])?;
        }
        Report::Decoded(decoded) => {
            wtr.write_record(["hex", "binary"])?;
            wtr.write_record([decoded.hex.as_str(), decoded.binary.as_str()])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{PortReport, RegisterRow};
    use crate::port_state::PortState;
    use crate::registers::Register;
    use crate::types::{DeviceAddress, Port};

    fn render(report: &Report) -> String {
        let mut buf = Vec::new();
        write_csv(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_register_rows() {
        let report = Report::Registers(vec![
            RegisterRow::from(Register::Gpioa),
            RegisterRow::from(Register::Gpiob),
        ]);
        let csv = render(&report);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "name,address,port,description");
        assert_eq!(lines[1], "GPIOA,0x12,A,Port value");
        assert_eq!(lines[2], "GPIOB,0x13,B,Port value");
    }

    #[test]
    fn test_port_fields_one_per_row() {
        let state = PortState::new(Port::A, "01101001").unwrap();
        let report = Report::Ports(vec![PortReport::new(DeviceAddress::default(), &state)]);
        let csv = render(&report);
        assert_eq!(csv.lines().count(), 9);
        assert_eq!(csv.lines().nth(2), Some("0x20,A,1,1"));
    }

    #[test]
    fn test_both_ports_share_one_header() {
        let device = DeviceAddress::default();
        let a = PortState::new(Port::A, "00000000").unwrap();
        let b = PortState::new(Port::B, "11111111").unwrap();
        let report = Report::Ports(vec![
            PortReport::new(device.clone(), &a),
            PortReport::new(device, &b),
        ]);
        let csv = render(&report);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 17);
        assert_eq!(lines.iter().filter(|l| l.starts_with("device,")).count(), 1);
        assert_eq!(lines[1], "0x20,A,0,0");
        assert_eq!(lines[9], "0x20,B,0,1");
    }
}
