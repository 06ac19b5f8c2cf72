//! Device discovery from `i2cdetect` output.
//!
//! `i2cdetect -y <bus>` prints a 16-column grid. Each cell is `--` when no
//! device acknowledged, the two hex digits of the address when one did, and
//! `UU` when a kernel driver has claimed the address:
//!
//! ```text
//!      0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f
//! 00:          -- -- -- -- -- -- -- -- -- -- -- -- --
//! 10: -- -- -- -- -- -- -- -- -- -- -- -- -- -- -- --
//! 20: 20 -- -- -- -- -- -- 27 -- -- -- -- -- -- -- --
//! ```

use crate::types::DeviceAddress;

/// Cell text for an address with no device.
pub const EMPTY_CELL: &str = "--";

/// Extract device addresses from a raw `i2cdetect` table.
///
/// Every whitespace-separated token that is exactly two characters long and
/// not `--` is reported as `0x<token>`, in row-major order. Tokens are not
/// validated and duplicates are kept; a two-character row label or a `UU`
/// cell is reported like any other address.
pub fn parse_detect_output(raw: &str) -> Vec<DeviceAddress> {
    raw.lines()
        .flat_map(str::split_whitespace)
        .filter(|token| token.chars().count() == 2 && *token != EMPTY_CELL)
        .map(DeviceAddress::from_scan_cell)
        .collect()
}

/// Render a table in the layout `i2cdetect -y` prints.
///
/// Addresses outside the probed range 0x03-0x77 are left blank.
pub fn render_detect_table(present: &[u8]) -> String {
    let mut table = String::from("   ");
    for col in 0..16 {
        table.push_str(&format!("  {:x}", col));
    }
    table.push('\n');

    for row in 0..8u8 {
        table.push_str(&format!("{:02x}:", row * 16));
        for col in 0..16u8 {
            let address = row * 16 + col;
            if !(0x03..=0x77).contains(&address) {
                table.push_str("   ");
            } else if present.contains(&address) {
                table.push_str(&format!(" {:02x}", address));
            } else {
                table.push_str(" --");
            }
        }
        table.push('\n');
    }

    table
}
