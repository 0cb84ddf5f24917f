//! df-export: Grouping result export
//!
//! Serializes generated groups to the spreadsheet-compatible CSV format:
//! UTF-8 with a leading BOM (so Excel detects the encoding), a
//! `Group,Name` header, and one row per member with the group label
//! unquoted and the name quoted.

use std::fs;
use std::path::{Path, PathBuf};

use df_core::DrawResult;
use df_draw::Group;

/// Fixed download name for grouping exports
pub const GROUPING_EXPORT_FILENAME: &str = "grouping_result.csv";

/// UTF-8 byte order mark prefixed for spreadsheet compatibility
const UTF8_BOM: &str = "\u{feff}";

/// Render groups as CSV text, BOM included
pub fn grouping_csv(groups: &[Group]) -> String {
    let mut csv = String::from(UTF8_BOM);
    csv.push_str("Group,Name\n");
    for group in groups {
        for member in &group.members {
            csv.push_str(&format!(
                "Group {},\"{}\"\n",
                group.id,
                escape_quotes(&member.name)
            ));
        }
    }
    csv
}

/// Write the grouping CSV under `dir` with the fixed export name,
/// returning the full path written
pub fn write_grouping_csv<P: AsRef<Path>>(groups: &[Group], dir: P) -> DrawResult<PathBuf> {
    let path = dir.as_ref().join(GROUPING_EXPORT_FILENAME);
    fs::write(&path, grouping_csv(groups))?;
    log::info!("export: wrote {} groups to {}", groups.len(), path.display());
    Ok(path)
}

/// Double embedded quotes per CSV quoting rules
fn escape_quotes(name: &str) -> String {
    name.replace('"', "\"\"")
}
