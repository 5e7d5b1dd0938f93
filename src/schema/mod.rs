//! Fixed output layout: the target fields, the program field and its allowed
//! values, and the placeholder written for missing data.

use std::fmt;

/// Output columns, in output order.
pub const TARGET_FIELDS: [&str; 17] = [
    "Name",
    "Application Ref. No.",
    "Application Status",
    "Stage",
    "Program Name",
    "Selected Card Variant",
    "Location Name",
    "Phone Number",
    "Utm Campaign",
    "Utm Medium",
    "owner",
    "what to do",
    "calling prioerty",
    "Created Date",
    "Journey Type",
    "Soft Decision",
    "Sub Stage",
];

/// The target field always overwritten with the selected [`Program`].
pub const PROGRAM_FIELD: &str = "Program Name";

/// Written in place of missing, empty or unmapped values.
pub const SENTINEL: &str = "Null";

/// File name the converted CSV is offered under.
pub const OUTPUT_FILE_NAME: &str = "converted_file.csv";

/// Allowed values for [`PROGRAM_FIELD`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Program {
    #[default]
    Idfc,
    Bob,
}

impl Program {
    pub const ALL: [Program; 2] = [Program::Idfc, Program::Bob];

    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Idfc => "IDFC",
            Program::Bob => "BOB",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "IDFC" => Some(Program::Idfc),
            "BOB" => Some(Program::Bob),
            _ => None,
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
