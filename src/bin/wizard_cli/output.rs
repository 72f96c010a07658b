//! Output formatting for token-wizard
//!
//! Human-readable and JSON output shared by all commands.

use anyhow::Result;
use serde::Serialize;
use sui_coin_template::{ConstantEntry, ConstantValue, PatchError};
use sui_wizard_types::normalize_address_short;

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a decoded constant for a table cell.
pub fn format_constant_value(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Bool(v) => v.to_string(),
        ConstantValue::U8(v) => v.to_string(),
        ConstantValue::U16(v) => v.to_string(),
        ConstantValue::U32(v) => v.to_string(),
        ConstantValue::U64(v) => v.to_string(),
        ConstantValue::Address(a) => normalize_address_short(a),
        ConstantValue::Bytes {
            text: Some(text), ..
        } => format!("{:?}", text),
        ConstantValue::Bytes { text: None, hex } => format!("0x{}", hex),
        ConstantValue::Other => "-".to_string(),
    }
}

/// Constant table, one row per pool entry.
pub fn format_constants(constants: &[ConstantEntry]) -> String {
    let mut out = String::from("\x1b[1mConstants:\x1b[0m\n");
    for c in constants {
        out.push_str(&format!(
            "  [{}] {:<10} {}  (bcs 0x{})\n",
            c.index,
            c.type_name,
            format_constant_value(&c.value),
            c.bcs_hex
        ));
    }
    out
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error, json_output: bool) -> String {
    let configuration_error = error
        .downcast_ref::<PatchError>()
        .map(PatchError::is_configuration_error)
        .unwrap_or(false);

    if json_output {
        #[derive(Serialize)]
        struct ErrorJson {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            cause: Option<String>,
            #[serde(skip_serializing_if = "std::ops::Not::not")]
            configuration_error: bool,
        }

        let err = ErrorJson {
            error: error.to_string(),
            cause: error.source().map(|e| e.to_string()),
            configuration_error,
        };
        format!(
            "{}\n",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| "{}".to_string())
        )
    } else {
        let mut out = format!("\x1b[31mError:\x1b[0m {}\n", error);
        let mut causes = error.chain().skip(1).peekable();
        if causes.peek().is_some() {
            out.push_str("Caused by:\n");
            for (idx, cause) in causes.enumerate() {
                out.push_str(&format!("  {}: {}\n", idx + 1, cause));
            }
        }
        if configuration_error {
            out.push_str("The coin template is unusable; this is not caused by your input.\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_constant_value() {
        assert_eq!(format_constant_value(&ConstantValue::U8(9)), "9");
        assert_eq!(
            format_constant_value(&ConstantValue::Bytes {
                text: Some("DMT".to_string()),
                hex: "444d54".to_string()
            }),
            "\"DMT\""
        );
        assert_eq!(
            format_constant_value(&ConstantValue::Bytes {
                text: None,
                hex: "ff".to_string()
            }),
            "0xff"
        );
    }

    #[test]
    fn test_format_error_json() {
        let err = anyhow::Error::new(PatchError::DecimalsOutOfRange { value: 256 });
        let out = format_error(&err, true);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(json["error"].as_str().unwrap().contains("256"));
        assert!(json.get("configuration_error").is_none());
    }
}
