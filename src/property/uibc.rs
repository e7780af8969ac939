use crate::error::ParseError;
use crate::property::hex;

const CAP_FIELD: &str = "wfd_uibc_capability";

/// Input-category and generic-transport capability advertisement.
/// Individual HIDC (human interface device class) descriptors beyond the
/// category bitmap are not decoded into typed fields (Non-goal: no UIBC
/// event byte format); they are kept as opaque tokens so round-trip still
/// holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UibcCapability {
    pub input_category: u16,
    pub generic_transports: Vec<String>,
    pub hidc: Vec<String>,
    pub port: u16,
}

impl UibcCapability {
    pub fn to_wire(&self) -> String {
        format!(
            "input_category_list={}; generic_cap_list={}; hidc_cap_list={}; port={}",
            hex::encode(self.input_category as u64, 4),
            self.generic_transports.join(","),
            self.hidc.join(","),
            hex::encode(self.port as u64, 4),
        )
    }

    pub fn parse(value: &str) -> Result<UibcCapability, ParseError> {
        let bad = || ParseError::Property {
            name: CAP_FIELD.to_string(),
            value: value.to_string(),
        };
        let mut input_category = None;
        let mut generic_transports = Vec::new();
        let mut hidc = Vec::new();
        let mut port = None;

        for field in value.split(';') {
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            let (key, val) = field.split_once('=').ok_or_else(bad)?;
            match key.trim() {
                "input_category_list" => {
                    input_category = Some(hex::decode_u16(val.trim(), CAP_FIELD)?);
                }
                "generic_cap_list" => {
                    generic_transports = split_csv(val.trim());
                }
                "hidc_cap_list" => {
                    hidc = split_csv(val.trim());
                }
                "port" => {
                    port = Some(hex::decode_u16(val.trim(), CAP_FIELD)?);
                }
                _ => return Err(bad()),
            }
        }

        Ok(UibcCapability {
            input_category: input_category.ok_or_else(bad)?,
            generic_transports,
            hidc,
            port: port.ok_or_else(bad)?,
        })
    }
}

fn split_csv(s: &str) -> Vec<String> {
    if s.is_empty() {
        Vec::new()
    } else {
        s.split(',').map(|t| t.to_string()).collect()
    }
}
