use crate::error::ParseError;

const FIELD: &str = "wfd_presentation_url";

/// Two URL slots (primary + secondary display). An empty slot serializes as
/// the `none` sentinel per spec section 3.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresentationUrl {
    pub url1: Option<String>,
    pub url2: Option<String>,
}

impl PresentationUrl {
    pub fn to_wire(&self) -> String {
        let slot = |s: &Option<String>| s.clone().unwrap_or_else(|| "none".to_string());
        format!("{} {}", slot(&self.url1), slot(&self.url2))
    }

    pub fn parse(value: &str) -> Result<PresentationUrl, ParseError> {
        let mut parts = value.splitn(2, ' ');
        let bad = || ParseError::Property {
            name: FIELD.to_string(),
            value: value.to_string(),
        };
        let url1_token = parts.next().ok_or_else(bad)?;
        let url2_token = parts.next().ok_or_else(bad)?;
        let slot = |t: &str| -> Option<String> {
            if t.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(t.to_string())
            }
        };
        Ok(PresentationUrl {
            url1: slot(url1_token),
            url2: slot(url2_token),
        })
    }
}
