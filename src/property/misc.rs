use crate::error::ParseError;
use crate::property::hex;

/// Which video/audio source feeds the sink: the device's own content, or a
/// secondary (coupled) sink re-routed through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Primary,
    Secondary,
}

impl Route {
    pub fn as_str(self) -> &'static str {
        match self {
            Route::Primary => "primary",
            Route::Secondary => "secondary",
        }
    }

    pub fn parse(token: &str) -> Result<Route, ParseError> {
        match token.to_ascii_lowercase().as_str() {
            "primary" => Ok(Route::Primary),
            "secondary" => Ok(Route::Secondary),
            _ => Err(ParseError::Property {
                name: "wfd_route".to_string(),
                value: token.to_string(),
            }),
        }
    }
}

/// I2C bus availability on the sink for out-of-band EDID/control reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2c {
    pub supported: bool,
    pub port: u16,
}

impl I2c {
    pub fn to_wire(&self) -> String {
        if self.supported {
            hex::encode(self.port as u64, 4)
        } else {
            "none".to_string()
        }
    }

    pub fn parse(value: &str) -> Result<I2c, ParseError> {
        if value.eq_ignore_ascii_case("none") {
            return Ok(I2c { supported: false, port: 0 });
        }
        Ok(I2c {
            supported: true,
            port: hex::decode_u16(value, "wfd_i2c")?,
        })
    }
}

/// Presentation-timestamp / decode-timestamp pair signaling an upcoming
/// AV format change. Both fields are 40-bit values encoded as 10 hex
/// digits (spec section 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvFormatChangeTiming {
    pub pts: u64,
    pub dts: u64,
}

impl AvFormatChangeTiming {
    pub fn to_wire(&self) -> String {
        format!("{} {}", hex::encode(self.pts, 10), hex::encode(self.dts, 10))
    }

    pub fn parse(value: &str) -> Result<AvFormatChangeTiming, ParseError> {
        let mut parts = value.split_whitespace();
        let field = "wfd_av_format_change_timing";
        let bad = || ParseError::Property {
            name: field.to_string(),
            value: value.to_string(),
        };
        let pts_token = parts.next().ok_or_else(bad)?;
        let dts_token = parts.next().ok_or_else(bad)?;
        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(AvFormatChangeTiming {
            pts: hex::decode(pts_token, 10, field)?,
            dts: hex::decode(dts_token, 10, field)?,
        })
    }
}
