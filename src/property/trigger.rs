use crate::error::ParseError;

/// The method an `M5` trigger instructs its receiver to originate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMethod {
    Setup,
    Play,
    Pause,
    Teardown,
}

impl TriggerMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerMethod::Setup => "SETUP",
            TriggerMethod::Play => "PLAY",
            TriggerMethod::Pause => "PAUSE",
            TriggerMethod::Teardown => "TEARDOWN",
        }
    }

    pub fn parse(token: &str) -> Result<TriggerMethod, ParseError> {
        match token {
            "SETUP" => Ok(TriggerMethod::Setup),
            "PLAY" => Ok(TriggerMethod::Play),
            "PAUSE" => Ok(TriggerMethod::Pause),
            "TEARDOWN" => Ok(TriggerMethod::Teardown),
            _ => Err(ParseError::Property {
                name: "wfd_trigger_method".to_string(),
                value: token.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all() {
        for m in [
            TriggerMethod::Setup,
            TriggerMethod::Play,
            TriggerMethod::Pause,
            TriggerMethod::Teardown,
        ] {
            assert_eq!(TriggerMethod::parse(m.as_str()).unwrap(), m);
        }
    }

    #[test]
    fn rejects_unknown() {
        assert!(TriggerMethod::parse("OPTIONS").is_err());
    }
}
