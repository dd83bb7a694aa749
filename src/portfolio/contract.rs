/// Option side. Only plain calls and puts are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

impl std::str::FromStr for OptionType {
    type Err = crate::errors::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(Self::Call),
            "put" => Ok(Self::Put),
            other => Err(crate::errors::EngineError::InvalidInput(format!(
                "unknown option type: {other:?}"
            ))),
        }
    }
}

/// One option position. Immutable once built; the portfolio is only ever
/// rebuilt from a sequence of these.
///
/// Construction goes through `input::ContractInput::normalize`, so strike and
/// premium are always finite here. Premium is not checked for economic sense.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Contract {
    #[serde(rename = "type")]
    option_type: OptionType,
    strike: f64,
    premium: f64,
}

impl Contract {
    pub(crate) fn new(option_type: OptionType, strike: f64, premium: f64) -> Self {
        Self { option_type, strike, premium }
    }

    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    #[inline]
    pub fn premium(&self) -> f64 {
        self.premium
    }
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - Strike: {}, Premium: {}",
            self.option_type, self.strike, self.premium
        )
    }
}
