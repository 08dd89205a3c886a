use std::f64::consts;

/// Named literals a formula may mention. Any other bare name is a variable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    Tau,
    E,
}

impl Constant {
    pub const ALL: [Constant; 3] = [Constant::Pi, Constant::Tau, Constant::E];

    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => consts::PI,
            Constant::Tau => consts::TAU,
            Constant::E => consts::E,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::Tau => "tau",
            Constant::E => "e",
        }
    }
}

impl TryFrom<&str> for Constant {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pi" => Ok(Constant::Pi),
            "tau" => Ok(Constant::Tau),
            "e" => Ok(Constant::E),
            _ => Err(format!("Unknown constant: {}", value)),
        }
    }
}
